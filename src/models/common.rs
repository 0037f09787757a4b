use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GenerationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

impl Orientation {
    pub fn aspect_ratio_label(&self) -> &'static str {
        match self {
            Orientation::Landscape => "16:9",
            Orientation::Portrait => "9:16",
        }
    }

    pub fn resolution(&self) -> Resolution {
        match self {
            Orientation::Landscape => Resolution::new(1920, 1080),
            Orientation::Portrait => Resolution::new(1080, 1920),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Landscape => write!(f, "Landscape (16:9)"),
            Orientation::Portrait => write!(f, "Portrait (9:16)"),
        }
    }
}

impl FromStr for Orientation {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "landscape" | "16:9" => Ok(Orientation::Landscape),
            "portrait" | "9:16" => Ok(Orientation::Portrait),
            other => Err(GenerationError::Validation(format!(
                "unknown orientation '{}', expected landscape or portrait",
                other
            ))),
        }
    }
}

/// Per-invocation progress of a scene pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStage {
    Idle,
    Enriching,
    Requesting,
    ImageReady,
    NoImageProduced,
    Failed,
}

impl PipelineStage {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelineStage::ImageReady | PipelineStage::NoImageProduced | PipelineStage::Failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_table() {
        assert_eq!(Orientation::Landscape.resolution(), Resolution::new(1920, 1080));
        assert_eq!(Orientation::Portrait.resolution(), Resolution::new(1080, 1920));
        assert_eq!(Orientation::Landscape.aspect_ratio_label(), "16:9");
        assert_eq!(Orientation::Portrait.aspect_ratio_label(), "9:16");
    }

    #[test]
    fn test_orientation_parsing() {
        assert_eq!("Landscape".parse::<Orientation>().unwrap(), Orientation::Landscape);
        assert_eq!("9:16".parse::<Orientation>().unwrap(), Orientation::Portrait);
        assert!("square".parse::<Orientation>().is_err());
        assert!("1:1".parse::<Orientation>().is_err());
    }

    #[test]
    fn test_resolution_display() {
        assert_eq!(Orientation::Portrait.resolution().to_string(), "1080x1920");
    }

    #[test]
    fn test_terminal_stages() {
        assert!(!PipelineStage::Idle.is_terminal());
        assert!(!PipelineStage::Requesting.is_terminal());
        assert!(PipelineStage::Failed.is_terminal());
        assert!(PipelineStage::NoImageProduced.is_terminal());
    }
}
