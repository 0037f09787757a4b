pub mod common;
pub mod gemini;
pub mod image;
pub mod request;
pub mod text;

pub use common::*;
pub use image::*;
pub use request::*;
pub use text::*;
