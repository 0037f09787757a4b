use clap::Parser;
use scenegen::logger::{self, LogLevel, LoggerConfig};
use scenegen::{Config, GenerationRequest, Orientation, ScenePipeline};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Generate a cinematic image for one scene of a story.
#[derive(Parser, Debug)]
#[command(name = "scenegen", version)]
#[command(about = "Enrich a scene description into an image prompt and render it with Gemini")]
struct Args {
    /// Short description of what should appear in the image, in any language
    #[arg(long)]
    scene: String,

    /// Background story informing tone and setting
    #[arg(long, conflicts_with = "context_file", required_unless_present = "context_file")]
    context: Option<String>,

    /// Read the story context from a file instead
    #[arg(long)]
    context_file: Option<PathBuf>,

    /// Render the scene's words on in-scene surfaces such as signs or banners
    #[arg(long)]
    with_text: bool,

    /// landscape (16:9, 1920x1080) or portrait (9:16, 1080x1920)
    #[arg(long, default_value = "landscape")]
    orientation: Orientation,

    /// Where to write the PNG (defaults to animation.png)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Also append log lines to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let args = Args::parse();

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    let mut logger_config = LoggerConfig::new()
        .with_level(level)
        .with_json_output(args.json_logs)
        .with_colors(!args.json_logs);
    if let Some(path) = &args.log_file {
        logger_config = logger_config.with_file_output(&path.to_string_lossy());
    }
    if let Err(e) = logger::init_with_config(logger_config) {
        eprintln!("{}", e);
    }

    if dotenv_loaded {
        log::debug!("✅ .env file loaded");
    } else {
        log::debug!("No .env file found, using process environment");
    }

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("🛑 Error generating image: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let story_context = match (&args.context, &args.context_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => String::new(),
    };

    let request = GenerationRequest::new(args.scene.as_str(), story_context)
        .with_embedded_text(args.with_text)
        .with_orientation(args.orientation);

    if let Err(e) = request.validate() {
        log::warn!("⚠️  Please enter both the scene text and the story context ({})", e);
        return Ok(ExitCode::from(2));
    }

    let mut config = Config::from_env();
    if let Some(key) = args.api_key {
        config.gemini = config.gemini.with_api_key(key);
    }
    if let Some(out) = &args.out {
        config = config.with_output_file_name(out.to_string_lossy());
    }
    logger::log_config_info(&config);

    let pipeline = ScenePipeline::from_config(&config)?;
    log::info!("🎨 Generating {} image...", request.orientation);

    let result = pipeline.generate_image(&request).await?;

    println!("{}", result.enriched_prompt);

    if let Some(text) = &result.explanation_text {
        log::info!("Model text response: {}", text);
    }

    match &result.image_bytes {
        Some(bytes) => {
            let out = PathBuf::from(&config.output_file_name);
            fs::write(&out, bytes)?;
            log::info!(
                "✅ Saved {} ({} bytes, source type {})",
                out.display(),
                bytes.len(),
                result.mime_type.as_deref().unwrap_or("unknown")
            );
            Ok(ExitCode::SUCCESS)
        }
        None => {
            log::warn!(
                "⚠️  The model did not return an image for this prompt. It may have returned only text."
            );
            if let Some(text) = &result.explanation_text {
                eprintln!("Full response text:\n{}", text);
            }
            Ok(ExitCode::from(3))
        }
    }
}
