//! screen-text-finder - find text on screen by OCR and fuzzy matching
//!
//! Reads a screenshot, recognizes the text in a region of it and prints the
//! boxes of words resembling a query. Nothing on screen is ever touched.

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use screen_text_finder::config::{self, FinderConfig};
use screen_text_finder::highlight::{draw_matches, HighlightStyle};
use screen_text_finder::{
    Region, ReplayRecognizer, Scorer, ScreenPoint, ScreenRect, ScreenTextFinder,
    ScreenshotFileCapture, TextRecognizer,
};

/// screen-text-finder - locate on-screen text
#[derive(Parser, Debug)]
#[command(name = "screen-text-finder")]
#[command(about = "Locate text on screen by OCR and fuzzy word matching")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find words matching a query
    Find(FindArgs),
    /// Print the recognized text of a region
    Read(SourceArgs),
    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Where pixels and text come from
#[derive(ClapArgs, Debug)]
struct SourceArgs {
    /// Screenshot standing in for the screen
    #[arg(long)]
    screenshot: PathBuf,

    /// Recorded OCR runs (JSON); without it the platform OCR engine is used
    #[arg(long)]
    runs: Option<PathBuf>,

    /// Region to search as X,Y,WIDTH,HEIGHT (defaults to the whole screenshot)
    #[arg(long, value_parser = parse_region)]
    region: Option<Region>,

    /// OCR language tag, overriding the configuration
    #[arg(long)]
    language: Option<String>,
}

#[derive(ClapArgs, Debug)]
struct FindArgs {
    /// Text to search for
    query: String,

    #[command(flatten)]
    source: SourceArgs,

    /// Report only the best match closest to a point
    #[arg(long)]
    closest: bool,

    /// Reference point as X,Y for --closest (defaults to the region center)
    #[arg(long, value_parser = parse_point, requires = "closest")]
    near: Option<ScreenPoint>,

    /// Minimum similarity score (0 - 100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    threshold: Option<u8>,

    /// Similarity metric
    #[arg(long, value_enum)]
    scorer: Option<Scorer>,

    /// Save a copy of the screenshot with matches outlined
    #[arg(long)]
    highlight: Option<PathBuf>,

    /// Print matches as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging (stderr keeps stdout free for results)
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::InitConfig { force } => init_config(args.config.as_deref(), force),
        Command::Find(find) => {
            let config = load_config(args.config.as_deref())?;
            run_find(find, config).await
        }
        Command::Read(source) => {
            let config = load_config(args.config.as_deref())?;
            run_read(source, config).await
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<FinderConfig> {
    let config = config::load_or_default(path).context("Failed to load configuration")?;
    if let Some(path) = path {
        info!("Loaded configuration from {:?}", path);
    }
    Ok(config)
}

/// Write the default configuration
fn init_config(path: Option<&Path>, force: bool) -> Result<ExitCode> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config::default_config_path()?,
    };
    if path.exists() && !force {
        anyhow::bail!("{:?} already exists (use --force to overwrite)", path);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    config::save_config(&FinderConfig::default(), &path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(ExitCode::SUCCESS)
}

/// Run a search and print the matches
async fn run_find(args: FindArgs, mut config: FinderConfig) -> Result<ExitCode> {
    if let Some(threshold) = args.threshold {
        config.matching.threshold = threshold;
    }
    if let Some(scorer) = args.scorer {
        config.matching.scorer = scorer;
    }

    let (capture, region, recognizer) = open_source(&args.source, &config)?;
    let finder = ScreenTextFinder::with_settings(capture, recognizer, &config.matching);

    let rects: Vec<ScreenRect> = if args.closest {
        finder
            .find_closest(&args.query, region, args.near)
            .await?
            .into_iter()
            .collect()
    } else {
        finder.find_all(&args.query, region).await?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rects)?);
    } else {
        for rect in &rects {
            let px = rect.to_pixels();
            println!("{} {} {} {}", px.x, px.y, px.width, px.height);
        }
    }

    if let Some(path) = &args.highlight {
        let capture = finder.capture();
        let mut image = capture.screen().clone();
        draw_matches(&mut image, capture.origin(), &rects, HighlightStyle::from(&config.output));
        image
            .save(path)
            .with_context(|| format!("Failed to save highlighted screenshot to {:?}", path))?;
        info!("Saved highlighted screenshot to {:?}", path);
    }

    if rects.is_empty() {
        eprintln!("No match for {:?}", args.query);
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the recognized text of a region
async fn run_read(source: SourceArgs, config: FinderConfig) -> Result<ExitCode> {
    let (capture, region, recognizer) = open_source(&source, &config)?;
    let finder = ScreenTextFinder::with_settings(capture, recognizer, &config.matching);
    println!("{}", finder.read_text(region).await?);
    Ok(ExitCode::SUCCESS)
}

/// Open the screenshot, resolve the region and pick an OCR backend
fn open_source(
    source: &SourceArgs,
    config: &FinderConfig,
) -> Result<(ScreenshotFileCapture, Region, Box<dyn TextRecognizer>)> {
    let capture = ScreenshotFileCapture::open(&source.screenshot)
        .with_context(|| format!("Failed to open screenshot {:?}", source.screenshot))?;
    let region = source.region.unwrap_or_else(|| capture.bounds());

    let recognizer: Box<dyn TextRecognizer> = match &source.runs {
        Some(path) => Box::new(
            ReplayRecognizer::from_json_file(path)
                .with_context(|| format!("Failed to load OCR runs from {:?}", path))?,
        ),
        None => {
            let language = source.language.as_deref().unwrap_or(&config.ocr.language);
            platform_recognizer(language)?
        }
    };

    Ok((capture, region, recognizer))
}

#[cfg(windows)]
fn platform_recognizer(language: &str) -> Result<Box<dyn TextRecognizer>> {
    let ocr = screen_text_finder::WindowsOcr::new(language)
        .context("Failed to initialize Windows OCR")?;
    Ok(Box::new(ocr))
}

#[cfg(not(windows))]
fn platform_recognizer(_language: &str) -> Result<Box<dyn TextRecognizer>> {
    anyhow::bail!("No OCR engine available on this platform; pass --runs with recorded OCR output")
}

/// Parse "X,Y,WIDTH,HEIGHT"
fn parse_region(s: &str) -> Result<Region, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, width, height] = parts.as_slice() else {
        return Err(format!("expected X,Y,WIDTH,HEIGHT, got {:?}", s));
    };
    let region = Region::new(
        x.parse().map_err(|e| format!("invalid x: {}", e))?,
        y.parse().map_err(|e| format!("invalid y: {}", e))?,
        width.parse().map_err(|e| format!("invalid width: {}", e))?,
        height.parse().map_err(|e| format!("invalid height: {}", e))?,
    );
    if region.is_empty() {
        return Err("region must have a non-zero width and height".to_string());
    }
    Ok(region)
}

/// Parse "X,Y"
fn parse_point(s: &str) -> Result<ScreenPoint, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {:?}", s))?;
    Ok(ScreenPoint::new(
        x.trim().parse().map_err(|e| format!("invalid x: {}", e))?,
        y.trim().parse().map_err(|e| format!("invalid y: {}", e))?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_region() {
        assert_eq!(parse_region("10,-20, 300,40"), Ok(Region::new(10, -20, 300, 40)));
        assert!(parse_region("10,20,300").is_err());
        assert!(parse_region("10,20,-3,40").is_err());
        assert!(parse_region("0,0,0,40").is_err());
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("12.5, 40"), Ok(ScreenPoint::new(12.5, 40.0)));
        assert!(parse_point("12").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn test_parse_find_args() {
        let args = Args::parse_from([
            "screen-text-finder",
            "find",
            "bitmap",
            "--screenshot",
            "screen.png",
            "--runs",
            "runs.json",
            "--closest",
            "--near",
            "100,200",
            "--scorer",
            "jaro-winkler",
        ]);
        let Command::Find(find) = args.command else {
            panic!("expected find command");
        };
        assert_eq!(find.query, "bitmap");
        assert!(find.closest);
        assert_eq!(find.near, Some(ScreenPoint::new(100.0, 200.0)));
        assert_eq!(find.scorer, Some(Scorer::JaroWinkler));
        assert_eq!(find.source.runs, Some(PathBuf::from("runs.json")));
    }

    #[test]
    fn test_near_requires_closest() {
        let result = Args::try_parse_from([
            "screen-text-finder",
            "find",
            "bitmap",
            "--screenshot",
            "screen.png",
            "--near",
            "1,2",
        ]);
        assert!(result.is_err());
    }
}
