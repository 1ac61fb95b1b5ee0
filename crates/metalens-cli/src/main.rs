mod fetch;
mod logger;
mod report;

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use metalens_core::url_utils::is_absolute_http_url;
use metalens_core::{AiReadinessOptions, AnalyzeOptions, ImageAnalysis, analyze};

use crate::fetch::{FetchConfig, fetch_site};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {s}. Valid options: text, json")),
        }
    }
}

/// Measured `og:image` size given as `WIDTHxHEIGHT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ImageSize {
    width: u32,
    height: u32,
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid image size: {s}. Expected WIDTHxHEIGHT, e.g. 1200x630");
        let (width, height) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;

        Ok(Self {
            width: width.trim().parse().map_err(|_| invalid())?,
            height: height.trim().parse().map_err(|_| invalid())?,
        })
    }
}

/// Audit a page's metadata for search engines, social platforms and AI crawlers
#[derive(Parser, Debug)]
#[command(name = "metalens")]
#[command(author = "Pon Datalab")]
#[command(version)]
#[command(about = "Audit the metadata of a web page", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Treat the input as pasted HTML and skip the robots.txt and llms.txt checks
    #[arg(long)]
    paste: bool,

    /// robots.txt to evaluate alongside a file or stdin input
    #[arg(long, value_name = "FILE")]
    robots_txt: Option<PathBuf>,

    /// llms.txt to evaluate alongside a file or stdin input
    #[arg(long, value_name = "FILE")]
    llms_txt: Option<PathBuf>,

    /// Measured og:image size, e.g. 1200x630
    #[arg(long, value_name = "WxH")]
    image_size: Option<ImageSize>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "5", value_name = "SECS")]
    timeout: u64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Document text plus what is known about the site around it
struct Input {
    source: String,
    html: String,
    ai_readiness: AiReadinessOptions,
}

fn read_text_file(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

fn read_optional(path: Option<&PathBuf>) -> anyhow::Result<Option<String>> {
    path.map(|p| read_text_file(p)).transpose()
}

async fn load_input(args: &Args) -> anyhow::Result<Input> {
    if is_absolute_http_url(&args.input) {
        let config = FetchConfig {
            timeout: args.timeout,
            ..Default::default()
        };
        let site = fetch_site(&args.input, &config)
            .await
            .with_context(|| format!("Failed to fetch {}", args.input))?;

        // Local files override whatever the site served
        let robots_txt = read_optional(args.robots_txt.as_ref())?.or(site.robots_txt);
        let llms_txt = read_optional(args.llms_txt.as_ref())?.or(site.llms_txt);

        return Ok(Input {
            source: site.final_url.to_string(),
            html: site.html,
            ai_readiness: AiReadinessOptions {
                paste_mode: args.paste,
                robots_txt,
                llms_txt,
            },
        });
    }

    let html = if args.input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    } else {
        read_text_file(Path::new(&args.input))?
    };

    let robots_txt = read_optional(args.robots_txt.as_ref())?;
    let llms_txt = read_optional(args.llms_txt.as_ref())?;
    // Without any site files there is nothing to check beyond the document
    let paste_mode = args.paste || (robots_txt.is_none() && llms_txt.is_none());

    Ok(Input {
        source: if args.input == "-" {
            "stdin".to_string()
        } else {
            args.input.clone()
        },
        html,
        ai_readiness: AiReadinessOptions {
            paste_mode,
            robots_txt,
            llms_txt,
        },
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Err(e) = logger::init_logger(args.verbose) {
        eprintln!("Failed to initialize logger: {e}");
    }
    log::debug!("metalens {VERSION}");

    let input = load_input(&args).await?;
    log::debug!(
        "Analyzing {} ({} bytes, paste mode: {})",
        input.source,
        input.html.len(),
        input.ai_readiness.paste_mode
    );

    let options = AnalyzeOptions {
        image: args
            .image_size
            .map(|size| ImageAnalysis::from_dimensions(size.width, size.height)),
        ai_readiness: input.ai_readiness,
    };
    let report = analyze(&input.html, &options);

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            let color = io::stdout().is_terminal();
            print!("{}", report::render_text(&report, &input.source, color));
        }
    }

    Ok(())
}
