//! screenshot CLI
//!
//! Renders one webpage through the rendering service and writes the result
//! to a file.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use screenshot_client::{Artifact, Client, ClientConfig, Crop, ImageOptions, Margin, PdfOptions, Window};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "screenshot")]
#[command(version)]
#[command(about = "Render a webpage to PNG, JPEG or PDF via a rendering service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture a PNG screenshot
    Png {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        crop: CropArgs,
    },
    /// Capture a JPEG screenshot
    Jpeg {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        crop: CropArgs,
        /// JPEG quality, forwarded as-is
        #[arg(long, default_value = "100")]
        quality: i32,
    },
    /// Print the page to PDF
    Pdf {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        pdf: PdfArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Webpage to render
    url: String,

    /// Rendering service base URL
    #[arg(long, env = "SCREENSHOT_BASE_URL", default_value = "http://localhost:3000")]
    base_url: String,

    /// Request timeout in milliseconds
    #[arg(long, default_value = "10000")]
    timeout_ms: u64,

    /// Output file (defaults to out.<format>)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Viewport size, e.g. 1280x720
    #[arg(long)]
    window: Option<Window>,

    /// Load condition to wait for (load, domcontentloaded, networkidle0, networkidle2)
    #[arg(long)]
    wait_until: Option<String>,

    /// Extra request header "Name: value" (repeatable)
    #[arg(long = "header", short = 'H')]
    headers: Vec<String>,

    /// JSON file with options; flags override its values
    #[arg(long)]
    options: Option<PathBuf>,
}

#[derive(Args)]
struct CropArgs {
    /// Capture region size, e.g. 100x100
    #[arg(long)]
    crop: Option<Crop>,

    /// Horizontal crop offset
    #[arg(long, requires = "crop")]
    x: Option<i32>,

    /// Vertical crop offset
    #[arg(long, requires = "crop")]
    y: Option<i32>,
}

#[derive(Args)]
struct PdfArgs {
    /// Paper format (A4, Letter, ...)
    #[arg(long)]
    format: Option<String>,

    #[arg(long)]
    landscape: bool,

    #[arg(long)]
    display_header_footer: bool,

    #[arg(long)]
    print_background: bool,

    /// Pages to print, e.g. "1-5, 8"
    #[arg(long)]
    page_ranges: Option<String>,

    /// Output path hint passed to the service
    #[arg(long)]
    path: Option<String>,

    #[arg(long)]
    scale: Option<f32>,

    /// Margins as "top;right;bottom;left"
    #[arg(long)]
    margin: Option<Margin>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Png { common, crop } => {
            let opts = image_options(&common, crop)?;
            let client = client(&common)?;
            eprintln!("Rendering PNG of {}...", common.url);
            let artifact = client.png(&common.url, &opts)?;
            save(artifact, &output_path(&common, "png"))
        }
        Commands::Jpeg { common, crop, quality } => {
            let opts = image_options(&common, crop)?;
            let client = client(&common)?;
            eprintln!("Rendering JPEG of {} (quality {})...", common.url, quality);
            let artifact = client.jpeg(&common.url, &opts, quality)?;
            save(artifact, &output_path(&common, "jpeg"))
        }
        Commands::Pdf { common, pdf } => {
            let opts = pdf_options(&common, pdf)?;
            let client = client(&common)?;
            eprintln!("Rendering PDF of {}...", common.url);
            let artifact = client.pdf(&common.url, &opts)?;
            save(artifact, &output_path(&common, "pdf"))
        }
    }
}

fn client(common: &CommonArgs) -> Result<Client> {
    let config = ClientConfig {
        base_url: common.base_url.clone(),
        timeout_ms: common.timeout_ms,
        ..Default::default()
    };
    Ok(Client::with_config(config)?)
}

fn image_options(common: &CommonArgs, crop: CropArgs) -> Result<ImageOptions> {
    let mut opts: ImageOptions = load_options(common.options.as_deref())?;
    if common.window.is_some() {
        opts.window = common.window;
    }
    if common.wait_until.is_some() {
        opts.wait_until = common.wait_until.clone();
    }
    if let Some(mut c) = crop.crop {
        c.x = crop.x;
        c.y = crop.y;
        opts.crop = Some(c);
    }
    opts.headers.extend(parse_headers(&common.headers)?);
    Ok(opts)
}

fn pdf_options(common: &CommonArgs, args: PdfArgs) -> Result<PdfOptions> {
    let mut opts: PdfOptions = load_options(common.options.as_deref())?;
    if common.window.is_some() {
        opts.window = common.window;
    }
    if common.wait_until.is_some() {
        opts.wait_until = common.wait_until.clone();
    }
    if let Some(format) = args.format {
        opts.format = format;
    }
    if let Some(ranges) = args.page_ranges {
        opts.page_ranges = ranges;
    }
    if let Some(path) = args.path {
        opts.path = path;
    }
    if let Some(margin) = args.margin {
        opts.margin = margin;
    }
    if args.scale.is_some() {
        opts.scale = args.scale;
    }
    opts.landscape |= args.landscape;
    opts.display_header_footer |= args.display_header_footer;
    opts.print_background |= args.print_background;
    opts.headers.extend(parse_headers(&common.headers)?);
    Ok(opts)
}

fn load_options<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    match path {
        Some(p) => {
            let raw = fs::read_to_string(p)
                .with_context(|| format!("Failed to read options file {}", p.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse options file {}", p.display()))
        }
        None => Ok(T::default()),
    }
}

fn parse_headers(raw: &[String]) -> Result<HashMap<String, String>> {
    raw.iter()
        .map(|h| {
            let (name, value) = h
                .split_once(':')
                .with_context(|| format!("Header {:?} must look like \"Name: value\"", h))?;
            Ok((name.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

fn output_path(common: &CommonArgs, ext: &str) -> PathBuf {
    common
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("out.{}", ext)))
}

fn save(artifact: Artifact, path: &Path) -> Result<()> {
    let bytes = artifact.into_bytes()?;
    fs::write(path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    eprintln!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
