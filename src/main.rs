use blurup::artifact::{self, OutputMode};
use blurup::config::{self, ConfigError, ConfigOverrides};
use blurup::imaging::RustBackend;
use blurup::output;
use blurup::pipeline::{self, PipelineError};
use blurup::wrapper::WrapperTemplate;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;
use thiserror::Error;

fn version_string() -> &'static str {
    let on_tag = env!("BLURUP_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("BLURUP_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "blurup")]
#[command(about = "Generate a tiny inline blur-up placeholder for an image")]
#[command(long_about = "\
Generate a tiny inline blur-up placeholder for an image

The image is auto-oriented, shrunk to fit a small square, encoded as a
low-quality WebP and wrapped in an SVG with a Gaussian blur. By default the
result is printed as a CSS declaration:

  background: url('data:image/svg+xml,...') no-repeat 100%

Output selection (first match wins):
  --webp   raw WebP preview bytes
  --svg    raw SVG document
  --tag    <img> tag carrying the CSS in its style attribute
  (none)   CSS declaration; --base64 switches the data URI encoding

Diagnostics, including the transparency warning, go to stderr.")]
#[command(version = version_string())]
struct Cli {
    /// Source image (JPEG, PNG, GIF, TIFF, WebP or BMP)
    image: Option<PathBuf>,

    /// Maximum preview side size, in pixels
    #[arg(short = 's', long = "size", value_parser = clap::value_parser!(u32).range(1..))]
    size: Option<u32>,

    /// WebP quality (0-100)
    #[arg(short = 'q', long = "quality", value_parser = clap::value_parser!(u32).range(0..=100))]
    quality: Option<u32>,

    /// Blur standard deviation
    #[arg(short = 'b', long = "blur")]
    blur: Option<u32>,

    /// Output an <img> tag
    #[arg(long)]
    tag: bool,

    /// Output the preview WebP to stdout
    #[arg(long)]
    webp: bool,

    /// Output the preview SVG to stdout
    #[arg(long)]
    svg: bool,

    /// Encode the SVG as Base64 instead of quoting it
    #[arg(long)]
    base64: bool,

    /// Load settings from a TOML file (flags still win)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print a stock config file with all options documented
    #[arg(long)]
    gen_config: bool,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("no input image given")]
    Usage,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage) => {
            output::print_error(&CliError::Usage);
            eprintln!("{}", Cli::command().render_usage());
            ExitCode::FAILURE
        }
        Err(err) => {
            output::print_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let image = cli.image.as_deref().ok_or(CliError::Usage)?;

    let cfg = config::load_config(cli.config.as_deref())?.apply(&ConfigOverrides {
        size: cli.size,
        quality: cli.quality,
        blur: cli.blur,
        tag: cli.tag,
        base64: cli.base64,
    });
    cfg.validate()?;

    let template = WrapperTemplate::new();
    let mode = OutputMode::resolve(cfg.output_flags(cli.webp, cli.svg));

    let (tx, rx) = mpsc::channel();
    let result = pipeline::generate(
        &RustBackend::new(),
        image,
        &cfg.settings(),
        &template,
        Some(&tx),
    );
    // Warnings are reported even when a later stage fails
    for event in rx.try_iter() {
        output::print_pipeline_event(&event);
    }
    let placeholder = result?;

    let artifact = artifact::render(mode, &placeholder);
    artifact.write_to(&mut std::io::stdout().lock())?;
    Ok(())
}
