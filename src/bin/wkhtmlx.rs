//! CLI binary for wkhtmlx.
//!
//! A thin shim over the library crate that reads JSON options, maps global
//! flags to `ConverterConfig` and runs the converter.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;
use wkhtmlx::{
    generate, lookup_renderer, render_args, ConverterConfig, ConverterReport, FlagSet,
    ImageOptions, PdfOptions, Renderer, WkhtmlError,
};

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Screenshot a page as PNG
  wkhtmlx image --json '{"format": "png", "width": 1280}' https://example.com shot.png

  # A4 PDF with options from a file
  wkhtmlx pdf --options report.json report.html report.pdf

  # Options from stdin
  echo '{"grayscale": true, "margin_top": 20}' | wkhtmlx pdf --options - in.html out.pdf

  # Show the arguments that would be passed, without running anything
  wkhtmlx args pdf --json '{"page_size": "Letter", "lowquality": true}'

  # Check which converters are installed
  wkhtmlx lookup

OPTIONS DOCUMENTS:
  A JSON object with snake_case keys. Unknown keys and null values are
  ignored. A few keys keep historical names: "cookies", "custom_headers",
  "lowquality" and "smart_width" (PDF: maps to --enable/--disable-smart-shrinking).

ENVIRONMENT VARIABLES:
  WKHTMLTOIMAGE_BIN   Path or name of the wkhtmltoimage binary
  WKHTMLTOPDF_BIN     Path or name of the wkhtmltopdf binary
  RUST_LOG            Override the log filter (e.g. wkhtmlx=debug)
"#;

/// Convert HTML to images and PDFs with wkhtmltoimage / wkhtmltopdf.
#[derive(Parser, Debug)]
#[command(
    name = "wkhtmlx",
    version,
    about = "Convert HTML to images and PDFs with wkhtmltoimage / wkhtmltopdf",
    long_about = "Build wkhtmltoimage and wkhtmltopdf command lines from JSON option \
documents and run them. Boolean options are spelled the way each binary expects \
(--images / --no-images, --enable-forms / --disable-forms, --grayscale).",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// wkhtmltoimage binary (name on PATH or path).
    #[arg(long, global = true, env = "WKHTMLTOIMAGE_BIN")]
    image_binary: Option<PathBuf>,

    /// wkhtmltopdf binary (name on PATH or path).
    #[arg(long, global = true, env = "WKHTMLTOPDF_BIN")]
    pdf_binary: Option<PathBuf>,

    /// Run the converter in this directory.
    #[arg(long, global = true)]
    working_dir: Option<PathBuf>,

    /// Skip options that cannot be rendered instead of failing.
    #[arg(long, global = true, env = "WKHTMLX_LENIENT")]
    lenient: bool,

    /// Disable the spinner.
    #[arg(long, global = true, env = "WKHTMLX_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "WKHTMLX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "WKHTMLX_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a page to an image with wkhtmltoimage.
    Image(ConvertArgs),
    /// Render a page to a PDF with wkhtmltopdf.
    Pdf(ConvertArgs),
    /// Print the arguments an options document renders to, one per line.
    Args {
        /// Converter the options are for.
        #[arg(value_enum)]
        renderer: RendererArg,

        #[command(flatten)]
        source: OptionsSource,

        /// Print a JSON array instead.
        #[arg(long = "as-json")]
        as_json: bool,
    },
    /// Report where the converters are installed and their versions.
    Lookup {
        /// Print a JSON object instead.
        #[arg(long = "as-json")]
        as_json: bool,
    },
}

#[derive(Args, Debug)]
struct ConvertArgs {
    #[command(flatten)]
    source: OptionsSource,

    /// Page to convert: URL, local path, or `-` for stdin.
    input: String,

    /// File to write.
    output: PathBuf,
}

#[derive(Args, Debug)]
struct OptionsSource {
    /// Read options from a JSON file (`-` for stdin).
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Options as an inline JSON string.
    #[arg(long, value_name = "JSON", conflicts_with = "options")]
    json: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RendererArg {
    Image,
    Pdf,
}

impl From<RendererArg> for Renderer {
    fn from(v: RendererArg) -> Self {
        match v {
            RendererArg::Image => Renderer::Image,
            RendererArg::Pdf => Renderer::Pdf,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = log_filter(cli.verbose, cli.quiet, show_progress);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;

    match &cli.command {
        Command::Image(args) => convert(&cli, &config, Renderer::Image, args).await,
        Command::Pdf(args) => convert(&cli, &config, Renderer::Pdf, args).await,
        Command::Args {
            renderer,
            source,
            as_json,
        } => {
            let flags = load_flags((*renderer).into(), source).await?;
            let tokens = render_args(&flags, &config).context("Options cannot be rendered")?;
            if *as_json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&tokens).context("Failed to serialise arguments")?
                );
            } else {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                for token in &tokens {
                    writeln!(handle, "{token}").context("Failed to write to stdout")?;
                }
            }
            Ok(())
        }
        Command::Lookup { as_json } => lookup(&config, *as_json),
    }
}

/// Map global CLI flags to `ConverterConfig`.
/// Default log level when `RUST_LOG` is unset.
///
/// The spinner is the feedback while the converter runs, so info logs are
/// held back under it. Warnings still show: `--lenient` reports every
/// skipped flag as one.
fn log_filter(verbose: bool, quiet: bool, show_progress: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else if show_progress {
        "warn"
    } else {
        "info"
    }
}

fn build_config(cli: &Cli) -> Result<ConverterConfig> {
    let mut builder = ConverterConfig::builder().strict_flags(!cli.lenient);
    if let Some(ref path) = cli.image_binary {
        builder = builder.image_binary(path);
    }
    if let Some(ref path) = cli.pdf_binary {
        builder = builder.pdf_binary(path);
    }
    if let Some(ref dir) = cli.working_dir {
        builder = builder.working_dir(dir);
    }
    builder.build().context("Invalid configuration")
}

/// Read the options document and translate it for `renderer`.
async fn load_flags(renderer: Renderer, source: &OptionsSource) -> Result<FlagSet> {
    let data: Vec<u8> = match (&source.options, &source.json) {
        (Some(path), _) if path == Path::new("-") => {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .context("Failed to read options from stdin")?;
            buf
        }
        (Some(path), _) => tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read options from {:?}", path))?,
        (None, Some(json)) => json.clone().into_bytes(),
        (None, None) => b"{}".to_vec(),
    };

    let flags = match renderer {
        Renderer::Image => ImageOptions::from_json(&data)
            .context("Invalid image options")?
            .to_flag_set(),
        Renderer::Pdf => PdfOptions::from_json(&data)
            .context("Invalid PDF options")?
            .to_flag_set(),
    };
    Ok(flags)
}

async fn convert(
    cli: &Cli,
    config: &ConverterConfig,
    renderer: Renderer,
    args: &ConvertArgs,
) -> Result<()> {
    let flags = load_flags(renderer, &args.source).await?;
    let started = Instant::now();

    let progress = if cli.quiet || cli.no_progress {
        None
    } else {
        Some(spinner(&format!(
            "{} → {}",
            args.input,
            args.output.display()
        )))
    };

    let result = generate(&flags, &args.input, &args.output, config).await;

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    match result {
        Ok(captured) => {
            if cli.verbose {
                io::stderr().write_all(&captured).ok();
            }
            if !cli.quiet {
                eprintln!(
                    "{}  {}  {}",
                    green("✔"),
                    bold(&args.output.display().to_string()),
                    dim(&format!("{:.1}s", started.elapsed().as_secs_f64())),
                );
            }
            Ok(())
        }
        Err(err) => {
            // Show wkhtmltox's own diagnostics before our summary line.
            if let Some(output) = err.output() {
                io::stderr().write_all(output).ok();
            }
            if !cli.quiet {
                eprintln!("{}  {}", red("✘"), bold(&args.output.display().to_string()));
            }
            let context = failure_context(renderer, &err);
            Err(err).context(context)
        }
    }
}

fn failure_context(renderer: Renderer, err: &WkhtmlError) -> String {
    match err {
        WkhtmlError::BinaryNotFound { .. } => {
            format!("{} is not installed", renderer.binary_name())
        }
        _ => format!("{renderer} conversion failed"),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_prefix("Converting");
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

fn lookup(config: &ConverterConfig, as_json: bool) -> Result<()> {
    let mut reports = BTreeMap::new();
    let mut missing = 0usize;

    for renderer in [Renderer::Image, Renderer::Pdf] {
        let binary = config.binary_for(renderer);
        match lookup_renderer(renderer, config) {
            Ok(info) => {
                if !as_json {
                    match info.version() {
                        Some(v) => println!(
                            "  {}: {} {}",
                            renderer.binary_name(),
                            v,
                            dim(&format!("({})", info.path.display()))
                        ),
                        None => println!(
                            "  {}: {} {}",
                            renderer.binary_name(),
                            red("version unknown"),
                            dim(&format!("({})", info.path.display()))
                        ),
                    }
                }
                reports.insert(renderer.to_string(), Some(ConverterReport::from(&info)));
            }
            Err(err) => {
                missing += 1;
                if !as_json {
                    println!(
                        "  {}: {} {}",
                        renderer.binary_name(),
                        red("not found"),
                        dim(&format!("({})", binary.display()))
                    );
                }
                tracing::debug!(error = %err, "Lookup failed");
                reports.insert(renderer.to_string(), None);
            }
        }
    }

    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).context("Failed to serialise report")?
        );
    }

    if missing > 0 {
        anyhow::bail!("{missing} of 2 converters not found");
    }
    Ok(())
}
