use brandkit::imaging::{Quality, RustBackend, Size};
use brandkit::{config, output, process};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "brandkit")]
#[command(about = "Generate banner, icon and logo-overlay assets")]
#[command(long_about = "\
Generate banner, icon and logo-overlay assets

Banners are produced by scaling the source so it covers each preset size,
then cropping the centered region. Output is always exactly the preset size
and never distorted.

Typical layout:

  brand/
  ├── brandkit.toml          # Optional; run 'brandkit gen-config' for defaults
  ├── hero-1920x1080.jpg     # Banner source
  ├── logo-primary.png       # Overlay base layer
  └── logo-partner.png       # Overlay top layer

  brandkit banners hero-1920x1080.jpg
  brandkit overlay logo-primary.png logo-partner.png
  brandkit fit hero-1920x1080.jpg --width 1200 --height 400 --out hero.png

Set RUST_LOG=brandkit=debug for diagnostics.")]
#[command(version)]
struct Cli {
    /// Config file (stock defaults are used when it does not exist)
    #[arg(long, default_value = "brandkit.toml", global = true)]
    config: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log progress details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate every configured banner preset from one source image
    Banners {
        /// Source image
        source: PathBuf,
    },
    /// Composite two logos with an offset and derive icon/banner variants
    Overlay {
        /// Bottom layer
        base: PathBuf,
        /// Top layer
        overlay: PathBuf,
    },
    /// Fit-and-crop one image to an exact size
    Fit {
        /// Source image
        source: PathBuf,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        /// Output file; format follows the extension (png, jpg, webp).
        /// A relative path is placed under --output; an absolute path is used as is
        #[arg(long)]
        out: PathBuf,
        /// JPEG quality (1-100)
        #[arg(long, default_value_t = 95, value_parser = clap::value_parser!(u32).range(1..=100))]
        quality: u32,
    },
    /// Validate the config and print the resolved plan
    Check,
    /// Print a stock brandkit.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Banners { source } => {
            let config = config::load_config(&cli.config)?;
            init_thread_pool(&config.processing);
            let (tx, printer) = spawn_printer();
            let result = process::run_banners(
                &RustBackend::new(),
                &source,
                &cli.output,
                &config,
                Some(tx),
            );
            join_printer(printer);
            let manifest = result?;
            process::write_manifest(&cli.output, &manifest)?;
            output::print_banner_summary(&manifest, &cli.output);
        }
        Command::Overlay { base, overlay } => {
            let config = config::load_config(&cli.config)?;
            let (tx, printer) = spawn_printer();
            let result = process::run_overlay(
                &RustBackend::new(),
                &base,
                &overlay,
                &cli.output,
                &config,
                Some(tx),
            );
            join_printer(printer);
            let manifest = result?;
            process::write_manifest(&cli.output, &manifest)?;
            output::print_overlay_summary(&manifest, &cli.output);
        }
        Command::Fit {
            source,
            width,
            height,
            out,
            quality,
        } => {
            let out = resolve_fit_output(&cli.output, &out);
            process::run_fit(
                &RustBackend::new(),
                &source,
                &out,
                Size::new(width, height),
                Quality::new(quality),
            )?;
            println!("{} → {} ({}x{})", source.display(), out.display(), width, height);
        }
        Command::Check => {
            let config = config::load_config(&cli.config)?;
            output::print_check_output(&config);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Route `tracing` output to stderr so stdout stays clean for results.
fn init_tracing(verbose: bool) {
    let default = if verbose { "brandkit=info" } else { "brandkit=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize the rayon thread pool based on processing config.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

fn spawn_printer() -> (Sender<process::ProcessEvent>, JoinHandle<()>) {
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_process_event(&event) {
                println!("{}", line);
            }
        }
    });
    (tx, printer)
}

fn join_printer(printer: JoinHandle<()>) {
    if printer.join().is_err() {
        tracing::warn!("progress printer thread panicked");
    }
}

/// A relative `--out` lands inside the output directory; absolute paths are kept.
fn resolve_fit_output(output_dir: &Path, out: &Path) -> PathBuf {
    if out.is_absolute() {
        out.to_path_buf()
    } else {
        output_dir.join(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_fit_arguments() {
        let cli = Cli::try_parse_from([
            "brandkit", "fit", "src.jpg", "--width", "400", "--height", "133", "--out", "c.png",
        ])
        .unwrap();
        match cli.command {
            Command::Fit {
                width,
                height,
                quality,
                ..
            } => {
                assert_eq!((width, height), (400, 133));
                assert_eq!(quality, 95);
            }
            _ => panic!("expected fit"),
        }
        assert_eq!(cli.output, PathBuf::from("dist"));
    }

    #[test]
    fn fit_quality_out_of_range_is_rejected() {
        for quality in ["0", "101", "500"] {
            let result = Cli::try_parse_from([
                "brandkit", "fit", "src.jpg", "--width", "4", "--height", "4", "--out", "c.jpg",
                "--quality", quality,
            ]);
            assert!(result.is_err(), "quality {quality}");
        }
        let cli = Cli::try_parse_from([
            "brandkit", "fit", "src.jpg", "--width", "4", "--height", "4", "--out", "c.jpg",
            "--quality", "100",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Fit { quality: 100, .. }));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["brandkit", "banners", "hero.jpg", "--output", "assets"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("assets"));
    }

    #[test]
    fn fit_output_relative_goes_under_output_dir() {
        assert_eq!(
            resolve_fit_output(Path::new("dist"), Path::new("hero.png")),
            PathBuf::from("dist/hero.png")
        );
        assert_eq!(
            resolve_fit_output(Path::new("dist"), Path::new("/tmp/hero.png")),
            PathBuf::from("/tmp/hero.png")
        );
    }
}
