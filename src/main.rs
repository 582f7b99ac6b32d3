use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixel_filters::{ConvolutionKernel, DiffusionKernel, FilterError};
use pixfilt::models::{ChainConfig, DEFAULT_CHAIN_YAML};
use pixfilt::presets::Preset;
use pixfilt::rendering::{read_png, write_png};
use pixfilt::services::EditorSession;

#[derive(Parser)]
#[command(name = "pixfilt")]
#[command(about = "Apply pixel filter chains to PNG images")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a filter chain to an image
    Apply {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Chain file (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Preset to append after the configured chain (repeatable)
        #[arg(short = 'f', long = "filter")]
        filters: Vec<String>,

        /// Convert to gray before the chain runs
        #[arg(long)]
        grayscale: bool,

        /// Re-compress the output with oxipng
        #[arg(long)]
        optimize: bool,
    },
    /// List presets and built-in kernels
    List,
    /// Write a documented default chain file
    Init {
        /// Where to write the chain file
        #[arg(short, long, default_value = "chain.yaml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixfilt=info,pixel_filters=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Apply {
            input,
            output,
            config,
            filters,
            grayscale,
            optimize,
        } => run_apply_command(&input, &output, config.as_deref(), &filters, grayscale, optimize),
        Commands::List => {
            run_list_command();
            Ok(())
        }
        Commands::Init { output, force } => run_init_command(&output, force),
    }
}

/// Decode, filter from the original, encode
fn run_apply_command(
    input: &Path,
    output: &Path,
    config: Option<&Path>,
    presets: &[String],
    grayscale: bool,
    optimize: bool,
) -> anyhow::Result<()> {
    let chain_config = match config {
        Some(path) => ChainConfig::load(path)?,
        None => ChainConfig::from_env(),
    };

    // Validate everything before touching the image
    let mut filters = chain_config.build_filters()?;
    for name in presets {
        filters.push(name.parse::<Preset>()?.filter());
    }

    let image = read_png(input)?;

    let session = EditorSession::with_chain(image, filters, grayscale || chain_config.grayscale)?;
    let result = session.rendered().ok_or(FilterError::NullSource)?;

    let bytes = write_png(output, result, optimize)?;
    println!(
        "Wrote {} ({} filters, {} bytes)",
        output.display(),
        session.chain().len(),
        bytes
    );

    Ok(())
}

/// Print the preset catalogue and kernel names
fn run_list_command() {
    println!("Presets:");
    for preset in Preset::ALL {
        println!("  {:<22} {}", preset.name(), preset.description());
    }

    println!("\nDiffusion kernels:");
    for kernel in DiffusionKernel::ALL {
        let matrix = kernel.matrix();
        println!(
            "  {:<22} {}x{}",
            kernel.name(),
            matrix.width(),
            matrix.height()
        );
    }

    println!("\nConvolution kernels:");
    for kernel in ConvolutionKernel::ALL {
        println!("  {}", kernel.name());
    }
}

/// Write the default chain file
fn run_init_command(output: &Path, force: bool) -> anyhow::Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }
    std::fs::write(output, DEFAULT_CHAIN_YAML)?;
    println!("Wrote {}", output.display());
    Ok(())
}
