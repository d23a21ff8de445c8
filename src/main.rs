use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quantpng::models::{AppConfig, CONFIG_ENV};
use quantpng::services::{convert_file, parse_colors, parse_region, ConvertOptions};

#[derive(Parser)]
#[command(name = "quantpng")]
#[command(about = "Reduce PNG images to a fixed palette with error diffusion")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PNG to a palette-indexed PNG
    Convert {
        /// Input PNG file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Named palette from the config (default: the config's default_palette)
        #[arg(short, long, conflicts_with = "colors")]
        palette: Option<String>,

        /// Palette as comma-separated hex RGB (e.g. "#000000,#FFFFFF,#FF0000")
        #[arg(long)]
        colors: Option<String>,

        /// Config file (default: $QUANTPNG_CONFIG, else built-in palettes)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only dither this area, given as X,Y,W,H
        #[arg(long)]
        region: Option<String>,

        /// Map every pixel to its nearest color instead of dithering
        #[arg(long)]
        no_dither: bool,

        /// Skip oxipng re-compression
        #[arg(long)]
        no_optimize: bool,

        /// Print conversion statistics as JSON
        #[arg(long)]
        stats: bool,
    },
    /// List the available palettes
    Palettes {
        /// Config file (default: $QUANTPNG_CONFIG, else built-in palettes)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quantpng=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Some(Commands::Convert {
            input,
            output,
            palette,
            colors,
            config,
            region,
            no_dither,
            no_optimize,
            stats,
        }) => run_convert_command(
            &input,
            &output,
            palette.as_deref(),
            colors.as_deref(),
            config.as_deref(),
            region.as_deref(),
            !no_dither,
            !no_optimize,
            stats,
        ),
        Some(Commands::Palettes { config }) => {
            run_palettes_command(config.as_deref());
            Ok(())
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Convert one PNG file
#[allow(clippy::too_many_arguments)]
fn run_convert_command(
    input: &Path,
    output: &Path,
    palette_name: Option<&str>,
    colors: Option<&str>,
    config_path: Option<&Path>,
    region: Option<&str>,
    dither: bool,
    optimize: bool,
    print_stats: bool,
) -> anyhow::Result<()> {
    // --colors wins over any configured palette
    let palette = match colors {
        Some(colors) => parse_colors(colors)?,
        None => {
            let config = AppConfig::load(config_path)?;
            let name = palette_name.unwrap_or_else(|| config.default_palette_name());
            config.palette(name)?
        }
    };

    let mut options = ConvertOptions::new(palette);
    options.region = region.map(parse_region).transpose()?;
    options.dither = dither;
    options.optimize = optimize;

    let stats = convert_file(input, output, &options)?;

    if print_stats {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!(
            "Wrote {} ({}x{}, {} colors, {} bytes)",
            output.display(),
            stats.width,
            stats.height,
            stats.colors,
            stats.bytes
        );
    }
    Ok(())
}

/// List configured palettes, marking the default
fn run_palettes_command(config_path: Option<&Path>) {
    let config = AppConfig::load_or_default(config_path);
    let default = config.default_palette_name();

    for name in config.palette_names() {
        let entry = &config.palettes[name];
        let marker = if name == default { "*" } else { " " };
        let description = entry.description.as_deref().unwrap_or("");
        println!(
            "{marker} {name:<12} {:>3} colors  {description}",
            entry.colors.len()
        );
        println!("    {}", entry.colors.join(" "));
    }
}

/// Show version, config source and palettes
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var(CONFIG_ENV).ok();

    println!("quantpng v{VERSION}");
    println!("Reduce PNG images to a fixed palette with error diffusion\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "built-in (file not found)".to_string(),
        None => "built-in".to_string(),
    };
    println!("\nConfig:  {config_source}");

    let config = AppConfig::load_or_default(None);
    println!(
        "Palettes: {} (default: {})",
        config.palette_names().join(", "),
        config.default_palette_name()
    );

    println!("\nRun 'quantpng --help' for usage.");
}
