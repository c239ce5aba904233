//! kml2dxf command line

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use kml2dxf::{CodePage, Converter, ConverterConfig, Projection};

#[derive(Parser, Debug)]
#[command(name = "kml2dxf", version, about = "Convert survey KML into layered DXF drawings")]
struct Cli {
    /// Verbosity: -d info, -dd debug, -ddd trace
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count, global = true)]
    debug: u8,

    /// TOML configuration file
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a KML file into one DXF per projection
    Convert(ConvertArgs),
    /// Print the folder outline of a KML file
    Tree {
        input: PathBuf,
    },
    /// Print the layers a KML file would produce, with feature counts
    Layers {
        input: PathBuf,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    input: PathBuf,

    /// Output directory
    #[arg(short = 'o', long = "out-dir", default_value = ".")]
    out_dir: PathBuf,

    /// Output base name, defaults to the input file stem
    #[arg(short = 'n', long = "name")]
    name: Option<String>,

    /// Output projection, repeatable (WGS84, Lambert93)
    #[arg(short = 'p', long = "projection", value_parser = parse_projection)]
    projections: Vec<Projection>,

    /// Output code page (UTF-8, ANSI_1252)
    #[arg(long = "code-page", value_parser = parse_code_page)]
    code_page: Option<CodePage>,

    /// Do not label point placemarks
    #[arg(long = "no-labels")]
    no_labels: bool,

    /// Leave polylines open
    #[arg(long = "open-polylines")]
    open_polylines: bool,
}

fn parse_projection(name: &str) -> std::result::Result<Projection, String> {
    Projection::from_name(name).ok_or_else(|| format!("unknown projection `{name}`"))
}

fn parse_code_page(name: &str) -> std::result::Result<CodePage, String> {
    CodePage::from_name(name).ok_or_else(|| format!("unknown code page `{name}`"))
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = ConverterConfig::load_or_default(cli.config.as_deref())
        .context("loading configuration")?;

    match &cli.command {
        Commands::Convert(args) => {
            apply_overrides(&mut config, args);
            convert(config, args)
        }
        Commands::Tree { input } => {
            let converter = Converter::new(config)?;
            let tree = converter
                .read(input)
                .with_context(|| format!("reading {}", input.display()))?;
            print!("{}", tree.outline());
            Ok(())
        }
        Commands::Layers { input } => {
            let converter = Converter::new(config)?;
            let tree = converter
                .read(input)
                .with_context(|| format!("reading {}", input.display()))?;
            let layers = converter.classify(&tree);
            for (key, features) in layers.iter() {
                println!("{key}\t{}", features.len());
            }
            Ok(())
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn apply_overrides(config: &mut ConverterConfig, args: &ConvertArgs) {
    if !args.projections.is_empty() {
        config.projections = args.projections.clone();
    }
    if let Some(code_page) = args.code_page {
        config.output.code_page = code_page;
    }
    if args.no_labels {
        config.output.labels = false;
    }
    if args.open_polylines {
        config.output.close_polylines = false;
    }
}

fn convert(config: ConverterConfig, args: &ConvertArgs) -> Result<()> {
    let base_name = match &args.name {
        Some(name) => name.clone(),
        None => base_name(&args.input)?,
    };

    let converter = Converter::new(config)?;
    let report = converter
        .convert(&args.input, &args.out_dir, &base_name)
        .with_context(|| format!("converting {}", args.input.display()))?;

    for output in &report.outputs {
        println!(
            "{}: {} entities ({} points, {} polylines, {} labels)",
            output.path.display(),
            output.stats.entity_count(),
            output.stats.points,
            output.stats.polylines,
            output.stats.labels,
        );
        if output.stats.unencodable_labels > 0 {
            println!(
                "  {} labels left out, names not representable in the code page",
                output.stats.unencodable_labels
            );
        }
    }
    println!(
        "{} layers, {} placemarks, {} excluded, {} without coordinates, {} dropped",
        report.layers,
        report.features,
        report.excluded,
        report.skipped_placemarks,
        report.dropped_features(),
    );
    Ok(())
}

fn base_name(input: &Path) -> Result<String> {
    input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .with_context(|| format!("cannot derive an output name from {}", input.display()))
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // RUST_LOG directives refine the -d level
    let filter = EnvFilter::builder()
        .with_default_directive(filter.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();
}
