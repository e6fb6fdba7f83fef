//! Plot Layout CLI
//!
//! Usage:
//!   plot-layout [OPTIONS] [ITEMS]...
//!
//! Options:
//!   -c, --catalog <FILE>     Item catalog (TOML, or JSON by extension)
//!   -f, --format <FORMAT>    Output format: text or svg
//!   -s, --stylesheet <FILE>  Stylesheet file for color palette (TOML format)
//!   -d, --debug              Log solver decisions
//!       --lint               Report layout defects after each item
//!   -l, --list               List catalog items and exit
//!   -h, --help               Print help

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plot_layout::{
    render_with_lint, Catalog, CatalogError, OutputFormat, RenderConfig, Stylesheet,
};

#[derive(Parser)]
#[command(name = "plot-layout")]
#[command(about = "Pack crop footprints and their companions into a 10x10 plot")]
struct Cli {
    /// Items to lay out (every catalog item if none are given)
    items: Vec<String>,

    /// Item catalog (TOML, or JSON when the file ends in .json)
    #[arg(short, long, default_value = "items.toml")]
    catalog: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Stylesheet file for color palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Debug mode: log strategy selection and search probes
    #[arg(short, long)]
    debug: bool,

    /// Report layout defects after each item
    #[arg(long)]
    lint: bool,

    /// List catalog items with their footprint size and exit
    #[arg(short, long)]
    list: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Svg,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Svg => OutputFormat::Svg,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let catalog = match Catalog::from_file(&cli.catalog) {
        Ok(c) => c,
        Err(e) => {
            report_catalog_error(&e, &cli.catalog);
            std::process::exit(1);
        }
    };
    tracing::debug!(items = catalog.len(), "catalog loaded");

    if cli.list {
        for name in catalog.names() {
            let size = catalog.get(name).map(|r| r.size).unwrap_or(1);
            println!("{} ({}x{})", name, size, size);
        }
        return;
    }

    // Load stylesheet
    let stylesheet = match &cli.stylesheet {
        Some(path) => match Stylesheet::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Stylesheet::default(),
    };

    let config = RenderConfig::new()
        .with_stylesheet(stylesheet)
        .with_format(cli.format.into())
        .with_lint(cli.lint);

    let items: Vec<String> = if cli.items.is_empty() {
        catalog.names().map(str::to_string).collect()
    } else {
        cli.items.clone()
    };

    let mut failed = false;
    for name in &items {
        match render_with_lint(&catalog, name, &config) {
            Ok((output, warnings)) => {
                println!("{}", output);
                for warning in warnings {
                    eprintln!("lint: {}: {}", name, warning);
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        tracing_subscriber::EnvFilter::new("plot_layout=debug,warn")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Print a catalog error, with source context when the parser located it
fn report_catalog_error(err: &CatalogError, path: &Path) {
    let filename = path.display().to_string();
    match fs::read_to_string(path) {
        Ok(source) if err.span(&source).is_some() => eprint!("{}", err.format(&source, &filename)),
        _ => eprintln!("Error loading catalog '{}': {}", filename, err),
    }
}
