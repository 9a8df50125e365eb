//! `htmlayout-preview`: build a layout file and print what the builder made of it.
//!
//! ```text
//! htmlayout-preview layouts/dashboard.html
//! htmlayout-preview layouts/dashboard.html --format json --ids
//! htmlayout-preview page.html --config htmlayout.toml -vv
//! ```

mod logging;

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use htmlayout::{Child, Component, Layout, LayoutBuilder, LayoutConfig};

use crate::logging::{LoggingConfig, init_logging};

#[derive(Parser, Debug)]
#[command(name = "htmlayout-preview", version, about = "Build a layout file and print its component tree")]
struct Cli {
    /// Layout file path or file:// location
    source: String,

    /// TOML file with extra component libraries and builder options
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Tree)]
    format: OutputFormat,

    /// Keep the last element when an id is declared twice
    #[arg(long)]
    last_id_wins: bool,

    /// Also print the identifier index
    #[arg(long)]
    ids: bool,

    /// Log filter in env_logger syntax; overrides RUST_LOG
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Indented outline, one component per line
    Tree,
    /// Constructor expression
    Expr,
    /// Dash JSON
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        filter: cli.log.clone(),
        verbose: cli.verbose,
        ..Default::default()
    });

    let builder = make_builder(&cli)?;
    let layout = builder
        .load(cli.source.as_str())
        .with_context(|| format!("failed to build layout from {}", cli.source))?;

    let mut out = render(&layout, cli.format)?;
    if cli.ids {
        out.push('\n');
        write_ids(&layout, &mut out);
    }
    print!("{out}");
    Ok(())
}

fn make_builder(cli: &Cli) -> Result<LayoutBuilder> {
    let builder = match &cli.config {
        Some(path) => {
            let config = LayoutConfig::from_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            log::info!("{} extra libraries from {}", config.libraries.len(), path.display());
            LayoutBuilder::from_config(&config).context("invalid library in config")?
        }
        None => LayoutBuilder::new(),
    };
    Ok(if cli.last_id_wins {
        builder.duplicate_ids(htmlayout::DuplicateIds::LastWins)
    } else {
        builder
    })
}

// ── Output ────────────────────────────────────────────────────────────────

fn render(layout: &Layout, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Tree => {
            let mut out = String::new();
            write_outline(layout.root(), 0, &mut out);
            out
        }
        OutputFormat::Expr => format!("{}\n", layout.root()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&layout.to_json())?;
            json.push('\n');
            json
        }
    })
}

/// `Name #id key=value ...`, then the children indented by two spaces.
fn write_outline(component: &Component, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}{}", component.name());
    if let Some(id) = component.id() {
        let _ = write!(out, " #{id}");
    }
    for (key, value) in &component.props {
        if key != "id" {
            let _ = write!(out, " {key}={value}");
        }
    }
    out.push('\n');

    for child in component.children() {
        match child {
            Child::Text(text) => {
                let _ = writeln!(out, "{indent}  {text:?}");
            }
            Child::Component(c) => write_outline(c, depth + 1, out),
        }
    }
}

fn write_ids(layout: &Layout, out: &mut String) {
    if layout.is_empty() {
        out.push_str("no ids\n");
        return;
    }
    let width = layout.ids().map(str::len).max().unwrap_or(0);
    for (id, component) in layout.components() {
        let _ = writeln!(out, "{id:<width$}  {} at {}", component.ty, component.span);
    }
}
