use std::path::PathBuf;

use anyhow::{anyhow, Context};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;
use resume_core::{layout_timeline, render_markup, LayoutConfig, MonospaceMeasure};
use resume_data::parse_entries_str;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "resume-cli",
    about = "Render a resume entry feed to a static SVG timeline or HTML list."
)]
struct Args {
    /// Path to the JSON entry feed.
    #[arg(short, long)]
    input: PathBuf,

    /// Viewport width in pixels; below the breakpoint the list view is used.
    #[arg(short, long, default_value_t = 1024)]
    viewport: u32,

    /// Render timestamp for ongoing entries (YYYY-MM-DD or RFC 3339). Defaults to now.
    #[arg(long)]
    now: Option<String>,

    /// Layout config as JSON; missing fields keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the markup. Prints to stdout when absent.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let data = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Could not read file {:?}", args.input))?;
    let entries = parse_entries_str(&data)?;

    let config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read config {path:?}"))?;
            serde_json::from_str::<LayoutConfig>(&raw)
                .with_context(|| format!("Invalid config {path:?}"))?
        }
        None => LayoutConfig::default(),
    };

    let now = match &args.now {
        Some(text) => parse_now(text)?,
        None => Utc::now(),
    };

    let view = layout_timeline(
        &entries,
        args.viewport,
        now,
        &config,
        &MonospaceMeasure::default(),
    )?;
    let markup = render_markup(&view, &config);

    match &args.output {
        Some(path) => {
            std::fs::write(path, &markup)
                .with_context(|| format!("Could not write {path:?}"))?;
            info!(mode = ?view.mode(), entries = entries.len(), output = ?path, "timeline written");
        }
        None => println!("{markup}"),
    }

    Ok(())
}

fn parse_now(text: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| anyhow!("Invalid --now value {text:?}"))
}
