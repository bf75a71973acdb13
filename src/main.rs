//! Chartify FX - Function Plotter
//!
//! Type a function of x, pick a range, see the curve and export it as PNG.

use anyhow::{Context, Result};
use chartify_fx::charts::{Scene, StaticChartRenderer};
use chartify_fx::config::PlotConfig;
use chartify_fx::data::Sampler;
use chartify_fx::gui::PlotterApp;
use chartify_fx::state::{DEFAULT_EXPRESSION, DEFAULT_X_MAX, DEFAULT_X_MIN};
use clap::Parser;
use eframe::egui;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "chartify_fx")]
#[command(about = "Plot a single-variable function", long_about = None)]
struct Args {
    /// Function of x to plot
    #[arg(long = "expr", default_value = DEFAULT_EXPRESSION)]
    expression: String,

    /// Lower bound of the x range
    #[arg(long, default_value_t = DEFAULT_X_MIN, allow_negative_numbers = true)]
    x_min: f64,

    /// Upper bound of the x range
    #[arg(long, default_value_t = DEFAULT_X_MAX, allow_negative_numbers = true)]
    x_max: f64,

    /// JSON plot configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render to this PNG file and exit instead of opening a window
    #[arg(long)]
    export: Option<PathBuf>,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

fn init_logging(log: Option<&Path>) -> Result<()> {
    match log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(Level::DEBUG)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        None => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
                )
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

fn export(args: &Args, config: &PlotConfig, path: &Path) -> Result<()> {
    let data = Sampler::plot(&args.expression, args.x_min, args.x_max, config)?;
    let scene = Scene::build(&data, config);
    StaticChartRenderer::save_png(&scene, path)
        .with_context(|| format!("Failed to export {}", path.display()))?;
    println!(
        "Exported {} points of f(x) = {} to {}",
        data.points.len(),
        data.expression,
        path.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_deref())?;
    tracing::info!("Starting Chartify FX");

    let config = match &args.config {
        Some(path) => PlotConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PlotConfig::default(),
    };

    if let Some(path) = &args.export {
        return export(&args, &config, path);
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1300.0, 800.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Chartify FX"),
        ..Default::default()
    };

    // Run the application
    let Args {
        expression,
        x_min,
        x_max,
        ..
    } = args;
    eframe::run_native(
        "Chartify FX",
        options,
        Box::new(move |cc| {
            Ok(Box::new(PlotterApp::new(
                cc, config, &expression, x_min, x_max,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))
}
