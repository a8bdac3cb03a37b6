mod app;
mod config;
mod ranks;
mod util;
mod viz;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Args, VizConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "rankscope=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = VizConfig::from_args(&args)?;
    tracing::info!(path = %config.data_path.display(), "starting rankscope");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.window_width, args.window_height]),
        ..Default::default()
    };

    eframe::run_native(
        "rankscope",
        options,
        Box::new(move |cc| Ok(Box::new(app::RankScopeApp::new(cc, config)))),
    )
    .map_err(|error| anyhow::anyhow!("failed to run the viewer window: {error}"))
}
