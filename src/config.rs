use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;

use crate::viz::{DEFAULT_TRANSITION, PlotBounds};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// JSON file holding `[{ "iteration": n, "ranks": [...] }, ...]`
    #[arg(value_name = "DATASET", default_value = "data/traffic.json")]
    pub data: PathBuf,

    /// Plot canvas width in pixels
    #[arg(long, default_value_t = 800.0)]
    pub width: f64,

    /// Plot canvas height in pixels
    #[arg(long, default_value_t = 600.0)]
    pub height: f64,

    /// Blank border kept around the plotted nodes
    #[arg(long, default_value_t = 50.0)]
    pub margin: f64,

    #[arg(long, default_value_t = 10.0)]
    pub node_radius: f32,

    /// Duration of the animation between two iterations
    #[arg(long, default_value_t = DEFAULT_TRANSITION.as_millis() as u64)]
    pub transition_ms: u64,

    /// Delay between iterations while auto-playing at 1× speed
    #[arg(long, default_value_t = 700)]
    pub playback_interval_ms: u64,

    #[arg(long, default_value_t = 1280.0)]
    pub window_width: f32,

    #[arg(long, default_value_t = 820.0)]
    pub window_height: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VizConfig {
    pub data_path: PathBuf,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub bounds: PlotBounds,
    pub node_radius: f32,
    pub transition: Duration,
    pub playback_interval: Duration,
}

impl VizConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        if !(args.width > 0.0 && args.height > 0.0) {
            bail!(
                "canvas size must be positive, got {}x{}",
                args.width,
                args.height
            );
        }
        if !(args.margin >= 0.0) {
            bail!("margin must not be negative, got {}", args.margin);
        }
        if args.margin * 2.0 >= args.width || args.margin * 2.0 >= args.height {
            bail!(
                "margin {} leaves no drawable area on a {}x{} canvas",
                args.margin,
                args.width,
                args.height
            );
        }
        if !(args.node_radius > 0.0) {
            bail!("node radius must be positive, got {}", args.node_radius);
        }
        if args.playback_interval_ms == 0 {
            bail!("playback interval must be at least 1 ms");
        }

        Ok(Self {
            data_path: args.data.clone(),
            canvas_width: args.width,
            canvas_height: args.height,
            bounds: PlotBounds::from_canvas(args.width, args.height, args.margin),
            node_radius: args.node_radius,
            transition: Duration::from_millis(args.transition_ms),
            playback_interval: Duration::from_millis(args.playback_interval_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["rankscope"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).expect("arguments parse")
    }

    #[test]
    fn defaults_describe_an_800_by_600_canvas() {
        let config = VizConfig::from_args(&parse(&[])).expect("defaults are valid");
        assert_eq!(config.data_path, PathBuf::from("data/traffic.json"));
        assert_eq!(config.bounds, PlotBounds::from_canvas(800.0, 600.0, 50.0));
        assert_eq!(config.bounds.x_max, 750.0);
        assert_eq!(config.bounds.y_max, 550.0);
        assert_eq!(config.transition, Duration::from_millis(500));
    }

    #[test]
    fn accepts_overrides() {
        let config = VizConfig::from_args(&parse(&[
            "ranks.json",
            "--width",
            "400",
            "--margin",
            "10",
            "--transition-ms",
            "120",
        ]))
        .expect("valid overrides");
        assert_eq!(config.data_path, PathBuf::from("ranks.json"));
        assert_eq!(config.bounds.x_max, 390.0);
        assert_eq!(config.transition, Duration::from_millis(120));
    }

    #[test]
    fn rejects_margin_that_consumes_the_canvas() {
        let error = VizConfig::from_args(&parse(&["--height", "80", "--margin", "40"]))
            .expect_err("no drawable area");
        assert!(error.to_string().contains("no drawable area"));
    }

    #[test]
    fn rejects_non_positive_sizes() {
        assert!(VizConfig::from_args(&parse(&["--width", "0"])).is_err());
        assert!(VizConfig::from_args(&parse(&["--node-radius", "0"])).is_err());
        assert!(VizConfig::from_args(&parse(&["--playback-interval-ms", "0"])).is_err());
    }
}
