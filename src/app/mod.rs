use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use tracing::{error, info};

use crate::config::VizConfig;
use crate::ranks::{Dataset, load_dataset_file};
use crate::viz::{NodeAnimator, Playback, TransitionController};

mod plot;
mod render_utils;
mod ui;
mod view;

type LoadResult = Result<Dataset, String>;

pub struct RankScopeApp {
    config: VizConfig,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

/// Session state for one loaded dataset: the core controller plus what the UI tracks.
struct ViewModel {
    config: VizConfig,
    controller: TransitionController,
    animator: NodeAnimator,
    playback: Playback,
    slider_iteration: u64,
    snap_to_recorded: bool,
    transition_ms: u64,
    selected: Option<usize>,
    hovered: Option<usize>,
    ranking: Vec<usize>,
    ranking_rows_visible: usize,
    history_rows_visible: usize,
    last_error: Option<String>,
    fatal_error: Option<String>,
}

impl RankScopeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: VizConfig) -> Self {
        let state = Self::start_load(&config);
        Self {
            config,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(config: &VizConfig) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();
        let path = config.data_path.clone();

        thread::spawn(move || {
            let result = load_dataset_file(&path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(config: &VizConfig) -> AppState {
        info!(path = %config.data_path.display(), "loading rank dataset");
        AppState::Loading {
            rx: Self::spawn_load(config),
        }
    }

    fn ready_state(&self, result: LoadResult) -> AppState {
        let view = result.and_then(|dataset| {
            ViewModel::new(dataset, self.config.clone()).map_err(|error| error.to_string())
        });

        match view {
            Ok(view) => AppState::Ready(Box::new(view)),
            Err(message) => {
                error!(%message, "rank dataset could not be shown");
                AppState::Error(message)
            }
        }
    }
}

impl eframe::App for RankScopeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => transition = Some(result),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(Err("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading rank dataset...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(message) => {
                let mut retry = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load rank dataset");
                    ui.add_space(6.0);
                    ui.label(self.config.data_path.display().to_string());
                    ui.label(message.as_str());
                    ui.add_space(10.0);
                    retry = ui.button("Retry").clicked();
                });
                if retry {
                    self.state = Self::start_load(&self.config);
                    return;
                }
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &mut reload_requested, is_reloading);

                if let Some(message) = model.fatal_error.take() {
                    error!(%message, "visualization session aborted");
                    self.reload_rx = None;
                    self.state = AppState::Error(message);
                    return;
                }

                if reload_requested && self.reload_rx.is_none() {
                    info!(path = %self.config.data_path.display(), "reloading rank dataset");
                    self.reload_rx = Some(Self::spawn_load(&self.config));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => transition = Some(result),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(Err("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(result) = transition {
            self.reload_rx = None;
            self.state = self.ready_state(result);
        }
    }
}
