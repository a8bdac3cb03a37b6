use std::time::Duration;

use eframe::egui::{self, Align, Color32, Context, Key, Layout, RichText};
use tracing::{debug, error};

use crate::config::VizConfig;
use crate::ranks::{Dataset, Result, VisError};
use crate::util::format_rank;
use crate::viz::{NodeAnimator, Playback, TransitionController};

use super::ViewModel;

impl ViewModel {
    pub(in crate::app) const INITIAL_RANKING_ROWS: usize = 40;
    pub(in crate::app) const RANKING_PAGE_ROWS: usize = 40;
    pub(in crate::app) const RANKING_PREFETCH_MARGIN: usize = 4;
    pub(in crate::app) const INITIAL_HISTORY_ROWS: usize = 40;
    pub(in crate::app) const HISTORY_PAGE_ROWS: usize = 40;
    pub(in crate::app) const HISTORY_PREFETCH_MARGIN: usize = 4;

    pub(in crate::app) fn new(dataset: Dataset, config: VizConfig) -> Result<Self> {
        let playback = Playback::new(dataset.iterations(), config.playback_interval);
        let controller = TransitionController::new(dataset, config.bounds, config.transition)?;
        let animator = NodeAnimator::new(controller.frames());
        let slider_iteration = controller.current_iteration();
        let transition_ms = controller.duration().as_millis() as u64;

        let mut view = Self {
            config,
            controller,
            animator,
            playback,
            slider_iteration,
            snap_to_recorded: true,
            transition_ms,
            selected: None,
            hovered: None,
            ranking: Vec::new(),
            ranking_rows_visible: Self::INITIAL_RANKING_ROWS,
            history_rows_visible: Self::INITIAL_HISTORY_ROWS,
            last_error: None,
            fatal_error: None,
        };
        view.refresh_ranking();
        Ok(view)
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        reload_requested: &mut bool,
        is_reloading: bool,
    ) {
        let (now, delta_seconds) = ctx.input(|input| (input.time, input.stable_dt as f64));
        self.animator.set_time(now);

        if let Some(iteration) = self.playback.tick(delta_seconds) {
            self.select_iteration(iteration);
        }
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("rankscope");
                    ui.separator();
                    ui.label(format!("data: {}", self.config.data_path.display()));
                    let dataset = self.controller.dataset();
                    let (first, last) = dataset.iteration_range();
                    ui.label(format!("nodes: {}", dataset.node_count()));
                    ui.label(format!("snapshots: {}", dataset.snapshot_count()));
                    ui.label(format!("iterations: {first}..={last}"));
                    ui.label(
                        RichText::new(format!(
                            "iteration {}",
                            self.controller.current_iteration()
                        ))
                        .strong(),
                    );
                    if let Some(delta) = self.current_max_delta() {
                        ui.label(format!("max Δ {}", format_rank(delta)))
                            .on_hover_text("Largest rank change from the previous snapshot.");
                    }

                    let reload_button =
                        ui.add_enabled(!is_reloading, egui::Button::new("Reload data"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(message) = &self.last_error {
                            ui.colored_label(Color32::from_rgb(240, 120, 110), message);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_plot(ui));

        if self.animator.is_animating() || self.playback.is_playing() {
            ctx.request_repaint();
        }
    }

    /// Single entry point for iteration-selection signals from the slider, buttons,
    /// shortcuts and playback.
    pub(in crate::app) fn select_iteration(&mut self, iteration: u64) {
        let (first, last) = self.controller.dataset().iteration_range();
        if iteration < first || iteration > last {
            self.last_error = Some(format!(
                "iteration {iteration} is outside {first}..={last}"
            ));
            return;
        }

        match self.controller.transition_to(iteration, &mut self.animator) {
            Ok(()) => {
                self.slider_iteration = iteration;
                self.playback.seek(iteration);
                self.last_error = None;
                self.refresh_ranking();
            }
            Err(error @ VisError::UnknownIteration(_)) => {
                self.last_error = Some(error.to_string());
            }
            Err(error) => {
                error!(%error, "transition failed");
                self.fatal_error = Some(error.to_string());
            }
        }
    }

    pub(in crate::app) fn neighbor_iteration(&self, forward: bool) -> Option<u64> {
        let dataset = self.controller.dataset();
        let position = dataset.position_of(self.controller.current_iteration())?;
        let target = if forward {
            position.checked_add(1)?
        } else {
            position.checked_sub(1)?
        };
        dataset.snapshots().get(target).map(|snapshot| snapshot.iteration)
    }

    pub(in crate::app) fn apply_transition_duration(&mut self) {
        self.controller
            .set_duration(Duration::from_millis(self.transition_ms));
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<usize>) {
        if self.selected == selected {
            return;
        }
        debug!(?selected, "node selection changed");
        self.selected = selected;
        self.history_rows_visible = Self::INITIAL_HISTORY_ROWS;
    }

    pub(in crate::app) fn current_max_delta(&self) -> Option<f64> {
        self.controller
            .dataset()
            .max_delta(self.controller.current_iteration())
            .ok()
            .flatten()
    }

    /// Node ids ordered by current rank, highest first; ties keep index order.
    fn refresh_ranking(&mut self) {
        let nodes = self.controller.registry().current_nodes();
        self.ranking.clear();
        self.ranking.extend(0..nodes.len());
        self.ranking
            .sort_by(|a, b| nodes[*b].rank.total_cmp(&nodes[*a].rank));
    }

    fn handle_shortcuts(&mut self, ctx: &Context) {
        if ctx.memory(|memory| memory.focused().is_some()) {
            return;
        }

        let (next, previous, toggle) = ctx.input(|input| {
            (
                input.key_pressed(Key::ArrowRight),
                input.key_pressed(Key::ArrowLeft),
                input.key_pressed(Key::Space),
            )
        });

        if next && let Some(iteration) = self.neighbor_iteration(true) {
            self.select_iteration(iteration);
        }
        if previous && let Some(iteration) = self.neighbor_iteration(false) {
            self.select_iteration(iteration);
        }
        if toggle {
            self.toggle_playback();
        }
    }

    pub(in crate::app) fn toggle_playback(&mut self) {
        if self.playback.is_playing() {
            self.playback.pause();
        } else if let Some(iteration) = self.playback.play() {
            self.select_iteration(iteration);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;

    use super::*;
    use crate::viz::PlotBounds;

    fn config() -> VizConfig {
        VizConfig {
            data_path: PathBuf::from("ranks.json"),
            canvas_width: 800.0,
            canvas_height: 600.0,
            bounds: PlotBounds::from_canvas(800.0, 600.0, 50.0),
            node_radius: 10.0,
            transition: Duration::from_millis(500),
            playback_interval: Duration::from_millis(700),
        }
    }

    fn view() -> ViewModel {
        let dataset = Dataset::load(&json!([
            {"iteration": 0, "ranks": [0.2, 0.8, 0.5]},
            {"iteration": 2, "ranks": [0.6, 0.3, 0.5]},
            {"iteration": 4, "ranks": [0.7, 0.2, 0.5]},
        ]))
        .expect("valid dataset");
        ViewModel::new(dataset, config()).expect("view builds")
    }

    #[test]
    fn ranking_orders_nodes_by_current_rank() {
        let mut view = view();
        assert_eq!(view.ranking, vec![1, 2, 0]);
        view.select_iteration(2);
        assert_eq!(view.ranking, vec![0, 2, 1]);
    }

    #[test]
    fn unknown_iteration_is_reported_not_applied() {
        let mut view = view();
        view.select_iteration(3);
        assert_eq!(view.controller.current_iteration(), 0);
        assert_eq!(
            view.last_error.as_deref(),
            Some("iteration 3 is not present in the dataset")
        );
        assert!(view.fatal_error.is_none());

        view.select_iteration(4);
        assert!(view.last_error.is_none());
        assert_eq!(view.slider_iteration, 4);
    }

    #[test]
    fn out_of_range_selection_is_rejected_before_transition() {
        let mut view = view();
        view.select_iteration(9);
        assert_eq!(view.controller.current_iteration(), 0);
        assert!(
            view.last_error
                .as_deref()
                .is_some_and(|message| message.contains("outside 0..=4"))
        );
    }

    #[test]
    fn neighbors_follow_recorded_iterations() {
        let mut view = view();
        assert_eq!(view.neighbor_iteration(false), None);
        assert_eq!(view.neighbor_iteration(true), Some(2));
        view.select_iteration(4);
        assert_eq!(view.neighbor_iteration(true), None);
        assert_eq!(view.neighbor_iteration(false), Some(2));
    }

    #[test]
    fn playback_selection_keeps_cursor_in_sync() {
        let mut view = view();
        view.select_iteration(2);
        assert_eq!(view.playback.current(), Some(2));
        view.toggle_playback();
        assert!(view.playback.is_playing());
        view.toggle_playback();
        assert!(!view.playback.is_playing());
    }

    #[test]
    fn duration_changes_reach_controller() {
        let mut view = view();
        view.transition_ms = 1200;
        view.apply_transition_duration();
        assert_eq!(view.controller.duration(), Duration::from_millis(1200));
    }
}
