use eframe::egui::{self, Align, Layout, RichText, Ui};

use crate::util::{format_rank, node_label};
use crate::viz::{PlaybackSpeed, PlaybackState};

use super::super::ViewModel;

const MAX_TRANSITION_MS: u64 = 3000;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Iteration");
        ui.separator();
        ui.add_space(4.0);

        self.draw_iteration_slider(ui);
        ui.add_space(6.0);
        self.draw_step_buttons(ui);

        ui.separator();
        self.draw_playback_controls(ui);

        ui.separator();
        let duration_slider = ui
            .add(
                egui::Slider::new(&mut self.transition_ms, 0..=MAX_TRANSITION_MS)
                    .step_by(50.0)
                    .suffix(" ms")
                    .text("Transition"),
            )
            .on_hover_text("Animation time between two iterations.");
        if duration_slider.changed() {
            self.apply_transition_duration();
        }

        ui.add_space(8.0);
        egui::CollapsingHeader::new(format!(
            "Ranking at iteration {}",
            self.controller.current_iteration()
        ))
        .default_open(true)
        .show(ui, |ui| self.draw_ranking(ui));
    }

    fn draw_iteration_slider(&mut self, ui: &mut Ui) {
        let (first, last) = self.controller.dataset().iteration_range();
        let slider = ui
            .add_enabled(
                first < last,
                egui::Slider::new(&mut self.slider_iteration, first..=last)
                    .step_by(1.0)
                    .text("iteration"),
            )
            .on_hover_text("Drag to scrub through the recorded iterations.");

        if slider.changed() {
            let requested = self.slider_iteration;
            let target = if self.snap_to_recorded {
                self.controller.dataset().nearest_iteration(requested)
            } else {
                requested
            };
            self.slider_iteration = target;
            self.select_iteration(target);
        }

        ui.checkbox(&mut self.snap_to_recorded, "Snap to recorded iterations")
            .on_hover_text("Iterations need not be contiguous; snap picks the nearest recorded one.");
    }

    fn draw_step_buttons(&mut self, ui: &mut Ui) {
        let (first, last) = self.controller.dataset().iteration_range();
        let previous = self.neighbor_iteration(false);
        let next = self.neighbor_iteration(true);
        let current = self.controller.current_iteration();

        ui.horizontal(|ui| {
            if ui
                .add_enabled(current != first, egui::Button::new("First"))
                .clicked()
            {
                self.select_iteration(first);
            }
            if ui
                .add_enabled(previous.is_some(), egui::Button::new("Prev"))
                .on_hover_text("Left arrow")
                .clicked()
                && let Some(iteration) = previous
            {
                self.select_iteration(iteration);
            }
            if ui
                .add_enabled(next.is_some(), egui::Button::new("Next"))
                .on_hover_text("Right arrow")
                .clicked()
                && let Some(iteration) = next
            {
                self.select_iteration(iteration);
            }
            if ui
                .add_enabled(current != last, egui::Button::new("Last"))
                .clicked()
            {
                self.select_iteration(last);
            }
        });
    }

    fn draw_playback_controls(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Playback").strong());

        ui.horizontal(|ui| {
            let label = if self.playback.is_playing() {
                "Pause"
            } else {
                "Play"
            };
            if ui.button(label).on_hover_text("Space").clicked() {
                self.toggle_playback();
            }
            if ui.button("Stop").clicked()
                && let Some(iteration) = self.playback.stop()
            {
                self.select_iteration(iteration);
            }

            if ui.button("⏴").on_hover_text("Step back").clicked()
                && let Some(iteration) = self.playback.step_backward()
            {
                self.select_iteration(iteration);
            }
            if ui.button("⏵").on_hover_text("Step forward").clicked()
                && let Some(iteration) = self.playback.step_forward()
            {
                self.select_iteration(iteration);
            }

            let mut loop_enabled = self.playback.loop_enabled();
            if ui.checkbox(&mut loop_enabled, "Loop").changed() {
                self.playback.set_loop(loop_enabled);
            }
        });

        ui.horizontal_wrapped(|ui| {
            let mut speed = self.playback.speed();
            for option in PlaybackSpeed::ALL {
                ui.selectable_value(&mut speed, option, option.label());
            }
            if speed != self.playback.speed() {
                self.playback.set_speed(speed);
            }
        });

        let status = match self.playback.state() {
            PlaybackState::Stopped => "stopped",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Finished => "finished",
        };
        ui.add(
            egui::ProgressBar::new(self.playback.progress() as f32)
                .text(status)
                .desired_height(14.0),
        );
    }

    fn draw_ranking(&mut self, ui: &mut Ui) {
        let row_count = self.ranking.len().min(self.ranking_rows_visible);
        let mut should_load_more = false;
        let mut selected_id = None;

        egui::ScrollArea::vertical()
            .id_salt("ranking_scroll")
            .max_height(ui.available_height().max(180.0))
            .auto_shrink([false, false])
            .show_rows(ui, 22.0, row_count, |ui, row_range| {
                if row_range.end + Self::RANKING_PREFETCH_MARGIN >= row_count {
                    should_load_more = true;
                }

                for position in row_range {
                    let Some(&id) = self.ranking.get(position) else {
                        continue;
                    };
                    let Some(node) = self.controller.registry().node(id) else {
                        continue;
                    };

                    let is_selected = self.selected == Some(id);
                    let clicked = ui
                        .horizontal(|ui| {
                            ui.label(format!("{:>3}.", position + 1));
                            let clicked = ui.selectable_label(is_selected, node_label(id)).clicked();
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                ui.monospace(format_rank(node.rank));
                            });
                            clicked
                        })
                        .inner;

                    if clicked {
                        selected_id = Some(id);
                    }
                }
            });

        if let Some(id) = selected_id {
            self.set_selected(Some(id));
        }

        if should_load_more && row_count < self.ranking.len() {
            self.ranking_rows_visible =
                (row_count + Self::RANKING_PAGE_ROWS).min(self.ranking.len());
        }
    }
}
