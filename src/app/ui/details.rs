use eframe::egui::{self, Align, Layout, RichText, Sense, Ui, vec2};

use crate::util::{format_delta, format_rank, node_label};

use super::super::ViewModel;
use super::super::render_utils::rank_color32;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        let Some(selected_id) = self.selected else {
            ui.label("Select a node from the plot or the ranking.");
            return;
        };

        let Some(node) = self.controller.registry().node(selected_id).cloned() else {
            ui.label("Selected node no longer exists in this dataset.");
            return;
        };

        let history = self.controller.dataset().rank_history(selected_id);
        let current_iteration = self.controller.current_iteration();
        let position = self
            .ranking
            .iter()
            .position(|&id| id == selected_id)
            .map(|index| index + 1);

        ui.horizontal(|ui| {
            let (swatch, _) = ui.allocate_exact_size(vec2(14.0, 14.0), Sense::hover());
            ui.painter()
                .rect_filled(swatch, 3.0, rank_color32(node.color));
            ui.label(RichText::new(node_label(node.id)).strong());
        });
        ui.add_space(6.0);

        ui.label(format!("Rank at iteration {current_iteration}: {}", format_rank(node.rank)));
        if let Some(position) = position {
            ui.label(format!("Position: {position} of {}", self.ranking.len()));
        }
        ui.label(format!("Plot position: ({:.1}, {:.1})", node.x, node.y));

        if let (Some((first_iteration, first_rank)), Some((last_iteration, last_rank))) =
            (history.first(), history.last())
        {
            ui.label(format!(
                "Overall change {first_iteration} → {last_iteration}: {}",
                format_delta(last_rank - first_rank)
            ));
        }

        if ui.button("Clear selection").clicked() {
            self.set_selected(None);
            return;
        }

        ui.separator();
        ui.label(RichText::new("Rank history").strong());

        let row_count = history.len().min(self.history_rows_visible);
        let mut should_load_more = false;
        let mut jump_to = None;

        egui::ScrollArea::vertical()
            .id_salt("rank_history_scroll")
            .max_height(ui.available_height().max(200.0))
            .auto_shrink([false, false])
            .show_rows(ui, 20.0, row_count, |ui, row_range| {
                if row_range.end + Self::HISTORY_PREFETCH_MARGIN >= row_count {
                    should_load_more = true;
                }

                for index in row_range {
                    let Some(&(iteration, rank)) = history.get(index) else {
                        continue;
                    };
                    let delta = index
                        .checked_sub(1)
                        .and_then(|previous| history.get(previous))
                        .map(|&(_, previous_rank)| format_delta(rank - previous_rank))
                        .unwrap_or_default();

                    ui.horizontal(|ui| {
                        let text = format!("#{iteration}");
                        let label = if iteration == current_iteration {
                            RichText::new(text).strong()
                        } else {
                            RichText::new(text)
                        };
                        if ui.link(label).on_hover_text("Jump to this iteration").clicked() {
                            jump_to = Some(iteration);
                        }
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            ui.monospace(delta);
                            ui.monospace(format_rank(rank));
                        });
                    });
                }
            });

        if let Some(iteration) = jump_to {
            self.select_iteration(iteration);
        }

        if should_load_more && row_count < history.len() {
            self.history_rows_visible = (row_count + Self::HISTORY_PAGE_ROWS).min(history.len());
        }
    }
}
