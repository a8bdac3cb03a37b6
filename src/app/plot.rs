use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, vec2};

use crate::util::{format_rank, node_label};

use super::ViewModel;
use super::render_utils::{
    HOVERED, PlotTransform, SELECTED, circle_visible, draw_background, label_color, rank_color32,
};

impl ViewModel {
    pub(in crate::app) fn draw_plot(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);
        let canvas = vec2(
            self.config.canvas_width as f32,
            self.config.canvas_height as f32,
        );
        let transform = PlotTransform::fit(rect, canvas);

        draw_background(&painter, rect, transform, self.controller.mapper());

        let radius = (self.config.node_radius * transform.scale()).clamp(2.0, 40.0);
        let frames = self.animator.frames().collect::<Vec<_>>();
        let positions = frames
            .iter()
            .map(|frame| transform.to_screen(frame.x, frame.y))
            .collect::<Vec<_>>();

        self.hovered = Self::hovered_index(ui, rect, &positions, radius);
        if self.hovered.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::PointingHand);
        }
        if response.clicked_by(egui::PointerButton::Primary) {
            self.set_selected(self.hovered);
        }

        for (frame, &position) in frames.iter().zip(&positions) {
            if !circle_visible(rect, position, radius) {
                continue;
            }

            let is_selected = self.selected == Some(frame.id);
            let is_hovered = self.hovered == Some(frame.id);
            let stroke = if is_selected {
                Stroke::new(2.4, SELECTED)
            } else if is_hovered {
                Stroke::new(2.0, HOVERED)
            } else {
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190))
            };

            painter.circle(position, radius, rank_color32(frame.color), stroke);

            if is_selected || is_hovered || radius >= 14.0 {
                painter.text(
                    position,
                    Align2::CENTER_CENTER,
                    frame.id.to_string(),
                    FontId::proportional((radius * 0.9).clamp(9.0, 14.0)),
                    label_color(frame.color),
                );
            }
        }

        if let Some(id) = self.hovered
            && let Some(node) = self.controller.registry().node(id)
        {
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!(
                    "{}  |  rank {}  |  iteration {}",
                    node_label(node.id),
                    format_rank(node.rank),
                    self.controller.current_iteration()
                ),
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }
    }

    fn hovered_index(ui: &Ui, rect: Rect, positions: &[Pos2], radius: f32) -> Option<usize> {
        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .filter(|pointer| rect.contains(*pointer))?;
        positions
            .iter()
            .enumerate()
            .filter_map(|(index, position)| {
                let distance = position.distance(pointer);
                (distance <= radius).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}
