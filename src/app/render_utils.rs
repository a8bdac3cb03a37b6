use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2, pos2, vec2};

use crate::viz::{CoordinateMapper, RankColor};

pub(super) const BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);
pub(super) const SELECTED: Color32 = Color32::from_rgb(245, 206, 93);
pub(super) const HOVERED: Color32 = Color32::from_rgb(255, 164, 101);

pub(super) fn rank_color32(color: RankColor) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

/// Uniform scale that fits the plot canvas into a screen rect, centered.
#[derive(Clone, Copy, Debug)]
pub(super) struct PlotTransform {
    origin: Pos2,
    scale: f32,
}

impl PlotTransform {
    pub(super) fn fit(rect: Rect, canvas: Vec2) -> Self {
        let scale = (rect.width() / canvas.x)
            .min(rect.height() / canvas.y)
            .max(0.05);
        let origin = rect.center() - (canvas * scale) * 0.5;
        Self { origin, scale }
    }

    pub(super) fn to_screen(self, x: f64, y: f64) -> Pos2 {
        self.origin + vec2(x as f32, y as f32) * self.scale
    }

    pub(super) fn scale(self) -> f32 {
        self.scale
    }
}

pub(super) fn draw_background(
    painter: &Painter,
    rect: Rect,
    transform: PlotTransform,
    mapper: &CoordinateMapper,
) {
    painter.rect_filled(rect, 0.0, BACKGROUND);

    let bounds = mapper.bounds();
    let guide = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 110));
    let left = transform.to_screen(bounds.x_min, 0.0).x;
    let right = transform.to_screen(bounds.x_max, 0.0).x;

    for rank in [0.0, 0.25, 0.5, 0.75, 1.0] {
        let y = transform.to_screen(0.0, mapper.map_y(rank)).y;
        painter.line_segment([pos2(left, y), pos2(right, y)], guide);
        painter.text(
            pos2(left - 8.0, y),
            Align2::RIGHT_CENTER,
            format!("{rank:.2}"),
            FontId::monospace(11.0),
            Color32::from_gray(150),
        );
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

/// Dark text on light fills, light text on dark fills.
pub(super) fn label_color(fill: RankColor) -> Color32 {
    if fill.luminance() > 0.55 {
        Color32::from_gray(20)
    } else {
        Color32::from_gray(238)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_preserves_aspect_and_centers_canvas() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(1600.0, 600.0));
        let transform = PlotTransform::fit(rect, vec2(800.0, 600.0));
        assert_eq!(transform.scale(), 1.0);
        assert_eq!(transform.to_screen(0.0, 0.0), pos2(400.0, 0.0));
        assert_eq!(transform.to_screen(800.0, 600.0), pos2(1200.0, 600.0));
    }

    #[test]
    fn visibility_accounts_for_radius() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        assert!(circle_visible(rect, pos2(-5.0, 50.0), 10.0));
        assert!(!circle_visible(rect, pos2(-15.0, 50.0), 10.0));
    }

    #[test]
    fn label_contrasts_with_fill() {
        assert_eq!(
            label_color(RankColor::rgb(0xf7, 0xfb, 0xff)),
            Color32::from_gray(20)
        );
        assert_eq!(
            label_color(RankColor::rgb(0x08, 0x30, 0x6b)),
            Color32::from_gray(238)
        );
    }
}
