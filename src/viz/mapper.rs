//! Pure mapping from node index and rank to plot position and color.
//!
//! Ranks are clamped into `[0, 1]` here rather than trusting the renderer to do it, so
//! unnormalized upstream data still lands inside the plot bounds.

use crate::util::{clamp_unit, lerp};

/// Sequential light-to-dark blue ramp. Each channel is non-increasing along the ramp.
const BLUES: [[u8; 3]; 9] = [
    [0xf7, 0xfb, 0xff],
    [0xde, 0xeb, 0xf7],
    [0xc6, 0xdb, 0xef],
    [0x9e, 0xca, 0xe1],
    [0x6b, 0xae, 0xd6],
    [0x42, 0x92, 0xc6],
    [0x21, 0x71, 0xb5],
    [0x08, 0x51, 0x9c],
    [0x08, 0x30, 0x6b],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RankColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RankColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise interpolation; `t` is not clamped.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let channel = |a: u8, b: u8| lerp(a as f64, b as f64, t).round().clamp(0.0, 255.0) as u8;
        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }

    /// Relative luminance in `[0, 1]`, used to pick readable label colors.
    pub fn luminance(self) -> f64 {
        (0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64) / 255.0
    }
}

/// Visual state of one node as handed to the rendering layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeFrame {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub color: RankColor,
}

/// Pixel extents of the drawable plot area. `y_min` is the top edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PlotBounds {
    pub fn from_canvas(width: f64, height: f64, margin: f64) -> Self {
        Self {
            x_min: margin,
            x_max: width - margin,
            y_min: margin,
            y_max: height - margin,
        }
    }

    pub fn mid_x(&self) -> f64 {
        lerp(self.x_min, self.x_max, 0.5)
    }
}

#[derive(Clone, Debug)]
pub struct CoordinateMapper {
    bounds: PlotBounds,
    node_count: usize,
}

impl CoordinateMapper {
    pub fn new(bounds: PlotBounds, node_count: usize) -> Self {
        Self { bounds, node_count }
    }

    pub fn bounds(&self) -> PlotBounds {
        self.bounds
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn map_position(&self, index: usize, rank: f64) -> (f64, f64) {
        let x = if self.node_count > 1 {
            let t = index as f64 / (self.node_count - 1) as f64;
            lerp(self.bounds.x_min, self.bounds.x_max, t)
        } else {
            self.bounds.mid_x()
        };
        (x, self.map_y(rank))
    }

    /// Inverted vertical axis: rank 1 sits on the top edge, rank 0 on the bottom edge.
    pub fn map_y(&self, rank: f64) -> f64 {
        lerp(self.bounds.y_max, self.bounds.y_min, clamp_unit(rank))
    }

    pub fn map_color(&self, rank: f64) -> RankColor {
        blues(clamp_unit(rank))
    }

    pub fn map_node(&self, index: usize, rank: f64) -> NodeFrame {
        let (x, y) = self.map_position(index, rank);
        NodeFrame {
            id: index,
            x,
            y,
            color: self.map_color(rank),
        }
    }
}

fn blues(t: f64) -> RankColor {
    let segments = (BLUES.len() - 1) as f64;
    let scaled = t * segments;
    let index = (scaled.floor() as usize).min(BLUES.len() - 2);
    let local = scaled - index as f64;

    let [r0, g0, b0] = BLUES[index];
    let [r1, g1, b1] = BLUES[index + 1];
    RankColor::rgb(r0, g0, b0).lerp(RankColor::rgb(r1, g1, b1), local)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper(node_count: usize) -> CoordinateMapper {
        CoordinateMapper::new(PlotBounds::from_canvas(800.0, 600.0, 50.0), node_count)
    }

    #[test]
    fn spaces_nodes_evenly_across_width() {
        let mapper = mapper(5);
        let xs = (0..5)
            .map(|index| mapper.map_position(index, 0.5).0)
            .collect::<Vec<_>>();
        assert_eq!(xs, vec![50.0, 225.0, 400.0, 575.0, 750.0]);
    }

    #[test]
    fn single_node_sits_at_horizontal_midpoint() {
        assert_eq!(mapper(1).map_position(0, 0.3).0, 400.0);
    }

    #[test]
    fn higher_rank_never_moves_down() {
        let mapper = mapper(3);
        let mut previous_y = f64::INFINITY;
        for step in 0..=100 {
            let rank = step as f64 / 100.0;
            let (_, y) = mapper.map_position(1, rank);
            assert!(y <= previous_y, "y increased at rank {rank}");
            previous_y = y;
        }
        assert_eq!(mapper.map_position(1, 1.0).1, 50.0);
        assert_eq!(mapper.map_position(1, 0.0).1, 550.0);
    }

    #[test]
    fn out_of_range_ranks_are_clamped() {
        let mapper = mapper(4);
        for index in 0..4 {
            assert_eq!(mapper.map_position(index, 1.5), mapper.map_position(index, 1.0));
            assert_eq!(mapper.map_position(index, -0.2), mapper.map_position(index, 0.0));
        }
        assert_eq!(mapper.map_color(7.0), mapper.map_color(1.0));
        assert_eq!(mapper.map_color(-3.0), mapper.map_color(0.0));
    }

    #[test]
    fn color_darkens_monotonically_with_rank() {
        let mapper = mapper(2);
        let mut previous = mapper.map_color(0.0);
        for step in 1..=200 {
            let color = mapper.map_color(step as f64 / 200.0);
            assert!(color.r <= previous.r && color.g <= previous.g && color.b <= previous.b);
            assert!(color.luminance() <= previous.luminance());
            previous = color;
        }
    }

    #[test]
    fn color_scale_endpoints() {
        let mapper = mapper(2);
        assert_eq!(mapper.map_color(0.0), RankColor::rgb(0xf7, 0xfb, 0xff));
        assert_eq!(mapper.map_color(1.0), RankColor::rgb(0x08, 0x30, 0x6b));
        assert_eq!(mapper.map_color(0.5), RankColor::rgb(0x6b, 0xae, 0xd6));
    }

    #[test]
    fn mapping_is_deterministic() {
        let a = mapper(7);
        let b = mapper(7);
        for index in 0..7 {
            let rank = index as f64 / 9.0;
            assert_eq!(a.map_node(index, rank), b.map_node(index, rank));
            assert_eq!(a.map_node(index, rank), a.map_node(index, rank));
        }
    }
}
