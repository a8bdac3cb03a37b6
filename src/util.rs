pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Clamps into `[0, 1]`; NaN collapses to 0 so it never leaves the canvas.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

pub fn format_rank(rank: f64) -> String {
    format!("{rank:.4}")
}

pub fn format_delta(delta: f64) -> String {
    if delta.abs() < 5e-5 {
        "±0".to_owned()
    } else {
        format!("{delta:+.4}")
    }
}

pub fn node_label(id: usize) -> String {
    format!("node {id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_unit_handles_out_of_range_and_nan() {
        assert_eq!(clamp_unit(1.5), 1.0);
        assert_eq!(clamp_unit(-0.2), 0.0);
        assert_eq!(clamp_unit(0.25), 0.25);
        assert_eq!(clamp_unit(f64::NAN), 0.0);
    }

    #[test]
    fn lerp_hits_endpoints() {
        assert_eq!(lerp(50.0, 750.0, 0.0), 50.0);
        assert_eq!(lerp(50.0, 750.0, 1.0), 750.0);
        assert_eq!(lerp(550.0, 50.0, 0.5), 300.0);
    }

    #[test]
    fn formats_ranks_and_deltas() {
        assert_eq!(format_rank(0.2), "0.2000");
        assert_eq!(format_delta(0.3), "+0.3000");
        assert_eq!(format_delta(-0.05), "-0.0500");
        assert_eq!(format_delta(0.00001), "±0");
        assert_eq!(node_label(4), "node 4");
    }
}
