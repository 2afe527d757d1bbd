//! Per-feature marker styling: hypocenter depth picks the color, magnitude
//! picks the radius.

use egui::{Color32, Stroke};

const FILL_OPACITY: f32 = 0.5;
const STROKE_OPACITY: f32 = 0.5;
const STROKE_WIDTH: f32 = 0.5;

/// Marker colors keyed by the depth (km) above which they apply. Checked in
/// order, deepest bucket first.
const DEPTH_BUCKETS: [(f64, Color32); 5] = [
    (90.0, Color32::from_rgb(0xff, 0x00, 0x00)),
    (70.0, Color32::from_rgb(0xfc, 0x49, 0x03)),
    (50.0, Color32::from_rgb(0xfc, 0x34, 0x03)),
    (30.0, Color32::from_rgb(0xfc, 0xad, 0x03)),
    (10.0, Color32::from_rgb(0xca, 0xfc, 0x03)),
];

/// Color of everything 10 km and shallower.
const SHALLOW: Color32 = Color32::from_rgb(0x00, 0x80, 0x00);

/// Shallowest depth shown in the legend. The feed reports events above sea
/// level with negative depths.
const LEGEND_FLOOR_KM: f64 = -10.0;

pub fn depth_color(depth_km: f64) -> Color32 {
    DEPTH_BUCKETS
        .iter()
        .find(|(threshold, _)| depth_km > *threshold)
        .map(|(_, color)| *color)
        .unwrap_or(SHALLOW)
}

/// Marker radius in pixels. A zero-magnitude event still gets a visible dot.
///
/// Negative magnitudes do appear in the feed and end up with a negative
/// radius, which paints nothing.
pub fn magnitude_radius(magnitude: f64) -> f32 {
    if magnitude == 0.0 {
        1.0
    } else {
        (magnitude * 5.0) as f32
    }
}

/// Resolved visual style of a single earthquake marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub fill: Color32,
    pub stroke: Stroke,
    pub radius: f32,
}

pub fn marker_style(magnitude: f64, depth_km: f64) -> MarkerStyle {
    MarkerStyle {
        fill: depth_color(depth_km).gamma_multiply(FILL_OPACITY),
        stroke: Stroke::new(STROKE_WIDTH, Color32::BLACK.gamma_multiply(STROKE_OPACITY)),
        radius: magnitude_radius(magnitude),
    }
}

/// Rows of the depth legend, shallowest first. Labels read `lower–upper`,
/// except the open-ended last row.
pub fn legend_rows() -> Vec<(String, Color32)> {
    let mut bounds = vec![(LEGEND_FLOOR_KM, SHALLOW)];
    bounds.extend(DEPTH_BUCKETS.iter().rev().map(|(threshold, color)| (*threshold, *color)));

    bounds
        .iter()
        .enumerate()
        .map(|(i, (lower, color))| {
            let label = match bounds.get(i + 1) {
                Some((upper, _)) => format!("{lower}–{upper}"),
                None => format!("{lower}+"),
            };
            (label, *color)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn deeper_quakes_get_hotter_colors() {
        assert_eq!(depth_color(95.0), Color32::from_rgb(0xff, 0x00, 0x00));
        assert_eq!(depth_color(80.0), Color32::from_rgb(0xfc, 0x49, 0x03));
        assert_eq!(depth_color(60.0), Color32::from_rgb(0xfc, 0x34, 0x03));
        assert_eq!(depth_color(40.0), Color32::from_rgb(0xfc, 0xad, 0x03));
        assert_eq!(depth_color(15.0), Color32::from_rgb(0xca, 0xfc, 0x03));
        assert_eq!(depth_color(5.0), Color32::from_rgb(0x00, 0x80, 0x00));
        assert_eq!(depth_color(-7.2), Color32::from_rgb(0x00, 0x80, 0x00));
    }

    #[test]
    fn bucket_boundaries_fall_into_the_shallower_bucket() {
        // Thresholds are strict `>`.
        assert_eq!(depth_color(90.0), Color32::from_rgb(0xfc, 0x49, 0x03));
        assert_eq!(depth_color(70.0), Color32::from_rgb(0xfc, 0x34, 0x03));
        assert_eq!(depth_color(50.0), Color32::from_rgb(0xfc, 0xad, 0x03));
        assert_eq!(depth_color(30.0), Color32::from_rgb(0xca, 0xfc, 0x03));
        assert_eq!(depth_color(10.0), Color32::from_rgb(0x00, 0x80, 0x00));
    }

    #[test]
    fn radius_scales_with_magnitude() {
        assert_relative_eq!(magnitude_radius(4.2), 21.0);
        assert_relative_eq!(magnitude_radius(1.0), 5.0);
    }

    #[test]
    fn zero_magnitude_event_is_still_visible() {
        assert_relative_eq!(magnitude_radius(0.0), 1.0);
    }

    #[test]
    fn negative_magnitude_yields_a_negative_radius() {
        // Left unclamped; such markers are simply not painted.
        assert_relative_eq!(magnitude_radius(-1.0), -5.0);
    }

    #[test]
    fn marker_style_combines_depth_and_magnitude() {
        let style = marker_style(4.2, 15.0);
        assert_eq!(style.fill, Color32::from_rgb(0xca, 0xfc, 0x03).gamma_multiply(0.5));
        assert_relative_eq!(style.radius, 21.0);

        let style = marker_style(0.0, 95.0);
        assert_eq!(style.fill, Color32::from_rgb(0xff, 0x00, 0x00).gamma_multiply(0.5));
        assert_relative_eq!(style.radius, 1.0);
    }

    #[test]
    fn legend_has_six_rows_matching_the_buckets() {
        let rows = legend_rows();

        let labels: Vec<&str> = rows.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(labels, ["-10–10", "10–30", "30–50", "50–70", "70–90", "90+"]);

        // Each row carries the color a quake of that depth would get.
        for (row, depth) in rows.iter().zip([-5.0, 15.0, 40.0, 60.0, 80.0, 95.0]) {
            assert_eq!(row.1, depth_color(depth));
        }
    }
}
