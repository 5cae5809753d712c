use eframe::egui;

use super::{Viewport, geometry};
use crate::editor::Editor;
use crate::model::{Area, GeoPoint};

/// Leaflet's default polygon blue, used when an area has no color.
pub(super) const DEFAULT_AREA_COLOR: egui::Color32 = egui::Color32::from_rgb(51, 136, 255);

const SKETCH_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 0, 0);
const SKETCH_CLOSING_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 165, 0);
const SELECTION_COLOR: egui::Color32 = egui::Color32::from_rgb(90, 160, 255);

const GRATICULE_STEPS: [f64; 12] = [
    45.0, 15.0, 5.0, 2.0, 1.0, 0.5, 0.2, 0.1, 0.05, 0.02, 0.01, 0.005,
];

pub(super) fn parse_hex_color(hex: &str) -> Option<egui::Color32> {
    let hex = hex.trim_start_matches('#');
    if hex.len() >= 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(egui::Color32::from_rgb(r, g, b))
    } else {
        None
    }
}

pub(super) fn hex_color(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Background plus a graticule at a degree step that keeps the lines
/// readable at the current zoom.
pub(super) fn draw_background(painter: &egui::Painter, rect: egui::Rect, viewport: &Viewport) {
    let bg = painter.ctx().style().visuals.extreme_bg_color;
    painter.rect_filled(rect, 0.0, bg);
    let grid_color = egui::Color32::from_gray(60);

    let px_per_degree = geometry::world_size(viewport.zoom()) / 360.0;
    let Some(step) = GRATICULE_STEPS
        .iter()
        .copied()
        .rev()
        .find(|s| s * px_per_degree >= 48.0)
    else {
        return;
    };

    let north_west = viewport.screen_to_geo(rect, rect.left_top());
    let south_east = viewport.screen_to_geo(rect, rect.right_bottom());

    let mut lng = (north_west.lng / step).floor() * step;
    while lng <= south_east.lng {
        let x = viewport.geo_to_screen(rect, GeoPoint::new(0.0, lng)).x;
        painter.line_segment(
            [egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)],
            egui::Stroke::new(1.0, grid_color),
        );
        lng += step;
    }

    let south = south_east.lat.max(-85.0);
    let north = north_west.lat.min(85.0);
    let mut lat = (south / step).floor() * step;
    while lat <= north {
        let y = viewport.geo_to_screen(rect, GeoPoint::new(lat, 0.0)).y;
        painter.line_segment(
            [egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)],
            egui::Stroke::new(1.0, grid_color),
        );
        lat += step;
    }
}

pub(super) fn draw_areas(
    painter: &egui::Painter,
    rect: egui::Rect,
    viewport: &Viewport,
    areas: &[Area],
    selected_id: Option<&str>,
) {
    for area in areas {
        // drop the closing duplicate before tessellating
        let ring = if area.is_closed_ring() {
            &area.points[..area.points.len() - 1]
        } else {
            &area.points[..]
        };
        if ring.len() < 3 {
            continue;
        }
        let points: Vec<egui::Pos2> = ring
            .iter()
            .map(|p| viewport.geo_to_screen(rect, *p))
            .collect();
        let color = area
            .color
            .as_deref()
            .and_then(parse_hex_color)
            .unwrap_or(DEFAULT_AREA_COLOR);
        let fill =
            egui::Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 50);
        painter.add(egui::Shape::convex_polygon(
            points.clone(),
            fill,
            egui::Stroke::new(3.0, color),
        ));
        if selected_id == Some(area.id.as_str()) {
            painter.add(egui::Shape::closed_line(
                points,
                egui::Stroke::new(1.5, SELECTION_COLOR),
            ));
        }
    }
}

/// Live feedback for the drawing session: the open path through the pending
/// vertices and the hover point, switching color when the next click would
/// close the polygon.
pub(super) fn draw_sketch(
    painter: &egui::Painter,
    rect: egui::Rect,
    viewport: &Viewport,
    editor: &Editor,
) {
    let mut points: Vec<egui::Pos2> = editor
        .pending_points()
        .iter()
        .map(|p| viewport.geo_to_screen(rect, *p))
        .collect();
    let vertex_count = points.len();
    if let Some(hover) = editor.hover_point() {
        points.push(viewport.geo_to_screen(rect, hover));
    }

    let color = if editor.will_close() {
        SKETCH_CLOSING_COLOR
    } else {
        SKETCH_COLOR
    };
    if points.len() >= 2 {
        painter.add(egui::Shape::line(points.clone(), egui::Stroke::new(3.0, color)));
    }
    for (i, p) in points.iter().take(vertex_count).enumerate() {
        let radius = if i == 0 { 5.0 } else { 3.5 };
        painter.add(egui::Shape::circle_filled(*p, radius, color));
    }
}

#[cfg(test)]
mod tests {
    use super::{hex_color, parse_hex_color};
    use eframe::egui;

    #[test]
    fn hex_parsing_round_trip() {
        assert_eq!(
            parse_hex_color("#1677ff"),
            Some(egui::Color32::from_rgb(0x16, 0x77, 0xff))
        );
        assert_eq!(
            parse_hex_color("3388ff"),
            Some(egui::Color32::from_rgb(0x33, 0x88, 0xff))
        );
        assert_eq!(hex_color([0x16, 0x77, 0xff]), "#1677ff");
        assert_eq!(parse_hex_color(&hex_color([1, 2, 3])), Some(egui::Color32::from_rgb(1, 2, 3)));
    }

    #[test]
    fn malformed_hex_is_none() {
        assert_eq!(parse_hex_color("#12"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
        assert_eq!(parse_hex_color(""), None);
    }
}
