use eframe::egui;

use crate::editor::Editor;
use crate::model::{GeoBounds, GeoPoint};
use crate::store::{AreaStore, FileStorage};

mod actions;
mod geometry;
mod render;
mod search;
mod settings;
mod update;

const MIN_ZOOM: f64 = 1.0;
const MAX_ZOOM: f64 = 19.0;

/// Map viewport: a geographic center plus a mercator zoom level. The only
/// capabilities exposed to the rest of the app are setting the view,
/// fitting bounds and reading the zoom, plus the screen conversions the
/// canvas needs.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Viewport {
    center: GeoPoint,
    zoom: f64,
}

impl Viewport {
    fn new(center: GeoPoint, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    pub(crate) fn zoom(&self) -> f64 {
        self.zoom
    }

    pub(crate) fn set_view(&mut self, center: GeoPoint, zoom: f64) {
        self.center = center;
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Center and zoom so `bounds` fits inside a canvas of `size` pixels,
    /// with some padding around it.
    pub(crate) fn fit_bounds(&mut self, bounds: GeoBounds, size: egui::Vec2) {
        let (x0, y0) = geometry::project(GeoPoint::new(bounds.north, bounds.west), 0.0);
        let (x1, y1) = geometry::project(GeoPoint::new(bounds.south, bounds.east), 0.0);
        let w = (x1 - x0).abs().max(f64::EPSILON);
        let h = (y1 - y0).abs().max(f64::EPSILON);

        let pad = 80.0;
        let zx = (((size.x as f64 - pad).max(1.0)) / w).log2();
        let zy = (((size.y as f64 - pad).max(1.0)) / h).log2();
        self.zoom = zx.min(zy).clamp(MIN_ZOOM, MAX_ZOOM);
        self.center = geometry::unproject((x0 + x1) * 0.5, (y0 + y1) * 0.5, 0.0);
    }

    pub(crate) fn geo_to_screen(&self, rect: egui::Rect, p: GeoPoint) -> egui::Pos2 {
        let (cx, cy) = geometry::project(self.center, self.zoom);
        let (x, y) = geometry::project(p, self.zoom);
        rect.center() + egui::vec2((x - cx) as f32, (y - cy) as f32)
    }

    pub(crate) fn screen_to_geo(&self, rect: egui::Rect, pos: egui::Pos2) -> GeoPoint {
        let (cx, cy) = geometry::project(self.center, self.zoom);
        let d = pos - rect.center();
        geometry::unproject(cx + d.x as f64, cy + d.y as f64, self.zoom)
    }

    /// Pan by a screen-space drag delta.
    pub(crate) fn pan_by(&mut self, delta: egui::Vec2) {
        let (cx, cy) = geometry::project(self.center, self.zoom);
        self.center = geometry::unproject(cx - delta.x as f64, cy - delta.y as f64, self.zoom);
    }

    /// Zoom by a multiplicative scale factor, keeping the geographic point
    /// under `screen_point` fixed.
    pub(crate) fn zoom_about_screen_point(
        &mut self,
        rect: egui::Rect,
        screen_point: egui::Pos2,
        zoom_delta: f64,
    ) {
        let before = self.screen_to_geo(rect, screen_point);
        self.zoom = (self.zoom + zoom_delta.log2()).clamp(MIN_ZOOM, MAX_ZOOM);
        let after_screen = self.geo_to_screen(rect, before);
        self.pan_by(screen_point - after_screen);
    }
}

/// Edit drawer state for the selected area.
pub(super) struct EditForm {
    id: String,
    title: String,
    name: String,
    color: [u8; 3],
    has_color: bool,
    confirm_delete: bool,
}

pub struct MapApp {
    store: AreaStore<FileStorage>,
    editor: Editor,
    viewport: Viewport,
    areas_drawer_open: bool,
    area_query: String,
    edit_form: Option<EditForm>,
    cursor_geo: Option<GeoPoint>,
    last_canvas_size: egui::Vec2,
    areas_path: String,
    settings_path: String,
    status: Option<String>,
}

impl MapApp {
    fn config_path() -> Option<String> {
        if let Some(home) = std::env::var_os("HOME") {
            let path = std::path::PathBuf::from(home).join(".config").join("demarca.toml");
            if path.exists() {
                return Some(path.display().to_string());
            }
        }
        if std::path::Path::new("settings.toml").exists() {
            return Some("settings.toml".to_string());
        }
        None
    }

    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = Self::config_path().unwrap_or_else(|| "settings.toml".to_string());
        let settings = settings::load_settings(&settings_path)
            .or_else(|| settings::load_settings("settings.json"))
            .unwrap_or_default();

        let viewport = Viewport::new(
            GeoPoint::new(settings.start_lat, settings.start_lng),
            settings.start_zoom,
        );

        Self {
            store: AreaStore::new(FileStorage::new(&settings.areas_path)),
            editor: Editor::new(),
            viewport,
            areas_drawer_open: false,
            area_query: String::new(),
            edit_form: None,
            cursor_geo: None,
            last_canvas_size: egui::vec2(1024.0, 768.0),
            areas_path: settings.areas_path,
            settings_path,
            status: None,
        }
    }
}
