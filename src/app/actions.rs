use super::{EditForm, MapApp, render, settings};
use crate::model::{Area, GeoBounds, GeoPoint};

impl MapApp {
    /// Select an area and fit the viewport to its ring, the way clicking a
    /// polygon or its list entry behaves.
    pub(super) fn locate_area(&mut self, id: &str) {
        let Some(area) = self.store.find(id) else {
            return;
        };
        self.editor.select(area.id.clone());
        if let Some(bounds) = GeoBounds::of_ring(&area.points) {
            self.viewport.fit_bounds(bounds, self.last_canvas_size);
        }
    }

    pub(super) fn create_drawn_area(&mut self, ring: Vec<GeoPoint>) {
        match self.store.create(ring, "", None) {
            Ok(area) => self.status = Some(format!("Área criada: {}", area.name)),
            Err(e) => self.status = Some(format!("Falha ao salvar área: {e}")),
        }
    }

    pub(super) fn open_edit_form(&mut self, id: &str) {
        let Some(area) = self.store.find(id) else {
            return;
        };
        let (color, has_color) = match area.color.as_deref().and_then(render::parse_hex_color) {
            Some(c) => ([c.r(), c.g(), c.b()], true),
            None => ([0x16, 0x77, 0xff], false),
        };
        self.edit_form = Some(EditForm {
            id: area.id,
            title: area.name.clone(),
            name: area.name,
            color,
            has_color,
            confirm_delete: false,
        });
    }

    pub(super) fn save_edit_form(&mut self) {
        let Some(form) = self.edit_form.take() else {
            return;
        };
        let color = form.has_color.then(|| render::hex_color(form.color));
        match self.store.update(&form.id, &form.name, color) {
            Ok(()) => self.status = Some("Área atualizada".to_string()),
            Err(e) => self.status = Some(format!("Falha ao salvar: {e}")),
        }
    }

    pub(super) fn delete_area(&mut self, id: &str) {
        match self.store.delete(id) {
            Ok(()) => {
                self.editor.area_deleted(id);
                self.status = Some("Área apagada".to_string());
            }
            Err(e) => self.status = Some(format!("Falha ao apagar: {e}")),
        }
        self.edit_form = None;
    }

    pub(super) fn export_areas_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name("areas.json")
            .add_filter("JSON", &["json"])
            .save_file()
        {
            let path_str = path.display().to_string();
            match serde_json::to_string_pretty(&self.store.list()) {
                Ok(json) => match std::fs::write(&path, json) {
                    Ok(()) => self.status = Some(format!("Exportado {}", path_str)),
                    Err(e) => self.status = Some(format!("Falha ao exportar: {e}")),
                },
                Err(e) => self.status = Some(format!("Falha ao serializar: {e}")),
            }
        }
    }

    /// Replace the areas slot with the contents of a chosen JSON file.
    pub(super) fn import_areas_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            match std::fs::read_to_string(&path) {
                Ok(json) => match serde_json::from_str::<Vec<Area>>(&json) {
                    Ok(areas) => {
                        match self.store.replace(&areas) {
                            Ok(()) => {
                                self.status =
                                    Some(format!("Importadas {} área(s)", areas.len()));
                            }
                            Err(e) => self.status = Some(format!("Falha ao importar: {e}")),
                        }
                        if let Some(id) = self.editor.selected_id().map(str::to_string) {
                            if !areas.iter().any(|a| a.id == id) {
                                self.editor.area_deleted(&id);
                            }
                        }
                        self.edit_form = None;
                    }
                    Err(e) => self.status = Some(format!("Falha ao ler: {e}")),
                },
                Err(e) => self.status = Some(format!("Falha ao ler: {e}")),
            }
        }
    }

    pub(super) fn settings_snapshot(&self) -> settings::AppSettings {
        settings::AppSettings {
            areas_path: self.areas_path.clone(),
            start_lat: self.viewport.center.lat,
            start_lng: self.viewport.center.lng,
            start_zoom: self.viewport.zoom,
        }
    }

    pub(super) fn persist_settings(&mut self) {
        let snapshot = self.settings_snapshot();
        if let Err(e) = settings::save_settings(&self.settings_path, &snapshot) {
            self.status = Some(format!("Falha ao salvar configurações: {e}"));
        }
    }

    /// The areas-path field changed: retarget the store and remember it.
    pub(super) fn apply_areas_path(&mut self) {
        self.store.port_mut().set_path(&self.areas_path);
        self.persist_settings();
    }
}
