use std::path::PathBuf;

use crate::model::{Area, DEFAULT_AREA_NAME, GeoPoint, new_id};

/// Persistence slot for the areas list: a single string blob.
///
/// `load` returning `None` means "no data"; the store treats malformed
/// content the same way. `save` replaces the whole slot, which keeps each
/// mutation an atomic read-modify-write a future multi-context host could
/// wrap transactionally.
pub trait StoragePort {
    fn load(&self) -> Option<String>;
    fn save(&mut self, blob: &str) -> Result<(), String>;
}

/// Production backend: one JSON file on disk.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }
}

impl StoragePort for FileStorage {
    fn load(&self) -> Option<String> {
        std::fs::read_to_string(&self.path).ok()
    }

    fn save(&mut self, blob: &str) -> Result<(), String> {
        std::fs::write(&self.path, blob).map_err(|e| e.to_string())
    }
}

/// CRUD over the persisted areas. Sole owner of the persisted set: callers
/// read through `list`/`find` every time instead of caching snapshots.
pub struct AreaStore<P: StoragePort> {
    port: P,
}

impl<P: StoragePort> AreaStore<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Current persisted set in insertion order. Absent or malformed data
    /// reads as empty.
    pub fn list(&self) -> Vec<Area> {
        let Some(blob) = self.port.load() else {
            return Vec::new();
        };
        serde_json::from_str(&blob).unwrap_or_default()
    }

    pub fn find(&self, id: &str) -> Option<Area> {
        self.list().into_iter().find(|a| a.id == id)
    }

    /// Append a new area with a fresh id. An empty name falls back to the
    /// placeholder.
    pub fn create(
        &mut self,
        points: Vec<GeoPoint>,
        name: &str,
        color: Option<String>,
    ) -> Result<Area, String> {
        let mut areas = self.list();
        let area = Area {
            id: new_id(),
            name: if name.is_empty() {
                DEFAULT_AREA_NAME.to_string()
            } else {
                name.to_string()
            },
            points,
            color,
        };
        areas.push(area.clone());
        self.persist(&areas)?;
        Ok(area)
    }

    /// Rename/recolor the area with `id`. Unknown ids are a no-op.
    pub fn update(&mut self, id: &str, name: &str, color: Option<String>) -> Result<(), String> {
        let mut areas = self.list();
        for area in &mut areas {
            if area.id == id {
                area.name = name.to_string();
                area.color = color.clone();
            }
        }
        self.persist(&areas)
    }

    /// Remove the area with `id`. Unknown ids are a no-op.
    pub fn delete(&mut self, id: &str) -> Result<(), String> {
        let mut areas = self.list();
        areas.retain(|a| a.id != id);
        self.persist(&areas)
    }

    /// Replace the whole slot, e.g. after an import.
    pub fn replace(&mut self, areas: &[Area]) -> Result<(), String> {
        self.persist(areas)
    }

    fn persist(&mut self, areas: &[Area]) -> Result<(), String> {
        let json = serde_json::to_string_pretty(areas).map_err(|e| e.to_string())?;
        self.port.save(&json)
    }
}
