use serde::{Deserialize, Serialize};

/// Placeholder name given to areas drawn on the map before they are renamed.
pub const DEFAULT_AREA_NAME: &str = "Área sem nome";

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned lat/lng box, used to fit the viewport to an area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    pub fn of_ring(points: &[GeoPoint]) -> Option<Self> {
        let mut it = points.iter();
        let first = it.next()?;
        let mut bounds = Self {
            south: first.lat,
            west: first.lng,
            north: first.lat,
            east: first.lng,
        };
        for p in it {
            bounds.south = bounds.south.min(p.lat);
            bounds.west = bounds.west.min(p.lng);
            bounds.north = bounds.north.max(p.lat);
            bounds.east = bounds.east.max(p.lng);
        }
        Some(bounds)
    }
}

/// A persisted, named, colored closed polygon drawn by the user.
///
/// `points` is a closed ring: at least three distinct vertices plus a
/// closing duplicate of the first, so `points.len() >= 4` and
/// `points[0] == points[points.len() - 1]`. `color` is an optional
/// `#rrggbb` string; `None` renders with the default color.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Area {
    pub id: String,
    pub name: String,
    pub points: Vec<GeoPoint>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Area {
    pub fn is_closed_ring(&self) -> bool {
        self.points.len() >= 4 && self.points.first() == self.points.last()
    }
}

/// Planar distance in degrees. Not geodesic; only good for short-range
/// proximity checks like the closing-threshold test.
pub fn planar_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    (a.lat - b.lat).hypot(a.lng - b.lng)
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::{Area, GeoBounds, GeoPoint, new_id, planar_distance};

    #[test]
    fn planar_distance_is_euclidean_in_degrees() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(3.0, 4.0);
        assert_eq!(planar_distance(a, b), 5.0);
        assert_eq!(planar_distance(b, a), 5.0);
        assert_eq!(planar_distance(a, a), 0.0);
    }

    #[test]
    fn ring_bounds_span_all_vertices() {
        let ring = [
            GeoPoint::new(-3.0, -60.0),
            GeoPoint::new(-2.0, -59.5),
            GeoPoint::new(-2.5, -61.0),
            GeoPoint::new(-3.0, -60.0),
        ];
        let b = GeoBounds::of_ring(&ring).expect("bounds");
        assert_eq!(b.south, -3.0);
        assert_eq!(b.north, -2.0);
        assert_eq!(b.west, -61.0);
        assert_eq!(b.east, -59.5);
        assert_eq!(GeoBounds::of_ring(&[]), None);
    }

    #[test]
    fn closed_ring_invariant() {
        let p0 = GeoPoint::new(10.0, 10.0);
        let area = Area {
            id: new_id(),
            name: "teste".to_string(),
            points: vec![p0, GeoPoint::new(10.0, 11.0), GeoPoint::new(11.0, 11.0), p0],
            color: None,
        };
        assert!(area.is_closed_ring());

        let open = Area {
            points: area.points[..3].to_vec(),
            ..area.clone()
        };
        assert!(!open.is_closed_ring());
    }

    #[test]
    fn area_json_matches_storage_layout() {
        let json = r#"{"id":"a1","name":"Sítio","points":[{"lat":-2.9,"lng":-59.9}]}"#;
        let area: Area = serde_json::from_str(json).expect("area");
        assert_eq!(area.id, "a1");
        assert_eq!(area.color, None);
        assert_eq!(area.points[0], GeoPoint::new(-2.9, -59.9));

        let with_color: Area =
            serde_json::from_str(r##"{"id":"a2","name":"","points":[],"color":"#1677ff"}"##)
                .expect("area with color");
        assert_eq!(with_color.color.as_deref(), Some("#1677ff"));
    }

    #[test]
    fn ids_are_unique() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }
}
