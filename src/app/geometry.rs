use std::f64::consts::PI;

use crate::model::GeoPoint;

const TILE_SIZE: f64 = 256.0;

// Web-mercator pole cutoff, same clamp Leaflet applies.
const MAX_SIN_LAT: f64 = 0.9999;

pub(super) fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// Spherical-mercator world pixel of `p` at `zoom` (256·2^z pixel world,
/// origin at the north-west corner, y growing southwards).
pub(super) fn project(p: GeoPoint, zoom: f64) -> (f64, f64) {
    let scale = world_size(zoom);
    let x = (p.lng / 360.0 + 0.5) * scale;
    let sin = p.lat.to_radians().sin().clamp(-MAX_SIN_LAT, MAX_SIN_LAT);
    let y = (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * scale;
    (x, y)
}

pub(super) fn unproject(x: f64, y: f64, zoom: f64) -> GeoPoint {
    let scale = world_size(zoom);
    let lng = (x / scale - 0.5) * 360.0;
    let n = PI * (1.0 - 2.0 * y / scale);
    let lat = n.sinh().atan().to_degrees();
    GeoPoint::new(lat, lng)
}

/// Even-odd test against a closed ring, in geographic coordinates.
pub(super) fn point_in_ring(p: GeoPoint, ring: &[GeoPoint]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];
        if (a.lat > p.lat) != (b.lat > p.lat) {
            let t = (p.lat - a.lat) / (b.lat - a.lat);
            if p.lng < a.lng + t * (b.lng - a.lng) {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
