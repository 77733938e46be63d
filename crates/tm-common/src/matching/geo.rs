use crate::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle (haversine) distance between two points, in kilometers.
/// The store runs the same formula in SQL to bound candidate retrieval.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}
