/// Mean Earth radius used for all distance calculations.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance between two lat/lng points in kilometers.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let lat1_r = lat1.to_radians();
    let lat2_r = lat2.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1_r.cos() * lat2_r.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Shift a longitude difference into (-180, 180] so that a move is always
/// counted the short way round the globe.
pub fn normalize_longitude_delta(delta: f64) -> f64 {
    if delta > 180.0 {
        delta - 360.0
    } else if delta <= -180.0 {
        delta + 360.0
    } else {
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn same_point_is_zero() {
        assert!(haversine_km(51.5074, -0.1278, 51.5074, -0.1278).abs() < 1e-9);
    }

    #[test]
    fn quarter_great_circle() {
        let d = haversine_km(0.0, 0.0, 0.0, 90.0);
        assert!((d - EARTH_RADIUS_KM * PI / 2.0).abs() < 1e-6);
        assert!((d - 10007.5).abs() < 0.1);

        let pole = haversine_km(0.0, 0.0, 90.0, 0.0);
        assert!((pole - d).abs() < 1e-6);
    }

    #[test]
    fn london_to_new_york() {
        let d = haversine_km(51.5074, -0.1278, 40.7128, -74.0060);
        assert!((d - 5570.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = haversine_km(35.6895, 139.6917, -33.8688, 151.2093);
        let b = haversine_km(-33.8688, 151.2093, 35.6895, 139.6917);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn normalize_wraps_across_antimeridian() {
        // Tokyo (139.7) -> San Francisco (-122.4): eastward 97.9, not westward 262.1
        let delta = normalize_longitude_delta(-122.4 - 139.7);
        assert!((delta - 97.9).abs() < 1e-9);

        let delta = normalize_longitude_delta(139.7 - (-122.4));
        assert!((delta + 97.9).abs() < 1e-9);
    }

    #[test]
    fn normalize_range_is_half_open() {
        assert_eq!(normalize_longitude_delta(180.0), 180.0);
        assert_eq!(normalize_longitude_delta(-180.0), 180.0);
        assert_eq!(normalize_longitude_delta(0.0), 0.0);
        assert_eq!(normalize_longitude_delta(-179.0), -179.0);
        assert_eq!(normalize_longitude_delta(359.0), -1.0);
        assert_eq!(normalize_longitude_delta(-359.0), 1.0);
    }
}
