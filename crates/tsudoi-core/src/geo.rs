//! Spherical geodesy: great-circle distance and weighted centroid
//!
//! The centroid works in 3D Cartesian space on the unit sphere rather
//! than averaging latitude/longitude directly. An arithmetic mean of
//! degrees breaks down across the ±180° seam and near the poles; the
//! vector mean does not.

use crate::models::LatLng;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance between two coordinates, in km.
///
/// Returns 0 for identical points and is symmetric in its arguments.
pub fn distance_km(a: LatLng, b: LatLng) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    EARTH_RADIUS_KM * 2.0 * h.sqrt().asin()
}

/// Weighted spherical centroid of `(coordinate, weight)` pairs.
///
/// Each coordinate is mapped to a unit vector scaled by its weight, the
/// vectors are summed, and the sum is converted back to a coordinate.
/// Returns `None` for an empty sequence or a zero total weight; callers
/// must guard before treating the result as a location.
pub fn spherical_centroid<I>(points: I) -> Option<LatLng>
where
    I: IntoIterator<Item = (LatLng, f64)>,
{
    let mut x = 0.0;
    let mut y = 0.0;
    let mut z = 0.0;
    let mut total_weight = 0.0;

    for (p, w) in points {
        let lat = p.lat.to_radians();
        let lon = p.lon.to_radians();
        x += w * lat.cos() * lon.cos();
        y += w * lat.cos() * lon.sin();
        z += w * lat.sin();
        total_weight += w;
    }

    if total_weight <= 0.0 {
        return None;
    }

    x /= total_weight;
    y /= total_weight;
    z /= total_weight;

    let lat = z.atan2(x.hypot(y)).to_degrees();
    let lon = y.atan2(x).to_degrees();

    Some(LatLng::new(lat, lon))
}

/// Unweighted spherical centroid: every point counts once.
pub fn unweighted_centroid<I>(points: I) -> Option<LatLng>
where
    I: IntoIterator<Item = LatLng>,
{
    spherical_centroid(points.into_iter().map(|p| (p, 1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOLERANCE_DEG: f64 = 1e-9;

    #[test]
    fn test_distance_same_point_is_zero() {
        let p = LatLng::new(35.6812, 139.7671);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn test_distance_known_city_pair() {
        // Tokyo Station to Osaka Station is roughly 400km
        let tokyo = LatLng::new(35.6812, 139.7671);
        let osaka = LatLng::new(34.7025, 135.4959);

        let d = distance_km(tokyo, osaka);
        assert!(d > 390.0 && d < 410.0, "Tokyo-Osaka distance {} should be ~400km", d);
    }

    #[test]
    fn test_centroid_of_single_point_is_the_point() {
        let p = LatLng::new(43.0621, 141.3544);
        let c = spherical_centroid([(p, 3.0)]).unwrap();

        assert!((c.lat - p.lat).abs() < TOLERANCE_DEG);
        assert!((c.lon - p.lon).abs() < TOLERANCE_DEG);
    }

    #[test]
    fn test_centroid_straddling_antimeridian() {
        // Equal weights either side of the ±180° seam must land near the
        // seam, not near 0°
        let east = LatLng::new(0.0, 179.0);
        let west = LatLng::new(0.0, -179.0);

        let c = unweighted_centroid([east, west]).unwrap();

        assert!(c.lat.abs() < TOLERANCE_DEG);
        assert!(
            c.lon.abs() > 179.0,
            "centroid longitude {} should be near ±180, not near 0",
            c.lon
        );
    }

    #[test]
    fn test_uniform_weights_match_unweighted() {
        let points = [
            LatLng::new(35.0, 135.0),
            LatLng::new(36.0, 136.5),
            LatLng::new(34.2, 134.1),
        ];

        let weighted = spherical_centroid(points.iter().map(|p| (*p, 7.0))).unwrap();
        let unweighted = unweighted_centroid(points).unwrap();

        assert!((weighted.lat - unweighted.lat).abs() < TOLERANCE_DEG);
        assert!((weighted.lon - unweighted.lon).abs() < TOLERANCE_DEG);
    }

    #[test]
    fn test_weight_pulls_centroid_toward_heavier_point() {
        let heavy = LatLng::new(35.0, 135.0);
        let light = LatLng::new(35.0, 136.0);

        let weighted = spherical_centroid([(heavy, 2.0), (light, 1.0)]).unwrap();
        let unweighted = unweighted_centroid([heavy, light]).unwrap();

        // Weighted mean sits strictly closer to the heavier point
        assert!((weighted.lon - 135.0).abs() < (weighted.lon - 136.0).abs());
        // Unweighted mean sits near the simple midpoint
        assert!((unweighted.lon - 135.5).abs() < 0.01);
    }

    #[test]
    fn test_centroid_is_order_invariant() {
        let a = (LatLng::new(35.0, 135.0), 2.0);
        let b = (LatLng::new(36.1, 140.2), 1.0);
        let c = (LatLng::new(33.9, 131.0), 4.0);

        let forward = spherical_centroid([a, b, c]).unwrap();
        let reversed = spherical_centroid([c, b, a]).unwrap();

        assert!((forward.lat - reversed.lat).abs() < TOLERANCE_DEG);
        assert!((forward.lon - reversed.lon).abs() < TOLERANCE_DEG);
    }

    #[test]
    fn test_centroid_near_pole() {
        // Points ringing the pole at different longitudes average to the
        // pole itself, where a naive lat/lon mean would drift
        let ring = [
            LatLng::new(89.0, 0.0),
            LatLng::new(89.0, 90.0),
            LatLng::new(89.0, 180.0),
            LatLng::new(89.0, -90.0),
        ];

        let c = unweighted_centroid(ring).unwrap();
        assert!(c.lat > 89.9, "centroid latitude {} should be at the pole", c.lat);
    }

    #[test]
    fn test_empty_input_yields_none() {
        assert!(spherical_centroid(std::iter::empty()).is_none());
        assert!(unweighted_centroid(std::iter::empty()).is_none());
    }

    #[test]
    fn test_zero_total_weight_yields_none() {
        let p = LatLng::new(10.0, 10.0);
        assert!(spherical_centroid([(p, 0.0)]).is_none());
    }

    proptest! {
        #[test]
        fn prop_distance_is_symmetric(
            lat_a in -90.0f64..90.0,
            lon_a in -180.0f64..180.0,
            lat_b in -90.0f64..90.0,
            lon_b in -180.0f64..180.0,
        ) {
            let a = LatLng::new(lat_a, lon_a);
            let b = LatLng::new(lat_b, lon_b);
            prop_assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
        }

        #[test]
        fn prop_distance_is_non_negative(
            lat_a in -90.0f64..90.0,
            lon_a in -180.0f64..180.0,
            lat_b in -90.0f64..90.0,
            lon_b in -180.0f64..180.0,
        ) {
            let a = LatLng::new(lat_a, lon_a);
            let b = LatLng::new(lat_b, lon_b);
            prop_assert!(distance_km(a, b) >= 0.0);
        }

        #[test]
        fn prop_singleton_centroid_is_identity(
            lat in -89.0f64..89.0,
            lon in -179.0f64..179.0,
            weight in 1.0f64..100.0,
        ) {
            let p = LatLng::new(lat, lon);
            let c = spherical_centroid([(p, weight)]).unwrap();
            prop_assert!((c.lat - lat).abs() < 1e-6);
            prop_assert!((c.lon - lon).abs() < 1e-6);
        }
    }
}
