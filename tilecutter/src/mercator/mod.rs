//! Spherical Mercator projection for the slippy-map tiling scheme.
//!
//! A [`MercatorProjection`] is bound to a single zoom level and converts
//! between geographic coordinates and the global pixel space of that level,
//! where the world is a square of `256 * 2^zoom` pixels with the origin pixel
//! at its center. [`latlng_to_meters`] is zoom-independent and projects onto
//! Mercator meters for WMS-style bounding boxes.

use std::f64::consts::PI;

use crate::geom::{LatLng, Point};

/// Side length in pixels of a single square map tile.
pub const TILE_SIZE: u32 = 256;

/// WGS84 semi-major axis in meters.
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// First eccentricity of the WGS84 ellipsoid.
pub const WGS84_ECCENTRICITY: f64 = 0.081_819_191_310_871_813_8;

const DEG_TO_RAD: f64 = PI / 180.0;

/// Latitude sine clamp guarding the logarithm singularity at the poles.
const SIN_LAT_LIMIT: f64 = 0.9999;

/// Projection between geographic coordinates and the global pixel space of
/// one zoom level.
///
/// Immutable once constructed; the per-zoom scale factors are derived in
/// [`MercatorProjection::new`] and cached for the lifetime of the instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorProjection {
    zoom: u8,
    size: f64,
    pixels_per_degree: f64,
    pixels_per_radian: f64,
    origin: (f64, f64),
}

impl MercatorProjection {
    /// Creates the projection for the given zoom level.
    pub fn new(zoom: u8) -> Self {
        let size = TILE_SIZE as f64 * 2.0_f64.powi(zoom as i32);
        Self {
            zoom,
            size,
            pixels_per_degree: size / 360.0,
            pixels_per_radian: size / (2.0 * PI),
            origin: (size / 2.0, size / 2.0),
        }
    }

    /// The zoom level this projection is bound to.
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Side length of the world in pixels at this zoom level.
    pub fn world_size(&self) -> f64 {
        self.size
    }

    /// Center of the pixel-space square, i.e. the projection of (0, 0).
    pub fn origin(&self) -> (f64, f64) {
        self.origin
    }

    /// Converts geographic coordinates to global pixel coordinates.
    ///
    /// The latitude sine is clamped to ±0.9999 before the logarithm, so the
    /// poles map to finite pixel rows instead of diverging. Both components
    /// are rounded to the nearest integer pixel.
    pub fn latlng_to_pixel(&self, latlng: LatLng) -> Point {
        let x = self.origin.0 + latlng.lng * self.pixels_per_degree;
        let sin = (latlng.lat * DEG_TO_RAD)
            .sin()
            .clamp(-SIN_LAT_LIMIT, SIN_LAT_LIMIT);
        let y = self.origin.1 + 0.5 * ((1.0 + sin) / (1.0 - sin)).ln() * -self.pixels_per_radian;
        Point::new(x.round() as i64, y.round() as i64)
    }

    /// Converts global pixel coordinates back to geographic coordinates.
    ///
    /// Longitude is wrapped into (-180, 180]; latitude is clamped to
    /// [-90, 90].
    pub fn pixel_to_latlng(&self, point: Point) -> LatLng {
        let lng_raw = (point.x as f64 - self.origin.0) / self.pixels_per_degree;
        let lng = lng_raw - ((lng_raw - 180.0) / 360.0).ceil() * 360.0;
        let lat_rad =
            2.0 * ((point.y as f64 - self.origin.1) / -self.pixels_per_radian).exp().atan()
                - PI / 2.0;
        let lat = (lat_rad / DEG_TO_RAD).clamp(-90.0, 90.0);
        LatLng::new(lat, lng)
    }
}

/// Projects WGS84 geographic coordinates to Mercator meters.
///
/// Uses the ellipsoidal formulation with the WGS84 semi-major axis and first
/// eccentricity; this is the coordinate system WMS servers expect for
/// Simple-Mercator SRS codes. Zoom-independent.
pub fn latlng_to_meters(latlng: LatLng) -> (f64, f64) {
    let x = WGS84_SEMI_MAJOR_AXIS * latlng.lng * DEG_TO_RAD;
    let lat_rad = latlng.lat * DEG_TO_RAD;
    let sin = lat_rad.sin();
    let con = (1.0 - WGS84_ECCENTRICITY * sin) / (1.0 + WGS84_ECCENTRICITY * sin);
    let y = WGS84_SEMI_MAJOR_AXIS
        * (((lat_rad + PI / 2.0) / 2.0).tan() * con.powf(WGS84_ECCENTRICITY / 2.0)).ln();
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_size_doubles_per_zoom() {
        for zoom in 0..20u8 {
            let proj = MercatorProjection::new(zoom);
            assert_eq!(proj.world_size(), 256.0 * 2.0_f64.powi(zoom as i32));
        }
    }

    #[test]
    fn test_origin_is_center_of_pixel_space() {
        let proj = MercatorProjection::new(5);
        let size = proj.world_size();
        assert_eq!(proj.origin(), (size / 2.0, size / 2.0));
    }

    #[test]
    fn test_null_island_maps_to_center() {
        let proj = MercatorProjection::new(0);
        let px = proj.latlng_to_pixel(LatLng::new(0.0, 0.0));
        assert_eq!(px, Point::new(128, 128));
    }

    #[test]
    fn test_known_pixel_at_zoom_one() {
        // World is 512px wide; 90 degrees east of center is a quarter width.
        let proj = MercatorProjection::new(1);
        let px = proj.latlng_to_pixel(LatLng::new(0.0, 90.0));
        assert_eq!(px, Point::new(384, 256));
    }

    #[test]
    fn test_pixel_to_latlng_recovers_center() {
        let proj = MercatorProjection::new(3);
        let ll = proj.pixel_to_latlng(Point::new(1024, 1024));
        assert!(ll.lat.abs() < 1e-9);
        assert!(ll.lng.abs() < 1e-9);
    }

    #[test]
    fn test_eastern_longitude_survives_round_trip() {
        let proj = MercatorProjection::new(10);
        let ll = LatLng::new(40.0, 90.0);
        let recovered = proj.pixel_to_latlng(proj.latlng_to_pixel(ll));
        assert!((recovered.lng - 90.0).abs() < 0.01);
        assert!((recovered.lat - 40.0).abs() < 0.01);
    }

    #[test]
    fn test_longitude_wraps_at_antimeridian() {
        let proj = MercatorProjection::new(0);
        // Both edges of the world square land on the antimeridian and stay
        // inside (-180, 180].
        for x in [0, 256] {
            let ll = proj.pixel_to_latlng(Point::new(x, 128));
            assert!((ll.lng.abs() - 180.0).abs() < 1e-9, "lng = {}", ll.lng);
            assert!(ll.lng > -180.0 && ll.lng <= 180.0);
        }
    }

    #[test]
    fn test_pole_clamp_does_not_diverge() {
        let proj = MercatorProjection::new(8);
        let north = proj.latlng_to_pixel(LatLng::new(90.0, 0.0));
        let near_north = proj.latlng_to_pixel(LatLng::new(89.9999, 0.0));
        assert_eq!(north.y, near_north.y);

        let south = proj.latlng_to_pixel(LatLng::new(-90.0, 0.0));
        let near_south = proj.latlng_to_pixel(LatLng::new(-89.9999, 0.0));
        assert_eq!(south.y, near_south.y);
    }

    #[test]
    fn test_pole_pixels_are_finite_and_symmetric() {
        let proj = MercatorProjection::new(4);
        let north = proj.latlng_to_pixel(LatLng::new(90.0, 0.0));
        let south = proj.latlng_to_pixel(LatLng::new(-90.0, 0.0));
        let size = proj.world_size() as i64;
        assert!((north.y + south.y - size).abs() <= 1);
    }

    #[test]
    fn test_meters_at_null_island() {
        let (x, y) = latlng_to_meters(LatLng::new(0.0, 0.0));
        assert!(x.abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn test_meters_at_antimeridian() {
        let (x, _) = latlng_to_meters(LatLng::new(0.0, 180.0));
        assert!((x - WGS84_SEMI_MAJOR_AXIS * PI).abs() < 1e-6);
    }

    #[test]
    fn test_meters_hemisphere_symmetry() {
        let (xe, yn) = latlng_to_meters(LatLng::new(45.0, 30.0));
        let (xw, ys) = latlng_to_meters(LatLng::new(-45.0, -30.0));
        assert!((xe + xw).abs() < 1e-6);
        assert!((yn + ys).abs() < 1e-6);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_pixel_round_trip_within_one_pixel(
                lat in -85.0..85.0_f64,
                lng in -179.9..179.9_f64,
                zoom in 0u8..=18
            ) {
                let proj = MercatorProjection::new(zoom);
                let px = proj.latlng_to_pixel(LatLng::new(lat, lng));
                let recovered = proj.pixel_to_latlng(px);
                let px2 = proj.latlng_to_pixel(recovered);

                // Integer rounding loses at most one pixel per conversion.
                // X wraps at the antimeridian, so compare modulo the world
                // width.
                let size = proj.world_size() as i64;
                let dx = (px2.x - px.x).rem_euclid(size);
                let dx = dx.min(size - dx);
                prop_assert!(dx <= 1, "x drifted: {} -> {}", px.x, px2.x);
                prop_assert!((px2.y - px.y).abs() <= 1,
                    "y drifted: {} -> {}", px.y, px2.y);
            }

            #[test]
            fn test_latlng_round_trip_within_pixel_resolution(
                lat in -85.0..85.0_f64,
                lng in -179.9..179.9_f64,
                zoom in 0u8..=18
            ) {
                let proj = MercatorProjection::new(zoom);
                let recovered = proj.pixel_to_latlng(proj.latlng_to_pixel(LatLng::new(lat, lng)));

                // One pixel of longitude at this zoom, plus rounding slack;
                // measured around the circle so the antimeridian wrap does
                // not count as a full turn.
                let degrees_per_pixel = 360.0 / proj.world_size();
                let dlng = (recovered.lng - lng).abs();
                let dlng = dlng.min(360.0 - dlng);
                prop_assert!(dlng <= degrees_per_pixel,
                    "lng {} -> {}", lng, recovered.lng);
                // Latitude resolution degrades toward the poles; the secant
                // of 85 degrees bounds the stretch factor.
                let lat_tolerance = degrees_per_pixel / (lat * DEG_TO_RAD).cos().max(0.05);
                prop_assert!((recovered.lat - lat).abs() <= lat_tolerance,
                    "lat {} -> {}", lat, recovered.lat);
            }

            #[test]
            fn test_normalized_longitude_in_range(
                x in 0i64..=4096,
                y in 0i64..=4096
            ) {
                let proj = MercatorProjection::new(4);
                let ll = proj.pixel_to_latlng(Point::new(x, y));
                prop_assert!(ll.lng > -180.0 && ll.lng <= 180.0);
                prop_assert!(ll.lat >= -90.0 && ll.lat <= 90.0);
            }

            #[test]
            fn test_projection_is_monotonic_in_longitude(
                lat in -60.0..60.0_f64,
                lng1 in -170.0..-10.0_f64,
                delta in 1.0..170.0_f64,
                zoom in 4u8..=16
            ) {
                let proj = MercatorProjection::new(zoom);
                let a = proj.latlng_to_pixel(LatLng::new(lat, lng1));
                let b = proj.latlng_to_pixel(LatLng::new(lat, lng1 + delta));
                prop_assert!(a.x < b.x);
            }

            #[test]
            fn test_meters_always_finite(
                lat in -89.9..89.9_f64,
                lng in -180.0..180.0_f64
            ) {
                let (x, y) = latlng_to_meters(LatLng::new(lat, lng));
                prop_assert!(x.is_finite());
                prop_assert!(y.is_finite());
            }
        }
    }
}
