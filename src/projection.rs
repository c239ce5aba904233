//! Output projections
//!
//! The emitter only needs `transform(lon, lat) -> (x, y)`; anything
//! implementing [`CoordinateTransform`] can be plugged in, including plain
//! closures. Two projections are built in: WGS84 passthrough and Lambert-93
//! (EPSG:2154), the French national grid.

use std::f64::consts::FRAC_PI_4;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::types::Vector2;

/// Maps geographic `(longitude, latitude)` in degrees to drawing coordinates
pub trait CoordinateTransform: Sync {
    fn transform(&self, longitude: f64, latitude: f64) -> Vector2;
}

impl<F> CoordinateTransform for F
where
    F: Fn(f64, f64) -> (f64, f64) + Sync,
{
    fn transform(&self, longitude: f64, latitude: f64) -> Vector2 {
        self(longitude, latitude).into()
    }
}

/// Built-in output projections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Projection {
    /// Geographic degrees, unchanged
    #[serde(rename = "WGS84", alias = "wgs84")]
    Wgs84,
    /// RGF93 / Lambert-93, metres
    #[serde(rename = "Lambert93", alias = "lambert93")]
    Lambert93,
}

impl Projection {
    /// All built-in projections
    pub const ALL: [Projection; 2] = [Projection::Wgs84, Projection::Lambert93];

    /// Name used in output file names
    pub fn name(&self) -> &'static str {
        match self {
            Projection::Wgs84 => "WGS84",
            Projection::Lambert93 => "Lambert93",
        }
    }

    /// Look a projection up by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Projection> {
        Projection::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// `$INSUNITS` value for drawings in this projection (0 unitless, 6 metres)
    pub fn insunits(&self) -> i16 {
        match self {
            Projection::Wgs84 => 0,
            Projection::Lambert93 => 6,
        }
    }

    /// Label height in drawing units, about two metres on the ground
    pub fn default_text_height(&self) -> f64 {
        match self {
            Projection::Wgs84 => 0.000_02,
            Projection::Lambert93 => 2.0,
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl CoordinateTransform for Projection {
    fn transform(&self, longitude: f64, latitude: f64) -> Vector2 {
        match self {
            Projection::Wgs84 => Vector2::new(longitude, latitude),
            Projection::Lambert93 => LAMBERT_93.forward(longitude, latitude),
        }
    }
}

/// Lambert conformal conic with two standard parallels, ellipsoidal form
#[derive(Debug, Clone, Copy)]
pub struct LambertConformalConic {
    eccentricity: f64,
    n: f64,
    /// Semi-major axis times the cone constant F
    a_f: f64,
    rho0: f64,
    lon0: f64,
    false_easting: f64,
    false_northing: f64,
}

/// Ellipsoid and projection parameters
#[derive(Debug, Clone, Copy)]
pub struct LccParameters {
    pub semi_major_axis: f64,
    pub inverse_flattening: f64,
    /// Latitude of origin, degrees
    pub lat0: f64,
    /// Standard parallels, degrees
    pub lat1: f64,
    pub lat2: f64,
    /// Central meridian, degrees
    pub lon0: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

impl LambertConformalConic {
    pub fn new(p: LccParameters) -> Self {
        let f = 1.0 / p.inverse_flattening;
        let e = (2.0 * f - f * f).sqrt();

        let m = |phi: f64| phi.cos() / (1.0 - e * e * phi.sin().powi(2)).sqrt();
        let (phi0, phi1, phi2) = (p.lat0.to_radians(), p.lat1.to_radians(), p.lat2.to_radians());

        let n = (m(phi1).ln() - m(phi2).ln()) / (isometric_t(phi1, e).ln() - isometric_t(phi2, e).ln());
        let a_f = p.semi_major_axis * m(phi1) / (n * isometric_t(phi1, e).powf(n));
        let rho0 = a_f * isometric_t(phi0, e).powf(n);

        LambertConformalConic {
            eccentricity: e,
            n,
            a_f,
            rho0,
            lon0: p.lon0.to_radians(),
            false_easting: p.false_easting,
            false_northing: p.false_northing,
        }
    }

    /// Project `(longitude, latitude)` in degrees to grid metres
    pub fn forward(&self, longitude: f64, latitude: f64) -> Vector2 {
        let rho = self.a_f * isometric_t(latitude.to_radians(), self.eccentricity).powf(self.n);
        let theta = self.n * (longitude.to_radians() - self.lon0);
        Vector2::new(
            self.false_easting + rho * theta.sin(),
            self.false_northing + self.rho0 - rho * theta.cos(),
        )
    }
}

fn isometric_t(phi: f64, e: f64) -> f64 {
    let es = e * phi.sin();
    (FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - es) / (1.0 + es)).powf(e / 2.0)
}

/// EPSG:2154 on the GRS80 ellipsoid
static LAMBERT_93: Lazy<LambertConformalConic> = Lazy::new(|| {
    LambertConformalConic::new(LccParameters {
        semi_major_axis: 6_378_137.0,
        inverse_flattening: 298.257_222_101,
        lat0: 46.5,
        lat1: 49.0,
        lat2: 44.0,
        lon0: 3.0,
        false_easting: 700_000.0,
        false_northing: 6_600_000.0,
    })
});
