//! Great-circle distance.

/// Mean Earth radius (IUGG), kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Kilometers per international mile
pub const KM_PER_MILE: f64 = 1.609344;

/// A distance expressed in both units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    pub kilometers: f64,
    pub miles: f64,
}

impl Distance {
    pub fn from_km(kilometers: f64) -> Self {
        Self {
            kilometers,
            miles: kilometers / KM_PER_MILE,
        }
    }

    /// Both units rounded to two decimals, as reported to clients.
    pub fn rounded(self) -> Self {
        Self {
            kilometers: round2(self.kilometers),
            miles: round2(self.miles),
        }
    }
}

/// Haversine distance between two `(latitude, longitude)` points in degrees.
pub fn great_circle(from: (f64, f64), to: (f64, f64)) -> Distance {
    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Clamp guards against a > 1 from rounding on antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();

    Distance::from_km(EARTH_RADIUS_KM * c)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
