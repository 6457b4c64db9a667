//! Distance metrics for points and feature vectors.
//!
//! ## Purpose
//!
//! This module provides the selectable distance metric shared by the
//! variogram estimator (point coordinates) and the applicability engine
//! (feature vectors).
//!
//! ## Key concepts
//!
//! * **Euclidean**: Planar distance in the units of the input.
//! * **Haversine**: Great-circle distance. Points are read as
//!   `(x = longitude, y = latitude)` in degrees and measured in metres on a
//!   sphere of radius [`EARTH_RADIUS_M`]. Feature vectors must have exactly two
//!   columns read as `(latitude, longitude)` in radians, and the result is the
//!   central angle on the unit sphere.
//!
//! ## Invariants
//!
//! * Distances are non-negative and symmetric.

// External dependencies
use core::str::FromStr;
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::SpacvError;
use crate::primitives::geometry::Point;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

// ============================================================================
// Metric
// ============================================================================

/// Distance function used for pairwise and nearest-neighbour distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// Straight-line distance.
    #[default]
    Euclidean,

    /// Great-circle distance.
    Haversine,
}

impl FromStr for DistanceMetric {
    type Err = SpacvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Self::Euclidean),
            "haversine" => Ok(Self::Haversine),
            _ => Err(SpacvError::UnknownOption {
                kind: "distance metric",
                value: s.to_string(),
            }),
        }
    }
}

impl DistanceMetric {
    /// Lower-case name of the metric.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Haversine => "haversine",
        }
    }

    /// Distance between two coordinates.
    #[inline]
    pub fn points<T: Float>(&self, a: &Point<T>, b: &Point<T>) -> T {
        match self {
            Self::Euclidean => a.distance(b),
            Self::Haversine => {
                let radius = T::from(EARTH_RADIUS_M).unwrap_or_else(T::nan);
                central_angle(
                    a.y.to_radians(),
                    a.x.to_radians(),
                    b.y.to_radians(),
                    b.x.to_radians(),
                ) * radius
            }
        }
    }

    /// Distance between two feature rows of equal length.
    #[inline]
    pub fn features<T: Float>(&self, a: &[T], b: &[T]) -> T {
        match self {
            Self::Euclidean => a
                .iter()
                .zip(b.iter())
                .fold(T::zero(), |acc, (&x, &y)| acc + (x - y) * (x - y))
                .sqrt(),
            Self::Haversine => central_angle(a[0], a[1], b[0], b[1]),
        }
    }

    /// Check that rows with `n_features` columns can be measured with this metric.
    pub fn check_features(&self, n_features: usize) -> Result<(), SpacvError> {
        match self {
            Self::Haversine if n_features != 2 => Err(SpacvError::UnsupportedMetric {
                metric: self.name(),
                reason: format!("needs exactly 2 features (latitude, longitude), got {n_features}"),
            }),
            _ => Ok(()),
        }
    }
}

/// Central angle between two (latitude, longitude) pairs given in radians.
fn central_angle<T: Float>(lat1: T, lon1: T, lat2: T, lon2: T) -> T {
    let two = T::one() + T::one();
    let dlat = (lat2 - lat1) / two;
    let dlon = (lon2 - lon1) / two;
    let h = dlat.sin().powi(2) + lat1.cos() * lat2.cos() * dlon.sin().powi(2);
    two * h.max(T::zero()).min(T::one()).sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_metric_names() {
        assert_eq!("Euclidean".parse::<DistanceMetric>(), Ok(DistanceMetric::Euclidean));
        assert_eq!("haversine".parse::<DistanceMetric>(), Ok(DistanceMetric::Haversine));
        assert!("manhattan".parse::<DistanceMetric>().is_err());
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = DistanceMetric::Haversine.points(&Point::new(0.0, 0.0), &Point::new(0.0, 1.0));
        assert!((d - 111_194.93).abs() < 1.0);
    }

    #[test]
    fn haversine_features_are_angles() {
        let half_pi = core::f64::consts::FRAC_PI_2;
        let d = DistanceMetric::Haversine.features(&[0.0, 0.0], &[0.0, half_pi]);
        assert!((d - half_pi).abs() < 1e-12);
    }
}
