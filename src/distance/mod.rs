//! Distance metrics between 2D points.
//!
//! Every stage of the hull pipeline takes the metric as a caller-supplied
//! strategy (`Fn(Point2<f64>, Point2<f64>) -> f64`), so fence thresholds and
//! shortest-path weights are defined purely in terms of whichever function is
//! injected. Two metrics are provided: planar Euclidean distance and
//! great-circle (haversine) distance for longitude/latitude coordinates.

use crate::primitives::Point2;
use num_traits::Float;

/// Mean Earth radius in kilometers, used by [`haversine_distance`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Computes the Euclidean distance between two points.
///
/// Always finite and non-negative for finite inputs.
///
/// # Example
///
/// ```
/// use concavum::{euclidean_distance, Point2};
///
/// let d: f64 = euclidean_distance(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
/// assert!((d - 5.0).abs() < 1e-12);
/// ```
#[inline]
pub fn euclidean_distance<F: Float>(a: Point2<F>, b: Point2<F>) -> F {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Computes the great-circle distance between two points in kilometers.
///
/// Treats `x` as longitude and `y` as latitude, both in decimal degrees,
/// using the haversine formula on a sphere of radius [`EARTH_RADIUS_KM`].
///
/// # Example
///
/// ```
/// use concavum::{haversine_distance, Point2};
///
/// // One degree of longitude along the equator is about 111.19 km
/// let d: f64 = haversine_distance(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
/// assert!((d - 111.19).abs() < 0.1);
/// ```
pub fn haversine_distance<F: Float>(a: Point2<F>, b: Point2<F>) -> F {
    let two = F::from(2.0).unwrap();

    let phi1 = a.y.to_radians();
    let phi2 = b.y.to_radians();
    let delta_phi = phi2 - phi1;
    let delta_lambda = (b.x - a.x).to_radians();

    let hav = (delta_phi / two).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / two).sin().powi(2);
    let central_angle = two * hav.sqrt().atan2((F::one() - hav).sqrt());

    F::from(EARTH_RADIUS_KM).unwrap() * central_angle
}
