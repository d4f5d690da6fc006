//! 2D point type and its canonical hashing key.

use num_traits::Float;

/// Number of significant digits kept when deriving a canonical key.
const CANONICAL_DIGITS: i32 = 9;

/// A 2D point.
///
/// Generic over floating-point types (`f32` or `f64`). Equality compares the
/// raw coordinates; whenever points act as map keys or set members, the
/// [`PointKey`] derived from rounded coordinates is used instead, so that
/// floating-point jitter does not produce spurious duplicate nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Point2<F> {
    /// Creates a new point.
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// Creates a point at the origin.
    #[inline]
    pub fn origin() -> Self {
        Self {
            x: F::zero(),
            y: F::zero(),
        }
    }
}

impl Point2<f64> {
    /// Returns the canonical key for this point.
    ///
    /// The key is derived from both coordinates rounded to 9 significant
    /// digits. Every map or set in this crate that is keyed by a point goes
    /// through this single derivation, so two points that differ only by
    /// floating-point jitter collapse to the same node.
    ///
    /// # Example
    ///
    /// ```
    /// use concavum::Point2;
    ///
    /// let a = Point2::new(0.1 + 0.2, 1.0);
    /// let b = Point2::new(0.3, 1.0);
    ///
    /// assert_ne!(a, b); // raw coordinates differ in the last bits
    /// assert_eq!(a.key(), b.key()); // canonical keys collapse them
    /// ```
    #[inline]
    pub fn key(self) -> PointKey {
        PointKey {
            x: canonical_bits(self.x),
            y: canonical_bits(self.y),
        }
    }
}

/// Canonical identity of a [`Point2<f64>`] under floating-point rounding.
///
/// Stores the bit patterns of the coordinates after rounding to a fixed
/// number of significant digits. Hashable and totally ordered, which keeps
/// traversal orders deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey {
    x: u64,
    y: u64,
}

/// Rounds a value to [`CANONICAL_DIGITS`] significant digits.
fn round_significant(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let factor = 10f64.powi(CANONICAL_DIGITS - 1 - magnitude);
    (value * factor).round() / factor
}

fn canonical_bits(value: f64) -> u64 {
    let rounded = round_significant(value);
    // Collapse -0.0 onto 0.0 so the two hash identically.
    if rounded == 0.0 {
        0.0f64.to_bits()
    } else {
        rounded.to_bits()
    }
}
