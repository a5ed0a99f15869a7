/// Floating point type used throughout the system.
pub type Real = f64;

/// Sentinel for a period with no value.
pub const MISSING: Real = Real::NAN;

/// True when `v` is the missing-value sentinel.
pub fn is_missing(v: Real) -> bool {
    v.is_nan()
}

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// Compare two values; two missing values compare equal.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    if is_missing(a) || is_missing(b) {
        return is_missing(a) && is_missing(b);
    }
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Element-wise [`nearly_equal`] over two series of the same length.
pub fn series_nearly_equal(a: &[Real], b: &[Real], tol: Tolerances) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| nearly_equal(*x, *y, tol))
}
