/// Floating point type used throughout system
pub type Real = f64;

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

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// `Some(v)` only for finite values.
pub fn finite(v: Real) -> Option<Real> {
    v.is_finite().then_some(v)
}

/// Parse decimal text into a finite number.
///
/// Surrounding whitespace is ignored. Empty text, garbage, `inf` and `NaN`
/// all yield `None`.
pub fn parse_finite(text: &str) -> Option<Real> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<Real>().ok().and_then(finite)
}
