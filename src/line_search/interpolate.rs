use num_traits::Float;

/// Stationary point, as a fraction of the trial interval, of the quadratic
/// matching the directional derivatives `d0` at the interval start and
/// `d1` at its end.
///
/// Sign and step-length factors cancel in the ratio, so raw slopes in
/// either optimisation direction are fine. Returns `None` when the slopes
/// are equal (no stationary point) or the result is not finite.
pub(crate) fn quadratic_scaling<F: Float>(d0: F, d1: F) -> Option<F> {
    let denom = d0 - d1;
    if denom == F::zero() {
        return None;
    }
    let scale = d0 / denom;
    scale.is_finite().then_some(scale)
}

/// Stationary point of the cubic matching values `f0`, `f1` and
/// derivatives `d0`, `d1` at the ends of a unit interval.
///
/// The cubic has up to two stationary points; `maximum` selects which one
/// is returned. Values and derivatives must be in the same coordinates
/// (derivatives scaled to the unit interval). Falls back to the quadratic
/// stationary point when the cubic term vanishes; returns `None` when no
/// real stationary point exists.
pub(crate) fn cubic_scaling<F: Float>(f0: F, d0: F, f1: F, d1: F, maximum: bool) -> Option<F> {
    let two = F::one() + F::one();
    let three = two + F::one();

    let df = f1 - f0;
    let a = d0 + d1 - two * df;
    let b = three * df - two * d0 - d1;

    if a == F::zero() {
        if b == F::zero() {
            return None;
        }
        let t = -d0 / (two * b);
        return t.is_finite().then_some(t);
    }

    let disc = b * b - three * a * d0;
    if disc < F::zero() {
        return None;
    }
    let root = disc.sqrt();

    // The second derivative at the two candidates is +/- 2 * sqrt(disc)
    // regardless of the sign of the cubic coefficient, so the root choice
    // alone decides minimum versus maximum.
    let t = if maximum {
        (-b - root) / (three * a)
    } else {
        (-b + root) / (three * a)
    };
    t.is_finite().then_some(t)
}
