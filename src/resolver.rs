//! Angle resolution from a pair of bounded sin/cos phase values.

use core::f32::consts::FRAC_PI_2;

/// Policy turning calibrated `(sin, cos)` phase values into an angle
///
/// Implementations must be continuous across every quadrant seam (apart from
/// the wrap at ±π) and defined for `sin == 0` or `cos == 0`.
pub trait AngleResolver {
    /// Resolve an angle in radians within `[-π, π]`
    fn resolve(&self, sin: f32, cos: f32) -> f32;
}

/// Resolve an angle from `(sin, cos)` using `resolver`
#[inline]
pub fn resolve_angle<A: AngleResolver + ?Sized>(resolver: &A, sin: f32, cos: f32) -> f32 {
    resolver.resolve(sin, cos)
}

/// Four-quadrant arctangent
///
/// Exact for ideal sinusoidal inputs. Signed zeros are treated as `+0`, so
/// the result stays within `(-π, π]` and `(0, 0)` resolves to `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Direct;

impl AngleResolver for Direct {
    fn resolve(&self, sin: f32, cos: f32) -> f32 {
        let sin = if sin == 0.0 { 0.0 } else { sin };
        let cos = if cos == 0.0 { 0.0 } else { cos };
        libm::atan2f(sin, cos)
    }
}

/// Quadrant-wise linear approximation without transcendental calls
///
/// `(sin, cos)` is first scaled onto the diamond `|sin| + |cos| = 1`, which
/// makes the result independent of amplitude and puts every seam at
/// `(0, ±1)` or `(±1, 0)`. Each quadrant then averages a sin-derived and a
/// cos-derived linear estimate. The worst-case error is about 0.071 rad
/// (4.1°); the estimate is exact on the axes and at the 45° diagonals.
/// `(0, 0)` resolves to `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PiecewiseLinear;

/// Quadrant selected by the signs of `(sin, cos)`
///
/// Zero counts as positive, so each axis belongs to exactly one quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Quadrant {
    /// `sin >= 0, cos >= 0`: 0 to 90°
    First,
    /// `sin >= 0, cos < 0`: 90 to 180°
    Second,
    /// `sin < 0, cos < 0`: -180 to -90°
    Third,
    /// `sin < 0, cos >= 0`: -90 to 0°
    Fourth,
}

impl Quadrant {
    #[must_use]
    pub fn of(sin: f32, cos: f32) -> Self {
        match (sin >= 0.0, cos >= 0.0) {
            (true, true) => Quadrant::First,
            (true, false) => Quadrant::Second,
            (false, false) => Quadrant::Third,
            (false, true) => Quadrant::Fourth,
        }
    }

    /// Angle estimate derived from `sin` alone, in radians
    #[must_use]
    pub fn sin_estimate(self, sin: f32) -> f32 {
        match self {
            Quadrant::First | Quadrant::Fourth => sin * FRAC_PI_2,
            Quadrant::Second => (2.0 - sin) * FRAC_PI_2,
            Quadrant::Third => -(2.0 + sin) * FRAC_PI_2,
        }
    }

    /// Angle estimate derived from `cos` alone, in radians
    #[must_use]
    pub fn cos_estimate(self, cos: f32) -> f32 {
        match self {
            Quadrant::First | Quadrant::Second => (1.0 - cos) * FRAC_PI_2,
            Quadrant::Third | Quadrant::Fourth => (cos - 1.0) * FRAC_PI_2,
        }
    }
}

impl AngleResolver for PiecewiseLinear {
    fn resolve(&self, sin: f32, cos: f32) -> f32 {
        let norm = libm::fabsf(sin) + libm::fabsf(cos);
        if norm == 0.0 {
            return 0.0;
        }
        let (sin, cos) = (sin / norm, cos / norm);
        let quadrant = Quadrant::of(sin, cos);
        (quadrant.sin_estimate(sin) + quadrant.cos_estimate(cos)) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use core::f32::consts::{FRAC_PI_4, PI};

    use super::*;

    const STEP: f32 = 0.01;

    /// Resolve `(radius·sin θ, radius·cos θ)` for θ over `[-π, π)`
    #[allow(clippy::cast_precision_loss)]
    fn sweep<A: AngleResolver>(
        resolver: &A,
        radius: f32,
    ) -> impl Iterator<Item = (f32, f32)> + '_ {
        (0..)
            .map(|i| -PI + i as f32 * STEP)
            .take_while(|theta| *theta < PI)
            .map(move |theta| {
                let sin = radius * libm::sinf(theta);
                let cos = radius * libm::cosf(theta);
                (theta, resolve_angle(resolver, sin, cos))
            })
    }

    fn assert_continuous<A: AngleResolver>(resolver: &A, radius: f32, max_slope: f32) {
        let mut previous: Option<(f32, f32)> = None;
        let mut wraps = 0;
        for (theta, angle) in sweep(resolver, radius) {
            if let Some((prev_theta, prev_angle)) = previous {
                let jump = (angle - prev_angle).abs();
                if jump > PI {
                    wraps += 1;
                    assert!(
                        PI - prev_theta.abs() < 2.0 * STEP,
                        "wrap away from the ±π seam at θ = {theta}"
                    );
                } else {
                    assert!(
                        jump <= STEP * max_slope + 1e-4,
                        "jump of {jump} at θ = {theta}"
                    );
                }
            }
            previous = Some((theta, angle));
        }
        assert!(wraps <= 1, "{wraps} wraps in one sweep");
    }

    #[test]
    fn quadrant_selection_covers_sign_pairs() {
        assert_eq!(Quadrant::of(0.0, 0.0), Quadrant::First);
        assert_eq!(Quadrant::of(0.5, -0.5), Quadrant::Second);
        assert_eq!(Quadrant::of(-0.5, -0.5), Quadrant::Third);
        assert_eq!(Quadrant::of(-0.5, 0.0), Quadrant::Fourth);
    }

    #[test]
    fn quadrant_estimates_agree_on_the_axes() {
        // sin = 1, cos = 0 sits on the First/Second seam
        for q in [Quadrant::First, Quadrant::Second] {
            assert!((q.sin_estimate(1.0) - FRAC_PI_2).abs() < 1e-6);
        }
        assert!((Quadrant::First.cos_estimate(0.0) - FRAC_PI_2).abs() < 1e-6);
        assert!((Quadrant::Second.cos_estimate(-0.0) - FRAC_PI_2).abs() < 1e-6);

        // sin = -1, cos = 0 sits on the Third/Fourth seam
        for q in [Quadrant::Third, Quadrant::Fourth] {
            assert!((q.sin_estimate(-1.0) + FRAC_PI_2).abs() < 1e-6);
            assert!((q.cos_estimate(0.0) + FRAC_PI_2).abs() < 1e-6);
        }

        // sin = 0, cos = 1 sits on the Fourth/First seam
        assert_eq!(Quadrant::First.sin_estimate(0.0), 0.0);
        assert_eq!(Quadrant::Fourth.cos_estimate(1.0), 0.0);
        assert_eq!(Quadrant::First.cos_estimate(1.0), 0.0);
    }

    #[test]
    fn direct_is_continuous() {
        for radius in [1.0, 0.5, 0.05] {
            assert_continuous(&Direct, radius, 1.0);
        }
    }

    #[test]
    fn piecewise_is_continuous() {
        // Diamond angle slope is 1 / (|sin θ| + |cos θ|)², at most 1 on the axes
        for radius in [1.0, 0.5, 0.05] {
            assert_continuous(&PiecewiseLinear, radius, 1.01);
        }
    }

    #[test]
    fn piecewise_seams_match_on_both_sides() {
        let seams = [(0.0, 0.5), (0.5, 0.0), (0.0, -0.3), (-0.7, 0.0)];
        for (sin, cos) in seams {
            let ds = if sin == 0.0 { 1e-6 } else { 0.0 };
            let dc = if cos == 0.0 { 1e-6 } else { 0.0 };
            let above = PiecewiseLinear.resolve(sin + ds, cos + dc);
            let below = PiecewiseLinear.resolve(sin - ds, cos - dc);
            let jump = (above - below).abs();
            assert!(
                jump < 1e-4 || jump > 2.0 * PI - 1e-4,
                "({sin}, {cos}): {above} vs {below}"
            );
        }
    }

    #[test]
    fn piecewise_ignores_amplitude() {
        assert_eq!(PiecewiseLinear.resolve(0.0, 0.5), 0.0);
        assert!((PiecewiseLinear.resolve(0.5, 0.0) - FRAC_PI_2).abs() < 1e-6);
        let full = PiecewiseLinear.resolve(0.6, -0.8);
        let scaled = PiecewiseLinear.resolve(0.15, -0.2);
        assert!((full - scaled).abs() < 1e-6);
    }

    #[test]
    fn direct_round_trips_angle() {
        for radius in [1.0, 0.5] {
            for (theta, angle) in sweep(&Direct, radius) {
                let err = (angle - theta).abs();
                assert!(err < 1e-4 || err > 2.0 * PI - 1e-3, "θ = {theta}, got {angle}");
            }
        }
    }

    #[test]
    fn piecewise_round_trips_within_approximation_error() {
        for radius in [1.0, 0.5] {
            for (theta, angle) in sweep(&PiecewiseLinear, radius) {
                let err = (angle - theta).abs();
                assert!(err < 0.075 || err > 2.0 * PI - 0.075, "θ = {theta}, got {angle}");
            }
        }
    }

    #[test]
    fn direct_treats_negative_zero_as_zero() {
        assert!((Direct.resolve(-0.0, -0.5) - PI).abs() < 1e-6);
        assert!(Direct.resolve(-0.0, -0.5) > 0.0);
        assert_eq!(Direct.resolve(-0.0, -0.0), 0.0);
        assert_eq!(Direct.resolve(0.0, -0.0), 0.0);
    }

    #[test]
    fn piecewise_is_exact_on_diagonals() {
        let d = core::f32::consts::FRAC_1_SQRT_2;
        let cases = [
            (d, d, FRAC_PI_4),
            (d, -d, 3.0 * FRAC_PI_4),
            (-d, -d, -3.0 * FRAC_PI_4),
            (-d, d, -FRAC_PI_4),
        ];
        for (sin, cos, expected) in cases {
            let angle = PiecewiseLinear.resolve(sin, cos);
            assert!((angle - expected).abs() < 1e-5, "({sin}, {cos}) -> {angle}");
        }
    }

    #[test]
    fn axis_values_are_defined() {
        for resolver in [&Direct as &dyn AngleResolver, &PiecewiseLinear] {
            assert_eq!(resolver.resolve(0.0, 0.0), 0.0);
            assert!(resolver.resolve(0.0, 1.0).abs() < 1e-6);
            assert!((resolver.resolve(1.0, 0.0) - FRAC_PI_2).abs() < 1e-6);
            assert!((resolver.resolve(-1.0, 0.0) + FRAC_PI_2).abs() < 1e-6);
            assert!((resolver.resolve(0.0, -1.0) - PI).abs() < 1e-6);
        }
    }
}
