use crate::SimdFloat4;

/// Computes `v1 * v2 + v3` independently in each lane.
///
/// Every lane performs an IEEE-754 single-precision multiply, rounds, then
/// adds and rounds again. The result therefore differs from a hardware fused
/// multiply-add (one rounding) for some inputs, and callers rely on that:
/// this function replaces a library routine with exactly this behavior.
///
/// NaN, infinities and subnormals propagate as the two elementary operations
/// dictate. There is no cross-lane interaction.
///
/// ```
/// use dxil_air_simd::{simd_muladd, SimdFloat4};
///
/// let r = simd_muladd(
///     SimdFloat4::new(2.0, 0.0, 0.0, 0.0),
///     SimdFloat4::new(3.0, 0.0, 0.0, 0.0),
///     SimdFloat4::new(1.0, 0.0, 0.0, 0.0),
/// );
/// assert_eq!(r, SimdFloat4::new(7.0, 0.0, 0.0, 0.0));
/// ```
#[inline]
pub fn simd_muladd(v1: SimdFloat4, v2: SimdFloat4, v3: SimdFloat4) -> SimdFloat4 {
    // Rust never contracts `a * b + c` into an FMA; do not use `f32::mul_add` here.
    SimdFloat4::zip3(v1, v2, v3, |a, b, c| a * b + c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_lane_example() {
        let r = simd_muladd(
            SimdFloat4::new(2.0, 0.0, 0.0, 0.0),
            SimdFloat4::new(3.0, 0.0, 0.0, 0.0),
            SimdFloat4::new(1.0, 0.0, 0.0, 0.0),
        );
        assert_eq!(r, SimdFloat4::new(7.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn identity_multiplier_keeps_lanes_apart() {
        let r = simd_muladd(
            SimdFloat4::new(1.0, 2.0, 3.0, 4.0),
            SimdFloat4::splat(1.0),
            SimdFloat4::ZERO,
        );
        assert_eq!(r, SimdFloat4::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn nan_stays_in_its_lane() {
        let r = simd_muladd(
            SimdFloat4::new(f32::NAN, 1.0, 1.0, 1.0),
            SimdFloat4::splat(1.0),
            SimdFloat4::ZERO,
        );
        assert!(r.x.is_nan());
        assert_eq!([r.y, r.z, r.w], [1.0, 1.0, 1.0]);
    }

    #[test]
    fn rounds_after_multiply_and_after_add() {
        // (1 + 2^-23)^2 = 1 + 2^-22 + 2^-46; the multiply rounds the 2^-46 term away.
        let a = 1.0f32 + f32::EPSILON;
        let c = -(1.0f32 + 2.0 * f32::EPSILON);

        let r = simd_muladd(SimdFloat4::splat(a), SimdFloat4::splat(a), SimdFloat4::splat(c));
        assert_eq!(r, SimdFloat4::ZERO);

        // A fused operation keeps the low term.
        assert_eq!(a.mul_add(a, c), 2.0f32.powi(-46));
    }

    #[test]
    fn infinities_follow_ieee_rules() {
        let r = simd_muladd(
            SimdFloat4::new(f32::INFINITY, f32::INFINITY, 0.0, f32::MAX),
            SimdFloat4::new(2.0, 0.0, f32::INFINITY, 2.0),
            SimdFloat4::new(1.0, 1.0, 1.0, 0.0),
        );
        assert_eq!(r.x, f32::INFINITY);
        assert!(r.y.is_nan(), "inf * 0 is NaN");
        assert!(r.z.is_nan(), "0 * inf is NaN");
        assert_eq!(r.w, f32::INFINITY, "overflowing product rounds to inf");
    }

    #[test]
    fn subnormals_are_not_flushed() {
        let tiny = f32::from_bits(1); // smallest positive subnormal
        let r = simd_muladd(
            SimdFloat4::splat(tiny),
            SimdFloat4::splat(1.0),
            SimdFloat4::splat(0.0),
        );
        assert_eq!(r.x.to_bits(), 1);
    }

    #[test]
    fn method_form_matches_free_function() {
        let a = SimdFloat4::new(0.5, -1.5, 3.25, 8.0);
        let b = SimdFloat4::new(4.0, 2.0, -1.0, 0.125);
        let c = SimdFloat4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(a.mul_add(b, c), simd_muladd(a, b, c));
    }
}
