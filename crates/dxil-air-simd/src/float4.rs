use core::fmt;
use core::ops::Index;

use bytemuck::{Pod, Zeroable};

/// Four independent `f32` lanes (`x`, `y`, `z`, `w`).
///
/// Lanes have no relationship to each other beyond their position. The layout
/// is `#[repr(C)]` so a value can be viewed as `[f32; 4]` (or raw bytes) via
/// [`bytemuck`].
#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SimdFloat4 {
    /// Lane 0.
    pub x: f32,
    /// Lane 1.
    pub y: f32,
    /// Lane 2.
    pub z: f32,
    /// Lane 3.
    pub w: f32,
}

impl SimdFloat4 {
    /// All lanes `0.0`.
    pub const ZERO: SimdFloat4 = SimdFloat4::splat(0.0);

    /// Number of lanes.
    pub const LANES: usize = 4;

    /// Creates a vector from its four lanes.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a vector with `v` in every lane.
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Returns the lanes in `x, y, z, w` order.
    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Returns lane `i`, or `None` if `i >= 4`.
    pub fn lane(&self, i: usize) -> Option<f32> {
        bytemuck::cast_ref::<SimdFloat4, [f32; 4]>(self).get(i).copied()
    }

    /// Views the lanes as a slice.
    pub fn as_slice(&self) -> &[f32] {
        bytemuck::cast_ref::<SimdFloat4, [f32; 4]>(self)
    }

    /// Applies `f` to each lane position independently.
    #[inline]
    pub(crate) fn zip3(a: Self, b: Self, c: Self, f: impl Fn(f32, f32, f32) -> f32) -> Self {
        Self {
            x: f(a.x, b.x, c.x),
            y: f(a.y, b.y, c.y),
            z: f(a.z, b.z, c.z),
            w: f(a.w, b.w, c.w),
        }
    }

    /// `self * a + b`, lane by lane, with two roundings. See [`crate::simd_muladd`].
    #[inline]
    pub fn mul_add(self, a: Self, b: Self) -> Self {
        crate::simd_muladd(self, a, b)
    }
}

impl From<[f32; 4]> for SimdFloat4 {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<SimdFloat4> for [f32; 4] {
    fn from(v: SimdFloat4) -> Self {
        v.to_array()
    }
}

impl Index<usize> for SimdFloat4 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.as_slice()[index]
    }
}

impl fmt::Debug for SimdFloat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?}, {:?}, {:?})", self.x, self.y, self.z, self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_views_follow_lane_order() {
        let v = SimdFloat4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(SimdFloat4::from([1.0, 2.0, 3.0, 4.0]), v);
        assert_eq!(<[f32; 4]>::from(v), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(v[2], 3.0);
        assert_eq!(v.lane(3), Some(4.0));
        assert_eq!(v.lane(4), None);
    }

    #[test]
    fn byte_layout_is_four_packed_f32() {
        assert_eq!(core::mem::size_of::<SimdFloat4>(), 16);
        let v = SimdFloat4::new(1.0, 0.0, 0.0, -2.0);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes()[..]);
        assert_eq!(&bytes[12..16], &(-2.0f32).to_ne_bytes()[..]);
    }

    #[test]
    #[should_panic]
    fn index_past_w_panics() {
        let _ = SimdFloat4::ZERO[4];
    }
}
