use num::{Float, NumCast, ToPrimitive, Zero};
use rand::distributions::uniform::SampleUniform;
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};

/// Floating-point type, centroids (and all derived values, like distance sums) are calculated in.
pub trait Primitive: Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast + SampleUniform
                + PartialOrd + Copy + Default + Display + Debug + LowerExp + 'static {}
impl Primitive for f32 {}
impl Primitive for f64 {}

/// Element type of the values stored in a grid.
///
/// Implemented for all primitive integer and floating-point types. The only requirements are a
/// natural ordering (used for the min/max reductions) and a conversion into the [`Primitive`]
/// type the centroids are calculated in.
pub trait Scalar: ToPrimitive + PartialOrd + Copy + Debug + Display + 'static {}

macro_rules! impl_scalar {
    ($($t:ty),*) => { $(impl Scalar for $t {})* };
}
impl_scalar!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Convert a grid value into the centroid type. Values that are not representable, or that
/// are not finite after conversion, yield `None`.
pub(crate) fn to_primitive<T: Scalar, F: Primitive>(value: T) -> Option<F> {
    <F as NumCast>::from(value).filter(|v| v.is_finite())
}
