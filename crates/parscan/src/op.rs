//! Combining operations for scans.

/// An associative operation with an identity element.
///
/// `combine(a, b)` is always called with `a` holding the earlier prefix, so
/// the operation does not have to be commutative.
pub trait Combine<T>: Sync {
    fn identity(&self) -> T;

    fn combine(&self, acc: T, next: T) -> T;
}

/// Integer addition with two's-complement wrap-around on overflow.
///
/// Overflow is not reported: sums that exceed the type's range wrap, exactly
/// like native fixed-width arithmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WrappingAdd;

macro_rules! impl_wrapping_add {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Combine<$ty> for WrappingAdd {
                #[inline(always)]
                fn identity(&self) -> $ty {
                    0
                }

                #[inline(always)]
                fn combine(&self, acc: $ty, next: $ty) -> $ty {
                    acc.wrapping_add(next)
                }
            }
        )*
    };
}

impl_wrapping_add!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
