use std::fmt::Debug;

use num_traits::{Bounded, Num, NumCast, ToPrimitive};

/// A trait for types that can be used for indexed coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Every implementing type
/// converts to `f64` without loss, which is what lets distances be computed in a single numeric
/// domain regardless of the coordinate type.
pub trait IndexableNum:
    private::Sealed + Num + NumCast + ToPrimitive + PartialOrd + Copy + Debug + Send + Sync + Bounded
{
    /// Widen this coordinate to `f64`.
    #[inline]
    fn as_f64(self) -> f64 {
        // Infallible for every sealed implementor
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl IndexableNum for i8 {}
impl IndexableNum for u8 {}
impl IndexableNum for i16 {}
impl IndexableNum for u16 {}
impl IndexableNum for i32 {}
impl IndexableNum for u32 {}
impl IndexableNum for f32 {}
impl IndexableNum for f64 {}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for i8 {}
    impl Sealed for u8 {}
    impl Sealed for i16 {}
    impl Sealed for u16 {}
    impl Sealed for i32 {}
    impl Sealed for u32 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

#[cfg(test)]
mod test {
    use super::IndexableNum;

    #[test]
    fn widens_unsigned_without_wrapping() {
        let a: u8 = 1;
        let b: u8 = 4;
        assert_eq!(a.as_f64() - b.as_f64(), -3.0);
        assert_eq!(u32::MAX.as_f64(), 4294967295.0);
    }
}
