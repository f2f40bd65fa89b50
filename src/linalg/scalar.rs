/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

// Element types a matrix may hold.
//
// Capabilities are expressed through sealed traits implemented on a finite
// set of primitive types, so that e.g. an integer matrix simply has no
// `invert` or `gauss_jordan` method rather than one that silently does nothing.

pub use self::semiring::Semiring;
mod semiring {
    /// Scalars with addition and multiplication.
    ///
    /// This is what a matrix needs for storage, products, traces and text I/O.
    /// Implemented for primitive integers and floats, and sealed to avoid
    /// accidental commitments.
    pub trait Semiring: super::internal::PrimitiveSemiring + Sealed { }

    pub(super) use self::private::Sealed;
    pub(super) mod private {
        pub trait Sealed { }
    }
}

pub use self::ring::Ring;
mod ring {
    use super::Semiring;

    /// Scalars with addition, multiplication, and subtraction.
    ///
    /// Unsigned integers are excluded; they are not closed under negation.
    pub trait Ring: Semiring + super::internal::PrimitiveRing + Sealed { }

    pub(super) use self::private::Sealed;
    pub(super) mod private {
        pub trait Sealed { }
    }
}

pub use self::field::Field;
mod field {
    use super::Ring;

    /// Scalars with division; only `f32` and `f64`.
    ///
    /// Everything that decomposes, inverts, or orthogonalizes a matrix
    /// requires this.
    pub trait Field: Ring + super::internal::PrimitiveFloat + Sealed { }

    pub(super) use self::private::Sealed;
    pub(super) mod private {
        pub trait Sealed { }
    }
}

macro_rules! impl_markers {
    ($Trait:ident, $sealed:path; $($T:ty)*) => {$(
        impl $Trait for $T { }
        impl $sealed for $T { }
    )*};
}

impl_markers!{ Semiring, semiring::Sealed; i32 i64 u32 u64 usize f32 f64 }
impl_markers!{ Ring, ring::Sealed; i32 i64 f32 f64 }
impl_markers!{ Field, field::Sealed; f32 f64 }

/// Arithmetic bounds backing the public marker traits.
///
/// Only public because the marker traits name them as supertraits;
/// nothing outside this crate should need to spell these out.
#[doc(hidden)]
pub mod internal {
    use std::fmt::{Debug, Display};
    use std::ops::{Add, Sub, Mul, Div, Neg, AddAssign, SubAssign, MulAssign, DivAssign};
    use std::str::FromStr;

    pub trait PrimitiveSemiring
        : Sized + Copy + Default + 'static
        + Debug + Display + FromStr
        + PartialEq + PartialOrd
        + Add<Output=Self> + AddAssign
        + Mul<Output=Self> + MulAssign
        + num_traits::Zero
        + num_traits::One
        + std::iter::Sum
    {
        fn from_usize(u: usize) -> Self;
        /// Lossy; integers truncate toward zero.
        fn from_f64(x: f64) -> Self;
        fn to_f64(self) -> f64;
    }

    pub trait PrimitiveRing
        : PrimitiveSemiring
        + Sub<Output=Self> + SubAssign
        + Neg<Output=Self>
    {
        fn abs(self) -> Self;
    }

    pub trait PrimitiveFloat
        : PrimitiveRing
        + Div<Output=Self> + DivAssign
    {
        fn sqrt(self) -> Self;
        fn recip(self) -> Self;
    }

    macro_rules! impl_semiring {
        ($($T:ty)*) => {$(
            impl PrimitiveSemiring for $T {
                #[inline(always)] fn from_usize(u: usize) -> $T { u as $T }
                #[inline(always)] fn from_f64(x: f64) -> $T { x as $T }
                #[inline(always)] fn to_f64(self) -> f64 { self as f64 }
            }
        )*};
    }

    macro_rules! impl_ring {
        ($($T:ty)*) => {$(
            impl PrimitiveRing for $T {
                #[inline(always)] fn abs(self) -> $T { <$T>::abs(self) }
            }
        )*};
    }

    macro_rules! impl_float {
        ($($T:ty)*) => {$(
            impl PrimitiveFloat for $T {
                #[inline(always)] fn sqrt(self) -> $T { <$T>::sqrt(self) }
                #[inline(always)] fn recip(self) -> $T { <$T>::recip(self) }
            }
        )*};
    }

    impl_semiring!{ i32 i64 u32 u64 usize f32 f64 }
    impl_ring!{ i32 i64 f32 f64 }
    impl_float!{ f32 f64 }
}
