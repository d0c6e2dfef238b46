//! Checked integer arithmetic for file offsets

#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("Operation {0:?} + {1:?} failed")]
    AddFailed(Option<u64>, Option<u64>),
    #[error("Operation {0:?} - {1:?} failed")]
    SubFailed(Option<u64>, Option<u64>),
    #[error("Operation {0:?} * {1:?} failed")]
    MulFailed(Option<u64>, Option<u64>),
    #[error("Conversion failed for value {0:?}")]
    ConversionFailed(Option<u64>),
}

/// Container for chained checked operations
///
/// The first failing operation is kept and all following operations are
/// skipped.
///
/// ```
/// # use remodel_common::math::Checked;
/// let x = Checked::new(2_u32);
/// let y = Checked::new(3_u32);
///
/// assert_eq!((x + y).check(), Ok(5));
/// assert!((Checked::new(u32::MAX) + 1_u32).check().is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Checked<T>(Result<T, MathError>);

impl<T> Checked<T> {
    pub fn new(val: T) -> Self {
        Self(Ok(val))
    }

    pub fn check(self) -> Result<T, MathError> {
        self.0
    }
}

impl<T> From<T> for Checked<T> {
    fn from(val: T) -> Self {
        Self(Ok(val))
    }
}

/// Redefines variables as [`Checked`]
///
/// ```
/// use remodel_common::math::checked;
///
/// let ifd = 8_u32;
/// let index = 2_u32;
/// checked![ifd, index];
///
/// assert_eq!((ifd + 2_u32 + index * 12_u32).check(), Ok(34));
/// ```
#[macro_export]
macro_rules! checked [
    ($($v:ident$(,)?)*) => {
        $( let $v = $crate::math::Checked::new($v); )*
    };
];

pub use checked;

macro_rules! impl_operator {
    ($op:ident, $f:ident, $t:ty) => {
        paste::paste! {
            impl [< Safe $op >] for $t {
                fn [< safe_ $f >](self, rhs: $t) -> Result<$t, MathError> {
                    let err = || MathError:: [< $op Failed >] (self.try_into().ok(), rhs.try_into().ok());
                    self.[< checked_ $f >](rhs)
                        .ok_or_else(err)
                }
            }
        }

        impl<R: Into<Self> + Copy> std::ops::$op<R> for Checked<$t> {
            type Output = Self;

            #[inline]
            fn $f(self, rhs: R) -> Self::Output {
                let Checked(Ok(x)) = self else { return self };
                let Checked(Ok(y)) = rhs.into() else { return rhs.into() };
                paste::paste! {
                    Checked(x.[< safe_ $f >](y))
                }
            }
        }
    };
}

macro_rules! impl_binary_operators {
    ($t:ty) => {
        impl_operator!(Add, add, $t);
        impl_operator!(Sub, sub, $t);
        impl_operator!(Mul, mul, $t);
    };
}

impl_binary_operators!(u16);
impl_binary_operators!(u32);
impl_binary_operators!(u64);
impl_binary_operators!(usize);

/// Same as `checked_add` functions but returns an error
pub trait SafeAdd: Sized {
    fn safe_add(self, rhs: Self) -> Result<Self, MathError>;
}

/// Same as `checked_sub` functions but returns an error
pub trait SafeSub: Sized {
    fn safe_sub(self, rhs: Self) -> Result<Self, MathError>;
}

/// Same as `checked_mul` functions but returns an error
pub trait SafeMul: Sized {
    fn safe_mul(self, rhs: Self) -> Result<Self, MathError>;
}

macro_rules! conversion_trait {
    ($trait_:ident, $f:ident, $target:ty, [$($from:ty),*]) => {
        pub trait $trait_: Sized + TryInto<$target> + TryInto<u64> + Copy {
            fn $f(self) -> Result<$target, MathError> {
                self.try_into()
                    .map_err(|_| MathError::ConversionFailed(self.try_into().ok()))
            }
        }

        $( impl $trait_ for $from {} )*
    };
}

conversion_trait!(ToU32, u32, u32, [u16, u64, usize]);
conversion_trait!(ToU64, u64, u64, [u16, u32, usize]);
conversion_trait!(ToUsize, usize, usize, [u16, u32, u64]);
