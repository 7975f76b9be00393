//! Element type traits.
//!
//! A buffer stores raw values of one fixed element type. [`Element`] is the
//! bound every buffer needs; [`Numeric`] adds the index conversion used by
//! `arange`-style constructors.

/// A value that can be stored in a panel.
///
/// Panels are plain slices handed out fully initialised, so elements must
/// be `Copy` (moved in and out by value) and `Default` (the fill value of
/// freshly allocated slots). Blanket-implemented for every qualifying type,
/// including fixed-size composites such as `[f32; 3]` or user structs.
pub trait Element: Copy + Default + 'static {}

impl<T: Copy + Default + 'static> Element for T {}

/// A numeric element that can be produced from a position.
///
/// `arange` writes `T::from_index(i)` at position `i`. The conversion is an
/// `as` cast: values wrap (integers) or lose precision (floats) when `i`
/// exceeds what `T` can represent.
pub trait Numeric: Element {
    /// Convert a zero-based position into an element value.
    fn from_index(index: usize) -> Self;
}

macro_rules! impl_numeric {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Numeric for $ty {
                #[inline]
                fn from_index(index: usize) -> Self {
                    index as $ty
                }
            }
        )*
    };
}

impl_numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
