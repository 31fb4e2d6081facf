use std::cmp::Ordering;

use num_traits::{Bounded, Float};

/// Order in which threshold levels are applied
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Low values first; components grow from minima
    #[default]
    DarkToBright,
    /// High values first; components grow from maxima
    BrightToDark,
}

impl Direction {
    /// Ranks `a` against `b`. `Less` means `a` is flooded earlier.
    /// Incomparable values (NaN) rank as equal.
    pub fn compare<T: PartialOrd>(self, a: &T, b: &T) -> Ordering {
        let ordering = a.partial_cmp(b).unwrap_or(Ordering::Equal);
        match self {
            Direction::DarkToBright => ordering,
            Direction::BrightToDark => ordering.reverse(),
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::DarkToBright => Direction::BrightToDark,
            Direction::BrightToDark => Direction::DarkToBright,
        }
    }

    /// The last level to be flooded, used as the level of the sentinel component
    pub fn max_level<T: Extreme>(self) -> T {
        match self {
            Direction::DarkToBright => T::highest(),
            Direction::BrightToDark => T::lowest(),
        }
    }
}

/// Levels that no pixel value can rank beyond
pub trait Extreme: Copy {
    fn highest() -> Self;
    fn lowest() -> Self;
}

macro_rules! impl_extreme_bounded {
    ($($t:ty),*) => {
        $(
            impl Extreme for $t {
                fn highest() -> Self {
                    <$t as Bounded>::max_value()
                }

                fn lowest() -> Self {
                    <$t as Bounded>::min_value()
                }
            }
        )*
    };
}

macro_rules! impl_extreme_float {
    ($($t:ty),*) => {
        $(
            impl Extreme for $t {
                fn highest() -> Self {
                    <$t as Float>::infinity()
                }

                fn lowest() -> Self {
                    <$t as Float>::neg_infinity()
                }
            }
        )*
    };
}

impl_extreme_bounded!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
impl_extreme_float!(f32, f64);
