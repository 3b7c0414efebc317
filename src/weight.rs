//! # Edge Weights
//!
//! The graph stores one optional weight per ordered vertex pair. Any numeric
//! primitive can serve as the weight type; this module provides the
//! [`Weight`] trait that abstracts over them.
//!
//! - **`zero()`**: the additive identity, used as the distance from a vertex
//!   to itself.
//! - **`is_positive()`**: the traversal test. Only strictly positive weights
//!   are followed by the path-finding algorithms; zero and negative weights
//!   are stored as written but never traversed.
//! - **`accumulate()`**: path-length addition. Integer weights saturate at
//!   their maximum instead of overflowing.

use duplicate::duplicate;
use std::fmt::{Debug, Display};

pub trait Weight: Copy + PartialOrd + Debug + Display {
    fn zero() -> Self;

    fn is_positive(&self) -> bool;

    fn accumulate(self, other: Self) -> Self;
}

duplicate! {
    [types zero_value;
        [f32] [0.0];
        [f64] [0.0];
        ]

    impl Weight for types {
        fn zero() -> Self {
            zero_value
        }

        fn is_positive(&self) -> bool {
            *self > zero_value
        }

        fn accumulate(self, other: Self) -> Self {
            self + other
        }
    }
}

duplicate! {
    [types;
        [i8]; [i16]; [i32]; [i64]; [i128]; [isize];
        [u8]; [u16]; [u32]; [u64]; [u128]; [usize];
        ]

    impl Weight for types {
        fn zero() -> Self {
            0
        }

        fn is_positive(&self) -> bool {
            *self > 0
        }

        fn accumulate(self, other: Self) -> Self {
            self.saturating_add(other)
        }
    }
}

#[cfg(test)]
mod test {
    use super::Weight;

    #[test]
    fn positivity() {
        assert!(Weight::is_positive(&1.5f64));
        assert!(!Weight::is_positive(&0.0f64));
        assert!(!Weight::is_positive(&-0.0f32));
        assert!(!Weight::is_positive(&(-3i32)));
        assert!(!Weight::is_positive(&0u8));
        assert_eq!(<f64 as Weight>::zero(), 0.0);
        assert_eq!(<u16 as Weight>::zero(), 0);
    }

    #[test]
    fn integer_accumulation_saturates() {
        assert_eq!(u8::MAX.accumulate(1), u8::MAX);
        assert_eq!(i64::MAX.accumulate(i64::MAX), i64::MAX);
        assert_eq!(2.5f32.accumulate(0.5), 3.0);
    }
}
