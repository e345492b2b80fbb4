//! Utility for calculating the product of iterators while checking for overflow.
//!
//! Pairs with [`checked_sum::CheckedSum`], for any integer type implementing
//! [`num_traits::CheckedMul`].

use num_traits::{CheckedMul, One};

/// Iterator extension trait for calculating the product of numbers with overflow checking.
pub trait CheckedProduct<T> {
    /// Multiplies numbers in an iterator, checking for overflow.
    /// Returns `None` if overflow occurred. An empty iterator has a product of one.
    fn checked_product(self) -> Option<T>;
}

impl<T, I> CheckedProduct<T> for I
where
    T: CheckedMul + One,
    I: Iterator<Item = T>,
{
    fn checked_product(mut self) -> Option<T> {
        self.try_fold(T::one(), |acc, value| acc.checked_mul(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::CheckedProduct;

    #[test]
    fn multiplies_circuit_sizes() {
        let sizes = [5usize, 4, 2];
        assert_eq!(sizes.into_iter().checked_product(), Some(40));
    }

    #[test]
    fn empty_product_is_one() {
        assert_eq!(std::iter::empty::<u64>().checked_product(), Some(1));
    }

    #[test]
    fn overflow_is_none() {
        assert_eq!([16u8, 16].into_iter().checked_product(), None);
        assert_eq!([i64::MIN, -1].into_iter().checked_product(), None);
    }
}
