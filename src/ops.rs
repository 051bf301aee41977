// src/ops.rs
//! The two buffer operations.
//!
//! Both run to completion in a single synchronous call and cannot fail:
//! any incompatibility is rejected while the view is being built.

use crate::view::{BufferView, BufferViewMut};

/// Sum all elements, wrapping modulo 2^64 on overflow
///
/// # Example
///
/// ```
/// use buffer_utils::{ops, BufferView};
///
/// let data = [1u64, 2, 3, 4, 5];
/// assert_eq!(ops::sum(&BufferView::new(&data)), 15);
///
/// let overflow = [u64::MAX, 2];
/// assert_eq!(ops::sum(&BufferView::new(&overflow)), 1);
/// ```
pub fn sum(view: &BufferView<'_>) -> u64 {
    log::trace!("sum over {} elements", view.len());
    sum_slice(view.as_slice())
}

pub fn sum_slice(data: &[u64]) -> u64 {
    data.iter().fold(0u64, |acc, &value| acc.wrapping_add(value))
}

/// Reverse the element order in place
///
/// The element at index `i` moves to index `len - 1 - i`. Nothing is
/// allocated.
///
/// ```
/// use buffer_utils::{ops, BufferViewMut};
///
/// let mut data = [1u64, 2, 3, 4, 5];
/// ops::reverse(&mut BufferViewMut::new(&mut data));
/// assert_eq!(data, [5, 4, 3, 2, 1]);
/// ```
pub fn reverse(view: &mut BufferViewMut<'_>) {
    log::trace!("reverse over {} elements", view.len());
    reverse_slice(view.as_mut_slice());
}

pub fn reverse_slice(data: &mut [u64]) {
    data.reverse();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum() {
        assert_eq!(sum_slice(&[1, 2, 3, 4, 5]), 15);
        assert_eq!(sum_slice(&[]), 0);
        assert_eq!(sum_slice(&[42]), 42);
    }

    #[test]
    fn test_sum_wraps() {
        assert_eq!(sum_slice(&[u64::MAX, 2]), 1);
        assert_eq!(sum_slice(&[u64::MAX, u64::MAX, u64::MAX]), u64::MAX - 2);
    }

    #[test]
    fn test_sum_leaves_buffer_untouched() {
        let data = vec![9u64, 8, 7];
        let view = BufferView::new(&data);
        assert_eq!(sum(&view), 24);
        assert_eq!(data, vec![9, 8, 7]);
    }

    #[test]
    fn test_reverse() {
        let mut data = vec![1u64, 2, 3, 4, 5];
        reverse_slice(&mut data);
        assert_eq!(data, vec![5, 4, 3, 2, 1]);

        let mut even = vec![1u64, 2, 3, 4];
        reverse(&mut BufferViewMut::new(&mut even));
        assert_eq!(even, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_reverse_trivial_lengths() {
        let mut empty: Vec<u64> = Vec::new();
        reverse_slice(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![42u64];
        reverse_slice(&mut single);
        assert_eq!(single, vec![42]);
    }
}
