//! Sequential scan kernels.

use crate::op::Combine;

/// Sequential inclusive scan: `dst[i] = src[0] ⊕ … ⊕ src[i]`.
///
/// Returns the last written value, or the identity when `src` is empty.
/// `dst` must be at least as long as `src`.
pub fn inclusive_scan<T, O>(op: &O, src: &[T], dst: &mut [T]) -> T
where
    T: Copy,
    O: Combine<T> + ?Sized,
{
    let mut acc = op.identity();
    for (out, &value) in dst.iter_mut().zip(src) {
        acc = op.combine(acc, value);
        *out = acc;
    }
    acc
}

/// Sequential exclusive scan: `dst[0] = identity`, `dst[i] = src[0] ⊕ … ⊕ src[i-1]`.
///
/// Returns the total of `src`.
pub fn exclusive_scan<T, O>(op: &O, src: &[T], dst: &mut [T]) -> T
where
    T: Copy,
    O: Combine<T> + ?Sized,
{
    let mut acc = op.identity();
    for (out, &value) in dst.iter_mut().zip(src) {
        *out = acc;
        acc = op.combine(acc, value);
    }
    acc
}

/// Check `scanned` against a sequential inclusive scan of `input`.
pub fn verify_inclusive<T, O>(op: &O, input: &[T], scanned: &[T]) -> bool
where
    T: Copy + PartialEq,
    O: Combine<T> + ?Sized,
{
    if input.len() != scanned.len() {
        return false;
    }

    let mut acc = op.identity();
    input.iter().zip(scanned).all(|(&value, &got)| {
        acc = op.combine(acc, value);
        got == acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::WrappingAdd;

    #[test]
    fn test_inclusive_scan() {
        let src = [1i64, 2, 3, 4, 5];
        let mut dst = [0i64; 5];
        let total = inclusive_scan(&WrappingAdd, &src, &mut dst);
        assert_eq!(dst, [1, 3, 6, 10, 15]);
        assert_eq!(total, 15);
    }

    #[test]
    fn test_exclusive_scan() {
        let src = [1i64, 2, 3, 4, 5];
        let mut dst = [0i64; 5];
        let total = exclusive_scan(&WrappingAdd, &src, &mut dst);
        assert_eq!(dst, [0, 1, 3, 6, 10]);
        assert_eq!(total, 15);
    }

    #[test]
    fn test_empty_returns_identity() {
        let mut dst: [i64; 0] = [];
        assert_eq!(inclusive_scan(&WrappingAdd, &[], &mut dst), 0);
        assert_eq!(exclusive_scan(&WrappingAdd, &[], &mut dst), 0);
    }

    #[test]
    fn test_negative_values() {
        let src = [5i64, -7, 3, -1];
        let mut dst = [0i64; 4];
        inclusive_scan(&WrappingAdd, &src, &mut dst);
        assert_eq!(dst, [5, -2, 1, 0]);
    }

    #[test]
    fn test_verify_inclusive() {
        let input = [1i64, 2, 3];
        assert!(verify_inclusive(&WrappingAdd, &input, &[1, 3, 6]));
        assert!(!verify_inclusive(&WrappingAdd, &input, &[1, 3, 7]));
        assert!(!verify_inclusive(&WrappingAdd, &input, &[1, 3]));
        assert!(verify_inclusive::<i64, _>(&WrappingAdd, &[], &[]));
    }
}
