//! Carry offsets from partition tail sums.

use crate::kernel::exclusive_scan;
use crate::op::Combine;

/// Exclusive scan over `tails`, seeded with the identity.
///
/// `offsets[i]` is the total of every partition before `i`. Runs on the
/// calling thread; the tail count is bounded by the worker count.
pub fn derive_offsets<T, O>(op: &O, tails: &[T]) -> Vec<T>
where
    T: Copy,
    O: Combine<T>,
{
    let mut offsets = vec![op.identity(); tails.len()];
    exclusive_scan(op, tails, &mut offsets);
    offsets
}
