//! Phase 1: independent inclusive scans per partition.

use crate::error::ScanError;
use crate::exec::Executor;
use crate::kernel::inclusive_scan;
use crate::op::Combine;
use crate::partition::{split_ranges_mut, Partition};

/// Scan every partition of `input` into the matching range of `output`.
///
/// Each partition is one fork-join task writing only its own output range
/// and its own tail slot. Returns the tail sums, `tails[i] ==
/// output[parts[i].end - 1]`.
pub fn scan_partitions<T, O, E>(
    exec: &E,
    op: &O,
    input: &[T],
    output: &mut [T],
    parts: &[Partition],
) -> Result<Vec<T>, ScanError>
where
    T: Copy + Send + Sync,
    O: Combine<T>,
    E: Executor,
{
    if input.len() != output.len() {
        return Err(ScanError::LengthMismatch {
            input: input.len(),
            output: output.len(),
        });
    }

    let views = split_ranges_mut(output, parts)?;
    let mut tails = vec![op.identity(); parts.len()];

    let tasks: Vec<_> = views
        .into_iter()
        .zip(parts)
        .zip(tails.iter_mut())
        .map(|((dst, part), tail)| {
            let src = &input[part.range()];
            move || *tail = inclusive_scan(op, src, dst)
        })
        .collect();

    log::trace!("local scan: {} tasks", tasks.len());
    exec.fork_join(tasks);

    Ok(tails)
}
