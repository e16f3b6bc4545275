//! Phase 2: fold carry offsets into locally scanned partitions.

use crate::error::ScanError;
use crate::exec::Executor;
use crate::op::Combine;
use crate::partition::{split_ranges_mut, Partition};

/// Combine `offsets[i]` into every element of partition `i`, for `i >= 1`.
///
/// Partition 0 is left untouched. One fork-join task per remaining partition.
pub fn apply_offsets<T, O, E>(
    exec: &E,
    op: &O,
    output: &mut [T],
    parts: &[Partition],
    offsets: &[T],
) -> Result<(), ScanError>
where
    T: Copy + Send + Sync,
    O: Combine<T>,
    E: Executor,
{
    if offsets.len() != parts.len() {
        return Err(ScanError::OffsetCount {
            offsets: offsets.len(),
            partitions: parts.len(),
        });
    }

    let views = split_ranges_mut(output, parts)?;

    let tasks: Vec<_> = views
        .into_iter()
        .zip(offsets)
        .skip(1)
        .map(|(dst, &offset)| {
            move || {
                for value in dst.iter_mut() {
                    *value = op.combine(offset, *value);
                }
            }
        })
        .collect();

    log::trace!("apply offsets: {} tasks", tasks.len());
    exec.fork_join(tasks);

    Ok(())
}
