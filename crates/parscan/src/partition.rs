//! Splitting `[0, N)` into contiguous, near-equal partitions.

use core::ops::Range;

use crate::error::ScanError;

/// Half-open index range `[start, end)` owned by one unit of work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Partition {
    pub start: usize,
    pub end: usize,
}

impl Partition {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// How a requested worker count was corrected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Clamp {
    /// Non-positive request, raised to a single worker.
    Raised { requested: i32 },
    /// More workers than elements, lowered to one worker per element.
    Lowered { requested: i32, len: usize },
}

/// Worker count after normalization against a sequence length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Normalized {
    pub workers: usize,
    pub len: usize,
    pub clamp: Option<Clamp>,
}

impl Normalized {
    /// Contiguous partitions covering `[0, len)`, one per worker.
    ///
    /// The first `len % workers` partitions hold one extra element.
    pub fn partitions(&self) -> Vec<Partition> {
        if self.workers == 0 {
            return Vec::new();
        }

        let base = self.len / self.workers;
        let remainder = self.len % self.workers;

        let mut parts = Vec::with_capacity(self.workers);
        let mut start = 0;
        for i in 0..self.workers {
            let end = start + base + usize::from(i < remainder);
            parts.push(Partition::new(start, end));
            start = end;
        }
        debug_assert_eq!(start, self.len);
        parts
    }
}

/// Clamp `requested` into `1..=len` (or `0` for an empty sequence).
pub fn normalize(requested: i32, len: usize) -> Normalized {
    if len == 0 {
        return Normalized {
            workers: 0,
            len,
            clamp: None,
        };
    }

    let (workers, clamp) = match usize::try_from(requested) {
        Ok(0) | Err(_) => (1, Some(Clamp::Raised { requested })),
        Ok(k) if k > len => (len, Some(Clamp::Lowered { requested, len })),
        Ok(k) => (k, None),
    };

    Normalized {
        workers,
        len,
        clamp,
    }
}

/// Partition `[0, len)` for `requested` workers.
pub fn partition(len: usize, requested: i32) -> Vec<Partition> {
    normalize(requested, len).partitions()
}

/// Split `buf` into one mutable view per partition.
///
/// The partitions must be in order, contiguous and cover `buf` exactly.
pub fn split_ranges_mut<'a, T>(
    buf: &'a mut [T],
    parts: &[Partition],
) -> Result<Vec<&'a mut [T]>, ScanError> {
    let len = buf.len();
    let mut views = Vec::with_capacity(parts.len());
    let mut rest = buf;
    let mut cursor = 0;

    for (index, part) in parts.iter().enumerate() {
        if part.start != cursor {
            return Err(ScanError::NonContiguous {
                index,
                start: part.start,
                expected: cursor,
            });
        }
        if part.end < part.start {
            return Err(ScanError::Inverted {
                index,
                start: part.start,
                end: part.end,
            });
        }
        if part.end > len {
            return Err(ScanError::Coverage {
                covered: part.end,
                len,
            });
        }

        let (head, tail) = core::mem::take(&mut rest).split_at_mut(part.len());
        views.push(head);
        rest = tail;
        cursor = part.end;
    }

    if cursor != len {
        return Err(ScanError::Coverage {
            covered: cursor,
            len,
        });
    }

    Ok(views)
}
