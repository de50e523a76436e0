// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Contiguous work partitioning

use std::ops::Range;

/// Split `len` items into `workers` contiguous ranges
///
/// Every range but the last holds `len / workers` items; the last one ends
/// at `len` and absorbs the remainder. Ranges may be empty when there are
/// fewer items than workers. Together they cover `[0, len)` exactly once.
///
/// # Panics
///
/// Panics if `workers` is zero
///
/// # Examples
///
/// ```
/// use particle_engine::scheduler::partition;
///
/// assert_eq!(partition(10, 3), vec![0..3, 3..6, 6..10]);
/// assert_eq!(partition(2, 4), vec![0..0, 0..0, 0..0, 0..2]);
/// ```
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    assert!(workers > 0, "worker count must be at least 1");

    let step = len / workers;
    (0..workers)
        .map(|id| {
            let start = step * id;
            let end = if id == workers - 1 { len } else { step * (id + 1) };
            start..end
        })
        .collect()
}

/// Cut `items` into disjoint mutable sub-slices matching `ranges`
///
/// `ranges` must be consecutive and start at zero, as produced by
/// [`partition`].
pub(crate) fn split_ranges<'a, T>(mut items: &'a mut [T], ranges: &[Range<usize>]) -> Vec<&'a mut [T]> {
    let mut parts = Vec::with_capacity(ranges.len());
    let mut offset = 0;

    for range in ranges {
        debug_assert_eq!(range.start, offset, "ranges must be consecutive");
        let (head, tail) = std::mem::take(&mut items).split_at_mut(range.len());
        parts.push(head);
        items = tail;
        offset = range.end;
    }

    parts
}
