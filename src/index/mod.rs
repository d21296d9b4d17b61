//! Sort-based grouping index
//!
//! A [`GroupIndex`] stably sorts row ids by key so that rows with equal keys
//! become contiguous, then records for every sorted position the original row
//! id of its group's first member. Aggregation is left to the caller, who
//! walks the groups and reduces whatever columns it needs.

mod range;

pub use range::{GroupRange, Groups};

use std::fmt::Debug;
use std::hash::Hash;

use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};
use rayon::prelude::*;

use crate::config::GroupingConfig;
use crate::error::{Error, Result};

/// Unsigned integer types usable as row ids
pub trait RowId:
    PrimInt + Unsigned + FromPrimitive + ToPrimitive + Hash + Debug + Send + Sync + 'static
{
    /// Convert a row position, `None` if it does not fit
    fn from_row(row: usize) -> Option<Self> {
        Self::from_usize(row)
    }

    /// Row position as `usize`
    fn row(self) -> usize {
        self.to_usize().unwrap_or(usize::MAX)
    }
}

impl<T> RowId for T where
    T: PrimInt + Unsigned + FromPrimitive + ToPrimitive + Hash + Debug + Send + Sync + 'static
{
}

/// Grouping index over `n` rows
///
/// Invariants:
/// - `permutation` is a permutation of `0..n`, stably sorted by key
/// - `group_start[i]` is the row id heading the group at sorted position `i`;
///   two positions share a value iff they belong to the same group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupIndex<I = u32> {
    permutation: Vec<I>,
    group_start: Vec<I>,
    group_count: usize,
}

impl<I: RowId> GroupIndex<I> {
    /// Build an index over rows `0..n`, grouping by `key_of(row)`
    ///
    /// Multi-column grouping composes the key in `key_of`, e.g.
    /// `|row| (a[row], b[row])`. Sorting runs on the calling thread.
    pub fn build<K, F>(n: usize, key_of: F) -> Result<Self>
    where
        K: Ord,
        F: Fn(usize) -> K,
    {
        let mut permutation = identity::<I>(n)?;
        permutation.sort_by(|a, b| key_of(a.row()).cmp(&key_of(b.row())));

        let index = Self::from_sorted(permutation, &key_of);
        log::debug!(
            "built group index over {} rows: {} groups (sequential sort)",
            n,
            index.group_count
        );
        Ok(index)
    }

    /// Build an index, sorting on the rayon pool when `config` allows it
    ///
    /// The result is identical to [`GroupIndex::build`].
    pub fn build_with_config<K, F>(n: usize, key_of: F, config: &GroupingConfig) -> Result<Self>
    where
        K: Ord,
        F: Fn(usize) -> K + Sync,
    {
        if !config.should_parallelize(n) {
            return Self::build(n, key_of);
        }

        let mut permutation = identity::<I>(n)?;
        // par_sort_by is a stable merge sort
        permutation.par_sort_by(|a, b| key_of(a.row()).cmp(&key_of(b.row())));

        let index = Self::from_sorted(permutation, &key_of);
        log::debug!(
            "built group index over {} rows: {} groups (parallel sort)",
            n,
            index.group_count
        );
        Ok(index)
    }

    /// Derive group heads from an already sorted permutation in one pass
    fn from_sorted<K, F>(permutation: Vec<I>, key_of: &F) -> Self
    where
        K: Ord,
        F: Fn(usize) -> K,
    {
        let mut group_start = Vec::with_capacity(permutation.len());
        let mut group_count = 0;
        let mut head = 0;
        let mut head_key: Option<K> = None;

        for (pos, &row) in permutation.iter().enumerate() {
            let key = key_of(row.row());
            let same_group = matches!(&head_key, Some(k) if *k == key);
            if !same_group {
                head = pos;
                head_key = Some(key);
                group_count += 1;
            }
            group_start.push(permutation[head]);
        }

        Self {
            permutation,
            group_start,
            group_count,
        }
    }

    /// Number of indexed rows
    pub fn len(&self) -> usize {
        self.permutation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permutation.is_empty()
    }

    /// Number of distinct keys
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Row ids in sorted key order
    pub fn permutation(&self) -> &[I] {
        &self.permutation
    }

    /// Group head for every sorted position
    pub fn group_starts(&self) -> &[I] {
        &self.group_start
    }

    /// Iterate groups in ascending key order
    pub fn groups(&self) -> Groups<'_, I> {
        Groups::new(&self.group_start)
    }

    /// Call `f` once per group, in ascending key order
    pub fn for_each_group<F>(&self, f: F) -> &Self
    where
        F: FnMut(GroupRange<I>),
    {
        self.groups().for_each(f);
        self
    }

    /// Member row ids of `range`; empty if the range does not belong to this index
    pub fn rows(&self, range: &GroupRange<I>) -> &[I] {
        self.permutation.get(range.begin..range.end).unwrap_or(&[])
    }

    /// One row id per group, in ascending key order
    pub fn representatives(&self) -> Vec<I> {
        let mut heads = self.group_start.clone();
        heads.dedup();
        heads
    }

    /// Size of every group, in ascending key order
    pub fn group_sizes(&self) -> Vec<usize> {
        self.groups().map(|group| group.len()).collect()
    }
}

fn identity<I: RowId>(n: usize) -> Result<Vec<I>> {
    (0..n)
        .map(I::from_row)
        .collect::<Option<Vec<I>>>()
        .ok_or_else(|| Error::RowIdOverflow {
            rows: n,
            limit: I::max_value()
                .to_usize()
                .map_or(usize::MAX, |max| max.saturating_add(1)),
        })
}
