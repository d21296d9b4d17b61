use std::iter::FusedIterator;

use super::{GroupIndex, RowId};

/// One group of a [`GroupIndex`]
///
/// `begin..end` are sorted positions into the index's permutation; the range
/// holds no reference to the index, so it stays valid as a plain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupRange<I = u32> {
    /// Original row id of the group's first member in sorted order
    pub representative: I,
    /// First sorted position of the group
    pub begin: usize,
    /// One past the last sorted position of the group
    pub end: usize,
}

impl<I: RowId> GroupRange<I> {
    /// Number of rows in the group
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    pub fn is_empty(&self) -> bool {
        self.begin >= self.end
    }

    /// Original row ids of the group's members, in original row order
    pub fn rows<'a>(&self, index: &'a GroupIndex<I>) -> &'a [I] {
        index.rows(self)
    }

    /// Call `f` with every member row id of the group
    pub fn for_each_row<F>(&self, index: &GroupIndex<I>, mut f: F)
    where
        F: FnMut(usize),
    {
        for &row in self.rows(index) {
            f(row.row());
        }
    }
}

/// Iterator over the groups of a [`GroupIndex`], in ascending key order
#[derive(Debug, Clone)]
pub struct Groups<'a, I> {
    group_start: &'a [I],
    pos: usize,
}

impl<'a, I: RowId> Groups<'a, I> {
    pub(crate) fn new(group_start: &'a [I]) -> Self {
        Self {
            group_start,
            pos: 0,
        }
    }
}

impl<I: RowId> Iterator for Groups<'_, I> {
    type Item = GroupRange<I>;

    fn next(&mut self) -> Option<Self::Item> {
        let begin = self.pos;
        let representative = *self.group_start.get(begin)?;

        let end = self.group_start[begin..]
            .iter()
            .position(|&head| head != representative)
            .map_or(self.group_start.len(), |offset| begin + offset);
        self.pos = end;

        Some(GroupRange {
            representative,
            begin,
            end,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.group_start.len() - self.pos;
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl<I: RowId> FusedIterator for Groups<'_, I> {}
