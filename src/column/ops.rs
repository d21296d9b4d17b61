//! Elementwise operations over equal-length columns
//!
//! Each fallible operation validates its inputs before writing anything, so a
//! failed call leaves the destination untouched.

use crate::error::{Error, Result};
use crate::index::RowId;

/// Write `dst[i] = f(&dst[i], &src[i])` for every row
///
/// Fails with [`Error::SizeMismatch`] if the lengths differ.
pub fn transform<'a, T, U, F>(dst: &'a mut [T], src: &[U], mut f: F) -> Result<&'a mut [T]>
where
    F: FnMut(&T, &U) -> T,
{
    check_sizes(dst.len(), src.len())?;

    for (d, s) in dst.iter_mut().zip(src) {
        *d = f(d, s);
    }

    Ok(dst)
}

/// Non-mutating [`transform`]: returns a new column, inputs are left as is
pub fn transformed<T, U, F>(dst: &[T], src: &[U], mut f: F) -> Result<Vec<T>>
where
    F: FnMut(&T, &U) -> T,
{
    check_sizes(dst.len(), src.len())?;

    Ok(dst.iter().zip(src).map(|(d, s)| f(d, s)).collect())
}

/// Write `dst[i] = f(&dst[i], value)` for every row
pub fn transform_scalar<'a, T, V, F>(dst: &'a mut [T], value: &V, mut f: F) -> &'a mut [T]
where
    F: FnMut(&T, &V) -> T,
{
    for d in dst.iter_mut() {
        *d = f(d, value);
    }

    dst
}

/// Non-mutating [`transform_scalar`]
pub fn transformed_scalar<T, V, F>(dst: &[T], value: &V, mut f: F) -> Vec<T>
where
    F: FnMut(&T, &V) -> T,
{
    dst.iter().map(|d| f(d, value)).collect()
}

/// Gather `column[indices[k]]` for every `k`
///
/// Fails with [`Error::IndexOutOfBounds`] on the first index past the end of
/// `column`.
pub fn filter<T, I>(column: &[T], indices: &[I]) -> Result<Vec<T>>
where
    T: Clone,
    I: RowId,
{
    indices
        .iter()
        .map(|&i| {
            let row = i.row();
            column.get(row).cloned().ok_or(Error::IndexOutOfBounds {
                index: row,
                size: column.len(),
            })
        })
        .collect()
}

fn check_sizes(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(Error::SizeMismatch { left, right });
    }
    Ok(())
}
