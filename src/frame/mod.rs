//! Applying column logic uniformly across a fixed set of columns
//!
//! A frame is any struct holding equal-length columns. Its schema is a
//! [`ColumnSet`]: an ordered list of named accessors declared once by the
//! caller. Declaration order is the schema order used by every operation.
//!
//! ```
//! use nanoframe::frame::{ColumnAccessor, ColumnSet};
//!
//! struct Trades {
//!     price: Vec<f64>,
//!     qty: Vec<i64>,
//! }
//!
//! let schema = ColumnSet::new(vec![
//!     ColumnAccessor::new("price", |t: &Trades| &t.price, |t: &mut Trades| &mut t.price),
//!     ColumnAccessor::new("qty", |t: &Trades| &t.qty, |t: &mut Trades| &mut t.qty),
//! ])
//! .unwrap();
//!
//! let mut trades = Trades { price: vec![1.5, 2.5, 3.5], qty: vec![10, 20, 30] };
//! schema.take_rows(&mut trades, &[2u32, 0]).unwrap();
//! assert_eq!(trades.qty, vec![30, 10]);
//! ```

use std::collections::HashSet;
use std::fmt;

use crate::column::ColumnData;
use crate::error::{Error, Result};
use crate::index::RowId;

/// Named accessor pair for one column of frame type `F`
pub struct ColumnAccessor<F> {
    name: &'static str,
    get: fn(&F) -> &dyn ColumnData,
    get_mut: fn(&mut F) -> &mut dyn ColumnData,
}

impl<F> ColumnAccessor<F> {
    pub fn new(
        name: &'static str,
        get: fn(&F) -> &dyn ColumnData,
        get_mut: fn(&mut F) -> &mut dyn ColumnData,
    ) -> Self {
        Self { name, get, get_mut }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Borrow the column from `frame`
    pub fn get<'a>(&self, frame: &'a F) -> &'a dyn ColumnData {
        (self.get)(frame)
    }

    /// Mutably borrow the column from `frame`
    pub fn get_mut<'a>(&self, frame: &'a mut F) -> &'a mut dyn ColumnData {
        (self.get_mut)(frame)
    }
}

impl<F> Clone for ColumnAccessor<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for ColumnAccessor<F> {}

impl<F> fmt::Debug for ColumnAccessor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnAccessor")
            .field("name", &self.name)
            .finish()
    }
}

/// Ordered schema of a frame type `F`
pub struct ColumnSet<F> {
    columns: Vec<ColumnAccessor<F>>,
}

impl<F> fmt::Debug for ColumnSet<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl<F> Clone for ColumnSet<F> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<F> ColumnSet<F> {
    /// Create a schema; column names must be unique
    pub fn new(columns: Vec<ColumnAccessor<F>>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name) {
                return Err(Error::DuplicateColumnName(column.name.to_string()));
            }
        }

        Ok(Self { columns })
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in declaration order
    pub fn names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    /// Accessors in declaration order
    pub fn accessors(&self) -> &[ColumnAccessor<F>] {
        &self.columns
    }

    /// Call `f` once per column, in declaration order
    pub fn apply<G>(&self, frame: &F, mut f: G)
    where
        G: FnMut(&str, &dyn ColumnData),
    {
        for column in &self.columns {
            f(column.name, column.get(frame));
        }
    }

    /// Call `f` once per column with mutable access, stopping at the first error
    pub fn apply_mut<G>(&self, frame: &mut F, mut f: G) -> Result<()>
    where
        G: FnMut(&str, &mut dyn ColumnData) -> Result<()>,
    {
        for column in &self.columns {
            f(column.name, column.get_mut(frame))?;
        }
        Ok(())
    }

    /// Call `funcs[k]` on column `k`; one function per column is required
    pub fn for_each(&self, frame: &F, funcs: &mut [&mut dyn FnMut(&dyn ColumnData)]) -> Result<()> {
        self.check_arity(funcs.len())?;

        for (column, func) in self.columns.iter().zip(funcs.iter_mut()) {
            (*func)(column.get(frame));
        }
        Ok(())
    }

    /// Call `f(column_k, &params[k])` for every column
    ///
    /// `params` carries one argument bundle (typically a tuple) per column.
    /// Every column receives the same parameter type `P`; when columns need
    /// differently shaped arguments, make `P` an enum with one variant per
    /// shape and match on it inside `f`.
    pub fn for_each_with<P, G>(&self, frame: &F, mut f: G, params: &[P]) -> Result<()>
    where
        G: FnMut(&dyn ColumnData, &P),
    {
        self.check_arity(params.len())?;

        for (column, param) in self.columns.iter().zip(params) {
            f(column.get(frame), param);
        }
        Ok(())
    }

    /// Call `f(name, left_k, right_k)` for every column position
    pub fn combine<G>(&self, left: &F, right: &F, mut f: G)
    where
        G: FnMut(&str, &dyn ColumnData, &dyn ColumnData),
    {
        for column in &self.columns {
            f(column.name, column.get(left), column.get(right));
        }
    }

    /// Like [`ColumnSet::combine`], with mutable access to `dst`'s columns
    pub fn combine_mut<G>(&self, dst: &mut F, src: &F, mut f: G) -> Result<()>
    where
        G: FnMut(&str, &mut dyn ColumnData, &dyn ColumnData) -> Result<()>,
    {
        for column in &self.columns {
            f(column.name, column.get_mut(dst), column.get(src))?;
        }
        Ok(())
    }

    /// Shared row count of the frame's columns
    ///
    /// Fails with [`Error::InconsistentRowCount`] if the columns disagree.
    pub fn row_count(&self, frame: &F) -> Result<usize> {
        let mut lengths = self.columns.iter().map(|c| c.get(frame).len());
        let Some(expected) = lengths.next() else {
            return Ok(0);
        };

        match lengths.find(|&found| found != expected) {
            Some(found) => Err(Error::InconsistentRowCount { expected, found }),
            None => Ok(expected),
        }
    }

    /// Keep only `rows` (in that order) in every column
    ///
    /// All rows are validated first; on error the frame is unchanged.
    pub fn take_rows<I: RowId>(&self, frame: &mut F, rows: &[I]) -> Result<()> {
        let size = self.row_count(frame)?;
        let rows = rows
            .iter()
            .map(|&row| {
                let index = row.row();
                if index < size {
                    Ok(index)
                } else {
                    Err(Error::IndexOutOfBounds { index, size })
                }
            })
            .collect::<Result<Vec<usize>>>()?;

        log::debug!(
            "taking {} of {} rows across {} columns",
            rows.len(),
            size,
            self.columns.len()
        );
        self.apply_mut(frame, |_, column| column.take_rows(&rows))
    }

    /// Append every column of `src` onto the matching column of `dst`
    ///
    /// Both frames must be internally consistent and hold the same element
    /// type per column; on error `dst` is unchanged.
    pub fn append(&self, dst: &mut F, src: &F) -> Result<()> {
        self.row_count(dst)?;
        self.row_count(src)?;

        for column in &self.columns {
            let (left, right) = (column.get(dst), column.get(src));
            if !left.same_type(right) {
                return Err(Error::ColumnTypeMismatch {
                    name: column.name.to_string(),
                    expected: left.type_name(),
                    found: right.type_name(),
                });
            }
        }

        self.combine_mut(dst, src, |_, left, right| left.extend_from(right))
    }

    fn check_arity(&self, found: usize) -> Result<()> {
        if found != self.columns.len() {
            return Err(Error::ArityMismatch {
                expected: self.columns.len(),
                found,
            });
        }
        Ok(())
    }
}

/// Schema constructors for frames that are plain tuples of columns
macro_rules! tuple_column_set {
    ($n:literal, $tuple:ty, $($column:ident $idx:tt),+) => {
        impl<$($column: ColumnData + 'static),+> ColumnSet<$tuple> {
            /// Schema over every tuple field, in field order, named by `names`
            pub fn tuple(names: [&'static str; $n]) -> Result<Self> {
                Self::new(vec![$(
                    ColumnAccessor::new(
                        names[$idx],
                        |t: &$tuple| &t.$idx,
                        |t: &mut $tuple| &mut t.$idx,
                    ),
                )+])
            }
        }
    };
}

tuple_column_set!(1, (A,), A 0);
tuple_column_set!(2, (A, B), A 0, B 1);
tuple_column_set!(3, (A, B, C), A 0, B 1, C 2);
tuple_column_set!(4, (A, B, C, D), A 0, B 1, C 2, D 3);
tuple_column_set!(5, (A, B, C, D, E), A 0, B 1, C 2, D 3, E 4);
