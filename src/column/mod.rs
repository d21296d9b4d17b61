pub mod ops;

use std::any::{type_name, Any};
use std::fmt::Debug;

use crate::error::{Error, Result};

pub use ops::{filter, transform, transform_scalar, transformed, transformed_scalar};

/// A column: an ordered, index-addressable sequence; row order is insertion order
pub type Column<T> = Vec<T>;

/// Type-erased view of a column, used to treat every column of a frame alike
pub trait ColumnData: Debug + Send + Sync {
    /// Number of rows
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of the element type
    fn type_name(&self) -> &'static str;

    /// Column as `Any`, for downcasting to the concrete column
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// True if `other` holds the same element type
    fn same_type(&self, other: &dyn ColumnData) -> bool;

    /// Replace the contents with `self[rows[0]], self[rows[1]], ...`
    ///
    /// Leaves the column unchanged on error.
    fn take_rows(&mut self, rows: &[usize]) -> Result<()>;

    /// Append every value of `other`, which must hold the same element type
    fn extend_from(&mut self, other: &dyn ColumnData) -> Result<()>;
}

impl<T> ColumnData for Column<T>
where
    T: Clone + Debug + Send + Sync + 'static,
{
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn same_type(&self, other: &dyn ColumnData) -> bool {
        other.as_any().is::<Column<T>>()
    }

    fn take_rows(&mut self, rows: &[usize]) -> Result<()> {
        *self = ops::filter(self, rows)?;
        Ok(())
    }

    fn extend_from(&mut self, other: &dyn ColumnData) -> Result<()> {
        match other.as_any().downcast_ref::<Column<T>>() {
            Some(values) => {
                self.extend_from_slice(values);
                Ok(())
            }
            None => Err(Error::ColumnTypeMismatch {
                name: String::new(),
                expected: type_name::<T>(),
                found: other.type_name(),
            }),
        }
    }
}

impl<'a> dyn ColumnData + 'a {
    /// Downcast to a concrete column
    pub fn downcast_ref<T: 'static>(&self) -> Option<&Column<T>> {
        self.as_any().downcast_ref::<Column<T>>()
    }

    /// Mutable downcast to a concrete column
    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut Column<T>> {
        self.as_any_mut().downcast_mut::<Column<T>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast() {
        let column: Column<f64> = vec![1.0, 2.0];
        let erased: &dyn ColumnData = &column;
        assert_eq!(erased.len(), 2);
        assert_eq!(erased.type_name(), "f64");
        assert!(erased.downcast_ref::<f64>().is_some());
        assert!(erased.downcast_ref::<i64>().is_none());
    }

    #[test]
    fn test_take_rows_is_all_or_nothing() {
        let mut column: Column<i32> = vec![10, 20, 30];
        assert!(column.take_rows(&[2, 5]).is_err());
        assert_eq!(column, vec![10, 20, 30]);

        column.take_rows(&[2, 0, 2]).unwrap();
        assert_eq!(column, vec![30, 10, 30]);
    }

    #[test]
    fn test_extend_from_checks_type() {
        let mut left: Column<i32> = vec![1];
        let right: Column<i32> = vec![2, 3];
        let other: Column<String> = vec!["x".to_string()];

        left.extend_from(&right).unwrap();
        assert_eq!(left, vec![1, 2, 3]);

        let err = left.extend_from(&other).unwrap_err();
        assert!(matches!(err, Error::ColumnTypeMismatch { .. }));
        assert!(!left.same_type(&other));
    }
}
