pub mod column;
pub mod config;
pub mod error;
pub mod frame;
pub mod index;
pub mod symbol;

// Re-export commonly used types
pub use column::{
    filter, transform, transform_scalar, transformed, transformed_scalar, Column, ColumnData,
};
pub use config::GroupingConfig;
pub use error::{Error, Result};
pub use frame::{ColumnAccessor, ColumnSet};
pub use index::{GroupIndex, GroupRange, RowId};
pub use symbol::{NullSymbol, Symbol, SymbolCode};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
