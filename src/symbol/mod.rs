//! Categorical values backed by interned integer codes
//!
//! A [`Symbol`] stores only a small integer. The string it stands for lives in
//! the dictionary of its tag's namespace inside the global
//! [`SymbolRegistry`]. Symbols order by code, i.e. by the order in which their
//! strings were first interned, not by string order.
//!
//! ```
//! use nanoframe::Symbol;
//!
//! struct Color;
//!
//! let red = Symbol::<Color>::new("red").unwrap();
//! let blue = Symbol::<Color>::new("blue").unwrap();
//! assert!(red < blue);
//! assert_eq!(red, Symbol::<Color>::new("red").unwrap());
//! ```

pub mod dictionary;
pub mod registry;

use std::any::type_name;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

pub use dictionary::{Dictionary, NULL_CODE};
pub use registry::{registry, SymbolRegistry};

/// Unsigned integer types usable as symbol codes
///
/// The number of distinct strings interned under one tag must stay within
/// `max_value()` of the chosen code type; beyond that interning fails with
/// [`Error::CodeRangeOverflow`].
///
/// The namespace is keyed by tag only: `Symbol<Tag, u8>` and
/// `Symbol<Tag, u16>` share one dictionary, so a narrow code type fails on
/// new strings once a wider one has filled the namespace past its range.
pub trait SymbolCode:
    PrimInt + Unsigned + FromPrimitive + ToPrimitive + Hash + Debug + Send + Sync + 'static
{
}

impl<T> SymbolCode for T where
    T: PrimInt + Unsigned + FromPrimitive + ToPrimitive + Hash + Debug + Send + Sync + 'static
{
}

/// Marker for the null category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NullSymbol;

/// An interned categorical value in the namespace selected by `Tag`
pub struct Symbol<Tag, C = u16> {
    code: C,
    _tag: PhantomData<fn() -> Tag>,
}

impl<Tag, C: SymbolCode> Symbol<Tag, C> {
    /// The null symbol (code 0); does not touch the dictionary
    pub fn null() -> Self {
        Self {
            code: C::zero(),
            _tag: PhantomData,
        }
    }

    /// Underlying integer code
    pub fn code(&self) -> C {
        self.code
    }

    /// True iff this is the null symbol
    pub fn is_null(&self) -> bool {
        self.code.is_zero()
    }

    /// True iff this symbol names an interned string
    pub fn is_valid(&self) -> bool {
        !self.is_null()
    }

    /// Total order over symbols of one tag: by code, i.e. first-seen order
    pub fn compare(&self, other: &Self) -> Ordering {
        self.code.cmp(&other.code)
    }

    fn max_code() -> usize {
        C::max_value().to_usize().unwrap_or(usize::MAX)
    }
}

impl<Tag: 'static, C: SymbolCode> Symbol<Tag, C> {
    /// Intern `s` and return its symbol
    pub fn new(s: &str) -> Result<Self> {
        let limit = Self::max_code();
        let code = registry().intern::<Tag>(s, limit)?;
        let code = C::from_usize(code).ok_or_else(|| Error::CodeRangeOverflow {
            namespace: type_name::<Tag>().to_string(),
            limit,
        })?;

        Ok(Self {
            code,
            _tag: PhantomData,
        })
    }

    /// Intern `Some(s)`, or produce the null symbol for `None`
    pub fn from_option(value: Option<&str>) -> Result<Self> {
        match value {
            Some(s) => Self::new(s),
            None => Ok(Self::null()),
        }
    }

    /// The interned string, or `None` for the null symbol
    pub fn resolve(&self) -> Option<Arc<str>> {
        if self.is_null() {
            return None;
        }
        self.code
            .to_usize()
            .and_then(|code| registry().resolve::<Tag>(code))
    }
}

impl<Tag, C: SymbolCode> Default for Symbol<Tag, C> {
    fn default() -> Self {
        Self::null()
    }
}

impl<Tag, C: SymbolCode> From<NullSymbol> for Symbol<Tag, C> {
    fn from(_: NullSymbol) -> Self {
        Self::null()
    }
}

impl<Tag: 'static, C: SymbolCode> TryFrom<&str> for Symbol<Tag, C> {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl<Tag: 'static, C: SymbolCode> TryFrom<String> for Symbol<Tag, C> {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::new(&s)
    }
}

// Manual impls: `Tag` is a pure marker and needs none of these traits itself.

impl<Tag, C: SymbolCode> Clone for Symbol<Tag, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Tag, C: SymbolCode> Copy for Symbol<Tag, C> {}

impl<Tag, C: SymbolCode> PartialEq for Symbol<Tag, C> {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl<Tag, C: SymbolCode> Eq for Symbol<Tag, C> {}

impl<Tag, C: SymbolCode> PartialOrd for Symbol<Tag, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl<Tag, C: SymbolCode> Ord for Symbol<Tag, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl<Tag, C: SymbolCode> Hash for Symbol<Tag, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl<Tag, C: SymbolCode> Debug for Symbol<Tag, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbol")
            .field("tag", &type_name::<Tag>())
            .field("code", &self.code)
            .finish()
    }
}

impl<Tag: 'static, C: SymbolCode> Display for Symbol<Tag, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolve() {
            Some(s) => f.write_str(&s),
            None => f.write_str("<null>"),
        }
    }
}

impl<Tag: 'static, C: SymbolCode> Serialize for Symbol<Tag, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.resolve() {
            Some(s) => serializer.serialize_str(&s),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de, Tag: 'static, C: SymbolCode> Deserialize<'de> for Symbol<Tag, C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Self::from_option(value.as_deref()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shape;
    struct Tiny;

    #[test]
    fn test_null_symbol() {
        let null: Symbol<Shape> = NullSymbol.into();
        assert!(null.is_null());
        assert!(!null.is_valid());
        assert_eq!(null.code(), 0);
        assert_eq!(null.resolve(), None);
        assert_eq!(null, Symbol::default());
    }

    #[test]
    fn test_code_overflow_is_reported() {
        // u8 codes leave room for 255 categories
        for i in 0..255 {
            let sym = Symbol::<Tiny, u8>::new(&format!("s{}", i)).unwrap();
            assert_eq!(usize::from(sym.code()), i + 1);
        }
        let err = Symbol::<Tiny, u8>::new("one too many").unwrap_err();
        assert!(matches!(err, Error::CodeRangeOverflow { limit: 255, .. }));
        // existing categories are unaffected
        assert_eq!(Symbol::<Tiny, u8>::new("s0").unwrap().code(), 1);
    }

    #[test]
    fn test_debug_names_tag() {
        let sym = Symbol::<Shape>::null();
        let text = format!("{:?}", sym);
        assert!(text.contains("Shape"));
    }
}
