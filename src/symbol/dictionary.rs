use std::collections::HashMap;
use std::sync::Arc;

/// Code reserved for the null category; never assigned to a string
pub const NULL_CODE: usize = 0;

/// A growing string-to-code table for a single namespace
///
/// Codes are handed out on first sight, starting at 1, in insertion order.
/// Entries are never removed or renumbered.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    strings: Vec<Arc<str>>,
    codes: HashMap<Arc<str>, usize>,
}

impl Dictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary by interning `strings` in order
    pub fn from_strings<I, S>(strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::new();
        for s in strings {
            dict.intern(s.as_ref());
        }
        dict
    }

    /// Number of interned strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Return the code for `s`, assigning `len() + 1` if it is new
    pub fn intern(&mut self, s: &str) -> usize {
        if let Some(&code) = self.codes.get(s) {
            return code;
        }

        let entry: Arc<str> = s.into();
        self.strings.push(entry.clone());
        let code = self.strings.len();
        self.codes.insert(entry, code);

        log::trace!("interned {:?} as code {}", s, code);
        code
    }

    /// Look up the code of an already interned string without inserting it
    pub fn code_of(&self, s: &str) -> Option<usize> {
        self.codes.get(s).copied()
    }

    /// Map a code back to its string; `None` for the null code or unknown codes
    pub fn resolve(&self, code: usize) -> Option<&Arc<str>> {
        if code == NULL_CODE {
            return None;
        }
        self.strings.get(code - 1)
    }

    /// Iterate `(code, string)` pairs in code order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.strings
            .iter()
            .enumerate()
            .map(|(i, s)| (i + 1, s.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_start_at_one_in_insertion_order() {
        let mut dict = Dictionary::new();
        assert_eq!(dict.intern("red"), 1);
        assert_eq!(dict.intern("blue"), 2);
        assert_eq!(dict.intern("red"), 1);
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_resolve() {
        let dict = Dictionary::from_strings(["x", "y"]);
        assert_eq!(dict.resolve(NULL_CODE), None);
        assert_eq!(dict.resolve(2).map(|s| s.as_ref()), Some("y"));
        assert_eq!(dict.resolve(3), None);
        assert_eq!(dict.code_of("x"), Some(1));
        assert_eq!(dict.code_of("z"), None);
    }

    #[test]
    fn test_iter_in_code_order() {
        let dict = Dictionary::from_strings(["b", "a", "b", "c"]);
        let entries: Vec<_> = dict.iter().collect();
        assert_eq!(entries, vec![(1, "b"), (2, "a"), (3, "c")]);
    }
}
