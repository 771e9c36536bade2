use std::{borrow::Borrow, fmt::Display};

use crate::Show;

/// An atomic token of a grammar or automaton, usually a single character such as `a` or `S`,
/// but short identifiers like `q0` or `expr` are fine as well.
///
/// A symbol has no intrinsic kind. Whether it is a terminal or a non-terminal is decided
/// by the [`crate::Grammar`] it is used in, through membership in the respective set.
///
/// # Example
/// ```
/// use chomsky::Symbol;
/// let a = Symbol::from('a');
/// assert_eq!(a, Symbol::from("a"));
/// assert_eq!(a.to_string(), "a");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol with the given name.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    /// Returns the textual representation of the symbol.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a copy of `self` with a prime appended, `F` becomes `F'`.
    pub(crate) fn primed(&self) -> Self {
        Self(format!("{}'", self.0))
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Symbol> for Symbol {
    fn from(value: &Symbol) -> Self {
        value.clone()
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl Show for Symbol {
    fn show(&self) -> String {
        self.0.clone()
    }

    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        iter.into_iter().map(|s| s.as_str()).collect()
    }
}

/// Splits the given string into single character symbols.
pub fn symbols_of(input: &str) -> Vec<Symbol> {
    input.chars().map(Symbol::from).collect()
}
