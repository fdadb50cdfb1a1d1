//! Display index shared by the parser and commands.

use std::fmt::{Display, Formatter};

/// Position in a displayed list, stored zero-based and shown one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Index(usize);

impl Index {
    pub fn from_zero_based(zero_based: usize) -> Self {
        Self(zero_based)
    }

    /// Returns `None` for `0`, which has no one-based meaning.
    pub fn from_one_based(one_based: usize) -> Option<Self> {
        one_based.checked_sub(1).map(Self)
    }

    pub fn zero_based(self) -> usize {
        self.0
    }

    pub fn one_based(self) -> usize {
        self.0 + 1
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.one_based())
    }
}
