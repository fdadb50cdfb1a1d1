//! Splits command arguments into a preamble and prefixed option values.
//!
//! # Invariants
//! - Only prefixes in the closed `OptionKey` set are recognised.
//! - A prefix counts only at the start of the text or after whitespace.
//! - Values keep their input order; lookups of single-valued keys use the
//!   last occurrence.

use super::ParseError;

/// Closed set of option prefixes understood by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKey {
    Name,
    Phone,
    Email,
    Address,
    Relationship,
    Tag,
    Policy,
    Expiry,
    Premium,
    Date,
    Time,
    Duration,
    Agenda,
    Notes,
}

impl OptionKey {
    pub const ALL: [OptionKey; 14] = [
        Self::Name,
        Self::Phone,
        Self::Email,
        Self::Address,
        Self::Relationship,
        Self::Tag,
        Self::Policy,
        Self::Expiry,
        Self::Premium,
        Self::Date,
        Self::Time,
        Self::Duration,
        Self::Agenda,
        Self::Notes,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            Self::Name => "n/",
            Self::Phone => "p/",
            Self::Email => "e/",
            Self::Address => "a/",
            Self::Relationship => "r/",
            Self::Tag => "t/",
            Self::Policy => "pol/",
            Self::Expiry => "exp/",
            Self::Premium => "pre/",
            Self::Date => "d/",
            Self::Time => "tm/",
            Self::Duration => "dur/",
            Self::Agenda => "ag/",
            Self::Notes => "no/",
        }
    }
}

/// Tokenized arguments of one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMap {
    preamble: String,
    values: Vec<(OptionKey, String)>,
}

impl ArgumentMap {
    /// Starts an already-tokenized argument map.
    pub fn new(preamble: impl Into<String>) -> Self {
        Self {
            preamble: preamble.into().trim().to_string(),
            values: Vec::new(),
        }
    }

    pub fn with(mut self, key: OptionKey, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: OptionKey, value: impl Into<String>) {
        self.values.push((key, value.into().trim().to_string()));
    }

    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Last value given for `key`.
    pub fn value(&self, key: OptionKey) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn all_values(&self, key: OptionKey) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(candidate, _)| *candidate == key)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    pub fn contains(&self, key: OptionKey) -> bool {
        self.values.iter().any(|(candidate, _)| *candidate == key)
    }

    pub fn has_any(&self, keys: &[OptionKey]) -> bool {
        keys.iter().any(|key| self.contains(*key))
    }

    /// Rejects keys from `single_valued` that were given more than once.
    pub fn verify_no_duplicates(&self, single_valued: &[OptionKey]) -> Result<(), ParseError> {
        let duplicated: Vec<&str> = single_valued
            .iter()
            .filter(|key| self.all_values(**key).len() > 1)
            .map(|key| key.prefix())
            .collect();
        if duplicated.is_empty() {
            Ok(())
        } else {
            Err(ParseError::DuplicatePrefixes(duplicated.join(" ")))
        }
    }
}

/// Tokenizes `args`, the command text after its keyword.
pub fn tokenize(args: &str) -> ArgumentMap {
    let mut starts: Vec<(usize, OptionKey)> = Vec::new();
    for (position, _) in args.char_indices() {
        let at_boundary = position == 0 || args[..position].ends_with(char::is_whitespace);
        if !at_boundary {
            continue;
        }
        if let Some(key) = OptionKey::ALL
            .iter()
            .find(|key| args[position..].starts_with(key.prefix()))
        {
            starts.push((position, *key));
        }
    }

    let preamble_end = starts.first().map_or(args.len(), |(position, _)| *position);
    let mut map = ArgumentMap::new(&args[..preamble_end]);
    for (i, (position, key)) in starts.iter().enumerate() {
        let value_start = position + key.prefix().len();
        let value_end = starts
            .get(i + 1)
            .map_or(args.len(), |(next_position, _)| *next_position);
        map.push(*key, &args[value_start..value_end]);
    }
    map
}
