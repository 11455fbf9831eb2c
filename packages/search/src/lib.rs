#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Accent- and case-insensitive substring matching for user records.
//!
//! Upstream data and user-supplied search terms carry accents
//! inconsistently ("São Paulo" vs "sao paulo"), so both sides of every
//! comparison are reduced to a diacritic-free, lower-case form before the
//! substring check.

use unicode_normalization::{UnicodeNormalization as _, char::is_combining_mark};

/// Reduces a string to its accent-free, lower-case form: NFD
/// decomposition, then combining marks dropped, then lower-cased.
#[must_use]
pub fn normalize(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// A set of substring filters applied to a user record.
///
/// Terms are normalized once at construction. An empty term imposes no
/// constraint; non-empty terms must all match (logical AND).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFilter {
    term: String,
    state: String,
    city: String,
}

impl UserFilter {
    /// Creates a filter from raw query terms. `term` is free text matched
    /// against name and email; `state` and `city` match their respective
    /// location fields.
    #[must_use]
    pub fn new(term: &str, state: &str, city: &str) -> Self {
        Self {
            term: normalize(term),
            state: normalize(state),
            city: normalize(city),
        }
    }

    /// Whether the filter imposes any constraint at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.term.is_empty() && self.state.is_empty() && self.city.is_empty()
    }

    /// Checks a user's fields against the filter. Absent `state`/`city`
    /// fields are treated as empty strings, so any non-empty term on them
    /// excludes the record.
    #[must_use]
    pub fn matches(
        &self,
        full_name: &str,
        email: &str,
        state: Option<&str>,
        city: Option<&str>,
    ) -> bool {
        (self.term.is_empty()
            || normalize(full_name).contains(&self.term)
            || normalize(email).contains(&self.term))
            && (self.state.is_empty() || normalize(state.unwrap_or("")).contains(&self.state))
            && (self.city.is_empty() || normalize(city.unwrap_or("")).contains(&self.city))
    }
}
