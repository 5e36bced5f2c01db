// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typeahead helper: accumulate printable keystrokes and match them against item labels.
//!
//! ## Usage
//!
//! 1) Implement [`TypeaheadSource`] for your item collection (slices of strings
//!    already implement it).
//! 2) Feed each printable character to [`TypeaheadState::on_char`] along with a
//!    monotonic timestamp.
//! 3) Interpret [`TypeaheadResult::Matched`] however your widget needs: move a
//!    highlight, preselect a value, scroll a list.
//!
//! Keystrokes that arrive within the timeout of the previous one extend the
//! search string; a longer pause starts a new search. Matching is a
//! case-insensitive prefix test.
//!
//! ## Minimal example
//!
//! ```
//! use understory_event_state::typeahead::{TypeaheadResult, TypeaheadState};
//!
//! let fruits = ["Apple", "Apricot", "Banana"];
//! let mut typeahead = TypeaheadState::new(750);
//!
//! assert_eq!(typeahead.on_char('a', 1000, &fruits[..]), TypeaheadResult::Matched(0));
//! assert_eq!(typeahead.on_char('p', 1100, &fruits[..]), TypeaheadResult::Matched(0));
//! assert_eq!(typeahead.on_char('r', 1200, &fruits[..]), TypeaheadResult::Matched(1));
//! assert!(typeahead.is_typing(1300));
//!
//! // After a pause, a new search starts.
//! assert_eq!(typeahead.on_char('b', 3000, &fruits[..]), TypeaheadResult::Matched(2));
//! ```

use alloc::string::String;

/// A collection of labelled items searched by [`TypeaheadState`].
pub trait TypeaheadSource {
    /// Number of items.
    fn item_count(&self) -> usize;

    /// Label of the item at `index`, if it has one.
    fn label(&self, index: usize) -> Option<&str>;

    /// Whether the item at `index` is skipped by matching.
    fn is_disabled(&self, index: usize) -> bool {
        let _ = index;
        false
    }
}

impl<S: AsRef<str>> TypeaheadSource for [S] {
    fn item_count(&self) -> usize {
        self.len()
    }

    fn label(&self, index: usize) -> Option<&str> {
        self.get(index).map(AsRef::as_ref)
    }
}

/// Where a search starts in the item list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMatch {
    /// Always search from the first item; the first matching item wins.
    #[default]
    FromStart,
    /// Start after the item matched by the previous search and wrap around.
    ///
    /// Repeating a single letter then cycles through the items starting with
    /// it, unless some label begins with a doubled letter (for example
    /// "Llama"), in which case repeated letters are kept as a search string.
    Cycle,
}

/// Outcome of feeding one character to [`TypeaheadState::on_char`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeaheadResult {
    /// The search string matches the item at this index.
    Matched(usize),
    /// The character was consumed but nothing matches; the search restarts.
    NoMatch,
    /// The character does not take part in typeahead (a space outside of a
    /// search). Callers should process it as a regular key.
    Ignored,
}

/// Typeahead search state.
#[derive(Clone, Debug)]
pub struct TypeaheadState {
    buffer: String,
    last_key_at: Option<u64>,
    last_match: Option<usize>,
    prev_match: Option<usize>,
    timeout: u64,
    wrap: WrapMatch,
}

impl TypeaheadState {
    /// Creates a typeahead state with the given inter-keystroke timeout.
    #[must_use]
    pub fn new(timeout: u64) -> Self {
        Self {
            buffer: String::new(),
            last_key_at: None,
            last_match: None,
            prev_match: None,
            timeout,
            wrap: WrapMatch::default(),
        }
    }

    /// Sets the search start policy.
    #[must_use]
    pub fn with_wrap(mut self, wrap: WrapMatch) -> Self {
        self.wrap = wrap;
        self
    }

    /// Returns the inter-keystroke timeout.
    #[must_use]
    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    /// Returns the search start policy.
    #[must_use]
    pub fn wrap(&self) -> WrapMatch {
        self.wrap
    }

    /// Returns the current search string.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Returns `true` while a search string is being composed at `now`.
    ///
    /// Widgets use this to treat a space as part of the search rather than as
    /// an activation key.
    #[must_use]
    pub fn is_typing(&self, now: u64) -> bool {
        !self.buffer.is_empty() && !self.expired(now)
    }

    /// Forgets the search string and any previous match.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.last_key_at = None;
        self.last_match = None;
        self.prev_match = None;
    }

    /// Feeds one printable character typed at `now`.
    pub fn on_char<S>(&mut self, ch: char, now: u64, source: &S) -> TypeaheadResult
    where
        S: TypeaheadSource + ?Sized,
    {
        if self.expired(now) {
            self.end_search();
        }
        if self.buffer.is_empty() && ch == ' ' {
            return TypeaheadResult::Ignored;
        }

        if self.wrap == WrapMatch::Cycle && allows_rapid_first_letter(source) {
            let mut chars = self.buffer.chars();
            if chars.next().is_some_and(|c| eq_ignore_case(c, ch)) && chars.next().is_none() {
                self.end_search();
            }
        }

        self.buffer.push(ch);
        self.last_key_at = Some(now);

        let start = match self.wrap {
            WrapMatch::FromStart => 0,
            WrapMatch::Cycle => self.prev_match.map_or(0, |i| i + 1),
        };
        match find_match(source, &self.buffer, start) {
            Some(index) => {
                self.last_match = Some(index);
                TypeaheadResult::Matched(index)
            }
            None => {
                if ch != ' ' {
                    self.end_search();
                }
                TypeaheadResult::NoMatch
            }
        }
    }

    fn expired(&self, now: u64) -> bool {
        self.last_key_at
            .is_some_and(|at| now.saturating_sub(at) >= self.timeout)
    }

    fn end_search(&mut self) {
        self.buffer.clear();
        self.last_key_at = None;
        self.prev_match = self.last_match;
    }
}

fn find_match<S>(source: &S, prefix: &str, start: usize) -> Option<usize>
where
    S: TypeaheadSource + ?Sized,
{
    let len = source.item_count();
    if len == 0 {
        return None;
    }
    let start = start % len;
    (0..len)
        .map(|step| (start + step) % len)
        .filter(|&i| !source.is_disabled(i))
        .find(|&i| {
            source
                .label(i)
                .is_some_and(|label| starts_with_ignore_case(label, prefix))
        })
}

fn allows_rapid_first_letter<S>(source: &S) -> bool
where
    S: TypeaheadSource + ?Sized,
{
    (0..source.item_count()).all(|i| {
        let Some(label) = source.label(i) else {
            return true;
        };
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (Some(a), Some(b)) => !eq_ignore_case(a, b),
            _ => true,
        }
    })
}

fn eq_ignore_case(a: char, b: char) -> bool {
    a.to_lowercase().eq(b.to_lowercase())
}

fn starts_with_ignore_case(label: &str, prefix: &str) -> bool {
    let mut label = label.chars().flat_map(char::to_lowercase);
    prefix
        .chars()
        .flat_map(char::to_lowercase)
        .all(|p| label.next() == Some(p))
}
