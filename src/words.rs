//! Normalization and validation of candidate words.
//!
//! Every word that reaches the passphrase generator has gone through
//! [`filter_words`], so a [`WordList`] is always lowercase, deduplicated and
//! within the configured length bounds.

use std::collections::HashSet;

use log::{debug, warn};

use crate::error::{Error, Result};

/// Default shortest word accepted.
pub const DEFAULT_MIN_LEN: usize = 4;

/// Default longest word accepted.
pub const DEFAULT_MAX_LEN: usize = 10;

/// Lists shorter than this produce a warning, generation still proceeds.
pub const DEFAULT_WARN_THRESHOLD: usize = 500;

/// The rules a candidate word must pass to enter a [`WordList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterRules {
    min_len: usize,
    max_len: usize,
    allow_apostrophe: bool,
}

impl FilterRules {
    /// Creates a rule set, rejecting bounds that can never match a word.
    pub fn new(min_len: usize, max_len: usize, allow_apostrophe: bool) -> Result<Self> {
        if min_len == 0 {
            return Err(Error::Config("minimum word length must be at least 1".to_owned()));
        }
        if min_len > max_len {
            return Err(Error::Config(format!(
                "minimum word length ({min_len}) is larger than the maximum ({max_len})"
            )));
        }
        Ok(Self {
            min_len,
            max_len,
            allow_apostrophe,
        })
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn allow_apostrophe(&self) -> bool {
        self.allow_apostrophe
    }

    /// Tests an already normalized word against the length bounds and the
    /// character class: `[a-z]+`, or `[a-z]+('[a-z]+)?` when apostrophes are
    /// allowed.
    pub fn accepts(&self, word: &str) -> bool {
        let len = word.chars().count();
        if len < self.min_len || len > self.max_len {
            return false;
        }

        if self.allow_apostrophe {
            match word.split_once('\'') {
                Some((head, tail)) => is_lower_alpha(head) && is_lower_alpha(tail),
                None => is_lower_alpha(word),
            }
        } else {
            is_lower_alpha(word)
        }
    }
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_MIN_LEN,
            max_len: DEFAULT_MAX_LEN,
            allow_apostrophe: false,
        }
    }
}

fn is_lower_alpha(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_lowercase())
}

/// Trims surrounding whitespace and lowercases.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// An ordered list of distinct words that all passed a [`FilterRules`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.words.iter()
    }

    /// Logs a warning when the list is too small to give good entropy.
    /// Returns true if the list reached the threshold.
    pub fn check_size(&self, threshold: usize) -> bool {
        if self.words.len() < threshold {
            warn!(
                "wordlist only has {} words, passphrases will be weaker than expected",
                self.words.len()
            );
            return false;
        }
        debug!("using a wordlist of {} words", self.words.len());
        true
    }
}

impl<'a> IntoIterator for &'a WordList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

/// Normalizes every candidate, keeps the ones `rules` accept and drops
/// repeats, keeping the first occurrence in place.
///
/// An empty result is an error, there is nothing to build passphrases from.
pub fn filter_words<I, S>(candidates: I, rules: &FilterRules) -> Result<WordList>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut words = Vec::new();

    for candidate in candidates {
        let word = normalize(candidate.as_ref());
        if rules.accepts(&word) && seen.insert(word.clone()) {
            words.push(word);
        }
    }

    if words.is_empty() {
        return Err(Error::EmptyWordList);
    }

    Ok(WordList { words })
}

#[cfg(test)]
#[path = "tests/words.rs"]
mod test;
