//! Assembling passphrases from a filtered [`WordList`].
//!
//! Every random decision takes an `Rng + CryptoRng`, the binary passes
//! [`rand::rngs::OsRng`].

use rand::{seq::index, CryptoRng, Rng};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::words::WordList;

/// Fewest words a passphrase may have.
pub const MIN_WORD_COUNT: usize = 2;

pub const DEFAULT_WORD_COUNT: usize = 4;

/// Characters a separator is drawn from when no fixed separator is set.
pub const DEFAULT_SEPARATOR_SET: &str = "!@#$%^&*_-+=:.?/";

/// Each letter has a 1 in `CHAR_CAPS_ODDS` chance of being uppercased in
/// [`CapsMode::Char`].
const CHAR_CAPS_ODDS: u32 = 4;

/// How random capitalization is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CapsMode {
    /// Uppercase a random, non-empty subset of whole words.
    Word,
    /// Uppercase each letter independently.
    Char,
}

/// What joins the words of a passphrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Separator {
    /// The same string for every passphrase.
    Fixed(String),
    /// One character drawn per passphrase.
    OneOf(Vec<char>),
}

impl Separator {
    /// A non-empty `fixed` separator wins, otherwise one character of `set`
    /// is drawn for every passphrase.
    pub fn new(fixed: Option<&str>, set: &str) -> Result<Self> {
        match fixed {
            Some(sep) if !sep.is_empty() => Ok(Self::Fixed(sep.to_owned())),
            _ => {
                let chars: Vec<char> = set.chars().collect();
                if chars.is_empty() {
                    return Err(Error::Config(
                        "separator set is empty and no fixed separator was given".to_owned(),
                    ));
                }
                Ok(Self::OneOf(chars))
            }
        }
    }

    pub fn pick<R: Rng + CryptoRng>(&self, rng: &mut R) -> String {
        match self {
            Self::Fixed(sep) => sep.clone(),
            Self::OneOf(chars) => chars[rng.gen_range(0..chars.len())].to_string(),
        }
    }
}

impl Default for Separator {
    fn default() -> Self {
        Self::OneOf(DEFAULT_SEPARATOR_SET.chars().collect())
    }
}

/// The shape of the passphrases to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassphraseOptions {
    word_count: usize,
    separator: Separator,
    caps: Option<CapsMode>,
    inject_digit: bool,
}

impl PassphraseOptions {
    pub fn new(
        word_count: usize,
        separator: Separator,
        caps: Option<CapsMode>,
        inject_digit: bool,
    ) -> Result<Self> {
        if word_count < MIN_WORD_COUNT {
            return Err(Error::Config(format!(
                "word count must be at least {MIN_WORD_COUNT}, got {word_count}"
            )));
        }
        if matches!(&separator, Separator::OneOf(chars) if chars.is_empty()) {
            return Err(Error::Config("separator set is empty".to_owned()));
        }
        Ok(Self {
            word_count,
            separator,
            caps,
            inject_digit,
        })
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn separator(&self) -> &Separator {
        &self.separator
    }

    pub fn caps(&self) -> Option<CapsMode> {
        self.caps
    }

    pub fn inject_digit(&self) -> bool {
        self.inject_digit
    }
}

/// Uppercases between 1 and `words.len()` distinct words, both the amount
/// and the positions are uniformly random.
pub fn capitalize_words<R: Rng + CryptoRng>(words: &mut [String], rng: &mut R) {
    let n = words.len();
    if n == 0 {
        return;
    }

    let amount = rng.gen_range(1..=n);
    for i in index::sample(rng, n, amount) {
        words[i].make_ascii_uppercase();
    }
}

/// Uppercases every alphabetic character with a probability of 1/4.
pub fn capitalize_chars<R: Rng + CryptoRng>(s: &str, rng: &mut R) -> Zeroizing<String> {
    let mut out = Zeroizing::new(String::with_capacity(s.len()));
    for c in s.chars() {
        if c.is_alphabetic() && rng.gen_range(0..CHAR_CAPS_ODDS) == 0 {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Inserts one random decimal digit at a random character position,
/// both ends included.
pub fn inject_digit<R: Rng + CryptoRng>(s: &mut String, rng: &mut R) {
    let pos = rng.gen_range(0..=s.chars().count());
    let byte_idx = s
        .char_indices()
        .nth(pos)
        .map_or(s.len(), |(i, _)| i);
    let digit = char::from(b'0' + rng.gen_range(0..10u8));
    s.insert(byte_idx, digit);
}

/// Generates one passphrase. Words are drawn independently, so a word may
/// appear more than once.
pub fn generate_passphrase<R: Rng + CryptoRng>(
    words: &WordList,
    options: &PassphraseOptions,
    rng: &mut R,
) -> Zeroizing<String> {
    let list = words.as_slice();
    let separator = options.separator.pick(rng);

    let mut chosen: Zeroizing<Vec<String>> = Zeroizing::new(
        (0..options.word_count)
            .map(|_| list[rng.gen_range(0..list.len())].clone())
            .collect(),
    );

    if options.caps == Some(CapsMode::Word) {
        capitalize_words(&mut chosen, rng);
    }

    let mut passphrase = Zeroizing::new(chosen.join(separator.as_str()));

    if options.caps == Some(CapsMode::Char) {
        passphrase = capitalize_chars(&passphrase, rng);
    }

    if options.inject_digit {
        inject_digit(&mut passphrase, rng);
    }

    passphrase
}

/// Generates `count` independent passphrases.
pub fn generate_passphrases<R: Rng + CryptoRng>(
    words: &WordList,
    options: &PassphraseOptions,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Zeroizing<String>>> {
    if count < 1 {
        return Err(Error::Config(
            "passphrase count must be at least 1".to_owned(),
        ));
    }

    Ok((0..count)
        .map(|_| generate_passphrase(words, options, rng))
        .collect())
}

#[cfg(test)]
#[path = "tests/passphrase_generator.rs"]
mod test;
