/// Finding the raw words: an explicit file, the EFF long list, a system dictionary or the
/// built-in list.
pub mod source;
/// Normalizes candidate words and keeps the ones that fit the length and character rules.
pub mod words;
/// This is the library that handles passphrase generation, based on the long word list from EFF
/// https://www.eff.org/deeplinks/2016/07/new-wordlists-random-passphrases
pub mod passphrase_generator;
/// Settings file and environment handling.
pub mod settings;

mod error;

pub use crate::error::{Error, Result};

/// Reads the words from the source `request` selects and filters them with `rules`.
///
/// A list shorter than `warn_threshold` is only logged as a warning.
pub fn build_word_list(
    request: &source::SourceRequest,
    rules: &words::FilterRules,
    warn_threshold: usize,
) -> Result<words::WordList> {
    let raw = source::resolve(request)?;
    let list = words::filter_words(&raw.words, rules)?;
    list.check_size(warn_threshold);
    Ok(list)
}
