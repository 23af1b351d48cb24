//! Locating the words a passphrase is built from.
//!
//! Sources are tried in a fixed order: an explicit wordlist file, the EFF
//! long list (downloaded once and cached), the first system dictionary that
//! exists, and finally a small built-in list.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::error::{Error, Result};

/// This is the long word list from EFF
/// https://www.eff.org/deeplinks/2016/07/new-wordlists-random-passphrases
pub const EFF_LONG_URL: &str = "https://www.eff.org/files/2016/07/18/eff_large_wordlist.txt";

/// File name the EFF list is cached under when no other path is configured.
pub const DEFAULT_EFF_FILENAME: &str = "eff_large_wordlist.txt";

pub const DEFAULT_DICTIONARY_PATHS: [&str; 2] = ["/usr/share/dict/words", "/usr/dict/words"];

static FALLBACK_WORDS: &str = "
orbit slate lantern harbor cactus wagon ethics copper bundle quiet ribbon falcon magnet
summit violet pocket entropy drift cabin ember signal mango stitch river temple velvet
glacier kettle fossil canopy lunar maple marble meadow memory mirror mobile monarch
mosaic mountain nectar nickel normal object orbit oxygen palace parent phoenix picnic
pocket polar portal power prefer pressure problem process quiet radar ribbon robust
rocket romance routine salmon science secret shadow silver simple solar solid summit
symbol system talent temple theory thunder timber travel tunnel velvet vision vivid
wagon walnut window winter wisdom wonder yellow zenith
";

/// Where a set of raw words came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordOrigin {
    File(PathBuf),
    Eff(PathBuf),
    SystemDictionary(PathBuf),
    Builtin,
}

impl std::fmt::Display for WordOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "wordlist {}", path.display()),
            Self::Eff(path) => write!(f, "EFF long wordlist {}", path.display()),
            Self::SystemDictionary(path) => write!(f, "system dictionary {}", path.display()),
            Self::Builtin => write!(f, "built-in word list"),
        }
    }
}

/// Unfiltered candidate words together with their origin.
#[derive(Debug, Clone)]
pub struct RawWords {
    pub origin: WordOrigin,
    pub words: Vec<String>,
}

/// Everything needed to decide which word source to read.
#[derive(Debug, Clone)]
pub struct SourceRequest {
    /// An explicit wordlist, one word per line. Takes priority over everything else.
    pub wordlist: Option<PathBuf>,
    /// Use the EFF long list, downloading it if `eff_cache` doesn't exist yet.
    pub use_eff: bool,
    pub eff_url: String,
    pub eff_cache: PathBuf,
    /// Candidate system dictionaries, the first one that exists is used.
    pub dictionary_paths: Vec<PathBuf>,
}

impl Default for SourceRequest {
    fn default() -> Self {
        Self {
            wordlist: None,
            use_eff: false,
            eff_url: EFF_LONG_URL.to_owned(),
            eff_cache: PathBuf::from(DEFAULT_EFF_FILENAME),
            dictionary_paths: DEFAULT_DICTIONARY_PATHS
                .iter()
                .map(PathBuf::from)
                .collect(),
        }
    }
}

type Provider = fn(&SourceRequest) -> Result<Option<RawWords>>;

const PROVIDERS: [Provider; 3] = [explicit_wordlist, eff_wordlist, system_dictionary];

/// Reads the raw words from the highest priority source the request allows,
/// falling back to the built-in list.
pub fn resolve(request: &SourceRequest) -> Result<RawWords> {
    for provider in PROVIDERS {
        if let Some(raw) = provider(request)? {
            debug!("reading words from {}", raw.origin);
            return Ok(raw);
        }
    }
    debug!("no wordlist or dictionary found, using the built-in list");
    Ok(builtin())
}

fn explicit_wordlist(request: &SourceRequest) -> Result<Option<RawWords>> {
    match &request.wordlist {
        Some(path) => Ok(Some(RawWords {
            origin: WordOrigin::File(path.clone()),
            words: read_word_file(path)?,
        })),
        None => Ok(None),
    }
}

fn eff_wordlist(request: &SourceRequest) -> Result<Option<RawWords>> {
    if !request.use_eff {
        return Ok(None);
    }

    if !request.eff_cache.exists() {
        download_eff(&request.eff_url, &request.eff_cache)?;
    }

    let text = read_lossy(&request.eff_cache)?;
    Ok(Some(RawWords {
        origin: WordOrigin::Eff(request.eff_cache.clone()),
        words: parse_eff(&text),
    }))
}

fn system_dictionary(request: &SourceRequest) -> Result<Option<RawWords>> {
    match find_dictionary(&request.dictionary_paths) {
        Some(path) => Ok(Some(RawWords {
            words: read_word_file(&path)?,
            origin: WordOrigin::SystemDictionary(path),
        })),
        None => Ok(None),
    }
}

/// The built-in list, used when no other source is available.
pub fn builtin() -> RawWords {
    RawWords {
        origin: WordOrigin::Builtin,
        words: FALLBACK_WORDS
            .split_whitespace()
            .map(String::from)
            .collect(),
    }
}

/// Returns the first of `candidates` that exists.
pub fn find_dictionary(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| p.exists()).cloned()
}

fn read_lossy(path: &Path) -> Result<String> {
    match fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(Error::WordlistNotFound(path.to_path_buf()))
        }
        Err(err) => Err(Error::Io(err)),
    }
}

/// Reads a plain wordlist, one word per line.
///
/// Invalid UTF-8 is replaced rather than rejected, the word filter throws
/// those lines away later.
pub fn read_word_file(path: &Path) -> Result<Vec<String>> {
    let text = read_lossy(path)?;
    Ok(text.lines().map(String::from).collect())
}

/// Extracts the words from the EFF `<dice-index> <word>` format. Lines with
/// fewer than two fields are skipped.
pub fn parse_eff(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(String::from)
        .collect()
}

/// Downloads the wordlist at `url` and stores it verbatim at `dest`.
///
/// The body is read completely and written to a temporary file next to
/// `dest` before being renamed into place, a failed download never leaves a
/// truncated cache behind.
pub fn download_eff(url: &str, dest: &Path) -> Result<()> {
    info!("downloading EFF wordlist from {url}");
    let body = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;

    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(&body)?;
    file.flush()?;
    file.persist(dest)?;

    info!("saved EFF wordlist to {}", dest.display());
    Ok(())
}

#[cfg(test)]
#[path = "tests/source.rs"]
mod test;
