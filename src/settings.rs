use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::passphrase_generator::{
    CapsMode, PassphraseOptions, Separator, DEFAULT_SEPARATOR_SET, DEFAULT_WORD_COUNT,
};
use crate::source::{SourceRequest, DEFAULT_DICTIONARY_PATHS, DEFAULT_EFF_FILENAME, EFF_LONG_URL};
use crate::words::{FilterRules, DEFAULT_MAX_LEN, DEFAULT_MIN_LEN, DEFAULT_WARN_THRESHOLD};

/// Prefix of the environment variables that override the settings file.
pub const ENV_PREFIX: &str = "PASSGEN";

/// Everything that controls a run, after the settings file and environment
/// have been merged over the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub words: usize,
    pub count: usize,
    pub separator: Option<String>,
    pub separator_set: String,
    pub wordlist: Option<PathBuf>,
    pub download_eff: bool,
    pub eff_url: String,
    pub eff_cache: PathBuf,
    pub min_len: usize,
    pub max_len: usize,
    pub allow_apostrophes: bool,
    pub caps: Option<CapsMode>,
    pub nums: bool,
    pub warn_threshold: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORD_COUNT,
            count: 1,
            separator: None,
            separator_set: DEFAULT_SEPARATOR_SET.to_owned(),
            wordlist: None,
            download_eff: false,
            eff_url: EFF_LONG_URL.to_owned(),
            eff_cache: PathBuf::from(DEFAULT_EFF_FILENAME),
            min_len: DEFAULT_MIN_LEN,
            max_len: DEFAULT_MAX_LEN,
            allow_apostrophes: false,
            caps: None,
            nums: false,
            warn_threshold: DEFAULT_WARN_THRESHOLD,
        }
    }
}

/// Values given on the command line. `None` leaves the setting as read from
/// the file and environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub words: Option<usize>,
    pub count: Option<usize>,
    pub separator: Option<String>,
    pub separator_set: Option<String>,
    pub wordlist: Option<PathBuf>,
    pub download_eff: Option<bool>,
    pub eff_cache: Option<PathBuf>,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub allow_apostrophes: Option<bool>,
    pub caps: Option<CapsMode>,
    pub nums: Option<bool>,
}

impl Settings {
    /// Command line values win over the settings file and the environment.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(words) = overrides.words {
            self.words = words;
        }
        if let Some(count) = overrides.count {
            self.count = count;
        }
        if overrides.separator.is_some() {
            self.separator = overrides.separator.clone();
        }
        if let Some(separator_set) = &overrides.separator_set {
            self.separator_set = separator_set.clone();
        }
        if overrides.wordlist.is_some() {
            self.wordlist = overrides.wordlist.clone();
        }
        if let Some(download_eff) = overrides.download_eff {
            self.download_eff = download_eff;
        }
        if let Some(eff_cache) = &overrides.eff_cache {
            self.eff_cache = eff_cache.clone();
        }
        if let Some(min_len) = overrides.min_len {
            self.min_len = min_len;
        }
        if let Some(max_len) = overrides.max_len {
            self.max_len = max_len;
        }
        if let Some(allow_apostrophes) = overrides.allow_apostrophes {
            self.allow_apostrophes = allow_apostrophes;
        }
        if overrides.caps.is_some() {
            self.caps = overrides.caps;
        }
        if let Some(nums) = overrides.nums {
            self.nums = nums;
        }
    }

    pub fn filter_rules(&self) -> Result<FilterRules> {
        FilterRules::new(self.min_len, self.max_len, self.allow_apostrophes)
    }

    pub fn passphrase_options(&self) -> Result<PassphraseOptions> {
        let separator = Separator::new(self.separator.as_deref(), &self.separator_set)?;
        PassphraseOptions::new(self.words, separator, self.caps, self.nums)
    }

    pub fn source_request(&self) -> SourceRequest {
        SourceRequest {
            wordlist: self.wordlist.clone(),
            use_eff: self.download_eff,
            eff_url: self.eff_url.clone(),
            eff_cache: self.eff_cache.clone(),
            dictionary_paths: DEFAULT_DICTIONARY_PATHS
                .iter()
                .map(PathBuf::from)
                .collect(),
        }
    }

    /// Checks every numeric setting, so a bad configuration is reported
    /// before any wordlist is read or downloaded.
    pub fn validate(&self) -> Result<()> {
        if self.count < 1 {
            return Err(Error::Config(format!(
                "passphrase count must be at least 1, got {}",
                self.count
            )));
        }
        self.filter_rules()?;
        self.passphrase_options()?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

/// Where the settings file lives, `$XDG_CONFIG_HOME/passgen/settings.toml` or
/// `$HOME/.config/passgen/settings.toml`.
pub fn xdg_config_file_location(
    home: &Option<PathBuf>,
    xdg_config_home: &Option<PathBuf>,
) -> Option<PathBuf> {
    match xdg_config_home {
        Some(config_home) => Some(config_home.join("passgen").join("settings.toml")),
        None => home
            .as_ref()
            .map(|home| home.join(".config").join("passgen").join("settings.toml")),
    }
}

/// The TOML settings file at `path`.
pub fn file_settings(path: &Path, required: bool) -> impl config::Source + Send + Sync {
    config::File::from(path.to_path_buf()).required(required)
}

/// Reads the settings: defaults, then the settings file, then `PASSGEN_*`
/// environment variables.
///
/// An explicit `config_file` must exist, the XDG location is optional.
pub fn read_settings(
    config_file: &Option<PathBuf>,
    home: &Option<PathBuf>,
    xdg_config_home: &Option<PathBuf>,
) -> Result<Settings> {
    let mut settings = config::Config::default();

    match config_file {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "settings file {} does not exist",
                    path.display()
                )));
            }
            settings.merge(file_settings(path, true))?;
        }
        None => {
            if let Some(path) = xdg_config_file_location(home, xdg_config_home) {
                settings.merge(file_settings(&path, false))?;
            }
        }
    }

    settings.merge(config::Environment::with_prefix(ENV_PREFIX))?;

    let settings: Settings = settings.try_into()?;
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/settings.rs"]
mod test;
