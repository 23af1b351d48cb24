use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use rand::rngs::OsRng;

use passgen::passphrase_generator::{generate_passphrases, CapsMode};
use passgen::settings::{read_settings, Overrides};
use passgen::{build_word_list, Result};

#[derive(Parser)]
#[command(name = "passgen")]
#[command(about = "Generate high-entropy, memorable passphrases")]
struct Cli {
    /// Number of words in each passphrase (at least 2)
    #[arg(short, long)]
    words: Option<usize>,

    /// Number of passphrases to print
    #[arg(short, long)]
    count: Option<usize>,

    /// Use this separator between words instead of a random one
    #[arg(long)]
    sep: Option<String>,

    /// Characters a random separator is picked from
    #[arg(long)]
    sep_set: Option<String>,

    /// Wordlist file with one word per line
    #[arg(long)]
    wordlist: Option<PathBuf>,

    /// Use the EFF long wordlist, downloading it on first use
    #[arg(long, overrides_with = "no_download_eff")]
    download_eff: bool,

    /// Do not use the EFF long wordlist, even if the settings enable it
    #[arg(long, overrides_with = "download_eff")]
    no_download_eff: bool,

    /// Where the downloaded EFF wordlist is kept
    #[arg(long)]
    eff_cache: Option<PathBuf>,

    /// Shortest word allowed
    #[arg(long)]
    min_len: Option<usize>,

    /// Longest word allowed
    #[arg(long)]
    max_len: Option<usize>,

    /// Accept words with an inner apostrophe, like "don't"
    #[arg(long, overrides_with = "no_allow_apostrophes")]
    allow_apostrophes: bool,

    /// Reject words with an apostrophe, even if the settings allow them
    #[arg(long, overrides_with = "allow_apostrophes")]
    no_allow_apostrophes: bool,

    /// Randomly capitalize whole words or single characters
    #[arg(long, value_enum)]
    rand_caps: Option<CapsMode>,

    /// Insert one random digit
    #[arg(long, overrides_with = "no_nums")]
    nums: bool,

    /// Do not insert a digit, even if the settings ask for one
    #[arg(long, overrides_with = "nums")]
    no_nums: bool,

    /// Settings file, instead of $XDG_CONFIG_HOME/passgen/settings.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    show_config: bool,
}

/// `--flag` / `--no-flag` pairs: the last one given wins, neither leaves the
/// setting alone.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            words: self.words,
            count: self.count,
            separator: self.sep.clone(),
            separator_set: self.sep_set.clone(),
            wordlist: self.wordlist.clone(),
            download_eff: switch(self.download_eff, self.no_download_eff),
            eff_cache: self.eff_cache.clone(),
            min_len: self.min_len,
            max_len: self.max_len,
            allow_apostrophes: switch(self.allow_apostrophes, self.no_allow_apostrophes),
            caps: self.rand_caps,
            nums: switch(self.nums, self.no_nums),
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let xdg_config_home = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);

    let mut settings = read_settings(&cli.config, &home, &xdg_config_home)?;
    settings.apply_overrides(&cli.overrides());

    if cli.show_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    settings.validate()?;
    let rules = settings.filter_rules()?;
    let options = settings.passphrase_options()?;

    let words = build_word_list(&settings.source_request(), &rules, settings.warn_threshold)?;

    let passphrases = generate_passphrases(&words, &options, settings.count, &mut OsRng)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for passphrase in &passphrases {
        writeln!(out, "{}", passphrase.as_str())?;
    }
    out.flush()?;

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
