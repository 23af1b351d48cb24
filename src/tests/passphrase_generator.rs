use super::*;

use rand::rngs::{OsRng, StdRng};
use rand::SeedableRng;

use crate::words::{filter_words, FilterRules};

fn alpha_beta() -> WordList {
    filter_words(["alpha", "beta"], &FilterRules::default()).unwrap()
}

fn planets() -> WordList {
    filter_words(
        ["mercury", "venus", "earth", "mars", "jupiter", "saturn", "uranus", "neptune"],
        &FilterRules::default(),
    )
    .unwrap()
}

fn fixed(sep: &str) -> Separator {
    Separator::new(Some(sep), DEFAULT_SEPARATOR_SET).unwrap()
}

#[test]
fn word_count_below_two_rejected() {
    for count in [0, 1] {
        let result = PassphraseOptions::new(count, Separator::default(), None, false);
        assert!(matches!(result, Err(Error::Config(_))), "count {count}");
    }
}

#[test]
fn word_count_two_accepted() {
    let options = PassphraseOptions::new(MIN_WORD_COUNT, Separator::default(), None, false);
    assert!(options.is_ok());
}

#[test]
fn empty_separator_set_rejected() {
    assert!(matches!(Separator::new(None, ""), Err(Error::Config(_))));
}

#[test]
fn empty_one_of_separator_rejected() {
    let result = PassphraseOptions::new(2, Separator::OneOf(vec![]), None, false);

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn empty_fixed_separator_falls_back_to_set() {
    assert_eq!(
        Separator::OneOf(vec!['+', '=']),
        Separator::new(Some(""), "+=").unwrap()
    );
}

#[test]
fn fixed_separator_wins_over_set() {
    assert_eq!(Separator::Fixed("--".to_owned()), fixed("--"));
}

#[test]
fn separator_drawn_from_set() {
    let sep = Separator::new(None, "#:").unwrap();
    for _ in 0..50 {
        let picked = sep.pick(&mut OsRng);
        assert!(picked == "#" || picked == ":", "unexpected separator {picked}");
    }
}

#[test]
fn alpha_beta_with_fixed_separator() {
    let words = alpha_beta();
    let options = PassphraseOptions::new(2, fixed("-"), None, false).unwrap();

    for _ in 0..100 {
        let pp = generate_passphrase(&words, &options, &mut OsRng);
        let parts: Vec<&str> = pp.split('-').collect();
        assert_eq!(2, parts.len(), "{}", pp.as_str());
        for part in parts {
            assert!(part == "alpha" || part == "beta", "{}", pp.as_str());
        }
    }
}

#[test]
fn word_count_respected_with_random_separator() {
    let words = planets();
    let options = PassphraseOptions::new(6, Separator::default(), None, false).unwrap();

    for _ in 0..100 {
        let pp = generate_passphrase(&words, &options, &mut OsRng);
        let sep = pp
            .chars()
            .find(|c| !c.is_ascii_lowercase())
            .expect("passphrase has a separator");
        assert!(DEFAULT_SEPARATOR_SET.contains(sep));
        assert_eq!(6, pp.split(sep).count(), "{}", pp.as_str());
    }
}

#[test]
fn repeated_words_are_allowed() {
    let words = filter_words(["solitary"], &FilterRules::default()).unwrap();
    let options = PassphraseOptions::new(3, fixed(" "), None, false).unwrap();

    let pp = generate_passphrase(&words, &options, &mut OsRng);

    assert_eq!("solitary solitary solitary", pp.as_str());
}

#[test]
fn word_caps_uppercases_at_least_one_word() {
    let words = planets();
    let options = PassphraseOptions::new(5, fixed("."), Some(CapsMode::Word), false).unwrap();

    for _ in 0..200 {
        let pp = generate_passphrase(&words, &options, &mut OsRng);
        let parts: Vec<&str> = pp.split('.').collect();
        let upper = parts
            .iter()
            .filter(|w| w.chars().all(|c| c.is_ascii_uppercase()))
            .count();
        let lower = parts
            .iter()
            .filter(|w| w.chars().all(|c| c.is_ascii_lowercase()))
            .count();
        assert!((1..=5).contains(&upper), "{}", pp.as_str());
        assert_eq!(5, upper + lower, "mixed case word in {}", pp.as_str());
    }
}

#[test]
fn capitalize_words_can_reach_every_word() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut all_upper_seen = false;

    for _ in 0..500 {
        let mut words = vec!["one".to_owned(), "two".to_owned()];
        capitalize_words(&mut words, &mut rng);
        if words == ["ONE", "TWO"] {
            all_upper_seen = true;
            break;
        }
    }

    assert!(all_upper_seen);
}

#[test]
fn capitalize_words_empty_is_noop() {
    let mut words: Vec<String> = vec![];
    capitalize_words(&mut words, &mut OsRng);
    assert!(words.is_empty());
}

#[test]
fn char_caps_only_changes_case() {
    let words = planets();
    let options = PassphraseOptions::new(4, fixed("-"), Some(CapsMode::Char), false).unwrap();

    for _ in 0..100 {
        let pp = generate_passphrase(&words, &options, &mut OsRng);
        let lowered = pp.to_lowercase();
        for part in lowered.split('-') {
            assert!(words.iter().any(|w| w == part), "{}", pp.as_str());
        }
    }
}

#[test]
fn capitalize_chars_leaves_non_letters_alone() {
    let mut rng = StdRng::seed_from_u64(1);
    let input = "a-b_c!d:e".repeat(20);

    let out = capitalize_chars(&input, &mut rng);

    assert_eq!(input.len(), out.len());
    for (before, after) in input.chars().zip(out.chars()) {
        if before.is_alphabetic() {
            assert_eq!(before, after.to_ascii_lowercase());
        } else {
            assert_eq!(before, after);
        }
    }
}

#[test]
fn capitalize_chars_hits_roughly_a_quarter() {
    let mut rng = StdRng::seed_from_u64(42);
    let input = "a".repeat(4000);

    let out = capitalize_chars(&input, &mut rng);
    let upper = out.chars().filter(|c| c.is_ascii_uppercase()).count();

    assert!((800..1200).contains(&upper), "{upper} uppercased");
}

#[test]
fn digit_injection_adds_exactly_one_digit() {
    let words = planets();
    let options = PassphraseOptions::new(3, fixed("-"), None, true).unwrap();

    for _ in 0..100 {
        let pp = generate_passphrase(&words, &options, &mut OsRng);
        let digits: Vec<char> = pp.chars().filter(|c| c.is_ascii_digit()).collect();
        assert_eq!(1, digits.len(), "{}", pp.as_str());

        let without: String = pp.chars().filter(|c| !c.is_ascii_digit()).collect();
        assert_eq!(pp.chars().count(), without.chars().count() + 1);
        assert_eq!(3, without.split('-').count());
    }
}

#[test]
fn inject_digit_reaches_both_ends() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut at_start = false;
    let mut at_end = false;

    for _ in 0..1000 {
        let mut s = "ab".to_owned();
        inject_digit(&mut s, &mut rng);
        assert_eq!(3, s.len());
        at_start |= s.starts_with(|c: char| c.is_ascii_digit());
        at_end |= s.ends_with(|c: char| c.is_ascii_digit());
    }

    assert!(at_start && at_end);
}

#[test]
fn inject_digit_into_empty_string() {
    let mut s = String::new();
    inject_digit(&mut s, &mut OsRng);

    assert_eq!(1, s.len());
    assert!(s.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn inject_digit_respects_multibyte_separators() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let mut s = "ab§cd".to_owned();
        inject_digit(&mut s, &mut rng);
        assert_eq!(6, s.chars().count());
        assert!(s.contains('§'));
    }
}

#[test]
fn generate_passphrases_count() -> Result<()> {
    let words = planets();
    let options = PassphraseOptions::new(4, fixed(" "), None, false)?;

    let all = generate_passphrases(&words, &options, 5, &mut OsRng)?;

    assert_eq!(5, all.len());
    Ok(())
}

#[test]
fn generate_passphrases_zero_rejected() {
    let words = planets();
    let options = PassphraseOptions::new(4, fixed(" "), None, false).unwrap();

    let result = generate_passphrases(&words, &options, 0, &mut OsRng);

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn separators_drawn_per_passphrase() {
    let words = planets();
    let options = PassphraseOptions::new(2, Separator::default(), None, false).unwrap();

    let all = generate_passphrases(&words, &options, 200, &mut OsRng).unwrap();
    let separators: std::collections::HashSet<char> = all
        .iter()
        .filter_map(|pp| pp.chars().find(|c| !c.is_ascii_lowercase()))
        .collect();

    assert!(separators.len() > 1);
}
