//! Consonant centres: grade marks, geminates and overlong geminates.
//!
//! Only the centres after odd-numbered (stressed) syllables carry the
//! strong/weak grade distinction. Centres after even-numbered syllables lose
//! their preaspiration instead.
//!
//! Overlong geminates are always marked here. Unmarked output comes from
//! [`drop_overlong_marks`] after every other rule has run.

use std::sync::OnceLock;

use regex::Regex;

use crate::normalize::VERTICAL_LINE;
use crate::rule::{apply_all, compile, Rule};
use crate::syllable::Segmented;

/// Vowels that make a preceding syllable short.
const SHORT_VOWELS: &str = "aeiouüy";
const STOPS: &str = "kptgbd";
const CONSONANT_LETTERS: &str = "bcdđfghjklmnŋprsštŧvwzž";
/// Written between the halves of an overlong geminate: `beäg'ga`.
const OVERLONG_MARK: char = '\'';

/// `hk`, `hp`, `ht`, `htj` or `hts` and nothing else.
pub(crate) fn is_plain_preaspirated(centre: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| compile("^h(?:k|p|t[js]?)$"))
        .is_match(centre)
}

/// Rewrites every consonant centre of `word` for its position.
///
/// `strong_centre` comes from the first vowel pass and forces the doubled
/// stop after the first syllable.
pub(crate) fn grade_centres(word: &mut Segmented, strong_centre: bool) {
    let count = word.syllables.len();

    for k in (0..count).step_by(2) {
        let followed = k + 1 < count;
        let short = is_short_vowel(&word.syllables[k].nucleus);
        let syllable = &mut word.syllables[k];
        syllable.centre = stressed_centre(&syllable.centre, followed && (strong_centre || short));
    }

    for k in (1..count).step_by(2) {
        let syllable = &mut word.syllables[k];
        syllable.centre = unstressed().apply(&syllable.centre);
    }

    if count >= 2 {
        let coda = word.coda_mut();
        if coda == "ht" {
            *coda = "t".to_string();
        }
    }
}

/// Cluster simplifications and the overlong `vv` that need the joined word.
pub(crate) fn simplify_clusters(text: &str) -> String {
    let text = apply_all(cluster_rules(), text);
    text.replace("vvv", &format!("v{OVERLONG_MARK}v"))
}

/// Removes every overlong mark, generated or from the input: `g'g` becomes `gg`.
pub(crate) fn drop_overlong_marks(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            let geminate = c == OVERLONG_MARK
                && i > 0
                && chars.get(i + 1) == Some(&chars[i - 1])
                && CONSONANT_LETTERS.contains(chars[i - 1]);
            !geminate
        })
        .map(|(_, &c)| c)
        .collect()
}

fn stressed_centre(centre: &str, double_stops: bool) -> String {
    let centre = centre.replace("ˈˈ", "ˈ");
    let mut centre = resolve_mark(&centre);

    centre = apply_all(stressed_rules(), &centre);
    centre = shift_length(&centre, "lr");
    centre = shift_length(&centre, "mnŋ");

    if double_stops && is_plain_preaspirated(&centre) {
        centre = double_stop().apply(&centre);
    }
    centre
}

/// Turns a strong-grade mark into the spelling of the strong grade.
///
/// `XˈX` is overlong, `sˈZ` doubles the s, `XˈZ` doubles the last
/// consonant. Marks inside longer clusters are dropped.
fn resolve_mark(centre: &str) -> String {
    let c: Vec<char> = centre.chars().collect();
    let marked = c.len() >= 3 && c[1] == VERTICAL_LINE;

    let resolved = if marked && c.len() == 3 && c[0] == c[2] {
        format!("{}{OVERLONG_MARK}{}", c[0], c[2])
    } else if marked && c[0] == 's' && c[2] != 's' {
        format!("ss{}", c[2..].iter().collect::<String>())
    } else if marked && (c.len() == 3 || (c.len() == 4 && c[3] == 'j')) {
        format!("{}{}{}{}", c[0], c[2], c[2], c[3..].iter().collect::<String>())
    } else {
        centre.to_string()
    };
    resolved.replace(VERTICAL_LINE, "")
}

/// `llC` → `lCC` and the like: the length moves onto the stop.
fn shift_length(centre: &str, sonorants: &str) -> String {
    let c: Vec<char> = centre.chars().collect();
    let mut out = String::with_capacity(centre.len());
    let mut i = 0;
    while i < c.len() {
        if i + 2 < c.len() && sonorants.contains(c[i]) && c[i + 1] == c[i] && STOPS.contains(c[i + 2])
        {
            out.push(c[i]);
            out.push(c[i + 2]);
            out.push(c[i + 2]);
            i += 3;
        } else {
            out.push(c[i]);
            i += 1;
        }
    }
    out
}

fn is_short_vowel(nucleus: &str) -> bool {
    let mut chars = nucleus.chars();
    matches!((chars.next(), chars.next()), (Some(v), None) if SHORT_VOWELS.contains(v))
}

fn stressed_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| vec![Rule::new("([lrjv])h([kpt])", "${1}${2}${2}")])
}

fn double_stop() -> &'static Rule {
    static RULE: OnceLock<Rule> = OnceLock::new();
    RULE.get_or_init(|| Rule::new("([kpt])", "${1}${1}"))
}

fn unstressed() -> &'static Rule {
    static RULE: OnceLock<Rule> = OnceLock::new();
    RULE.get_or_init(|| Rule::new("h([kpt])", "${1}"))
}

fn cluster_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule::new("bmm", "bm"),
            Rule::new("dnn", "dn"),
            Rule::new("gŋŋ", "gŋ"),
        ]
    })
}
