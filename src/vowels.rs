//! Vowel mapping.
//!
//! The first pass runs on the unsegmented word and handles long vowels,
//! Schlachter's ä, first-syllable digraphs and the semivowel letters that
//! close a diphthong. The later-syllable pass runs on the segmented word. It
//! is an approximation: syncope makes non-initial vowels unpredictable from
//! the source spelling, and the rules cover the regular cases only.

use std::sync::OnceLock;

use regex::Regex;

use crate::gradation::is_plain_preaspirated;
use crate::normalize::{GRAVE, VERTICAL_LINE};
use crate::rule::{apply_all, compile, Rule};
use crate::syllable::Segmented;

/// Letters that can stand in a consonant centre, strong-grade mark included.
pub(crate) const CONSONANTS: &str = "bdđfghjklmnŋprstŧvʿˈ";
/// Vowel letters that Schlachter also uses for glides inside a centre.
const SEMIVOWELS: &str = "iuyìùỳ";

/// Output of the first vowel pass.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct FirstPass {
    pub(crate) text: String,
    /// The first consonant centre is in strong grade whatever its spelling.
    pub(crate) strong_centre: bool,
}

pub(crate) fn first_syllable(word: &str) -> FirstPass {
    let text = apply_all(long_vowel_rules(), word);
    let text = split_o(&text);
    let mut strong_centre = short_open_e().is_match(&text);

    let text = apply_all(half_long_ae_rules(), &text);
    let (text, plain_preaspirated) = open_ae(&text);
    strong_centre |= plain_preaspirated;

    let text = apply_all(diphthong_rules(), &text);
    FirstPass {
        text,
        strong_centre,
    }
}

/// Stressed `eä`/`ie` become `iä` before a weak centre and `a`, `á` or `uo`.
pub(crate) fn raise_stressed(word: &mut Segmented, strong_centre: bool) {
    if strong_centre {
        return;
    }
    for k in (1..word.syllables.len()).step_by(2) {
        let (before, after) = word.syllables.split_at_mut(k);
        let stressed = &mut before[k - 1];
        let next = &after[0];
        if matches!(stressed.nucleus.as_str(), "eä" | "ie")
            && matches!(next.nucleus.as_str(), "a" | "á" | "uo")
            && !is_strong(&stressed.centre)
        {
            stressed.nucleus = "iä".to_string();
        }
    }
}

/// Position-dependent `a` and `ü` in the second and later syllables.
pub(crate) fn later_syllables(word: &mut Segmented) {
    let count = word.syllables.len();

    for k in (1..count).step_by(2) {
        let previous = word.syllables[k - 1].nucleus.clone();
        let syllable = &mut word.syllables[k];
        if syllable.nucleus != "a" {
            continue;
        }
        if k + 1 < count && syllable.centre.starts_with('j') {
            syllable.nucleus = "i".to_string();
        } else if matches!(previous.as_str(), "ä" | "ü" | "e") {
            syllable.nucleus = "e".to_string();
        }
    }

    // Word-final third, fifth, ... syllable.
    if count >= 3 && count % 2 == 1 {
        let last = &mut word.syllables[count - 1];
        match last.nucleus.as_str() {
            "a" => last.nucleus = "e".to_string(),
            "ü" => last.nucleus = "u".to_string(),
            _ => {}
        }
    }
}

/// Undoes the `a → e` shift where syncope hid the original vowel.
pub(crate) fn compensate_syncope(text: &str) -> String {
    static RULE: OnceLock<Rule> = OnceLock::new();
    RULE.get_or_init(|| Rule::new("(átj|[dt]all|[uü]vv)et", "${1}at"))
        .apply(text)
}

/// Phase 7: back `ï` and front `i` are one target grapheme.
pub(crate) fn merge_back_i(text: &str) -> String {
    text.replace('ï', "i")
}

/// Writes short `o` as `å` except in the diphthong `uo`.
pub(crate) fn merge_short_o(text: &str) -> String {
    static RULE: OnceLock<Rule> = OnceLock::new();
    RULE.get_or_init(|| Rule::new("o", "å").not_after("u"))
        .apply(text)
}

fn long_vowel_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| vec![Rule::new("aa|à", "á")])
}

/// Long `åå`/`å̀` become `å`; a single `å` is short and kept as `o` until the
/// end of the conversion.
fn split_o(text: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| compile("åå|å\u{300}|å"))
        .replace_all(text, |caps: &regex::Captures<'_>| {
            if caps[0].chars().count() == 1 {
                "o"
            } else {
                "å"
            }
        })
        .into_owned()
}

/// A word opening with a short `eä` is always followed by a strong centre.
fn short_open_e() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile(&format!("^[{CONSONANTS}]*eä[^{GRAVE}]")))
}

fn centre_pattern() -> String {
    format!("[{SEMIVOWELS}{CONSONANTS}]*[{CONSONANTS}]+")
}

fn half_long_ae_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        let centre = centre_pattern();
        vec![
            Rule::new("ä\u{300}", "e").followed_by(&format!("{centre}e(?:[^e]|$)")),
            // Proto-Saami *ā before *i(j).
            Rule::new("ä\u{300}", "ää").followed_by(&format!("{centre}[ai]")),
        ]
    })
}

/// The last single `ä` or `ä̀` before a consonant centre becomes `eä`.
///
/// The centre is marked strong with a vertical line before its last letter,
/// unless it is a plain preaspirated stop; that case is reported instead so
/// the gradation phase can double the stop.
fn open_ae(text: &str) -> (String, bool) {
    let Some((start, centre_start, centre_end)) = find_open_ae(text) else {
        return (text.replace("ää", "ä"), false);
    };

    let centre = &text[centre_start..centre_end];
    let plain_preaspirated = is_plain_preaspirated(centre);
    let centre = if plain_preaspirated {
        centre.to_string()
    } else {
        mark_before_last(centre)
    };

    let text = format!("{}eä{}{}", &text[..start], centre, &text[centre_end..]);
    (text.replace("ää", "ä"), plain_preaspirated)
}

/// Byte offsets of the vowel, the centre start and the centre end.
fn find_open_ae(text: &str) -> Option<(usize, usize, usize)> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    for k in (0..chars.len()).rev() {
        let (start, c) = chars[k];
        if c != 'ä' {
            continue;
        }
        let previous = k.checked_sub(1).map(|j| chars[j].1);
        let next = chars.get(k + 1).map(|&(_, c)| c);
        let after = start + c.len_utf8();

        let single = !matches!(previous, Some('e' | 'i' | 'ä')) && next.is_some_and(|n| n != 'ä');
        if single {
            if let Some(len) = centre_len(&text[after..]) {
                return Some((start, after, after + len));
            }
        }
        if next == Some(GRAVE) {
            let after = after + GRAVE.len_utf8();
            if let Some(len) = centre_len(&text[after..]) {
                return Some((start, after, after + len));
            }
        }
    }
    None
}

/// Length of the longest consonant centre at the start of `rest`: glide
/// letters and consonants, ending in a consonant.
fn centre_len(rest: &str) -> Option<usize> {
    let mut end = None;
    for (i, c) in rest.char_indices() {
        if CONSONANTS.contains(c) {
            end = Some(i + c.len_utf8());
        } else if !SEMIVOWELS.contains(c) {
            break;
        }
    }
    end
}

fn mark_before_last(centre: &str) -> String {
    let mut chars: Vec<char> = centre.chars().collect();
    if chars.len() >= 2 {
        chars.insert(chars.len() - 1, VERTICAL_LINE);
    }
    chars.into_iter().collect()
}

fn diphthong_rules() -> &'static [Rule] {
    const NOT_I: &str = "aeouyäáåöü";
    const ANY: &str = "aeiouyäáåöü";

    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule::new("ìu", "iv"),
            Rule::new("ùi", "uj"),
            Rule::new("ì", "ij").not_after(ANY),
            Rule::new("ii", "ij"),
            Rule::new("ù", "uv").not_after(ANY),
            Rule::new("uu", "uv"),
            Rule::new("üü|ǜ", "üv"),
            Rule::new(&format!("^([{CONSONANTS}]*)ee"), "${1}e"),
            Rule::new("ee|i?è", "ie"),
            Rule::new(&format!("^([{CONSONANTS}]*)(?:oo|ò)"), "${1}uv"),
            Rule::new("oo|u?ò", "uo"),
            Rule::new("yö", "uö").followed_by("[^aeoäáåöü]+ie"),
            Rule::new("ö", "yö").not_after("uy"),
            Rule::new("\u{300}", ""),
            Rule::new(&format!("([{NOT_I}])i"), "${1}j"),
            Rule::new(&format!("([{NOT_I}])ì"), "${1}jˈ"),
            Rule::new("([uü])y", "${1}j"),
            Rule::new("([uü])ỳ", "${1}jˈ"),
            Rule::new(&format!("([{ANY}])[ùỳ]"), "${1}vˈ"),
            Rule::new(&format!("([{ANY}])[uy]f"), "${1}vh"),
            Rule::new(&format!("([{ANY}])[uy]"), "${1}v"),
        ]
    })
}

/// A centre that is already long: marked, geminated, preaspirated or a
/// stop cluster before j/s.
fn is_strong(centre: &str) -> bool {
    if centre.contains(VERTICAL_LINE) || centre.contains('\'') {
        return true;
    }
    let c: Vec<char> = centre.chars().collect();
    if c.len() < 3 {
        return false;
    }
    let stop = |x: char| "kptgbd".contains(x);
    c[0] == c[1] || c[1] == c[2] || c[1] == 'h' || (stop(c[0]) && stop(c[1]) && "js".contains(c[2]))
}
