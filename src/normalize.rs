//! Input canonicalization and Schlachter's special symbols.

use std::sync::OnceLock;

use crate::rule::{apply_all, Rule};

/// Combining grave accent, Schlachter's half-length mark.
pub(crate) const GRAVE: char = '\u{300}';
const ACUTE: char = '\u{301}';
const DIAERESIS: char = '\u{308}';
const RING: char = '\u{30A}';

/// Modifier letter vertical line: strong grade in the first consonant
/// centre, overshort vowel after the second syllable.
pub(crate) const VERTICAL_LINE: char = 'ˈ';
/// Target spelling of the overshort vowel.
pub(crate) const OVERSHORT: char = '’';
/// Schlachter's preaspiration mark.
pub(crate) const PREASPIRATION: char = 'ʿ';

const SOURCE_VOWELS: &str = "aeiouyäáåöüïàèìòùỳǜ\u{300}’";

/// Phase 1: one internal spelling for every source grapheme.
pub(crate) fn normalize(word: &str) -> String {
    apply_all(variant_rules(), &compose(word))
}

/// Phase 2: the vertical line after the second nucleus becomes `’`.
pub(crate) fn mark_overshort(word: &str) -> String {
    let mut nuclei = 0;
    let mut in_nucleus = false;
    word.chars()
        .map(|c| {
            if SOURCE_VOWELS.contains(c) {
                if !in_nucleus {
                    nuclei += 1;
                    in_nucleus = true;
                }
                c
            } else {
                in_nucleus = false;
                if c == VERTICAL_LINE && nuclei == 2 {
                    OVERSHORT
                } else {
                    c
                }
            }
        })
        .collect()
}

/// Composes combining marks onto their base letter where the source alphabet
/// has a precomposed letter, and folds glyph variants of the preaspiration mark.
fn compose(word: &str) -> String {
    let mut out: Vec<char> = Vec::with_capacity(word.len());
    for c in word.chars() {
        let c = match c {
            'ʻ' | 'ʽ' => PREASPIRATION,
            c => c,
        };
        let composed = out.last().and_then(|&base| precomposed(base, c));
        match composed {
            Some(letter) => {
                out.pop();
                out.push(letter);
            }
            None => out.push(c),
        }
    }
    out.into_iter().collect()
}

fn precomposed(base: char, mark: char) -> Option<char> {
    let letter = match (base, mark) {
        ('a', GRAVE) => 'à',
        ('e', GRAVE) => 'è',
        ('i', GRAVE) => 'ì',
        ('o', GRAVE) => 'ò',
        ('u', GRAVE) => 'ù',
        ('y', GRAVE) => 'ỳ',
        ('ü', GRAVE) => 'ǜ',
        ('a', ACUTE) => 'á',
        ('a', RING) => 'å',
        ('a', DIAERESIS) => 'ä',
        ('o', DIAERESIS) => 'ö',
        ('u', DIAERESIS) => 'ü',
        ('i', DIAERESIS) => 'ï',
        _ => return None,
    };
    Some(letter)
}

fn variant_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule::new("ia", "iä"),
            Rule::new("uä", "ua"),
            Rule::new("üe|üä", "uö"),
            Rule::new("äa", "eä"),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_decomposed_letters() {
        assert_eq!(normalize("a\u{300}hka"), "àhka");
        assert_eq!(normalize("ba\u{308}gga"), "bägga");
        assert_eq!(normalize("u\u{308}\u{300}"), "ǜ");
        assert_eq!(normalize("ga\u{30A}a\u{30A}"), "gåå");
    }

    #[test]
    fn keeps_grave_on_letters_without_precomposed_form() {
        assert_eq!(normalize("ä\u{300}ssa"), "ä\u{300}ssa");
        assert_eq!(normalize("a\u{308}\u{300}ssa"), "ä\u{300}ssa");
    }

    #[test]
    fn back_i_is_kept() {
        assert_eq!(normalize("jïllijmus"), "jïllijmus");
        assert_eq!(normalize("ji\u{308}llijmus"), "jïllijmus");
    }

    #[test]
    fn canonicalizes_variant_spellings() {
        assert_eq!(normalize("biata"), "biäta");
        assert_eq!(normalize("guäle"), "guale");
        assert_eq!(normalize("güelie"), "guölie");
        assert_eq!(normalize("päa"), "peä");
        assert_eq!(normalize("beʻtet"), "beʿtet");
    }

    #[test]
    fn vertical_line_after_second_nucleus() {
        assert_eq!(mark_overshort("vuolabˈdit"), "vuolab’dit");
        assert_eq!(mark_overshort("kuyˈna"), "kuyˈna");
        assert_eq!(mark_overshort("aˈb"), "aˈb");
        assert_eq!(mark_overshort("jïdaˈmi"), "jïda’mi");
    }

    #[test]
    fn other_characters_pass_through() {
        assert_eq!(normalize("1999, ŧ đ ŋ!"), "1999, ŧ đ ŋ!");
        assert_eq!(mark_overshort(""), "");
    }
}
