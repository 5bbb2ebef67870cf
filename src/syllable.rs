use std::sync::OnceLock;

use regex::Regex;

use crate::rule::compile;

/// A vowel nucleus and the consonant centre that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Syllable {
    pub(crate) nucleus: String,
    pub(crate) centre: String,
}

/// A word split into its onset and syllables.
///
/// Syllable `k` (0-based) is the word's syllable `k + 1`; odd-numbered
/// syllables sit at even indices. The split is lossless: `join` gives back
/// the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segmented {
    pub(crate) onset: String,
    pub(crate) syllables: Vec<Syllable>,
}

impl Segmented {
    pub(crate) fn split(word: &str) -> Self {
        let mut segmented = Segmented {
            onset: String::new(),
            syllables: Vec::new(),
        };
        let mut last = 0;
        for m in nuclei().find_iter(word) {
            segmented.push_consonants(&word[last..m.start()]);
            segmented.syllables.push(Syllable {
                nucleus: m.as_str().to_string(),
                centre: String::new(),
            });
            last = m.end();
        }
        segmented.push_consonants(&word[last..]);
        segmented
    }

    pub(crate) fn join(&self) -> String {
        let mut word = self.onset.clone();
        for syllable in &self.syllables {
            word.push_str(&syllable.nucleus);
            word.push_str(&syllable.centre);
        }
        word
    }

    /// The last consonant centre, or the onset of a word without vowels.
    pub(crate) fn coda_mut(&mut self) -> &mut String {
        match self.syllables.last_mut() {
            Some(syllable) => &mut syllable.centre,
            None => &mut self.onset,
        }
    }

    fn push_consonants(&mut self, consonants: &str) {
        self.coda_mut().push_str(consonants);
    }
}

/// Vowel nuclei of the target spelling, diphthongs first. The overshort
/// vowel `’` occupies a nucleus of its own.
fn nuclei() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile("ie|iä|eä|ua|uo|uä|uö|ue|yö|a|e|i|o|u|ü|y|å|ä|á|ï|’"))
}
