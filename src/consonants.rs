//! Consonants and consonant digraphs.
//!
//! Schlachter writes /đ/ and /d/ alike; both come out as `d`.

use std::sync::OnceLock;

use crate::rule::{apply_all, Rule};

pub(crate) fn rewrite(word: &str) -> String {
    apply_all(rules(), word)
}

fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            Rule::new("w", "v"),
            Rule::new("ʿ([kpt])", "${1}"),
            Rule::new("ʿ", "h"),
            Rule::new("dhk", "ŧkk"),
            Rule::new("hg", "hk"),
            Rule::new("hb", "hp"),
            Rule::new("hd", "ht"),
            Rule::new("dh", "ŧ"),
            Rule::new("^ŋj", "nj"),
            Rule::new("ŋj", "ŋ"),
            Rule::new("g$", "k"),
            Rule::new("supts", "subts"),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn w_is_v() {
        assert_eq!(rewrite("wuorrat"), "vuorrat");
    }

    #[test]
    fn preaspiration_mark() {
        assert_eq!(rewrite("beäʿtet"), "beätet");
        assert_eq!(rewrite("tjárʿvuo"), "tjárhvuo");
    }

    #[test]
    fn dental_fricative() {
        assert_eq!(rewrite("dhka"), "ŧkka");
        assert_eq!(rewrite("bodhe"), "boŧe");
    }

    #[test]
    fn voiced_after_preaspiration() {
        assert_eq!(rewrite("lahga"), "lahka");
        assert_eq!(rewrite("lahbe"), "lahpe");
        assert_eq!(rewrite("lahda"), "lahta");
    }

    #[test]
    fn eng_before_j() {
        assert_eq!(rewrite("ŋjuolla"), "njuolla");
        assert_eq!(rewrite("vaŋja"), "vaŋa");
    }

    #[test]
    fn final_g_and_special_cases() {
        assert_eq!(rewrite("guoleg"), "guolek");
        assert_eq!(rewrite("gieg"), "giek");
        assert_eq!(rewrite("suptsat"), "subtsat");
    }

    #[test]
    fn d_is_never_disambiguated() {
        assert_eq!(rewrite("dadnie"), "dadnie");
    }
}
