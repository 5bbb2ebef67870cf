use regex::Regex;

/// A grapheme rewrite rule.
///
/// The pattern is searched left to right and every accepted match is replaced
/// by the template (`${1}` refers to capture groups). A match is accepted only
/// if the character before it is not in `not_after` and, when a right context
/// is set, the text after it starts with that context. A rejected match does
/// not consume input: the search resumes one character after its start.
pub(crate) struct Rule {
    pattern: Regex,
    replacement: &'static str,
    not_after: &'static str,
    followed_by: Option<Regex>,
}

impl Rule {
    pub(crate) fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: compile(pattern),
            replacement,
            not_after: "",
            followed_by: None,
        }
    }

    /// Rejects matches preceded by any of `chars`.
    pub(crate) fn not_after(mut self, chars: &'static str) -> Self {
        self.not_after = chars;
        self
    }

    /// Requires `context` to match immediately after the match.
    pub(crate) fn followed_by(mut self, context: &str) -> Self {
        self.followed_by = Some(compile(&format!("^(?:{context})")));
        self
    }

    pub(crate) fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 8);
        let mut copied = 0;
        let mut pos = 0;

        while pos <= text.len() {
            let Some(caps) = self.pattern.captures_at(text, pos) else {
                break;
            };
            let Some(m) = caps.get(0) else {
                break;
            };

            if self.accepts(text, m.start(), m.end()) {
                out.push_str(&text[copied..m.start()]);
                caps.expand(self.replacement, &mut out);
                copied = m.end();
                pos = if m.is_empty() {
                    next_char(text, m.end())
                } else {
                    m.end()
                };
            } else {
                pos = next_char(text, m.start());
            }
        }

        out.push_str(&text[copied..]);
        out
    }

    fn accepts(&self, text: &str, start: usize, end: usize) -> bool {
        let preceded = text[..start]
            .chars()
            .next_back()
            .is_some_and(|c| self.not_after.contains(c));
        if preceded {
            return false;
        }
        self.followed_by
            .as_ref()
            .map_or(true, |context| context.is_match(&text[end..]))
    }
}

/// Applies `rules` in order, each one to the output of the previous.
pub(crate) fn apply_all(rules: &[Rule], text: &str) -> String {
    rules
        .iter()
        .fold(text.to_string(), |text, rule| rule.apply(&text))
}

/// Compiles a pattern from the built-in rule tables.
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid rule pattern {pattern:?}: {e}"))
}

fn next_char(text: &str, at: usize) -> usize {
    text[at..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| at + c.len_utf8())
}
