//! French typographic cleanup applied to rendered card markup.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// A bold span holding a definite article and one word, optionally inside a
/// gender colour tag. The word never contains a tag.
static ARTICLE_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<b>(<blue>|<red>)?(le|la|les) ([^\s<]+?)(</blue>|</red>)?</b>")
        .expect("article span pattern is valid")
});

const ELIDING_INITIALS: &str = "aeiouhâàéèêëïîôùûü";

/// Whether a definite article in front of `word` elides.
///
/// Every initial `h` counts, aspirated or not.
pub fn triggers_elision(word: &str) -> bool {
    word.chars()
        .next()
        .and_then(|c| c.to_lowercase().next())
        .is_some_and(|c| ELIDING_INITIALS.contains(c))
}

/// Contracts `le`/`la` before a vowel or `h` inside bold article spans.
///
/// `le arbre` becomes `l'arbre`, `la école` becomes `l'école (f)` so the
/// gender is not lost, and `les` is left alone. Running it twice changes
/// nothing.
pub fn contract(markup: &str) -> String {
    ARTICLE_SPAN
        .replace_all(markup, |caps: &Captures| {
            let open = caps.get(1).map_or("", |m| m.as_str());
            let close = caps.get(4).map_or("", |m| m.as_str());
            let word = &caps[3];
            match &caps[2] {
                "le" if triggers_elision(word) => format!("<b>{open}l'{word}{close}</b>"),
                "la" if triggers_elision(word) => format!("<b>{open}l'{word} (f){close}</b>"),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}
