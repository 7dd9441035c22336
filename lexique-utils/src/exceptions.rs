//! Hand-written cards for a few lemmas whose Lexique rows are irregular or
//! split across several lemma keys.

/// Result of looking a lemma up in the exception table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OverrideResult {
    /// Use this markup as the whole declension.
    Value(&'static str),
    /// Another key of the same word already emits the card.
    Suppress,
    NoMatch,
}

const TOUT: &str = "<b>tout</b> [\
<gr><i>ms. </i></gr><blue>tout</blue>; \
<gr><i>mpl. </i></gr><blue>tous</blue>; \
<gr><i>fs. </i></gr><red>toute</red>; \
<gr><i>fpl. </i></gr><red>toutes</red>]";

const AUCUN: &str = "<b>aucun</b> [\
<gr><i>ms. </i></gr><blue>aucun</blue>; \
<gr><i>mpl. </i></gr><blue>aucuns</blue>; \
<gr><i>fs. </i></gr><red>aucune</red>; \
<gr><i>fpl. </i></gr><red>aucunes</red>]";

/// Keys are exact and case-sensitive.
static EXCEPTIONS: &[(&str, OverrideResult)] = &[
    (
        "quelque",
        OverrideResult::Value("<b>quelque</b> [<gr><i>pl. </i></gr>quelques]"),
    ),
    ("quelques", OverrideResult::Suppress),
    // archaic plural
    (
        "oeil",
        OverrideResult::Value("<b>l'oeil</b> [<gr><i>pl. </i></gr><blue>les yeux</blue>]"),
    ),
    (
        "lieu",
        OverrideResult::Value("<b>lieu</b> [<gr><i>pl. </i></gr>lieux]"),
    ),
    ("tout", OverrideResult::Value(TOUT)),
    ("toute", OverrideResult::Suppress),
    ("tous", OverrideResult::Suppress),
    ("toutes", OverrideResult::Suppress),
    ("aucun", OverrideResult::Value(AUCUN)),
    ("aucune", OverrideResult::Suppress),
    ("aucuns", OverrideResult::Suppress),
    ("aucunes", OverrideResult::Suppress),
    (
        "fois",
        OverrideResult::Value("<b>la fois</b> [<gr><i>pl. </i></gr><red><b>les fois</b></red>]"),
    ),
];

pub fn lookup(lemma: &str) -> OverrideResult {
    EXCEPTIONS
        .iter()
        .find(|(key, _)| *key == lemma)
        .map(|(_, result)| *result)
        .unwrap_or(OverrideResult::NoMatch)
}
