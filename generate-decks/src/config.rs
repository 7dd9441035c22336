//! Defaults for the deck pipeline. The CLI can override each of them.

use std::path::PathBuf;

/// Lemmas per exported deck file.
pub const CHUNK_SIZE: usize = 500;
/// Lemmas taken by spoken frequency (`freqlemfilms`) in each frequency chunk.
pub const SPOKEN_COUNT: usize = 400;
/// Lemmas taken by written frequency (`freqlemlivres`) after the spoken ones.
pub const WRITTEN_COUNT: usize = 100;
pub const OUTPUT_PREFIX: &str = "anki_deck_";

/// Lexique `cgram` codes kept by the filter, best rank first. A lemma that
/// appears under several of them keeps only its best-ranked rows.
pub const POS_PRIORITY: [&str; 8] = ["adj", "ver", "adv", "ono", "pre", "con", "nom", "adj:ind"];

/// Lemmas that are spreadsheet or corpus artefacts rather than words.
pub const BANNED_LEMMAS: [&str; 7] = ["FALSE", "TRUE", "zzz", "zzzz", "o", "team", "58e"];

/// Raw Lexique 3.83 column names and the names the pipeline uses for them.
pub const KEPT_COLUMNS: [(&str, &str); 10] = [
    ("1_ortho", "ortho"),
    ("3_lemme", "lemme"),
    ("4_cgram", "cgram"),
    ("5_genre", "genre"),
    ("6_nombre", "nombre"),
    ("7_freqlemfilms2", "freqlemfilms"),
    ("8_freqlemlivres", "freqlemlivres"),
    ("14_islem", "islem"),
    ("28_orthosyll", "orthosyll"),
    ("29_cgramortho", "cgramortho"),
];

/// Log filter used when the filter variable is unset. Unresolved lemmas are
/// reported at `warn`, so a plain run shows them.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Logger environment reading its filter from `var`.
pub fn log_env(var: &str) -> env_logger::Env<'_> {
    env_logger::Env::default().filter_or(var, DEFAULT_LOG_FILTER)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckConfig {
    pub chunk_size: usize,
    pub spoken_count: usize,
    pub written_count: usize,
    pub output_prefix: String,
    /// Where unresolved lemmas are appended as JSONL, if anywhere.
    pub unresolved_report: Option<PathBuf>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            spoken_count: SPOKEN_COUNT,
            written_count: WRITTEN_COUNT,
            output_prefix: OUTPUT_PREFIX.to_string(),
            unresolved_report: None,
        }
    }
}

/// Rank of a lower-case `cgram` code in [`POS_PRIORITY`], `None` if the
/// code is not kept.
pub fn pos_rank(cgram: &str) -> Option<usize> {
    POS_PRIORITY.iter().position(|code| *code == cgram)
}

pub fn is_banned_lemma(lemma: &str) -> bool {
    BANNED_LEMMAS.contains(&lemma)
}
