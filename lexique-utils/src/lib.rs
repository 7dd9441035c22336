pub mod exceptions;
pub mod features;
pub mod inference;
pub mod render;
pub mod text_cleanup;

use crate::exceptions::OverrideResult;
use crate::features::{Genre, Nombre};
use crate::inference::Paradigm;

/// The closed set of Lexique part-of-speech classes that get a card.
#[derive(
    Clone,
    Copy,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
)]
pub enum PartOfSpeech {
    #[serde(rename = "nom")]
    Noun,
    #[serde(rename = "adj")]
    Adjective,
    #[serde(rename = "ver")]
    Verb,
    #[serde(rename = "adv")]
    Adverb,
    #[serde(rename = "pre")]
    Preposition,
    #[serde(rename = "con")]
    Conjunction,
    #[serde(rename = "ono")]
    Onomatopoeia,
}

impl PartOfSpeech {
    /// Parses a Lexique `cgram` value. Indefinite adjectives (`adj:ind`) are adjectives.
    pub fn from_cgram(cgram: &str) -> Option<Self> {
        match cgram.trim().to_lowercase().as_str() {
            "nom" => Some(PartOfSpeech::Noun),
            "adj" | "adj:ind" => Some(PartOfSpeech::Adjective),
            "ver" => Some(PartOfSpeech::Verb),
            "adv" => Some(PartOfSpeech::Adverb),
            "pre" => Some(PartOfSpeech::Preposition),
            "con" => Some(PartOfSpeech::Conjunction),
            "ono" => Some(PartOfSpeech::Onomatopoeia),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "nom",
            PartOfSpeech::Adjective => "adj",
            PartOfSpeech::Verb => "ver",
            PartOfSpeech::Adverb => "adv",
            PartOfSpeech::Preposition => "pre",
            PartOfSpeech::Conjunction => "con",
            PartOfSpeech::Onomatopoeia => "ono",
        }
    }

    /// Classes that never inflect on a card: only the bold lemma is shown.
    pub fn is_invariant(&self) -> bool {
        matches!(
            self,
            PartOfSpeech::Verb
                | PartOfSpeech::Adverb
                | PartOfSpeech::Preposition
                | PartOfSpeech::Conjunction
                | PartOfSpeech::Onomatopoeia
        )
    }

    pub fn is_adjectival(&self) -> bool {
        *self == PartOfSpeech::Adjective
    }
}

impl std::fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let word = match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Preposition => "preposition",
            PartOfSpeech::Conjunction => "conjunction",
            PartOfSpeech::Onomatopoeia => "onomatopoeia",
        };
        write!(f, "{word}")
    }
}

/// One orthographic variant of a lemma.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AttributeRecord {
    pub surface_form: String,
    pub genre: Genre,
    pub nombre: Nombre,
    pub part_of_speech: PartOfSpeech,
}

impl AttributeRecord {
    pub fn new(
        surface_form: impl Into<String>,
        genre: Genre,
        nombre: Nombre,
        part_of_speech: PartOfSpeech,
    ) -> Self {
        Self {
            surface_form: surface_form.into(),
            genre,
            nombre,
            part_of_speech,
        }
    }
}

impl std::fmt::Display for AttributeRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let or_nan = |code: &'static str| if code.is_empty() { "NaN" } else { code };
        write!(
            f,
            "ortho: {}, genre: {}, nombre: {}",
            self.surface_form,
            or_nan(self.genre.code()),
            or_nan(self.nombre.code())
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordSetError {
    #[error("lemma `{0}` must be longer than two characters")]
    LemmaTooShort(String),
    #[error("lemma `{0}` has no records")]
    Empty(String),
    #[error("lemma `{0}` has a record with an empty surface form")]
    EmptySurfaceForm(String),
}

/// All the variants of one lemma, in source row order.
///
/// Order matters: Lexique lists singular rows before plural rows, and the
/// two- and three-record rules rely on that.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordSet {
    lemma: String,
    records: Vec<AttributeRecord>,
}

impl RecordSet {
    pub fn new(
        lemma: impl Into<String>,
        records: Vec<AttributeRecord>,
    ) -> Result<Self, RecordSetError> {
        let lemma = lemma.into();
        if lemma.chars().count() <= 2 {
            return Err(RecordSetError::LemmaTooShort(lemma));
        }
        if records.is_empty() {
            return Err(RecordSetError::Empty(lemma));
        }
        if records.iter().any(|r| r.surface_form.is_empty()) {
            return Err(RecordSetError::EmptySurfaceForm(lemma));
        }
        Ok(Self { lemma, records })
    }

    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    pub fn records(&self) -> &[AttributeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The group's part of speech is the one of its first record.
    pub fn part_of_speech(&self) -> PartOfSpeech {
        self.records[0].part_of_speech
    }
}

/// A rendered declension: usually one card, two for a gender homograph.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Declension {
    Single(String),
    Split([String; 2]),
}

impl Declension {
    pub fn map(self, f: impl Fn(&str) -> String) -> Self {
        match self {
            Declension::Single(markup) => Declension::Single(f(&markup)),
            Declension::Split([first, second]) => Declension::Split([f(&first), f(&second)]),
        }
    }

    /// The markup of each card, in emission order.
    pub fn cards(&self) -> Vec<&str> {
        match self {
            Declension::Single(markup) => vec![markup.as_str()],
            Declension::Split([first, second]) => vec![first.as_str(), second.as_str()],
        }
    }
}

/// Why a lemma could not be declined. Never fatal: the card is emitted with
/// an empty declension and the records are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Unresolved {
    #[error("ambiguous inference: {0}")]
    AmbiguousInference(&'static str),
    #[error("malformed group: {0}")]
    MalformedGroup(&'static str),
}

pub type DeclensionResult = Result<Declension, Unresolved>;

/// What the per-lemma pipeline decided.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LemmaOutcome {
    /// A sibling exception entry already produced this lemma's card.
    Suppressed,
    Declined(DeclensionResult),
}

/// Runs one lemma through the exception table, inference, rendering and
/// elision.
pub fn decline(set: &RecordSet) -> LemmaOutcome {
    match exceptions::lookup(set.lemma()) {
        OverrideResult::Value(markup) => {
            return LemmaOutcome::Declined(Ok(Declension::Single(markup.to_string())));
        }
        OverrideResult::Suppress => return LemmaOutcome::Suppressed,
        OverrideResult::NoMatch => {}
    }

    let pos = set.part_of_speech();
    let paradigm = if pos.is_invariant() {
        Ok(Paradigm::Bare)
    } else {
        inference::resolve(set)
    };

    LemmaOutcome::Declined(paradigm.map(|paradigm| {
        render::render(set.lemma(), &paradigm, pos).map(text_cleanup::contract)
    }))
}
