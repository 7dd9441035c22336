use anyhow::Context;
use indexmap::IndexMap;
use lexique_utils::features::{Genre, Nombre};
use lexique_utils::{AttributeRecord, PartOfSpeech, RecordSet, RecordSetError};
use std::path::Path;

/// One row of the filtered lexicon, named the way the filter renames the
/// raw Lexique columns.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LexiqueRow {
    pub ortho: String,
    pub lemme: String,
    pub cgram: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub freqlemfilms: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub freqlemlivres: f64,
    #[serde(
        default,
        deserialize_with = "lenient::flag",
        serialize_with = "lenient::serialize_flag"
    )]
    pub islem: bool,
    #[serde(default)]
    pub orthosyll: String,
    #[serde(default)]
    pub cgramortho: String,
}

/// Spreadsheet exports write numbers as `1`, `1.0` or nothing at all.
mod lenient {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(0.0);
        }
        raw.parse().map_err(serde::de::Error::custom)
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(number(deserializer)? != 0.0)
    }

    pub fn serialize_flag<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*flag))
    }
}

pub fn read_rows(path: &Path) -> anyhow::Result<Vec<LexiqueRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    reader
        .deserialize()
        .enumerate()
        .map(|(idx, row)| {
            row.with_context(|| format!("Failed to read row {} of {}", idx + 1, path.display()))
        })
        .collect()
}

pub fn write_rows<'a>(
    path: &Path,
    rows: impl IntoIterator<Item = &'a LexiqueRow>,
) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write row for {}", row.lemme))?;
    }
    writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// All the rows sharing a lemma, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct LexiqueGroup {
    pub lemma: String,
    pub rows: Vec<LexiqueRow>,
}

impl LexiqueGroup {
    /// Lower-case `cgram` of the first row, used as the card's POS tag.
    pub fn cgram(&self) -> String {
        self.rows
            .first()
            .map(|row| row.cgram.to_lowercase())
            .unwrap_or_default()
    }

    /// Syllabified spelling of the row spelled like the lemma, else of the
    /// first row.
    pub fn pronunciation(&self) -> &str {
        self.rows
            .iter()
            .find(|row| row.ortho == self.lemma)
            .or(self.rows.first())
            .map_or("", |row| row.orthosyll.as_str())
    }

    /// Builds the record set the declension pipeline works on. Rows whose
    /// `cgram` is not a declinable class are left out.
    pub fn to_record_set(&self) -> Result<RecordSet, RecordSetError> {
        let records = self
            .rows
            .iter()
            .filter_map(|row| {
                let Some(pos) = PartOfSpeech::from_cgram(&row.cgram) else {
                    log::warn!(
                        "Skipping row `{}` of {}: unknown cgram `{}`",
                        row.ortho,
                        self.lemma,
                        row.cgram
                    );
                    return None;
                };
                Some(AttributeRecord::new(
                    row.ortho.clone(),
                    Genre::from_code(&row.genre),
                    Nombre::from_code(&row.nombre),
                    pos,
                ))
            })
            .collect();
        RecordSet::new(self.lemma.clone(), records)
    }
}

/// Groups rows by lemma. Lemmas keep the order of their first row and each
/// group keeps its rows in file order.
pub fn group_by_lemma(rows: impl IntoIterator<Item = LexiqueRow>) -> Vec<LexiqueGroup> {
    let mut groups: IndexMap<String, Vec<LexiqueRow>> = IndexMap::new();
    for row in rows {
        groups.entry(row.lemme.clone()).or_default().push(row);
    }
    groups
        .into_iter()
        .map(|(lemma, rows)| LexiqueGroup { lemma, rows })
        .collect()
}

#[cfg(test)]
pub(crate) fn row(ortho: &str, lemme: &str, cgram: &str, genre: &str, nombre: &str) -> LexiqueRow {
    LexiqueRow {
        ortho: ortho.to_string(),
        lemme: lemme.to_string(),
        cgram: cgram.to_string(),
        genre: genre.to_string(),
        nombre: nombre.to_string(),
        freqlemfilms: 0.0,
        freqlemlivres: 0.0,
        islem: ortho == lemme,
        orthosyll: ortho.to_string(),
        cgramortho: cgram.to_uppercase(),
    }
}
