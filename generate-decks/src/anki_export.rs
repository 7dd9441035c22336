//! Turns one frequency chunk into Anki import files, one card per
//! declension.

use anyhow::Context;
use lexique_utils::features::{Genre, Nombre};
use lexique_utils::{LemmaOutcome, RecordSet, Unresolved};
use regex::Regex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::config::DeckConfig;
use crate::morphology_analysis::{LexiqueGroup, group_by_lemma, read_rows};

static FREQ_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Freq (\d+) - \d+").expect("frequency file pattern is valid"));

const CARD_HEADER: [&str; 7] = [
    "Lemme",
    "Noun Declension",
    "Pronunciation",
    "Sound",
    "English Meaning",
    "POS",
    "Tags",
];

/// One row of the Anki import file. Sound, meaning and tags are filled in
/// by hand later.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CardRow {
    #[serde(rename = "Lemme")]
    pub lemme: String,
    #[serde(rename = "Noun Declension")]
    pub noun_declension: String,
    #[serde(rename = "Pronunciation")]
    pub pronunciation: String,
    #[serde(rename = "Sound")]
    pub sound: String,
    #[serde(rename = "English Meaning")]
    pub english_meaning: String,
    #[serde(rename = "POS")]
    pub pos: String,
    #[serde(rename = "Tags")]
    pub tags: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReportedRecord {
    pub surface_form: String,
    pub genre: Genre,
    pub nombre: Nombre,
}

/// A lemma whose card went out with an empty declension.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UnresolvedLemma {
    pub lemma: String,
    pub reason: String,
    pub records: Vec<ReportedRecord>,
}

impl UnresolvedLemma {
    fn new(set: &RecordSet, reason: Unresolved) -> Self {
        Self {
            lemma: set.lemma().to_string(),
            reason: reason.to_string(),
            records: set
                .records()
                .iter()
                .map(|record| ReportedRecord {
                    surface_form: record.surface_form.clone(),
                    genre: record.genre,
                    nombre: record.nombre,
                })
                .collect(),
        }
    }
}

/// Frequency rank of the first lemma, read from a `Freq <start> - <end>`
/// file name.
pub fn parse_start_frequency(path: &Path) -> anyhow::Result<usize> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let Some(caps) = FREQ_START.captures(&name) else {
        anyhow::bail!(
            "Invalid filename: {}. The name must match `Freq <start> - <end>` to know the frequency index",
            path.display()
        );
    };
    caps[1]
        .parse()
        .with_context(|| format!("Frequency index out of range in {}", path.display()))
}

fn log_unresolved(set: &RecordSet, reason: Unresolved) {
    let records = set
        .records()
        .iter()
        .map(|record| format!("\t{record}"))
        .collect::<Vec<_>>()
        .join("\n");
    log::warn!(
        "Unhandled case for {}, {} ({reason}):\n{records}",
        set.lemma(),
        set.part_of_speech().code()
    );
}

/// Cards for one lemma, plus the report entry when the lemma could not be
/// declined. Suppressed lemmas and invalid groups give no card.
pub fn cards_for_group(group: &LexiqueGroup) -> (Vec<CardRow>, Option<UnresolvedLemma>) {
    let set = match group.to_record_set() {
        Ok(set) => set,
        Err(err) => {
            log::warn!("Skipping {}: {err}", group.lemma);
            return (Vec::new(), None);
        }
    };

    let pronunciation = group.pronunciation().to_string();
    let pos = group.cgram();
    let card = |markup: &str| CardRow {
        lemme: group.lemma.clone(),
        noun_declension: markup.to_string(),
        pronunciation: pronunciation.clone(),
        sound: String::new(),
        english_meaning: String::new(),
        pos: pos.clone(),
        tags: String::new(),
    };

    match lexique_utils::decline(&set) {
        LemmaOutcome::Suppressed => {
            log::debug!("{} is covered by another entry", group.lemma);
            (Vec::new(), None)
        }
        LemmaOutcome::Declined(Ok(declension)) => {
            (declension.cards().into_iter().map(card).collect(), None)
        }
        LemmaOutcome::Declined(Err(reason)) => {
            log_unresolved(&set, reason);
            (vec![card("")], Some(UnresolvedLemma::new(&set, reason)))
        }
    }
}

fn write_cards(path: &Path, cards: &[CardRow]) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create deck file: {}", path.display()))?;
    writer
        .write_record(CARD_HEADER)
        .context("Failed to write deck header")?;
    for card in cards {
        writer
            .serialize(card)
            .with_context(|| format!("Failed to write card for {}", card.lemme))?;
    }
    writer.flush().context("Failed to flush deck file")?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDeck {
    pub path: PathBuf,
    pub lemmas: usize,
    pub cards: usize,
    /// Undeclined lemmas so far, this deck included.
    pub formatting_exceptions: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub decks: Vec<ExportedDeck>,
    pub unresolved: Vec<UnresolvedLemma>,
}

pub fn export_decks(
    input: &Path,
    output_dir: &Path,
    config: &DeckConfig,
) -> anyhow::Result<ExportSummary> {
    anyhow::ensure!(config.chunk_size > 0, "chunk size must be at least 1");
    let freq_start = parse_start_frequency(input)?;
    let groups = group_by_lemma(read_rows(input)?);
    std::fs::create_dir_all(output_dir).context("Failed to create deck output directory")?;

    let mut report = match &config.unresolved_report {
        Some(path) => Some(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open report file: {}", path.display()))?,
        ),
        None => None,
    };

    let mut summary = ExportSummary::default();
    for (chunk_idx, chunk) in groups.chunks(config.chunk_size).enumerate() {
        let start = freq_start + chunk_idx * config.chunk_size;
        let end = start + chunk.len() - 1;

        let mut cards = Vec::new();
        for group in chunk {
            let (group_cards, unresolved) = cards_for_group(group);
            cards.extend(group_cards);
            if let Some(unresolved) = unresolved {
                if let Some(report) = report.as_mut() {
                    let json = serde_json::to_string(&unresolved)
                        .context("Failed to serialize unresolved lemma")?;
                    writeln!(report, "{json}").context("Failed to write report line")?;
                }
                summary.unresolved.push(unresolved);
            }
        }

        let path = output_dir.join(format!("{}{start}-{end}.csv", config.output_prefix));
        write_cards(&path, &cards)?;
        log::info!("Exported {} lemmas to {}", chunk.len(), path.display());
        summary.decks.push(ExportedDeck {
            path,
            lemmas: chunk.len(),
            cards: cards.len(),
            formatting_exceptions: summary.unresolved.len(),
        });
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology_analysis::{LexiqueRow, row, write_rows};

    fn group(lemma: &str, rows: Vec<LexiqueRow>) -> LexiqueGroup {
        LexiqueGroup {
            lemma: lemma.to_string(),
            rows,
        }
    }

    #[test]
    fn test_parse_start_frequency() {
        assert_eq!(
            parse_start_frequency(Path::new("out/Freq 501 - 1000.csv")).unwrap(),
            501
        );
        assert!(parse_start_frequency(Path::new("Freq 1-500.csv")).is_err());
        assert!(parse_start_frequency(Path::new("lexique.csv")).is_err());
    }

    #[test]
    fn test_homograph_gives_two_cards() {
        let (cards, unresolved) = cards_for_group(&group(
            "tour",
            vec![
                row("tour", "tour", "NOM", "", "s"),
                row("tours", "tour", "NOM", "", "p"),
            ],
        ));
        assert!(unresolved.is_none());
        assert_eq!(cards.len(), 2);
        assert_eq!(
            cards[1].noun_declension,
            "<b><red>la tour</red></b> [<gr><i>pl. </i></gr><red>les tours</red>]"
        );
        assert_eq!(cards[0].pos, "nom");
        assert_eq!(cards[0].pronunciation, "tour");
    }

    #[test]
    fn test_unresolved_gives_empty_card() {
        let (cards, unresolved) = cards_for_group(&group(
            "page",
            vec![
                row("page", "page", "NOM", "m", "s"),
                row("pages", "page", "NOM", "f", "p"),
            ],
        ));
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].noun_declension, "");
        let unresolved = unresolved.unwrap();
        assert_eq!(unresolved.lemma, "page");
        assert_eq!(unresolved.records.len(), 2);
        assert_eq!(unresolved.records[1].genre, Genre::Feminine);
    }

    #[test]
    fn test_suppressed_gives_no_card() {
        let (cards, unresolved) = cards_for_group(&group(
            "toutes",
            vec![row("toutes", "toutes", "ADJ:ind", "f", "p")],
        ));
        assert!(cards.is_empty());
        assert!(unresolved.is_none());
    }

    #[test]
    fn test_export_decks() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Freq 11 - 13.csv");
        write_rows(
            &input,
            &[
                row("parler", "parler", "ver", "", ""),
                row("parlons", "parler", "ver", "", "p"),
                row("page", "page", "nom", "m", "s"),
                row("pages", "page", "nom", "f", "p"),
                row("arbre", "arbre", "nom", "m", "s"),
                row("arbres", "arbre", "nom", "m", "p"),
            ],
        )
        .unwrap();
        let report = dir.path().join("unresolved.jsonl");
        let config = DeckConfig {
            chunk_size: 2,
            unresolved_report: Some(report.clone()),
            ..DeckConfig::default()
        };
        let out = dir.path().join("decks");
        let summary = export_decks(&input, &out, &config).unwrap();

        let names: Vec<_> = summary
            .decks
            .iter()
            .map(|d| d.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["anki_deck_11-12.csv", "anki_deck_13-13.csv"]);
        assert_eq!(summary.unresolved.len(), 1);
        let counts: Vec<_> = summary
            .decks
            .iter()
            .map(|d| (d.lemmas, d.cards, d.formatting_exceptions))
            .collect();
        assert_eq!(counts, vec![(2, 2, 1), (1, 1, 1)]);

        let mut reader = csv::Reader::from_path(&summary.decks[1].path).unwrap();
        let cards: Vec<CardRow> = reader.deserialize().map(Result::unwrap).collect();
        assert_eq!(cards.len(), 1);
        assert_eq!(
            cards[0].noun_declension,
            "<b><blue>l'arbre</blue></b> [<gr><i>pl. </i></gr><blue>les arbres</blue>]"
        );

        let report = std::fs::read_to_string(report).unwrap();
        let lines: Vec<UnresolvedLemma> = report
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].lemma, "page");
    }

    #[test]
    fn test_empty_deck_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.csv");
        write_cards(&path, &[]).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            content.trim_end(),
            "Lemme,Noun Declension,Pronunciation,Sound,English Meaning,POS,Tags"
        );
    }
}
