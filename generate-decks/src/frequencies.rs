//! Splits the filtered lexicon into frequency-ranked chunks, each mixing
//! the most frequent spoken lemmas with the most frequent written ones.

use anyhow::Context;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};

use crate::config::DeckConfig;
use crate::morphology_analysis::{LexiqueRow, read_rows, write_rows};

/// A lemma that can be picked: its first `islem` row carries the
/// frequencies it is ranked by.
#[derive(Debug, Clone)]
struct Candidate {
    lemma: String,
    first_row: usize,
    films: f64,
    livres: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyChunk {
    /// 1-based frequency rank of the chunk's first lemma.
    pub start: usize,
    pub end: usize,
    pub rows: Vec<LexiqueRow>,
}

impl FrequencyChunk {
    pub fn file_name(&self) -> String {
        format!("Freq {} - {}.csv", self.start, self.end)
    }
}

/// Removes and returns the `count` best candidates by `key`. Ties keep file
/// order and the remaining candidates stay in file order.
fn take_top(
    candidates: &mut Vec<Candidate>,
    count: usize,
    key: impl Fn(&Candidate) -> f64,
) -> Vec<Candidate> {
    let mut ranked = std::mem::take(candidates);
    ranked.sort_by(|a, b| key(b).total_cmp(&key(a)));
    let mut rest = ranked.split_off(count.min(ranked.len()));
    rest.sort_by_key(|candidate| candidate.first_row);
    *candidates = rest;
    ranked
}

/// Chunks rows until no lemma with an `islem` row is left. Rows of lemmas
/// that never have one are not emitted.
pub fn split_by_frequency(
    rows: Vec<LexiqueRow>,
    spoken_count: usize,
    written_count: usize,
) -> Vec<FrequencyChunk> {
    let mut seen = FxHashSet::default();
    let mut candidates: Vec<Candidate> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.islem && seen.insert(row.lemme.clone()))
        .map(|(idx, row)| Candidate {
            lemma: row.lemme.clone(),
            first_row: idx,
            films: row.freqlemfilms,
            livres: row.freqlemlivres,
        })
        .collect();

    let mut rows_by_lemma: IndexMap<String, Vec<LexiqueRow>> = IndexMap::new();
    for row in rows {
        rows_by_lemma.entry(row.lemme.clone()).or_default().push(row);
    }

    let mut chunks = Vec::new();
    let mut start = 1;
    loop {
        let spoken = take_top(&mut candidates, spoken_count, |c| c.films);
        if spoken.is_empty() {
            break;
        }
        let written = take_top(&mut candidates, written_count, |c| c.livres);

        let lemma_count = spoken.len() + written.len();
        let rows = spoken
            .iter()
            .chain(&written)
            .flat_map(|candidate| {
                rows_by_lemma
                    .swap_remove(&candidate.lemma)
                    .unwrap_or_default()
            })
            .collect();
        let end = start + lemma_count - 1;
        chunks.push(FrequencyChunk { start, end, rows });
        start = end + 1;
    }

    let leftover: usize = rows_by_lemma.values().map(Vec::len).sum();
    if leftover > 0 {
        log::warn!(
            "{leftover} rows from {} lemmas without an islem row were not chunked",
            rows_by_lemma.len()
        );
    }
    chunks
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkFile {
    pub path: PathBuf,
    pub start: usize,
    pub end: usize,
}

pub fn write_frequency_chunks(
    input: &Path,
    output_dir: &Path,
    config: &DeckConfig,
) -> anyhow::Result<Vec<ChunkFile>> {
    anyhow::ensure!(
        config.spoken_count > 0,
        "spoken count must be at least 1 to make progress"
    );
    let rows = read_rows(input)?;
    std::fs::create_dir_all(output_dir).context("Failed to create chunk output directory")?;

    let mut files = Vec::new();
    for chunk in split_by_frequency(rows, config.spoken_count, config.written_count) {
        let path = output_dir.join(chunk.file_name());
        write_rows(&path, &chunk.rows)
            .with_context(|| format!("Failed to write chunk {}", path.display()))?;
        log::info!(
            "{}: {} lemmas",
            chunk.file_name(),
            chunk.end - chunk.start + 1
        );
        files.push(ChunkFile {
            path,
            start: chunk.start,
            end: chunk.end,
        });
    }
    Ok(files)
}
