//! First pass over the raw Lexique 3.83 export: keep the declinable
//! lemmas and the columns the later stages read.

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use std::path::Path;

use crate::config;
use crate::morphology_analysis::{LexiqueRow, group_by_lemma, write_rows};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub lemmas_kept: usize,
}

/// Reads the raw Lexique CSV, renaming its numbered columns. Every column
/// in [`config::KEPT_COLUMNS`] must be present; the others are ignored.
pub fn read_raw_lexique(path: &Path) -> anyhow::Result<Vec<LexiqueRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open Lexique file: {}", path.display()))?;

    let headers = reader
        .headers()
        .context("Failed to read Lexique header row")?
        .clone();
    for (raw, _) in config::KEPT_COLUMNS {
        if !headers.iter().any(|h| h.trim() == raw) {
            anyhow::bail!("Missing required column `{raw}` in {}", path.display());
        }
    }
    let renamed: csv::StringRecord = headers
        .iter()
        .map(|h| {
            let h = h.trim();
            config::KEPT_COLUMNS
                .iter()
                .find(|(raw, _)| *raw == h)
                .map_or(h, |(_, name)| *name)
        })
        .collect();
    reader.set_headers(renamed);

    reader
        .deserialize()
        .enumerate()
        .map(|(idx, row)| row.with_context(|| format!("Failed to read Lexique row {}", idx + 1)))
        .collect()
}

fn keeps_row(row: &LexiqueRow) -> bool {
    row.ortho.chars().count() > 2
        && row.lemme.chars().count() > 2
        && !config::is_banned_lemma(&row.lemme)
        && config::pos_rank(&row.cgram).is_some()
}

/// Applies the length, banned-lemma and POS filters, then keeps for each
/// lemma only the rows of its best-ranked POS. The output is grouped by
/// lemma in first-appearance order.
pub fn filter_rows(rows: Vec<LexiqueRow>) -> Vec<LexiqueRow> {
    let pb = ProgressBar::new(rows.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows ({per_sec}, {eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let kept = rows
        .into_iter()
        .map(|mut row| {
            pb.inc(1);
            row.cgram = row.cgram.to_lowercase();
            row
        })
        .filter(keeps_row)
        .collect_vec();
    pb.finish_and_clear();

    group_by_lemma(kept)
        .into_iter()
        .flat_map(|group| {
            let best = group
                .rows
                .iter()
                .filter_map(|row| config::pos_rank(&row.cgram))
                .min();
            group
                .rows
                .into_iter()
                .filter(move |row| config::pos_rank(&row.cgram) == best)
        })
        .collect()
}

pub fn filter_lexique(input: &Path, output: &Path) -> anyhow::Result<FilterSummary> {
    let rows = read_raw_lexique(input)?;
    let rows_read = rows.len();

    let kept = filter_rows(rows);
    let lemmas_kept = kept.iter().map(|row| &row.lemme).unique().count();
    write_rows(output, &kept)
        .with_context(|| format!("Failed to write filtered lexicon to {}", output.display()))?;

    let summary = FilterSummary {
        rows_read,
        rows_kept: kept.len(),
        lemmas_kept,
    };
    log::info!("{summary:?}");
    Ok(summary)
}
