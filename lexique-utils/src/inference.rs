//! Fills in missing gender and number values for a lemma's records and
//! decides which paradigm the card shows.
//!
//! Every rule works by elimination inside a group of at most four records.
//! When elimination leaves zero or several candidates the lemma is
//! [`Unresolved`]; nothing here guesses.

use std::collections::BTreeSet;

use crate::features::{Cell, Genre, Nombre};
use crate::{AttributeRecord, PartOfSpeech, RecordSet, Unresolved};

/// The resolved forms of a lemma, independent of how they were resolved.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Paradigm {
    /// Only the lemma is shown.
    Bare,
    /// The word only exists in the plural.
    PluralOnly { plural: String },
    /// One gender, singular shown as the lemma.
    Gendered { genre: Genre, plural: String },
    /// Singular/plural pair with no gender information.
    Ungendered { plural: String },
    /// Two words spelled alike, one masculine and one feminine, sharing a plural.
    GenderSplit { plural: String },
    Triple {
        masculine: String,
        plural: String,
        feminine: Option<String>,
    },
    Matrix {
        ms: String,
        mpl: String,
        fs: String,
        fpl: String,
    },
}

pub fn resolve(set: &RecordSet) -> Result<Paradigm, Unresolved> {
    let lemma = set.lemma();
    let pos = set.part_of_speech();
    // inference never touches the caller's records
    let mut records = set.records().to_vec();

    let paradigm = match records.len() {
        0 => Err(Unresolved::MalformedGroup("no records")),
        1 if pos.is_adjectival() => Ok(Paradigm::Bare),
        2..=4 if pos.is_adjectival() && is_invariant_adjective(lemma, &records) => {
            Ok(Paradigm::Bare)
        }
        1 => resolve_single(&records[0]),
        2 => resolve_pair(pos, &mut records),
        3 => resolve_triple(&mut records),
        4 => resolve_matrix(&mut records),
        _ => Err(Unresolved::MalformedGroup("more than four records")),
    };

    match &paradigm {
        Ok(paradigm) => log::debug!("{lemma}: {} records resolved to {paradigm:?}", records.len()),
        Err(reason) => log::debug!("{lemma}: {} records unresolved ({reason})", records.len()),
    }
    paradigm
}

/// Every form is spelled like the lemma and no gender is given.
fn is_invariant_adjective(lemma: &str, records: &[AttributeRecord]) -> bool {
    records
        .iter()
        .all(|r| r.surface_form == lemma && r.genre == Genre::Unknown)
}

fn resolve_single(record: &AttributeRecord) -> Result<Paradigm, Unresolved> {
    match (record.nombre, record.genre) {
        (Nombre::Plural, _) => Ok(Paradigm::PluralOnly {
            plural: record.surface_form.clone(),
        }),
        (_, Genre::Unknown) => Err(Unresolved::AmbiguousInference(
            "single singular record without a gender",
        )),
        // the regular plural is assumed to exist
        (_, genre) => Ok(Paradigm::Gendered {
            genre,
            plural: record.surface_form.clone(),
        }),
    }
}

fn resolve_pair(
    pos: PartOfSpeech,
    records: &mut [AttributeRecord],
) -> Result<Paradigm, Unresolved> {
    let [first, second] = records else {
        return Err(Unresolved::MalformedGroup("expected two records"));
    };

    match (first.nombre.is_known(), second.nombre.is_known()) {
        (true, false) => second.nombre = first.nombre.complement(),
        (false, true) => first.nombre = second.nombre.complement(),
        _ => {}
    }
    if !first.nombre.is_known() || first.nombre == second.nombre {
        return Err(Unresolved::AmbiguousInference(
            "two records without one singular and one plural",
        ));
    }

    let plural = second.surface_form.clone();

    if first.genre == Genre::Unknown
        && second.genre == Genre::Unknown
        && first.nombre == Nombre::Singular
    {
        return Ok(if pos.is_adjectival() {
            Paradigm::Ungendered { plural }
        } else {
            Paradigm::GenderSplit { plural }
        });
    }

    match (first.genre, second.genre) {
        (Genre::Masculine, Genre::Feminine) | (Genre::Feminine, Genre::Masculine) => Err(
            Unresolved::MalformedGroup("singular and plural disagree on gender"),
        ),
        (Genre::Masculine, _) | (_, Genre::Masculine) => Ok(Paradigm::Gendered {
            genre: Genre::Masculine,
            plural,
        }),
        (Genre::Feminine, _) | (_, Genre::Feminine) => Ok(Paradigm::Gendered {
            genre: Genre::Feminine,
            plural,
        }),
        (Genre::Unknown, Genre::Unknown) => Err(Unresolved::AmbiguousInference(
            "no gender and the plural is listed first",
        )),
    }
}

fn resolve_triple(records: &mut [AttributeRecord]) -> Result<Paradigm, Unresolved> {
    let missing_nombre = records.iter().filter(|r| !r.nombre.is_known()).count();
    let missing_genre = records.iter().filter(|r| !r.genre.is_known()).count();
    if missing_nombre > 1 || missing_genre > 1 {
        return Err(Unresolved::AmbiguousInference(
            "more than one missing value on an axis",
        ));
    }

    if let Some(idx) = records.iter().position(|r| !r.nombre.is_known()) {
        let singulars = count_nombre(records, Nombre::Singular);
        let plurals = count_nombre(records, Nombre::Plural);
        records[idx].nombre = match (singulars, plurals) {
            (2, 0) => Nombre::Plural,
            (1, 1) => Nombre::Singular,
            _ => {
                return Err(Unresolved::AmbiguousInference(
                    "missing number cannot be eliminated",
                ));
            }
        };
    }

    // a plural record's gender is never shown, so it may stay unknown
    if let Some(idx) = records.iter().position(|r| !r.genre.is_known())
        && records[idx].nombre == Nombre::Singular
    {
        let other_genres: Vec<Genre> = records
            .iter()
            .enumerate()
            .filter(|(i, r)| *i != idx && r.nombre == Nombre::Singular && r.genre.is_known())
            .map(|(_, r)| r.genre)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let [genre] = other_genres[..] else {
            return Err(Unresolved::AmbiguousInference(
                "missing gender cannot be eliminated",
            ));
        };
        records[idx].genre = genre.complement();
    }

    let forms_in = |genre: Option<Genre>, nombre: Nombre| -> Vec<String> {
        records
            .iter()
            .filter(|r| r.nombre == nombre && genre.is_none_or(|g| r.genre == g))
            .map(|r| r.surface_form.clone())
            .collect()
    };
    let masculine = forms_in(Some(Genre::Masculine), Nombre::Singular);
    let feminine = forms_in(Some(Genre::Feminine), Nombre::Singular);
    let plural = forms_in(None, Nombre::Plural);

    let ([masculine], [plural]) = (&masculine[..], &plural[..]) else {
        return Err(Unresolved::MalformedGroup(
            "expected one masculine singular and one plural",
        ));
    };
    let feminine = match &feminine[..] {
        [] => None,
        [feminine] => Some(feminine.clone()),
        _ => {
            return Err(Unresolved::MalformedGroup(
                "more than one feminine singular",
            ));
        }
    };

    if plural == masculine && feminine.as_ref().is_none_or(|f| f == masculine) {
        return Err(Unresolved::AmbiguousInference(
            "no form differs from the masculine singular",
        ));
    }

    Ok(Paradigm::Triple {
        masculine: masculine.clone(),
        plural: plural.clone(),
        feminine,
    })
}

fn count_nombre(records: &[AttributeRecord], nombre: Nombre) -> usize {
    records.iter().filter(|r| r.nombre == nombre).count()
}

fn cell_of(record: &AttributeRecord) -> Cell {
    Cell::new(record.genre, record.nombre)
}

fn resolve_matrix(records: &mut [AttributeRecord]) -> Result<Paradigm, Unresolved> {
    let incomplete: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| !cell_of(r).is_complete())
        .map(|(i, _)| i)
        .collect();

    match incomplete[..] {
        [] => {}
        [idx] if !records[idx].genre.is_known() && !records[idx].nombre.is_known() => {
            let occupied: BTreeSet<Cell> = records
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != idx)
                .map(|(_, r)| cell_of(r))
                .collect();
            let free: Vec<Cell> = Cell::ALL
                .into_iter()
                .filter(|cell| !occupied.contains(cell))
                .collect();
            let [cell] = free[..] else {
                return Err(Unresolved::MalformedGroup(
                    "complete records do not cover three distinct cells",
                ));
            };
            records[idx].genre = cell.genre;
            records[idx].nombre = cell.nombre;
        }
        _ => {
            return Err(Unresolved::MalformedGroup(
                "more than one cell is incomplete",
            ));
        }
    }

    let mut slots: [Option<String>; 4] = Default::default();
    for record in records.iter() {
        let cell = cell_of(record);
        let Some(i) = Cell::ALL.iter().position(|c| *c == cell) else {
            return Err(Unresolved::MalformedGroup("record outside the paradigm"));
        };
        if slots[i].is_some() {
            return Err(Unresolved::MalformedGroup("two records share a cell"));
        }
        slots[i] = Some(record.surface_form.clone());
    }

    let [Some(ms), Some(mpl), Some(fs), Some(fpl)] = slots else {
        return Err(Unresolved::MalformedGroup("a cell of the paradigm is empty"));
    };
    Ok(Paradigm::Matrix { ms, mpl, fs, fpl })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(lemma: &str, cgram: &str, rows: &[(&str, &str, &str)]) -> RecordSet {
        let pos = PartOfSpeech::from_cgram(cgram).unwrap();
        let records = rows
            .iter()
            .map(|(form, genre, nombre)| {
                AttributeRecord::new(*form, Genre::from_code(genre), Nombre::from_code(nombre), pos)
            })
            .collect();
        RecordSet::new(lemma, records).unwrap()
    }

    fn gendered(genre: Genre, plural: &str) -> Paradigm {
        Paradigm::Gendered {
            genre,
            plural: plural.to_string(),
        }
    }

    #[test]
    fn test_single_noun() {
        assert_eq!(
            resolve(&set("chat", "nom", &[("chat", "m", "s")])),
            Ok(gendered(Genre::Masculine, "chat"))
        );
        assert_eq!(
            resolve(&set("maison", "nom", &[("maison", "f", "")])),
            Ok(gendered(Genre::Feminine, "maison"))
        );
        assert_eq!(
            resolve(&set("gens", "nom", &[("gens", "m", "p")])),
            Ok(Paradigm::PluralOnly {
                plural: "gens".to_string()
            })
        );
        assert!(matches!(
            resolve(&set("truc", "nom", &[("truc", "", "s")])),
            Err(Unresolved::AmbiguousInference(_))
        ));
    }

    #[test]
    fn test_single_adjective_is_bare() {
        assert_eq!(
            resolve(&set("rouge", "adj", &[("rouge", "", "")])),
            Ok(Paradigm::Bare)
        );
    }

    #[test]
    fn test_invariant_adjective_is_bare() {
        let rows = [("marron", "", "s"), ("marron", "", "p")];
        assert_eq!(resolve(&set("marron", "adj", &rows)), Ok(Paradigm::Bare));
    }

    #[test]
    fn test_pair_infers_missing_number() {
        let rows = [("cheval", "m", "s"), ("chevaux", "m", "")];
        assert_eq!(
            resolve(&set("cheval", "nom", &rows)),
            Ok(gendered(Genre::Masculine, "chevaux"))
        );
        let rows = [("fleur", "f", ""), ("fleurs", "", "p")];
        assert_eq!(
            resolve(&set("fleur", "nom", &rows)),
            Ok(gendered(Genre::Feminine, "fleurs"))
        );
    }

    #[test]
    fn test_pair_without_number_split_fails() {
        let rows = [("chose", "f", ""), ("choses", "f", "")];
        assert!(matches!(
            resolve(&set("chose", "nom", &rows)),
            Err(Unresolved::AmbiguousInference(_))
        ));
        let rows = [("chose", "f", "s"), ("chosé", "f", "s")];
        assert!(matches!(
            resolve(&set("chose", "nom", &rows)),
            Err(Unresolved::AmbiguousInference(_))
        ));
    }

    #[test]
    fn test_pair_homograph() {
        let rows = [("tour", "", "s"), ("tours", "", "p")];
        assert_eq!(
            resolve(&set("tour", "nom", &rows)),
            Ok(Paradigm::GenderSplit {
                plural: "tours".to_string()
            })
        );
        assert_eq!(
            resolve(&set("tour", "adj", &rows)),
            Ok(Paradigm::Ungendered {
                plural: "tours".to_string()
            })
        );
    }

    #[test]
    fn test_pair_homograph_needs_singular_first() {
        let rows = [("tours", "", "p"), ("tour", "", "s")];
        assert!(matches!(
            resolve(&set("tour", "nom", &rows)),
            Err(Unresolved::AmbiguousInference(_))
        ));
    }

    #[test]
    fn test_pair_conflicting_genders() {
        let rows = [("mousse", "m", "s"), ("mousse", "f", "s")];
        assert!(resolve(&set("mousse", "nom", &rows)).is_err());
        let rows = [("page", "m", "s"), ("pages", "f", "p")];
        assert!(matches!(
            resolve(&set("page", "nom", &rows)),
            Err(Unresolved::MalformedGroup(_))
        ));
    }

    #[test]
    fn test_pair_takes_gender_from_either_record() {
        let rows = [("ami", "", "s"), ("amis", "m", "p")];
        assert_eq!(
            resolve(&set("ami", "adj", &rows)),
            Ok(gendered(Genre::Masculine, "amis"))
        );
    }

    #[test]
    fn test_triple_elimination() {
        let rows = [("grand", "m", "s"), ("grands", "m", "p"), ("grande", "", "")];
        assert_eq!(
            resolve(&set("grand", "adj", &rows)),
            Ok(Paradigm::Triple {
                masculine: "grand".to_string(),
                plural: "grands".to_string(),
                feminine: Some("grande".to_string()),
            })
        );
    }

    #[test]
    fn test_triple_infers_plural_from_two_singulars() {
        let rows = [("acteur", "m", "s"), ("actrice", "f", "s"), ("acteurs", "", "")];
        assert_eq!(
            resolve(&set("acteur", "nom", &rows)),
            Ok(Paradigm::Triple {
                masculine: "acteur".to_string(),
                plural: "acteurs".to_string(),
                feminine: Some("actrice".to_string()),
            })
        );
    }

    #[test]
    fn test_triple_too_many_missing() {
        let rows = [("a1", "m", ""), ("a2", "f", ""), ("a3", "m", "p")];
        assert!(matches!(
            resolve(&set("abc", "nom", &rows)),
            Err(Unresolved::AmbiguousInference(_))
        ));
    }

    #[test]
    fn test_triple_two_plurals_cannot_eliminate() {
        let rows = [("os", "m", "p"), ("ossements", "m", "p"), ("osse", "m", "")];
        assert!(matches!(
            resolve(&set("oss", "nom", &rows)),
            Err(Unresolved::AmbiguousInference(_))
        ));
    }

    #[test]
    fn test_triple_without_distinct_forms_fails() {
        let rows = [("souris", "m", "s"), ("souris", "m", "p"), ("souris", "", "s")];
        assert!(matches!(
            resolve(&set("souris", "nom", &rows)),
            Err(Unresolved::AmbiguousInference(_))
        ));
    }

    #[test]
    fn test_triple_requires_masculine_singular() {
        let rows = [("belle", "f", "s"), ("belles", "f", "p"), ("bellot", "f", "s")];
        assert!(matches!(
            resolve(&set("belle", "adj", &rows)),
            Err(Unresolved::MalformedGroup(_))
        ));
    }

    #[test]
    fn test_matrix_complete() {
        let rows = [
            ("beau", "m", "s"),
            ("beaux", "m", "p"),
            ("belle", "f", "s"),
            ("belles", "f", "p"),
        ];
        assert_eq!(
            resolve(&set("beau", "adj", &rows)),
            Ok(Paradigm::Matrix {
                ms: "beau".to_string(),
                mpl: "beaux".to_string(),
                fs: "belle".to_string(),
                fpl: "belles".to_string(),
            })
        );
    }

    #[test]
    fn test_matrix_fills_single_missing_cell() {
        let rows = [
            ("neuf", "m", "s"),
            ("neuves", "", ""),
            ("neufs", "m", "p"),
            ("neuve", "f", "s"),
        ];
        assert_eq!(
            resolve(&set("neuf", "adj", &rows)),
            Ok(Paradigm::Matrix {
                ms: "neuf".to_string(),
                mpl: "neufs".to_string(),
                fs: "neuve".to_string(),
                fpl: "neuves".to_string(),
            })
        );
    }

    #[test]
    fn test_matrix_partial_gaps_are_not_recovered() {
        let rows = [
            ("neuf", "m", "s"),
            ("neufs", "m", ""),
            ("neuve", "", "s"),
            ("neuves", "f", "p"),
        ];
        assert!(matches!(
            resolve(&set("neuf", "adj", &rows)),
            Err(Unresolved::MalformedGroup(_))
        ));
    }

    #[test]
    fn test_matrix_duplicate_cells() {
        let rows = [
            ("neuf", "m", "s"),
            ("neufs", "m", "p"),
            ("neuve", "m", "s"),
            ("neuves", "", ""),
        ];
        assert!(matches!(
            resolve(&set("neuf", "adj", &rows)),
            Err(Unresolved::MalformedGroup(_))
        ));
    }

    #[test]
    fn test_five_records_are_malformed() {
        let rows = [
            ("beau", "m", "s"),
            ("beaux", "m", "p"),
            ("belle", "f", "s"),
            ("belles", "f", "p"),
            ("bel", "m", "s"),
        ];
        assert_eq!(
            resolve(&set("beau", "adj", &rows)),
            Err(Unresolved::MalformedGroup("more than four records"))
        );
        let rows = [("vieux", "", ""); 6];
        assert!(resolve(&set("vieux", "adj", &rows)).is_err());
    }

    #[test]
    fn test_source_records_are_untouched() {
        let set = set("cheval", "nom", &[("cheval", "m", "s"), ("chevaux", "m", "")]);
        let before = set.clone();
        resolve(&set).unwrap();
        assert_eq!(set, before);
    }
}
