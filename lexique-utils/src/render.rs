//! Card markup for a resolved paradigm.
//!
//! The vocabulary is the one the Anki note type styles: `<b>` for the
//! headword, `<gr><i>` for bracket labels, `<blue>` for masculine forms and
//! `<red>` for feminine forms.

use crate::features::{Cell, Genre, Nombre};
use crate::inference::Paradigm;
use crate::{Declension, PartOfSpeech};

pub fn bold(text: &str) -> String {
    format!("<b>{text}</b>")
}

fn colored(genre: Genre, text: &str) -> String {
    match genre {
        Genre::Masculine => format!("<blue>{text}</blue>"),
        Genre::Feminine => format!("<red>{text}</red>"),
        Genre::Unknown => text.to_string(),
    }
}

fn article(cell: Cell) -> &'static str {
    match (cell.genre, cell.nombre) {
        (_, Nombre::Plural) => "les",
        (Genre::Feminine, _) => "la",
        _ => "le",
    }
}

fn slot(cell: Cell, body: &str) -> String {
    format!("<gr><i>{} </i></gr>{body}", cell.label())
}

/// `head [slot; slot; ...]`
fn bracketed(head: String, slots: &[String]) -> String {
    format!("{head} [{}]", slots.join("; "))
}

const PLURAL: Cell = Cell::new(Genre::Unknown, Nombre::Plural);

/// `le lemme [pl. les pluriel]`, coloured by gender.
fn noun_pair(lemma: &str, genre: Genre, plural: &str) -> String {
    let singular = Cell::new(genre, Nombre::Singular);
    let head = bold(&colored(genre, &format!("{} {lemma}", article(singular))));
    bracketed(
        head,
        &[slot(PLURAL, &colored(genre, &format!("les {plural}")))],
    )
}

fn render_triple(
    lemma: &str,
    masculine: &str,
    plural: &str,
    feminine: Option<&str>,
    pos: PartOfSpeech,
) -> String {
    let plural_differs = plural != masculine;
    let feminine = feminine.filter(|f| *f != masculine);

    if pos.is_adjectival() {
        let mut slots = Vec::with_capacity(3);
        let singular_label = if feminine.is_some() {
            Cell::new(Genre::Masculine, Nombre::Unknown)
        } else {
            Cell::new(Genre::Unknown, Nombre::Singular)
        };
        slots.push(slot(singular_label, &colored(Genre::Masculine, masculine)));
        slots.push(slot(PLURAL, &colored(Genre::Masculine, plural)));
        if let Some(feminine) = feminine {
            slots.push(slot(
                Cell::new(Genre::Feminine, Nombre::Unknown),
                &colored(Genre::Feminine, feminine),
            ));
        }
        return bracketed(bold(lemma), &slots);
    }

    match (plural_differs, feminine) {
        (true, Some(feminine)) => bracketed(
            bold(&colored(Genre::Masculine, &format!("le {lemma}"))),
            &[
                slot(PLURAL, &colored(Genre::Masculine, &format!("les {plural}"))),
                slot(
                    Cell::new(Genre::Feminine, Nombre::Unknown),
                    &colored(Genre::Feminine, &format!("la {feminine}")),
                ),
            ],
        ),
        (false, Some(_)) => noun_pair(lemma, Genre::Feminine, plural),
        (_, None) => noun_pair(lemma, Genre::Masculine, plural),
    }
}

fn render_matrix(lemma: &str, forms: [&str; 4], pos: PartOfSpeech) -> String {
    let slots: Vec<String> = Cell::ALL
        .iter()
        .zip(forms)
        .map(|(cell, form)| {
            if pos.is_adjectival() {
                slot(*cell, &colored(cell.genre, form))
            } else {
                // noun cells are set off from their label by a space
                let body = colored(cell.genre, &format!("{} {form}", article(*cell)));
                slot(*cell, &format!(" {body}"))
            }
        })
        .collect();
    bracketed(bold(lemma), &slots)
}

/// Renders a paradigm. Only the paradigm's values matter, not which
/// inference rule produced them.
pub fn render(lemma: &str, paradigm: &Paradigm, pos: PartOfSpeech) -> Declension {
    if pos.is_invariant() {
        return Declension::Single(bold(lemma));
    }

    let markup = match paradigm {
        Paradigm::Bare => bold(lemma),
        Paradigm::PluralOnly { plural } if pos.is_adjectival() => bold(plural),
        Paradigm::PluralOnly { plural } => bold(&format!("les {plural}")),
        Paradigm::Ungendered { plural }
        | Paradigm::Gendered {
            genre: Genre::Unknown,
            plural,
        } => bracketed(bold(lemma), &[slot(PLURAL, plural)]),
        Paradigm::Gendered { genre, plural } if pos.is_adjectival() => bracketed(
            bold(lemma),
            &[slot(
                Cell::new(*genre, Nombre::Plural),
                &colored(*genre, plural),
            )],
        ),
        Paradigm::Gendered { genre, plural } => noun_pair(lemma, *genre, plural),
        Paradigm::GenderSplit { plural } => {
            return Declension::Split([
                noun_pair(lemma, Genre::Masculine, plural),
                noun_pair(lemma, Genre::Feminine, plural),
            ]);
        }
        Paradigm::Triple {
            masculine,
            plural,
            feminine,
        } => render_triple(lemma, masculine, plural, feminine.as_deref(), pos),
        Paradigm::Matrix { ms, mpl, fs, fpl } => {
            render_matrix(lemma, [ms, mpl, fs, fpl].map(String::as_str), pos)
        }
    };
    Declension::Single(markup)
}
