//! Grammatical features recorded by Lexique for each orthographic form.
//!
//! Lexique leaves a cell empty when it does not know a value, so every axis
//! carries an explicit `Unknown` instead of relying on `Option`.

/// Gender is a lexical feature of nouns and an inflectional feature of
/// adjectives that agree with them. Lexique codes it as `m` or `f`.
#[derive(
    Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, serde::Serialize, serde::Deserialize,
)]
pub enum Genre {
    #[serde(rename = "m")]
    Masculine,
    #[serde(rename = "f")]
    Feminine,
    #[serde(rename = "")]
    Unknown,
}

impl Genre {
    /// Parses a Lexique `genre` cell. Anything other than `m` or `f` is unknown.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "m" => Genre::Masculine,
            "f" => Genre::Feminine,
            _ => Genre::Unknown,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Genre::Masculine => "m",
            Genre::Feminine => "f",
            Genre::Unknown => "",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != Genre::Unknown
    }

    /// The other gender. Unknown stays unknown.
    pub fn complement(&self) -> Self {
        match self {
            Genre::Masculine => Genre::Feminine,
            Genre::Feminine => Genre::Masculine,
            Genre::Unknown => Genre::Unknown,
        }
    }
}

/// Number is an inflectional feature of nouns and adjectives. Lexique codes
/// it as `s` or `p`.
#[derive(
    Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, serde::Serialize, serde::Deserialize,
)]
pub enum Nombre {
    #[serde(rename = "s")]
    Singular,
    #[serde(rename = "p")]
    Plural,
    #[serde(rename = "")]
    Unknown,
}

impl Nombre {
    /// Parses a Lexique `nombre` cell. Anything other than `s` or `p` is unknown.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "s" => Nombre::Singular,
            "p" => Nombre::Plural,
            _ => Nombre::Unknown,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Nombre::Singular => "s",
            Nombre::Plural => "p",
            Nombre::Unknown => "",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != Nombre::Unknown
    }

    pub fn complement(&self) -> Self {
        match self {
            Nombre::Singular => Nombre::Plural,
            Nombre::Plural => Nombre::Singular,
            Nombre::Unknown => Nombre::Unknown,
        }
    }
}

/// One cell of the gender × number paradigm.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Cell {
    pub genre: Genre,
    pub nombre: Nombre,
}

impl Cell {
    /// The four cells in bracket order: ms, mpl, fs, fpl.
    pub const ALL: [Cell; 4] = [
        Cell::new(Genre::Masculine, Nombre::Singular),
        Cell::new(Genre::Masculine, Nombre::Plural),
        Cell::new(Genre::Feminine, Nombre::Singular),
        Cell::new(Genre::Feminine, Nombre::Plural),
    ];

    pub const fn new(genre: Genre, nombre: Nombre) -> Self {
        Self { genre, nombre }
    }

    pub fn is_complete(&self) -> bool {
        self.genre.is_known() && self.nombre.is_known()
    }

    /// Bracket label, e.g. `mpl.`
    pub fn label(&self) -> &'static str {
        match (self.genre, self.nombre) {
            (Genre::Masculine, Nombre::Singular) => "ms.",
            (Genre::Masculine, Nombre::Plural) => "mpl.",
            (Genre::Feminine, Nombre::Singular) => "fs.",
            (Genre::Feminine, Nombre::Plural) => "fpl.",
            (Genre::Masculine, Nombre::Unknown) => "m.",
            (Genre::Feminine, Nombre::Unknown) => "f.",
            (Genre::Unknown, Nombre::Singular) => "s.",
            (Genre::Unknown, Nombre::Plural) => "pl.",
            (Genre::Unknown, Nombre::Unknown) => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Genre::from_code("m"), Genre::Masculine);
        assert_eq!(Genre::from_code(" f "), Genre::Feminine);
        assert_eq!(Genre::from_code(""), Genre::Unknown);
        assert_eq!(Genre::from_code("NaN"), Genre::Unknown);
        assert_eq!(Nombre::from_code("p"), Nombre::Plural);
        assert_eq!(Nombre::from_code("x"), Nombre::Unknown);
        assert_eq!(Nombre::Singular.code(), "s");
    }

    #[test]
    fn test_complements() {
        assert_eq!(Genre::Masculine.complement(), Genre::Feminine);
        assert_eq!(Genre::Unknown.complement(), Genre::Unknown);
        assert_eq!(Nombre::Plural.complement(), Nombre::Singular);
    }

    #[test]
    fn test_cell_labels_follow_bracket_order() {
        let labels: Vec<_> = Cell::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["ms.", "mpl.", "fs.", "fpl."]);
    }
}
