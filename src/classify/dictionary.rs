//! IPC sections and the section → category dictionary

use crate::error::{Error, Result};
use crate::source::RawTable;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Label used when a code contains no section letter
pub const UNCLASSIFIED: &str = "Unclassified";

/// Name of the key column in the dictionary table
const SECTION_COLUMN: &str = "Section";

/// Top-level IPC section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Section {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl Section {
    /// All sections in key order
    pub const ALL: [Section; 8] = [
        Section::A,
        Section::B,
        Section::C,
        Section::D,
        Section::E,
        Section::F,
        Section::G,
        Section::H,
    ];

    /// Section for an uppercase letter `A`..=`H`
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Section::A),
            'B' => Some(Section::B),
            'C' => Some(Section::C),
            'D' => Some(Section::D),
            'E' => Some(Section::E),
            'F' => Some(Section::F),
            'G' => Some(Section::G),
            'H' => Some(Section::H),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Section::A => 'A',
            Section::B => 'B',
            Section::C => 'C',
            Section::D => 'D',
            Section::E => 'E',
            Section::F => 'F',
            Section::G => 'G',
            Section::H => 'H',
        }
    }

    /// Category label used by [`ClassificationDictionary::standard`]
    pub fn standard_label(self) -> &'static str {
        match self {
            Section::A => "Human Necessities",
            Section::B => "Performing Operations, Transporting",
            Section::C => "Chemistry, Metallurgy",
            Section::D => "Textiles, Paper",
            Section::E => "Fixed Constructions",
            Section::F => "Mechanical Engineering",
            Section::G => "Physics",
            Section::H => "Electricity",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        let mut chars = key.chars();
        match (chars.next().and_then(Section::from_char), chars.next()) {
            (Some(section), None) => Ok(section),
            _ => Err(Error::integrity(format!(
                "'{key}' is not a section key (expected one letter A-H)"
            ))),
        }
    }
}

/// Mapping from every IPC section to its category label.
///
/// Construction fails unless all eight sections are present, so lookups never miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationDictionary {
    labels: [String; 8],
}

impl Default for ClassificationDictionary {
    fn default() -> Self {
        Self::standard()
    }
}

impl ClassificationDictionary {
    /// Built-in IPC section labels
    pub fn standard() -> Self {
        Self {
            labels: Section::ALL.map(|section| section.standard_label().to_string()),
        }
    }

    /// Build from (section, label) pairs.
    ///
    /// Repeating a section with the same label is allowed; a different label,
    /// a blank label, or a missing section is an integrity error.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Section, S)>,
        S: Into<String>,
    {
        let mut labels: [Option<String>; 8] = Default::default();

        for (section, label) in pairs {
            let label = label.into().trim().to_string();
            if label.is_empty() {
                return Err(Error::integrity(format!(
                    "section {section} has an empty label"
                )));
            }

            match &labels[section.index()] {
                Some(existing) if *existing != label => {
                    return Err(Error::integrity(format!(
                        "section {section} mapped to both '{existing}' and '{label}'"
                    )));
                }
                Some(_) => {}
                None => labels[section.index()] = Some(label),
            }
        }

        let missing: Vec<String> = Section::ALL
            .iter()
            .filter(|section| labels[section.index()].is_none())
            .map(ToString::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(Error::integrity(format!(
                "missing section(s) {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            labels: labels.map(Option::unwrap_or_default),
        })
    }

    /// Build from a table with a `Section` column and one label column
    pub fn from_table(table: &RawTable) -> Result<Self> {
        let section_col = table.column_index(SECTION_COLUMN).ok_or_else(|| {
            Error::integrity(format!(
                "dictionary has no '{SECTION_COLUMN}' column (headers: {})",
                table.headers().join(", ")
            ))
        })?;

        if table.num_columns() != 2 {
            return Err(Error::integrity(format!(
                "dictionary must have '{SECTION_COLUMN}' and exactly one label column, found [{}]",
                table.headers().join(", ")
            )));
        }
        let label_col = 1 - section_col;

        let pairs = table
            .rows()
            .iter()
            .enumerate()
            .map(|(line, row)| {
                let key = row[section_col].as_deref().ok_or_else(|| {
                    Error::integrity(format!("dictionary row {} has no section", line + 1))
                })?;
                let section: Section = key.parse()?;
                let label = row[label_col].clone().ok_or_else(|| {
                    Error::integrity(format!("section {section} has an empty label"))
                })?;
                Ok((section, label))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_pairs(pairs)
    }

    /// Category label for a section
    pub fn label(&self, section: Section) -> &str {
        &self.labels[section.index()]
    }

    /// Label for a key character, if it is a section letter
    pub fn lookup(&self, key: char) -> Option<&str> {
        Section::from_char(key).map(|section| self.label(section))
    }

    /// All (section, label) entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (Section, &str)> {
        Section::ALL
            .into_iter()
            .map(move |section| (section, self.label(section)))
    }
}
