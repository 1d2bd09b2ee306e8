//! Movie genre enumeration
//!
//! The catalog recognizes a closed set of genres. Membership is an
//! exhaustiveness guarantee of the type itself; the only runtime checks are
//! at the untyped boundaries, where a wire name or a menu index is turned
//! into a variant.

use std::fmt;

use serde_json::Value;

use super::error::{DomainError, DomainResult};

/// Closed set of catalog genres
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Romance,
    Action,
    Adventure,
    Comedy,
    Crime,
    Drama,
    Fantasy,
    Historical,
    Horror,
    Mystery,
    Psychological,
    ScienceFiction,
    Thriller,
    Western,
}

impl Category {
    /// Canonical menu order
    pub const ALL: [Category; 14] = [
        Category::Romance,
        Category::Action,
        Category::Adventure,
        Category::Comedy,
        Category::Crime,
        Category::Drama,
        Category::Fantasy,
        Category::Historical,
        Category::Horror,
        Category::Mystery,
        Category::Psychological,
        Category::ScienceFiction,
        Category::Thriller,
        Category::Western,
    ];

    /// Exact wire name of the genre
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Romance => "ROMANCE",
            Category::Action => "ACTION",
            Category::Adventure => "ADVENTURE",
            Category::Comedy => "COMEDY",
            Category::Crime => "CRIME",
            Category::Drama => "DRAMA",
            Category::Fantasy => "FANTASY",
            Category::Historical => "HISTORICAL",
            Category::Horror => "HORROR",
            Category::Mystery => "MYSTERY",
            Category::Psychological => "PSYCHOLOGICAL",
            Category::ScienceFiction => "SCIENCE_FICTION",
            Category::Thriller => "THRILLER",
            Category::Western => "WESTERN",
        }
    }

    /// Membership by exact name
    ///
    /// Anything that is not literally one of the defined names is a
    /// wrong-kind input, not a format problem the user can correct.
    pub fn from_name(name: &str) -> DomainResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == name)
            .ok_or(DomainError::type_failure(
                "category",
                "one of the catalog genres",
            ))
    }

    /// 1-based selection into [`Category::ALL`], as shown in menus
    pub fn from_index(index: usize) -> DomainResult<Self> {
        if (1..=Self::ALL.len()).contains(&index) {
            Ok(Self::ALL[index - 1])
        } else {
            Err(DomainError::format(
                "category",
                format!("pick a number between 1 and {}", Self::ALL.len()),
            ))
        }
    }

    pub fn from_json(value: &Value) -> DomainResult<Self> {
        match value.as_str() {
            Some(name) => Self::from_name(name),
            None => Err(DomainError::type_failure("category", "a string")),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
