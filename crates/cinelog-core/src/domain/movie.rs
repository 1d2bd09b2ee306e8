//! Movie and Like composites

use std::fmt;

use super::category::Category;
use super::values::{Description, Director, Id, Title, Year};

/// A fully validated catalog movie
///
/// Construction takes already-validated primitives, so a partially valid
/// movie is not representable; reconstructing one from a raw record goes
/// through [`super::record::MovieRecord::to_movie`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: Id,
    pub title: Title,
    pub description: Description,
    pub year: Year,
    pub category: Category,
    pub director: Director,
}

impl Movie {
    /// Discriminator tag for polymorphic handling of likeable entities
    pub const KIND: &'static str = "MOVIE";

    pub fn new(
        id: Id,
        title: Title,
        description: Description,
        year: Year,
        category: Category,
        director: Director,
    ) -> Self {
        Self {
            id,
            title,
            description,
            year,
            category,
            director,
        }
    }

    pub fn kind(&self) -> &'static str {
        Self::KIND
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Id: {}", self.id)?;
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Year: {}", self.year)?;
        writeln!(f, "Category: {}", self.category)?;
        writeln!(f, "Director: {}", self.director)
    }
}

/// A user's like of a movie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub user_id: Id,
    pub movie: Movie,
}

impl Like {
    pub fn new(user_id: Id, movie: Movie) -> Self {
        Self { user_id, movie }
    }
}

impl fmt::Display for Like {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "User ID: {}", self.user_id)?;
        writeln!(f, "Movie: {}", self.movie.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_movie() -> Movie {
        Movie::new(
            Id::new(1).unwrap(),
            Title::new("The Godfather").unwrap(),
            Description::new("A mafia classic").unwrap(),
            Year::new(1972).unwrap(),
            Category::Crime,
            Director::new("Francis Ford Coppola").unwrap(),
        )
    }

    #[test]
    fn test_movie_kind_tag() {
        assert_eq!(sample_movie().kind(), "MOVIE");
        assert_eq!(Movie::KIND, "MOVIE");
    }

    #[test]
    fn test_movie_renders_fields_in_fixed_order() {
        let rendered = sample_movie().to_string();
        assert_eq!(
            rendered,
            "Id: 1\n\
             Title: The Godfather\n\
             Description: A mafia classic\n\
             Year: 1972\n\
             Category: CRIME\n\
             Director: Francis Ford Coppola\n"
        );
    }

    #[test]
    fn test_like_renders_user_and_title_only() {
        let like = Like::new(Id::new(3).unwrap(), sample_movie());
        assert_eq!(like.to_string(), "User ID: 3\nMovie: The Godfather\n");
    }
}
