//! Raw catalog records
//!
//! Wire-shaped snapshots of server payloads. Extracting a record from an
//! untyped payload routes every field through its value type's `from_json`
//! constructor, so an absent or mis-kinded field surfaces as a wrong-kind
//! failure and a rule violation as a format failure. A record can also be
//! assembled or edited as plain data, which is why reconstructing a
//! [`Movie`] from one revalidates at the primitive level.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::category::Category;
use super::error::{DomainError, DomainResult};
use super::movie::{Like, Movie};
use super::values::{Description, Director, Id, ImageUrl, Title, Year};

/// Server-sourced movie snapshot, the authoritative raw form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub year: i32,
    pub category: String,
    pub director: String,
    pub image_url: String,
}

impl MovieRecord {
    /// Extract a record from an untyped payload
    ///
    /// Each field is validated through its value type and stored in the
    /// primitive's canonical raw form.
    pub fn from_json(value: &Value) -> DomainResult<Self> {
        let id = Id::from_json(field(value, "id", "an integer")?)?;
        let title = Title::from_json(field(value, "title", "a string")?)?;
        let description = Description::from_json(field(value, "description", "a string")?)?;
        let year = Year::from_json(field(value, "year", "an integer")?)?;
        let category = Category::from_json(field(value, "category", "a string")?)?;
        let director = Director::from_json(field(value, "director", "a string")?)?;
        let image_url = ImageUrl::from_json(field(value, "image_url", "a string")?)?;

        Ok(Self {
            id: id.value(),
            title: title.as_str().to_string(),
            description: description.as_str().to_string(),
            year: year.value(),
            category: category.as_str().to_string(),
            director: director.as_str().to_string(),
            image_url: image_url.as_str().to_string(),
        })
    }

    /// Reconstruct a validated [`Movie`] from this snapshot
    ///
    /// The poster URL stays on the record; it is not part of the composite.
    pub fn to_movie(&self) -> DomainResult<Movie> {
        Ok(Movie::new(
            Id::new(self.id)?,
            Title::new(self.title.as_str())?,
            Description::new(self.description.as_str())?,
            Year::new(self.year)?,
            Category::from_name(&self.category)?,
            Director::new(self.director.as_str())?,
        ))
    }
}

/// Entry of the liked-movies listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeRecord {
    pub user: i64,
    pub movie: MovieRecord,
}

impl LikeRecord {
    pub fn from_json(value: &Value) -> DomainResult<Self> {
        let user = Id::from_json(field(value, "user", "an integer")?)?;
        let movie = MovieRecord::from_json(field(value, "movie", "a movie record")?)?;
        Ok(Self {
            user: user.value(),
            movie,
        })
    }

    pub fn to_like(&self) -> DomainResult<Like> {
        Ok(Like::new(Id::new(self.user)?, self.movie.to_movie()?))
    }
}

fn field<'a>(
    value: &'a Value,
    name: &'static str,
    expected: &'static str,
) -> DomainResult<&'a Value> {
    value
        .get(name)
        .ok_or(DomainError::type_failure(name, expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> Value {
        json!({
            "id": 1,
            "title": "The Godfather",
            "description": "A mafia classic",
            "year": 1972,
            "category": "CRIME",
            "director": "Francis Ford Coppola",
            "image_url": "https://image.tmdb.org/t/p/w500/6KErczPBROQty7QoIsaa6wJYXZi.jpg",
        })
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let record = MovieRecord::from_json(&sample_payload()).unwrap();
        assert_eq!(record.title, "The Godfather");
        assert_eq!(record.year, 1972);

        let reserialized = serde_json::to_value(&record).unwrap();
        assert_eq!(reserialized, sample_payload());
    }

    #[test]
    fn test_absent_field_is_a_wrong_kind_failure() {
        let mut payload = sample_payload();
        payload.as_object_mut().unwrap().remove("director");

        let err = MovieRecord::from_json(&payload).unwrap_err();
        assert!(err.is_type_failure());
        assert_eq!(err.field(), "director");
    }

    #[test]
    fn test_mis_kinded_field_is_a_wrong_kind_failure() {
        let mut payload = sample_payload();
        payload["year"] = json!("1972");

        let err = MovieRecord::from_json(&payload).unwrap_err();
        assert!(err.is_type_failure());
        assert_eq!(err.field(), "year");
    }

    #[test]
    fn test_rule_violations_fail_at_extraction() {
        let mut payload = sample_payload();
        payload["director"] = json!("D1rector");

        let err = MovieRecord::from_json(&payload).unwrap_err();
        assert!(err.is_format_failure());
        assert_eq!(err.field(), "director");

        let mut payload = sample_payload();
        payload["category"] = json!("MUSICAL");
        assert!(MovieRecord::from_json(&payload).unwrap_err().is_type_failure());
    }

    #[test]
    fn test_to_movie_revalidates_at_the_primitive_level() {
        let record = MovieRecord::from_json(&sample_payload()).unwrap();
        let movie = record.to_movie().unwrap();
        assert_eq!(movie.category, Category::Crime);
        assert_eq!(movie.director.as_str(), "Francis Ford Coppola");

        let mut tainted = record.clone();
        tainted.director = "D1rector".to_string();
        assert!(tainted.to_movie().unwrap_err().is_format_failure());

        let mut unknown_genre = record;
        unknown_genre.category = "MUSICAL".to_string();
        assert!(unknown_genre.to_movie().unwrap_err().is_type_failure());
    }

    #[test]
    fn test_like_record_wraps_a_full_movie() {
        let payload = json!({ "user": 3, "movie": sample_payload() });
        let like = LikeRecord::from_json(&payload).unwrap().to_like().unwrap();
        assert_eq!(like.user_id.value(), 3);
        assert_eq!(like.movie.title.as_str(), "The Godfather");

        let missing = json!({ "user": 3 });
        assert!(LikeRecord::from_json(&missing).unwrap_err().is_type_failure());
    }
}
