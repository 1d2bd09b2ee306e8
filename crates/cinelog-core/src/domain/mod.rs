//! Domain model for the movie catalog
//!
//! Self-validating value objects, the Movie and Like composites, and the raw
//! record snapshots exchanged with the catalog service.

pub mod category;
pub mod error;
pub mod movie;
pub mod record;
pub mod values;

pub use category::Category;
pub use error::{DomainError, DomainResult};
pub use movie::{Like, Movie};
pub use record::{LikeRecord, MovieRecord};
pub use values::{
    Description, Director, Email, Id, ImageUrl, Password, Title, Username, Year,
};
