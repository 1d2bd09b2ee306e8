//! Wire types for the catalog API

use serde::{Deserialize, Serialize};

/// Registration form body
#[derive(Debug, Serialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
}

/// Login form body
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login success body
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub key: String,
}

/// Account kind body returned by the user-type endpoint
#[derive(Debug, Deserialize)]
pub struct UserTypeResponse {
    #[serde(rename = "user-type")]
    pub user_type: String,
}

/// Like creation form body
#[derive(Debug, Serialize)]
pub struct AddLikeRequest {
    pub movie: i64,
}

/// Movie creation body
#[derive(Debug, Serialize)]
pub struct CreateMovieRequest {
    pub title: String,
    pub description: String,
    pub year: i32,
    pub category: String,
    pub director: String,
    pub image_url: String,
}
