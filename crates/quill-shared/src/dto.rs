//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

/// Payload for creating or editing a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostForm {
    pub text: String,
    /// Optional group assignment; must reference an existing group.
    pub group: Option<Uuid>,
}

/// A single post as served to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub group_id: Option<String>,
    pub text: String,
    pub pub_date: String,
}

/// One page of a post listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub posts: Vec<PostResponse>,
    pub page: u64,
    pub total_pages: u64,
    pub total_items: u64,
}

/// Payload for the administrative group-creation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupForm {
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// A group as served to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// A group together with one page of its posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupFeedResponse {
    pub group: GroupResponse,
    #[serde(flatten)]
    pub feed: FeedResponse,
}

/// Public slice of an author shown on their profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: String,
    pub username: String,
}

/// An author together with one page of their posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub author: AuthorResponse,
    #[serde(flatten)]
    pub feed: FeedResponse,
}
