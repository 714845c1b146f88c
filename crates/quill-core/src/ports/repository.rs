use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Group, Page, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// `insert` and `update` are distinct: entity ids are generated client-side,
/// so the backend cannot infer create-vs-edit from the presence of a key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity in place.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their public handle.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Group repository.
#[async_trait]
pub trait GroupRepository: BaseRepository<Group, Uuid> {
    /// Find a group by its unique slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError>;
}

/// Post repository - feed queries are paginated and ordered newest first.
///
/// Pages are 1-based; a page past the end comes back empty rather than
/// erroring.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// The global feed: every post, descending `pub_date`.
    async fn page_recent(&self, page: u64) -> Result<Page<Post>, RepoError>;

    /// Posts belonging to one group, descending `pub_date`.
    async fn page_by_group(&self, group_id: Uuid, page: u64) -> Result<Page<Post>, RepoError>;

    /// Posts written by one author, descending `pub_date`.
    async fn page_by_author(&self, author_id: Uuid, page: u64) -> Result<Page<Post>, RepoError>;
}
