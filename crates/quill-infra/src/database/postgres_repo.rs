//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select};
use uuid::Uuid;

use quill_core::domain::{Group, PAGE_SIZE, Page, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{GroupRepository, PostRepository, UserRepository};

use super::entity::group::{self, Entity as GroupEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL group repository.
pub type PostgresGroupRepository = PostgresBaseRepository<GroupEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // No email in the log line, it is PII.
        tracing::debug!("Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let result = GroupEntity::find()
            .filter(group::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn page_recent(&self, page: u64) -> Result<Page<Post>, RepoError> {
        self.fetch_feed(PostEntity::find(), page).await
    }

    async fn page_by_group(&self, group_id: Uuid, page: u64) -> Result<Page<Post>, RepoError> {
        let query = PostEntity::find().filter(post::Column::GroupId.eq(group_id));
        self.fetch_feed(query, page).await
    }

    async fn page_by_author(&self, author_id: Uuid, page: u64) -> Result<Page<Post>, RepoError> {
        let query = PostEntity::find().filter(post::Column::AuthorId.eq(author_id));
        self.fetch_feed(query, page).await
    }
}

impl PostgresPostRepository {
    /// Run a feed query: newest first, fixed page size, 1-based page number.
    /// A page past the end yields an empty slice, not an error.
    async fn fetch_feed(
        &self,
        query: Select<PostEntity>,
        page: u64,
    ) -> Result<Page<Post>, RepoError> {
        let page = page.max(1);
        let paginator = query
            .order_by_desc(post::Column::PubDate)
            .paginate(&self.db, PAGE_SIZE);

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;
        let totals = paginator
            .num_items_and_pages()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(Page {
            items: items.into_iter().map(Into::into).collect(),
            page,
            total_pages: totals.number_of_pages,
            total_items: totals.number_of_items,
        })
    }
}
