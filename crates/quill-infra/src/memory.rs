//! In-memory repositories - used as fallback when no database is configured.
//!
//! All three repositories share one [`InMemoryStore`] so that referential
//! actions behave like the relational schema: deleting an author removes
//! their posts, deleting a group clears the assignment on its posts.
//! Note: data is lost on process restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Group, PAGE_SIZE, Page, Post, User, num_pages};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, GroupRepository, PostRepository, UserRepository};

/// Backing store shared by the in-memory repositories.
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    groups: RwLock<HashMap<Uuid, Group>>,
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.users.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.store.users.write().await;
        let taken = users.values().any(|u| {
            u.id == user.id || u.username == user.username || u.email == user.email
        });
        if taken {
            return Err(RepoError::Constraint("entity already exists".to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.store.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut users = self.store.users.write().await;
        if users.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        // FK cascade: an author's posts go with them.
        self.store.posts.write().await.retain(|_, p| p.author_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let users = self.store.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let users = self.store.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }
}

/// In-memory group repository.
pub struct InMemoryGroupRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryGroupRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Group, Uuid> for InMemoryGroupRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, RepoError> {
        Ok(self.store.groups.read().await.get(&id).cloned())
    }

    async fn insert(&self, group: Group) -> Result<Group, RepoError> {
        let mut groups = self.store.groups.write().await;
        if groups.values().any(|g| g.id == group.id || g.slug == group.slug) {
            return Err(RepoError::Constraint("entity already exists".to_string()));
        }
        groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn update(&self, group: Group) -> Result<Group, RepoError> {
        let mut groups = self.store.groups.write().await;
        if !groups.contains_key(&group.id) {
            return Err(RepoError::NotFound);
        }
        if groups
            .values()
            .any(|g| g.slug == group.slug && g.id != group.id)
        {
            return Err(RepoError::Constraint("entity already exists".to_string()));
        }
        groups.insert(group.id, group.clone());
        Ok(group)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut groups = self.store.groups.write().await;
        if groups.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        // FK set-null: posts outlive their group.
        let mut posts = self.store.posts.write().await;
        for post in posts.values_mut() {
            if post.group_id == Some(id) {
                post.group_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let groups = self.store.groups.read().await;
        Ok(groups.values().find(|g| g.slug == slug).cloned())
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPostRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }

    async fn feed<F>(&self, page: u64, keep: F) -> Page<Post>
    where
        F: Fn(&Post) -> bool,
    {
        let posts = self.store.posts.read().await;
        let mut items: Vec<Post> = posts.values().filter(|p| keep(p)).cloned().collect();
        items.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));

        let total_items = items.len() as u64;
        let total_pages = num_pages(total_items);
        let page = page.max(1);
        let start = ((page - 1) * PAGE_SIZE) as usize;
        let items = if start >= items.len() {
            Vec::new()
        } else {
            items
                .into_iter()
                .skip(start)
                .take(PAGE_SIZE as usize)
                .collect()
        };

        Page {
            items,
            page,
            total_pages,
            total_items,
        }
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.posts.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.store.posts.write().await;
        if posts.contains_key(&post.id) {
            return Err(RepoError::Constraint("entity already exists".to_string()));
        }
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.store.posts.write().await;
        if !posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.store.posts.write().await;
        if posts.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn page_recent(&self, page: u64) -> Result<Page<Post>, RepoError> {
        Ok(self.feed(page, |_| true).await)
    }

    async fn page_by_group(&self, group_id: Uuid, page: u64) -> Result<Page<Post>, RepoError> {
        Ok(self.feed(page, |p| p.group_id == Some(group_id)).await)
    }

    async fn page_by_author(&self, author_id: Uuid, page: u64) -> Result<Page<Post>, RepoError> {
        Ok(self.feed(page, |p| p.author_id == author_id).await)
    }
}
