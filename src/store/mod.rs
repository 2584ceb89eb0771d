//! Document store for blogs and users
//!
//! Documents live in memory behind an async lock. A file-backed store writes a
//! JSON snapshot after every mutation and reads it back on open.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::content::{Blog, BlogRecord, BlogUpdate, BlogView, User, UserView};

/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("blog not found: {0}")]
    BlogNotFound(String),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("expected `username` to be unique")]
    UsernameTaken(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Everything the store holds, as written to disk
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Database {
    /// Version of the snapshot format
    pub version: u32,
    /// Blogs keyed by id, in insertion order
    pub blogs: IndexMap<String, Blog>,
    /// Users keyed by id, in insertion order
    pub users: IndexMap<String, User>,
}

impl Database {
    /// Current snapshot format version
    const VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::VERSION,
            ..Default::default()
        }
    }

    /// Load a snapshot from disk, or start empty
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => return Err(e.into()),
        };

        let db: Database = serde_json::from_str(&content)?;
        if db.version != Self::VERSION {
            tracing::warn!(
                "Snapshot {:?} has version {}, expected {}; starting with an empty store",
                path,
                db.version,
                Self::VERSION
            );
            return Ok(Self::new());
        }
        tracing::debug!(
            "Loaded {} blogs and {} users from {:?}",
            db.blogs.len(),
            db.users.len(),
            path
        );
        Ok(db)
    }

    /// Save the snapshot to disk
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn blog_view(&self, blog: &Blog) -> BlogView {
        BlogView::new(blog, self.users.get(&blog.user))
    }

    fn user_view(&self, user: &User) -> UserView {
        UserView::new(user, user.blogs.iter().filter_map(|id| self.blogs.get(id)))
    }
}

/// Shared handle to the documents
#[derive(Debug, Clone)]
pub struct Store {
    db: Arc<RwLock<Database>>,
    path: Option<PathBuf>,
}

impl Store {
    /// A store that never touches the disk
    pub fn in_memory() -> Self {
        Self {
            db: Arc::new(RwLock::new(Database::new())),
            path: None,
        }
    }

    /// Open a file-backed store
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let db = Database::load(&path)?;
        Ok(Self {
            db: Arc::new(RwLock::new(db)),
            path: Some(path),
        })
    }

    /// Apply a change to a copy of the documents and keep it only once the
    /// snapshot is written
    async fn commit<T, F>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T>,
    {
        let mut db = self.db.write().await;
        let mut staged = db.clone();
        let out = change(&mut staged)?;
        if let Some(path) = &self.path {
            staged.save(path)?;
        }
        *db = staged;
        Ok(out)
    }

    /// All blogs, oldest first
    pub async fn blogs(&self) -> Vec<Blog> {
        self.db.read().await.blogs.values().cloned().collect()
    }

    /// All blogs with their owners filled in
    pub async fn blog_views(&self) -> Vec<BlogView> {
        let db = self.db.read().await;
        db.blogs.values().map(|b| db.blog_view(b)).collect()
    }

    pub async fn blog(&self, id: &str) -> Result<BlogView> {
        let db = self.db.read().await;
        let blog = db
            .blogs
            .get(id)
            .ok_or_else(|| StoreError::BlogNotFound(id.to_string()))?;
        Ok(db.blog_view(blog))
    }

    /// Id of the user owning a blog
    pub async fn blog_owner(&self, id: &str) -> Result<String> {
        let db = self.db.read().await;
        db.blogs
            .get(id)
            .map(|b| b.user.clone())
            .ok_or_else(|| StoreError::BlogNotFound(id.to_string()))
    }

    /// Store a new blog and link it to its owner
    pub async fn insert_blog(&self, owner: &str, record: BlogRecord) -> Result<BlogView> {
        let view = self
            .commit(|db| {
                let user = db
                    .users
                    .get_mut(owner)
                    .ok_or_else(|| StoreError::UserNotFound(owner.to_string()))?;

                let id = new_id();
                user.blogs.push(id.clone());
                let blog = Blog::new(id.clone(), owner.to_string(), record);
                db.blogs.insert(id.clone(), blog);
                Ok(db.blog_view(&db.blogs[&id]))
            })
            .await?;

        tracing::info!("Created blog {} for user {}", view.id, owner);
        Ok(view)
    }

    pub async fn update_blog(&self, id: &str, update: BlogUpdate) -> Result<BlogView> {
        let view = self
            .commit(|db| {
                let blog = db
                    .blogs
                    .get_mut(id)
                    .ok_or_else(|| StoreError::BlogNotFound(id.to_string()))?;
                update.apply(blog);
                Ok(db.blog_view(&db.blogs[id]))
            })
            .await?;

        tracing::info!("Updated blog {}", id);
        Ok(view)
    }

    /// Delete a blog and unlink it from its owner
    pub async fn remove_blog(&self, id: &str) -> Result<Blog> {
        let blog = self
            .commit(|db| {
                let blog = db
                    .blogs
                    .shift_remove(id)
                    .ok_or_else(|| StoreError::BlogNotFound(id.to_string()))?;
                if let Some(user) = db.users.get_mut(&blog.user) {
                    user.blogs.retain(|b| b != id);
                }
                Ok(blog)
            })
            .await?;

        tracing::info!("Deleted blog {}", id);
        Ok(blog)
    }

    pub async fn user_views(&self) -> Vec<UserView> {
        let db = self.db.read().await;
        db.users.values().map(|u| db.user_view(u)).collect()
    }

    pub async fn user(&self, id: &str) -> Result<User> {
        self.db
            .read()
            .await
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::UserNotFound(id.to_string()))
    }

    pub async fn user_by_username(&self, username: &str) -> Option<User> {
        self.db
            .read()
            .await
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    /// Store a new user; usernames are unique
    pub async fn insert_user(
        &self,
        username: &str,
        name: &str,
        password_hash: String,
    ) -> Result<UserView> {
        let view = self
            .commit(|db| {
                if db.users.values().any(|u| u.username == username) {
                    return Err(StoreError::UsernameTaken(username.to_string()));
                }

                let id = new_id();
                let user = User {
                    id: id.clone(),
                    username: username.to_string(),
                    name: name.to_string(),
                    password_hash,
                    blogs: Vec::new(),
                };
                db.users.insert(id.clone(), user);
                Ok(db.user_view(&db.users[&id]))
            })
            .await?;

        tracing::info!("Created user {} ({})", username, view.id);
        Ok(view)
    }
}

/// 12 random bytes as 24 lowercase hex chars
fn new_id() -> String {
    let bytes: [u8; 12] = rand::random();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
