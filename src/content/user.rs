//! User models

use serde::{Deserialize, Serialize};

use super::{Blog, ContentError};

/// Shortest accepted username and password
pub const MIN_CREDENTIAL_LEN: usize = 3;

/// A stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,

    /// Unique login name
    pub username: String,

    #[serde(default)]
    pub name: String,

    pub password_hash: String,

    /// Ids of the user's blogs, oldest first
    #[serde(default)]
    pub blogs: Vec<String>,
}

/// Body of a user creation request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewUser {
    pub username: String,
    pub name: Option<String>,
    pub password: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.username.chars().count() < MIN_CREDENTIAL_LEN
            || self.password.chars().count() < MIN_CREDENTIAL_LEN
        {
            return Err(ContentError::InvalidCredentials);
        }
        Ok(())
    }
}

/// Body of a login request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// The blog fields shown in a user's listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogSummary {
    pub title: String,
    pub author: String,
    pub url: String,
    pub id: String,
}

impl From<&Blog> for BlogSummary {
    fn from(blog: &Blog) -> Self {
        Self {
            title: blog.title.clone(),
            author: blog.author.clone(),
            url: blog.url.clone(),
            id: blog.id.clone(),
        }
    }
}

/// A user as returned by the API; never carries the password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub name: String,
    pub blogs: Vec<BlogSummary>,
}

impl UserView {
    pub fn new<'a>(user: &User, blogs: impl IntoIterator<Item = &'a Blog>) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            name: user.name.clone(),
            blogs: blogs.into_iter().map(BlogSummary::from).collect(),
        }
    }
}
