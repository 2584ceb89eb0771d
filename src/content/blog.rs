//! Blog models

use serde::{Deserialize, Serialize};

use super::{ContentError, User};
use crate::helpers::BlogEntry;

/// A plain blog entry, with nothing attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogRecord {
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub url: String,
    #[serde(default)]
    pub likes: u64,
}

/// A stored blog, owned by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    /// Store-assigned id
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub author: String,

    pub url: String,

    #[serde(default)]
    pub likes: u64,

    /// Id of the user who created the blog
    pub user: String,
}

impl Blog {
    pub fn new(id: String, user: String, record: BlogRecord) -> Self {
        Self {
            id,
            title: record.title,
            author: record.author,
            url: record.url,
            likes: record.likes,
            user,
        }
    }
}

impl BlogEntry for Blog {
    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn likes(&self) -> u64 {
        self.likes
    }
}

impl BlogEntry for BlogRecord {
    fn title(&self) -> &str {
        &self.title
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn likes(&self) -> u64 {
        self.likes
    }
}

/// Body of a blog creation request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBlog {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

impl NewBlog {
    /// Check required fields and fill in defaults
    ///
    /// Title and url must be present and non-empty. Missing likes count as 0.
    pub fn validate(self) -> Result<BlogRecord, ContentError> {
        let title = self.title.filter(|t| !t.is_empty());
        let url = self.url.filter(|u| !u.is_empty());

        match (title, url) {
            (Some(title), Some(url)) => Ok(BlogRecord {
                title,
                author: self.author.unwrap_or_default(),
                url,
                likes: self.likes.unwrap_or(0),
            }),
            _ => Err(ContentError::InvalidBlog),
        }
    }
}

/// Body of a blog update request; absent fields are left alone
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

impl BlogUpdate {
    pub fn apply(self, blog: &mut Blog) {
        if let Some(title) = self.title {
            blog.title = title;
        }
        if let Some(author) = self.author {
            blog.author = author;
        }
        if let Some(url) = self.url {
            blog.url = url;
        }
        if let Some(likes) = self.likes {
            blog.likes = likes;
        }
    }
}

/// The owner fields shown next to a blog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub username: String,
    pub name: String,
    pub id: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            name: user.name.clone(),
            id: user.id.clone(),
        }
    }
}

/// A blog as returned by the API, with its owner filled in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogView {
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    /// `None` when the owner no longer exists
    pub user: Option<UserSummary>,
}

impl BlogView {
    pub fn new(blog: &Blog, owner: Option<&User>) -> Self {
        Self {
            id: blog.id.clone(),
            title: blog.title.clone(),
            author: blog.author.clone(),
            url: blog.url.clone(),
            likes: blog.likes,
            user: owner.map(UserSummary::from),
        }
    }
}
