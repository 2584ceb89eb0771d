//! List helper functions for blog statistics: total likes, favorite blog,
//! and the authors with the most blogs and likes.
//!
//! Every function here is pure. Ties always go to whichever candidate was seen
//! first, either the earliest record or the author whose first blog appears
//! earliest in the input.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Anything that looks like a blog entry to the aggregators
pub trait BlogEntry {
    fn title(&self) -> &str;
    fn author(&self) -> &str;
    fn likes(&self) -> u64;
}

/// The blog with the most likes, reduced to the fields callers display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteBlog {
    pub title: String,
    pub author: String,
    pub likes: u64,
}

/// An author and how many blogs they wrote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorBlogs {
    pub author: String,
    pub blogs: usize,
}

/// An author and the sum of likes over their blogs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: u64,
}

/// Sum of likes over all blogs
pub fn total_likes<B: BlogEntry>(blogs: &[B]) -> u64 {
    blogs.iter().map(BlogEntry::likes).sum()
}

/// The blog with the most likes
pub fn favorite_blog<B: BlogEntry>(blogs: &[B]) -> Option<FavoriteBlog> {
    let mut best: Option<&B> = None;
    for blog in blogs {
        // Strict comparison keeps the earliest blog on ties
        if best.map_or(true, |b| blog.likes() > b.likes()) {
            best = Some(blog);
        }
    }

    best.map(|blog| FavoriteBlog {
        title: blog.title().to_string(),
        author: blog.author().to_string(),
        likes: blog.likes(),
    })
}

/// Group blogs by exact author name, in order of each author's first blog
pub fn group_by_author<B: BlogEntry>(blogs: &[B]) -> IndexMap<&str, Vec<&B>> {
    let mut groups: IndexMap<&str, Vec<&B>> = IndexMap::new();
    for blog in blogs {
        groups.entry(blog.author()).or_default().push(blog);
    }
    groups
}

/// The author with the most blogs
pub fn most_blogs<B: BlogEntry>(blogs: &[B]) -> Option<AuthorBlogs> {
    let mut best: Option<(&str, usize)> = None;
    for (author, group) in group_by_author(blogs) {
        if best.map_or(true, |(_, count)| group.len() > count) {
            best = Some((author, group.len()));
        }
    }

    best.map(|(author, blogs)| AuthorBlogs {
        author: author.to_string(),
        blogs,
    })
}

/// The author whose blogs have the most likes combined
pub fn most_likes<B: BlogEntry>(blogs: &[B]) -> Option<AuthorLikes> {
    let mut best: Option<(&str, u64)> = None;
    for (author, group) in group_by_author(blogs) {
        let likes: u64 = group.iter().map(|b| b.likes()).sum();
        if best.map_or(true, |(_, top)| likes > top) {
            best = Some((author, likes));
        }
    }

    best.map(|(author, likes)| AuthorLikes {
        author: author.to_string(),
        likes,
    })
}

/// All statistics at once, as served by the stats endpoint
///
/// Missing results serialize as `{}` rather than `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogStats {
    pub total_likes: u64,
    #[serde(serialize_with = "or_empty")]
    pub favorite_blog: Option<FavoriteBlog>,
    #[serde(serialize_with = "or_empty")]
    pub most_blogs: Option<AuthorBlogs>,
    #[serde(serialize_with = "or_empty")]
    pub most_likes: Option<AuthorLikes>,
}

impl BlogStats {
    pub fn collect<B: BlogEntry>(blogs: &[B]) -> Self {
        Self {
            total_likes: total_likes(blogs),
            favorite_blog: favorite_blog(blogs),
            most_blogs: most_blogs(blogs),
            most_likes: most_likes(blogs),
        }
    }
}

fn or_empty<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(inner) => inner.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}
