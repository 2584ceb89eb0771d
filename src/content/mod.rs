//! Content module - blogs, users and the payloads that create or change them

mod blog;
mod user;

pub use blog::{Blog, BlogRecord, BlogUpdate, BlogView, NewBlog, UserSummary};
pub use user::{BlogSummary, LoginRequest, NewUser, User, UserView, MIN_CREDENTIAL_LEN};

use thiserror::Error;

/// Rejected request payloads
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContentError {
    #[error("blog must have a title and url")]
    InvalidBlog,

    #[error("username and password must be at least 3 characters long")]
    InvalidCredentials,
}
