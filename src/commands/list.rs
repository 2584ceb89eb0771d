//! List stored content

use anyhow::Result;

use crate::Bloglist;

/// List stored content by type
pub async fn run(app: &Bloglist, content_type: &str) -> Result<()> {
    let store = app.store()?;

    match content_type {
        "blog" | "blogs" => {
            let blogs = store.blog_views().await;
            println!("Blogs ({}):", blogs.len());
            for blog in blogs {
                let owner = blog
                    .user
                    .as_ref()
                    .map(|u| u.username.as_str())
                    .unwrap_or("-");
                println!(
                    "  {} - {} by {} ({} likes) [{}] <{}>",
                    blog.id, blog.title, blog.author, blog.likes, owner, blog.url
                );
            }
        }
        "user" | "users" => {
            let users = store.user_views().await;
            println!("Users ({}):", users.len());
            for user in users {
                println!(
                    "  {} - {} ({}) [{} blogs]",
                    user.id,
                    user.username,
                    user.name,
                    user.blogs.len()
                );
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: blog, user", content_type);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_unknown_type() {
        let dir = TempDir::new().unwrap();
        let app = Bloglist::new(dir.path()).unwrap();
        let err = run(&app, "tag").await.unwrap_err();
        assert!(err.to_string().contains("Unknown type: tag"));
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let dir = TempDir::new().unwrap();
        let app = Bloglist::new(dir.path()).unwrap();
        run(&app, "blogs").await.unwrap();
        run(&app, "users").await.unwrap();
    }
}
