//! Print blog statistics

use anyhow::Result;

use crate::helpers::BlogStats;
use crate::Bloglist;

/// Print total likes, favorite blog, and top authors as JSON
pub async fn run(app: &Bloglist) -> Result<()> {
    let blogs = app.store()?.blogs().await;
    tracing::debug!("Computing stats over {} blogs", blogs.len());

    let stats = BlogStats::collect(&blogs);
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}
