//! Clean the data file

use anyhow::Result;
use std::fs;

use crate::Bloglist;

/// Delete the document store snapshot
pub fn run(app: &Bloglist) -> Result<()> {
    if app.data_path.exists() {
        fs::remove_file(&app.data_path)?;
        tracing::info!("Deleted: {:?}", app.data_path);
    } else {
        tracing::info!("Nothing to clean at {:?}", app.data_path);
    }

    Ok(())
}
