//! bloglist: a small blog listing backend
//!
//! Blogs and users live in a JSON-backed document store and are served over a
//! JSON API. The `helpers` module computes the like and author statistics.

pub mod auth;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;
pub mod store;

use anyhow::Result;
use std::path::Path;

/// The main bloglist application
#[derive(Clone)]
pub struct Bloglist {
    /// Application configuration
    pub config: config::AppConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Snapshot file of the document store
    pub data_path: std::path::PathBuf,
}

impl Bloglist {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::AppConfig::load(&config_path)?
        } else {
            config::AppConfig::default()
        };
        config.apply_env()?;

        let data_path = base_dir.join(&config.data_file);

        Ok(Self {
            config,
            base_dir,
            data_path,
        })
    }

    /// Open the document store
    pub fn store(&self) -> Result<store::Store> {
        Ok(store::Store::open(&self.data_path)?)
    }

    /// Delete the data file
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
