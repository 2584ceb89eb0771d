//! Configuration module

mod app;

pub use app::AppConfig;
