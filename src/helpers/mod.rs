//! Helper functions over blog collections
//!
//! These are the statistics the stats endpoint and the `stats` command report.

mod list;

pub use list::*;
