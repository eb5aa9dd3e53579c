//! Query string parameter types.
//!
//! Values are not bounds-checked here: negative or huge windows are passed
//! through and normalized by [`scribe_core::Window`].

use serde::Deserialize;

use scribe_core::{DEFAULT_LIST_LIMIT, DEFAULT_RECENT_LIMIT};

fn default_list_limit() -> i64 {
    DEFAULT_LIST_LIMIT
}

fn default_recent_limit() -> i64 {
    DEFAULT_RECENT_LIMIT
}

/// `GET /notes/?skip=&limit=`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_list_limit")]
    pub limit: i64,
}

/// `GET /notes/search/?query=`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

/// `GET /notes/recent/?limit=`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecentParams {
    #[serde(default = "default_recent_limit")]
    pub limit: i64,
}
