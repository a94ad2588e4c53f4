//! Startup configuration read from the environment
//!
//! `main` calls `dotenvy::dotenv()` first, so every value may also come from
//! a `.env` file next to the binary.
//!
//! # Environment Variables
//!
//! - `NOTION_TOKEN` - Integration secret (required)
//! - `NOTION_DATABASE_ID` - Database to read gallery items from (required)
//! - `NOTION_API_URL` - API base URL (default: "https://api.notion.com")
//! - `NOTION_VERSION` - Value of the `Notion-Version` header (default: "2022-06-28")
//! - `NOTION_TIMEOUT_SECS` - Per-call upstream timeout (default: none)
//! - `GALLERY_MAX_PAGES` - Cap on upstream pages fetched per request (default: none)
//! - `PORT` - Server port number (default: 8080)

use std::env;

use crate::error::{GalleryError, Result};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_NOTION_API_URL: &str = "https://api.notion.com";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Settings for the Notion client
#[derive(Debug, Clone)]
pub struct NotionConfig {
    pub token: String,
    pub database_id: String,
    pub api_url: String,
    pub version: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub notion: NotionConfig,

    /// `None` keeps paging until Notion runs out of results
    pub max_pages: Option<usize>,
}

impl Config {
    /// Reads the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| GalleryError::Config(format!("{} is not set", key)))
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| GalleryError::Config(format!("PORT is not a valid port: {}", raw)))?,
            None => DEFAULT_PORT,
        };

        let notion = NotionConfig {
            token: required("NOTION_TOKEN")?,
            database_id: required("NOTION_DATABASE_ID")?,
            api_url: get("NOTION_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_NOTION_API_URL.to_string()),
            version: get("NOTION_VERSION").unwrap_or_else(|| DEFAULT_NOTION_VERSION.to_string()),
            timeout_secs: parse_optional(get("NOTION_TIMEOUT_SECS"), "NOTION_TIMEOUT_SECS")?,
        };

        // 0 means unbounded, same as unset
        let max_pages = parse_optional::<usize>(get("GALLERY_MAX_PAGES"), "GALLERY_MAX_PAGES")?
            .filter(|n| *n > 0);

        Ok(Self {
            port,
            notion,
            max_pages,
        })
    }
}

fn parse_optional<T: std::str::FromStr>(raw: Option<String>, key: &str) -> Result<Option<T>> {
    raw.map(|v| {
        v.trim()
            .parse()
            .map_err(|_| GalleryError::Config(format!("{} is not a valid number: {}", key, v)))
    })
    .transpose()
}
