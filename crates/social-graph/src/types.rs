//! Profile, page and action types, plus the upstream user object they are built from

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel prefix the upstream puts on the cursor of an exhausted list
pub const EXHAUSTED_CURSOR_PREFIX: &str = "0|";

/// Timestamp format of the upstream `created_at` field
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Public profile of a user as seen in a follow list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: String,
    pub username: String,
    pub name: String,
    pub biography: Option<String>,
    pub avatar: Option<String>,
    pub banner: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub followers_count: u64,
    pub following_count: u64,
    pub tweets_count: u64,
    pub is_private: bool,
    pub is_verified: bool,
    pub is_blue_verified: bool,
    pub joined: Option<DateTime<Utc>>,
}

/// One page of a follow list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub profiles: Vec<Profile>,
    /// Continuation token, empty once the list is exhausted
    pub next_cursor: String,
}

impl Page {
    /// True when no further page can be requested
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_empty()
    }
}

/// Relationship mutation to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowAction {
    Follow,
    Destroy,
}

impl fmt::Display for FollowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FollowAction::Follow => write!(f, "follow"),
            FollowAction::Destroy => write!(f, "destroy"),
        }
    }
}

/// Which follow list a read targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Following,
    Followers,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Following => write!(f, "following"),
            ListKind::Followers => write!(f, "followers"),
        }
    }
}

/// Map the upstream "exhausted" cursor to the empty string
pub fn normalize_cursor(raw: String) -> String {
    if raw.starts_with(EXHAUSTED_CURSOR_PREFIX) {
        String::new()
    } else {
        raw
    }
}

/// `user_results.result` node, discriminated by `__typename`
#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
pub(crate) enum UserResult {
    User(RawUser),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawUser {
    pub(crate) rest_id: String,
    #[serde(default)]
    pub(crate) is_blue_verified: Option<bool>,
    #[serde(default)]
    pub(crate) legacy: RawUserLegacy,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawUserLegacy {
    pub(crate) screen_name: String,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) profile_image_url_https: Option<String>,
    pub(crate) profile_banner_url: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) url: Option<String>,
    pub(crate) followers_count: Option<u64>,
    pub(crate) friends_count: Option<u64>,
    pub(crate) statuses_count: Option<u64>,
    pub(crate) protected: Option<bool>,
    pub(crate) verified: Option<bool>,
    pub(crate) created_at: Option<String>,
}

impl From<RawUser> for Profile {
    fn from(user: RawUser) -> Self {
        let legacy = user.legacy;
        Profile {
            user_id: user.rest_id,
            username: legacy.screen_name,
            name: legacy.name,
            biography: non_empty(legacy.description),
            // Upstream links the 48px thumbnail; drop the suffix for the original size
            avatar: non_empty(legacy.profile_image_url_https)
                .map(|url| url.replacen("_normal.", ".", 1)),
            banner: non_empty(legacy.profile_banner_url),
            location: non_empty(legacy.location),
            url: non_empty(legacy.url),
            followers_count: legacy.followers_count.unwrap_or(0),
            following_count: legacy.friends_count.unwrap_or(0),
            tweets_count: legacy.statuses_count.unwrap_or(0),
            is_private: legacy.protected.unwrap_or(false),
            is_verified: legacy.verified.unwrap_or(false),
            is_blue_verified: user.is_blue_verified.unwrap_or(false),
            joined: legacy.created_at.as_deref().and_then(parse_created_at),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn parse_created_at(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(value, CREATED_AT_FORMAT)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
