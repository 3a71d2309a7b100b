//! Follow graph client for a microblogging service's web GraphQL API
//!
//! Reads the Following and Followers lists one page at a time and issues
//! follow/unfollow mutations. The transport is pluggable through
//! [`ApiClient`]; [`HttpApiClient`] is a reqwest implementation that injects
//! static web credentials.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use social_graph::{Credentials, HttpApiClient, SocialGraph};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpApiClient::new(Credentials {
//!     bearer_token: "AAAA...".to_string(),
//!     session: None,
//! })?;
//! let graph = SocialGraph::new(Arc::new(client));
//!
//! let mut cursor = String::new();
//! loop {
//!     let page = graph.fetch_followers("support", 200, &cursor).await?;
//!     for profile in &page.profiles {
//!         println!("{} ({})", profile.username, profile.user_id);
//!     }
//!     if page.is_last() {
//!         break;
//!     }
//!     cursor = page.next_cursor;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Endpoints
//!
//! - `GET  .../graphql/<id>/UserByScreenName` - handle to user id
//! - `GET  .../graphql/<id>/Following` - accounts a user follows
//! - `GET  .../graphql/<id>/Followers` - accounts following a user
//! - `POST /i/api/1.1/friendships/create.json` - follow
//! - `POST /i/api/1.1/friendships/destroy.json` - unfollow

mod client;
mod encoder;
mod error;
mod graph;
mod pages;
mod resolver;
mod timeline;
mod types;
pub mod upstream;

#[cfg(test)]
mod testing;

pub use client::{ApiClient, ApiRequest, Credentials, HttpApiClient, RequestBody, Session};
pub use encoder::{clamp_page_size, encode_follow_list, encode_user_lookup, EncodedQuery};
pub use error::{GraphError, Result, TransportError};
pub use graph::SocialGraph;
pub use resolver::IdentityResolver;
pub use timeline::parse_timeline;
pub use types::{normalize_cursor, FollowAction, ListKind, Page, Profile, EXHAUSTED_CURSOR_PREFIX};
