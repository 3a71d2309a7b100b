//! Follow-list reads and relationship mutations

use std::sync::Arc;

use tracing::{debug, info};

use crate::client::{ApiClient, ApiRequest};
use crate::encoder::{clamp_page_size, encode_follow_list};
use crate::error::Result;
use crate::resolver::IdentityResolver;
use crate::timeline::parse_timeline;
use crate::types::{normalize_cursor, FollowAction, ListKind, Page, Profile};
use crate::upstream::{
    DEFAULT_BASE_URL, FOLLOWERS_PATH, FOLLOWING_PATH, FRIENDSHIP_CREATE_PATH,
    FRIENDSHIP_DESTROY_PATH, FRIENDSHIP_FLAGS,
};

/// Reads and mutates the follow graph through an [`ApiClient`]
///
/// One upstream round trip per read (two when starting from a handle).
/// Pagination is driven by the caller: pass the returned
/// [`Page::next_cursor`] back in until it comes back empty.
pub struct SocialGraph<C: ?Sized> {
    client: Arc<C>,
    resolver: IdentityResolver<C>,
    base_url: String,
}

impl<C: ?Sized> Clone for SocialGraph<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            resolver: self.resolver.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

impl<C: ApiClient + ?Sized> SocialGraph<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    /// Point every endpoint at a different origin
    pub fn with_base_url(client: Arc<C>, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            resolver: IdentityResolver::new(Arc::clone(&client), &base_url),
            client,
            base_url,
        }
    }

    /// Resolve a handle to its numeric user id
    pub async fn resolve_identity(&self, handle: &str) -> Result<String> {
        self.resolver.resolve(handle).await
    }

    /// Fetch the public profile behind a handle
    pub async fn get_profile(&self, handle: &str) -> Result<Profile> {
        self.resolver.lookup(handle).await
    }

    /// One page of the accounts `handle` follows
    pub async fn fetch_following(
        &self,
        handle: &str,
        max_count: u32,
        cursor: &str,
    ) -> Result<Page> {
        let user_id = self.resolver.resolve(handle).await?;
        self.fetch_following_by_user_id(&user_id, max_count, cursor).await
    }

    /// One page of the accounts `user_id` follows
    pub async fn fetch_following_by_user_id(
        &self,
        user_id: &str,
        max_count: u32,
        cursor: &str,
    ) -> Result<Page> {
        self.fetch_page(ListKind::Following, user_id, max_count, cursor)
            .await
    }

    /// One page of the accounts following `handle`
    pub async fn fetch_followers(
        &self,
        handle: &str,
        max_count: u32,
        cursor: &str,
    ) -> Result<Page> {
        let user_id = self.resolver.resolve(handle).await?;
        self.fetch_followers_by_user_id(&user_id, max_count, cursor).await
    }

    /// One page of the accounts following `user_id`
    pub async fn fetch_followers_by_user_id(
        &self,
        user_id: &str,
        max_count: u32,
        cursor: &str,
    ) -> Result<Page> {
        self.fetch_page(ListKind::Followers, user_id, max_count, cursor)
            .await
    }

    pub(crate) async fn fetch_page(
        &self,
        kind: ListKind,
        user_id: &str,
        max_count: u32,
        cursor: &str,
    ) -> Result<Page> {
        let path = match kind {
            ListKind::Following => FOLLOWING_PATH,
            ListKind::Followers => FOLLOWERS_PATH,
        };
        let count = clamp_page_size(max_count);
        let query = encode_follow_list(user_id, count, cursor)?;

        debug!(
            list = %kind,
            user_id = %user_id,
            count,
            has_cursor = !cursor.is_empty(),
            "Fetching follow list page"
        );

        let request = ApiRequest::get(format!("{}{}", self.base_url, path), query.into_params());
        let body = self.client.send(request).await?;
        let (profiles, raw_cursor) = parse_timeline(body)?;
        let page = Page {
            profiles,
            next_cursor: normalize_cursor(raw_cursor),
        };

        debug!(
            list = %kind,
            user_id = %user_id,
            profiles = page.profiles.len(),
            exhausted = page.is_last(),
            "Fetched follow list page"
        );

        Ok(page)
    }

    /// Follow or unfollow `handle`
    ///
    /// Success means upstream accepted the request; the resulting
    /// relationship is not read back.
    pub async fn set_relationship(&self, handle: &str, action: FollowAction) -> Result<()> {
        let user_id = self.resolver.resolve(handle).await?;
        self.set_relationship_by_user_id(&user_id, action).await
    }

    /// Follow or unfollow `user_id`
    pub async fn set_relationship_by_user_id(
        &self,
        user_id: &str,
        action: FollowAction,
    ) -> Result<()> {
        let path = match action {
            FollowAction::Follow => FRIENDSHIP_CREATE_PATH,
            FollowAction::Destroy => FRIENDSHIP_DESTROY_PATH,
        };

        let mut form: Vec<(String, String)> = FRIENDSHIP_FLAGS
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        form.push(("user_id".to_string(), user_id.to_string()));

        let request = ApiRequest::post_form(format!("{}{}", self.base_url, path), form);
        self.client.send(request).await?;

        info!(action = %action, user_id = %user_id, "Relationship updated");
        Ok(())
    }
}
