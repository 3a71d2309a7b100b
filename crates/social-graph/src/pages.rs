//! Lazy page streams over the single-page reads
//!
//! Each stream item is exactly one `fetch_*_by_user_id` call. A stream ends
//! after the page whose cursor comes back empty, after a page that hands
//! back the cursor it was requested with, or after the first error.
//! Restart it from any cursor a previous page returned.

use futures::stream::{self, Stream};
use tracing::warn;

use crate::client::ApiClient;
use crate::error::Result;
use crate::graph::SocialGraph;
use crate::types::{ListKind, Page};

enum PageState {
    Next(String),
    Done,
}

impl<C: ApiClient + ?Sized> SocialGraph<C> {
    /// Pages of the accounts `user_id` follows, starting at `cursor`
    pub fn following_pages<'a>(
        &'a self,
        user_id: &str,
        page_size: u32,
        cursor: &str,
    ) -> impl Stream<Item = Result<Page>> + 'a {
        self.pages(ListKind::Following, user_id, page_size, cursor)
    }

    /// Pages of the accounts following `user_id`, starting at `cursor`
    pub fn followers_pages<'a>(
        &'a self,
        user_id: &str,
        page_size: u32,
        cursor: &str,
    ) -> impl Stream<Item = Result<Page>> + 'a {
        self.pages(ListKind::Followers, user_id, page_size, cursor)
    }

    fn pages<'a>(
        &'a self,
        kind: ListKind,
        user_id: &str,
        page_size: u32,
        cursor: &str,
    ) -> impl Stream<Item = Result<Page>> + 'a {
        let user_id = user_id.to_string();

        stream::unfold(PageState::Next(cursor.to_string()), move |state| {
            let user_id = user_id.clone();
            async move {
                let cursor = match state {
                    PageState::Next(cursor) => cursor,
                    PageState::Done => return None,
                };

                match self.fetch_page(kind, &user_id, page_size, &cursor).await {
                    Ok(page) => {
                        let next = if page.is_last() {
                            PageState::Done
                        } else if page.next_cursor == cursor {
                            warn!(
                                list = %kind,
                                user_id = %user_id,
                                profiles = page.profiles.len(),
                                "Cursor did not advance, stopping"
                            );
                            PageState::Done
                        } else {
                            PageState::Next(page.next_cursor.clone())
                        };
                        Some((Ok(page), next))
                    }
                    Err(e) => Some((Err(e), PageState::Done)),
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::testing::RecordingClient;
    use crate::timeline::fixtures::{add_entries, cursor_entry, timeline, user_entry};
    use crate::upstream::FOLLOWERS_PATH;
    use futures::StreamExt;
    use serde_json::Value;
    use std::sync::Arc;

    fn page(users: &[(&str, &str)], bottom: &str) -> Value {
        let mut entries: Vec<Value> = users
            .iter()
            .map(|(id, name)| user_entry(id, name))
            .collect();
        entries.push(cursor_entry("Bottom", bottom));
        timeline(vec![add_entries(entries)])
    }

    fn cursor_sent(request: &crate::client::ApiRequest) -> Option<String> {
        let vars: Value = serde_json::from_str(request.query_param("variables").unwrap()).unwrap();
        vars.get("cursor").and_then(|c| c.as_str()).map(str::to_string)
    }

    #[tokio::test]
    async fn test_stream_follows_cursors_until_exhausted() {
        let client = Arc::new(
            RecordingClient::new()
                .respond(page(&[("1", "a"), ("2", "b")], "c1"))
                .respond(page(&[("3", "c")], "c2"))
                .respond(page(&[("4", "d")], "0|0")),
        );
        let graph = SocialGraph::new(client.clone());

        let pages: Vec<_> = graph.following_pages("42", 2, "").collect().await;
        assert_eq!(pages.len(), 3);

        let names: Vec<String> = pages
            .into_iter()
            .flat_map(|p| p.unwrap().profiles)
            .map(|p| p.username)
            .collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);

        let cursors: Vec<_> = client.requests().iter().map(cursor_sent).collect();
        assert_eq!(
            cursors,
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_stream_restarts_from_cursor() {
        let client = Arc::new(RecordingClient::new().respond(page(&[("9", "z")], "0|5")));
        let graph = SocialGraph::new(client.clone());

        let pages: Vec<_> = graph.followers_pages("42", 20, "resume-here").collect().await;
        assert_eq!(pages.len(), 1);
        assert!(pages[0].as_ref().unwrap().is_last());

        let requests = client.requests();
        assert!(requests[0].url.ends_with(FOLLOWERS_PATH));
        assert_eq!(cursor_sent(&requests[0]).as_deref(), Some("resume-here"));
    }

    #[tokio::test]
    async fn test_stream_stops_after_error() {
        let client = Arc::new(
            RecordingClient::new()
                .respond(page(&[("1", "a")], "c1"))
                .fail(500)
                .respond(page(&[("2", "b")], "0|0")),
        );
        let graph = SocialGraph::new(client.clone());

        let pages: Vec<_> = graph.following_pages("42", 20, "").collect().await;
        assert_eq!(pages.len(), 2);
        assert!(pages[0].is_ok());
        assert!(matches!(pages[1], Err(GraphError::Transport(_))));
        assert_eq!(client.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_stream_stops_when_cursor_repeats_on_empty_page() {
        let client = Arc::new(
            RecordingClient::new()
                .respond(page(&[("1", "a")], "c1"))
                .respond(page(&[], "c1")),
        );
        let graph = SocialGraph::new(client.clone());

        let pages: Vec<_> = graph.following_pages("42", 20, "").collect().await;
        assert_eq!(pages.len(), 2);
        assert_eq!(client.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_stream_stops_when_cursor_repeats_on_full_page() {
        let client = Arc::new(
            RecordingClient::new()
                .respond(page(&[("1", "a")], "c1"))
                .respond(page(&[("1", "a"), ("2", "b")], "c1"))
                .respond(page(&[("3", "c")], "0|0")),
        );
        let graph = SocialGraph::new(client.clone());

        let pages: Vec<_> = graph.followers_pages("42", 20, "").collect().await;
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].as_ref().unwrap().profiles.len(), 2);
        assert_eq!(client.requests().len(), 2);
    }
}
