//! Continuation-link pagination.
//!
//! Harbor splits list results into pages and points at the next page with a
//! `Link: <URL>; rel="next"` header. [`PaginationFollower`] walks that chain
//! and concatenates the pages in order.

use serde_json::Value;

use crate::clients::errors::{HttpError, InvalidHttpRequestError};
use crate::clients::http_client::HttpClient;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;

/// Follows `rel="next"` links and concatenates list pages.
///
/// Pages are fetched sequentially. Following stops when:
/// - a page has no next link
/// - a continuation page body is not a JSON array (the items collected so
///   far are returned and a warning is logged)
/// - the configured page cap is reached
///
/// An error on any continuation page aborts the whole call.
#[derive(Debug, Clone, Copy)]
pub struct PaginationFollower<'a> {
    client: &'a HttpClient,
    max_pages: Option<usize>,
}

impl<'a> PaginationFollower<'a> {
    /// Creates a follower. `max_pages` counts the first page.
    #[must_use]
    pub const fn new(client: &'a HttpClient, max_pages: Option<usize>) -> Self {
        Self { client, max_pages }
    }

    /// Collects all pages starting from an already received first page.
    ///
    /// If the first page body is not a JSON array it is returned unchanged
    /// and no link is followed.
    ///
    /// # Errors
    ///
    /// Returns the error of any failed continuation request, or
    /// [`InvalidHttpRequestError::InvalidLink`] if a link cannot be resolved.
    pub async fn collect(
        &self,
        request: &HttpRequest,
        first: HttpResponse,
    ) -> Result<Option<Value>, HttpError> {
        let mut next = first.pagination.next;
        let mut items = match first.body {
            Some(Value::Array(items)) => items,
            other => return Ok(other),
        };
        let mut pages: usize = 1;

        while let Some(link) = next.take() {
            if self.max_pages.is_some_and(|max| pages >= max) {
                tracing::debug!(
                    pages,
                    accumulated = items.len(),
                    "page limit reached, not following next link"
                );
                break;
            }

            let url = self
                .client
                .base_url()
                .resolve_link(&link)
                .ok_or(InvalidHttpRequestError::InvalidLink { link })?;

            pages += 1;
            tracing::debug!(url = %url, page = pages, "following pagination link");
            let response = self.client.follow(request, url).await?;

            match response.body {
                Some(Value::Array(page)) => {
                    items.extend(page);
                    next = response.pagination.next;
                }
                _ => {
                    tracing::warn!(
                        url = %response.url,
                        page = pages,
                        accumulated = items.len(),
                        "Unable to handle paginated results, received non-list value"
                    );
                }
            }
        }

        Ok(Some(Value::Array(items)))
    }
}
