//! Link operations

use tracing::instrument;

use super::json_body;
use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::models::{CreateLinkRequest, Link, LinkStats, UpdateLinkRequest};

impl ApiClient {
    /// All links owned by the caller
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn list_links(&self) -> ApiResult<Vec<Link>> {
        self.call(&self.endpoints().links(), RequestOptions::get())
            .await
    }

    /// A single link
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_link(&self, id: i64) -> ApiResult<Link> {
        self.call(&self.endpoints().link(id), RequestOptions::get())
            .await
    }

    /// Shorten a URL
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self, request), fields(url = %request.original_url))]
    pub async fn create_link(&self, request: &CreateLinkRequest) -> ApiResult<Link> {
        self.call(
            &self.endpoints().links(),
            RequestOptions::post(json_body(request)?),
        )
        .await
    }

    /// Change a link's destination, title, folder or expiry
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn update_link(&self, id: i64, request: &UpdateLinkRequest) -> ApiResult<Link> {
        self.call(
            &self.endpoints().link(id),
            RequestOptions::put(json_body(request)?),
        )
        .await
    }

    /// Delete a link
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn delete_link(&self, id: i64) -> ApiResult<()> {
        self.call_ack(&self.endpoints().link(id), RequestOptions::delete()).await
    }

    /// Click statistics for a link
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn link_stats(&self, id: i64) -> ApiResult<LinkStats> {
        self.call(&self.endpoints().link_stats(id), RequestOptions::get())
            .await
    }

    /// QR code image for a link, as returned by the backend (PNG)
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn link_qr_code(&self, id: i64) -> ApiResult<Vec<u8>> {
        self.call_bytes(
            &self.endpoints().link_qr(id),
            RequestOptions::get().with_header("accept", "image/png"),
        )
        .await
    }
}
