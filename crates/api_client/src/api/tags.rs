//! Tag operations

use super::json_body;
use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::models::{CreateTagRequest, Tag};

impl ApiClient {
    /// All tags of the caller
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn list_tags(&self) -> ApiResult<Vec<Tag>> {
        self.call(&self.endpoints().tags(), RequestOptions::get())
            .await
    }

    /// Create a tag
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn create_tag(&self, request: &CreateTagRequest) -> ApiResult<Tag> {
        self.call(
            &self.endpoints().tags(),
            RequestOptions::post(json_body(request)?),
        )
        .await
    }

    /// Delete a tag and detach it from every link
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn delete_tag(&self, id: i64) -> ApiResult<()> {
        self.call_ack(&self.endpoints().tag(id), RequestOptions::delete()).await
    }

    /// Attach a tag to a link
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn tag_link(&self, link_id: i64, tag_id: i64) -> ApiResult<()> {
        self.call_ack(
            &self.endpoints().link_tag(link_id, tag_id),
            RequestOptions::with_method(reqwest::Method::POST),
        )
        .await
    }

    /// Detach a tag from a link
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn untag_link(&self, link_id: i64, tag_id: i64) -> ApiResult<()> {
        self.call_ack(
            &self.endpoints().link_tag(link_id, tag_id),
            RequestOptions::delete(),
        )
        .await
    }
}
