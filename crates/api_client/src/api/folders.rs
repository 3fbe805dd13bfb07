//! Folder operations

use super::json_body;
use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::models::{CreateFolderRequest, Folder, Link, UpdateFolderRequest};

impl ApiClient {
    /// All folders of the caller
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn list_folders(&self) -> ApiResult<Vec<Folder>> {
        self.call(&self.endpoints().folders(), RequestOptions::get())
            .await
    }

    /// Create a folder
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn create_folder(&self, request: &CreateFolderRequest) -> ApiResult<Folder> {
        self.call(
            &self.endpoints().folders(),
            RequestOptions::post(json_body(request)?),
        )
        .await
    }

    /// Rename a folder
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn update_folder(&self, id: i64, request: &UpdateFolderRequest) -> ApiResult<Folder> {
        self.call(
            &self.endpoints().folder(id),
            RequestOptions::put(json_body(request)?),
        )
        .await
    }

    /// Delete a folder; its links are kept unfiled
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn delete_folder(&self, id: i64) -> ApiResult<()> {
        self.call_ack(&self.endpoints().folder(id), RequestOptions::delete()).await
    }

    /// Links filed under a folder
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn folder_links(&self, id: i64) -> ApiResult<Vec<Link>> {
        self.call(&self.endpoints().folder_links(id), RequestOptions::get())
            .await
    }
}
