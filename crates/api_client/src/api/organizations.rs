//! Organization management

use super::json_body;
use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::models::{CreateOrganizationRequest, InviteMemberRequest, Member, Organization};

impl ApiClient {
    /// Organizations the caller belongs to
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn list_organizations(&self) -> ApiResult<Vec<Organization>> {
        self.call(&self.endpoints().organizations(), RequestOptions::get())
            .await
    }

    /// Create an organization owned by the caller
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn create_organization(
        &self,
        request: &CreateOrganizationRequest,
    ) -> ApiResult<Organization> {
        self.call(
            &self.endpoints().organizations(),
            RequestOptions::post(json_body(request)?),
        )
        .await
    }

    /// A single organization
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_organization(&self, id: i64) -> ApiResult<Organization> {
        self.call(&self.endpoints().organization(id), RequestOptions::get())
            .await
    }

    /// Members of an organization
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn list_members(&self, org_id: i64) -> ApiResult<Vec<Member>> {
        self.call(
            &self.endpoints().organization_members(org_id),
            RequestOptions::get(),
        )
        .await
    }

    /// Invite someone to an organization
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn invite_member(&self, org_id: i64, request: &InviteMemberRequest) -> ApiResult<()> {
        self.call_ack(
            &self.endpoints().organization_invites(org_id),
            RequestOptions::post(json_body(request)?),
        )
        .await
    }

    /// Remove a member from an organization
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn remove_member(&self, org_id: i64, user_id: i64) -> ApiResult<()> {
        self.call_ack(
            &self.endpoints().organization_member(org_id, user_id),
            RequestOptions::delete(),
        )
        .await
    }
}
