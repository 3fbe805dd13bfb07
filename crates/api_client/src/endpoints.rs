//! Endpoint registry
//!
//! Maps logical backend operations to request URLs. Identifiers are
//! substituted verbatim; the backend is responsible for rejecting ids that
//! do not exist or are out of range.

use std::fmt::Display;

/// Registry of backend endpoints rooted at a fixed base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    /// Create a registry for the given base URL
    ///
    /// Trailing slashes are dropped so paths join with exactly one `/`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The base URL every endpoint is built on
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // Auth

    /// `POST` credentials, returns a token
    #[must_use]
    pub fn login(&self) -> String {
        self.url("/auth/login")
    }

    /// `POST` a new account
    #[must_use]
    pub fn register(&self) -> String {
        self.url("/auth/register")
    }

    /// `GET` the authenticated user
    #[must_use]
    pub fn me(&self) -> String {
        self.url("/auth/me")
    }

    // Links

    /// `GET` all links, `POST` a new one
    #[must_use]
    pub fn links(&self) -> String {
        self.url("/links")
    }

    /// `GET`, `PUT` or `DELETE` a single link
    #[must_use]
    pub fn link(&self, id: impl Display) -> String {
        self.url(&format!("/links/{id}"))
    }

    /// Click statistics for a link
    #[must_use]
    pub fn link_stats(&self, id: impl Display) -> String {
        self.url(&format!("/links/{id}/stats"))
    }

    /// QR code image for a link (binary body)
    #[must_use]
    pub fn link_qr(&self, id: impl Display) -> String {
        self.url(&format!("/links/{id}/qr"))
    }

    /// Attach (`POST`) or detach (`DELETE`) a tag on a link
    #[must_use]
    pub fn link_tag(&self, link_id: impl Display, tag_id: impl Display) -> String {
        self.url(&format!("/links/{link_id}/tags/{tag_id}"))
    }

    // Folders

    /// `GET` all folders, `POST` a new one
    #[must_use]
    pub fn folders(&self) -> String {
        self.url("/folders")
    }

    /// `GET`, `PUT` or `DELETE` a single folder
    #[must_use]
    pub fn folder(&self, id: impl Display) -> String {
        self.url(&format!("/folders/{id}"))
    }

    /// Links filed under a folder
    #[must_use]
    pub fn folder_links(&self, id: impl Display) -> String {
        self.url(&format!("/folders/{id}/links"))
    }

    // Tags

    /// `GET` all tags, `POST` a new one
    #[must_use]
    pub fn tags(&self) -> String {
        self.url("/tags")
    }

    /// `DELETE` a tag
    #[must_use]
    pub fn tag(&self, id: impl Display) -> String {
        self.url(&format!("/tags/{id}"))
    }

    // Organizations

    /// `GET` the caller's organizations, `POST` a new one
    #[must_use]
    pub fn organizations(&self) -> String {
        self.url("/organizations")
    }

    /// `GET`, `PUT` or `DELETE` a single organization
    #[must_use]
    pub fn organization(&self, id: impl Display) -> String {
        self.url(&format!("/organizations/{id}"))
    }

    /// Members of an organization
    #[must_use]
    pub fn organization_members(&self, org_id: impl Display) -> String {
        self.url(&format!("/organizations/{org_id}/members"))
    }

    /// A single membership, used to remove a member
    #[must_use]
    pub fn organization_member(&self, org_id: impl Display, user_id: impl Display) -> String {
        self.url(&format!("/organizations/{org_id}/members/{user_id}"))
    }

    /// Pending invitations of an organization
    #[must_use]
    pub fn organization_invites(&self, org_id: impl Display) -> String {
        self.url(&format!("/organizations/{org_id}/invites"))
    }

    // Analytics

    /// Account-wide analytics summary
    #[must_use]
    pub fn analytics_overview(&self) -> String {
        self.url("/analytics/overview")
    }

    /// Time-series analytics for a single link
    #[must_use]
    pub fn link_analytics(&self, id: impl Display) -> String {
        self.url(&format!("/analytics/links/{id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Endpoints {
        Endpoints::new("https://sho.rt/api")
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let endpoints = Endpoints::new("https://sho.rt/api///");
        assert_eq!(endpoints.base_url(), "https://sho.rt/api");
        assert_eq!(endpoints.links(), "https://sho.rt/api/links");
    }

    #[test]
    fn test_static_endpoints() {
        let e = registry();
        assert_eq!(e.login(), "https://sho.rt/api/auth/login");
        assert_eq!(e.register(), "https://sho.rt/api/auth/register");
        assert_eq!(e.me(), "https://sho.rt/api/auth/me");
        assert_eq!(e.folders(), "https://sho.rt/api/folders");
        assert_eq!(e.tags(), "https://sho.rt/api/tags");
        assert_eq!(e.organizations(), "https://sho.rt/api/organizations");
        assert_eq!(e.analytics_overview(), "https://sho.rt/api/analytics/overview");
    }

    #[test]
    fn test_single_id_endpoints() {
        let e = registry();
        assert_eq!(e.link(42), "https://sho.rt/api/links/42");
        assert_eq!(e.link_stats(42), "https://sho.rt/api/links/42/stats");
        assert_eq!(e.link_qr(7), "https://sho.rt/api/links/7/qr");
        assert_eq!(e.folder(3), "https://sho.rt/api/folders/3");
        assert_eq!(e.folder_links(3), "https://sho.rt/api/folders/3/links");
        assert_eq!(e.tag(9), "https://sho.rt/api/tags/9");
        assert_eq!(e.organization(5), "https://sho.rt/api/organizations/5");
        assert_eq!(
            e.organization_members(5),
            "https://sho.rt/api/organizations/5/members"
        );
        assert_eq!(
            e.organization_invites(5),
            "https://sho.rt/api/organizations/5/invites"
        );
        assert_eq!(e.link_analytics(42), "https://sho.rt/api/analytics/links/42");
    }

    #[test]
    fn test_two_id_endpoints() {
        let e = registry();
        assert_eq!(e.link_tag(1, 2), "https://sho.rt/api/links/1/tags/2");
        assert_eq!(
            e.organization_member(5, "u-17"),
            "https://sho.rt/api/organizations/5/members/u-17"
        );
    }

    #[test]
    fn test_string_identifiers() {
        let e = registry();
        assert_eq!(e.link("abc123"), "https://sho.rt/api/links/abc123");
    }

    #[test]
    fn test_negative_ids_are_not_validated() {
        let e = registry();
        assert_eq!(e.link(-1), "https://sho.rt/api/links/-1");
    }
}
