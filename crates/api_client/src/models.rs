//! Backend data models
//!
//! Request and response shapes of the Shortlink REST API. Unknown fields in
//! responses are ignored so the backend can grow without breaking clients.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An account as returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier
    pub id: i64,

    /// Login email
    pub email: String,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether the account has administrative privileges
    #[serde(default)]
    pub is_admin: bool,
}

/// Credentials for `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Login email
    pub email: String,
    /// Plaintext password, sent over TLS only
    pub password: String,
}

/// Payload for `POST /auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    /// Login email
    pub email: String,
    /// Plaintext password
    pub password: String,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Successful login or registration
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Credential token for subsequent calls
    pub token: String,
    /// The authenticated account
    pub user: User,
}

/// A shortened link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Link identifier
    pub id: i64,

    /// Destination URL
    pub original_url: String,

    /// Short code appended to the short domain
    pub short_code: String,

    /// Fully qualified short URL, when the backend provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,

    /// Optional human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Folder the link is filed under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<i64>,

    /// Tags attached to the link
    #[serde(default)]
    pub tags: Vec<Tag>,

    /// Total recorded clicks
    #[serde(default)]
    pub clicks: u64,

    /// Expiry instant, after which the link stops redirecting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Creation instant
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /links`
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateLinkRequest {
    /// Destination URL
    pub original_url: String,

    /// Requested short code; the backend generates one when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_code: Option<String>,

    /// Optional title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Folder to file the link under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<i64>,

    /// Expiry instant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl CreateLinkRequest {
    /// A request for `original_url` with everything else left to the backend
    #[must_use]
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            ..Self::default()
        }
    }
}

/// Payload for `PUT /links/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateLinkRequest {
    /// New destination URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,

    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New folder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<i64>,

    /// New expiry instant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Click statistics for one link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStats {
    /// Link identifier
    pub link_id: i64,

    /// All clicks ever recorded
    pub total_clicks: u64,

    /// Distinct visitors
    #[serde(default)]
    pub unique_clicks: u64,

    /// Most recent click
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_clicked_at: Option<DateTime<Utc>>,
}

/// A folder grouping links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Folder identifier
    pub id: i64,
    /// Folder name
    pub name: String,
    /// Number of links filed here
    #[serde(default)]
    pub link_count: u64,
}

/// Payload for `POST /folders`
#[derive(Debug, Clone, Serialize)]
pub struct CreateFolderRequest {
    /// Folder name
    pub name: String,
}

/// Payload for `PUT /folders/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct UpdateFolderRequest {
    /// New folder name
    pub name: String,
}

/// A label attachable to links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag identifier
    pub id: i64,
    /// Tag name
    pub name: String,
    /// Display colour (e.g. `#ff8800`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Payload for `POST /tags`
#[derive(Debug, Clone, Serialize)]
pub struct CreateTagRequest {
    /// Tag name
    pub name: String,
    /// Display colour
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// An organization sharing links among members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Organization identifier
    pub id: i64,
    /// Organization name
    pub name: String,
    /// Caller's role in the organization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<MemberRole>,
    /// Creation instant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /organizations`
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrganizationRequest {
    /// Organization name
    pub name: String,
}

/// Role of a member inside an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    /// Full control, including deleting the organization
    Owner,
    /// Manage members and links
    Admin,
    /// Create and edit links
    #[default]
    Member,
}

impl MemberRole {
    /// Wire name of the role
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A member of an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// User identifier
    pub user_id: i64,
    /// Login email
    pub email: String,
    /// Role in the organization
    #[serde(default)]
    pub role: MemberRole,
}

/// Payload for `POST /organizations/{id}/invites`
#[derive(Debug, Clone, Serialize)]
pub struct InviteMemberRequest {
    /// Email of the invitee
    pub email: String,
    /// Role granted on acceptance
    pub role: MemberRole,
}

/// Time window for analytics queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyticsPeriod {
    /// Last 24 hours
    Day,
    /// Last 7 days
    #[default]
    Week,
    /// Last 30 days
    Month,
    /// Last 365 days
    Year,
}

impl AnalyticsPeriod {
    /// Query parameter value understood by the backend
    #[must_use]
    pub const fn as_param(&self) -> &'static str {
        match self {
            Self::Day => "24h",
            Self::Week => "7d",
            Self::Month => "30d",
            Self::Year => "1y",
        }
    }
}

impl std::str::FromStr for AnalyticsPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "24h" | "day" => Ok(Self::Day),
            "7d" | "week" => Ok(Self::Week),
            "30d" | "month" => Ok(Self::Month),
            "1y" | "year" => Ok(Self::Year),
            _ => Err(format!(
                "Invalid period: {s}. Use 24h, 7d, 30d or 1y"
            )),
        }
    }
}

/// Clicks on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyClicks {
    /// Day
    pub date: NaiveDate,
    /// Clicks on that day
    pub clicks: u64,
}

/// Clicks attributed to one referrer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferrerCount {
    /// Referrer host, or `direct`
    pub referrer: String,
    /// Clicks from that referrer
    pub clicks: u64,
}

/// Account-wide analytics summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsOverview {
    /// Number of links owned
    pub total_links: u64,
    /// Clicks across all links
    pub total_clicks: u64,
    /// Best performing links
    #[serde(default)]
    pub top_links: Vec<Link>,
}

/// Time-series analytics for one link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAnalytics {
    /// Link identifier
    pub link_id: i64,
    /// Clicks per day in the requested window
    #[serde(default)]
    pub daily: Vec<DailyClicks>,
    /// Clicks grouped by referrer
    #[serde(default)]
    pub referrers: Vec<ReferrerCount>,
}
