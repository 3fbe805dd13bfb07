#![forbid(unsafe_code)]
//! Shortlink backend API access layer
//!
//! Every outbound call to the Shortlink REST backend goes through this crate.
//! It owns the pieces that every screen of the product shares:
//!
//! - [`Endpoints`] maps logical operations to concrete request URLs.
//! - [`SessionStore`] persists the credential token and privilege flag.
//! - [`auth_headers`] builds the header set for a request from the session.
//! - [`SessionInvalidator`] clears the session when the backend rejects the
//!   credential and broadcasts a [`SessionEvent`] to whoever owns navigation.
//! - [`ApiClient`] runs one request/response cycle and normalizes the outcome
//!   into an [`ApiResult`].
//!
//! # Example
//!
//! ```rust,ignore
//! use api_client::{ApiClient, ClientConfig, MemorySessionStore};
//! use std::sync::Arc;
//!
//! let client = ApiClient::new(&ClientConfig::load()?, Arc::new(MemorySessionStore::new()))?;
//! let mut events = client.invalidator().subscribe();
//!
//! match client.list_links().await {
//!     Ok(links) => println!("{} links", links.len()),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

mod api;
mod client;
mod config;
mod endpoints;
mod error;
mod headers;
mod invalidation;
mod models;
mod session;

pub use client::{ApiClient, RequestOptions};
pub use config::{ClientConfig, ConfigError};
pub use endpoints::Endpoints;
pub use error::{
    ApiError, ApiResult, DEFAULT_RETRY_AFTER_SECS, SESSION_EXPIRED_MESSAGE,
};
pub use headers::auth_headers;
pub use invalidation::{SessionEvent, SessionInvalidator};
pub use models::{
    AnalyticsOverview, AnalyticsPeriod, CreateFolderRequest, CreateLinkRequest,
    CreateOrganizationRequest, CreateTagRequest, DailyClicks, Folder, InviteMemberRequest, Link,
    LinkAnalytics, LinkStats, LoginRequest, LoginResponse, Member, MemberRole, Organization,
    ReferrerCount, RegisterRequest, Tag, UpdateFolderRequest, UpdateLinkRequest, User,
};
pub use session::{
    FileSessionStore, MemorySessionStore, PRIVILEGE_KEY, SessionError, SessionStore, TOKEN_KEY,
};
