//! Suppressor - suppressed-issue cache for editor integrations
//!
//! A [`SuppressedIssueCache`] keeps a point-in-time copy of every issue a
//! code-quality server has marked resolved or ignored for one project, so
//! that locally raised issues can be filtered per file without a round trip.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;

pub use cache::{CacheOptions, RefreshOutcome, Snapshot, SuppressedIssueCache};
pub use client::{ConnectionState, IssueRecord, Session, SuppressedIssueSource};
pub use error::{Error, Result};
