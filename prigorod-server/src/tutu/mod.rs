//! tutu.ru upstream client.
//!
//! This module provides an HTTP client for the tutu.ru suburban schedule
//! pages. The upstream is a plain website, not an API:
//! - the search endpoint redirects to the actual schedule page, so
//!   redirects must be followed
//! - responses are HTML documents intended for a browser; the client
//!   identifies itself with a desktop browser user-agent
//! - TLS certificate verification is disabled, matching the behavior
//!   the site is scraped with in production

mod client;
mod error;
mod query;

pub use client::{TutuClient, TutuConfig};
pub use error::TutuError;
pub use query::{MissingStations, ScheduleQuery};
