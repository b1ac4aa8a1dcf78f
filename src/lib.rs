//! Client library for the Bangumi API (api.bgm.tv).
//!
//! Fetches subjects by numeric id with a hard cap on concurrent requests,
//! retrying transient server failures with capped exponential backoff. A
//! batch call returns either every result or the first observed failure,
//! never a silently partial list.

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod model;
pub mod retry;
pub mod transport;
