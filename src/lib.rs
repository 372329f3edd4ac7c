//! Brezza — content feed and cache engine for a community blogging platform.
//!
//! The crate assembles paginated views of a post stream (global feed, group
//! feed, author profile feed, "following" feed) over a mutable follow graph,
//! and serves the hottest view — the global feed's first page — through a
//! time-bounded cache with explicit invalidation.
//!
//! Persistence, authentication, and HTML rendering live outside this crate;
//! the engine consumes the post store and follow graph through the repository
//! traits in [`application::repos`]. An ordered in-memory reference store
//! ships in [`infra::memory`].

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
