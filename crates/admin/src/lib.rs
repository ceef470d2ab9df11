//! Storeboard dashboard library.
//!
//! This crate provides the dashboard server as a library, allowing it to be
//! tested and reused:
//! - REST API consumed by storefronts (public reads) and the dashboard
//!   (owner-only writes)
//! - Server-rendered admin pages for billboards, categories, colors, sizes,
//!   products, orders and store settings
//!
//! # Security
//!
//! Authentication is delegated to the identity provider, which must run as
//! an authenticating proxy in front of this server: the user id header it
//! forwards is trusted as-is.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
