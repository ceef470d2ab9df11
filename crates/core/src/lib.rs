//! Storeboard Core - Shared types library.
//!
//! This crate provides the types shared by every Storeboard component:
//! - `admin` - Dashboard server (REST API + server-rendered pages)
//! - `client` - Headless client contract used by the CLI and tests
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types, validation and formatting - no I/O, no
//! database access, no HTTP clients. Server and client validate the same input
//! structs, so a payload the client accepts is a payload the server accepts.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices and display formatting
//! - [`entity`] - Entity kinds with their routes and notification texts
//! - [`forms`] - Per-entity validation schemas
//! - [`records`] - Records served by the REST API, with their table rows
//! - [`table`] - Table columns, formatted cells, search and sort
//! - [`api_docs`] - The five documented REST endpoints of an entity
//! - [`revenue`] - Monthly revenue series for the dashboard chart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api_docs;
pub mod entity;
pub mod forms;
pub mod records;
pub mod revenue;
pub mod table;
pub mod types;

pub use api_docs::{ApiAccess, ApiRoute};
pub use entity::EntityKind;
pub use forms::{FieldErrors, Validate};
pub use records::Editable;
pub use revenue::GraphPoint;
pub use table::{ListRecord, Table};
pub use types::*;
