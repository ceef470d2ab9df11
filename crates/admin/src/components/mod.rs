//! Reusable UI building blocks for server-rendered pages.

pub mod data_table;

pub use data_table::{EMPTY_TITLE, HeaderView, TableQuery, headers};
