//! Domain models for the dashboard.
//!
//! Records are what the REST API returns: camelCase JSON, ids as bare
//! strings, prices as decimal strings. They live in `storeboard-core` so the
//! client reads the same shapes; only the session flash is local.

pub mod session;

pub use session::{Flash, FlashLevel, keys as session_keys};
pub use storeboard_core::records::{
    Billboard, Category, Color, Image, Order, OrderItem, Product, Size, Store,
};
