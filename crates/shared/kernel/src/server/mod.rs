//! Axum surface of the composition engine.
//!
//! `sitemap.xml` and `robots.txt` are mounted only while the route table
//! still includes the matching host fallback; a module override takes the
//! path over.

mod handlers;
mod health;
pub mod router;
mod state;

pub use state::{HostState, HostStateBuilder, HostStateError, HostStateInner};
