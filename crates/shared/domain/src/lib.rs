//! # Domain Models
//!
//! Data exchanged between the host and its service modules: module
//! declarations, route nodes, sitemap entries, robots groups and the host
//! configuration. Keep it lean: no I/O and no validation logic here; the
//! kernel owns both.

pub mod config;
pub mod module;
pub mod robots;
pub mod route;
pub mod sitemap;
