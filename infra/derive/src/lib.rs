#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the host and its service modules.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! mosaic-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into a platform error type.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<ErrorName>Ext` trait adding `.context(...)` to `Result<T, ErrorName>` and to
///   `Result<T, Source>` for every variant carrying a `source` field.
/// * `From<Source>` for every variant with a `source` field (`?` friendly).
/// * `From<&'static str>` / `From<String>` when an `Internal { message, context }` variant exists.
/// * A module-private `format_context` helper for `#[error(...)]` strings.
///
/// # Requirements
///
/// * Variants use named fields only.
/// * A `context` field must be `Option<Cow<'static, str>>`.
/// * Variants with a `source` field must also carry `context`, and nothing else.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[mosaic_derive::mosaic_error]
/// pub enum KernelError {
///     #[error("Config error{}: {source}", format_context(.context))]
///     Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<(), KernelError> {
///     builder.build().context("Building host config")?;
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn mosaic_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
