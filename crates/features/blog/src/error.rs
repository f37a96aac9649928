use std::borrow::Cow;

/// A specialized [`BlogError`] enum of this crate.
#[mosaic_derive::mosaic_error]
pub enum BlogError {
    /// Slugs become URL segments: lowercase ASCII, digits and dashes only.
    #[error("Invalid post slug `{slug}`{}", format_context(.context))]
    InvalidSlug { slug: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Internal blog error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
