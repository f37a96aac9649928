use crate::error::BlogError;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    slug: String,
    pub title: String,
    pub updated_at: DateTime<Utc>,
    pub published: bool,
}

impl Post {
    /// A draft post.
    ///
    /// # Errors
    /// [`BlogError::InvalidSlug`] unless `slug` is non-empty lowercase ASCII, digits and inner dashes.
    pub fn draft(
        slug: impl Into<String>,
        title: impl Into<String>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, BlogError> {
        let slug = slug.into();
        if !is_slug(&slug) {
            return Err(BlogError::InvalidSlug { slug: slug.into(), context: None });
        }
        Ok(Self { slug, title: title.into(), updated_at, published: false })
    }

    #[must_use]
    pub const fn publish(mut self) -> Self {
        self.published = true;
        self
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }
}

fn is_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_url_safe_slugs_only() {
        let now = Utc::now();
        assert!(Post::draft("hello-world-2", "Hello", now).is_ok());
        for slug in ["", "Hello", "a b", "-lead", "trail-", "ünï"] {
            assert!(Post::draft(slug, "x", now).is_err(), "{slug}");
        }
    }
}
