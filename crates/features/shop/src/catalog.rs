use crate::error::ShopError;
use chrono::{DateTime, Utc};

/// A sellable item listed under `/shop/products/<slug>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub sku: String,
    pub slug: String,
    pub updated_at: DateTime<Utc>,
    pub in_stock: bool,
}

impl Product {
    /// # Errors
    /// [`ShopError::InvalidProduct`] when the SKU is blank or the slug is not a single URL segment.
    pub fn new(
        sku: impl Into<String>,
        slug: impl Into<String>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ShopError> {
        let sku = sku.into();
        let slug = slug.into();

        if sku.trim().is_empty() {
            return Err(ShopError::InvalidProduct { message: "blank SKU".into(), context: None });
        }
        if slug.is_empty() || !slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ShopError::InvalidProduct {
                message: format!("slug `{slug}` is not a URL segment").into(),
                context: Some(sku.into()),
            });
        }

        Ok(Self { sku, slug, updated_at, in_stock: true })
    }

    #[must_use]
    pub const fn sold_out(mut self) -> Self {
        self.in_stock = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_sku_and_nested_slug() {
        let now = Utc::now();
        assert!(Product::new(" ", "mug", now).is_err());

        let err = Product::new("SKU-1", "mugs/blue", now).unwrap_err();
        assert!(err.to_string().contains("SKU-1"));
    }
}
