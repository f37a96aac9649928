//! # Shop module
//!
//! Storefront, orders, products and customers under `/shop`. The shop also
//! takes over the site landing page with its storefront.

mod catalog;
mod error;

pub use crate::catalog::Product;
pub use crate::error::{ShopError, ShopErrorExt};

use chrono::{DateTime, Utc};
use mosaic_kernel::prelude::*;
use serde_json::Value;
use tracing::debug;

pub const SOURCE: &str = "crates/features/shop/module.json";
const DECLARATION: &str = include_str!("../module.json");

pub const MANIFEST_ENTRY: ManifestEntry = ManifestEntry::new(SOURCE, module);

/// Manifest factory.
///
/// # Errors
/// Never fails; the signature is the one every factory shares.
pub fn module() -> Result<Box<dyn ServiceModule>, KernelError> {
    Ok(Box::new(Shop::default()))
}

#[derive(Debug, Clone)]
pub struct Shop {
    products: Vec<Product>,
    opened_at: DateTime<Utc>,
}

impl Default for Shop {
    fn default() -> Self {
        Self { products: Vec::new(), opened_at: Utc::now() }
    }
}

impl Shop {
    #[must_use]
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self { products: products.into_iter().collect(), ..Self::default() }
    }

    /// Storefront pages plus every product still in stock.
    fn sitemap_entries(&self) -> Vec<SitemapUrlEntry> {
        let mut entries = vec![
            SitemapUrlEntry::new("/", self.opened_at).change_frequency(ChangeFrequency::Daily).priority(1.0),
            SitemapUrlEntry::new("/shop/products", self.opened_at)
                .change_frequency(ChangeFrequency::Daily)
                .priority(0.9),
        ];
        entries.extend(self.products.iter().filter(|p| p.in_stock).map(|product| {
            SitemapUrlEntry::new(format!("/shop/products/{}", product.slug), product.updated_at)
                .change_frequency(ChangeFrequency::Weekly)
                .priority(0.7)
        }));
        entries
    }

    fn robots_groups() -> Vec<RobotsGroup> {
        vec![
            RobotsGroup::any_agent()
                .allow("/shop/products/")
                .disallow("/shop/cart")
                .disallow("/shop/checkout")
                .disallow("/shop/orders/"),
            RobotsGroup {
                user_agents: vec!["AhrefsBot".to_owned(), "SemrushBot".to_owned()],
                ..RobotsGroup::default()
            }
            .disallow("/shop/")
            .crawl_delay(30),
        ]
    }
}

impl ServiceModule for Shop {
    fn raw_config(&self) -> Result<Value, KernelError> {
        parse_declaration(SOURCE, DECLARATION)
    }

    fn routes(&self) -> Vec<RouteNode> {
        vec![
            RouteNode::index(),
            RouteNode::layout("products", vec![RouteNode::index(), RouteNode::splat()]),
            RouteNode::layout("orders", vec![RouteNode::index(), RouteNode::page("returns")]),
            RouteNode::page("customers"),
            RouteNode::page("cart"),
            RouteNode::page("checkout"),
        ]
    }

    /// The storefront replaces the host landing page.
    fn fallback_overrides(&self) -> Vec<RouteNode> {
        vec![RouteNode::index().with_children(vec![RouteNode::page("deals")])]
    }

    fn register(&self, registrar: &mut Registrar<'_>) -> Result<(), KernelError> {
        let entries = self.sitemap_entries();
        debug!(module = registrar.module(), entries = entries.len(), "Static sitemap prepared");

        registrar.sitemap(Contributor::Static(entries))?;
        registrar.robots(Contributor::Static(Self::robots_groups()))
    }
}
