//! # Sitemap aggregation
//!
//! Per request: ask every registered sitemap contributor for entries,
//! concatenate them in registration order, make every `loc` absolute,
//! drop duplicates (first wins) and render `sitemap.xml`.

use crate::aggregate::collect;
use crate::origin::RequestOrigin;
use crate::registry::{ContributionRegistry, Contributor, RegistryKind};
use chrono::SecondsFormat;
use fxhash::FxHashSet;
use mosaic_domain::config::{AggregationConfig, SiteConfig};
use mosaic_domain::sitemap::SitemapUrlEntry;
use std::time::Duration;
use tracing::{debug, warn};

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const URLSET_OPEN: &str = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#;

#[derive(Debug, Clone)]
pub struct SitemapAggregator {
    timeout: Duration,
}

impl SitemapAggregator {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    #[must_use]
    pub const fn from_config(config: &AggregationConfig) -> Self {
        Self::new(Duration::from_millis(config.contributor_timeout_ms))
    }

    /// Collects the sitemap for `origin`.
    ///
    /// Contributor failures are logged and contribute nothing; the returned
    /// entries are always well-formed (absolute `loc`, priority in `[0, 1]`).
    pub async fn build(
        &self,
        registry: &ContributionRegistry<Contributor<SitemapUrlEntry>>,
        origin: &RequestOrigin,
    ) -> Vec<SitemapUrlEntry> {
        let (entries, failures) =
            collect(RegistryKind::Sitemap, registry.list_all(), origin, self.timeout)
                .await
                .into_entries();

        let merged = merge(entries, origin);
        debug!(
            origin = %origin,
            entries = merged.len(),
            failed_contributors = failures.len(),
            "Sitemap aggregated"
        );
        merged
    }
}

/// Resolves, sanitizes and de-duplicates entries in their given order.
#[must_use]
pub fn merge(entries: Vec<SitemapUrlEntry>, origin: &RequestOrigin) -> Vec<SitemapUrlEntry> {
    let mut seen = FxHashSet::default();
    let mut merged = Vec::with_capacity(entries.len());

    for entry in entries {
        let Some(entry) = normalize(entry, origin) else { continue };
        if seen.insert(entry.loc.clone()) {
            merged.push(entry);
        }
    }
    merged
}

fn normalize(mut entry: SitemapUrlEntry, origin: &RequestOrigin) -> Option<SitemapUrlEntry> {
    match origin.resolve(&entry.loc) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => entry.loc = url.into(),
        Ok(url) => {
            warn!(loc = %entry.loc, scheme = url.scheme(), "Dropping sitemap entry with non-http loc");
            return None;
        },
        Err(e) => {
            warn!(loc = %entry.loc, error = %e, "Dropping sitemap entry with unresolvable loc");
            return None;
        },
    }

    if let Some(priority) = entry.priority
        && !(0.0..=1.0).contains(&priority)
    {
        warn!(loc = %entry.loc, priority, "Clearing sitemap priority outside [0, 1]");
        entry.priority = None;
    }

    Some(entry)
}

/// Renders entries as a sitemap protocol `urlset` document.
#[must_use]
pub fn to_xml(entries: &[SitemapUrlEntry]) -> String {
    let mut xml = String::with_capacity(128 + entries.len() * 160);
    xml.push_str(XML_HEADER);
    xml.push('\n');
    xml.push_str(URLSET_OPEN);
    xml.push('\n');

    for entry in entries {
        xml.push_str("<url>\n");
        push_element(&mut xml, "loc", &escape(&entry.loc));
        push_element(
            &mut xml,
            "lastmod",
            &entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true),
        );
        if let Some(frequency) = entry.change_frequency {
            push_element(&mut xml, "changefreq", frequency.as_ref());
        }
        if let Some(priority) = entry.priority {
            push_element(&mut xml, "priority", &priority.to_string());
        }
        xml.push_str("</url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

fn push_element(xml: &mut String, name: &str, value: &str) {
    xml.push('<');
    xml.push_str(name);
    xml.push('>');
    xml.push_str(value);
    xml.push_str("</");
    xml.push_str(name);
    xml.push_str(">\n");
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `Cache-Control` value for the sitemap response.
#[must_use]
pub fn cache_control(site: &SiteConfig) -> String {
    format!(
        "public, max-age={}, stale-while-revalidate={}",
        site.sitemap_max_age_seconds, site.sitemap_stale_while_revalidate_seconds
    )
}
