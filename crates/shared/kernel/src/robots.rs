//! # Robots aggregation
//!
//! Host default groups come first, module groups follow in registration
//! order. Groups are never merged: repeated `User-agent` stanzas are valid
//! `robots.txt` and crawlers combine them themselves.

use crate::aggregate::collect;
use crate::origin::RequestOrigin;
use crate::registry::{ContributionRegistry, Contributor, RegistryKind};
use mosaic_domain::config::AggregationConfig;
use mosaic_domain::robots::RobotsGroup;
use std::time::Duration;
use tracing::debug;

pub const SITEMAP_PATH: &str = "/sitemap.xml";

#[derive(Debug, Clone)]
pub struct RobotsAggregator {
    timeout: Duration,
}

impl RobotsAggregator {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    #[must_use]
    pub const fn from_config(config: &AggregationConfig) -> Self {
        Self::new(Duration::from_millis(config.contributor_timeout_ms))
    }

    /// Host defaults followed by every module group, failures skipped.
    pub async fn build(
        &self,
        registry: &ContributionRegistry<Contributor<RobotsGroup>>,
        origin: &RequestOrigin,
        host_defaults: &[RobotsGroup],
    ) -> Vec<RobotsGroup> {
        let (module_groups, failures) =
            collect(RegistryKind::Robots, registry.list_all(), origin, self.timeout)
                .await
                .into_entries();

        let mut groups = Vec::with_capacity(host_defaults.len() + module_groups.len());
        groups.extend_from_slice(host_defaults);
        groups.extend(module_groups);

        debug!(
            origin = %origin,
            groups = groups.len(),
            failed_contributors = failures.len(),
            "Robots aggregated"
        );
        groups
    }
}

/// Renders groups as `robots.txt`, ending with the sitemap location.
#[must_use]
pub fn to_text(groups: &[RobotsGroup], origin: &RequestOrigin) -> String {
    let mut text = String::new();

    for group in groups {
        if group.user_agents.is_empty() {
            push_line(&mut text, "User-agent", "*");
        }
        for agent in &group.user_agents {
            push_line(&mut text, "User-agent", agent);
        }
        for path in &group.allow {
            push_line(&mut text, "Allow", path);
        }
        for path in &group.disallow {
            push_line(&mut text, "Disallow", path);
        }
        if let Some(delay) = group.crawl_delay {
            push_line(&mut text, "Crawl-delay", &delay.to_string());
        }
        text.push('\n');
    }

    push_line(&mut text, "Sitemap", &format!("{origin}{SITEMAP_PATH}"));
    text
}

fn push_line(text: &mut String, directive: &str, value: &str) {
    text.push_str(directive);
    text.push_str(": ");
    // A control character would start a new directive.
    text.extend(value.chars().filter(|c| !c.is_control()));
    text.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> RequestOrigin {
        RequestOrigin::parse("https://example.com").unwrap()
    }

    #[test]
    fn renders_every_directive_in_order() {
        let group = RobotsGroup {
            user_agents: vec!["Googlebot".to_owned(), "Bingbot".to_owned()],
            allow: vec!["/blog/".to_owned()],
            disallow: vec!["/blog/drafts/".to_owned()],
            crawl_delay: Some(10),
        };

        assert_eq!(
            to_text(&[group], &origin()),
            "User-agent: Googlebot\nUser-agent: Bingbot\nAllow: /blog/\n\
             Disallow: /blog/drafts/\nCrawl-delay: 10\n\nSitemap: https://example.com/sitemap.xml\n"
        );
    }

    #[test]
    fn group_without_agents_targets_everyone() {
        let text = to_text(&[RobotsGroup::default().disallow("/tmp/")], &origin());
        assert!(text.starts_with("User-agent: *\nDisallow: /tmp/\n"));
    }

    #[test]
    fn strips_line_breaks_from_values() {
        let text = to_text(&[RobotsGroup::any_agent().disallow("/a\nAllow: /secret")], &origin());
        assert!(text.contains("Disallow: /aAllow: /secret\n"));
        assert!(!text.contains("\nAllow: /secret"));
    }

    #[test]
    fn empty_groups_still_point_to_sitemap() {
        assert_eq!(to_text(&[], &origin()), "Sitemap: https://example.com/sitemap.xml\n");
    }
}
