//! # Blog module
//!
//! Posts, drafts, categories and comments under `/blog`. Published posts
//! are listed in the sitemap; drafts are kept out of crawlers' reach.

mod error;
mod post;

pub use crate::error::{BlogError, BlogErrorExt};
pub use crate::post::Post;

use chrono::{DateTime, Utc};
use mosaic_kernel::prelude::*;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Location of the declaration under the discovery convention.
pub const SOURCE: &str = "crates/features/blog/module.json";
const DECLARATION: &str = include_str!("../module.json");

pub const MANIFEST_ENTRY: ManifestEntry = ManifestEntry::new(SOURCE, module);

/// Manifest factory.
///
/// # Errors
/// Never fails; the signature is the one every factory shares.
pub fn module() -> Result<Box<dyn ServiceModule>, KernelError> {
    Ok(Box::new(Blog::default()))
}

#[derive(Debug, Clone)]
pub struct Blog {
    posts: Arc<[Post]>,
    launched_at: DateTime<Utc>,
}

impl Default for Blog {
    fn default() -> Self {
        Self { posts: Arc::from([]), launched_at: Utc::now() }
    }
}

impl Blog {
    #[must_use]
    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        Self { posts: posts.into_iter().collect(), ..Self::default() }
    }

    /// Published posts, newest first.
    #[must_use]
    pub fn published(&self) -> Vec<&Post> {
        let mut posts: Vec<_> = self.posts.iter().filter(|p| p.published).collect();
        posts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        posts
    }

    fn sitemap_entries(&self) -> Vec<SitemapUrlEntry> {
        let published = self.published();
        let latest = published.first().map_or(self.launched_at, |p| p.updated_at);

        let mut entries = Vec::with_capacity(published.len() + 1);
        entries.push(
            SitemapUrlEntry::new("/blog", latest)
                .change_frequency(ChangeFrequency::Daily)
                .priority(0.8),
        );
        entries.extend(published.into_iter().map(|post| {
            SitemapUrlEntry::new(format!("/blog/posts/{}", post.slug()), post.updated_at)
                .change_frequency(ChangeFrequency::Weekly)
                .priority(0.6)
        }));
        entries
    }
}

impl ServiceModule for Blog {
    fn raw_config(&self) -> Result<Value, KernelError> {
        parse_declaration(SOURCE, DECLARATION)
    }

    fn routes(&self) -> Vec<RouteNode> {
        vec![
            RouteNode::index(),
            RouteNode::layout("posts", vec![RouteNode::index(), RouteNode::page("featured")]),
            RouteNode::page("drafts"),
            RouteNode::page("categories"),
            RouteNode::page("comments"),
        ]
    }

    fn register(&self, registrar: &mut Registrar<'_>) -> Result<(), KernelError> {
        let blog = self.clone();
        registrar.sitemap(Contributor::dynamic(move |origin| {
            let blog = blog.clone();
            async move {
                let entries = blog.sitemap_entries();
                debug!(origin = %origin, entries = entries.len(), "Blog sitemap contributed");
                Ok(entries)
            }
        }))?;

        registrar.robots(Contributor::Static(vec![
            RobotsGroup::any_agent().allow("/blog/").disallow("/blog/drafts/"),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn published_posts_are_newest_first_and_drafts_hidden() {
        let at = |day| Utc.with_ymd_and_hms(2025, 3, day, 9, 0, 0).unwrap();
        let blog = Blog::with_posts([
            Post::draft("older", "Older", at(1)).unwrap().publish(),
            Post::draft("wip", "Work in progress", at(9)).unwrap(),
            Post::draft("newer", "Newer", at(5)).unwrap().publish(),
        ]);

        let slugs: Vec<_> = blog.published().iter().map(|p| p.slug()).collect();
        assert_eq!(slugs, ["newer", "older"]);

        let entries = blog.sitemap_entries();
        assert_eq!(entries[0].last_modified, at(5));
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| !e.loc.contains("wip")));
    }
}
