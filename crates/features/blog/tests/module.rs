use mosaic_blog::{Blog, MANIFEST_ENTRY, Post};
use mosaic_kernel::prelude::*;
use mosaic_kernel::registry::Registries;
use mosaic_kernel::schema::validate;

#[test]
fn declaration_passes_validation() {
    let module = (MANIFEST_ENTRY.factory)().unwrap();
    let config = validate(&module.raw_config().unwrap()).unwrap();

    assert_eq!(config.module_name, "Blog");
    assert_eq!(config.dashboard_routes[0].sub_items.len(), 2);
    assert_eq!(config.dashboard_routes[1].icon_ref, IconRef::MessageSquare);
}

#[tokio::test]
async fn contributes_absolute_sitemap_and_robots() {
    let now = chrono::Utc::now();
    let blog = Blog::with_posts([Post::draft("launch", "Launch", now).unwrap().publish()]);

    let mut registries = Registries::new();
    blog.register(&mut registries.registrar("Blog")).unwrap();

    let origin = RequestOrigin::parse("https://news.example").unwrap();
    let entries = SitemapAggregator::new(std::time::Duration::from_secs(1))
        .build(&registries.sitemap, &origin)
        .await;

    let locs: Vec<_> = entries.iter().map(|e| e.loc.as_str()).collect();
    assert_eq!(locs, ["https://news.example/blog", "https://news.example/blog/posts/launch"]);
    assert_eq!(registries.robots.len(), 1);
}
