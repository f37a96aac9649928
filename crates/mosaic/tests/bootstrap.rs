use mosaic::domain::config::HostConfig;
use mosaic::kernel::routes::FallbackDecision;

#[test]
fn bundled_modules_compose_without_conflicts() {
    let platform = mosaic::bootstrap(&HostConfig::default()).expect("bundled modules compose");

    let names: Vec<_> = platform.modules().iter().map(|m| m.module_name.as_str()).collect();
    assert_eq!(names, ["Blog", "Shop"]);
    assert!(platform.excluded().is_empty());

    let routes = platform.routes();
    assert!(routes.find("/blog/posts/featured").is_some());
    assert!(routes.find("/shop/orders/returns").is_some());
    assert!(routes.find("/dashboard").is_some());
    assert!(routes.includes_fallback("sitemap.xml"));
    assert!(routes.includes_fallback("robots.txt"));
}

#[test]
fn shop_storefront_takes_over_the_landing_page() {
    let platform = mosaic::bootstrap(&HostConfig::default()).unwrap();

    assert_eq!(
        platform.routes().fallbacks()[0],
        FallbackDecision::Overridden { path: String::new(), module: "Shop".to_owned() }
    );
    assert!(platform.routes().find("/deals").is_some());
}

#[test]
fn manifest_lists_every_enabled_module() {
    assert_eq!(mosaic::MANIFEST.len(), mosaic::modules::ENABLED.len());
    assert!(mosaic::modules::is_enabled("blog"));
}
