use mosaic_domain::module::IconRef;
use mosaic_domain::route::RouteNode;
use mosaic_domain::sitemap::ChangeFrequency;
use std::str::FromStr;
use strum::VariantNames;

#[test]
fn icon_names_are_kebab_case() {
    assert_eq!(IconRef::from_str("shopping-cart").ok(), Some(IconRef::ShoppingCart));
    assert_eq!(IconRef::FileText.as_ref(), "file-text");
    assert!(IconRef::from_str("ShoppingCart").is_err());
    assert!(IconRef::VARIANTS.contains(&"layout-dashboard"));
}

#[test]
fn icon_serializes_as_its_name() {
    let value = serde_json::to_value(IconRef::BarChart).unwrap();
    assert_eq!(value, serde_json::json!("bar-chart"));
}

#[test]
fn change_frequency_renders_lowercase() {
    assert_eq!(ChangeFrequency::Weekly.to_string(), "weekly");
}

#[test]
fn route_node_serialization_skips_empty_children() {
    let value = serde_json::to_value(RouteNode::page("posts")).unwrap();
    assert_eq!(value, serde_json::json!({ "path": "posts", "kind": "static" }));
}
