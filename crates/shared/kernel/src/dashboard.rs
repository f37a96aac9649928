use crate::registry::ContributionRegistry;
use mosaic_domain::module::{DashboardEntry, IconRef};
use serde::Serialize;

/// A resolved sidebar link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub module: String,
    pub title: String,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

/// Flattens the dashboard registry into navigation items under `base`
/// (e.g. `/dashboard`), keeping registration order and entry order.
#[must_use]
pub fn navigation(registry: &ContributionRegistry<Vec<DashboardEntry>>, base: &str) -> Vec<NavItem> {
    let base = base.trim_end_matches('/');
    registry
        .list_all()
        .iter()
        .flat_map(|registration| {
            registration.contribution.iter().map(|entry| {
                let href = format!("{base}/{}", entry.url);
                let children = entry
                    .sub_items
                    .iter()
                    .map(|sub| NavItem {
                        module: registration.module.clone(),
                        title: sub.title.clone(),
                        href: format!("{href}/{}", sub.url),
                        icon: None,
                        children: Vec::new(),
                    })
                    .collect();

                NavItem {
                    module: registration.module.clone(),
                    title: entry.title.clone(),
                    href,
                    icon: Some(entry.icon_ref),
                    children,
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryKind;
    use mosaic_domain::module::SubEntry;

    fn entry(title: &str, url: &str, icon: IconRef) -> DashboardEntry {
        DashboardEntry { title: title.to_owned(), url: url.to_owned(), icon_ref: icon, sub_items: Vec::new() }
    }

    #[test]
    fn lists_modules_in_registration_order() {
        let mut registry = ContributionRegistry::new(RegistryKind::Dashboard);
        registry.register("Blog", vec![entry("Posts", "blog", IconRef::FileText)]).unwrap();
        registry.register("Shop", vec![entry("Orders", "shop/orders", IconRef::ShoppingCart)]).unwrap();

        let nav = navigation(&registry, "/dashboard/");
        let titles: Vec<_> = nav.iter().map(|n| (n.module.as_str(), n.title.as_str())).collect();
        assert_eq!(titles, [("Blog", "Posts"), ("Shop", "Orders")]);
        assert_eq!(nav[1].href, "/dashboard/shop/orders");
    }

    #[test]
    fn sub_items_resolve_under_parent() {
        let mut posts = entry("Posts", "blog", IconRef::FileText);
        posts.sub_items.push(SubEntry { title: "Drafts".to_owned(), url: "drafts".to_owned() });

        let mut registry = ContributionRegistry::new(RegistryKind::Dashboard);
        registry.register("Blog", vec![posts]).unwrap();

        let nav = navigation(&registry, "/dashboard");
        assert_eq!(nav[0].children[0].href, "/dashboard/blog/drafts");
        assert_eq!(nav[0].children[0].icon, None);
    }
}
