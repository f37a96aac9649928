//! # Route composition
//!
//! Builds the single route table the routing layer consumes:
//!
//! 1. host routes, verbatim and always present;
//! 2. one layout per module that contributes a subtree, mounted at the
//!    module's namespace, in registration order;
//! 3. host fallbacks, unless a module already claims an equivalent path.
//!
//! Fallback inclusion is decided here, once, from the module declarations.
//! Two parties claiming the same path abort start-up, whether through mounts,
//! fallback overrides or the routes nested under an override.

use crate::error::KernelError;
use fxhash::FxHashMap;
use mosaic_domain::module::ModuleConfig;
use mosaic_domain::route::{RouteKind, RouteNode};
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, info, warn};

const HOST: &str = "host";

/// The routes one module brings, already namespaced.
#[derive(Debug, Clone)]
pub struct ModuleRouteSet {
    pub module: String,
    pub mount: String,
    pub routes: Vec<RouteNode>,
    pub overrides: Vec<RouteNode>,
}

impl ModuleRouteSet {
    /// Derives the mount path from `config` and relativizes the subtree under it.
    #[must_use]
    pub fn new(config: &ModuleConfig, routes: Vec<RouteNode>, overrides: Vec<RouteNode>) -> Self {
        Self {
            module: config.module_name.clone(),
            mount: mount_path(config),
            routes: routes.into_iter().map(relativize).collect(),
            overrides,
        }
    }
}

/// First segment of the module's first dashboard entry; the lower-cased
/// module name when it declares none.
#[must_use]
pub fn mount_path(config: &ModuleConfig) -> String {
    config
        .dashboard_routes
        .first()
        .and_then(|entry| entry.url.split('/').find(|segment| !segment.is_empty()))
        .map_or_else(|| config.module_name.to_ascii_lowercase(), str::to_ascii_lowercase)
}

/// Ordered route tree plus the decisions taken while building it.
#[derive(Debug, Clone, Serialize)]
pub struct RouteTable {
    root: RouteNode,
    mounts: Vec<Mount>,
    fallbacks: Vec<FallbackDecision>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mount {
    pub module: String,
    pub path: String,
}

/// What happened to one host fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum FallbackDecision {
    Included { path: String },
    Overridden { path: String, module: String },
    ShadowedByMount { path: String, module: String },
}

/// A route with its full path, as listed by [`RouteTable::flatten`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatRoute {
    pub path: String,
    pub kind: RouteKind,
}

impl RouteTable {
    #[must_use]
    pub const fn root(&self) -> &RouteNode {
        &self.root
    }

    #[must_use]
    pub fn mounts(&self) -> &[Mount] {
        &self.mounts
    }

    #[must_use]
    pub fn fallbacks(&self) -> &[FallbackDecision] {
        &self.fallbacks
    }

    /// Whether the host fallback at `path` survived composition.
    #[must_use]
    pub fn includes_fallback(&self, path: &str) -> bool {
        let key = normalize(path);
        self.fallbacks
            .iter()
            .any(|decision| matches!(decision, FallbackDecision::Included { path } if *path == key))
    }

    /// Every route with its full path (`/`, `/blog`, `/blog/posts`, ...), depth first, in table order.
    #[must_use]
    pub fn flatten(&self) -> Vec<FlatRoute> {
        let mut flat = Vec::new();
        for child in &self.root.children {
            flatten_into(child, "", &mut flat);
        }
        flat
    }

    /// Finds a route by full path; equivalence ignores surrounding slashes and case.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<FlatRoute> {
        let wanted = format!("/{}", normalize(path));
        self.flatten().into_iter().find(|route| route.path.eq_ignore_ascii_case(&wanted))
    }
}

/// Merges host routes, module subtrees and fallbacks into one table.
///
/// # Errors
/// [`KernelError::RouteConflict`] when two modules share a mount path, a module
/// mounts over a host route, a module overrides a fallback another module
/// mounts at, two modules override the same fallback, or a route nested under
/// an override lands on a path owned by someone else.
pub fn compose(
    fallback_routes: Vec<RouteNode>,
    host_routes: Vec<RouteNode>,
    modules: &[ModuleRouteSet],
) -> Result<RouteTable, KernelError> {
    let host_paths: Vec<String> = host_routes.iter().map(route_key).collect();
    let fallback_paths: Vec<String> = fallback_routes.iter().map(route_key).collect();

    let mounts = claim_mounts(modules, &host_paths)?;
    let overrides = claim_overrides(modules, &fallback_paths, &mounts)?;
    check_override_subtrees(modules, &overrides, &host_paths, &mounts, &fallback_paths)?;

    let mut children = host_routes;
    for set in modules.iter().filter(|set| !set.routes.is_empty()) {
        children.push(RouteNode::layout(set.mount.clone(), set.routes.clone()));
    }

    let mut decisions = Vec::with_capacity(fallback_routes.len());
    for (fallback, key) in fallback_routes.into_iter().zip(fallback_paths) {
        if let Some((module, node)) = overrides.get(&key) {
            debug!(path = %key, module = %module, "Fallback overridden by module");
            children.push((*node).clone());
            decisions.push(FallbackDecision::Overridden { path: key, module: (*module).to_owned() });
        } else if let Some(module) = mounts.get(&key) {
            debug!(path = %key, module = %module, "Fallback shadowed by module mount");
            decisions.push(FallbackDecision::ShadowedByMount { path: key, module: (*module).to_owned() });
        } else {
            children.push(fallback);
            decisions.push(FallbackDecision::Included { path: key });
        }
    }

    let mounts = modules
        .iter()
        .map(|set| Mount { module: set.module.clone(), path: set.mount.clone() })
        .collect();

    let table = RouteTable { root: RouteNode::layout("/", children), mounts, fallbacks: decisions };
    info!(routes = table.flatten().len(), modules = modules.len(), "Route table composed");
    Ok(table)
}

/// Mount path → module for every module that contributes a subtree, rejecting
/// duplicates and collisions with host routes. A module without routes claims
/// no path but still may not share its namespace.
fn claim_mounts<'a>(
    modules: &'a [ModuleRouteSet],
    host_paths: &[String],
) -> Result<FxHashMap<String, &'a str>, KernelError> {
    let mut claimed: FxHashMap<String, &'a str> = FxHashMap::default();
    let mut routed: FxHashMap<String, &'a str> = FxHashMap::default();

    for set in modules {
        let key = normalize(&set.mount);
        if host_paths.contains(&key) {
            return Err(conflict(key, HOST, &set.module));
        }
        if let Some(first) = claimed.get(&key) {
            return Err(conflict(key, first, &set.module));
        }
        if !set.routes.is_empty() {
            routed.insert(key.clone(), set.module.as_str());
        }
        claimed.insert(key, set.module.as_str());
    }
    Ok(routed)
}

/// Fallback path → (module, replacement node).
fn claim_overrides<'a>(
    modules: &'a [ModuleRouteSet],
    fallback_paths: &[String],
    mounts: &FxHashMap<String, &'a str>,
) -> Result<FxHashMap<String, (&'a str, &'a RouteNode)>, KernelError> {
    let mut claimed: FxHashMap<String, (&'a str, &'a RouteNode)> = FxHashMap::default();

    for set in modules {
        for node in &set.overrides {
            let key = route_key(node);
            if !fallback_paths.contains(&key) {
                warn!(module = %set.module, path = %key, "Ignoring override of a path that is not a host fallback");
                continue;
            }
            if let Some(owner) = mounts.get(&key) {
                return Err(conflict(key, owner, &set.module));
            }
            if let Some((first, _)) = claimed.get(&key) {
                return Err(conflict(key, first, &set.module));
            }
            claimed.insert(key, (set.module.as_str(), node));
        }
    }
    Ok(claimed)
}

/// Routes nested under an override sit at the root, outside the module's
/// namespace; each must land on a top-level path nobody else owns.
fn check_override_subtrees(
    modules: &[ModuleRouteSet],
    overrides: &FxHashMap<String, (&str, &RouteNode)>,
    host_paths: &[String],
    mounts: &FxHashMap<String, &str>,
    fallback_paths: &[String],
) -> Result<(), KernelError> {
    let mut owners: FxHashMap<&str, &str> = FxHashMap::default();
    for path in host_paths {
        owners.insert(path.as_str(), HOST);
    }
    for (path, module) in mounts {
        owners.insert(path.as_str(), *module);
    }
    for (path, (module, _)) in overrides {
        owners.insert(path.as_str(), *module);
    }
    for path in fallback_paths {
        owners.entry(path.as_str()).or_insert(HOST);
    }

    let mut nested: FxHashMap<String, &str> = FxHashMap::default();
    for set in modules {
        for node in &set.overrides {
            let key = route_key(node);
            if !matches!(overrides.get(&key), Some((module, _)) if *module == set.module) {
                continue;
            }

            let base = if key.is_empty() { String::new() } else { format!("/{key}") };
            let mut flat = Vec::new();
            for child in &node.children {
                flatten_into(child, &base, &mut flat);
            }

            for route in flat {
                let path = normalize(&route.path);
                let top = path.split('/').next().unwrap_or_default();
                if top != key {
                    if let Some(owner) = owners.get(top) {
                        return Err(conflict(path, owner, &set.module));
                    }
                }
                if let Some(first) = nested.get(&path) {
                    return Err(conflict(path, first, &set.module));
                }
                nested.insert(path, set.module.as_str());
            }
        }
    }
    Ok(())
}

fn conflict(path: String, first: &str, second: &str) -> KernelError {
    let display = if path.is_empty() { Cow::Borrowed("/") } else { Cow::Owned(path) };
    KernelError::RouteConflict {
        path: display,
        first: first.to_owned().into(),
        second: second.to_owned().into(),
        context: None,
    }
}

fn route_key(node: &RouteNode) -> String {
    if node.kind == RouteKind::Index { String::new() } else { normalize(&node.path) }
}

fn normalize(path: &str) -> String {
    path.trim_matches('/').to_ascii_lowercase()
}

fn relativize(mut node: RouteNode) -> RouteNode {
    node.path = node.path.trim_matches('/').to_owned();
    node.children = node.children.into_iter().map(relativize).collect();
    node
}

fn flatten_into(node: &RouteNode, parent: &str, flat: &mut Vec<FlatRoute>) {
    let segment = node.path.trim_matches('/');
    let path = match (node.kind, segment.is_empty()) {
        (RouteKind::Index, _) | (_, true) => parent.to_owned(),
        _ => format!("{parent}/{segment}"),
    };

    flat.push(FlatRoute {
        path: if path.is_empty() { "/".to_owned() } else { path.clone() },
        kind: node.kind,
    });
    for child in &node.children {
        flatten_into(child, &path, flat);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_domain::module::{DashboardEntry, IconRef};

    fn config(name: &str, urls: &[&str]) -> ModuleConfig {
        ModuleConfig {
            module_name: name.to_owned(),
            dashboard_routes: urls
                .iter()
                .map(|url| DashboardEntry {
                    title: name.to_owned(),
                    url: (*url).to_owned(),
                    icon_ref: IconRef::Folder,
                    sub_items: Vec::new(),
                })
                .collect(),
            dependencies: Vec::new(),
        }
    }

    fn host() -> Vec<RouteNode> {
        vec![RouteNode::page("auth"), RouteNode::layout("dashboard", vec![RouteNode::index()])]
    }

    fn fallbacks() -> Vec<RouteNode> {
        vec![
            RouteNode::index(),
            RouteNode::page("robots.txt"),
            RouteNode::page("sitemap.xml"),
            RouteNode::splat(),
        ]
    }

    #[test]
    fn mount_path_uses_first_dashboard_segment() {
        assert_eq!(mount_path(&config("Shop", &["shop/orders", "catalog"])), "shop");
        assert_eq!(mount_path(&config("Media", &[])), "media");
    }

    #[test]
    fn composes_host_then_modules_then_fallbacks() {
        let blog = ModuleRouteSet::new(
            &config("Blog", &["blog"]),
            vec![RouteNode::index(), RouteNode::page("/posts/")],
            Vec::new(),
        );
        let table = compose(fallbacks(), host(), &[blog]).unwrap();

        let top: Vec<_> = table.root().children.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(top, ["auth", "dashboard", "blog", "", "robots.txt", "sitemap.xml", "*"]);
        assert_eq!(table.find("/blog/posts").map(|r| r.kind), Some(RouteKind::Static));
        assert!(table.includes_fallback("/sitemap.xml"));
    }

    #[test]
    fn module_without_subtree_contributes_no_layout() {
        let shop = ModuleRouteSet::new(&config("Shop", &["shop"]), Vec::new(), Vec::new());
        let table = compose(fallbacks(), host(), &[shop]).unwrap();
        assert!(table.find("/shop").is_none());
        assert_eq!(table.mounts()[0], Mount { module: "Shop".to_owned(), path: "shop".to_owned() });
    }

    #[test]
    fn override_replaces_fallback_in_place() {
        let blog = ModuleRouteSet::new(
            &config("Blog", &["blog"]),
            Vec::new(),
            vec![RouteNode::index().with_children(vec![RouteNode::page("featured")]), RouteNode::page("unknown")],
        );
        let table = compose(fallbacks(), host(), &[blog]).unwrap();

        assert!(!table.includes_fallback("/"));
        assert_eq!(
            table.fallbacks()[0],
            FallbackDecision::Overridden { path: String::new(), module: "Blog".to_owned() }
        );
        assert!(table.find("/featured").is_some());
        assert!(table.find("/unknown").is_none());
    }

    #[test]
    fn mount_shadows_equivalent_fallback() {
        let seo = ModuleRouteSet::new(
            &config("Seo", &["Sitemap.xml"]),
            vec![RouteNode::index()],
            Vec::new(),
        );
        let table = compose(fallbacks(), host(), &[seo]).unwrap();
        assert!(!table.includes_fallback("sitemap.xml"));
        assert!(table.includes_fallback("robots.txt"));
    }

    #[test]
    fn duplicate_mount_is_a_conflict_naming_both_modules() {
        let a = ModuleRouteSet::new(&config("Shop", &["shop"]), vec![RouteNode::index()], Vec::new());
        let b = ModuleRouteSet::new(&config("Market", &["shop/deals"]), vec![RouteNode::index()], Vec::new());

        let err = compose(fallbacks(), host(), &[a, b]).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(
            &err,
            KernelError::RouteConflict { path, first, second, .. }
                if path == "shop" && first == "Shop" && second == "Market"
        ));
    }

    #[test]
    fn mounting_over_host_route_is_a_conflict() {
        let auth = ModuleRouteSet::new(&config("Auth", &["auth/login"]), Vec::new(), Vec::new());
        let err = compose(fallbacks(), host(), &[auth]).unwrap_err();
        assert!(matches!(&err, KernelError::RouteConflict { first, .. } if first == "host"));
    }

    #[test]
    fn dashboard_only_module_does_not_shadow_fallback() {
        let seo = ModuleRouteSet::new(&config("Seo", &["sitemap.xml"]), Vec::new(), Vec::new());
        let table = compose(fallbacks(), host(), &[seo]).unwrap();

        assert!(table.includes_fallback("sitemap.xml"));
        assert!(table.find("/sitemap.xml").is_some());
    }

    #[test]
    fn overriding_another_modules_mount_is_a_conflict() {
        let crawler = ModuleRouteSet::new(&config("Crawler", &["robots.txt"]), vec![RouteNode::index()], Vec::new());
        let seo = ModuleRouteSet::new(&config("Seo", &["seo"]), Vec::new(), vec![RouteNode::page("robots.txt")]);

        let err = compose(fallbacks(), host(), &[crawler, seo]).unwrap_err();
        assert!(matches!(
            &err,
            KernelError::RouteConflict { path, first, second, .. }
                if path == "robots.txt" && first == "Crawler" && second == "Seo"
        ));
    }

    #[test]
    fn override_children_cannot_land_on_host_routes() {
        let shop = ModuleRouteSet::new(
            &config("Shop", &["shop"]),
            vec![RouteNode::index()],
            vec![RouteNode::index().with_children(vec![RouteNode::page("auth")])],
        );
        let err = compose(fallbacks(), host(), &[shop]).unwrap_err();
        assert!(matches!(
            &err,
            KernelError::RouteConflict { path, first, second, .. }
                if path == "auth" && first == "host" && second == "Shop"
        ));
    }

    #[test]
    fn override_children_cannot_land_on_other_mounts() {
        let blog = ModuleRouteSet::new(&config("Blog", &["blog"]), vec![RouteNode::index()], Vec::new());
        let shop = ModuleRouteSet::new(
            &config("Shop", &["shop"]),
            Vec::new(),
            vec![RouteNode::index().with_children(vec![RouteNode::layout("blog", vec![RouteNode::page("new")])])],
        );
        let err = compose(fallbacks(), host(), &[blog, shop]).unwrap_err();
        assert!(matches!(
            &err,
            KernelError::RouteConflict { first, second, .. } if first == "Blog" && second == "Shop"
        ));
    }

    #[test]
    fn override_children_under_their_own_path_are_kept() {
        let seo = ModuleRouteSet::new(
            &config("Seo", &["seo"]),
            Vec::new(),
            vec![RouteNode::page("sitemap.xml").with_children(vec![RouteNode::page("index")])],
        );
        let table = compose(fallbacks(), host(), &[seo]).unwrap();
        assert!(table.find("/sitemap.xml/index").is_some());
    }

    #[test]
    fn two_overrides_of_one_fallback_conflict() {
        let a = ModuleRouteSet::new(&config("Blog", &["blog"]), Vec::new(), vec![RouteNode::index()]);
        let b = ModuleRouteSet::new(&config("Shop", &["shop"]), Vec::new(), vec![RouteNode::index()]);
        let err = compose(fallbacks(), host(), &[a, b]).unwrap_err();
        assert!(matches!(&err, KernelError::RouteConflict { path, .. } if path == "/"));
    }
}
