use serde::Serialize;

/// How a route node matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    /// Matches the parent path exactly.
    Index,
    /// Matches a fixed segment.
    Static,
    /// Matches the rest of the path (`*`).
    Splat,
    /// Groups children under a shared segment and shell.
    Layout,
}

/// A node of the route tree consumed by the routing layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteNode {
    pub path: String,
    pub kind: RouteKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

impl RouteNode {
    pub const fn index() -> Self {
        Self { path: String::new(), kind: RouteKind::Index, children: Vec::new() }
    }

    pub fn page(path: impl Into<String>) -> Self {
        Self { path: path.into(), kind: RouteKind::Static, children: Vec::new() }
    }

    pub fn splat() -> Self {
        Self { path: "*".to_owned(), kind: RouteKind::Splat, children: Vec::new() }
    }

    pub fn layout(path: impl Into<String>, children: Vec<Self>) -> Self {
        Self { path: path.into(), kind: RouteKind::Layout, children }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }
}
