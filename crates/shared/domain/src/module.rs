use serde::Serialize;
use strum::{AsRefStr, Display, EnumString, VariantNames};

/// Declared configuration of a service module, as accepted by the host schema.
///
/// Values of this type only come out of the kernel's schema validation, so the
/// type derives `Serialize` but not `Deserialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleConfig {
    pub module_name: String,
    pub dashboard_routes: Vec<DashboardEntry>,
    /// Names of other modules this one expects. Informational only.
    pub dependencies: Vec<String>,
}

/// A navigation entry rendered in the dashboard sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardEntry {
    pub title: String,
    /// Relative to the dashboard base, stored without a leading slash.
    pub url: String,
    pub icon_ref: IconRef,
    pub sub_items: Vec<SubEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubEntry {
    pub title: String,
    /// Relative to the parent entry url.
    pub url: String,
}

/// Icons the dashboard shell ships with. Anything else cannot be rendered.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Display,
    AsRefStr,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum IconRef {
    BarChart,
    Calendar,
    FileText,
    Folder,
    Home,
    Image,
    LayoutDashboard,
    Mail,
    MessageSquare,
    Newspaper,
    Package,
    Settings,
    ShoppingCart,
    Tag,
    Users,
}
