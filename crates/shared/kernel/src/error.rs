use crate::schema::ValidationError;
use std::borrow::Cow;

/// Failures of the composition engine.
///
/// `DiscoveryLoad` and `Validation` exclude a single module and never stop the
/// host. `DuplicateRegistration` and `RouteConflict` abort start-up.
/// `ContributorRuntime` only costs the entries of one contributor for one request.
#[mosaic_derive::mosaic_error]
pub enum KernelError {
    /// A module could not be constructed or its configuration source could not be read.
    #[error("Module `{module}` failed to load{}: {message}", format_context(.context))]
    DiscoveryLoad {
        module: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// A module's declared configuration does not match the schema.
    #[error("Invalid module config{}: {source}", format_context(.context))]
    Validation { source: ValidationError, context: Option<Cow<'static, str>> },

    /// The same module name was registered twice into one registry.
    #[error("Module `{module}` is already registered in the {registry} registry{}", format_context(.context))]
    DuplicateRegistration {
        registry: Cow<'static, str>,
        module: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// Two parties claim the same route path.
    #[error("Route `{path}` is claimed by both `{first}` and `{second}`{}", format_context(.context))]
    RouteConflict {
        path: Cow<'static, str>,
        first: Cow<'static, str>,
        second: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// A sitemap/robots contributor failed, timed out or panicked during a request.
    #[error("Contributor `{module}` failed{}: {message}", format_context(.context))]
    ContributorRuntime {
        module: Cow<'static, str>,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: ::config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Internal kernel error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl KernelError {
    /// Whether the error must stop the host from starting.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::DuplicateRegistration { .. } | Self::RouteConflict { .. })
    }

    pub(crate) fn contributor(
        module: &str,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::ContributorRuntime {
            module: module.to_owned().into(),
            message: message.into(),
            context: None,
        }
    }
}
