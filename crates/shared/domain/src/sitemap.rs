use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{AsRefStr, Display};

/// One `<url>` element of a sitemap, produced per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapUrlEntry {
    /// Absolute URL, or a fragment the aggregator resolves against the request origin.
    pub loc: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: Option<ChangeFrequency>,
    /// Expected in `[0, 1]`.
    pub priority: Option<f32>,
}

impl SitemapUrlEntry {
    pub fn new(loc: impl Into<String>, last_modified: DateTime<Utc>) -> Self {
        Self { loc: loc.into(), last_modified, change_frequency: None, priority: None }
    }

    #[must_use]
    pub const fn change_frequency(mut self, frequency: ChangeFrequency) -> Self {
        self.change_frequency = Some(frequency);
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}
