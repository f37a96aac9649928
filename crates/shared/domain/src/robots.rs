use serde::{Deserialize, Serialize};

/// One `User-agent` stanza of `robots.txt`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RobotsGroup {
    pub user_agents: Vec<String>,
    pub allow: Vec<String>,
    pub disallow: Vec<String>,
    pub crawl_delay: Option<u32>,
}

impl RobotsGroup {
    /// A group addressed to every crawler (`User-agent: *`).
    pub fn any_agent() -> Self {
        Self { user_agents: vec!["*".to_owned()], ..Self::default() }
    }

    #[must_use]
    pub fn allow(mut self, path: impl Into<String>) -> Self {
        self.allow.push(path.into());
        self
    }

    #[must_use]
    pub fn disallow(mut self, path: impl Into<String>) -> Self {
        self.disallow.push(path.into());
        self
    }

    #[must_use]
    pub const fn crawl_delay(mut self, seconds: u32) -> Self {
        self.crawl_delay = Some(seconds);
        self
    }
}
