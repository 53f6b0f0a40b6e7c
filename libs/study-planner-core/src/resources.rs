//! Study resources and the resolver seam used by the plan generator.

use serde::{Deserialize, Serialize};

/// A reference to study material. The planner never inspects its contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
}

impl Resource {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: None,
            pages: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// What a resource is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceUsage {
    Learn,
    Practice,
}

impl ResourceUsage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Learn => "learn",
            Self::Practice => "practice",
        }
    }
}

/// Looks up material for a topic.
pub trait ResourceResolver {
    fn resolve(&self, topic: &str, usage: ResourceUsage) -> Vec<Resource>;
}

impl<F> ResourceResolver for F
where
    F: Fn(&str, ResourceUsage) -> Vec<Resource>,
{
    fn resolve(&self, topic: &str, usage: ResourceUsage) -> Vec<Resource> {
        self(topic, usage)
    }
}

/// Fallback resolver for courses with no catalogued material.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderResolver;

impl ResourceResolver for PlaceholderResolver {
    fn resolve(&self, topic: &str, usage: ResourceUsage) -> Vec<Resource> {
        vec![Resource::new(format!("{} ({})", topic, usage.as_str())).with_url("#")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_names_topic_and_usage() {
        let resources = PlaceholderResolver.resolve("Photosynthesis", ResourceUsage::Practice);
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].title, "Photosynthesis (practice)");
        assert_eq!(resources[0].url.as_deref(), Some("#"));
    }

    #[test]
    fn closures_are_resolvers() {
        let resolver = |topic: &str, _usage: ResourceUsage| vec![Resource::new(topic.to_uppercase())];
        let resources = resolver.resolve("ions", ResourceUsage::Learn);
        assert_eq!(resources[0].title, "IONS");
    }
}
