//! Catalog of discovered sensor providers.

use crate::config::ComponentFilter;
use crate::module::SensorModule;
use sensord_types::CapabilityKey;
use std::fmt;
use tracing::debug;

/// Query entry point of a provider.
///
/// Returning `None` means the provider has no module to offer, which counts as declining.
pub type QueryFn = Box<dyn Fn() -> Option<QueryReply> + Send + Sync>;

/// A provider's answer to being queried.
pub struct QueryReply {
    /// The implementation handle the provider offers.
    pub module: Box<dyn SensorModule>,

    /// Self-reported priority. Negative values decline.
    pub priority: i32,
}

impl QueryReply {
    pub fn new(module: impl SensorModule + 'static, priority: i32) -> Self {
        Self {
            module: Box::new(module),
            priority,
        }
    }
}

impl fmt::Debug for QueryReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryReply").field("priority", &self.priority).finish_non_exhaustive()
    }
}

/// A registered provider: its name, the capability it measures and its optional query.
pub struct ProviderDescriptor {
    name: String,
    measures: CapabilityKey,
    query: Option<QueryFn>,
}

impl ProviderDescriptor {
    /// Describe a provider without a query entry point. Selection never considers it.
    pub fn new(name: impl Into<String>, measures: impl Into<CapabilityKey>) -> Self {
        Self {
            name: name.into(),
            measures: measures.into(),
            query: None,
        }
    }

    /// Attach the query entry point.
    pub fn with_query<F>(mut self, query: F) -> Self
    where
        F: Fn() -> Option<QueryReply> + Send + Sync + 'static,
    {
        self.query = Some(Box::new(query));
        self
    }

    /// Provider name, used in diagnostics and component filters.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Capability this provider claims.
    pub fn measures(&self) -> &CapabilityKey {
        &self.measures
    }

    /// Whether the provider can be queried at all.
    pub fn has_query(&self) -> bool {
        self.query.is_some()
    }

    pub(crate) fn query_fn(&self) -> Option<&QueryFn> {
        self.query.as_ref()
    }
}

impl fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("name", &self.name)
            .field("measures", &self.measures)
            .field("has_query", &self.has_query())
            .finish()
    }
}

/// Ordered collection of provider descriptors.
///
/// Registration order is discovery order, and selection visits descriptors in
/// exactly this order.
#[derive(Debug, Default)]
pub struct ProviderCatalog {
    providers: Vec<ProviderDescriptor>,
}

impl ProviderCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider at the end of the discovery order.
    pub fn register(&mut self, descriptor: ProviderDescriptor) -> &mut Self {
        debug!(provider = %descriptor.name, capability = %descriptor.measures, "registered sensor provider");
        self.providers.push(descriptor);
        self
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with(mut self, descriptor: ProviderDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    /// Drop every provider the filter does not allow, keeping the order of the rest.
    pub fn apply_filter(&mut self, filter: &ComponentFilter) {
        if filter.is_empty() {
            return;
        }
        self.providers.retain(|descriptor| {
            let allowed = filter.allows(&descriptor.name);
            if !allowed {
                debug!(provider = %descriptor.name, "sensor provider filtered out by component selection");
            }
            allowed
        });
    }

    /// Get a provider by name.
    pub fn get(&self, name: &str) -> Option<&ProviderDescriptor> {
        self.providers.iter().find(|descriptor| descriptor.name == name)
    }

    /// Check if a provider is registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Provider names in discovery order.
    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|descriptor| descriptor.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl FromIterator<ProviderDescriptor> for ProviderCatalog {
    fn from_iter<I: IntoIterator<Item = ProviderDescriptor>>(iter: I) -> Self {
        let mut catalog = ProviderCatalog::new();
        for descriptor in iter {
            catalog.register(descriptor);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Idle;
    impl SensorModule for Idle {}

    fn catalog() -> ProviderCatalog {
        ProviderCatalog::new()
            .with(ProviderDescriptor::new("heartbeat", "heartbeat").with_query(|| Some(QueryReply::new(Idle, 10))))
            .with(ProviderDescriptor::new("resusage", "procresource").with_query(|| Some(QueryReply::new(Idle, 20))))
            .with(ProviderDescriptor::new("ft_tester", "ft"))
    }

    #[test]
    fn keeps_registration_order() {
        let catalog = catalog();
        assert_eq!(catalog.names(), vec!["heartbeat", "resusage", "ft_tester"]);
        assert_eq!(catalog.len(), 3);
        assert!(catalog.is_registered("resusage"));
        assert!(!catalog.get("ft_tester").unwrap().has_query());
        assert_eq!(catalog.get("resusage").unwrap().measures(), &CapabilityKey::new("procresource"));
    }

    #[test]
    fn include_filter_keeps_catalog_order() {
        let mut catalog = catalog();
        let filter = ComponentFilter {
            include: Some(vec!["ft_tester".into(), "heartbeat".into()]),
            exclude: Vec::new(),
        };
        catalog.apply_filter(&filter);
        assert_eq!(catalog.names(), vec!["heartbeat", "ft_tester"]);
    }

    #[test]
    fn exclude_filter_removes_named_providers() {
        let mut catalog = catalog();
        let filter = ComponentFilter {
            include: None,
            exclude: vec!["heartbeat".into()],
        };
        catalog.apply_filter(&filter);
        assert_eq!(catalog.names(), vec!["resusage", "ft_tester"]);
    }

    #[test]
    fn collects_from_iterator() {
        let catalog: ProviderCatalog = ["a", "b"].into_iter().map(|name| ProviderDescriptor::new(name, "x")).collect();
        assert_eq!(catalog.names(), vec!["a", "b"]);
        assert!(!catalog.is_empty());
    }
}
