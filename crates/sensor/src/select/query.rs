//! Candidate query stage.

use super::candidate::Candidate;
use crate::catalog::ProviderDescriptor;

/// What a single descriptor contributed when queried.
#[derive(Debug)]
pub(crate) enum QueryOutcome {
    /// The descriptor has no query entry point.
    NoQuery,
    /// The query returned no module (`None`) or a negative priority.
    Declined { priority: Option<i32> },
    /// The provider wants to participate.
    Participating(Candidate),
}

/// Ask one provider whether it wants to participate.
///
/// A module handed back together with a negative priority is dropped here.
pub(crate) fn query_provider(descriptor: &ProviderDescriptor) -> QueryOutcome {
    let Some(query) = descriptor.query_fn() else {
        return QueryOutcome::NoQuery;
    };

    match query() {
        None => QueryOutcome::Declined { priority: None },
        Some(reply) if reply.priority < 0 => QueryOutcome::Declined {
            priority: Some(reply.priority),
        },
        Some(reply) => QueryOutcome::Participating(Candidate {
            provider: descriptor.name().to_string(),
            measures: descriptor.measures().clone(),
            priority: reply.priority,
            module: reply.module,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::QueryReply;
    use crate::module::SensorModule;

    struct Idle;
    impl SensorModule for Idle {}

    #[test]
    fn missing_query_is_not_considered() {
        let descriptor = ProviderDescriptor::new("ft_tester", "ft");
        assert!(matches!(query_provider(&descriptor), QueryOutcome::NoQuery));
    }

    #[test]
    fn null_module_declines() {
        let descriptor = ProviderDescriptor::new("file", "file").with_query(|| None);
        assert!(matches!(query_provider(&descriptor), QueryOutcome::Declined { priority: None }));
    }

    #[test]
    fn negative_priority_declines() {
        let descriptor = ProviderDescriptor::new("file", "file").with_query(|| Some(QueryReply::new(Idle, -1)));
        assert!(matches!(query_provider(&descriptor), QueryOutcome::Declined { priority: Some(-1) }));
    }

    #[test]
    fn zero_priority_participates() {
        let descriptor = ProviderDescriptor::new("heartbeat", "heartbeat").with_query(|| Some(QueryReply::new(Idle, 0)));
        match query_provider(&descriptor) {
            QueryOutcome::Participating(candidate) => {
                assert_eq!(candidate.provider, "heartbeat");
                assert_eq!(candidate.measures, "heartbeat");
                assert_eq!(candidate.priority, 0);
            }
            other => panic!("expected a candidate, got {other:?}"),
        }
    }
}
