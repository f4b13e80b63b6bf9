//! Priority ordering stage.

use super::candidate::Candidate;

/// Sort candidates by descending priority.
///
/// `sort_by` is stable, so candidates with equal priority keep their
/// working-set order.
pub(crate) fn by_descending_priority(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.priority.cmp(&a.priority));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::SensorModule;
    use sensord_types::CapabilityKey;

    struct Idle;
    impl SensorModule for Idle {}

    fn candidates(entries: &[(&str, i32)]) -> Vec<Candidate> {
        entries.iter()
            .map(|(name, priority)| Candidate {
                provider: name.to_string(),
                measures: CapabilityKey::new(*name),
                priority: *priority,
                module: Box::new(Idle),
            })
            .collect()
    }

    #[test]
    fn orders_descending_and_stable_on_ties() {
        let ordered = by_descending_priority(candidates(&[("a", 1), ("b", 5), ("c", 3), ("d", 5), ("e", 1), ("f", 0)]));
        let names: Vec<_> = ordered.iter().map(|c| c.provider.as_str()).collect();
        assert_eq!(names, vec!["b", "d", "c", "a", "e", "f"]);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(by_descending_priority(Vec::new()).is_empty());
    }
}
