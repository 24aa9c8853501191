//! Moore's partition refinement algorithm.
//!
//! Starting from the partition into accepting and rejecting states, every class is repeatedly
//! split according to the *signatures* of its states. The signature of a state lists, for every
//! symbol in the order of the alphabet, the class that its successor currently belongs to, or
//! `None` if the transition is undefined. Splits are applied immediately, so signatures computed
//! later in the same pass already see them. The refinement stops once a complete pass over all
//! classes does not split anything, at which point states with the same signature are exactly
//! the states that are in the same class.

use indexmap::IndexMap;
use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    automaton::{Dfa, StateIndex},
    math::{ClassId, Partition},
};

/// The signature of a state with respect to some partition.
pub type Signature = Vec<Option<ClassId>>;

/// Computes the signature of `q` with respect to `partition`.
pub fn signature(dfa: &Dfa, partition: &Partition, q: StateIndex) -> Signature {
    (0..dfa.alphabet().size())
        .map(|sym| dfa.successor(q, sym).and_then(|p| partition.class_of(p)))
        .collect()
}

/// Computes the coarsest partition of the states of `dfa` that separates accepting from
/// rejecting states and in which all states of a class have the same signature.
///
/// This is meant to run on an automaton whose states are all reachable, then the classes are
/// precisely the states of the minimal automaton.
pub fn moore_partition_refinement(dfa: &Dfa) -> Partition {
    let (accepting, rejecting): (Vec<_>, Vec<_>) =
        dfa.state_indices().partition(|&q| dfa.is_final(q));
    let mut partition = Partition::new([rejecting, accepting]);
    trace!("initial partition has {} classes", partition.size());

    let mut pass = 0;
    loop {
        pass += 1;
        let mut changed = false;

        // classes created during this pass are visited as well
        let mut class = 0;
        while class < partition.size() {
            if partition[class].len() > 1 {
                let mut groups: IndexMap<Signature, Vec<StateIndex>> = IndexMap::new();
                for &q in &partition[class] {
                    groups
                        .entry(signature(dfa, &partition, q))
                        .or_default()
                        .push(q);
                }

                if groups.len() > 1 {
                    changed = true;
                    trace!(
                        "splitting class {class} into {} parts in pass {pass}",
                        groups.len()
                    );
                    for members in groups.into_values().skip(1) {
                        partition.split_off(class, &members);
                    }
                }
            }
            class += 1;
        }

        debug!(
            "refinement pass {pass} ends with {} classes",
            partition.size()
        );
        if !changed {
            break;
        }
    }

    debug_assert!(partition.iter().all(|class| class
        .iter()
        .map(|&q| signature(dfa, &partition, q))
        .all_equal()));
    partition
}

#[cfg(test)]
mod tests {
    use super::{moore_partition_refinement, signature};
    use crate::{math::Partition, prelude::*};

    #[test_log::test]
    fn wiki_dfa() {
        let dfa = Dfa::builder()
            .with_alphabet(["a", "b"])
            .with_finals([2, 3, 4])
            .with_edges([
                (0, "a", 1),
                (0, "b", 2),
                (1, "a", 0),
                (1, "b", 3),
                (2, "a", 4),
                (2, "b", 5),
                (3, "a", 4),
                (3, "b", 5),
                (4, "a", 4),
                (4, "b", 5),
                (5, "a", 5),
                (5, "b", 5),
            ])
            .into_dfa(0);
        let partition = moore_partition_refinement(&dfa);
        assert_eq!(
            partition,
            Partition::new([vec![0, 1], vec![2, 3, 4], vec![5]])
        );
    }

    #[test_log::test]
    fn splits_propagate_backwards() {
        // a chain where only the last state is accepting, every state has to be separated and
        // each split only becomes visible after the split of its successor
        let dfa = Dfa::builder()
            .with_alphabet(["a"])
            .with_finals([5])
            .with_edges([(0, "a", 1), (1, "a", 2), (2, "a", 3), (3, "a", 4), (4, "a", 5)])
            .into_dfa(0);
        let partition = moore_partition_refinement(&dfa);
        assert_eq!(partition.size(), 6);
    }

    #[test_log::test]
    fn cycle_is_collapsed() {
        let dfa = Dfa::builder()
            .with_alphabet(["a"])
            .with_finals([0, 1, 2])
            .with_edges([(0, "a", 1), (1, "a", 2), (2, "a", 0)])
            .into_dfa(0);
        assert_eq!(
            moore_partition_refinement(&dfa),
            Partition::new([vec![0, 1, 2]])
        );
    }

    #[test]
    fn undefined_is_its_own_signature_entry() {
        let dfa = Dfa::builder()
            .with_alphabet(["a", "b"])
            .with_edges([(0, "a", 1), (1, "b", 1)])
            .into_dfa(0);
        let partition = Partition::new([vec![0, 1]]);
        assert_eq!(signature(&dfa, &partition, 0), vec![Some(0), None]);
        assert_eq!(signature(&dfa, &partition, 1), vec![None, Some(0)]);
        assert_eq!(moore_partition_refinement(&dfa).size(), 2);
    }

    #[test]
    fn result_is_stable() {
        let dfa = Dfa::builder()
            .with_alphabet(["a", "b"])
            .with_finals([3])
            .with_edges([
                (0, "a", 1),
                (0, "b", 2),
                (1, "a", 3),
                (1, "b", 0),
                (2, "a", 3),
                (2, "b", 0),
                (3, "a", 3),
            ])
            .into_dfa(0);
        let partition = moore_partition_refinement(&dfa);
        assert_eq!(
            partition,
            Partition::new([vec![0], vec![1, 2], vec![3]])
        );
        for class in &partition {
            let representative = *class.first().unwrap();
            for &q in class {
                assert_eq!(
                    signature(&dfa, &partition, q),
                    signature(&dfa, &partition, representative)
                );
            }
        }
    }
}
