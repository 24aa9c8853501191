//! Canonical numbering of the classes of a partition.
//!
//! The order in which partition refinement produces classes carries no meaning. To obtain an
//! output that only depends on the accepted language, the classes are numbered in the order in
//! which a breadth-first search starting in the class of the initial state discovers them, where
//! successors are explored in the order of the alphabet.

use std::collections::VecDeque;

use tracing::trace;

use crate::{
    automaton::{Dfa, StateIndex},
    math::{Bijection, ClassId, Partition},
};

/// Assigns the ids `0..n` to the classes of `partition` that are reachable from the class of the
/// initial state of `dfa`. The class of the initial state receives id `0`, all other classes are
/// numbered in order of their discovery.
///
/// `partition` needs to be a congruence, i.e. all states of a class must have successors in the
/// same class, which is guaranteed for the result of
/// [`super::partition_refinement::moore_partition_refinement`].
pub fn canonical_numbering(dfa: &Dfa, partition: &Partition) -> Bijection<ClassId, StateIndex> {
    let mut ids = Bijection::new();
    let Some(initial) = partition.class_of(dfa.initial()) else {
        return ids;
    };
    ids.insert(initial, 0);

    let mut queue = VecDeque::from([initial]);
    while let Some(class) = queue.pop_front() {
        let Some(representative) = partition.representative(class) else {
            continue;
        };
        for (_, p) in dfa.edges_from(representative) {
            let Some(target) = partition.class_of(p) else {
                continue;
            };
            if !ids.contains_left(&target) {
                let id = ids.len() as StateIndex;
                trace!("class {target} is discovered as {id}");
                ids.insert(target, id);
                queue.push_back(target);
            }
        }
    }
    ids
}

/// Builds the quotient of `dfa` with respect to `partition`, whose states are numbered by
/// [`canonical_numbering`]. A state of the quotient is accepting if its class contains an
/// accepting state and it has a transition on some symbol if the states of its class do.
pub fn canonicalize(dfa: &Dfa, partition: &Partition) -> Dfa {
    let ids = canonical_numbering(dfa, partition);
    let symbols = dfa.alphabet().size();

    let mut finals = Vec::with_capacity(ids.len());
    let mut table = Vec::with_capacity(ids.len() * symbols);
    for id in 0..ids.len() as StateIndex {
        let representative = ids
            .get_by_right(&id)
            .and_then(|&class| partition.representative(class))
            .expect("every numbered class is non-empty");
        finals.push(dfa.is_final(representative));
        table.extend((0..symbols).map(|sym| {
            dfa.successor(representative, sym)
                .and_then(|p| partition.class_of(p))
                .and_then(|class| ids.get_by_left(&class).copied())
        }));
    }

    Dfa::from_parts(dfa.alphabet().clone(), 0, finals, table)
}
