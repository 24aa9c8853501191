use std::collections::VecDeque;

use bit_set::BitSet;
use tracing::trace;

use crate::{alphabet::Alphabet, math::Bijection};

use super::{Dfa, StateIndex};

/// Type alias for a minimal representative of a state which is its length-lexicographically minimal
/// access sequence (given as symbol positions) and its state index.
pub type MinimalRepresentative = (Vec<usize>, StateIndex);

/// Struct that can return the minimal representatives of a [`Dfa`]. A minimal representative
/// for a state `q` is the length-lexicographically minimal word with which `q` can be reached
/// from a given origin, where the order on symbols is the order of the alphabet.
#[derive(Debug, Clone)]
pub struct MinimalRepresentatives<'a> {
    dfa: &'a Dfa,
    seen: BitSet,
    queue: VecDeque<MinimalRepresentative>,
}

impl<'a> MinimalRepresentatives<'a> {
    /// Starts the exploration of `dfa` from the state `origin`.
    pub fn new(dfa: &'a Dfa, origin: StateIndex) -> Self {
        let mut seen = BitSet::with_capacity(dfa.size());
        seen.insert(origin as usize);
        let queue = [(vec![], origin)].into_iter().collect();
        Self { dfa, seen, queue }
    }
}

impl<'a> Iterator for MinimalRepresentatives<'a> {
    type Item = MinimalRepresentative;

    fn next(&mut self) -> Option<Self::Item> {
        let (access, q) = self.queue.pop_front()?;
        for (sym, p) in self.dfa.edges_from(q) {
            if self.seen.insert(p as usize) {
                let mut new_access = access.clone();
                new_access.push(sym);
                self.queue.push_back((new_access, p));
            }
        }
        Some((access, q))
    }
}

/// Allows iterating over the indices of all states of a [`Dfa`] that are reachable from some
/// origin. States are produced in breadth-first order, where the successors of a state are
/// explored in the order of the alphabet. The origin itself is always produced first.
#[derive(Debug, Clone)]
pub struct ReachableStateIndices<'a> {
    dfa: &'a Dfa,
    seen: BitSet,
    queue: VecDeque<StateIndex>,
}

impl<'a> ReachableStateIndices<'a> {
    /// Starts the exploration of `dfa` from the state `origin`.
    pub fn new(dfa: &'a Dfa, origin: StateIndex) -> Self {
        let mut seen = BitSet::with_capacity(dfa.size());
        seen.insert(origin as usize);
        Self {
            dfa,
            seen,
            queue: VecDeque::from([origin]),
        }
    }
}

impl<'a> Iterator for ReachableStateIndices<'a> {
    type Item = StateIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let q = self.queue.pop_front()?;
        for (_, p) in self.dfa.edges_from(q) {
            if self.seen.insert(p as usize) {
                self.queue.push_back(p);
            }
        }
        Some(q)
    }
}

/// The restriction of an automaton to the states that are reachable from its initial state.
///
/// States of the restricted automaton are renumbered densely in the order in which they are
/// discovered by [`ReachableStateIndices`], so the initial state always becomes `0`. The
/// correspondence between the original and the new state indices is kept.
#[derive(Debug, Clone)]
pub struct Reduced {
    dfa: Dfa,
    ids: Bijection<StateIndex, StateIndex>,
}

impl Reduced {
    /// Gives a reference to the restricted automaton.
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// Consumes `self` and returns the restricted automaton.
    pub fn into_dfa(self) -> Dfa {
        self.dfa
    }

    /// Returns the index that the original state `q` has in the restricted automaton, or `None`
    /// if `q` is not reachable.
    pub fn reduced_of(&self, q: StateIndex) -> Option<StateIndex> {
        self.ids.get_by_left(&q).copied()
    }

    /// Returns the index in the original automaton of the state `q` of the restricted automaton.
    pub fn original_of(&self, q: StateIndex) -> Option<StateIndex> {
        self.ids.get_by_right(&q).copied()
    }
}

impl Dfa {
    /// Returns an iterator over the minimal representatives of all states reachable from the
    /// initial state.
    pub fn minimal_representatives(&self) -> MinimalRepresentatives<'_> {
        self.minimal_representatives_from(self.initial())
    }

    /// Returns an iterator over the minimal representatives of all states reachable from `origin`.
    pub fn minimal_representatives_from(&self, origin: StateIndex) -> MinimalRepresentatives<'_> {
        MinimalRepresentatives::new(self, origin)
    }

    /// Iterates over the indices of all states that are reachable from the initial state.
    pub fn reachable_state_indices(&self) -> ReachableStateIndices<'_> {
        self.reachable_state_indices_from(self.initial())
    }

    /// Iterates over the indices of all states that are reachable from `origin`.
    pub fn reachable_state_indices_from(&self, origin: StateIndex) -> ReachableStateIndices<'_> {
        ReachableStateIndices::new(self, origin)
    }

    /// Tries to construct a shortest (and among those the length-lexicographically minimal)
    /// accepted word. Returns `None` if the accepted language is empty.
    pub fn give_word(&self) -> Option<Vec<String>> {
        self.minimal_representatives()
            .find(|(_, q)| self.is_final(*q))
            .map(|(word, _)| {
                word.into_iter()
                    .filter_map(|sym| self.alphabet().nth(sym).map(str::to_string))
                    .collect()
            })
    }

    /// Returns true if and only if the accepted language is empty.
    pub fn is_empty_language(&self) -> bool {
        self.give_word().is_none()
    }

    /// Computes the restriction of `self` to the states reachable from the initial state. The
    /// result has as many states as there are reachable states, its transitions are those between
    /// reachable states and its accepting states are the reachable accepting states. As the initial
    /// state is always reachable, the result has at least one state.
    pub fn restrict_to_reachable(&self) -> Reduced {
        let ids = discover(self.initial(), |q| self.edges_from(q));
        trace!(
            "{} of {} states are reachable from {}",
            ids.len(),
            self.size(),
            self.initial()
        );
        Reduced::assemble(
            self.alphabet().clone(),
            ids,
            |q| self.is_final(q),
            |q| self.edges_from(q),
        )
    }
}

/// Numbers the states reachable from `initial` in the order in which a breadth-first search
/// discovers them, where `edges_from` yields the outgoing transitions of a state ordered by
/// symbol position. The result maps original indices to the new ones and `initial` becomes `0`.
pub(crate) fn discover<E, I>(
    initial: StateIndex,
    edges_from: E,
) -> Bijection<StateIndex, StateIndex>
where
    E: Fn(StateIndex) -> I,
    I: IntoIterator<Item = (usize, StateIndex)>,
{
    let mut ids = Bijection::new();
    ids.insert(initial, 0);
    let mut queue = VecDeque::from([initial]);
    while let Some(q) = queue.pop_front() {
        for (_, p) in edges_from(q) {
            if !ids.contains_left(&p) {
                ids.insert(p, ids.len() as StateIndex);
                queue.push_back(p);
            }
        }
    }
    ids
}

impl Reduced {
    /// Builds the restricted automaton for the states numbered by `ids`, which must be closed
    /// under the transitions given by `edges_from`.
    pub(crate) fn assemble<E, I>(
        alphabet: Alphabet,
        ids: Bijection<StateIndex, StateIndex>,
        is_final: impl Fn(StateIndex) -> bool,
        edges_from: E,
    ) -> Self
    where
        E: Fn(StateIndex) -> I,
        I: IntoIterator<Item = (usize, StateIndex)>,
    {
        let symbols = alphabet.size();
        let mut table = vec![None; ids.len() * symbols];
        let mut finals = vec![false; ids.len()];
        for (&old, &new) in ids.iter() {
            finals[new as usize] = is_final(old);
            for (sym, p) in edges_from(old) {
                table[new as usize * symbols + sym] = ids.get_by_left(&p).copied();
            }
        }

        Reduced {
            dfa: Dfa::from_parts(alphabet, 0, finals, table),
            ids,
        }
    }
}
