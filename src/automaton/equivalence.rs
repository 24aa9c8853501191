use std::collections::VecDeque;

use itertools::Itertools;

use crate::math::Set;

use super::{Dfa, StateIndex};

/// A state of the product of two automata. `None` stands for the implicit rejecting sink that
/// is entered whenever an undefined transition is taken.
type ProductIndex = (Option<StateIndex>, Option<StateIndex>);

impl Dfa {
    /// Checks whether `self` and `other` accept the same language.
    pub fn equivalent(&self, other: &Dfa) -> bool {
        self.separate(other).is_none()
    }

    /// Attempts to separate `self` from `other` by finding a shortest word that is accepted by
    /// exactly one of them, i.e. a word in the symmetric difference of the two languages.
    ///
    /// The search runs over the product of both automata, where symbols are matched by name.
    /// Symbols of `self` are explored first (in the order of its alphabet), followed by the
    /// symbols that only `other` knows. Reading a symbol that an automaton does not know, or for
    /// which it has no transition, leads that automaton into a rejecting sink.
    pub fn separate(&self, other: &Dfa) -> Option<Vec<String>> {
        let symbols = self
            .alphabet()
            .universe()
            .chain(other.alphabet().universe())
            .unique()
            .map(|sym| {
                (
                    sym,
                    self.alphabet().position(sym),
                    other.alphabet().position(sym),
                )
            })
            .collect_vec();

        let accepting = |(l, r): ProductIndex| {
            l.is_some_and(|q| self.is_final(q)) != r.is_some_and(|q| other.is_final(q))
        };

        let origin = (Some(self.initial()), Some(other.initial()));
        let mut seen = Set::from_iter([origin]);
        let mut queue: VecDeque<(Vec<&str>, ProductIndex)> = VecDeque::from([(vec![], origin)]);

        while let Some((word, (l, r))) = queue.pop_front() {
            if accepting((l, r)) {
                return Some(word.into_iter().map(str::to_string).collect());
            }
            for &(sym, in_self, in_other) in &symbols {
                let successor = (
                    l.zip(in_self).and_then(|(q, a)| self.successor(q, a)),
                    r.zip(in_other).and_then(|(q, a)| other.successor(q, a)),
                );
                // both sides are in the sink, nothing can be accepted from here
                if successor == (None, None) {
                    continue;
                }
                if seen.insert(successor) {
                    let mut extended = word.clone();
                    extended.push(sym);
                    queue.push_back((extended, successor));
                }
            }
        }
        None
    }
}
