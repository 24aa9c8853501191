use itertools::Itertools;

use crate::{
    alphabet::Symbol,
    description::{Description, TransitionDescription},
};

use super::{Dfa, StateIndex};

/// Helper struct for the construction of small automata, mostly used in tests and examples.
/// It collects transitions, accepting states and (optionally) an explicit alphabet and number of
/// states, and then produces a [`Description`] or a validated [`Dfa`].
///
/// # Example
///
/// We want to create a DFA with two states 0 and 1 over the alphabet `["a", "b"]`, where
/// reading `a` from state 0 leads to state 1 and state 1 loops on both symbols. No transition is
/// defined for `b` in state 0. State 0 is initial and state 1 is accepting.
/// ```
/// use dfa_minimizer::prelude::*;
///
/// let dfa = Dfa::builder()
///     .with_finals([1])
///     .with_edges([(0, "a", 1), (1, "a", 1), (1, "b", 1)])
///     .into_dfa(0);
/// assert_eq!(dfa.size(), 2);
/// assert!(dfa.accepts(["a", "b"]));
/// assert!(!dfa.accepts(["b"]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DfaBuilder {
    symbols: Option<Vec<Symbol>>,
    edges: Vec<(StateIndex, Symbol, StateIndex)>,
    finals: Vec<StateIndex>,
    size: Option<usize>,
}

impl DfaBuilder {
    /// Fixes the alphabet and its order. If this is not called, the alphabet consists of the
    /// symbols that appear on some edge, in the order in which they first appear.
    pub fn with_alphabet<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.symbols = Some(symbols.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a list of edges given as triples `(source, symbol, target)`.
    pub fn with_edges<I, S>(mut self, edges: I) -> Self
    where
        I: IntoIterator<Item = (StateIndex, S, StateIndex)>,
        S: Into<Symbol>,
    {
        self.edges
            .extend(edges.into_iter().map(|(p, a, q)| (p, a.into(), q)));
        self
    }

    /// Marks the given states as accepting.
    pub fn with_finals<I: IntoIterator<Item = StateIndex>>(mut self, finals: I) -> Self {
        self.finals.extend(finals);
        self
    }

    /// Sets the number of states explicitly. By default, the number of states is one more than
    /// the largest state that is mentioned anywhere.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Produces the [`Description`] of the automaton with the given initial state. The
    /// description is not validated.
    pub fn into_description(self, initial: StateIndex) -> Description {
        let num_states = self.size.unwrap_or_else(|| {
            self.edges
                .iter()
                .flat_map(|(p, _, q)| [*p, *q])
                .chain(self.finals.iter().copied())
                .chain(std::iter::once(initial))
                .max()
                .map_or(0, |q| q as usize + 1)
        });
        let alphabet = self.symbols.unwrap_or_else(|| {
            self.edges
                .iter()
                .map(|(_, a, _)| a.clone())
                .unique()
                .collect()
        });

        Description {
            num_states: num_states as i64,
            alphabet,
            transitions: self
                .edges
                .into_iter()
                .map(|(from, input, to)| TransitionDescription {
                    from: from as i64,
                    input,
                    to: to as i64,
                })
                .collect(),
            start_state: initial as i64,
            final_states: self.finals.into_iter().map(|q| q as i64).collect(),
        }
    }

    /// Validates the collected data and builds a [`Dfa`] with the given initial state.
    ///
    /// # Panics
    /// If the collected data does not describe a valid automaton, for example because two edges
    /// leave the same state on the same symbol.
    pub fn into_dfa(self, initial: StateIndex) -> Dfa {
        match self.into_description(initial).validate() {
            Ok(dfa) => dfa,
            Err(e) => panic!("builder does not describe a valid automaton: {e}"),
        }
    }
}
