use itertools::Itertools;
use owo_colors::OwoColorize;

use crate::{
    alphabet::Alphabet,
    description::{Description, TransitionDescription},
};

use super::{DfaBuilder, StateIndex};

/// A deterministic finite automaton (DFA) whose transition function may be partial.
///
/// States are indexed densely by `0..size`. The transition function is stored in a row-major
/// table with one row per state and one column per alphabet symbol (in declared order), a cell
/// is `None` if the transition is undefined. Reading a symbol for which no transition is defined
/// makes the automaton reject, but minimization never introduces a sink state to complete the
/// transition function.
///
/// Values of this type are always valid, they are obtained either by validating a
/// [`Description`] or as the result of some operation on another valid [`Dfa`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    alphabet: Alphabet,
    initial: StateIndex,
    finals: Vec<bool>,
    table: Vec<Option<StateIndex>>,
}

impl Dfa {
    /// Assembles a [`Dfa`] from its raw parts. The caller is responsible for `table` having
    /// exactly `finals.len() * alphabet.size()` entries, all of which point to existing states.
    pub(crate) fn from_parts(
        alphabet: Alphabet,
        initial: StateIndex,
        finals: Vec<bool>,
        table: Vec<Option<StateIndex>>,
    ) -> Self {
        debug_assert!(!finals.is_empty(), "an automaton has at least one state");
        debug_assert!((initial as usize) < finals.len());
        debug_assert_eq!(table.len(), finals.len() * alphabet.size());
        debug_assert!(table.iter().flatten().all(|&q| (q as usize) < finals.len()));
        Self {
            alphabet,
            initial,
            finals,
            table,
        }
    }

    /// Returns a [`DfaBuilder`], which makes it convenient to create small automata by hand.
    pub fn builder() -> DfaBuilder {
        DfaBuilder::default()
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.finals.len()
    }

    /// Gives a reference to the alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the initial state.
    pub fn initial(&self) -> StateIndex {
        self.initial
    }

    /// Iterates over all state indices in ascending order.
    pub fn state_indices(&self) -> impl Iterator<Item = StateIndex> {
        0..self.finals.len() as StateIndex
    }

    /// Returns true if and only if `q` is an accepting state. States that do not exist are
    /// not accepting.
    pub fn is_final(&self, q: StateIndex) -> bool {
        self.finals.get(q as usize).copied().unwrap_or(false)
    }

    /// Iterates over the accepting states in ascending order.
    pub fn final_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.state_indices().filter(|&q| self.is_final(q))
    }

    /// Returns the successor of `q` on the symbol at position `symbol` of the alphabet, or
    /// `None` if that transition is undefined.
    pub fn successor(&self, q: StateIndex, symbol: usize) -> Option<StateIndex> {
        if symbol >= self.alphabet.size() {
            return None;
        }
        self.table
            .get(q as usize * self.alphabet.size() + symbol)
            .copied()
            .flatten()
    }

    /// Iterates over the defined outgoing transitions of `q` as pairs of symbol position and
    /// target state, ordered by symbol position.
    pub fn edges_from(&self, q: StateIndex) -> impl Iterator<Item = (usize, StateIndex)> + '_ {
        (0..self.alphabet.size()).filter_map(move |sym| self.successor(q, sym).map(|p| (sym, p)))
    }

    /// Iterates over all defined transitions as triples `(source, symbol, target)`, ordered
    /// by source and then by symbol position.
    pub fn transitions(&self) -> impl Iterator<Item = (StateIndex, &str, StateIndex)> + '_ {
        self.state_indices().flat_map(move |q| {
            self.edges_from(q).map(move |(sym, p)| {
                let symbol = self
                    .alphabet
                    .nth(sym)
                    .expect("symbol positions come from the alphabet");
                (q, symbol, p)
            })
        })
    }

    /// Returns the number of defined transitions.
    pub fn transition_count(&self) -> usize {
        self.table.iter().flatten().count()
    }

    /// Runs the word given as symbol positions from the state `from`, returning the reached
    /// state. If an undefined transition is encountered, `None` is returned.
    pub fn run_from(&self, from: StateIndex, word: &[usize]) -> Option<StateIndex> {
        word.iter().try_fold(from, |q, &sym| self.successor(q, sym))
    }

    /// Decides whether the word given as symbol positions is accepted.
    pub fn accepts_positions(&self, word: &[usize]) -> bool {
        self.run_from(self.initial, word)
            .is_some_and(|q| self.is_final(q))
    }

    /// Decides whether `word` is accepted. The word is rejected if it contains a symbol that is
    /// not part of the alphabet, or if reading it requires an undefined transition.
    pub fn accepts<'a, W>(&self, word: W) -> bool
    where
        W: IntoIterator<Item = &'a str>,
    {
        self.alphabet
            .positions_of(word)
            .is_some_and(|w| self.accepts_positions(&w))
    }

    /// Turns `self` into its serializable [`Description`]. Transitions are listed ordered by
    /// source state and symbol position, accepting states in ascending order.
    pub fn to_description(&self) -> Description {
        Description {
            num_states: self.size() as i64,
            alphabet: self.alphabet.symbols().to_vec(),
            transitions: self
                .transitions()
                .map(|(from, input, to)| TransitionDescription {
                    from: from as i64,
                    input: input.to_string(),
                    to: to as i64,
                })
                .collect(),
            start_state: self.initial as i64,
            final_states: self.final_states().map(|q| q as i64).collect(),
        }
    }

    /// Returns a string representation of the transition table. Each row corresponds to a state,
    /// where the initial state is prefixed with `→` and accepting states are suffixed with `*`.
    /// Undefined transitions are displayed as `-`. If `highlight` is set, accepting states are
    /// additionally colored.
    pub fn build_transition_table(&self, highlight: bool) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string())
                .chain(self.alphabet.universe().map(|s| s.to_string())),
        );
        for q in self.state_indices() {
            let mut label = format!(
                "{}{q}{}",
                if q == self.initial { "→" } else { "" },
                if self.is_final(q) { "*" } else { "" }
            );
            if highlight && self.is_final(q) {
                label = label.green().bold().to_string();
            }
            let row = std::iter::once(label).chain((0..self.alphabet.size()).map(|sym| {
                self.successor(q, sym)
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "-".to_string())
            }));
            builder.push_record(row.collect_vec());
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl std::fmt::Display for Dfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.build_transition_table(false))
    }
}
