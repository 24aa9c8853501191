use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    alphabet::Alphabet,
    automaton::{
        reachable::{self, Reduced},
        Dfa, StateIndex,
    },
    math::{Map, Set},
};

/// The largest transition table, counted in cells of one state and one symbol, that is
/// materialized as a [`Dfa`]. A table with more cells is reported as
/// [`ValidationError::MalformedInput`].
pub const MAX_TABLE_CELLS: usize = 1 << 26;

/// The serializable description of an automaton, which is what requests and responses consist
/// of. Numbers are kept as signed integers so that negative values can be reported precisely by
/// [`Description::validate`] instead of being rejected during deserialization.
///
/// ```
/// use dfa_minimizer::Description;
///
/// let description = Description::from_json(
///     r#"{"num_states": 2, "alphabet": ["a"], "transitions": [{"from": 0, "input": "a", "to": 1}],
///        "start_state": 0, "final_states": [1]}"#,
/// )
/// .unwrap();
/// let dfa = description.validate().unwrap();
/// assert!(dfa.accepts(["a"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    /// The number of states, the states are implicitly `0..num_states`.
    pub num_states: i64,
    /// The symbols of the alphabet in their declared order.
    pub alphabet: Vec<String>,
    /// The declared transitions.
    pub transitions: Vec<TransitionDescription>,
    /// The initial state.
    pub start_state: i64,
    /// The accepting states.
    pub final_states: Vec<i64>,
}

/// A single transition `from --input--> to` of a [`Description`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct TransitionDescription {
    pub from: i64,
    pub input: String,
    pub to: i64,
}

/// The role in which a state index is used, for reporting states that are out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum StateRole {
    Source,
    Target,
    Start,
    Final,
}

impl std::fmt::Display for StateRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                StateRole::Source => "source state",
                StateRole::Target => "target state",
                StateRole::Start => "start state",
                StateRole::Final => "final state",
            }
        )
    }
}

/// Abstracts the types of errors that can occur when an automaton description is parsed
/// and validated.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[allow(missing_docs)]
pub enum ValidationError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("number of states must not be negative, but is {0}")]
    NegativeStateCount(i64),
    #[error("automaton has no states, so it can not have a start state")]
    EmptyAutomaton,
    #[error("symbol `{0}` occurs more than once in the alphabet")]
    DuplicateSymbol(String),
    #[error("{role} {state} is out of range, states are 0..{num_states}")]
    OutOfRangeState {
        role: StateRole,
        state: i64,
        num_states: i64,
    },
    #[error("transition {from} --{symbol}--> {to} uses symbol `{symbol}` which is not in the alphabet")]
    UnknownSymbol { from: i64, symbol: String, to: i64 },
    #[error("transition from {from} on `{symbol}` is declared twice, with targets {first} and {second}")]
    DuplicateTransition {
        from: i64,
        symbol: String,
        first: i64,
        second: i64,
    },
}

impl Description {
    /// Parses a description from JSON. Every failure, be it a syntax error, a missing field or a
    /// field of the wrong type, is reported as [`ValidationError::MalformedInput`].
    pub fn from_json(input: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(input).map_err(|e| ValidationError::MalformedInput(e.to_string()))
    }

    /// Serializes `self` into compact JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("a description consists of plain data")
    }

    /// Serializes `self` into indented JSON.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).expect("a description consists of plain data")
    }

    fn check_state(&self, state: i64, role: StateRole) -> Result<StateIndex, ValidationError> {
        if (0..self.num_states).contains(&state) {
            Ok(state as StateIndex)
        } else {
            Err(ValidationError::OutOfRangeState {
                role,
                state,
                num_states: self.num_states,
            })
        }
    }

    /// Checks `self` and returns the automaton it describes with its transitions kept as
    /// declared, so that nothing proportional to `num_states` times the alphabet size is
    /// allocated. The checks are performed in a fixed order and the first violation is reported:
    /// 1. the number of states must be positive,
    /// 2. alphabet symbols must be non-empty and distinct,
    /// 3. every transition must connect existing states and use a symbol of the alphabet,
    /// 4. no two transitions may leave the same state on the same symbol, even if their
    ///    targets agree,
    /// 5. the start state must exist,
    /// 6. all final states must exist, where duplicates are ignored.
    ///
    /// The transition function does not need to be total.
    pub fn check(&self) -> Result<SparseDfa, ValidationError> {
        if self.num_states < 0 {
            return Err(ValidationError::NegativeStateCount(self.num_states));
        }
        if self.num_states == 0 {
            return Err(ValidationError::EmptyAutomaton);
        }
        let size = StateIndex::try_from(self.num_states)
            .ok()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| {
                ValidationError::MalformedInput(format!(
                    "{} states exceed the supported maximum of {}",
                    self.num_states,
                    StateIndex::MAX
                ))
            })?;

        if self.alphabet.iter().any(|sym| sym.is_empty()) {
            return Err(ValidationError::MalformedInput(
                "alphabet symbols must not be empty".to_string(),
            ));
        }
        let alphabet = Alphabet::try_from_symbols(self.alphabet.iter().cloned())
            .map_err(ValidationError::DuplicateSymbol)?;

        let mut resolved = Vec::with_capacity(self.transitions.len());
        for t in &self.transitions {
            let from = self.check_state(t.from, StateRole::Source)?;
            let to = self.check_state(t.to, StateRole::Target)?;
            let sym = alphabet
                .position(&t.input)
                .ok_or_else(|| ValidationError::UnknownSymbol {
                    from: t.from,
                    symbol: t.input.clone(),
                    to: t.to,
                })?;
            resolved.push((from, sym, to));
        }

        let mut declared: Map<(StateIndex, usize), StateIndex> = Map::default();
        declared.reserve(resolved.len());
        for (from, sym, to) in resolved {
            if let Some(&first) = declared.get(&(from, sym)) {
                return Err(ValidationError::DuplicateTransition {
                    from: from as i64,
                    symbol: alphabet.symbols()[sym].clone(),
                    first: first as i64,
                    second: to as i64,
                });
            }
            declared.insert((from, sym), to);
        }

        let initial = self.check_state(self.start_state, StateRole::Start)?;

        let mut finals = Set::default();
        for &q in &self.final_states {
            let q = self.check_state(q, StateRole::Final)?;
            trace!("marking {q} as accepting");
            finals.insert(q);
        }

        let mut edges: Map<StateIndex, Vec<(usize, StateIndex)>> = Map::default();
        for ((from, sym), to) in declared {
            edges.entry(from).or_default().push((sym, to));
        }
        for row in edges.values_mut() {
            row.sort_unstable();
        }

        debug!(
            "validated automaton with {size} states, {} symbols and {} transitions",
            alphabet.size(),
            self.transitions.len()
        );
        Ok(SparseDfa {
            alphabet,
            size,
            initial,
            finals,
            edges,
        })
    }

    /// Validates `self` as [`Description::check`] does and turns it into a [`Dfa`] with all of
    /// the described states, reachable or not. Descriptions whose transition table would have
    /// more than [`MAX_TABLE_CELLS`] cells are rejected with [`ValidationError::MalformedInput`],
    /// [`SparseDfa::restrict_to_reachable`] only materializes the reachable states instead.
    pub fn validate(&self) -> Result<Dfa, ValidationError> {
        self.check()?.to_dfa()
    }
}

/// A validated automaton that only stores the declared transitions.
///
/// It is what [`Description::check`] produces, before any transition table is allocated. A
/// description may name billions of states of which only a handful are reachable, so the dense
/// [`Dfa`] is built either for the reachable states alone or, bounded by [`MAX_TABLE_CELLS`], for
/// all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseDfa {
    alphabet: Alphabet,
    size: usize,
    initial: StateIndex,
    finals: Set<StateIndex>,
    edges: Map<StateIndex, Vec<(usize, StateIndex)>>,
}

impl SparseDfa {
    /// Returns the number of described states.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Gives a reference to the alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the initial state.
    pub fn initial(&self) -> StateIndex {
        self.initial
    }

    /// Returns true if and only if `q` is an accepting state.
    pub fn is_final(&self, q: StateIndex) -> bool {
        self.finals.contains(&q)
    }

    /// Returns the number of declared transitions.
    pub fn transition_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Iterates over the declared transitions leaving `q`, ordered by symbol position.
    pub fn edges_from(&self, q: StateIndex) -> impl Iterator<Item = (usize, StateIndex)> + '_ {
        self.edges.get(&q).into_iter().flatten().copied()
    }

    fn check_table(&self, states: usize) -> Result<(), ValidationError> {
        match states.checked_mul(self.alphabet.size().max(1)) {
            Some(cells) if cells <= MAX_TABLE_CELLS => Ok(()),
            _ => Err(ValidationError::MalformedInput(format!(
                "a transition table for {states} states over {} symbols exceeds the limit of \
                 {MAX_TABLE_CELLS} cells",
                self.alphabet.size()
            ))),
        }
    }

    /// Computes the restriction to the states reachable from the initial state, which are
    /// numbered in breadth-first discovery order as [`Dfa::restrict_to_reachable`] does. Only
    /// the reachable states are materialized, an error is returned if their transition table
    /// exceeds [`MAX_TABLE_CELLS`].
    pub fn restrict_to_reachable(&self) -> Result<Reduced, ValidationError> {
        let ids = reachable::discover(self.initial, |q| self.edges_from(q));
        trace!(
            "{} of {} described states are reachable from {}",
            ids.len(),
            self.size,
            self.initial
        );
        self.check_table(ids.len())?;
        Ok(Reduced::assemble(
            self.alphabet.clone(),
            ids,
            |q| self.is_final(q),
            |q| self.edges_from(q),
        ))
    }

    /// Materializes all described states as a [`Dfa`], which fails if the transition table
    /// exceeds [`MAX_TABLE_CELLS`].
    pub fn to_dfa(&self) -> Result<Dfa, ValidationError> {
        self.check_table(self.size)?;
        let symbols = self.alphabet.size();
        let mut table = vec![None; self.size * symbols];
        for (&from, row) in &self.edges {
            for &(sym, to) in row {
                table[from as usize * symbols + sym] = Some(to);
            }
        }
        let mut finals = vec![false; self.size];
        for &q in &self.finals {
            finals[q as usize] = true;
        }
        Ok(Dfa::from_parts(self.alphabet.clone(), self.initial, finals, table))
    }
}

impl TryFrom<&Description> for Dfa {
    type Error = ValidationError;

    fn try_from(value: &Description) -> Result<Self, Self::Error> {
        value.validate()
    }
}

impl From<&Dfa> for Description {
    fn from(value: &Dfa) -> Self {
        value.to_description()
    }
}
