pub mod canonical;
pub mod partition_refinement;

use tracing::debug;

use crate::prelude::*;

impl Dfa {
    /// Returns the minimal automaton that accepts the same language as `self`.
    ///
    /// Two states are merged if they agree on acceptance and, for every symbol, either both have
    /// no transition or both move into merged states. A missing transition is never identified
    /// with a transition into a rejecting state, so the result has the same undefined transitions
    /// as `self` (up to merging) and is unique for that shape.
    ///
    /// First the automaton is restricted to its reachable states, then the Myhill–Nerode classes
    /// of the remaining states are computed with Moore's partition refinement algorithm and
    /// finally the classes are numbered canonically by breadth-first discovery from the class of
    /// the initial state. Consequently the initial state of the result is always `0` and
    /// minimizing an automaton that is already minimal yields an identical automaton.
    /// Undefined transitions stay undefined.
    pub fn minimize(&self) -> Dfa {
        let reduced = self.restrict_to_reachable();
        debug!(
            "restricted automaton with {} states to {} reachable states",
            self.size(),
            reduced.dfa().size()
        );

        let partition = partition_refinement::moore_partition_refinement(reduced.dfa());
        debug!("refinement produced {} classes", partition.size());

        let minimal = canonical::canonicalize(reduced.dfa(), &partition);
        debug!(
            "minimal automaton has {} states and {} transitions",
            minimal.size(),
            minimal.transition_count()
        );
        minimal
    }

    /// Returns true if and only if `self` is minimal, i.e. every state is reachable and
    /// [`Dfa::minimize`] does not merge any states.
    pub fn is_minimal(&self) -> bool {
        self.minimize().size() == self.size()
    }
}

/// Validates the given description and returns the description of the minimal automaton. Nothing
/// is computed for an invalid description.
///
/// Only the states reachable from the start state are ever materialized, so the number of
/// described states does not matter as long as [`SparseDfa::restrict_to_reachable`] succeeds.
pub fn minimize_description(description: &Description) -> Result<Description, ValidationError> {
    let reduced = description.check()?.restrict_to_reachable()?;
    Ok(reduced.dfa().minimize().to_description())
}

/// Parses and validates the automaton given as JSON and returns the minimal automaton as
/// compact JSON.
///
/// ```
/// use dfa_minimizer::minimization::minimize_json;
///
/// let output = minimize_json(
///     r#"{"num_states": 3, "alphabet": ["a"],
///         "transitions": [{"from": 0, "input": "a", "to": 1}, {"from": 1, "input": "a", "to": 1}],
///         "start_state": 0, "final_states": [1, 2]}"#,
/// )
/// .unwrap();
/// assert_eq!(
///     output,
///     r#"{"num_states":2,"alphabet":["a"],"transitions":[{"from":0,"input":"a","to":1},{"from":1,"input":"a","to":1}],"start_state":0,"final_states":[1]}"#
/// );
/// ```
pub fn minimize_json(input: &str) -> Result<String, ValidationError> {
    let description = Description::from_json(input)?;
    Ok(minimize_description(&description)?.to_json())
}
