mod builder;
pub use builder::DfaBuilder;

mod dfa;
pub use dfa::Dfa;

mod equivalence;

/// Breadth-first exploration of the states that are reachable from some origin, as well as the
/// restriction of an automaton to its reachable part.
pub mod reachable;
pub use reachable::Reduced;

/// Type that is used to index the states of a [`Dfa`]. States of an automaton with `n` states
/// are always indexed by `0..n`.
pub type StateIndex = u32;
