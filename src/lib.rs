//! Minimization of deterministic finite automata.
//!
//! The crate takes the description of a (possibly partial) deterministic finite automaton, usually
//! given as a JSON [`Description`], and computes the unique minimal automaton recognizing the same
//! language. Minimization proceeds in three stages, each consuming the output of the previous one:
//! 1. Reachability: the states that can be reached from the initial state are collected with a
//!    breadth-first search, everything else is dropped (see [`automaton::reachable`]).
//! 2. Partition refinement: the reachable states are grouped into classes of states that can not be
//!    distinguished by any word, the Myhill–Nerode classes. This is done with Moore's algorithm,
//!    see [`minimization::partition_refinement`].
//! 3. Canonicalization: the classes are numbered by breadth-first discovery from the class of the
//!    initial state, such that the result does not depend on the order in which classes were
//!    produced (see [`minimization::canonical`]).
//!
//! Transitions that are not defined in the input remain undefined in the output, they are not
//! redirected into an implicit sink state. Reading a symbol for which no transition is defined
//! simply rejects.
//!
//! ```
//! use dfa_minimizer::prelude::*;
//!
//! let dfa = Dfa::builder()
//!     .with_alphabet(["a", "b"])
//!     .with_finals([1, 3])
//!     .with_edges([
//!         (0, "a", 1),
//!         (0, "b", 2),
//!         (1, "a", 1),
//!         (1, "b", 3),
//!         (2, "a", 3),
//!         (2, "b", 0),
//!         (3, "a", 3),
//!         (3, "b", 1),
//!     ])
//!     .into_dfa(0);
//! let minimal = dfa.minimize();
//! assert_eq!(minimal.size(), 2);
//! assert!(minimal.equivalent(&dfa));
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use dfa_minimizer::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{Alphabet, Symbol},
        automaton::{
            reachable::{MinimalRepresentative, MinimalRepresentatives, ReachableStateIndices},
            Dfa, DfaBuilder, Reduced, StateIndex,
        },
        description::{Description, SparseDfa, TransitionDescription, ValidationError},
        math,
        minimization::{minimize_description, minimize_json},
    };
}

/// Contains some mathematical helper types which are used throughout the crate, most
/// importantly the [`math::Partition`] of a set of states.
pub mod math;

/// Module that contains the definition of an ordered alphabet of symbols.
pub mod alphabet;
pub use alphabet::Alphabet;

/// Defines the in-memory representation of a deterministic finite automaton.
pub mod automaton;
pub use automaton::Dfa;

/// The serializable description of an automaton and its validation.
pub mod description;
pub use description::{Description, ValidationError};

/// Contains the minimization pipeline, i.e. partition refinement and canonical renumbering.
pub mod minimization;

/// Implements the generation of random automata.
#[cfg(feature = "random")]
pub mod random;
