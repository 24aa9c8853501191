use fastrand::Rng;
use tracing::debug;

use crate::{
    alphabet::{Alphabet, Symbol},
    automaton::{Dfa, StateIndex},
    description::{Description, TransitionDescription},
};

/// Creates the symbols of an alphabet of the given size. The first 26 symbols are the letters
/// `a` to `z`, further symbols are named `s26`, `s27` and so on.
pub fn alphabet_of_size(size: usize) -> Vec<Symbol> {
    (0..size)
        .map(|i| match u8::try_from(i) {
            Ok(i) if i < 26 => ((b'a' + i) as char).to_string(),
            _ => format!("s{i}"),
        })
        .collect()
}

/// Generates the [`Description`] of a random, possibly partial automaton with `size` states over
/// `symbols` symbols, using the given random number generator. For every state and symbol, a
/// transition to a uniformly drawn target is declared with probability `density`, otherwise the
/// transition stays undefined. Every state is accepting with probability one half and the initial
/// state is `0`. Depending on the drawn transitions, some states may be unreachable.
///
/// Transitions are declared in a random order.
///
/// # Panics
/// If `size` is zero.
pub fn generate_random_description_with(
    rng: &mut Rng,
    symbols: usize,
    size: usize,
    density: f64,
) -> Description {
    assert!(size > 0, "an automaton needs at least one state");
    let alphabet = alphabet_of_size(symbols);

    let mut transitions = Vec::new();
    for from in 0..size {
        for input in &alphabet {
            if rng.f64() < density {
                transitions.push(TransitionDescription {
                    from: from as i64,
                    input: input.clone(),
                    to: rng.usize(..size) as i64,
                });
            }
        }
    }
    rng.shuffle(&mut transitions);

    let final_states = (0..size as i64).filter(|_| rng.bool()).collect();
    debug!(
        "generated random automaton with {size} states and {} transitions",
        transitions.len()
    );

    Description {
        num_states: size as i64,
        alphabet,
        transitions,
        start_state: 0,
        final_states,
    }
}

/// Works as [`generate_random_description_with`], but returns a validated [`Dfa`].
pub fn generate_random_dfa_with(rng: &mut Rng, symbols: usize, size: usize, density: f64) -> Dfa {
    generate_random_description_with(rng, symbols, size, density)
        .validate()
        .expect("generated descriptions are valid")
}

/// Works as [`generate_random_dfa_with`], drawing from a freshly seeded generator.
pub fn generate_random_dfa(symbols: usize, size: usize, density: f64) -> Dfa {
    generate_random_dfa_with(&mut Rng::new(), symbols, size, density)
}

/// Generate a random word over the universe of the `alphabet`, given as symbol positions.
/// The length of the word is drawn uniformly from the range `min_len..=max_len`.
pub fn generate_random_word(
    rng: &mut Rng,
    alphabet: &Alphabet,
    min_len: usize,
    max_len: usize,
) -> Vec<usize> {
    if alphabet.is_empty() {
        return vec![];
    }
    let length = rng.usize(min_len..=max_len);
    (0..length).map(|_| rng.usize(..alphabet.size())).collect()
}

/// Randomly permutes the states of `dfa`, including the initial state. The result accepts the
/// same language and is isomorphic to `dfa`.
pub fn shuffle_states(rng: &mut Rng, dfa: &Dfa) -> Dfa {
    let mut permutation: Vec<StateIndex> = dfa.state_indices().collect();
    rng.shuffle(&mut permutation);

    let mut description = dfa.to_description();
    let rename = |q: i64| permutation[q as usize] as i64;
    for t in &mut description.transitions {
        t.from = rename(t.from);
        t.to = rename(t.to);
    }
    rng.shuffle(&mut description.transitions);
    description.start_state = rename(description.start_state);
    description.final_states = description.final_states.into_iter().map(rename).collect();
    description
        .validate()
        .expect("renaming states preserves validity")
}
