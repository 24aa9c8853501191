//! Property-based tests for the minimization pipeline using proptest.
//!
//! Automata are drawn with up to eight states over up to three symbols, with roughly one in five
//! transitions left undefined, so unreachable states, partial transition functions and
//! mergeable states all occur regularly.
#![cfg(feature = "random")]

use dfa_minimizer::{
    minimization::minimize_json,
    prelude::*,
    random::{alphabet_of_size, shuffle_states},
};
use proptest::prelude::*;

const MAX_WORD_LENGTH: usize = 6;

fn description_strategy() -> impl Strategy<Value = Description> {
    (1usize..=8, 0usize..=3)
        .prop_flat_map(|(size, symbols)| {
            (
                Just(size),
                Just(symbols),
                prop::collection::vec(
                    prop::option::weighted(0.8, 0..size as i64),
                    size * symbols,
                ),
                prop::collection::vec(any::<bool>(), size),
                0..size as i64,
            )
        })
        .prop_map(|(size, symbols, targets, finals, start_state)| {
            let alphabet = alphabet_of_size(symbols);
            let transitions = targets
                .into_iter()
                .enumerate()
                .filter_map(|(cell, target)| {
                    target.map(|to| TransitionDescription {
                        from: (cell / symbols) as i64,
                        input: alphabet[cell % symbols].clone(),
                        to,
                    })
                })
                .collect();
            Description {
                num_states: size as i64,
                alphabet,
                transitions,
                start_state,
                final_states: (0..size as i64).filter(|&q| finals[q as usize]).collect(),
            }
        })
}

// Helper: all words (as symbol positions) up to the given length
fn words_up_to(symbols: usize, max_len: usize) -> Vec<Vec<usize>> {
    let mut words = vec![vec![]];
    let mut frontier = vec![vec![]];
    for _ in 0..max_len {
        frontier = frontier
            .iter()
            .flat_map(|w: &Vec<usize>| {
                (0..symbols).map(move |sym| {
                    let mut extended = w.clone();
                    extended.push(sym);
                    extended
                })
            })
            .collect();
        words.extend(frontier.iter().cloned());
    }
    words
}

// Helper: counts the classes of indistinguishable reachable states by filling the table of
// distinguishable pairs until it is stable, where a missing transition is its own marker
fn table_filling_class_count(dfa: &Dfa) -> usize {
    let reduced = dfa.restrict_to_reachable().into_dfa();
    let n = reduced.size();
    let state = |q: usize| q as StateIndex;

    let mut distinct = vec![vec![false; n]; n];
    for p in 0..n {
        for q in 0..n {
            distinct[p][q] = reduced.is_final(state(p)) != reduced.is_final(state(q));
        }
    }
    loop {
        let mut changed = false;
        for p in 0..n {
            for q in 0..n {
                if distinct[p][q] {
                    continue;
                }
                let separated = (0..reduced.alphabet().size()).any(|sym| {
                    match (
                        reduced.successor(state(p), sym),
                        reduced.successor(state(q), sym),
                    ) {
                        (None, None) => false,
                        (Some(p), Some(q)) => distinct[p as usize][q as usize],
                        _ => true,
                    }
                });
                if separated {
                    distinct[p][q] = true;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    (0..n).filter(|&p| (0..p).all(|q| distinct[p][q])).count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: every word up to a bounded length is accepted by the minimal automaton iff it
    /// is accepted by the original one, and the languages coincide exactly
    #[test]
    fn prop_language_is_preserved(description in description_strategy()) {
        let dfa = description.validate().unwrap();
        let minimal = dfa.minimize();

        for word in words_up_to(dfa.alphabet().size(), MAX_WORD_LENGTH) {
            prop_assert_eq!(
                dfa.accepts_positions(&word),
                minimal.accepts_positions(&word),
                "word {} is classified differently",
                dfa.alphabet().show_word(&word)
            );
        }
        prop_assert!(minimal.equivalent(&dfa));
        prop_assert!(dfa.restrict_to_reachable().dfa().equivalent(&dfa));
        prop_assert_eq!(minimize_description(&description).unwrap(), minimal.to_description());
    }

    /// Property: minimization never adds states
    #[test]
    fn prop_non_expansion(description in description_strategy()) {
        let dfa = description.validate().unwrap();
        let reduced = dfa.restrict_to_reachable();
        let minimal = dfa.minimize();

        prop_assert!(minimal.size() <= reduced.dfa().size());
        prop_assert!(reduced.dfa().size() <= dfa.size());
        prop_assert!(minimal.transition_count() <= reduced.dfa().transition_count());
    }

    /// Property: exactly the indistinguishable states are merged, so the result has as many
    /// states as pairwise table filling finds classes
    #[test]
    fn prop_result_is_coarsest(description in description_strategy()) {
        let dfa = description.validate().unwrap();
        prop_assert_eq!(dfa.minimize().size(), table_filling_class_count(&dfa));
    }

    /// Property: minimizing a minimal automaton changes nothing
    #[test]
    fn prop_idempotence(description in description_strategy()) {
        let minimal = minimize_description(&description).unwrap();
        prop_assert_eq!(&minimize_description(&minimal).unwrap(), &minimal);

        let dfa = minimal.validate().unwrap();
        prop_assert!(dfa.is_minimal());
        prop_assert_eq!(dfa.minimize(), dfa);
    }

    /// Property: the output depends neither on the run, nor on the order in which transitions
    /// are declared, nor on how the states are named
    #[test]
    fn prop_determinism(description in description_strategy(), seed in any::<u64>()) {
        let input = description.to_json();
        let output = minimize_json(&input).unwrap();
        prop_assert_eq!(&minimize_json(&input).unwrap(), &output);

        let mut rng = fastrand::Rng::with_seed(seed);
        let mut reordered = description.clone();
        rng.shuffle(&mut reordered.transitions);
        prop_assert_eq!(&minimize_json(&reordered.to_json()).unwrap(), &output);

        let renamed = shuffle_states(&mut rng, &description.validate().unwrap());
        prop_assert_eq!(&renamed.minimize().to_description().to_json(), &output);
    }

    /// Property: the start state is always 0 and the states are numbered in the order in which
    /// a breadth-first search from the start discovers them
    #[test]
    fn prop_canonical_numbering(description in description_strategy()) {
        let minimal = description.validate().unwrap().minimize();
        prop_assert_eq!(minimal.initial(), 0);

        let discovered: Vec<StateIndex> = minimal.reachable_state_indices().collect();
        let expected: Vec<StateIndex> = minimal.state_indices().collect();
        prop_assert_eq!(discovered, expected);
    }

    /// Property: invalid descriptions never produce output
    #[test]
    fn prop_duplicate_declarations_are_rejected(description in description_strategy()) {
        prop_assume!(!description.transitions.is_empty());
        let mut duplicated = description.clone();
        let mut copy = description.transitions[0].clone();
        copy.to = (copy.to + 1) % description.num_states;
        duplicated.transitions.push(copy);

        let is_duplicate_transition = matches!(
            minimize_description(&duplicated),
            Err(ValidationError::DuplicateTransition { .. })
        );
        prop_assert!(is_duplicate_transition);
    }
}
