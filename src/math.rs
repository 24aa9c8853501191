use std::collections::BTreeSet;

use itertools::Itertools;

use crate::automaton::StateIndex;

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// Identifies one class of a [`Partition`].
pub type ClassId = usize;

/// A partition is a different view on a congruence relation, by grouping states into their
/// respective classes under the relation. Next to the classes themselves, it keeps a dense
/// lookup from every state to the id of its class.
///
/// The states covered by a partition are always `0..n` for some `n`, which is the case for
/// the automata produced by [`crate::Dfa::restrict_to_reachable`].
#[derive(Debug, Clone)]
pub struct Partition {
    classes: Vec<BTreeSet<StateIndex>>,
    class_of: Vec<ClassId>,
}

impl std::ops::Deref for Partition {
    type Target = Vec<BTreeSet<StateIndex>>;
    fn deref(&self) -> &Self::Target {
        &self.classes
    }
}

impl<'a> IntoIterator for &'a Partition {
    type Item = &'a BTreeSet<StateIndex>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<StateIndex>>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.iter()
    }
}

/// Two partitions are equal if they consist of the same classes, regardless of the
/// order in which the classes are stored.
impl PartialEq for Partition {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl Eq for Partition {}

impl Partition {
    /// Returns the size of the partition, i.e. the number of classes.
    pub fn size(&self) -> usize {
        self.classes.len()
    }

    /// Builds a partition from an iterator that yields iterators over the states of each class.
    /// Empty classes are skipped.
    ///
    /// # Panics
    /// If a state appears in more than one class, or if the given classes do not cover all
    /// states `0..n` where `n` is the total number of states given.
    pub fn new<X: IntoIterator<Item = StateIndex>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        let classes = iter
            .into_iter()
            .map(|it| it.into_iter().collect::<BTreeSet<_>>())
            .filter(|class| !class.is_empty())
            .collect_vec();

        let total = classes.iter().map(|c| c.len()).sum::<usize>();
        let mut class_of = vec![ClassId::MAX; total];
        for (id, class) in classes.iter().enumerate() {
            for &q in class {
                let slot = class_of
                    .get_mut(q as usize)
                    .expect("partition classes must cover a dense range of states");
                assert_eq!(*slot, ClassId::MAX, "state {q} appears in two classes");
                *slot = id;
            }
        }

        Self { classes, class_of }
    }

    /// Returns the id of the class containing `q`, or `None` if `q` is not covered.
    pub fn class_of(&self, q: StateIndex) -> Option<ClassId> {
        self.class_of.get(q as usize).copied()
    }

    /// Returns the dense lookup table from states to class ids.
    pub fn class_lookup(&self) -> &[ClassId] {
        &self.class_of
    }

    /// Moves the states in `moved` out of their current class into a freshly created class,
    /// whose id is returned. All states in `moved` must currently belong to the same class
    /// and that class must retain at least one state.
    pub(crate) fn split_off(&mut self, class: ClassId, moved: &[StateIndex]) -> ClassId {
        let id = self.classes.len();
        let mut fresh = BTreeSet::new();
        for &q in moved {
            debug_assert_eq!(self.class_of[q as usize], class);
            self.classes[class].remove(&q);
            self.class_of[q as usize] = id;
            fresh.insert(q);
        }
        debug_assert!(!self.classes[class].is_empty());
        self.classes.push(fresh);
        id
    }

    /// Returns an arbitrary but fixed representative of the class with the given `id`, which
    /// is its smallest member.
    pub fn representative(&self, id: ClassId) -> Option<StateIndex> {
        self.classes.get(id).and_then(|c| c.first().copied())
    }
}
