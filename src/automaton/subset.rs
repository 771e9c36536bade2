use std::collections::VecDeque;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::{math::OrderedSet, prelude::*};

/// A set of states of some automaton, used as a single state of the automaton obtained through
/// the subset construction. The states are kept sorted, so two sets with the same elements
/// are equal, hash identically and can serve as map keys.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StateSet<Q: State>(OrderedSet<Q>);

impl<Q: State> StateSet<Q> {
    /// Creates the set containing only `state`.
    pub fn singleton(state: Q) -> Self {
        Self(OrderedSet::from([state]))
    }

    /// Iterates over the contained states in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Q> + '_ {
        self.0.iter()
    }

    /// Returns true if `state` is an element.
    pub fn contains(&self, state: &Q) -> bool {
        self.0.contains(state)
    }

    /// Returns the number of contained states.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<Q: State> FromIterator<Q> for StateSet<Q> {
    fn from_iter<T: IntoIterator<Item = Q>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<Q: State> Show for StateSet<Q> {
    fn show(&self) -> String {
        format!("{{{}}}", self.0.iter().map(|q| q.show()).join(", "))
    }
}

impl<Q: State> FiniteAutomaton<Q> {
    /// Turns `self` into an equivalent deterministic automaton through the subset construction.
    /// The states of the result are sets of states of `self`, starting from `{start}`; only
    /// those sets that are actually reachable are constructed. A set is accepting if it contains
    /// an accepting state. If no state of a set has a transition on some symbol, the resulting
    /// automaton has no transition either, so there is no explicit sink state.
    ///
    /// # Example
    /// ```
    /// use chomsky::prelude::*;
    ///
    /// let nfa = FiniteAutomaton::builder()
    ///     .with_states([0, 1])
    ///     .with_alphabet(['a'])
    ///     .with_transitions([(0, 'a', 0), (0, 'a', 1)])
    ///     .with_start(0)
    ///     .with_accepting([1])
    ///     .build()
    ///     .unwrap();
    /// let dfa = nfa.convert_ndfa_to_dfa();
    /// assert!(dfa.is_deterministic());
    /// assert_eq!(dfa.size(), 2);
    /// assert!(dfa.accepts("aaa"));
    /// ```
    pub fn convert_ndfa_to_dfa(&self) -> Dfa<StateSet<Q>> {
        let initial = StateSet::singleton(self.start().clone());
        let mut states = OrderedSet::from([initial.clone()]);
        let mut queue = VecDeque::from([initial.clone()]);
        let mut transitions = vec![];

        while let Some(current) = queue.pop_front() {
            for symbol in self.alphabet() {
                let target: StateSet<Q> = current
                    .iter()
                    .filter_map(|q| self.successors(q, symbol))
                    .flatten()
                    .cloned()
                    .collect();
                if target.is_empty() {
                    continue;
                }

                trace!(
                    "subset transition {} --{symbol}--> {}",
                    current.show(),
                    target.show()
                );
                if states.insert(target.clone()) {
                    queue.push_back(target.clone());
                }
                transitions.push((current.clone(), symbol.clone(), target));
            }
        }

        let accepting: OrderedSet<_> = states
            .iter()
            .filter(|set| set.iter().any(|q| self.is_accepting(q)))
            .cloned()
            .collect();
        debug!(
            "subset construction turned {} states into {} states, {} of which are accepting",
            self.size(),
            states.len(),
            accepting.len()
        );

        Dfa::assemble(FiniteAutomaton::assemble(
            states,
            self.alphabet().clone(),
            transitions,
            initial,
            accepting,
        ))
    }
}
