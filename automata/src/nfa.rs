use crate::table::Table;

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

/// A non-deterministic finite automaton, or NFA, as produced by Thompson's construction.
///
/// States live in an arena owned by the NFA: there is a state labeled i for every i where
/// 0 <= i < total_states, and transitions refer to states only by label. Back-edges introduced by
/// the kleene star are therefore ordinary label references.
#[derive(Clone, Debug)]
pub struct NFA<T: Clone + Ord> {
    /// An NFA has a single start state.
    pub start_state: usize,
    /// A Thompson NFA has a single accepting state.
    pub accepting_state: usize,
    /// The number of total states in the NFA.
    pub total_states: usize,
    /// A lookup table for transitions between states. Destinations keep insertion order and may
    /// repeat a symbol's fan-out across several states.
    pub transition: Table<usize, Transition<T>, Vec<usize>>,
}

/// A transition between states in an NFA.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Transition<T> {
    /// A transition on some input symbol.
    Some(T),
    /// An epsilon transition allows the NFA to change its state spontaneously without consuming an
    /// input symbol.
    Epsilon,
}

/// A partially constructed automaton: the start and accepting states of a sub-automaton inside a
/// [Builder]'s arena. Fragments are consumed by the builder's operators.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Fragment {
    pub start: usize,
    pub accept: usize,
}

/// Builds one NFA with Thompson's construction. Every builder numbers its states from zero, so
/// separate compilations never share or skip labels.
#[derive(Clone, Debug)]
pub struct Builder<T: Clone + Ord> {
    total_states: usize,
    transition: Table<usize, Transition<T>, Vec<usize>>,
}

impl<T> Builder<T>
where
    T: Clone + Ord,
{
    /// Create a builder with an empty arena.
    #[allow(clippy::new_without_default)]
    #[inline]
    pub fn new() -> Self {
        Self {
            total_states: 0,
            transition: Table::new(),
        }
    }

    /// The number of states allocated so far.
    #[inline]
    pub fn total_states(&self) -> usize {
        self.total_states
    }

    /// Add a state to the arena. The label of the state is returned.
    #[inline]
    pub fn add_state(&mut self) -> usize {
        let label = self.total_states;
        self.total_states += 1;
        label
    }

    /// Add a transition. Returns None if one or more of the states does not exist.
    #[inline]
    pub fn add_transition(&mut self, start: usize, end: usize, label: Transition<T>) -> Option<()> {
        if start >= self.total_states || end >= self.total_states {
            None
        } else {
            self.transition.set_or(start, label, vec![end], |v| v.push(end));
            Some(())
        }
    }

    /// Add an epsilon transition. See [Builder::add_transition].
    #[inline]
    pub fn add_epsilon_transition(&mut self, start: usize, end: usize) -> Option<()> {
        self.add_transition(start, end, Transition::Epsilon)
    }

    /// A fragment accepting exactly the given symbol: start --symbol--> accept.
    #[inline]
    pub fn literal(&mut self, symbol: T) -> Fragment {
        let start = self.add_state();
        let accept = self.add_state();
        self.add_transition(start, accept, Transition::Some(symbol));

        Fragment { start, accept }
    }

    /// Construct the kleene star of a fragment. The new start state may skip straight to the new
    /// accepting state, and the operand's accepting state may loop back to its start.
    #[inline]
    pub fn kleene_star(&mut self, a: Fragment) -> Fragment {
        let start = self.add_state();
        let accept = self.add_state();

        self.add_epsilon_transition(start, a.start);
        self.add_epsilon_transition(start, accept);
        self.add_epsilon_transition(a.accept, a.start);
        self.add_epsilon_transition(a.accept, accept);

        Fragment { start, accept }
    }

    /// Construct the concatenation of two fragments. The accepting state of the former is linked
    /// to the start state of the latter and stops being a terminal state.
    #[inline]
    pub fn concatenation(&mut self, a: Fragment, b: Fragment) -> Fragment {
        self.add_epsilon_transition(a.accept, b.start);

        Fragment {
            start: a.start,
            accept: b.accept,
        }
    }

    /// Construct the union of two fragments. There are epsilon transitions from the new start
    /// state to each operand, and from each operand's accepting state to the new accepting state.
    #[inline]
    pub fn union(&mut self, a: Fragment, b: Fragment) -> Fragment {
        let start = self.add_state();
        let accept = self.add_state();

        self.add_epsilon_transition(start, a.start);
        self.add_epsilon_transition(start, b.start);
        self.add_epsilon_transition(a.accept, accept);
        self.add_epsilon_transition(b.accept, accept);

        Fragment { start, accept }
    }

    /// Consume the builder, keeping the given fragment as the whole automaton.
    #[inline]
    pub fn finish(self, fragment: Fragment) -> NFA<T> {
        NFA {
            start_state: fragment.start,
            accepting_state: fragment.accept,
            total_states: self.total_states,
            transition: self.transition,
        }
    }
}

impl<T> NFA<T>
where
    T: Clone + Ord,
{
    #[inline]
    pub fn is_accepting_state(&self, label: usize) -> bool {
        self.accepting_state == label
    }

    /// Returns the transitions and destinations from a specific state, ordered by symbol with
    /// epsilon last.
    #[inline]
    pub fn transitions_from(
        &self,
        state: usize,
    ) -> impl Iterator<Item = (&'_ Transition<T>, &'_ Vec<usize>)> + '_ {
        self.transition.get_row(&state)
    }

    /// The set of symbols appearing on any non-epsilon transition.
    #[inline]
    pub fn alphabet(&self) -> BTreeSet<T> {
        self.transition
            .into_iter()
            .filter_map(|(_, t, _)| match t {
                Transition::Some(symbol) => Some(symbol.clone()),
                Transition::Epsilon => None,
            })
            .collect()
    }

    /// Computes the function epsilon-closure for some given state in the NFA. Returns the set of
    /// all states accessible from the given state on epsilon transitions only.
    #[inline]
    pub fn epsilon_closure(&self, state: usize) -> BTreeSet<usize> {
        let mut set = BTreeSet::new();
        set.insert(state);
        self.epsilon_closure_set(&set)
    }

    /// Computes the smallest superset of the given states closed under epsilon transitions.
    /// Visited states are never revisited, so epsilon cycles terminate.
    pub fn epsilon_closure_set(&self, state_set: &BTreeSet<usize>) -> BTreeSet<usize> {
        let mut closure = state_set.clone();
        let mut worklist: VecDeque<usize> = state_set.iter().copied().collect();

        while let Some(state) = worklist.pop_front() {
            if let Some(dests) = self.transition.get(&state, &Transition::Epsilon) {
                for &dest in dests {
                    if closure.insert(dest) {
                        worklist.push_back(dest);
                    }
                }
            }
        }

        closure
    }

    /// The set of states reachable from the given states on exactly one transition on `input`.
    #[inline]
    pub fn move_set(&self, state_set: &BTreeSet<usize>, input: &T) -> BTreeSet<usize> {
        let label = Transition::Some(input.clone());
        state_set
            .iter()
            .filter_map(|state| self.transition.get(state, &label))
            .flat_map(|dests| dests.iter().copied())
            .collect()
    }

    /// Determines if the given input is accepted by the NFA by tracking the set of live states.
    pub fn is_match<I>(&self, input: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        let mut state_set = self.epsilon_closure(self.start_state);

        for is in input {
            let moved_set = self.move_set(&state_set, &is);
            if moved_set.is_empty() {
                return false;
            }
            state_set = self.epsilon_closure_set(&moved_set);
        }

        state_set.contains(&self.accepting_state)
    }

    /// Visit every state reachable from the start state, depth-first, following transitions in
    /// table order. Each state is yielded once.
    pub fn reachable_states(&self) -> Vec<usize> {
        let mut visited = BTreeSet::new();
        let mut order = Vec::new();
        let mut stack = vec![self.start_state];

        while let Some(state) = stack.pop() {
            if !visited.insert(state) {
                continue;
            }
            order.push(state);

            for (_, dests) in self.transitions_from(state) {
                stack.extend(dests.iter().rev().filter(|&&d| !visited.contains(&d)));
            }
        }

        order
    }
}

impl<T> fmt::Display for NFA<T>
where
    T: Clone + Ord + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (start, label, ends) in &self.transition {
            for end in ends {
                match label {
                    Transition::Some(symbol) => {
                        writeln!(f, "State {} --{}--> State {}", start, symbol, end)?
                    }
                    Transition::Epsilon => writeln!(f, "State {} --eps--> State {}", start, end)?,
                }
            }
        }
        Ok(())
    }
}
