use crate::dfa::DFA;
use crate::nfa::{Transition, NFA};

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

impl<T> From<NFA<T>> for DFA<T>
where
    T: Clone + Ord,
{
    #[inline]
    fn from(nfa: NFA<T>) -> Self {
        (&nfa).into()
    }
}

impl<T> From<&NFA<T>> for DFA<T>
where
    T: Clone + Ord,
{
    // Create an equivalent DFA from an NFA using the subset construction described by Algorithm
    // 3.20. Each DFA state is identified by the epsilon-closed set of NFA states it represents;
    // labels are handed out densely in discovery order. Symbols are visited in ascending order so
    // the numbering is reproducible.
    fn from(nfa: &NFA<T>) -> Self {
        let mut dfa = DFA::new();
        let mut labels: HashMap<BTreeSet<usize>, usize> = HashMap::new();
        let mut unmarked_states = VecDeque::new();

        let initial_e_closure = nfa.epsilon_closure(nfa.start_state);
        let initial = dfa.add_state(
            initial_e_closure.clone(),
            initial_e_closure.contains(&nfa.accepting_state),
        );
        dfa.start_state = initial;
        labels.insert(initial_e_closure, initial);
        unmarked_states.push_back(initial);

        while let Some(label) = unmarked_states.pop_front() {
            // Union of non-epsilon destinations from the NFA states in this set state, grouped by
            // symbol.
            let mut moves: BTreeMap<&T, BTreeSet<usize>> = BTreeMap::new();
            for &nfa_state in &dfa.states[label].nfa_states {
                for (t, dests) in nfa.transitions_from(nfa_state) {
                    if let Transition::Some(symbol) = t {
                        moves
                            .entry(symbol)
                            .or_insert_with(BTreeSet::new)
                            .extend(dests.iter().copied());
                    }
                }
            }

            for (symbol, moved_set) in moves {
                let epsilon_closure = nfa.epsilon_closure_set(&moved_set);

                let target = match labels.get(&epsilon_closure) {
                    Some(&existing) => existing,
                    None => {
                        // If this set state contains the accepting NFA state, it is accepting in
                        // the DFA.
                        let is_final = epsilon_closure.contains(&nfa.accepting_state);
                        let new_label = dfa.add_state(epsilon_closure.clone(), is_final);
                        labels.insert(epsilon_closure, new_label);
                        unmarked_states.push_back(new_label);
                        new_label
                    }
                };

                dfa.add_transition(label, target, symbol.clone());
            }
        }

        dfa
    }
}

impl<T> NFA<T>
where
    T: Clone + Ord,
{
    /// Convert this NFA into an equivalent DFA. See the [From] implementation on [DFA].
    #[inline]
    pub fn to_dfa(&self) -> DFA<T> {
        self.into()
    }
}
