//! Format-agnostic views of automata, for printing, serialization or rendering by callers.
//!
//! With the `serde` feature enabled the views implement `serde::Serialize`.

use crate::dfa::DFA;
use crate::nfa::{Transition, NFA};

#[cfg(feature = "serde")]
use serde::Serialize;

/// An NFA edge. A `symbol` of `None` is an epsilon transition.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EdgeExport<T> {
    pub from: usize,
    pub to: usize,
    pub symbol: Option<T>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct NFAExport<T> {
    pub start: usize,
    pub accept: usize,
    /// States in depth-first order from the start state.
    pub states: Vec<usize>,
    pub transitions: Vec<EdgeExport<T>>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct StateExport<T> {
    pub id: usize,
    pub accepting: bool,
    /// No accepting state is reachable from this one.
    pub dead: bool,
    pub transitions: Vec<(T, usize)>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DFAExport<T> {
    pub start: usize,
    pub states: Vec<StateExport<T>>,
}

impl<T> NFA<T>
where
    T: Clone + Ord,
{
    pub fn export(&self) -> NFAExport<T> {
        let states = self.reachable_states();
        let transitions = states
            .iter()
            .flat_map(|&from| {
                self.transitions_from(from).flat_map(move |(t, dests)| {
                    dests.iter().map(move |&to| EdgeExport {
                        from,
                        to,
                        symbol: match t {
                            Transition::Some(symbol) => Some(symbol.clone()),
                            Transition::Epsilon => None,
                        },
                    })
                })
            })
            .collect();

        NFAExport {
            start: self.start_state,
            accept: self.accepting_state,
            states,
            transitions,
        }
    }
}

impl<T> DFA<T>
where
    T: Clone + Ord,
{
    pub fn export(&self) -> DFAExport<T> {
        let live = self.live_states();
        let states = self
            .states
            .iter()
            .map(|state| StateExport {
                id: state.label,
                accepting: state.accepting,
                dead: !live.contains(&state.label),
                transitions: state
                    .transitions
                    .iter()
                    .map(|(symbol, &dest)| (symbol.clone(), dest))
                    .collect(),
            })
            .collect();

        DFAExport {
            start: self.start_state,
            states,
        }
    }
}
