use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;
use std::iter::Peekable;

/// A deterministic finite automaton, or DFA.
///
/// There is a state labeled i for every i where 0 <= i < total_states(), stored at index i of
/// `states`. Transitions may be partial: a missing symbol means the input is rejected.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DFA<T: Clone + Ord> {
    /// A DFA has a single start state.
    pub start_state: usize,
    pub states: Vec<DState<T>>,
}

/// A single DFA state.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DState<T: Clone + Ord> {
    pub label: usize,
    /// The NFA states this state stands for. Only used to identify and inspect the state.
    pub nfa_states: BTreeSet<usize>,
    /// At most one destination per symbol.
    pub transitions: BTreeMap<T, usize>,
    pub accepting: bool,
}

/// The outcome of running a DFA over some input.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Simulation {
    pub accepted: bool,
    /// Every state visited, starting with the start state. Its length is one more than the
    /// number of symbols consumed before the input ended or the DFA got stuck.
    pub trace: Vec<usize>,
}

impl<T> DFA<T>
where
    T: Clone + Ord,
{
    /// Create a DFA with no states. The first state added becomes the start state.
    #[allow(clippy::new_without_default)]
    #[inline]
    pub fn new() -> Self {
        Self {
            start_state: 0,
            states: Vec::new(),
        }
    }

    #[inline]
    pub fn total_states(&self) -> usize {
        self.states.len()
    }

    /// Add a state. The label of the state is returned.
    #[inline]
    pub fn add_state(&mut self, nfa_states: BTreeSet<usize>, is_final: bool) -> usize {
        let label = self.states.len();
        self.states.push(DState {
            label,
            nfa_states,
            transitions: BTreeMap::new(),
            accepting: is_final,
        });
        label
    }

    /// Add a transition, replacing any earlier one on the same symbol. Returns None if one or
    /// more of the states does not exist.
    #[inline]
    pub fn add_transition(&mut self, start: usize, end: usize, label: T) -> Option<()> {
        if end >= self.states.len() {
            return None;
        }
        self.states.get_mut(start)?.transitions.insert(label, end);
        Some(())
    }

    #[inline]
    pub fn state(&self, label: usize) -> Option<&DState<T>> {
        self.states.get(label)
    }

    #[inline]
    pub fn transitions_on(&self, state: usize) -> Option<&BTreeMap<T, usize>> {
        self.states.get(state).map(|s| &s.transitions)
    }

    #[inline]
    pub fn is_accepting_state(&self, state: usize) -> bool {
        self.states.get(state).map_or(false, |s| s.accepting)
    }

    /// The set of symbols appearing on any transition.
    #[inline]
    pub fn alphabet(&self) -> BTreeSet<T> {
        self.states
            .iter()
            .flat_map(|s| s.transitions.keys().cloned())
            .collect()
    }

    /// The states from which some accepting state is reachable along zero or more transitions.
    pub fn live_states(&self) -> BTreeSet<usize> {
        let mut predecessors = vec![Vec::new(); self.states.len()];
        for state in &self.states {
            for &dest in state.transitions.values() {
                predecessors[dest].push(state.label);
            }
        }

        let mut live: BTreeSet<usize> = self
            .states
            .iter()
            .filter(|s| s.accepting)
            .map(|s| s.label)
            .collect();
        let mut worklist: VecDeque<usize> = live.iter().copied().collect();

        while let Some(state) = worklist.pop_front() {
            for &pred in &predecessors[state] {
                if live.insert(pred) {
                    worklist.push_back(pred);
                }
            }
        }

        live
    }

    /// A state is dead if no accepting state can be reached from it, however many transitions
    /// are taken.
    ///
    /// Every call walks the whole DFA through [DFA::live_states]. To classify many states, call
    /// [DFA::live_states] once instead.
    #[inline]
    pub fn is_dead_state(&self, state: usize) -> bool {
        !self.live_states().contains(&state)
    }
}

impl<T> DFA<T>
where
    T: Clone + Ord,
{
    #[inline]
    pub fn iter_on<I>(&self, input: I) -> Iter<'_, T, I::IntoIter>
    where
        I: IntoIterator<Item = T>,
    {
        Iter {
            dfa: self,

            input: input.into_iter().peekable(),
            last: None,
        }
    }

    /// Walk the DFA over the input, recording each visited state. Stops at the first symbol
    /// without a transition and rejects.
    pub fn simulate<I>(&self, input: I) -> Simulation
    where
        I: IntoIterator<Item = T>,
    {
        let mut trace = Vec::new();
        let mut accepted = false;

        for iter_state in self.iter_on(input) {
            match iter_state {
                IterState::Start(state, is_final) | IterState::Normal(_, state, is_final) => {
                    trace.push(state);
                    accepted = is_final;
                }
                IterState::Stuck(_) => accepted = false,
            }
        }

        Simulation { accepted, trace }
    }

    /// Determine if the given input is accepted by the DFA.
    #[inline]
    pub fn is_match<I>(&self, input: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        match self.iter_on(input).last() {
            Some(IterState::Start(_, is_final)) | Some(IterState::Normal(_, _, is_final)) => {
                is_final
            }
            Some(IterState::Stuck(_)) | None => false,
        }
    }
}

pub struct Iter<'a, T, I>
where
    T: Clone + Ord,
    I: Iterator<Item = T>,
{
    dfa: &'a DFA<T>,

    input: Peekable<I>,
    last: Option<(LastIterState, usize)>,
}

impl<'a, T, I> Iterator for Iter<'a, T, I>
where
    T: Clone + Ord,
    I: Iterator<Item = T>,
{
    type Item = IterState<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        iter_on_next(self.dfa, &mut self.input, &mut self.last)
    }
}

/// One step of a DFA walk.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum IterState<T> {
    /// The start state, and whether it is accepting.
    Start(usize, bool),
    /// A consumed symbol, the state moved to, and whether it is accepting.
    Normal(T, usize, bool),
    /// The state that has no transition on the next symbol. Always the last step.
    Stuck(usize),
}

enum LastIterState {
    Start,
    Normal,
    Stuck,
}

#[inline]
fn iter_on_next<T, I>(
    dfa: &DFA<T>,
    input: &mut Peekable<I>,
    last: &mut Option<(LastIterState, usize)>,
) -> Option<IterState<T>>
where
    T: Clone + Ord,
    I: Iterator<Item = T>,
{
    let current = match *last {
        // First iteration, return start.
        None => {
            *last = Some((LastIterState::Start, dfa.start_state));
            return Some(IterState::Start(
                dfa.start_state,
                dfa.is_accepting_state(dfa.start_state),
            ));
        }
        Some((LastIterState::Start, state)) | Some((LastIterState::Normal, state)) => state,
        // If we were last stuck, return None to indicate that last state was stuck.
        Some((LastIterState::Stuck, _)) => return None,
    };

    let next_state = {
        // No more input, so last item was the final.
        let peek_is = input.peek()?;
        dfa.transitions_on(current)
            .and_then(|transitions| transitions.get(peek_is))
            .copied()
    };

    match next_state {
        Some(next_state) => {
            // Consume input symbol.
            let is = input.next()?;

            *last = Some((LastIterState::Normal, next_state));
            Some(IterState::Normal(
                is,
                next_state,
                dfa.is_accepting_state(next_state),
            ))
        }
        // No transition on this symbol, so stuck.
        None => {
            *last = Some((LastIterState::Stuck, current));
            Some(IterState::Stuck(current))
        }
    }
}

impl<T> fmt::Display for DFA<T>
where
    T: Clone + Ord + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for state in &self.states {
            let accept = if state.accepting { " (accept)" } else { "" };
            writeln!(f, "State {}{}:", state.label, accept)?;
            for (symbol, dest) in &state.transitions {
                writeln!(f, "  --{}--> {}", symbol, dest)?;
            }
        }
        Ok(())
    }
}
