use automata::dfa::{IterState, DFA};
use automata::export::StateExport;
use automata::nfa::Builder;

use std::collections::BTreeSet;

fn dfa_from(accepting: &[bool], edges: &[(usize, char, usize)]) -> DFA<char> {
    let mut dfa = DFA::new();
    for &is_final in accepting {
        dfa.add_state(BTreeSet::new(), is_final);
    }
    for &(start, symbol, end) in edges {
        dfa.add_transition(start, end, symbol).unwrap();
    }
    dfa
}

/// (a|b)*, built with the NFA builder and converted.
fn any_ab() -> DFA<char> {
    let mut b = Builder::new();
    let c1 = b.literal('a');
    let c2 = b.literal('b');
    let union = b.union(c1, c2);
    let star = b.kleene_star(union);
    b.finish(star).to_dfa()
}

#[test]
fn test_add_transition() {
    let mut dfa = dfa_from(&[false, true], &[]);

    assert_eq!(Some(()), dfa.add_transition(0, 1, 'a'));
    assert_eq!(None, dfa.add_transition(0, 2, 'a'));
    assert_eq!(None, dfa.add_transition(2, 0, 'a'));
    assert_eq!(None, dfa.add_transition(0, usize::MAX, 'a'));
    assert_eq!(None, dfa.add_transition(usize::MAX, 0, 'a'));

    // Later transitions on the same symbol replace earlier ones.
    dfa.add_transition(0, 0, 'a');
    assert_eq!(Some(&0), dfa.transitions_on(0).unwrap().get(&'a'));
}

#[test]
fn test_subset_construction() {
    let dfa = any_ab();

    assert_eq!(0, dfa.start_state);
    assert!(dfa.is_accepting_state(0));
    for state in &dfa.states {
        assert!(state.accepting);
        assert_eq!(2, state.transitions.len());
    }
    // Labels are dense.
    for (i, state) in dfa.states.iter().enumerate() {
        assert_eq!(i, state.label);
    }
}

#[test]
fn test_subset_construction_is_reproducible() {
    assert_eq!(any_ab(), any_ab());
}

#[test]
fn test_iter_on() {
    let dfa = dfa_from(&[false, true], &[(0, 'a', 1)]);

    let steps: Vec<_> = dfa.iter_on("ab".chars()).collect();
    assert_eq!(
        vec![
            IterState::Start(0, false),
            IterState::Normal('a', 1, true),
            IterState::Stuck(1),
        ],
        steps
    );
}

#[test]
fn test_simulate() {
    let dfa = dfa_from(&[false, false, true], &[(0, 'a', 1), (1, 'b', 2), (2, 'b', 2)]);

    let sim = dfa.simulate("abb".chars());
    assert!(sim.accepted);
    assert_eq!(vec![0, 1, 2, 2], sim.trace);

    let sim = dfa.simulate("a".chars());
    assert!(!sim.accepted);
    assert_eq!(vec![0, 1], sim.trace);

    // Stuck on the second symbol: the partial trace is kept.
    let sim = dfa.simulate("aa".chars());
    assert!(!sim.accepted);
    assert_eq!(vec![0, 1], sim.trace);

    let sim = dfa.simulate("".chars());
    assert!(!sim.accepted);
    assert_eq!(vec![0], sim.trace);
}

#[test]
fn test_is_match() {
    let dfa = any_ab();

    assert!(dfa.is_match("".chars()));
    assert!(dfa.is_match("abba".chars()));
    assert!(!dfa.is_match("abc".chars()));
}

#[test]
fn test_dead_states() {
    // 0 -a-> 1 -b-> 2 (accept), 0 -b-> 3, 3 -a-> 3.
    let dfa = dfa_from(
        &[false, false, true, false],
        &[(0, 'a', 1), (1, 'b', 2), (0, 'b', 3), (3, 'a', 3)],
    );

    // 0 has no direct edge to an accepting state, but is still alive.
    assert!(!dfa.is_dead_state(0));
    assert!(!dfa.is_dead_state(1));
    assert!(!dfa.is_dead_state(2));
    assert!(dfa.is_dead_state(3));

    let live = dfa.live_states();
    assert_eq!(vec![0, 1, 2], live.iter().copied().collect::<Vec<_>>());
    for state in 0..dfa.total_states() {
        assert_eq!(!live.contains(&state), dfa.is_dead_state(state));
    }
}

#[test]
fn test_state() {
    let dfa = dfa_from(&[false, true], &[(0, 'a', 1)]);

    let state = dfa.state(1).unwrap();
    assert_eq!(1, state.label);
    assert!(state.accepting);
    assert!(state.transitions.is_empty());
    assert_eq!(Some(&1), dfa.state(0).unwrap().transitions.get(&'a'));
    assert!(dfa.state(2).is_none());
}

#[test]
fn test_minimize_merges_equivalent_states() {
    let dfa = any_ab();
    let min = dfa.minimize();

    assert_eq!(1, min.total_states());
    assert!(min.states[0].accepting);
    assert_eq!(Some(&0), min.states[0].transitions.get(&'a'));
    assert_eq!(Some(&0), min.states[0].transitions.get(&'b'));

    // The merged state stands for every NFA state of the original.
    let all: BTreeSet<usize> = dfa
        .states
        .iter()
        .flat_map(|s| s.nfa_states.iter().copied())
        .collect();
    assert_eq!(all, min.states[0].nfa_states);
}

#[test]
fn test_export() {
    let dfa = dfa_from(&[false, true, false], &[(0, 'a', 1), (0, 'b', 2)]);
    let export = dfa.export();

    assert_eq!(0, export.start);
    assert_eq!(
        StateExport {
            id: 0,
            accepting: false,
            dead: false,
            transitions: vec![('a', 1), ('b', 2)],
        },
        export.states[0]
    );
    assert!(!export.states[1].dead);
    assert!(export.states[2].dead);
}

#[test]
fn test_display() {
    let dfa = dfa_from(&[false, true], &[(0, 'a', 1)]);
    assert_eq!("State 0:\n  --a--> 1\nState 1 (accept):\n", dfa.to_string());
}
