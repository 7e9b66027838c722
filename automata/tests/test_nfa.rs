use automata::nfa::{Builder, Fragment, Transition};
use automata::NFA;

use std::collections::BTreeSet;

fn set(states: &[usize]) -> BTreeSet<usize> {
    states.iter().copied().collect()
}

/// a*, built by hand: literal states 0 and 1, star states 2 and 3.
fn kleene_a() -> NFA<char> {
    let mut b = Builder::new();
    let a = b.literal('a');
    let star = b.kleene_star(a);
    b.finish(star)
}

#[test]
fn test_new() {
    let b: Builder<char> = Builder::new();
    assert_eq!(0, b.total_states());
}

#[test]
fn test_add_state() {
    let mut b: Builder<char> = Builder::new();
    assert_eq!(0, b.add_state());
    assert_eq!(1, b.add_state());
    assert_eq!(2, b.total_states());
}

#[test]
fn test_add_transition_unknown_state() {
    let mut b: Builder<char> = Builder::new();
    let s = b.add_state();
    assert_eq!(None, b.add_transition(s, 1, Transition::Some('a')));
    assert_eq!(None, b.add_epsilon_transition(3, s));
    assert_eq!(Some(()), b.add_epsilon_transition(s, s));

    assert_eq!(None, b.add_epsilon_transition(usize::MAX, s));
    assert_eq!(None, b.add_epsilon_transition(s, usize::MAX));
}

#[test]
fn test_literal() {
    let mut b = Builder::new();
    let f = b.literal('a');
    assert_eq!(Fragment { start: 0, accept: 1 }, f);

    let nfa = b.finish(f);
    assert_eq!(2, nfa.total_states);
    assert_eq!(1, nfa.transition.into_iter().count());

    let (start, tran, ends) = nfa.transition.into_iter().next().unwrap();
    assert_eq!(0, *start);
    assert_eq!(Transition::Some('a'), *tran);
    assert_eq!(&vec![1], ends);
}

#[test]
fn test_union() {
    let mut b = Builder::new();
    let c1 = b.literal('a');
    let c2 = b.literal('b');
    let union = b.union(c1, c2);
    let nfa = b.finish(union);

    assert_eq!(6, nfa.total_states);
    assert_eq!(4, nfa.start_state);
    assert_eq!(5, nfa.accepting_state);
    assert_eq!(
        Some(&vec![0, 2]),
        nfa.transition.get(&4, &Transition::Epsilon)
    );
}

#[test]
fn test_concatenation() {
    let mut b = Builder::new();
    let c1 = b.literal('a');
    let c2 = b.literal('b');
    let concat = b.concatenation(c1, c2);
    let nfa = b.finish(concat);

    assert_eq!(4, nfa.total_states);
    assert_eq!(c1.start, nfa.start_state);
    assert_eq!(c2.accept, nfa.accepting_state);
    assert_eq!(
        Some(&vec![c2.start]),
        nfa.transition.get(&c1.accept, &Transition::Epsilon)
    );
}

#[test]
fn test_kleene_star() {
    let nfa = kleene_a();

    assert_eq!(4, nfa.total_states);
    assert_eq!(2, nfa.start_state);
    assert_eq!(3, nfa.accepting_state);
    // Skip and repeat edges.
    assert_eq!(Some(&vec![0, 3]), nfa.transition.get(&2, &Transition::Epsilon));
    assert_eq!(Some(&vec![0, 3]), nfa.transition.get(&1, &Transition::Epsilon));
}

#[test]
fn test_builders_are_independent() {
    let first = kleene_a();
    let second = kleene_a();

    assert_eq!(first.start_state, second.start_state);
    assert_eq!(first.total_states, second.total_states);
}

#[test]
fn test_epsilon_closure() {
    let nfa = kleene_a();

    assert_eq!(set(&[0, 2, 3]), nfa.epsilon_closure(2));
    // The repeat edge forms a cycle through state 0.
    assert_eq!(set(&[0, 1, 3]), nfa.epsilon_closure(1));
    assert_eq!(set(&[3]), nfa.epsilon_closure(3));
}

#[test]
fn test_epsilon_closure_contains_set() {
    let nfa = kleene_a();
    for states in &[set(&[]), set(&[0]), set(&[1, 3]), set(&[0, 1, 2, 3])] {
        assert!(nfa.epsilon_closure_set(states).is_superset(states));
    }
}

#[test]
fn test_move_set() {
    let nfa = kleene_a();
    assert_eq!(set(&[1]), nfa.move_set(&set(&[0, 2, 3]), &'a'));
    assert!(nfa.move_set(&set(&[0, 2, 3]), &'b').is_empty());
}

#[test]
fn test_is_match() {
    let nfa = kleene_a();

    assert!(nfa.is_match("".chars()));
    assert!(nfa.is_match("aaa".chars()));
    assert!(!nfa.is_match("ab".chars()));
}

#[test]
fn test_alphabet() {
    let mut b = Builder::new();
    let c1 = b.literal('b');
    let c2 = b.literal('a');
    let union = b.union(c1, c2);
    let nfa = b.finish(union);

    assert_eq!(vec!['a', 'b'], nfa.alphabet().into_iter().collect::<Vec<_>>());
}

#[test]
fn test_export() {
    let export = kleene_a().export();

    assert_eq!(2, export.start);
    assert_eq!(3, export.accept);
    assert_eq!(vec![2, 0, 1, 3], export.states);
    assert_eq!(5, export.transitions.len());
    assert_eq!(
        1,
        export
            .transitions
            .iter()
            .filter(|e| e.symbol == Some('a'))
            .count()
    );
}

#[test]
fn test_display() {
    let shown = kleene_a().to_string();

    assert!(shown.contains("State 0 --a--> State 1\n"));
    assert!(shown.contains("State 2 --eps--> State 3\n"));
}
