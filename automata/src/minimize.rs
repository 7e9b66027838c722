use crate::dfa::DFA;

use std::collections::{BTreeSet, VecDeque};

use im::OrdSet;

/// A set of DFA states considered equivalent while refining. Blocks are shared between the
/// partition and every pending splitter that refers to them.
type Block = OrdSet<usize>;

impl<T> DFA<T>
where
    T: Clone + Ord,
{
    /// Produce the smallest DFA recognizing the same language, by partition refinement.
    ///
    /// States of the result correspond to the final blocks of the partition, labeled in order of
    /// each block's lowest original label; the block holding the original start state is
    /// therefore always labeled 0. Each new state keeps the union of its members' NFA states.
    pub fn minimize(&self) -> DFA<T> {
        let partition = refine(self);

        let mut block_of = vec![0; self.total_states()];
        for (label, block) in partition.iter().enumerate() {
            for &state in block.iter() {
                block_of[state] = label;
            }
        }

        // Blocks are never empty; any member stands for the whole block once refinement is done.
        let representatives: Vec<usize> = partition
            .iter()
            .filter_map(|block| block.get_min().copied())
            .collect();

        let mut minimized = DFA::new();
        for (block, &rep) in partition.iter().zip(&representatives) {
            let nfa_states: BTreeSet<usize> = block
                .iter()
                .flat_map(|&state| self.states[state].nfa_states.iter().copied())
                .collect();
            minimized.add_state(nfa_states, self.states[rep].accepting);
        }

        for (label, &rep) in representatives.iter().enumerate() {
            for (symbol, &dest) in &self.states[rep].transitions {
                minimized.add_transition(label, block_of[dest], symbol.clone());
            }
        }

        minimized.start_state = block_of[self.start_state];
        minimized
    }
}

/// Accepting and non-accepting states, omitting an empty side.
fn initial_partition<T>(dfa: &DFA<T>) -> Vec<Block>
where
    T: Clone + Ord,
{
    let (accepting, rejecting): (Block, Block) = dfa
        .states
        .iter()
        .map(|s| s.label)
        .partition(|&label| dfa.states[label].accepting);

    vec![accepting, rejecting]
        .into_iter()
        .filter(|block| !block.is_empty())
        .collect()
}

/// Split blocks until every block agrees, for every symbol, on which block each member's
/// transition lands in. Returns the blocks sorted by lowest member.
///
/// Splitters are processed first-in first-out. Every block ever created is queued once per
/// symbol, and a splitter is applied to every block of the current partition, so the loop only
/// stops at the fixed point.
fn refine<T>(dfa: &DFA<T>) -> Vec<Block>
where
    T: Clone + Ord,
{
    let alphabet: Vec<T> = dfa.alphabet().into_iter().collect();
    let mut partition = initial_partition(dfa);

    let mut splitters: VecDeque<(Block, T)> = VecDeque::new();
    for block in &partition {
        for symbol in &alphabet {
            splitters.push_back((block.clone(), symbol.clone()));
        }
    }

    while let Some((splitter, symbol)) = splitters.pop_front() {
        let mut refined = Vec::with_capacity(partition.len());

        for block in partition {
            // A state without a transition on the symbol does not land in the splitter.
            let (inside, outside): (Block, Block) = block.iter().copied().partition(|state| {
                dfa.states[*state]
                    .transitions
                    .get(&symbol)
                    .map_or(false, |dest| splitter.contains(dest))
            });

            if inside.is_empty() || outside.is_empty() {
                refined.push(block);
                continue;
            }

            for symbol in &alphabet {
                splitters.push_back((inside.clone(), symbol.clone()));
                splitters.push_back((outside.clone(), symbol.clone()));
            }
            refined.push(inside);
            refined.push(outside);
        }

        partition = refined;
    }

    partition.sort_by_key(|block| block.get_min().copied());
    partition
}
