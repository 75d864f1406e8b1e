use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::io;
use std::path::Path;

use bit_set::BitSet;

use super::{write_dot, Label, Nfa};

//  ____  _____ _
// |  _ \|  ___/ \
// | | | | |_ / _ \
// | |_| |  _/ ___ \
// |____/|_|/_/   \_\
//

/// Deterministic automaton obtained by subset construction.
///
/// The transition function is partial: a missing `(state, symbol)` entry
/// stands for an implicit dead state, which is absorbing and not accepting.
/// It is never materialized.
#[derive(Clone, Debug)]
pub struct Dfa {
    nb_states: usize,
    start: usize,
    finals: BitSet,
    alphabet: Vec<char>,
    transitions: HashMap<(usize, char), usize>,
}

impl Dfa {
    /// Determinize `nfa`.
    ///
    /// Each state of the output stands for an epsilon-closed set of NFA
    /// states. Sets are identified by value, so each of them is discovered
    /// once and the construction terminates. Note that the output can have up
    /// to `2^n` states for an input with `n` states.
    pub fn from_nfa(nfa: &Nfa) -> Dfa {
        let alphabet: Vec<char> = nfa.get_alphabet().iter().copied().collect();

        let mut ids: HashMap<BitSet, usize> = HashMap::new();
        let mut unseen: VecDeque<BitSet> = VecDeque::new();
        let mut finals = BitSet::new();
        let mut transitions = HashMap::new();

        let mut initial = BitSet::with_capacity(nfa.get_nb_states());
        initial.insert(nfa.get_initial());
        let start_set = epsilon_closure(nfa, &initial);
        ids.insert(start_set.clone(), 0);
        unseen.push_back(start_set);

        while let Some(subset) = unseen.pop_front() {
            let id = ids[&subset];
            tracing::trace!("dfa state {} = {:?}", id, subset);

            if subset.contains(nfa.get_final()) {
                finals.insert(id);
            }

            for &symbol in &alphabet {
                let moved = nfa.reachable_from_set(&subset, Label::Symbol(symbol));
                let next = epsilon_closure(nfa, &moved);

                // Leads to the dead state
                if next.is_empty() {
                    continue;
                }

                let next_id = match ids.get(&next) {
                    Some(&next_id) => next_id,
                    None => {
                        let next_id = ids.len();
                        ids.insert(next.clone(), next_id);
                        unseen.push_back(next);
                        next_id
                    }
                };

                transitions.insert((id, symbol), next_id);
            }
        }

        tracing::debug!(
            "subset construction: {} nfa states -> {} dfa states ({} accepting)",
            nfa.get_nb_states(),
            ids.len(),
            finals.len()
        );

        Dfa {
            nb_states: ids.len(),
            start: 0,
            finals,
            alphabet,
            transitions,
        }
    }

    pub fn get_start(&self) -> usize {
        self.start
    }

    pub fn get_nb_states(&self) -> usize {
        self.nb_states
    }

    pub fn get_alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn get_finals(&self) -> &BitSet {
        &self.finals
    }

    pub fn is_final(&self, state: usize) -> bool {
        self.finals.contains(state)
    }

    /// Follow the transition labeled `symbol`, `None` means the dead state.
    pub fn next(&self, state: usize, symbol: char) -> Option<usize> {
        self.transitions.get(&(state, symbol)).copied()
    }

    /// All recorded transitions as `(source, symbol, target)`, sorted.
    pub fn transitions(&self) -> Vec<(usize, char, usize)> {
        let mut transitions: Vec<_> = self
            .transitions
            .iter()
            .map(|(&(source, symbol), &target)| (source, symbol, target))
            .collect();

        transitions.sort_unstable();
        transitions
    }

    pub fn render<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        write_dot(
            path,
            self.start,
            self.finals.iter(),
            self.transitions()
                .into_iter()
                .map(|(source, symbol, target)| (source, Label::Symbol(symbol), target)),
        )
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let finals: Vec<String> = self.finals.iter().map(|state| state.to_string()).collect();

        writeln!(f, "start={}", self.start)?;
        writeln!(f, "finals={{{}}}", finals.join(", "))?;

        for (source, symbol, target) in self.transitions() {
            writeln!(f, "{} -{}-> {}", source, symbol, target)?;
        }

        Ok(())
    }
}

/// Smallest superset of `states` closed under epsilon edges.
pub fn epsilon_closure(nfa: &Nfa, states: &BitSet) -> BitSet {
    let adj = nfa.get_adj();
    let mut closure = states.clone();
    let mut stack: Vec<usize> = states.iter().collect();

    while let Some(state) = stack.pop() {
        for &(label, target) in &adj[state] {
            if label.is_epsilon() && closure.insert(target) {
                stack.push(target);
            }
        }
    }

    closure
}
