use std::collections::BTreeSet;
use std::fmt;
use std::io;
use std::iter;
use std::path::Path;

use bit_set::BitSet;

use super::super::regex::Hir;
use super::{write_dot, Label};

//  _   _ _____ _
// | \ | |  ___/ \
// |  \| | |_ / _ \
// | |\  |  _/ ___ \
// |_| \_|_|/_/   \_\
//

/// Nondeterministic automaton built by Thompson's construction.
///
/// States are the contiguous range `0..nb_states`, the initial state is
/// always `0` and the final state is always `nb_states - 1`. The same holds
/// for the range of states allocated to each node of the syntax tree.
#[derive(Clone, Debug)]
pub struct Nfa {
    nb_states: usize,
    initial: usize,
    final_state: usize,
    /// Outgoing edges of each state, in insertion order.
    adj: Vec<Vec<(Label, usize)>>,
    /// Symbols seen on any edge, epsilon excluded.
    alphabet: BTreeSet<char>,
}

impl Nfa {
    /// Compile a syntax tree into an automaton recognizing the same langage.
    ///
    /// The tree is walked with an explicit stack. States are allocated in
    /// order and every fragment allocates its final state last, so when a
    /// child is complete its final state is always the last allocated one.
    pub fn from_hir(hir: &Hir) -> Nfa {
        let mut nfa = Nfa::with_initial();
        let mut todo = vec![Step::Enter(hir, nfa.initial)];

        while let Some(step) = todo.pop() {
            match step {
                Step::Enter(Hir::Char(c), initial) => {
                    let final_state = nfa.add_state();
                    nfa.add_transition(initial, final_state, Label::Symbol(*c));
                }
                Step::Enter(Hir::Concat(left, right), initial) => {
                    todo.push(Step::Concat(right));
                    todo.push(Step::Enter(left, initial));
                }
                Step::Enter(Hir::Alternation(left, right), initial) => {
                    let left_initial = nfa.add_state();
                    nfa.add_transition(initial, left_initial, Label::Epsilon);
                    todo.push(Step::Alternation(initial, Some(&**right)));
                    todo.push(Step::Enter(left, left_initial));
                }
                Step::Enter(Hir::Option(child), initial) => {
                    let child_initial = nfa.add_state();
                    nfa.add_transition(initial, child_initial, Label::Epsilon);
                    todo.push(Step::Alternation(initial, None));
                    todo.push(Step::Enter(child, child_initial));
                }
                Step::Enter(Hir::Closure(child), initial) => {
                    let child_initial = nfa.add_state();
                    nfa.add_transition(initial, child_initial, Label::Epsilon); // enter
                    todo.push(Step::Closure(initial, child_initial));
                    todo.push(Step::Enter(child, child_initial));
                }
                Step::Concat(right) => {
                    // The right operand starts on the final state of the left one
                    let left_final = nfa.last_state();
                    todo.push(Step::Enter(right, left_final));
                }
                Step::Alternation(initial, right) => {
                    let left_final = nfa.last_state();
                    let right_initial = nfa.add_state();
                    nfa.add_transition(initial, right_initial, Label::Epsilon);
                    todo.push(Step::Join(left_final));

                    match right {
                        Some(right) => todo.push(Step::Enter(right, right_initial)),
                        None => {
                            let right_final = nfa.add_state();
                            nfa.add_transition(right_initial, right_final, Label::Epsilon);
                        }
                    }
                }
                Step::Join(left_final) => {
                    let right_final = nfa.last_state();
                    let final_state = nfa.add_state();
                    nfa.add_transition(left_final, final_state, Label::Epsilon);
                    nfa.add_transition(right_final, final_state, Label::Epsilon);
                }
                Step::Closure(initial, child_initial) => {
                    let child_final = nfa.last_state();
                    let final_state = nfa.add_state();
                    nfa.add_transition(child_final, child_initial, Label::Epsilon); // repeat
                    nfa.add_transition(child_final, final_state, Label::Epsilon); // exit
                    nfa.add_transition(initial, final_state, Label::Epsilon); // skip
                }
            }
        }

        nfa.nb_states = nfa.adj.len();
        nfa.final_state = nfa.last_state();
        nfa
    }

    pub fn get_initial(&self) -> usize {
        self.initial
    }

    pub fn get_final(&self) -> usize {
        self.final_state
    }

    pub fn get_nb_states(&self) -> usize {
        self.nb_states
    }

    pub fn get_alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    pub fn get_adj(&self) -> &Vec<Vec<(Label, usize)>> {
        &self.adj
    }

    /// Iterate over all edges as `(source, label, target)`.
    pub fn transitions<'a>(&'a self) -> impl Iterator<Item = (usize, Label, usize)> + 'a {
        self.adj.iter().enumerate().flat_map(|(source, edges)| {
            edges
                .iter()
                .map(move |&(label, target)| (source, label, target))
        })
    }

    /// States directly reachable from `state` through an edge labeled `label`.
    pub fn reachable(&self, state: usize, label: Label) -> BitSet {
        let mut targets = BitSet::with_capacity(self.nb_states);

        for &(edge_label, target) in &self.adj[state] {
            if edge_label == label {
                targets.insert(target);
            }
        }

        targets
    }

    /// Union of `reachable` over a set of states.
    pub fn reachable_from_set(&self, states: &BitSet, label: Label) -> BitSet {
        let mut targets = BitSet::with_capacity(self.nb_states);

        for state in states.iter() {
            for &(edge_label, target) in &self.adj[state] {
                if edge_label == label {
                    targets.insert(target);
                }
            }
        }

        targets
    }

    pub fn render<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        write_dot(
            path,
            self.initial,
            iter::once(self.final_state),
            self.transitions(),
        )
    }

    //   ____                _                   _   _
    //  / ___|___  _ __  ___| |_ _ __ _   _  ___| |_(_) ___  _ __
    // | |   / _ \| '_ \/ __| __| '__| | | |/ __| __| |/ _ \| '_ \
    // | |__| (_) | | | \__ \ |_| |  | |_| | (__| |_| | (_) | | | |
    //  \____\___/|_| |_|___/\__|_|   \__,_|\___|\__|_|\___/|_| |_|
    //

    /// A single state, both initial and final until more are allocated.
    fn with_initial() -> Nfa {
        Nfa {
            nb_states: 1,
            initial: 0,
            final_state: 0,
            adj: vec![Vec::new()],
            alphabet: BTreeSet::new(),
        }
    }

    fn add_state(&mut self) -> usize {
        self.adj.push(Vec::new());
        self.adj.len() - 1
    }

    fn last_state(&self) -> usize {
        self.adj.len() - 1
    }

    fn add_transition(&mut self, source: usize, target: usize, label: Label) {
        if let Label::Symbol(c) = label {
            self.alphabet.insert(c);
        }

        self.adj[source].push((label, target));
    }
}

/// Pending work of `Nfa::from_hir`.
enum Step<'h> {
    /// Build the fragment of a node from an already allocated initial state.
    Enter(&'h Hir, usize),
    /// The left operand is built, its final state is where `right` starts.
    Concat(&'h Hir),
    /// The left branch is built. The right one is the empty word if `None`.
    Alternation(usize, Option<&'h Hir>),
    /// Both branches are built, link them to a fresh final state.
    Join(usize),
    /// The repeated child is built: `(initial, child_initial)`.
    Closure(usize, usize),
}

/// One edge per line, eg. `0 -a-> 1` or `1 -ε-> 3`.
impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (source, label, target) in self.transitions() {
            writeln!(f, "{} -{}-> {}", source, label, target)?;
        }

        Ok(())
    }
}
