use super::automaton::Dfa;

/// Whole-string recognizer driven by a compiled DFA.
///
/// The automaton is never mutated after construction, so a single matcher
/// can be shared across threads.
#[derive(Clone, Debug)]
pub struct Matcher {
    dfa: Dfa,
}

impl Matcher {
    pub fn new(dfa: Dfa) -> Matcher {
        Matcher { dfa }
    }

    pub fn get_dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// Check if the whole `input` belongs to the langage of the pattern.
    ///
    /// Symbols are read one char at a time. Reaching an undefined transition
    /// means entering the dead state, so the rest of the input can't change
    /// the answer.
    pub fn matches(&self, input: &str) -> bool {
        let mut state = self.dfa.get_start();

        for symbol in input.chars() {
            match self.dfa.next(state, symbol) {
                Some(next) => state = next,
                None => return false,
            }
        }

        self.dfa.is_final(state)
    }
}
