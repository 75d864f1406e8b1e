mod parse;

use super::automaton::{Dfa, Nfa};
use super::error::Result;
use super::matcher::Matcher;

pub use parse::{preprocess, tokenize, Hir, Token, MAX_NESTING};

/// Parse a pattern into its syntax tree.
pub fn parse(regex: &str) -> Result<Hir> {
    let hir = Hir::from_regex(regex)?;
    tracing::debug!("parsed {:?} into {} ({} nodes)", regex, hir, hir.size());
    Ok(hir)
}

pub fn compile_nfa(regex: &str) -> Result<Nfa> {
    let hir = parse(regex)?;
    let nfa = Nfa::from_hir(&hir);

    tracing::debug!(
        "thompson construction: {} states, alphabet {:?}",
        nfa.get_nb_states(),
        nfa.get_alphabet()
    );

    Ok(nfa)
}

pub fn compile_dfa(regex: &str) -> Result<Dfa> {
    Ok(Dfa::from_nfa(&compile_nfa(regex)?))
}

/// Compile a pattern into a matcher.
///
/// Fails if the pattern is empty or malformed, in which case nothing is
/// built.
pub fn compile(regex: &str) -> Result<Matcher> {
    Ok(Matcher::new(compile_dfa(regex)?))
}

#[cfg(test)]
pub fn is_match(regex: &str, text: &str) -> bool {
    compile(regex).unwrap().matches(text)
}

#[cfg(test)]
mod tests;
