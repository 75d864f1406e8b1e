pub mod dfa;
pub mod nfa;

use std::fmt;
use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::path::Path;

pub use dfa::Dfa;
pub use nfa::Nfa;

//  _          _          _
// | |    __ _| |__   ___| |
// | |   / _` | '_ \ / _ \ |
// | |__| (_| | |_) |  __/ |
// |_____\__,_|_.__/ \___|_|
//

/// Label carried by an edge of an automaton.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Label {
    /// Can be crossed without consuming any input.
    Epsilon,
    Symbol(char),
}

impl Label {
    pub fn is_epsilon(self) -> bool {
        self == Label::Epsilon
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Label::Epsilon => write!(f, "ε"),
            Label::Symbol(c) => write!(f, "{}", c),
        }
    }
}

//  ____       _
// |  _ \ ___ | |_
// | | | / _ \| __|
// | |_| | (_) | |_
// |____/ \___/ \__|
//

/// Write a graph in Graphviz's dot format.
///
/// The initial state gets an arrow from an invisible node and accepting
/// states are drawn with a double circle.
fn write_dot<P, I, T>(path: P, initial: usize, finals: I, edges: T) -> io::Result<()>
where
    P: AsRef<Path>,
    I: Iterator<Item = usize>,
    T: Iterator<Item = (usize, Label, usize)>,
{
    let mut buf = io::BufWriter::new(File::create(path)?);

    writeln!(buf, "digraph automaton {{")?;
    writeln!(buf, "\trankdir=LR;")?;
    writeln!(buf, "\tnode [shape=circle];")?;
    writeln!(buf, "\tinit [shape=point, style=invis];")?;

    for state in finals {
        writeln!(buf, "\t{} [shape=doublecircle];", state)?;
    }

    writeln!(buf, "\tinit -> {};", initial)?;

    for (source, label, target) in edges {
        writeln!(buf, "\t{} -> {} [label=\"{}\"];", source, target, label)?;
    }

    writeln!(buf, "}}")?;
    buf.flush()
}
