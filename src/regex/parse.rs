use std::fmt;
use std::mem;

use super::super::error::{Error, Result};

/// Deepest nesting of parenthesized groups accepted by the parser.
pub const MAX_NESTING: usize = 256;

//  _____     _
// |_   _|__ | | _____ _ __
//   | |/ _ \| |/ / _ \ '_ \
//   | | (_) |   <  __/ | | |
//   |_|\___/|_|\_\___|_| |_|
//

/// A single character of a pattern, classified.
///
/// Characters that are not operators are kept as `Symbol`, even when they are
/// not valid atoms (eg. `+`): rejecting them is the parser's job.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Token {
    Symbol(char),
    Open,
    Close,
    Alt,
    Star,
    Optional,
    /// Explicit concatenation, only ever inserted by `preprocess`.
    Concat,
}

impl Token {
    pub fn from_char(c: char) -> Token {
        match c {
            '(' => Token::Open,
            ')' => Token::Close,
            '|' => Token::Alt,
            '*' => Token::Star,
            '?' => Token::Optional,
            c => Token::Symbol(c),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Token::Symbol(c) => c,
            Token::Open => '(',
            Token::Close => ')',
            Token::Alt => '|',
            Token::Star => '*',
            Token::Optional => '?',
            Token::Concat => '.',
        }
    }

    /// True if an operand can end right after this token.
    pub fn ends_operand(self) -> bool {
        match self {
            Token::Symbol(c) => is_atom(c),
            Token::Close | Token::Star | Token::Optional => true,
            _ => false,
        }
    }

    /// True if this token can start a new operand.
    pub fn begins_operand(self) -> bool {
        match self {
            Token::Close | Token::Alt | Token::Star | Token::Optional => false,
            Token::Symbol('+') => false,
            _ => true,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Characters accepted as atoms: letters and digits, in the wide sense of
/// Unicode's `Alphabetic` and `Numeric` properties (eg. `é`, `٣` or `²`).
fn is_atom(c: char) -> bool {
    c.is_alphanumeric()
}

pub fn tokenize(pattern: &str) -> Vec<Token> {
    pattern.chars().map(Token::from_char).collect()
}

/// Make concatenation explicit by inserting a `Concat` token between every
/// pair of tokens where an operand ends and a new one begins.
pub fn preprocess(tokens: &[Token]) -> Vec<Token> {
    let mut out = Vec::with_capacity(2 * tokens.len());

    for pair in tokens.windows(2) {
        let (curr, next) = (pair[0], pair[1]);
        out.push(curr);

        if curr.ends_operand() && next.begins_operand() {
            out.push(Token::Concat);
        }
    }

    if let Some(&last) = tokens.last() {
        out.push(last);
    }

    out
}

//  _   _ _
// | | | (_)_ __
// | |_| | | '__|
// |  _  | | |
// |_| |_|_|_|
//

/// Syntax tree of a pattern. Every node owns its children, branchements are of
/// arity at most 2.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Hir {
    /// Langage of the single word of length 1
    Char(char),
    /// Concatenation of two langages
    Concat(Box<Hir>, Box<Hir>),
    /// Union of two langages
    Alternation(Box<Hir>, Box<Hir>),
    /// Either epsilon, either a word of the langage
    Option(Box<Hir>),
    /// Langage of repetitions of any number (including zero) of words of the
    /// input langage
    Closure(Box<Hir>),
}

impl Hir {
    /// Parse a pattern into its syntax tree.
    pub fn from_regex(regex: &str) -> Result<Hir> {
        if regex.is_empty() {
            return Err(Error::InvalidArgument("pattern must not be empty"));
        }

        let tokens = preprocess(&tokenize(regex));
        let mut parser = Parser::new(&tokens);
        let hir = parser.expression()?;

        match parser.peek() {
            None => Ok(hir),
            Some(token) => Err(Error::TrailingInput {
                position: parser.offset(),
                found: token.as_char(),
            }),
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        let mut size = 0;
        let mut todo = vec![self];

        while let Some(hir) = todo.pop() {
            size += 1;

            match hir {
                Hir::Char(_) => {}
                Hir::Concat(left, right) | Hir::Alternation(left, right) => {
                    todo.push(left);
                    todo.push(right);
                }
                Hir::Option(child) | Hir::Closure(child) => todo.push(child),
            }
        }

        size
    }

    pub fn concat(hir1: Hir, hir2: Hir) -> Hir {
        Hir::Concat(Box::new(hir1), Box::new(hir2))
    }

    pub fn alternation(hir1: Hir, hir2: Hir) -> Hir {
        Hir::Alternation(Box::new(hir1), Box::new(hir2))
    }

    pub fn option(hir: Hir) -> Hir {
        Hir::Option(Box::new(hir))
    }

    pub fn closure(hir: Hir) -> Hir {
        Hir::Closure(Box::new(hir))
    }
}

/// Fully parenthesized rendering, eg. `(a).((b)|(c))`.
impl fmt::Display for Hir {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        enum Piece<'h> {
            Node(&'h Hir),
            Text(&'static str),
        }

        // Pieces are pushed in reverse order of output.
        let mut todo = vec![Piece::Node(self)];

        while let Some(piece) = todo.pop() {
            let (left, op, right) = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(Hir::Char(c)) => {
                    write!(f, "{}", c)?;
                    continue;
                }
                Piece::Node(Hir::Concat(left, right)) => (left, ").(", Some(right)),
                Piece::Node(Hir::Alternation(left, right)) => (left, ")|(", Some(right)),
                Piece::Node(Hir::Option(child)) => (child, ")?", None),
                Piece::Node(Hir::Closure(child)) => (child, ")*", None),
            };

            if let Some(right) = right {
                todo.push(Piece::Text(")"));
                todo.push(Piece::Node(right));
            }

            todo.push(Piece::Text(op));
            todo.push(Piece::Node(left));
            todo.push(Piece::Text("("));
        }

        Ok(())
    }
}

/// Long patterns give deep trees, children are released from a heap-allocated
/// stack instead of recursively.
impl Drop for Hir {
    fn drop(&mut self) {
        fn take(hir: &mut Hir) -> Hir {
            mem::replace(hir, Hir::Char('_'))
        }

        let mut todo = Vec::new();

        match self {
            Hir::Char(_) => return,
            Hir::Concat(left, right) | Hir::Alternation(left, right) => {
                todo.push(take(left));
                todo.push(take(right));
            }
            Hir::Option(child) | Hir::Closure(child) => todo.push(take(child)),
        }

        while let Some(mut hir) = todo.pop() {
            match &mut hir {
                Hir::Char(_) => {}
                Hir::Concat(left, right) | Hir::Alternation(left, right) => {
                    todo.push(take(left));
                    todo.push(take(right));
                }
                Hir::Option(child) | Hir::Closure(child) => todo.push(take(child)),
            }
        }
    }
}

//  ____
// |  _ \ __ _ _ __ ___  ___ _ __
// | |_) / _` | '__/ __|/ _ \ '__|
// |  __/ (_| | |  \__ \  __/ |
// |_|   \__,_|_|  |___/\___|_|
//

/// Recursive descent over a preprocessed token sequence:
///
/// ```text
/// expression     := concatenation ('|' expression)?
/// concatenation  := repetition ('.' concatenation)?
/// repetition     := atom ('*' | '?')?
/// atom           := '(' expression ')' | CHAR
/// ```
///
/// Binary operators are read in loops and folded to the right, only groups
/// make the parser recurse, up to `MAX_NESTING` levels.
struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Parser<'t> {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.peek();

        if token.is_some() {
            self.pos += 1;
        }

        token
    }

    /// Position of the cursor in the original pattern, synthetic
    /// concatenations don't count.
    fn offset(&self) -> usize {
        self.tokens[..self.pos]
            .iter()
            .filter(|&&token| token != Token::Concat)
            .count()
    }

    fn expression(&mut self) -> Result<Hir> {
        let first = self.concatenation()?;
        let mut rest = Vec::new();

        while self.peek() == Some(Token::Alt) {
            self.bump();
            rest.push(self.concatenation()?);
        }

        Ok(fold_right(first, rest, Hir::alternation))
    }

    fn concatenation(&mut self) -> Result<Hir> {
        let first = self.repetition()?;
        let mut rest = Vec::new();

        while self.peek() == Some(Token::Concat) {
            self.bump();
            rest.push(self.repetition()?);
        }

        Ok(fold_right(first, rest, Hir::concat))
    }

    fn repetition(&mut self) -> Result<Hir> {
        let atom = self.atom()?;

        match self.peek() {
            Some(Token::Star) => {
                self.bump();
                Ok(Hir::closure(atom))
            }
            Some(Token::Optional) => {
                self.bump();
                Ok(Hir::option(atom))
            }
            _ => Ok(atom),
        }
    }

    fn atom(&mut self) -> Result<Hir> {
        match self.peek() {
            Some(Token::Open) => {
                if self.depth == MAX_NESTING {
                    return Err(Error::InvalidArgument("groups are nested too deeply"));
                }

                self.bump();
                self.depth += 1;
                let inner = self.expression()?;
                self.depth -= 1;

                match self.peek() {
                    Some(Token::Close) => {
                        self.bump();
                        Ok(inner)
                    }
                    _ => Err(Error::MissingSymbol {
                        symbol: ')',
                        position: self.offset(),
                    }),
                }
            }
            Some(Token::Symbol(c)) if is_atom(c) => {
                self.bump();
                Ok(Hir::Char(c))
            }
            found => Err(Error::Parse {
                position: self.offset(),
                found: found.map(Token::as_char),
            }),
        }
    }
}

/// `a op (b op (c op d))` for the operands `a, b, c, d`.
fn fold_right(first: Hir, mut rest: Vec<Hir>, combine: fn(Hir, Hir) -> Hir) -> Hir {
    let mut acc = match rest.pop() {
        Some(last) => last,
        None => return first,
    };

    while let Some(hir) = rest.pop() {
        acc = combine(hir, acc);
    }

    combine(first, acc)
}
