use std::io;
use std::io::prelude::*;

use rex::Matcher;

pub const PROMPT: &str = "rex>";

const HELP: &str = "\
regex <pattern>  compile a pattern, replacing the previous one
check <string>   check if the whole string matches the current pattern
help             display this message
exit, quit       leave the shell";

pub fn verdict(is_match: bool) -> &'static str {
    if is_match {
        "MATCHES"
    } else {
        "DOES NOT MATCH"
    }
}

enum Outcome {
    Reply(String),
    Silent,
    Exit,
}

/// Line-oriented interactive session: set a pattern, then check strings
/// against it.
pub struct Shell {
    matcher: Option<Matcher>,
}

impl Shell {
    pub fn new() -> Shell {
        Shell { matcher: None }
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        write!(output, "{} ", PROMPT)?;
        output.flush()?;

        for line in input.lines() {
            match self.execute(line?.trim()) {
                Outcome::Reply(reply) => writeln!(output, "{}", reply)?,
                Outcome::Silent => {}
                Outcome::Exit => return Ok(()),
            }

            write!(output, "{} ", PROMPT)?;
            output.flush()?;
        }

        writeln!(output)
    }

    fn execute(&mut self, line: &str) -> Outcome {
        let (command, argument) = match line.split_once(' ') {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };

        match command {
            "" => Outcome::Silent,
            "regex" if argument.is_empty() => Outcome::Reply("usage: regex <pattern>".to_string()),
            "regex" => match rex::compile(argument) {
                Ok(matcher) => {
                    tracing::debug!(
                        "shell pattern set to {:?} ({} dfa states)",
                        argument,
                        matcher.get_dfa().get_nb_states()
                    );
                    self.matcher = Some(matcher);
                    Outcome::Silent
                }
                Err(err) => Outcome::Reply(format!("error: {}", err)),
            },
            "check" => match &self.matcher {
                Some(matcher) => Outcome::Reply(verdict(matcher.matches(argument)).to_string()),
                None => Outcome::Reply("provide a regex!".to_string()),
            },
            "help" => Outcome::Reply(HELP.to_string()),
            "exit" | "quit" => Outcome::Exit,
            other => Outcome::Reply(format!("unknown command '{}', try 'help'", other)),
        }
    }
}
