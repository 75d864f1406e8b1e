use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use stats::MinMax;

use super::automaton::{Dfa, Nfa};
use super::error::Error;
use super::matcher::Matcher;
use super::regex;

#[derive(Debug, thiserror::Error)]
pub enum BenchmarkError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid benchmark file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not compile the regex: {0}")]
    Compile(#[from] Error),
}

/// A pattern and a file holding one input string per line.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BenchmarkCase {
    name:     String,
    comment:  String,
    filename: String,
    regex:    String,
    /// Only read this many bytes of the input file.
    length:   Option<u64>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BenchmarkResult {
    benchmark: BenchmarkCase,
    nfa_states: usize,
    dfa_states: usize,
    alphabet_size: usize,
    num_inputs: usize,
    num_matches: usize,
    compile_regex: f64,
    matching: f64,
    delay_min: f64,
    delay_max: f64,
    delay_avg: f64,
    delay_stddev: f64,
}

impl BenchmarkResult {
    pub fn get_num_matches(&self) -> usize {
        self.num_matches
    }

    pub fn get_num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn get_dfa_states(&self) -> usize {
        self.dfa_states
    }
}

impl BenchmarkCase {
    /// Read a JSON array of benchmarks, relative filenames are resolved from
    /// the directory of `filename`.
    pub fn read_from_file(filename: &Path) -> Result<Vec<BenchmarkCase>, BenchmarkError> {
        let mut input = String::new();

        File::open(&filename)?.read_to_string(&mut input)?;
        let path = filename.parent();

        let mut benchmarks: Vec<BenchmarkCase> = serde_json::from_str(&input)?;

        if let Some(path) = path {
            for benchmark in &mut benchmarks {
                benchmark.filename = path.join(&benchmark.filename).to_string_lossy().into_owned();
            }
        }

        Ok(benchmarks)
    }

    pub fn new(name: String, comment: String, filename: String, regex: String) -> BenchmarkCase {
        BenchmarkCase {
            name,
            comment,
            filename,
            regex,
            length: None,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn run(&self) -> Result<BenchmarkResult, BenchmarkError> {
        let mut input = String::new();

        // Read input file content.
        File::open(&self.filename)?
            .take(self.length.unwrap_or(std::u64::MAX))
            .read_to_string(&mut input)?;

        let lines: Vec<&str> = input.lines().collect();

        // Compile the regex.
        let timer = Instant::now();
        let nfa = Nfa::from_hir(&regex::parse(&self.regex)?);
        let matcher = Matcher::new(Dfa::from_nfa(&nfa));
        let compile_regex = timer.elapsed();

        // Match every line, keeping track of the time spent on each one.
        let mut delays = Vec::with_capacity(lines.len());
        let mut num_matches = 0;
        let timer = Instant::now();

        for line in &lines {
            let start_time = Instant::now();

            if matcher.matches(line) {
                num_matches += 1;
            }

            delays.push(start_time.elapsed().as_nanos() as f64);
        }

        let matching = timer.elapsed();

        let delay_range: MinMax<f64> = delays.iter().copied().collect();

        tracing::debug!(
            "benchmark {:?}: {}/{} inputs matched",
            self.name,
            num_matches,
            lines.len()
        );

        Ok(BenchmarkResult {
            benchmark: self.clone(),
            nfa_states: nfa.get_nb_states(),
            dfa_states: matcher.get_dfa().get_nb_states(),
            alphabet_size: matcher.get_dfa().get_alphabet().len(),
            num_inputs: lines.len(),
            num_matches,
            compile_regex: compile_regex.as_nanos() as f64 / 1_000_000_000.0,
            matching: matching.as_nanos() as f64 / 1_000_000_000.0,
            delay_min: delay_range.min().copied().unwrap_or(0.0) / 1_000_000_000.0,
            delay_max: delay_range.max().copied().unwrap_or(0.0) / 1_000_000_000.0,
            delay_avg: stats::mean(delays.iter().copied()) / 1_000_000_000.0,
            delay_stddev: stats::stddev(delays.iter().copied()) / 1_000_000_000.0,
        })
    }
}
