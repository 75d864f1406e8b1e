mod shell;

use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::io::{stdin, stdout, BufReader};
use std::path::Path;

use anyhow::Context;
use clap::{App, Arg};
use tracing_subscriber::EnvFilter;

use rex::benchmark::BenchmarkCase;
use shell::Shell;

fn main() -> anyhow::Result<()> {
    //  ____
    // |  _ \ __ _ _ __ ___  ___ _ __
    // | |_) / _` | '__/ __|/ _ \ '__|
    // |  __/ (_| | |  \__ \  __/ |
    // |_|   \__,_|_|  |___/\___|_|
    //
    let matches = App::new("rex")
        .version("0.1")
        .about("Check whole strings against a regular expression compiled into a DFA.")
        .arg(
            Arg::with_name("regex")
                .help("The pattern to match each line against.")
                .required_unless_one(&["interactive", "benchmark-file"]),
        )
        .arg(
            Arg::with_name("file")
                .help("The file to be read, if none is specified, STDIN is used."),
        )
        .arg(
            Arg::with_name("interactive")
                .short("I")
                .long("interactive")
                .conflicts_with_all(&["regex", "file", "benchmark-file"])
                .help("Start a shell accepting `regex <pattern>` and `check <string>` commands."),
        )
        .arg(
            Arg::with_name("count")
                .short("c")
                .long("count")
                .help("Display the number of matching lines instead."),
        )
        .arg(
            Arg::with_name("dot")
                .long("dot")
                .takes_value(true)
                .value_name("PATH")
                .help("Write the compiled DFA to a Graphviz dotfile."),
        )
        .arg(
            Arg::with_name("benchmark")
                .long("benchmark")
                .requires("file")
                .help("Output statistics about compiling the regex and matching the lines of file."),
        )
        .arg(
            Arg::with_name("benchmark-file")
                .long("benchmark-file")
                .takes_value(true)
                .conflicts_with("regex")
                .help("Read a set of benchmarks from a file in JSON syntax."),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Log compilation steps to STDERR, repeat for more details."),
        )
        .get_matches();

    init_logging(matches.occurrences_of("verbose"));

    //  ____                  _                          _
    // | __ )  ___ _ __   ___| |__  _ __ ___   __ _ _ __| | __
    // |  _ \ / _ \ '_ \ / __| '_ \| '_ ` _ \ / _` | '__| |/ /
    // | |_) |  __/ | | | (__| | | | | | | | | (_| | |  |   <
    // |____/ \___|_| |_|\___|_| |_|_| |_| |_|\__,_|_|  |_|\_\
    //

    if let Some(benchmark_file) = matches.value_of("benchmark-file") {
        let benchmarks = BenchmarkCase::read_from_file(Path::new(benchmark_file))
            .with_context(|| format!("could not load benchmarks from {}", benchmark_file))?;

        let mut results = Vec::with_capacity(benchmarks.len());

        for benchmark in &benchmarks {
            let result = benchmark
                .run()
                .with_context(|| format!("benchmark {:?} failed", benchmark.get_name()))?;
            results.push(result);
        }

        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    //  ____  _          _ _
    // / ___|| |__   ___| | |
    // \___ \| '_ \ / _ \ | |
    //  ___) | | | |  __/ | |
    // |____/|_| |_|\___|_|_|
    //

    if matches.is_present("interactive") {
        let stdin = stdin();
        let stdout = stdout();
        Shell::new().run(stdin.lock(), stdout.lock())?;
        return Ok(());
    }

    let regex_str = matches.value_of("regex").context("no regex provided")?;

    if matches.is_present("benchmark") {
        let filename = matches.value_of("file").context("no file provided")?;
        let benchmark_case = BenchmarkCase::new(
            "CLI Benchmark".to_string(),
            "Benchmark invoked by CLI.".to_string(),
            filename.to_string(),
            regex_str.to_string(),
        );

        println!("{}", serde_json::to_string_pretty(&benchmark_case.run()?)?);
        return Ok(());
    }

    //  __  __       _       _
    // |  \/  | __ _| |_ ___| |__
    // | |\/| |/ _` | __/ __| '_ \
    // | |  | | (_| | || (__| | | |
    // |_|  |_|\__,_|\__\___|_| |_|
    //

    let matcher =
        rex::compile(regex_str).with_context(|| format!("invalid regex {:?}", regex_str))?;

    if let Some(path) = matches.value_of("dot") {
        matcher
            .get_dfa()
            .render(path)
            .with_context(|| format!("could not create the dotfile {}", path))?;
    }

    let input: Box<dyn BufRead> = match matches.value_of("file") {
        Some(filename) => Box::new(BufReader::new(
            File::open(filename).with_context(|| format!("could not open {}", filename))?,
        )),
        None => Box::new(BufReader::new(stdin())),
    };

    let count_only = matches.is_present("count");
    let stdout = stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut count = 0;

    for line in input.lines() {
        let is_match = matcher.matches(&line?);

        if is_match {
            count += 1;
        }

        if !count_only {
            writeln!(out, "{}", shell::verdict(is_match))?;
        }
    }

    if count_only {
        writeln!(out, "{}", count)?;
    }

    out.flush()?;
    Ok(())
}

/// Without `-v`, the filter is read from `RUST_LOG` and defaults to warnings.
fn init_logging(verbosity: u64) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("rex=debug"),
        _ => EnvFilter::new("rex=trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
