//! Tiny program that compiles a regular expression and either traces a string through its DFA or
//! prints one of its automata as JSON. When tracing, the program exits with a non-zero status code
//! if the string does not match the pattern. Without arguments it prompts for both on stdin.

use regdfa::automata::dfa::IterState;
use regdfa::automata::DFA;
use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process;

const HELP: &str = "\
regextest <regex> <string> [--min] [--trace]
regextest --nfa <regex>
regextest --dfa <regex>
regextest --minimize <regex>
regextest --file <path>
regextest --test
regextest";

const BATCH_EXPRS: &[&str] = &["a", "b", "a|b", "a*", "ab", "(a|b)*abb", "(a|(b|c)*)d"];
const BATCH_INPUTS: &[&str] = &["", "a", "b", "ab", "abb", "aaa", "abc", "bb"];

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let code = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["--nfa", expr] => print_nfa(expr),
        ["--dfa", expr] => print_dfa(expr, false),
        ["--minimize", expr] => print_dfa(expr, true),
        ["--file", path] => run_file(path),
        ["--test"] => run_batch(),
        [] => run_interactive(),
        [expr, input, flags @ ..] if !expr.starts_with("--") => {
            let minimized = flags.contains(&"--min");
            let verbose = flags.contains(&"--trace");
            run_simulate(expr, input, minimized, verbose)
        }
        _ => {
            println!("{}", HELP);
            1
        }
    };

    process::exit(code);
}

fn build_dfa(expr: &str, minimized: bool) -> Result<DFA<char>, i32> {
    let nfa = regdfa::compile(expr).map_err(|e| {
        eprintln!("invalid regular expression {:?}: {}", expr, e);
        2
    })?;
    let dfa = regdfa::determinize(&nfa);

    Ok(if minimized {
        regdfa::minimize(&dfa)
    } else {
        dfa
    })
}

fn format_trace(trace: &[usize]) -> String {
    trace
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn print_json<S: serde::Serialize>(value: &S) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("failed to serialize automaton: {}", e);
            1
        }
    }
}

fn print_nfa(expr: &str) -> i32 {
    match regdfa::compile(expr) {
        Ok(nfa) => print_json(&nfa.export()),
        Err(e) => {
            eprintln!("invalid regular expression {:?}: {}", expr, e);
            2
        }
    }
}

fn print_dfa(expr: &str, minimized: bool) -> i32 {
    match build_dfa(expr, minimized) {
        Ok(dfa) => print_json(&dfa.export()),
        Err(code) => code,
    }
}

fn run_simulate(expr: &str, input: &str, minimized: bool, verbose: bool) -> i32 {
    let dfa = match build_dfa(expr, minimized) {
        Ok(dfa) => dfa,
        Err(code) => return code,
    };

    print!("{}", dfa);

    if verbose {
        for step in dfa.iter_on(input.chars()) {
            match step {
                IterState::Start(state, _) => println!("Start state: {}", state),
                IterState::Normal(c, state, _) => {
                    let nfa_states = dfa
                        .state(state)
                        .map(|s| format!("{:?}", s.nfa_states))
                        .unwrap_or_default();
                    println!("Read '{}', moved to state {} {}", c, state, nfa_states)
                }
                IterState::Stuck(state) => println!("No transition from state {}", state),
            }
        }
    }

    let sim = regdfa::simulate(&dfa, input);
    println!("Trace: {}", format_trace(&sim.trace));
    println!("Result: {}", if sim.accepted { "Accepted" } else { "Rejected" });

    if sim.accepted {
        0
    } else {
        1
    }
}

fn print_results<'a, I>(dfa: &DFA<char>, inputs: I)
where
    I: IntoIterator<Item = &'a str>,
{
    for input in inputs {
        let sim = regdfa::simulate(dfa, input);
        println!(
            "Input: {:?} => {} => {}",
            input,
            format_trace(&sim.trace),
            if sim.accepted { "Accepted" } else { "Rejected" }
        );
    }
}

/// Run a fixed set of patterns against a fixed set of inputs.
fn run_batch() -> i32 {
    for expr in BATCH_EXPRS {
        let dfa = match build_dfa(expr, false) {
            Ok(dfa) => dfa,
            Err(code) => return code,
        };

        println!("===== Testing regex: {} =====", expr);
        print!("{}", dfa);
        print_results(&dfa, BATCH_INPUTS.iter().copied());
    }

    0
}

fn prompt(stdin: &mut impl BufRead, message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    stdin.read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_owned())
}

fn run_interactive() -> i32 {
    let stdin = io::stdin();
    let mut stdin = stdin.lock();

    let read = prompt(&mut stdin, "Enter regex: ")
        .and_then(|expr| Ok((expr, prompt(&mut stdin, "Enter test string: ")?)));
    match read {
        Ok((expr, input)) => run_simulate(&expr, &input, false, false),
        Err(e) => {
            eprintln!("cannot read stdin: {}", e);
            1
        }
    }
}

/// The first line of the file is the regular expression; every following line is an input.
fn run_file(path: &str) -> i32 {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("cannot read {}: {}", path, e);
            return 1;
        }
    };

    let mut lines = contents.lines();
    let expr = match lines.next() {
        Some(expr) => expr,
        None => {
            eprintln!("{} is empty", path);
            return 1;
        }
    };

    let dfa = match build_dfa(expr, false) {
        Ok(dfa) => dfa,
        Err(code) => return code,
    };

    println!("Regex: {}", expr);
    print_results(&dfa, lines);

    0
}
