use clap::Parser;
use colored::Colorize;
use datitos_common::test_case::TestCase;
use glob::glob;
use std::path::PathBuf;

mod test_runner;
use test_runner::{TestResult, TestRunner};

/// Runs the compatibility-test suite against a datitos binary

#[derive(Parser, Debug)]
struct Args {
    /// Path to the datitos binary under test
    runtime: PathBuf,

    /// Glob of compatibility test files (e.g. "compatibility-tests/*.md")
    compatibility_tests: String,
}

fn main() {
    let args = Args::parse();

    let mut paths: Vec<PathBuf> = glob(&args.compatibility_tests)
        .expect("invalid glob pattern")
        .filter_map(|entry| entry.ok())
        .collect();
    paths.sort();

    let runner = TestRunner::from_path(args.runtime);
    let mut failures = 0;

    for path in &paths {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                println!("{} {}: {}", "ERROR".red(), path.display(), err);
                failures += 1;
                continue;
            }
        };

        let test_case = TestCase::from_string(&content, path);
        if test_case.disabled {
            println!("{} {}", "SKIP".yellow(), test_case.name);
            continue;
        }

        match runner.run(test_case.clone()) {
            TestResult::Pass => println!("{} {}", "PASS".green(), test_case.name),
            TestResult::Fail { expected, actual } => {
                failures += 1;
                println!("{} {}", "FAIL".red(), test_case.name);
                if let Some(expected) = expected {
                    println!("--- expected ---");
                    println!("{}", expected);
                }
                println!("--- actual ---");
                println!("{}", actual);
            }
        }
    }

    println!("{} tests, {} failures", paths.len(), failures);

    if failures > 0 {
        std::process::exit(1);
    }
}
