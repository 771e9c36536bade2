use chomsky::prelude::*;
use itertools::Itertools;
use owo_colors::OwoColorize;

use tracing::{debug, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{value_parser, Arg, ArgMatches, Command};

fn cli() -> clap::Command {
    Command::new("chomsky-demo")
        .about("Grammars, finite automata and the conversions between them")
        .subcommand_required(true)
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(value_parser!(u64))
                .help("seed for the random generator, drawn from the system if absent"),
        )
        .subcommand(
            Command::new("grammar")
                .about("generates strings from the example grammar and tests membership")
                .arg(
                    Arg::new("count")
                        .long("count")
                        .value_parser(value_parser!(usize))
                        .default_value("5"),
                )
                .arg(
                    Arg::new("words")
                        .num_args(0..)
                        .help("words to test, a few examples are used if none are given"),
                ),
        )
        .subcommand(
            Command::new("automaton")
                .about("determinizes the example automaton and turns it into a grammar")
                .arg(
                    Arg::new("dot")
                        .long("dot")
                        .action(clap::ArgAction::SetTrue)
                        .help("print the DOT representation of the resulting DFA"),
                ),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn example_grammar() -> Result<Grammar, Error> {
    Grammar::builder()
        .with_non_terminals(['S', 'A', 'B', 'C'])
        .with_terminals(['a', 'b', 'c', 'd'])
        .with_rules([
            ('S', "dA"),
            ('A', "aB"),
            ('A', "b"),
            ('B', "bC"),
            ('B', "d"),
            ('C', "cB"),
            ('C', "aA"),
        ])
        .with_start('S')
        .build()
}

fn example_automaton() -> Result<FiniteAutomaton<&'static str>, Error> {
    FiniteAutomaton::builder()
        .with_states(["q0", "q1", "q2", "q3"])
        .with_alphabet(['a', 'b', 'c'])
        .with_nondeterministic_transition("q0", 'a', ["q0", "q1"])
        .with_transitions([
            ("q1", 'b', "q1"),
            ("q1", 'a', "q2"),
            ("q2", 'c', "q3"),
            ("q3", 'c', "q3"),
        ])
        .with_start("q0")
        .with_accepting(["q3"])
        .build()
}

fn run_grammar(matches: &ArgMatches, rng: &mut fastrand::Rng) -> Result<(), Error> {
    let grammar = example_grammar()?;
    println!("{}\n{grammar}", "Grammar".bold().blue());
    println!("{} {}\n", "Classification:".bold(), grammar.classify());

    let count = matches.get_one::<usize>("count").copied().unwrap_or(5);
    println!("{}", "Generated strings:".bold().blue());
    for word in grammar.generate_strings(rng, DEFAULT_EXPANSION_BUDGET, count)? {
        println!("  {word}");
    }

    let dfa = grammar.to_finite_automaton()?.into_dfa()?;
    debug!("grammar gives automaton with {} states", dfa.size());
    println!("\n{}\n{dfa}", "Finite automaton:".bold().blue());

    let words = matches
        .get_many::<String>("words")
        .map(|words| words.cloned().collect_vec())
        .unwrap_or_else(|| {
            ["db", "dababcd", "dad", "dabaad", "invalid", ""]
                .map(String::from)
                .to_vec()
        });
    println!("{}", "String belonging to language:".bold().blue());
    for word in words {
        let verdict = if dfa.accepts(&word) {
            "accepted".green().to_string()
        } else {
            "rejected".red().to_string()
        };
        println!("  {:?} -> {verdict}", word);
    }
    Ok(())
}

fn run_automaton(matches: &ArgMatches) -> Result<(), Error> {
    let nfa = example_automaton()?;
    println!("{}\n{nfa}", "Automaton".bold().blue());
    println!("{} {}\n", "Deterministic:".bold(), nfa.is_deterministic());

    let dfa = nfa.convert_ndfa_to_dfa();
    println!("{}\n{dfa}", "Subset construction:".bold().blue());
    println!(
        "{} {}\n",
        "Accepting:".bold(),
        dfa.accepting().iter().map(|q| q.show()).join(", ")
    );

    let reconstructed = nfa.to_regular_grammar();
    println!(
        "{}\n{}",
        "Regular grammar:".bold().blue(),
        reconstructed.grammar
    );
    if reconstructed.accepts_empty {
        println!("(the automaton also accepts the empty word)");
    }

    if matches.get_flag("dot") {
        println!("{}", dfa.dot_representation());
    }
    Ok(())
}

pub fn main() {
    let matches = cli().get_matches();

    setup_logging(&matches);

    let mut rng = match matches.get_one::<u64>("seed") {
        Some(seed) => fastrand::Rng::with_seed(*seed),
        None => fastrand::Rng::new(),
    };

    let outcome = match matches.subcommand() {
        Some(("grammar", sub_matches)) => run_grammar(sub_matches, &mut rng),
        Some(("automaton", sub_matches)) => run_automaton(sub_matches),
        _ => unreachable!(),
    };

    if let Err(e) = outcome {
        eprintln!("{} {e}", "error:".red().bold());
        std::process::exit(1);
    }
}
