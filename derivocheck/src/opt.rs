use clap::{Parser, Subcommand};
use derivo::TypeSystem;
use std::path::PathBuf;

/// A checker for typing derivations of typed lambda calculi
#[derive(Clone, Debug, Parser)]
#[command(version)]
pub struct Opt {
    /// Type system in which judgments are checked
    ///
    /// Possible values are: stlc, hm, systemf.
    #[arg(long, short, default_value = "hm")]
    pub system: TypeSystem,

    /// Check premises concurrently
    ///
    /// If this option is used, the premises of a rule are checked in parallel.
    /// If this option is given with a number n, then
    /// maximally n checks are concurrently executed.
    /// If this option is given without an extra argument, then
    /// the number of concurrently executed checks is
    /// determined automatically from the number of CPUs.
    #[arg(long, short)]
    pub jobs: Option<Option<usize>>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Check rule trees given as JSON
    Check {
        /// Print the checked rule trees as JSON
        #[arg(long)]
        json: bool,

        /// Files to check
        ///
        /// Every file contains a single rule tree.
        /// To read from standard input, use "-" as file name.
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
    /// Infer the principal type of a term
    Infer {
        /// Context of the term, such as "x: Bool, X, f: X -> X"
        #[arg(long, short, default_value = "")]
        context: String,

        term: String,
    },
}

#[test]
fn verify() {
    use clap::CommandFactory;
    Opt::command().debug_assert()
}

#[test]
fn arguments() {
    let opt = Opt::parse_from(["derivocheck", "-j", "-s", "stlc", "check", "a.json", "-"]);
    assert_eq!(opt.system, TypeSystem::SimplyTyped);
    assert_eq!(opt.jobs, Some(None));
    match opt.command {
        Command::Check { json, files } => {
            assert!(!json);
            assert_eq!(files, [PathBuf::from("a.json"), PathBuf::from("-")]);
        }
        _ => panic!("check expected"),
    }

    let opt = Opt::parse_from(["derivocheck", "infer", r"\x. x"]);
    assert_eq!(opt.system, TypeSystem::HindleyMilner);
    assert!(matches!(opt.command, Command::Infer { .. }));
}
