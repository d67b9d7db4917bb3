//! A checker for typing derivations of typed lambda calculi.

use clap::Parser;
use derivo::tree::Config;
use derivocheck::{Command, Error, Opt};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = Opt::parse();

    // if a precise number of parallel jobs has been given
    if let Some(Some(jobs)) = opt.jobs {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(jobs).build_global() {
            log::warn!("could not configure thread pool: {}", e)
        }
    }

    let config = Config {
        system: opt.system,
        parallel: opt.jobs.is_some(),
    };

    match opt.command {
        Command::Check { json, files } => derivocheck::check(&files, json, &config),
        Command::Infer { context, term } => {
            println!("{}", derivocheck::infer(opt.system, &context, &term)?);
            Ok(())
        }
    }
}
