//! Checking of typing derivations given as JSON rule trees.

#[macro_use]
extern crate log;

mod error;
mod opt;

pub use error::Error;
pub use opt::{Command, Opt};

use derivo::tree::{self, Checked, Config, RuleTree};
use derivo::{kernel, Context, Show, Term, TypeSystem};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Read a rule tree from a JSON file, or from standard input if the path is "-".
pub fn read_tree(path: &Path) -> Result<RuleTree, Error> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&text)?)
}

/// Print a checked rule tree, either as JSON or as indented verdict listing.
pub fn report(checked: &Checked, json: bool, out: &mut impl Write) -> Result<(), Error> {
    if json {
        serde_json::to_writer_pretty(&mut *out, checked)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", checked)?;
    }
    Ok(())
}

/// Check the rule trees in the given files and report them.
///
/// Fail if some rule tree contains a node whose rule does not hold.
pub fn check(files: &[PathBuf], json: bool, config: &Config) -> Result<(), Error> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut unverified = 0;
    for file in files {
        info!("check {}", file.display());
        let checked = tree::check(&read_tree(file)?, config);
        let failures = checked.failures();
        if failures > 0 {
            info!("{} node(s) failed in {}", failures, file.display());
            unverified += 1;
        }
        report(&checked, json, &mut out)?;
    }
    match unverified {
        0 => Ok(()),
        n => Err(Error::Unverified(n)),
    }
}

/// Return the principal type of a term in a context, printed in that context.
pub fn infer(system: TypeSystem, context: &str, term: &str) -> Result<String, Error> {
    let ctx = Context::parse(context)?;
    let tm = Term::parse(term, &ctx)?;
    system.admits_context(&ctx).map_err(derivo::Error::from)?;
    system.admits_term(&tm).map_err(derivo::Error::from)?;
    let ty = kernel::type_of(&ctx, &tm).map_err(derivo::Error::from)?;
    Ok(ty.show(&ctx).to_string())
}
