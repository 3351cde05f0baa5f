use std::path::{Path, PathBuf};

use anyhow::Context;
use inquire::Text;
use secret_santa::{table, Assigner};
use tracing::{info, warn};

/// The destination of the result table, in the working directory.
const OUTPUT_FILE: &str = "new_assignments.csv";

fn main() {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .from_env_lossy(),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("failed to set tracing subscriber");

    if let Err(error) = run() {
        eprintln!("Error: {error}");
        for cause in error.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let employee_file = prompt_for_file("Enter path to the employee list file:")?;
    let previous_file = prompt_for_file("Enter path to the previous round's results:")?;

    let roster = table::load_roster(&employee_file);
    anyhow::ensure!(
        !roster.is_empty(),
        "{} contains no usable roster rows",
        employee_file.display()
    );
    let prior = table::load_prior_round(&previous_file);
    if prior.is_empty() {
        info!("no prior-round constraints loaded");
    }

    let assignment = Assigner::new(&roster, &prior)
        .solve()
        .context("could not assign gift recipients")?;

    let output = Path::new(OUTPUT_FILE);
    table::write_assignments(output, &assignment)
        .with_context(|| format!("could not write {}", output.display()))?;
    info!(path = %output.display(), rows = assignment.len(), "assignments saved");
    Ok(())
}

/// Prompts for a file path until the user names one that exists.
///
/// Only existence is checked here; whether the file is a usable table is
/// decided later, by the loaders in [`table`].
fn prompt_for_file(message: &str) -> anyhow::Result<PathBuf> {
    loop {
        let input = Text::new(message).prompt()?;
        let path = PathBuf::from(input.trim());
        if path.exists() {
            return Ok(path);
        }
        warn!(path = %path.display(), "file does not exist; enter a valid path");
    }
}
