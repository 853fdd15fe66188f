use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info, warn};

/// A submodule that handles the arguments to the program.
mod args;
use args::Args;

/// A submodule that handles dump file parsing: slicing the dump into
/// sections and records, and parsing table literals into object trees.
mod parser;
use parser::{DumpFile, TableObject};

/// A submodule that provides the [structures::Election] records initialized
/// from the parsed objects.
mod structures;
use structures::Election;

/// A submodule that writes the extracted records out.
mod output;

/// The top level section of the dump that holds the election records.
const ELECTIONS_SECTION: &str = "elections";

/// Main function. This is the entry point of the program.
///
/// # Process
///
/// 1. Reads the dump file into memory.
/// 2. Streams the top level sections until the `elections` section is found.
/// 3. For each `[N] = { ... }` record within it, parses the record body into
///    a table tree and assembles an [Election] from it. A record that cannot
///    be parsed is logged and skipped; the rest of the run continues.
/// 4. Writes the collected elections to the CSV summary, and optionally to a
///    json dump.
///
/// A missing input file or a dump without an elections section is reported
/// and the program exits cleanly without producing output. Only a failure to
/// write the output results in a nonzero exit.
fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("failed to write output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), output::OutputError> {
    let dump = match DumpFile::open(&args.input) {
        Ok(dump) => dump,
        Err(e) => {
            error!("input file {} not usable: {}", args.input.display(), e);
            return Ok(());
        }
    };
    info!("loaded dump, {} bytes", dump.len());
    let elections = extract_elections(&dump);
    if elections.is_empty() {
        info!("no election data found, nothing written");
        return Ok(());
    }
    output::write_csv(&args.output, &elections)?;
    info!(
        "{} elections written to {}",
        elections.len(),
        args.output.display()
    );
    if let Some(dump_path) = &args.dump {
        output::write_dump(dump_path, &elections)?;
        info!("parsed elections dumped to {}", dump_path.display());
    }
    Ok(())
}

/// Pull every parseable election out of the dump, in order of appearance.
fn extract_elections(dump: &DumpFile) -> Vec<Election> {
    let mut elections = Vec::new();
    for section in dump.sections() {
        let section = match section {
            Ok(section) => section,
            Err(e) => {
                error!("dump is malformed: {}", e);
                return elections;
            }
        };
        if section.get_name() != ELECTIONS_SECTION {
            debug!("skipping section {}", section.get_name());
            continue;
        }
        for record in section.records() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    warn!("skipping malformed record: {}", e);
                    continue;
                }
            };
            let label = record.get_name();
            let table = match record.parse() {
                Ok(TableObject::Map(map)) => map,
                Ok(_) => {
                    warn!("record {} is not a keyed table, skipping", label);
                    continue;
                }
                Err(e) => {
                    warn!("record {} did not parse, skipping: {}", label, e);
                    continue;
                }
            };
            match Election::from_table(label, &table) {
                Ok(election) => {
                    debug!(
                        "parsed election {}: {} candidates",
                        label,
                        election.candidates.len()
                    );
                    elections.push(election);
                }
                Err(e) => warn!("skipping election {}: {}", label, e),
            }
        }
        return elections;
    }
    error!("no {} section found", ELECTIONS_SECTION);
    elections
}
