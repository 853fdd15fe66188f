use std::{error, fs, io, path::Path};

use derive_more::{Display, From};
use log::debug;
use serde::Serialize;

use super::structures::Election;

/// An error that occurred while writing the results out. Unlike everything
/// upstream this is not recoverable: a run that parsed data but cannot write
/// it has failed.
#[derive(Debug, From, Display)]
pub enum OutputError {
    IoError(io::Error),
    CsvError(csv::Error),
    JsonError(serde_json::Error),
}

impl error::Error for OutputError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            Self::CsvError(err) => Some(err),
            Self::JsonError(err) => Some(err),
        }
    }
}

/// One CSV row. The column names double as the header, which is why the
/// field order here is the output contract.
#[derive(Serialize)]
struct Row<'a> {
    election_number: &'a str,
    date: &'a str,
    candidates: String,
    perks: String,
    mayor: &'a str,
    minister: &'a str,
}

impl<'a> From<&'a Election> for Row<'a> {
    fn from(election: &'a Election) -> Self {
        Row {
            election_number: &election.election_number,
            date: &election.date,
            candidates: election.candidates.join(","),
            perks: flatten_perks(&election.perks),
            mayor: &election.mayor,
            minister: &election.minister,
        }
    }
}

/// Joins perks within each candidate, then joins the non-empty groups. The
/// per-candidate boundary is lost in the flat list; the consuming format has
/// always been this way, so it is reproduced as is.
fn flatten_perks(perks: &[Vec<String>]) -> String {
    perks
        .iter()
        .map(|group| group.join(","))
        .filter(|group| !group.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Write the elections to a CSV file with the fixed six column header.
/// When there are no elections, nothing at all is written and no file is
/// created.
pub fn write_csv<P: AsRef<Path>>(path: P, elections: &[Election]) -> Result<(), OutputError> {
    if elections.is_empty() {
        return Ok(());
    }
    let mut writer = csv::Writer::from_path(path)?;
    for election in elections {
        debug!(
            "writing row: election_number={}, candidates={:?}",
            election.election_number, election.candidates
        );
        writer.serialize(Row::from(election))?;
    }
    writer.flush()?;
    Ok(())
}

/// Dump the elections to a json file, with the two level perk structure
/// intact.
pub fn write_dump<P: AsRef<Path>>(path: P, elections: &[Election]) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(elections)?;
    fs::write(path, json)?;
    Ok(())
}
