use std::error;

use derive_more::{Display, From};
use serde::Serialize;

use super::{
    super::parser::{TableMap, TableMapping, TableObjectError, TableValue},
    candidate::CandidateGroup,
    official::Official,
};

/// An error that disqualifies a whole record. Only the candidate block can do
/// that; every other field defaults when missing or misshapen.
#[derive(Debug, From, Display)]
pub enum ElectionError {
    /// The `candidates` key is missing or does not hold a keyed table.
    #[display("candidate block unusable: {}", _0)]
    BadCandidates(TableObjectError),
}

impl error::Error for ElectionError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::BadCandidates(err) => Some(err),
        }
    }
}

/// One parsed election. `candidates` and `perks` are positionally aligned
/// and always the same length.
#[derive(Debug, PartialEq, Serialize)]
pub struct Election {
    pub election_number: String,
    pub date: String,
    pub candidates: Vec<String>,
    pub perks: Vec<Vec<String>>,
    pub mayor: String,
    pub minister: String,
}

impl Election {
    /// Build an election from one record table. The label is whatever stood
    /// between the record's brackets, kept as text.
    pub fn from_table(label: &str, record: &TableMap) -> Result<Self, ElectionError> {
        let date = record
            .get("date")
            .and_then(|v| v.as_string().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();
        let group = record
            .get_object("candidates")
            .and_then(|o| o.as_map().map_err(Into::into))
            .map(CandidateGroup::from_table)?;
        let mayor = match record.get("mayor") {
            Some(TableValue::Object(o)) => {
                o.as_map().map(Official::from_table).unwrap_or_default()
            }
            _ => Official::default(),
        };
        let minister = match record.get("minister") {
            Some(TableValue::Object(o)) => {
                o.as_map().map(Official::from_table).unwrap_or_default()
            }
            // the dump sometimes abbreviates a perkless minister to a string
            Some(TableValue::String(name)) => Official::from_name(name),
            _ => Official::default(),
        };
        Ok(Election {
            election_number: label.to_string(),
            date,
            candidates: group.names,
            perks: group.perks,
            mayor: mayor.name,
            minister: minister.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{Section, TableObject};

    use super::*;

    fn record(body: &str) -> TableMap {
        match Section::new("1", body).parse().unwrap() {
            TableObject::Map(map) => map,
            _ => panic!("expected a map"),
        }
    }

    #[test]
    fn test_scenario_record() {
        let table = record(
            "date=\"2024-01-01\",
             candidates={Ann={perks={Perks.EZPZ},order=1},Bob={perks={},order=2}},
             mayor={name=\"Ann\",perks={}}",
        );
        let election = Election::from_table("1", &table).unwrap();
        assert_eq!(election.election_number, "1");
        assert_eq!(election.date, "2024-01-01");
        assert_eq!(election.candidates, ["Ann", "Bob"]);
        assert_eq!(election.perks, [vec!["Perks.EZPZ".to_string()], vec![]]);
        assert_eq!(election.mayor, "Ann");
        assert_eq!(election.minister, "");
    }

    #[test]
    fn test_alignment_invariant() {
        let table = record(
            "candidates={Ann={perks={Perks.EZPZ},order=1},Bob={order=2},Cay={perks={},order=3}}",
        );
        let election = Election::from_table("2", &table).unwrap();
        assert_eq!(election.candidates.len(), election.perks.len());
    }

    #[test]
    fn test_missing_candidates_rejects_record() {
        assert!(Election::from_table("3", &record("date=\"2024-01-01\"")).is_err());
        // a candidates key that is not a table is just as unusable
        assert!(Election::from_table("3", &record("candidates=\"nobody\"")).is_err());
    }

    #[test]
    fn test_minister_table_form() {
        let table = record(
            "candidates={Ann={order=1}},
             minister={name=\"Paul\",perks={Perks.LuckOfTheSea}}",
        );
        let election = Election::from_table("4", &table).unwrap();
        assert_eq!(election.minister, "Paul");
    }

    #[test]
    fn test_minister_string_form() {
        let table = record("candidates={Ann={order=1}}, minister=\"Paul\"");
        let election = Election::from_table("5", &table).unwrap();
        assert_eq!(election.minister, "Paul");
    }

    #[test]
    fn test_missing_offices_still_emit() {
        let table = record("candidates={Ann={order=1}}");
        let election = Election::from_table("6", &table).unwrap();
        assert_eq!(election.mayor, "");
        assert_eq!(election.minister, "");
        assert_eq!(election.candidates, ["Ann"]);
    }

    #[test]
    fn test_extra_event_reaches_candidates() {
        let table = record(
            "candidates={
                Ann={perks={Perks.ExtraEvent},order=1},
                params={extra_event=\"Sweet Tooth!\"}
             },
             mayor={name=\"Ann\",perks={Perks.ExtraEvent}}",
        );
        let election = Election::from_table("7", &table).unwrap();
        assert_eq!(election.perks, [vec!["Perks.ExtraEventSweet_Tooth".to_string()]]);
    }
}
