use std::collections::HashMap;

use log::debug;

use super::{
    super::parser::{TableMap, TableValue},
    perks::normalize_perks,
};

/// The ordering index assigned to candidates that do not declare one, so
/// that they sort after every candidate that does.
const ORDER_SENTINEL: i64 = 9999;

/// The reserved entry name that carries the group parameter mapping rather
/// than a candidate.
const PARAMS_KEY: &str = "params";

/// The parsed candidate roster of one election: names and per-candidate perk
/// lists, positionally aligned and already in final order.
#[derive(Debug, PartialEq)]
pub struct CandidateGroup {
    pub names: Vec<String>,
    pub perks: Vec<Vec<String>>,
}

impl CandidateGroup {
    /// Parse the candidates table. Entries are sorted by `(order, name)`,
    /// with ties broken by name so the result is deterministic no matter how
    /// the dump orders them. Entries that are not tables are ignored.
    pub fn from_table(table: &TableMap) -> Self {
        let params = group_params(table);
        let mut entries: Vec<(i64, String, Vec<String>)> = Vec::new();
        for (name, value) in table {
            if name == PARAMS_KEY {
                continue;
            }
            let body = match value.as_object().and_then(|o| o.as_map()) {
                Ok(body) => body,
                Err(_) => {
                    debug!("candidate entry {} is not a table, ignoring", name);
                    continue;
                }
            };
            let perks = body
                .get("perks")
                .and_then(|v| v.as_object().ok())
                .and_then(|o| o.as_array().ok())
                .map(|list| normalize_perks(list, Some(&params)))
                .unwrap_or_default();
            let order = body
                .get("order")
                .and_then(|v| v.as_integer().ok())
                .unwrap_or(ORDER_SENTINEL);
            entries.push((order, name.clone(), perks));
        }
        entries.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));
        let mut names = Vec::with_capacity(entries.len());
        let mut perks = Vec::with_capacity(entries.len());
        for (_, name, perk_list) in entries {
            names.push(name);
            perks.push(perk_list);
        }
        CandidateGroup { names, perks }
    }
}

/// Extract the shared `params = { key = "value", ... }` mapping from the
/// candidates table. Only string values are kept; absence of the block, or
/// of any usable entry, yields an empty mapping, never an error.
pub fn group_params(table: &TableMap) -> HashMap<String, String> {
    let mut params = HashMap::new();
    let block = table
        .get(PARAMS_KEY)
        .and_then(|v| v.as_object().ok())
        .and_then(|o| o.as_map().ok());
    if let Some(block) = block {
        for (key, value) in block {
            match value {
                TableValue::String(s) => {
                    params.insert(key.clone(), s.to_string());
                }
                _ => debug!("params entry {} is not a string, ignoring", key),
            }
        }
    }
    params
}

#[cfg(test)]
mod tests {
    use crate::parser::{Section, TableObject};

    use super::*;

    fn candidates_table(body: &str) -> TableMap {
        match Section::new("candidates", body).parse().unwrap() {
            TableObject::Map(map) => map,
            _ => panic!("expected a map"),
        }
    }

    #[test]
    fn test_explicit_order() {
        let table = candidates_table(
            "Cod = {perks={},order=2}, Ann = {perks={},order=1}, Eel = {perks={},order=3}",
        );
        let group = CandidateGroup::from_table(&table);
        assert_eq!(group.names, ["Ann", "Cod", "Eel"]);
    }

    #[test]
    fn test_missing_order_sorts_last() {
        let table = candidates_table(
            "Drifter = {perks={}}, Zoe = {perks={},order=2}, Ann = {perks={},order=1}",
        );
        let group = CandidateGroup::from_table(&table);
        assert_eq!(group.names, ["Ann", "Zoe", "Drifter"]);
    }

    #[test]
    fn test_duplicate_order_ties_break_by_name() {
        let table = candidates_table(
            "Zoe = {order=1}, Ann = {order=1}, Mel = {order=1}",
        );
        let group = CandidateGroup::from_table(&table);
        assert_eq!(group.names, ["Ann", "Mel", "Zoe"]);
    }

    #[test]
    fn test_params_entry_is_not_a_candidate() {
        let table = candidates_table(
            "Ann = {perks={Perks.ExtraEvent},order=1}, params = {extra_event=\"Sweet Tooth\"}",
        );
        let group = CandidateGroup::from_table(&table);
        assert_eq!(group.names, ["Ann"]);
        assert_eq!(group.perks, [vec!["Perks.ExtraEventSweet_Tooth".to_string()]]);
    }

    #[test]
    fn test_alignment() {
        let table = candidates_table(
            "Ann = {perks={Perks.EZPZ},order=1}, Bob = {perks={},order=2}, Cay = {order=3}",
        );
        let group = CandidateGroup::from_table(&table);
        assert_eq!(group.names.len(), group.perks.len());
        assert_eq!(group.perks[0], ["Perks.EZPZ"]);
        assert!(group.perks[1].is_empty());
        assert!(group.perks[2].is_empty());
    }

    #[test]
    fn test_non_table_entry_ignored() {
        let table = candidates_table("Ann = {order=1}, note = \"irrelevant\"");
        let group = CandidateGroup::from_table(&table);
        assert_eq!(group.names, ["Ann"]);
    }

    #[test]
    fn test_group_params() {
        let table = candidates_table(
            "params = {extra_event=\"Fishing Festival\", sponsor=\"Chamber\", depth={a=1}}",
        );
        let params = group_params(&table);
        assert_eq!(params.get("extra_event").map(String::as_str), Some("Fishing Festival"));
        assert_eq!(params.get("sponsor").map(String::as_str), Some("Chamber"));
        // nested table entries are not usable as parameters but do not break
        // the rest of the mapping
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_group_params_absent() {
        let table = candidates_table("Ann = {order=1}");
        assert!(group_params(&table).is_empty());
    }
}
