use super::{super::parser::TableMap, perks::normalize_perks};

/// A mayor or minister: a name and a perk list. Either may be empty; an
/// office simply being vacant is not an error.
#[derive(Debug, Default, PartialEq)]
pub struct Official {
    pub name: String,
    pub perks: Vec<String>,
}

impl Official {
    /// Parse an office sub-table, e.g. `{name="Marina", perks={...}}`.
    /// Office perks never use the candidate group parameters, so no mapping
    /// is passed to the normalizer.
    pub fn from_table(table: &TableMap) -> Self {
        let name = table
            .get("name")
            .and_then(|v| v.as_string().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();
        let perks = table
            .get("perks")
            .and_then(|v| v.as_object().ok())
            .and_then(|o| o.as_array().ok())
            .map(|list| normalize_perks(list, None))
            .unwrap_or_default();
        Official { name, perks }
    }

    /// An official from just a name, for the `minister = "Paul"` shorthand.
    pub fn from_name(name: &str) -> Self {
        Official {
            name: name.to_string(),
            perks: Vec::new(),
        }
    }
}
