use std::{collections::HashMap, sync::OnceLock};

use log::debug;
use regex::Regex;

use super::super::parser::{TableArray, TableValue};

/// The perk identifier that embeds a per-election event name.
const EXTRA_EVENT: &str = "ExtraEvent";
/// The parameter that carries the event name for [EXTRA_EVENT] tokens.
pub const EXTRA_EVENT_PARAM: &str = "extra_event";

/// A well formed perk token: a namespace, a dot, an identifier.
fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\.([A-Za-z0-9_]+)$").unwrap()
    })
}

/// Collapses every run of non-alphanumeric characters in an event name to a
/// single underscore and trims the ends, so that the result can be embedded
/// in a perk identifier. `Sweet Tooth!` becomes `Sweet_Tooth`.
fn sanitize_event(event: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let pattern = NON_ALNUM.get_or_init(|| Regex::new(r"[^0-9A-Za-z]+").unwrap());
    pattern
        .replace_all(event, "_")
        .trim_matches('_')
        .to_string()
}

/// Normalize one perk list into plain tokens.
///
/// Tokens of the `Namespace.Identifier` shape are re-emitted as such, with
/// the [EXTRA_EVENT] identifier picking up the sanitized event name from the
/// parameter mapping when one is present. Anything else passes through
/// verbatim; an empty or absent list yields an empty sequence, never an
/// error.
pub fn normalize_perks(
    list: &TableArray,
    params: Option<&HashMap<String, String>>,
) -> Vec<String> {
    let mut perks = Vec::with_capacity(list.len());
    for value in list {
        let token = match value {
            TableValue::String(s) => s.trim().to_string(),
            TableValue::Integer(i) => i.to_string(),
            TableValue::Object(_) => {
                debug!("ignoring nested table in a perk list");
                continue;
            }
        };
        if token.is_empty() {
            continue;
        }
        if let Some(captures) = token_pattern().captures(&token) {
            let namespace = &captures[1];
            let identifier = &captures[2];
            match params.and_then(|p| p.get(EXTRA_EVENT_PARAM)) {
                Some(event) if identifier == EXTRA_EVENT => {
                    perks.push(format!(
                        "{}.{}{}",
                        namespace,
                        EXTRA_EVENT,
                        sanitize_event(event)
                    ));
                }
                _ => perks.push(format!("{}.{}", namespace, identifier)),
            }
        } else {
            // not expected in well formed input, keep it rather than lose it
            perks.push(token);
        }
    }
    perks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(tokens: &[&str]) -> TableArray {
        tokens
            .iter()
            .map(|t| TableValue::from_scalar(t, false))
            .collect()
    }

    fn event_params(event: &str) -> HashMap<String, String> {
        HashMap::from([(EXTRA_EVENT_PARAM.to_string(), event.to_string())])
    }

    #[test]
    fn test_plain_tokens() {
        let perks = normalize_perks(
            &list(&["Perks.LuckOfTheSea", "Perks.FishingFestival"]),
            None,
        );
        assert_eq!(perks, ["Perks.LuckOfTheSea", "Perks.FishingFestival"]);
    }

    #[test]
    fn test_empty_list() {
        assert!(normalize_perks(&TableArray::new(), None).is_empty());
    }

    #[test]
    fn test_extra_event_substitution() {
        let params = event_params("Sweet Tooth!");
        let perks = normalize_perks(&list(&["Perks.ExtraEvent"]), Some(&params));
        assert_eq!(perks, ["Perks.ExtraEventSweet_Tooth"]);
    }

    #[test]
    fn test_extra_event_without_param() {
        let perks = normalize_perks(&list(&["Perks.ExtraEvent"]), None);
        assert_eq!(perks, ["Perks.ExtraEvent"]);
        let empty = HashMap::new();
        let perks = normalize_perks(&list(&["Perks.ExtraEvent"]), Some(&empty));
        assert_eq!(perks, ["Perks.ExtraEvent"]);
    }

    #[test]
    fn test_unrecognized_token_passes_through() {
        let perks = normalize_perks(&list(&["not-a-perk"]), None);
        assert_eq!(perks, ["not-a-perk"]);
    }

    #[test]
    fn test_sanitize_event() {
        assert_eq!(sanitize_event("Sweet Tooth!"), "Sweet_Tooth");
        assert_eq!(sanitize_event("  Fishing -- Festival  "), "Fishing_Festival");
        assert_eq!(sanitize_event("already_clean"), "already_clean");
        assert_eq!(sanitize_event("!!!"), "");
    }

    #[test]
    fn test_namespace_preserved() {
        let params = event_params("Night Market");
        let perks = normalize_perks(&list(&["Bonus.ExtraEvent"]), Some(&params));
        assert_eq!(perks, ["Bonus.ExtraEventNight_Market"]);
    }
}
