//! Parsing of the normalizer's text reply.

use serde_json::Value;

use super::NormalizeError;
use crate::model::AbbreviationMap;

/// Parse a reply that should hold a JSON object of code → description.
///
/// Models like to wrap JSON in a Markdown code fence; a surrounding
/// ```` ``` ```` / ```` ```json ```` fence is stripped first. `null` values
/// become empty descriptions.
pub fn parse_reply(content: &str) -> Result<AbbreviationMap, NormalizeError> {
    let body = strip_code_fence(content.trim());
    if body.is_empty() {
        return Err(NormalizeError::EmptyResponse);
    }

    let value: Value =
        serde_json::from_str(body).map_err(|source| NormalizeError::InvalidJson {
            source,
            content: body.to_string(),
        })?;

    let object = match value {
        Value::Object(object) => object,
        Value::Array(_) => return Err(NormalizeError::NotAnObject("array")),
        Value::String(_) => return Err(NormalizeError::NotAnObject("string")),
        Value::Number(_) => return Err(NormalizeError::NotAnObject("number")),
        Value::Bool(_) => return Err(NormalizeError::NotAnObject("boolean")),
        Value::Null => return Err(NormalizeError::NotAnObject("null")),
    };

    let mut map = AbbreviationMap::new();
    for (code, value) in object {
        let description = match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            _ => return Err(NormalizeError::InvalidEntry(code)),
        };
        map.insert(code, description);
    }
    Ok(map)
}

fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    // Drop the info string (e.g. "json") on the opening line.
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.trim_start_matches("json"),
    };
    rest.trim_end().trim_end_matches("```").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_object() {
        let map = parse_reply(r#"{"HUH": "Heating Unit Heater", "OM": null}"#).unwrap();
        assert_eq!(map["HUH"], "Heating Unit Heater");
        assert_eq!(map["OM"], "");
    }

    #[test]
    fn test_fenced_object() {
        let reply = "```json\n{\"CWS\": \"Cold Water Supply\"}\n```";
        let map = parse_reply(reply).unwrap();
        assert_eq!(map["CWS"], "Cold Water Supply");

        let reply = "```\n{\"CWS\": \"Cold Water Supply\"}\n```\n";
        assert_eq!(parse_reply(reply).unwrap().len(), 1);
    }

    #[test]
    fn test_not_json() {
        let err = parse_reply("Sure! Here is the cleaned map.").unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidJson { .. }));
    }

    #[test]
    fn test_not_an_object() {
        assert!(matches!(
            parse_reply("[\"HUH\"]"),
            Err(NormalizeError::NotAnObject("array"))
        ));
        assert!(matches!(
            parse_reply("\"HUH\""),
            Err(NormalizeError::NotAnObject("string"))
        ));
    }

    #[test]
    fn test_non_text_entry() {
        assert!(matches!(
            parse_reply(r#"{"HUH": 3}"#),
            Err(NormalizeError::InvalidEntry(code)) if code == "HUH"
        ));
    }

    #[test]
    fn test_empty() {
        assert!(matches!(parse_reply("   "), Err(NormalizeError::EmptyResponse)));
        assert!(matches!(parse_reply("```json\n```"), Err(NormalizeError::EmptyResponse)));
    }
}
