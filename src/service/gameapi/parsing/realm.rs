use json::JsonValue;

use super::ParsingError;

/// CDN location and current data version, from the realms endpoint.
#[derive(Debug, Clone)]
pub struct Realm {
    pub cdn: String,
    pub version: String,
}

pub fn parse_realm(json: &JsonValue) -> Result<Realm, ParsingError> {
    if let JsonValue::Object(obj) = json {
        let cdn = obj["cdn"].as_str().ok_or(ParsingError::InvalidType("cdn".into()))?;
        let version = obj["v"].as_str().ok_or(ParsingError::InvalidType("v".into()))?;

        return Ok(Realm {
            cdn: cdn.to_string(),
            version: version.to_string(),
        });
    }

    Err(ParsingError::InvalidType("root".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cdn_and_version() {
        let doc = json::parse(
            r#"{ "n": {"champion": "14.14.1"}, "v": "14.14.1",
                 "cdn": "https://ddragon.leagueoflegends.com/cdn", "l": "en_GB" }"#,
        )
        .unwrap();

        let realm = parse_realm(&doc).unwrap();
        assert_eq!(realm.cdn, "https://ddragon.leagueoflegends.com/cdn");
        assert_eq!(realm.version, "14.14.1");
    }

    #[test]
    fn rejects_missing_fields() {
        let doc = json::parse(r#"{ "v": "14.14.1" }"#).unwrap();
        assert!(parse_realm(&doc).is_err());
    }
}
