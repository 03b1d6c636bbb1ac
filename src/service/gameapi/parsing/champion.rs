use std::collections::HashMap;

use json::{object::Object, JsonValue};

use crate::model::{
    ability::{AbilityRecord, AbilityVariable},
    champion::{AllChampionData, ChampionDetail, ChampionSummary},
    ids::ChampionKey,
};

use super::ParsingError;

/// Parse the full champion document into the sorted index plus per-champion
/// details. The document maps champion keys to champion objects.
pub fn parse_champion_data(json: &JsonValue) -> Result<AllChampionData, ParsingError> {
    if let JsonValue::Object(root) = json {
        if let JsonValue::Object(data) = &root["data"] {
            let mut index = Vec::new();
            let mut details = HashMap::new();

            for (key, champ_entry) in data.iter() {
                if let JsonValue::Object(champ_obj) = champ_entry {
                    let key = ChampionKey::from(key);
                    index.push(parse_summary_obj(champ_obj, key.clone())?);
                    details.insert(key.clone(), parse_detail_obj(champ_obj, key)?);
                } else {
                    return Err(ParsingError::InvalidType("champ entry".into()));
                }
            }

            index.sort_by(|a, b| a.key.cmp(&b.key));
            return Ok(AllChampionData { index, details });
        }
        return Err(ParsingError::InvalidType("data".into()));
    }

    Err(ParsingError::InvalidType("root".into()))
}

fn parse_summary_obj(obj: &Object, key: ChampionKey) -> Result<ChampionSummary, ParsingError> {
    let id = obj["key"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .or_else(|| obj["key"].as_i32())
        .ok_or(ParsingError::InvalidType("key".into()))?;
    let name = obj["name"].as_str().ok_or(ParsingError::InvalidType("name".into()))?;
    let title = obj["title"].as_str().ok_or(ParsingError::InvalidType("title".into()))?;
    let image_full = obj["image"]["full"]
        .as_str()
        .ok_or(ParsingError::InvalidType("image/full".into()))?;

    Ok(ChampionSummary {
        key,
        id,
        name: name.to_string(),
        title: title.to_string(),
        image_full: image_full.to_string(),
    })
}

fn parse_detail_obj(obj: &Object, key: ChampionKey) -> Result<ChampionDetail, ParsingError> {
    let name = obj["name"].as_str().ok_or(ParsingError::InvalidType("name".into()))?;
    let title = obj["title"].as_str().ok_or(ParsingError::InvalidType("title".into()))?;
    let lore = obj["lore"].as_str().or_else(|| obj["blurb"].as_str()).unwrap_or("");

    let passive = match &obj["passive"] {
        JsonValue::Object(passive_obj) => parse_passive_obj(passive_obj)?,
        _ => return Err(ParsingError::InvalidType("passive".into())),
    };

    let mut spells = Vec::new();
    if let JsonValue::Array(spell_array) = &obj["spells"] {
        for spell_entry in spell_array {
            if let JsonValue::Object(spell_obj) = spell_entry {
                spells.push(parse_spell_obj(spell_obj)?);
            } else {
                return Err(ParsingError::InvalidType("spell entry".into()));
            }
        }
    } else {
        return Err(ParsingError::InvalidType("spells".into()));
    }

    Ok(ChampionDetail {
        key,
        name: name.to_string(),
        title: title.to_string(),
        lore: lore.to_string(),
        passive,
        spells,
    })
}

// Passives carry only a description; no tooltip, effects or variables.
fn parse_passive_obj(obj: &Object) -> Result<AbilityRecord, ParsingError> {
    let name = obj["name"].as_str().ok_or(ParsingError::InvalidType("passive/name".into()))?;
    let description = obj["description"]
        .as_str()
        .ok_or(ParsingError::InvalidType("passive/description".into()))?;
    let image_full = obj["image"]["full"]
        .as_str()
        .ok_or(ParsingError::InvalidType("passive/image".into()))?;

    Ok(AbilityRecord {
        name: name.to_string(),
        description: description.to_string(),
        tooltip: None,
        effect_values: Vec::new(),
        variables: None,
        image_full: image_full.to_string(),
    })
}

fn parse_spell_obj(obj: &Object) -> Result<AbilityRecord, ParsingError> {
    let name = obj["name"].as_str().ok_or(ParsingError::InvalidType("spell/name".into()))?;
    let description = obj["description"]
        .as_str()
        .ok_or(ParsingError::InvalidType("spell/description".into()))?;
    let tooltip = obj["tooltip"].as_str().map(|t| t.to_string());
    let image_full = obj["image"]["full"]
        .as_str()
        .ok_or(ParsingError::InvalidType("spell/image".into()))?;

    // effectBurn ships a null at index 0 so that {{ eN }} digits index the
    // array directly; the null becomes an empty string.
    let mut effect_values = Vec::new();
    if let JsonValue::Array(effect_array) = &obj["effectBurn"] {
        for effect_entry in effect_array {
            effect_values.push(effect_entry.as_str().unwrap_or("").to_string());
        }
    }

    let variables = match &obj["vars"] {
        JsonValue::Array(var_array) => {
            let mut variables = Vec::new();
            for var_entry in var_array {
                if let JsonValue::Object(var_obj) = var_entry {
                    variables.push(parse_var_obj(var_obj)?);
                } else {
                    return Err(ParsingError::InvalidType("var entry".into()));
                }
            }
            Some(variables)
        }
        _ => None,
    };

    Ok(AbilityRecord {
        name: name.to_string(),
        description: description.to_string(),
        tooltip,
        effect_values,
        variables,
        image_full: image_full.to_string(),
    })
}

fn parse_var_obj(obj: &Object) -> Result<AbilityVariable, ParsingError> {
    let key = obj["key"].as_str().ok_or(ParsingError::InvalidType("var/key".into()))?;

    // The coefficient is a single number for flat scalings and an array for
    // per-rank ones.
    let coefficients = match &obj["coeff"] {
        JsonValue::Array(coeff_array) => coeff_array.iter().filter_map(|c| c.as_f64()).collect(),
        coeff => match coeff.as_f64() {
            Some(value) => vec![value],
            None => return Err(ParsingError::InvalidType("var/coeff".into())),
        },
    };

    Ok(AbilityVariable {
        key: key.to_string(),
        coefficients,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> JsonValue {
        json::parse(
            r#"{
              "type": "champion",
              "version": "14.14.1",
              "data": {
                "Zed": {
                  "id": "Zed", "key": "238", "name": "Zed", "title": "the Master of Shadows",
                  "lore": "Utterly ruthless...",
                  "image": { "full": "Zed.png" },
                  "passive": {
                    "name": "Contempt for the Weak",
                    "description": "Zed's basic attacks deal bonus damage.",
                    "image": { "full": "ZedP.png" }
                  },
                  "spells": [
                    {
                      "id": "ZedQ", "name": "Razor Shuriken",
                      "description": "Throws a shuriken.",
                      "tooltip": "Deals {{ e1 }} (+{{ a1 }}) damage",
                      "effectBurn": [null, "80/115/150"],
                      "vars": [{ "link": "bonusattackdamage", "coeff": 1.1, "key": "a1" }],
                      "image": { "full": "ZedQ.png" }
                    }
                  ]
                },
                "Aatrox": {
                  "id": "Aatrox", "key": "266", "name": "Aatrox", "title": "the Darkin Blade",
                  "lore": "Once honored...",
                  "image": { "full": "Aatrox.png" },
                  "passive": {
                    "name": "Deathbringer Stance",
                    "description": "Periodically empowered.",
                    "image": { "full": "AatroxP.png" }
                  },
                  "spells": [
                    {
                      "id": "AatroxQ", "name": "The Darkin Blade",
                      "description": "Swings his greatsword.",
                      "tooltip": "Deals {{ e1 }} damage",
                      "effectBurn": [null, "10/30/50"],
                      "vars": [{ "link": "spelldamage", "coeff": [0.6, 0.7], "key": "a1" }],
                      "image": { "full": "AatroxQ.png" }
                    }
                  ]
                }
              }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn index_is_sorted_by_key() {
        let data = parse_champion_data(&fixture()).unwrap();
        let keys: Vec<_> = data.index.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["Aatrox", "Zed"]);
    }

    #[test]
    fn summary_fields_are_extracted() {
        let data = parse_champion_data(&fixture()).unwrap();
        let zed = data.index.iter().find(|c| c.name == "Zed").unwrap();
        assert_eq!(zed.id, 238);
        assert_eq!(zed.title, "the Master of Shadows");
        assert_eq!(zed.image_full, "Zed.png");
    }

    #[test]
    fn detail_has_passive_and_spells() {
        let data = parse_champion_data(&fixture()).unwrap();
        let zed = &data.details[&ChampionKey::from("Zed")];
        assert_eq!(zed.passive.name, "Contempt for the Weak");
        assert!(zed.passive.tooltip.is_none());
        assert_eq!(zed.spells.len(), 1);
        assert_eq!(zed.spells[0].name, "Razor Shuriken");
    }

    #[test]
    fn effect_burn_null_becomes_empty_string() {
        let data = parse_champion_data(&fixture()).unwrap();
        let q = &data.details[&ChampionKey::from("Zed")].spells[0];
        assert_eq!(q.effect_values, vec!["".to_string(), "80/115/150".to_string()]);
    }

    #[test]
    fn scalar_and_array_coefficients_both_parse() {
        let data = parse_champion_data(&fixture()).unwrap();

        let zed_q = &data.details[&ChampionKey::from("Zed")].spells[0];
        let zed_vars = zed_q.variables.as_ref().unwrap();
        assert_eq!(zed_vars[0].coefficients, vec![1.1]);

        let aatrox_q = &data.details[&ChampionKey::from("Aatrox")].spells[0];
        let aatrox_vars = aatrox_q.variables.as_ref().unwrap();
        assert_eq!(aatrox_vars[0].coefficients, vec![0.6, 0.7]);
    }

    #[test]
    fn rejects_non_object_root() {
        let doc = json::parse("[1, 2, 3]").unwrap();
        assert!(parse_champion_data(&doc).is_err());
    }
}
