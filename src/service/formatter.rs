use std::fmt;

use crate::model::{
    ability::{AbilityRecord, AbilityVariable},
    text::{StyledRun, TextStyle},
};

/// Formats an ability's tagged description text into styled runs.
///
/// The API delivers ability text as a semi-structured markup string: HTML-like
/// tags carrying style directives, plus `{{ eN }}` / `{{ XY }}` placeholder
/// tokens referencing the ability's effect values and scaling variables. The
/// string is split on tag boundaries, each tag is classified, placeholders are
/// substituted (tooltip text only), and styles are propagated across the empty
/// segments produced by nested tags. Pure function, no state between calls.
pub fn format_ability(record: &AbilityRecord) -> Result<Vec<StyledRun>, FormatError> {
    // Prefer the tooltip (more detailed info) when present; only tooltip
    // text is eligible for placeholder substitution.
    let (input, substitute) = match &record.tooltip {
        Some(tooltip) => (tooltip.as_str(), true),
        None if !record.description.is_empty() => (record.description.as_str(), false),
        None => return Err(FormatError::MissingText(record.name.clone())),
    };

    let mut segments = split_segments(input);

    if substitute {
        for segment in &mut segments {
            segment.text = insert_effects(&segment.text, record);
        }
    }

    Ok(apply_styles(segments))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HtmlTag {
    /// Untagged leading text, or an unrecognized tag.
    None,
    /// Closing tags and tags that carry no meaning; content is kept.
    Ignore,
    Italics,
    Underline,
    Break,
    Font,
    /// Marks a region whose content must be discarded entirely.
    Remove,
}

struct Segment {
    text: String,
    tag: HtmlTag,
    font_color: Option<String>,
}

/// Split the raw text on every `<` and classify the tag opening each piece.
/// The piece before the first `<` is never tagged.
fn split_segments(input: &str) -> Vec<Segment> {
    input
        .split('<')
        .enumerate()
        .map(|(i, piece)| {
            let (tag, font_color) = if i == 0 || piece.is_empty() {
                (HtmlTag::None, None)
            } else {
                classify_tag(piece)
            };

            // Cut out the remaining html tag; pieces without a `>` are
            // left as they are.
            let text = match piece.find('>') {
                Some(end) => piece[end + 1..].to_string(),
                None => piece.to_string(),
            };

            Segment { text, tag, font_color }
        })
        .collect()
}

/// Classify a piece by its tag prefix. The check order matters and is kept
/// exactly as is: a tag merely starting with 'i' or 'u' is taken as italics
/// or underline, and the sized-span check must run before the generic span
/// check. Existing ability data relies on this precedence.
fn classify_tag(piece: &str) -> (HtmlTag, Option<String>) {
    if piece.starts_with('/') {
        (HtmlTag::Ignore, None)
    } else if piece.starts_with('i') {
        (HtmlTag::Italics, None)
    } else if piece.starts_with("mainText") {
        (HtmlTag::Ignore, None)
    } else if piece.starts_with('u') {
        (HtmlTag::Underline, None)
    } else if piece.starts_with("br") {
        (HtmlTag::Break, None)
    } else if piece.starts_with("span class=\"size") {
        (HtmlTag::Remove, None)
    } else if piece.starts_with("span") || piece.starts_with("font") {
        (HtmlTag::Font, extract_font_color(piece))
    } else {
        (HtmlTag::None, None)
    }
}

/// Pull a 6-hex-digit colour out of a span/font tag. Two attribute shapes
/// occur in the data: `class="colorRRGGBB"` and `color='#RRGGBB'`. Malformed
/// tags yield no colour rather than an error.
fn extract_font_color(piece: &str) -> Option<String> {
    let start = match piece.find("\"color") {
        Some(index) => index + 6,
        None => piece.find("='#")? + 3,
    };

    piece
        .get(start..start + 6)
        .map(|hex| format!("#{}", hex))
}

/// Replace `{{ eN }}` and `{{ XY }}` placeholder tokens with values from the
/// ability's effect list and variable table. Unresolvable tokens are removed.
fn insert_effects(text: &str, record: &AbilityRecord) -> String {
    let mut text = text.to_string();

    // Replace placeholders of the form {{ eN }} with the Nth effect value.
    while let Some(index) = text.find("{{ e") {
        let digit = text[index + 4..].chars().next().and_then(|c| c.to_digit(10));
        let replaced = match digit {
            Some(n) => {
                // An out-of-range effect index substitutes the empty string.
                let value = record
                    .effect_values
                    .get(n as usize)
                    .map(String::as_str)
                    .unwrap_or("");
                let token = format!("{{{{ e{} }}}}", n);
                let next = text.replace(&token, value);
                if next != text {
                    Some(next)
                } else {
                    None
                }
            }
            None => None,
        };

        match replaced {
            Some(next) => text = next,
            // Malformed token (no digit, or odd spacing): drop it so the
            // loop always terminates.
            None => text = remove_next_placeholder(index, &text),
        }
    }

    match &record.variables {
        Some(variables) => {
            // Replace placeholders of the form {{ XY }} from the variable
            // table, first coefficient of the first matching key.
            while let Some(index) = text.find("{{ ") {
                text = match text.get(index + 3..index + 5) {
                    Some(key) => match lookup_variable(variables, key) {
                        Some(value) => {
                            let token = format!("{{{{ {} }}}}", key);
                            let next = text.replace(&token, &value);
                            if next != text {
                                next
                            } else {
                                remove_next_placeholder(index, &text)
                            }
                        }
                        None => remove_next_placeholder(index, &text),
                    },
                    None => remove_next_placeholder(index, &text),
                };
            }
        }
        // The variable data is missing entirely, so every remaining
        // placeholder must be removed.
        None => {
            while let Some(index) = text.find("{{ ") {
                text = remove_next_placeholder(index, &text);
            }
        }
    }

    text
}

fn lookup_variable(variables: &[AbilityVariable], key: &str) -> Option<String> {
    variables
        .iter()
        .find(|var| var.key == key)
        .map(|var| var.coefficients.first().copied().unwrap_or(0.0).to_string())
}

/// Delete the token spanning `start` through the first following `}}`
/// inclusive. An unterminated token is removed to the end of the segment.
fn remove_next_placeholder(start: usize, text: &str) -> String {
    match text[start..].find("}}") {
        Some(offset) => format!("{}{}", &text[..start], &text[start + offset + 2..]),
        None => text[..start].to_string(),
    }
}

/// Assign each segment its effective style, carrying the style of empty
/// segments (nested tags) forward onto the next non-empty run.
fn apply_styles(segments: Vec<Segment>) -> Vec<StyledRun> {
    let mut runs = Vec::with_capacity(segments.len());
    let mut pending_style = TextStyle::default();

    for segment in segments {
        let mut text = segment.text;
        match segment.tag {
            HtmlTag::Break => text.insert(0, '\n'),
            HtmlTag::Remove => text.clear(),
            _ => {}
        }

        let own_style = TextStyle {
            italic: segment.tag == HtmlTag::Italics,
            underline: segment.tag == HtmlTag::Underline,
            color: match segment.tag {
                HtmlTag::Font => segment.font_color,
                _ => None,
            },
        };

        // Own attributes win over the carried ones on conflicts.
        let effective = own_style.merge_over(pending_style);

        if text.is_empty() {
            // Nested tag: defer the style to the next non-empty run and
            // leave this one unstyled.
            pending_style = effective;
            runs.push(StyledRun {
                text,
                style: TextStyle::default(),
            });
        } else {
            runs.push(StyledRun { text, style: effective });
            pending_style = TextStyle::default();
        }
    }

    runs
}

#[derive(Debug)]
pub enum FormatError {
    /// The record supplied neither a tooltip nor a description.
    MissingText(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormatError::MissingText(name) => {
                write!(f, "Ability '{}' has neither tooltip nor description text.", name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_description(description: &str) -> AbilityRecord {
        AbilityRecord {
            name: "Test Ability".to_string(),
            description: description.to_string(),
            tooltip: None,
            effect_values: Vec::new(),
            variables: None,
            image_full: "Test.png".to_string(),
        }
    }

    fn record_with_tooltip(tooltip: &str, effects: &[&str], variables: Option<Vec<AbilityVariable>>) -> AbilityRecord {
        AbilityRecord {
            name: "Test Ability".to_string(),
            description: "fallback".to_string(),
            tooltip: Some(tooltip.to_string()),
            effect_values: effects.iter().map(|e| e.to_string()).collect(),
            variables,
            image_full: "Test.png".to_string(),
        }
    }

    fn texts(runs: &[StyledRun]) -> Vec<&str> {
        runs.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn plain_text_is_a_single_unstyled_run() {
        let runs = format_ability(&record_with_description("deals heavy damage")).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "deals heavy damage");
        assert!(runs[0].style.is_empty());
    }

    #[test]
    fn italics_tag_splits_into_three_runs() {
        let runs = format_ability(&record_with_description("plain<i>italic</i>plain")).unwrap();
        assert_eq!(texts(&runs), vec!["plain", "italic", "plain"]);
        assert!(runs[0].style.is_empty());
        assert!(runs[1].style.italic);
        assert!(!runs[1].style.underline);
        assert!(runs[2].style.is_empty());
    }

    #[test]
    fn nested_tags_accumulate_onto_first_nonempty_run() {
        let runs = format_ability(&record_with_description("<i><u>x</u></i>")).unwrap();
        let styled: Vec<_> = runs.iter().filter(|r| !r.style.is_empty()).collect();
        assert_eq!(styled.len(), 1);
        assert_eq!(styled[0].text, "x");
        assert!(styled[0].style.italic);
        assert!(styled[0].style.underline);
    }

    #[test]
    fn empty_runs_carry_no_style() {
        let runs = format_ability(&record_with_description("<i><u>x</u></i>")).unwrap();
        for run in runs.iter().filter(|r| r.text.is_empty()) {
            assert!(run.style.is_empty());
        }
    }

    #[test]
    fn break_tag_prepends_newline() {
        let runs = format_ability(&record_with_description("first<br>second")).unwrap();
        assert_eq!(texts(&runs), vec!["first", "\nsecond"]);
    }

    #[test]
    fn sized_span_region_is_stripped() {
        let runs = format_ability(&record_with_description("<span class=\"size:10\">hidden</span>")).unwrap();
        assert!(runs.iter().all(|r| !r.text.contains("hidden")));
    }

    #[test]
    fn font_color_from_quoted_class_attribute() {
        let runs = format_ability(&record_with_description("<span class=\"colorFF9900\">gold</span>")).unwrap();
        let styled = runs.iter().find(|r| r.text == "gold").unwrap();
        assert_eq!(styled.style.color.as_deref(), Some("#FF9900"));
    }

    #[test]
    fn font_color_from_hash_attribute() {
        let runs = format_ability(&record_with_description("<font color='#AABBCC'>x</font>")).unwrap();
        let styled = runs.iter().find(|r| r.text == "x").unwrap();
        assert_eq!(styled.style.color.as_deref(), Some("#AABBCC"));
    }

    #[test]
    fn font_tag_without_color_attribute_degrades_to_no_color() {
        let runs = format_ability(&record_with_description("<font>x</font>")).unwrap();
        let run = runs.iter().find(|r| r.text == "x").unwrap();
        assert_eq!(run.style.color, None);
    }

    #[test]
    fn truncated_color_attribute_degrades_to_no_color() {
        let runs = format_ability(&record_with_description("<font color='#AB'>x</font>")).unwrap();
        let run = runs.iter().find(|r| r.text == "x").unwrap();
        assert_eq!(run.style.color, None);
    }

    #[test]
    fn tag_without_closing_bracket_is_left_unchanged() {
        let runs = format_ability(&record_with_description("before<i oops")).unwrap();
        assert_eq!(texts(&runs), vec!["before", "i oops"]);
    }

    // A tag whose name merely starts with 'i' classifies as italics. The
    // precedence is part of the format and must not be "fixed".
    #[test]
    fn tag_prefix_precedence_is_order_sensitive() {
        let runs = format_ability(&record_with_description("<important>x</important>")).unwrap();
        let run = runs.iter().find(|r| r.text == "x").unwrap();
        assert!(run.style.italic);
    }

    #[test]
    fn effect_placeholder_is_substituted_in_tooltip() {
        let record = record_with_tooltip("deals {{ e0 }} damage", &["10", "20"], None);
        let runs = format_ability(&record).unwrap();
        assert_eq!(runs[0].text, "deals 10 damage");
    }

    #[test]
    fn repeated_effect_placeholder_substitutes_every_occurrence() {
        let record = record_with_tooltip("{{ e1 }} now, {{ e1 }} later", &["", "20"], None);
        let runs = format_ability(&record).unwrap();
        assert_eq!(runs[0].text, "20 now, 20 later");
    }

    #[test]
    fn description_is_never_placeholder_expanded() {
        let mut record = record_with_description("deals {{ e0 }} damage");
        record.effect_values = vec!["10".to_string()];
        let runs = format_ability(&record).unwrap();
        assert_eq!(runs[0].text, "deals {{ e0 }} damage");
    }

    #[test]
    fn out_of_range_effect_index_substitutes_empty() {
        let record = record_with_tooltip("deals {{ e7 }} damage", &["10"], None);
        let runs = format_ability(&record).unwrap();
        assert_eq!(runs[0].text, "deals  damage");
    }

    #[test]
    fn variable_placeholder_uses_first_coefficient() {
        let variables = vec![AbilityVariable {
            key: "a1".to_string(),
            coefficients: vec![0.7, 1.4],
        }];
        let record = record_with_tooltip("plus {{ a1 }} AP", &[], Some(variables));
        let runs = format_ability(&record).unwrap();
        assert_eq!(runs[0].text, "plus 0.7 AP");
    }

    #[test]
    fn unknown_variable_key_removes_the_token() {
        let record = record_with_tooltip("scales with {{ aa }} ratio", &[], Some(Vec::new()));
        let runs = format_ability(&record).unwrap();
        assert_eq!(runs[0].text, "scales with  ratio");
    }

    #[test]
    fn missing_variable_table_removes_every_token() {
        let record = record_with_tooltip("{{ a1 }} and {{ f1 }} gone", &[], None);
        let runs = format_ability(&record).unwrap();
        assert_eq!(runs[0].text, " and  gone");
    }

    #[test]
    fn unterminated_token_is_removed_to_end_of_segment() {
        let record = record_with_tooltip("text {{ a1 never closes", &[], None);
        let runs = format_ability(&record).unwrap();
        assert_eq!(runs[0].text, "text ");
    }

    #[test]
    fn substitution_applies_per_segment_across_tags() {
        let record = record_with_tooltip("hits {{ e1 }}<br>heals {{ e2 }}", &["", "30", "40"], None);
        let runs = format_ability(&record).unwrap();
        assert_eq!(texts(&runs), vec!["hits 30", "\nheals 40"]);
    }

    #[test]
    fn style_propagation_is_a_noop_on_resolved_segments() {
        let segments = vec![
            Segment {
                text: "one".to_string(),
                tag: HtmlTag::None,
                font_color: None,
            },
            Segment {
                text: "two".to_string(),
                tag: HtmlTag::None,
                font_color: None,
            },
        ];
        let runs = apply_styles(segments);
        assert_eq!(texts(&runs), vec!["one", "two"]);
        assert!(runs.iter().all(|r| r.style.is_empty()));
    }

    #[test]
    fn run_count_matches_segment_count() {
        let runs = format_ability(&record_with_description("a<i>b</i>c<br>d")).unwrap();
        // "a", "i>b", "/i>c", "br>d" after splitting on '<'.
        assert_eq!(runs.len(), 4);
    }

    #[test]
    fn missing_text_is_an_error() {
        let record = record_with_description("");
        match format_ability(&record) {
            Err(FormatError::MissingText(name)) => assert_eq!(name, "Test Ability"),
            other => panic!("expected MissingText, got {:?}", other),
        }
    }

    #[test]
    fn mixed_tooltip_formats_like_live_data() {
        let variables = vec![AbilityVariable {
            key: "a1".to_string(),
            coefficients: vec![0.6],
        }];
        let record = record_with_tooltip(
            "<mainText>Deals <span class=\"colorFF8C00\">{{ e1 }}</span> damage \
             (+{{ a1 }}).<br>Unknown {{ zz }} scaling.</mainText>",
            &["", "80/120/160"],
            Some(variables),
        );
        let runs = format_ability(&record).unwrap();
        let joined: String = runs.iter().map(|r| r.text.as_str()).collect::<Vec<_>>().join("");
        assert_eq!(joined, "Deals 80/120/160 damage (+0.6).\nUnknown  scaling.");

        let colored = runs.iter().find(|r| r.text == "80/120/160").unwrap();
        assert_eq!(colored.style.color.as_deref(), Some("#FF8C00"));
    }
}
