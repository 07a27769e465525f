//! Parsed user intent, as produced by a query parser.
//!
//! The parser emits loosely typed JSON: a field may be missing, `null`, a
//! single value where a list is expected, or a number written as a string.
//! Missing and empty fields are no-ops. Values that cannot be interpreted
//! are skipped with a warning instead of failing the whole intent.
//!
//! ```json
//! {
//!   "filter": { "genre": ["fantasy"], "year_from": "1950", "has_illustrations": "да" },
//!   "feedback": { "likes": ["The Hobbit"], "dislikes": [] },
//!   "step_back": ""
//! }
//! ```

use crate::error::Result;
use crate::state::PreferenceUpdate;
use data_loader::parser::parse_flag;
use pipeline::FilterCriteria;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// What an intent asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentAction {
    /// Merge filters and feedback into the current preferences
    Layer,
    /// Undo the last layered update
    StepBack,
    /// Discard all preferences
    StartOver,
}

/// A loosely typed scalar from the parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FilterValue {
    /// Non-empty text form
    pub fn as_text(&self) -> Option<String> {
        let text = match self {
            FilterValue::Text(s) => s.trim().to_string(),
            FilterValue::Int(n) => n.to_string(),
            FilterValue::Float(x) => x.to_string(),
            FilterValue::Bool(b) => b.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }

    /// Integer form; accepts integral floats and numeric strings
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FilterValue::Int(n) => Some(*n),
            FilterValue::Float(x) if x.fract() == 0.0 => Some(*x as i64),
            FilterValue::Float(_) | FilterValue::Bool(_) => None,
            FilterValue::Text(s) => {
                let s = s.trim();
                s.strip_suffix(".0").unwrap_or(s).parse().ok()
            }
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FilterValue::Bool(b) => Some(*b),
            FilterValue::Int(1) => Some(true),
            FilterValue::Int(0) => Some(false),
            FilterValue::Text(s) => parse_flag(s),
            _ => None,
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, FilterValue::Text(s) if s.trim().is_empty())
    }
}

/// Filter section of an intent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterIntent {
    #[serde(deserialize_with = "one_or_many")]
    pub author: Vec<FilterValue>,
    #[serde(deserialize_with = "one_or_many")]
    pub publisher: Vec<FilterValue>,
    #[serde(deserialize_with = "one_or_many")]
    pub language: Vec<FilterValue>,
    #[serde(deserialize_with = "one_or_many")]
    pub genre: Vec<FilterValue>,
    #[serde(deserialize_with = "one_or_many")]
    pub age_restriction: Vec<FilterValue>,
    pub year_from: Option<FilterValue>,
    pub year_to: Option<FilterValue>,
    pub pages_from: Option<FilterValue>,
    pub pages_to: Option<FilterValue>,
    pub has_illustrations: Option<FilterValue>,
}

impl FilterIntent {
    /// Typed filter criteria; uninterpretable values are dropped
    pub fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            author: texts(&self.author),
            publisher: texts(&self.publisher),
            language: texts(&self.language),
            genre: texts(&self.genre),
            age_restriction: self
                .age_restriction
                .iter()
                .filter(|v| !v.is_blank())
                .filter_map(|v| number("age_restriction", v))
                .collect(),
            year_from: bound("year_from", &self.year_from),
            year_to: bound("year_to", &self.year_to),
            pages_from: bound("pages_from", &self.pages_from),
            pages_to: bound("pages_to", &self.pages_to),
            has_illustrations: self
                .has_illustrations
                .as_ref()
                .filter(|v| !v.is_blank())
                .and_then(|v| {
                    let flag = v.as_flag();
                    if flag.is_none() {
                        warn!("Ignoring unrecognized has_illustrations value {:?}", v);
                    }
                    flag
                }),
        }
    }
}

/// Likes and dislikes by title
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feedback {
    #[serde(deserialize_with = "titles")]
    pub likes: Vec<String>,
    #[serde(deserialize_with = "titles")]
    pub dislikes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Intent {
    pub filter: FilterIntent,
    pub feedback: Feedback,
    /// `"-1"` steps back one update, `"1"` starts over
    pub step_back: Option<FilterValue>,
    pub reset: bool,
}

impl Intent {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn action(&self) -> IntentAction {
        if self.reset {
            return IntentAction::StartOver;
        }
        match self.step_back.as_ref().and_then(FilterValue::as_i64) {
            Some(-1) => IntentAction::StepBack,
            Some(1) => IntentAction::StartOver,
            _ => IntentAction::Layer,
        }
    }

    /// The filters and feedback to layer
    pub fn to_update(&self) -> PreferenceUpdate {
        PreferenceUpdate {
            filters: self.filter.to_criteria(),
            likes: self.feedback.likes.clone(),
            dislikes: self.feedback.dislikes.clone(),
        }
    }
}

fn texts(values: &[FilterValue]) -> Vec<String> {
    values.iter().filter_map(FilterValue::as_text).collect()
}

fn number<T: TryFrom<i64>>(key: &str, value: &FilterValue) -> Option<T> {
    let parsed = value.as_i64().and_then(|n| T::try_from(n).ok());
    if parsed.is_none() {
        warn!("Ignoring unparsable {} value {:?}", key, value);
    }
    parsed
}

fn bound<T: TryFrom<i64>>(key: &str, value: &Option<FilterValue>) -> Option<T> {
    value
        .as_ref()
        .filter(|v| !v.is_blank())
        .and_then(|v| number(key, v))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<FilterValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany<FilterValue>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    })
}

fn titles<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let titles = match Option::<OneOrMany<String>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(title)) => vec![title],
        Some(OneOrMany::Many(titles)) => titles,
    };
    Ok(titles
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_are_noops() {
        let intent = Intent::from_json("{}").unwrap();
        assert_eq!(intent.action(), IntentAction::Layer);
        assert!(intent.to_update().is_empty());

        let intent = Intent::from_json(
            r#"{"filter": {"genre": null, "year_from": ""}, "feedback": {"likes": null}}"#,
        )
        .unwrap();
        assert!(intent.to_update().is_empty());
    }

    #[test]
    fn test_loose_values() {
        let intent = Intent::from_json(
            r#"{
                "filter": {
                    "genre": "fantasy",
                    "author": ["Tolkien", ""],
                    "age_restriction": ["12", 16],
                    "year_from": "1950",
                    "year_to": 1999.0,
                    "pages_to": "500",
                    "has_illustrations": "Есть"
                },
                "feedback": {"likes": "The Hobbit", "dislikes": ["  ", "Emma"]}
            }"#,
        )
        .unwrap();

        let update = intent.to_update();
        assert_eq!(update.filters.genre, vec!["fantasy"]);
        assert_eq!(update.filters.author, vec!["Tolkien"]);
        assert_eq!(update.filters.age_restriction, vec![12, 16]);
        assert_eq!(update.filters.year_from, Some(1950));
        assert_eq!(update.filters.year_to, Some(1999));
        assert_eq!(update.filters.pages_to, Some(500));
        assert_eq!(update.filters.has_illustrations, Some(true));
        assert_eq!(update.likes, vec!["The Hobbit"]);
        assert_eq!(update.dislikes, vec!["Emma"]);
    }

    #[test]
    fn test_unparsable_values_ignored() {
        let intent = Intent::from_json(
            r#"{"filter": {"year_from": "soon", "pages_from": -10, "has_illustrations": "maybe"}}"#,
        )
        .unwrap();
        let criteria = intent.filter.to_criteria();
        assert_eq!(criteria.year_from, None);
        assert_eq!(criteria.pages_from, None);
        assert_eq!(criteria.has_illustrations, None);
    }

    #[test]
    fn test_step_back_signals() {
        let back = Intent::from_json(r#"{"step_back": "-1"}"#).unwrap();
        assert_eq!(back.action(), IntentAction::StepBack);

        let numeric_back = Intent::from_json(r#"{"step_back": -1}"#).unwrap();
        assert_eq!(numeric_back.action(), IntentAction::StepBack);

        let start_over = Intent::from_json(r#"{"step_back": "1"}"#).unwrap();
        assert_eq!(start_over.action(), IntentAction::StartOver);

        let reset = Intent::from_json(r#"{"reset": true}"#).unwrap();
        assert_eq!(reset.action(), IntentAction::StartOver);

        let blank = Intent::from_json(r#"{"step_back": ""}"#).unwrap();
        assert_eq!(blank.action(), IntentAction::Layer);
    }
}
