use serde::Deserialize;

use crate::error::ValidationError;
use crate::{AnalysisInput, Reference};

const DEFAULT_POSTING_DAYS: f64 = 4.0;

/// A form value that may arrive as a number, a string, or a bool.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl Scalar {
    /// Numeric reading of the value. Blank text is 0, anything unparsable is NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            Scalar::Number(value) => *value,
            Scalar::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
            Scalar::Flag(flag) => {
                if *flag {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            Scalar::Number(value) => value.to_string(),
            Scalar::Text(text) => text.clone(),
            Scalar::Flag(flag) => flag.to_string(),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Scalar::Number(value) => *value == 0.0 || value.is_nan(),
            Scalar::Text(text) => text.is_empty(),
            Scalar::Flag(flag) => !flag,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HashtagList {
    List(Vec<Option<Scalar>>),
    Text(String),
}

impl HashtagList {
    pub fn into_tags(self) -> Vec<String> {
        match self {
            HashtagList::List(items) => items
                .into_iter()
                .flatten()
                .map(|item| item.to_text())
                .collect(),
            HashtagList::Text(text) => text.split(',').map(|tag| tag.to_string()).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiReference {
    pub topic: Option<Scalar>,
    pub hook_type: Option<Scalar>,
    pub format: Option<Scalar>,
    pub duration_sec: Option<Scalar>,
    pub views: Option<Scalar>,
    pub likes: Option<Scalar>,
    pub comments: Option<Scalar>,
    pub shares: Option<Scalar>,
    pub watch_time_pct: Option<Scalar>,
    pub hashtags: Option<HashtagList>,
}

impl ApiReference {
    pub fn into_reference(self) -> Reference {
        Reference {
            topic: self.topic.map(|value| value.to_text()),
            hook_type: self.hook_type.map(|value| value.to_text()),
            format: self.format.map(|value| value.to_text()),
            duration_sec: number_or_zero(self.duration_sec.as_ref()),
            views: count(self.views.as_ref()),
            likes: count(self.likes.as_ref()),
            comments: count(self.comments.as_ref()),
            shares: count(self.shares.as_ref()),
            watch_time_pct: number_or_zero(self.watch_time_pct.as_ref()),
            hashtags: self.hashtags.map(HashtagList::into_tags).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAnalysisRequest {
    pub niche: Option<Scalar>,
    pub audience: Option<Scalar>,
    pub goal: Option<Scalar>,
    pub posting_days_per_week: Option<Scalar>,
    pub daily_time_budget_hours: Option<Scalar>,
    pub platforms: Option<Vec<Option<Scalar>>>,
    pub references: Option<Vec<ApiReference>>,
}

/// Decodes a raw request body. A blank body reads as an empty object.
pub fn parse_request_body(body: &[u8]) -> Result<ApiAnalysisRequest, ValidationError> {
    let is_blank = body.iter().all(|byte| byte.is_ascii_whitespace());
    let value: serde_json::Value = if is_blank {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_slice(body).map_err(|_| ValidationError::InvalidJson)?
    };
    ApiAnalysisRequest::from_value(value)
}

impl ApiAnalysisRequest {
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        if !value.is_object() {
            return Err(ValidationError::NotAnObject);
        }
        serde_json::from_value(value).map_err(|err| ValidationError::Malformed(err.to_string()))
    }

    pub fn into_input(self) -> Result<AnalysisInput, ValidationError> {
        let platforms: Vec<String> = self
            .platforms
            .unwrap_or_default()
            .into_iter()
            .map(|platform| platform.map(|value| value.to_text()).unwrap_or_default())
            .collect();
        if platforms.is_empty() {
            return Err(ValidationError::MissingPlatforms);
        }

        let posting_days_per_week = match self.posting_days_per_week.as_ref() {
            Some(value) if !value.is_blank() => value.to_number(),
            _ => DEFAULT_POSTING_DAYS,
        };
        if !posting_days_per_week.is_finite() || posting_days_per_week < 1.0 {
            return Err(ValidationError::InvalidPostingDays);
        }

        let mut input = AnalysisInput {
            niche: text_or_empty(self.niche.as_ref()),
            audience: text_or_empty(self.audience.as_ref()),
            posting_days_per_week,
            platforms,
            references: self
                .references
                .unwrap_or_default()
                .into_iter()
                .map(ApiReference::into_reference)
                .collect(),
            ..AnalysisInput::default()
        };
        if let Some(goal) = self.goal.as_ref().map(Scalar::to_text) {
            input.goal = goal;
        }
        if let Some(hours) = self.daily_time_budget_hours.as_ref() {
            input.daily_time_budget_hours = finite_or_zero(hours.to_number());
        }

        Ok(input)
    }
}

fn text_or_empty(value: Option<&Scalar>) -> String {
    value.map(Scalar::to_text).unwrap_or_default()
}

fn number_or_zero(value: Option<&Scalar>) -> f64 {
    value.map(|value| finite_or_zero(value.to_number())).unwrap_or(0.0)
}

fn count(value: Option<&Scalar>) -> u64 {
    // `as` saturates, so negatives land on 0.
    number_or_zero(value).max(0.0) as u64
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: serde_json::Value) -> Result<AnalysisInput, ValidationError> {
        ApiAnalysisRequest::from_value(value)?.into_input()
    }

    #[test]
    fn text_scalars_coerce_like_form_fields() {
        assert_eq!(Scalar::Text(" 12 ".to_string()).to_number(), 12.0);
        assert_eq!(Scalar::Text(String::new()).to_number(), 0.0);
        assert!(Scalar::Text("lots".to_string()).to_number().is_nan());
        assert_eq!(Scalar::Number(182000.0).to_text(), "182000");
    }

    #[test]
    fn posting_days_default_to_four_when_blank() {
        let missing = request(json!({ "platforms": ["tiktok"] })).expect("valid");
        assert_eq!(missing.posting_days_per_week, 4.0);

        let zero = request(json!({ "platforms": ["tiktok"], "postingDaysPerWeek": 0 })).expect("valid");
        assert_eq!(zero.posting_days_per_week, 4.0);

        let text = request(json!({ "platforms": ["tiktok"], "postingDaysPerWeek": "5" })).expect("valid");
        assert_eq!(text.posting_days_per_week, 5.0);
    }

    #[test]
    fn posting_days_below_one_or_unparsable_are_rejected() {
        let fraction = request(json!({ "platforms": ["tiktok"], "postingDaysPerWeek": 0.5 }));
        assert_eq!(fraction.unwrap_err(), ValidationError::InvalidPostingDays);

        let words = request(json!({ "platforms": ["tiktok"], "postingDaysPerWeek": "often" }));
        assert_eq!(words.unwrap_err(), ValidationError::InvalidPostingDays);
    }

    #[test]
    fn platforms_are_required() {
        assert_eq!(request(json!({})).unwrap_err(), ValidationError::MissingPlatforms);
        assert_eq!(
            request(json!({ "platforms": [] })).unwrap_err(),
            ValidationError::MissingPlatforms
        );
    }

    #[test]
    fn body_must_be_a_json_object() {
        assert_eq!(
            parse_request_body(b"[1, 2]").unwrap_err(),
            ValidationError::NotAnObject
        );
        assert_eq!(
            parse_request_body(b"{not json").unwrap_err(),
            ValidationError::InvalidJson
        );
        let blank = parse_request_body(b"  \n").expect("blank body parses");
        assert_eq!(blank.into_input().unwrap_err(), ValidationError::MissingPlatforms);
    }

    #[test]
    fn hashtags_accept_list_or_comma_text() {
        let input = request(json!({
            "platforms": ["instagram"],
            "references": [
                { "topic": "meal prep", "hashtags": "#MealPrep, #highprotein,," },
                { "topic": "cardio", "hashtags": ["#Fitness", " #cardio "] }
            ]
        }))
        .expect("valid");

        assert_eq!(input.references[0].hashtag_labels(), vec!["#mealprep", "#highprotein"]);
        assert_eq!(input.references[1].hashtag_labels(), vec!["#fitness", "#cardio"]);
    }

    #[test]
    fn reference_counts_clamp_and_default() {
        let input = request(json!({
            "platforms": ["tiktok"],
            "references": [{ "views": -50, "likes": "12", "watchTimePct": "n/a" }]
        }))
        .expect("valid");

        let reference = &input.references[0];
        assert_eq!(reference.views, 0);
        assert_eq!(reference.likes, 12);
        assert_eq!(reference.comments, 0);
        assert_eq!(reference.watch_time_pct, 0.0);
        assert_eq!(reference.duration_sec, 0.0);
    }
}
