use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const MAX_TIMEFRAMES: usize = 5;
pub const MAX_RESULT_LIMIT: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1min")]
    OneMin,
    #[serde(rename = "3min")]
    ThreeMin,
    #[serde(rename = "5min")]
    FiveMin,
    #[serde(rename = "15min")]
    FifteenMin,
    #[serde(rename = "30min")]
    ThirtyMin,
    #[serde(rename = "1hr")]
    OneHour,
    #[serde(rename = "2hr")]
    TwoHour,
    #[serde(rename = "4hr")]
    FourHour,
}

impl Timeframe {
    pub const ALL: [Timeframe; 8] = [
        Timeframe::OneMin,
        Timeframe::ThreeMin,
        Timeframe::FiveMin,
        Timeframe::FifteenMin,
        Timeframe::ThirtyMin,
        Timeframe::OneHour,
        Timeframe::TwoHour,
        Timeframe::FourHour,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::OneMin => "1min",
            Timeframe::ThreeMin => "3min",
            Timeframe::FiveMin => "5min",
            Timeframe::FifteenMin => "15min",
            Timeframe::ThirtyMin => "30min",
            Timeframe::OneHour => "1hr",
            Timeframe::TwoHour => "2hr",
            Timeframe::FourHour => "4hr",
        }
    }

    pub fn parse(text: &str) -> Option<Timeframe> {
        Timeframe::ALL
            .into_iter()
            .find(|timeframe| timeframe.as_str() == text.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
    Ne,
    Between,
    In,
    NotIn,
    IsNull,
    IsNotNull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Logic {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

/// One comparison the screening service evaluates. The value is passed through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<Timeframe>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiTimeframeGroup {
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub logic: Logic,
}

/// Named filter pattern defined by the screening service, e.g. `oversold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateFilter {
    pub name: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub params: IndexMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<Timeframe>,
}

/// Either an opaque expression string or structured condition lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterDescription {
    Expression {
        expression: String,
    },
    Structured {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        simple: Vec<Condition>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        templates: Vec<TemplateFilter>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        fundamentals: Vec<Condition>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        multi_timeframe: Vec<MultiTimeframeGroup>,
    },
}

impl FilterDescription {
    pub fn expression(text: impl Into<String>) -> Self {
        FilterDescription::Expression {
            expression: text.into(),
        }
    }

    pub fn condition_count(&self) -> usize {
        match self {
            FilterDescription::Expression { .. } => 0,
            FilterDescription::Structured {
                simple,
                templates,
                fundamentals,
                multi_timeframe,
            } => {
                simple.len()
                    + templates.len()
                    + fundamentals.len()
                    + multi_timeframe
                        .iter()
                        .map(|group| group.conditions.len())
                        .sum::<usize>()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: usize,
    pub offset: usize,
}

/// Request body for the screening service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenRequest {
    pub timeframe: Vec<Timeframe>,
    pub filters: FilterDescription,
    pub pagination: Pagination,
}

impl ScreenRequest {
    pub fn new(timeframes: Vec<Timeframe>, filters: FilterDescription, limit: usize) -> Self {
        Self {
            timeframe: timeframes,
            filters,
            pagination: Pagination { limit, offset: 0 },
        }
    }
}
