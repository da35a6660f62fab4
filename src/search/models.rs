//! Search query models and argument validation

use crate::error::{SearchError, ToolResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Longest accepted query, in characters
pub const MAX_QUERY_CHARS: usize = 400;
/// Accepted result counts per request
pub const COUNT_RANGE: std::ops::RangeInclusive<i64> = 1..=20;
/// Accepted pagination offsets
pub const OFFSET_RANGE: std::ops::RangeInclusive<i64> = 0..=9;

/// Result categories a web search can be restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultType {
    #[default]
    All,
    Web,
    News,
    Videos,
}

impl ResultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::All => "all",
            ResultType::Web => "web",
            ResultType::News => "news",
            ResultType::Videos => "videos",
        }
    }

    /// Whether results of `category` belong in the output
    pub fn includes(&self, category: Category) -> bool {
        match self {
            ResultType::All => true,
            ResultType::Web => category == Category::Web,
            ResultType::News => category == Category::News,
            ResultType::Videos => category == Category::Videos,
        }
    }
}

impl FromStr for ResultType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ResultType::All),
            "web" => Ok(ResultType::Web),
            "news" => Ok(ResultType::News),
            "videos" => Ok(ResultType::Videos),
            _ => Err(SearchError::invalid(
                "result_type",
                format!("'{}' is not one of all, web, news, videos", s),
            )),
        }
    }
}

/// Response categories, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Web,
    News,
    Videos,
}

impl Category {
    pub const ORDERED: [Category; 3] = [Category::Web, Category::News, Category::Videos];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Web => "web",
            Category::News => "news",
            Category::Videos => "videos",
        }
    }
}

/// Content safety filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SafetyLevel {
    Strict,
    #[default]
    Moderate,
    Off,
}

impl SafetyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyLevel::Strict => "strict",
            SafetyLevel::Moderate => "moderate",
            SafetyLevel::Off => "off",
        }
    }
}

impl FromStr for SafetyLevel {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(SafetyLevel::Strict),
            "moderate" => Ok(SafetyLevel::Moderate),
            "off" => Ok(SafetyLevel::Off),
            _ => Err(SearchError::invalid(
                "safety_level",
                format!("'{}' is not one of strict, moderate, off", s),
            )),
        }
    }
}

/// Content age filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Freshness {
    #[default]
    All,
    PastDay,
    PastWeek,
    PastMonth,
    PastYear,
}

impl Freshness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Freshness::All => "all",
            Freshness::PastDay => "pd",
            Freshness::PastWeek => "pw",
            Freshness::PastMonth => "pm",
            Freshness::PastYear => "py",
        }
    }
}

impl FromStr for Freshness {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Freshness::All),
            "pd" => Ok(Freshness::PastDay),
            "pw" => Ok(Freshness::PastWeek),
            "pm" => Ok(Freshness::PastMonth),
            "py" => Ok(Freshness::PastYear),
            _ => Err(SearchError::invalid(
                "freshness",
                format!("'{}' is not one of all, pd, pw, pm, py", s),
            )),
        }
    }
}

/// Raw arguments of the web search tool, as a caller supplies them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebSearchArgs {
    pub query: String,
    pub count: i64,
    pub offset: i64,
    pub result_type: String,
    pub safety_level: String,
    pub freshness: String,
}

impl WebSearchArgs {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

impl Default for WebSearchArgs {
    fn default() -> Self {
        Self {
            query: String::new(),
            count: 10,
            offset: 0,
            result_type: "all".to_string(),
            safety_level: "moderate".to_string(),
            freshness: "all".to_string(),
        }
    }
}

/// Raw arguments of the local search tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSearchArgs {
    pub query: String,
    pub count: i64,
    pub safety_level: String,
}

impl LocalSearchArgs {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

impl Default for LocalSearchArgs {
    fn default() -> Self {
        Self {
            query: String::new(),
            count: 5,
            safety_level: "moderate".to_string(),
        }
    }
}

/// A validated web search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub count: u32,
    pub offset: u32,
    pub result_type: ResultType,
    pub safety_level: SafetyLevel,
    pub freshness: Freshness,
}

impl SearchQuery {
    /// Validate caller arguments, naming the first violated field
    pub fn validate(args: &WebSearchArgs) -> ToolResult<Self> {
        validate_query_text(&args.query)?;
        let count = validate_count(args.count)?;
        if !OFFSET_RANGE.contains(&args.offset) {
            return Err(SearchError::invalid(
                "offset",
                format!("must be between 0 and 9, got {}", args.offset),
            ));
        }
        let result_type = args.result_type.parse()?;
        let safety_level = args.safety_level.parse()?;
        let freshness = args.freshness.parse()?;

        Ok(Self {
            text: args.query.clone(),
            count,
            offset: args.offset as u32,
            result_type,
            safety_level,
            freshness,
        })
    }

    /// The general search a local search falls back to
    pub fn fallback_for(local: &LocalQuery) -> Self {
        Self {
            text: local.text.clone(),
            count: local.count,
            offset: 0,
            result_type: ResultType::All,
            safety_level: local.safety_level,
            freshness: Freshness::All,
        }
    }
}

impl TryFrom<WebSearchArgs> for SearchQuery {
    type Error = SearchError;

    fn try_from(args: WebSearchArgs) -> Result<Self, Self::Error> {
        Self::validate(&args)
    }
}

/// A validated local search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalQuery {
    pub text: String,
    pub count: u32,
    pub safety_level: SafetyLevel,
}

impl LocalQuery {
    pub fn validate(args: &LocalSearchArgs) -> ToolResult<Self> {
        validate_query_text(&args.query)?;
        let count = validate_count(args.count)?;
        let safety_level = args.safety_level.parse()?;

        Ok(Self {
            text: args.query.clone(),
            count,
            safety_level,
        })
    }
}

impl TryFrom<LocalSearchArgs> for LocalQuery {
    type Error = SearchError;

    fn try_from(args: LocalSearchArgs) -> Result<Self, Self::Error> {
        Self::validate(&args)
    }
}

fn validate_query_text(query: &str) -> ToolResult<()> {
    let chars = query.chars().count();
    if chars > MAX_QUERY_CHARS {
        return Err(SearchError::invalid(
            "query",
            format!("exceeds {} characters ({})", MAX_QUERY_CHARS, chars),
        ));
    }
    Ok(())
}

fn validate_count(count: i64) -> ToolResult<u32> {
    if !COUNT_RANGE.contains(&count) {
        return Err(SearchError::invalid(
            "count",
            format!("must be between 1 and 20, got {}", count),
        ));
    }
    Ok(count as u32)
}
