//! Text-pattern extraction used by the fallback generator.
//!
//! Each field has its own scan over the source text:
//!
//! | field | rule |
//! |-------|------|
//! | time | ordered [`TIME_MATCHERS`], first regex that matches wins |
//! | location | first [`LOCATION_KEYWORDS`] entry contained in the text |
//! | participants | every [`PARTICIPANT_KEYWORDS`] entry contained, list order |
//! | topic | first [`TOPIC_KEYWORDS`] hit, then [`TOPIC_PRECEDENCE`] |
//!
//! Adding a date format means adding a regex to [`TIME_MATCHERS`]; the scan
//! loop itself never changes.

use std::sync::LazyLock;

use regex::{Captures, Regex};

pub const LOCATION_KEYWORDS: [&str; 6] = ["会议室", "办公室", "培训室", "讨论室", "大厅", "在线"];

pub const PARTICIPANT_KEYWORDS: [&str; 9] = [
    "张三", "李四", "王五", "赵六", "经理", "主管", "工程师", "同事", "成员",
];

pub const TOPIC_KEYWORDS: [&str; 9] = [
    "项目", "讨论", "会议", "计划", "培训", "汇报", "决策", "复盘", "头脑风暴",
];

/// Once any topic keyword is present, these decide the topic in this order;
/// if none applies the topic is `<first keyword>会议`.
pub const TOPIC_PRECEDENCE: [(&str, &str); 6] = [
    ("项目", "项目会议"),
    ("培训", "培训会议"),
    ("汇报", "汇报会议"),
    ("决策", "决策会议"),
    ("复盘", "复盘会议"),
    ("头脑风暴", "头脑风暴会议"),
];

/// Date/time-range patterns in priority order.
///
/// Named groups: `y` (optional year), `mo`, `d`, `h1`, `m1`, `h2`, `m2`.
/// Captured digits are copied into the output unchanged.
pub static TIME_MATCHERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // 2025年03月10日 14:00-16:00
        Regex::new(r"(?P<y>\d{4})年(?P<mo>\d{1,2})月(?P<d>\d{1,2})日\s*(?P<h1>\d{1,2}):(?P<m1>\d{1,2})[-,到](?P<h2>\d{1,2}):(?P<m2>\d{1,2})").unwrap(),
        // 2025-03-10 14:00-16:00
        Regex::new(r"(?P<y>\d{4})-(?P<mo>\d{1,2})-(?P<d>\d{1,2})\s+(?P<h1>\d{1,2}):(?P<m1>\d{1,2})[-,到](?P<h2>\d{1,2}):(?P<m2>\d{1,2})").unwrap(),
        // 3月10日 14:00-16:00  (year supplied by config)
        Regex::new(r"(?P<mo>\d{1,2})月(?P<d>\d{1,2})日\s*(?P<h1>\d{1,2}):(?P<m1>\d{1,2})[-,到](?P<h2>\d{1,2}):(?P<m2>\d{1,2})").unwrap(),
    ]
});

// ---------------------------------------------------------------------------
// Findings
// ---------------------------------------------------------------------------

/// Whatever the scans found; `None` means "nothing in the text".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFindings {
    pub meeting_topic: Option<String>,
    pub meeting_location: Option<String>,
    pub meeting_time: Option<String>,
    pub participants: Option<String>,
}

/// Run every scan over `text`.
pub fn scan(text: &str, default_year: u16) -> TextFindings {
    TextFindings {
        meeting_topic: find_topic(text),
        meeting_location: find_location(text),
        meeting_time: find_time(text, default_year),
        participants: find_participants(text),
    }
}

/// Normalised `"{Y}年{M}月{D}日 {h}:{m}-{h}:{m}"` from the first matching pattern.
pub fn find_time(text: &str, default_year: u16) -> Option<String> {
    TIME_MATCHERS
        .iter()
        .find_map(|re| re.captures(text))
        .map(|caps| format_time(&caps, default_year))
}

fn format_time(caps: &Captures<'_>, default_year: u16) -> String {
    let group = |name: &str| caps.name(name).map_or("", |m| m.as_str());
    let year = caps
        .name("y")
        .map_or_else(|| default_year.to_string(), |m| m.as_str().to_string());
    format!(
        "{year}年{}月{}日 {}:{}-{}:{}",
        group("mo"),
        group("d"),
        group("h1"),
        group("m1"),
        group("h2"),
        group("m2"),
    )
}

pub fn find_location(text: &str) -> Option<String> {
    LOCATION_KEYWORDS
        .iter()
        .find(|kw| text.contains(**kw))
        .map(|kw| kw.to_string())
}

pub fn find_participants(text: &str) -> Option<String> {
    let found: Vec<&str> = PARTICIPANT_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| text.contains(kw))
        .collect();
    if found.is_empty() {
        None
    } else {
        Some(found.join(","))
    }
}

pub fn find_topic(text: &str) -> Option<String> {
    let first = TOPIC_KEYWORDS.iter().find(|kw| text.contains(**kw))?;
    let topic = TOPIC_PRECEDENCE
        .iter()
        .find(|(kw, _)| text.contains(kw))
        .map(|(_, topic)| topic.to_string())
        .unwrap_or_else(|| format!("{first}会议"));
    Some(topic)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
