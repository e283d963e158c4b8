use std::time::Duration;

use crate::log::LogLevel;

const DEFAULT_LOADING_DELAY_MS: u64 = 1_000;
const DEFAULT_LOADING_FADE_MS: u64 = 500;
const DEFAULT_TYPING_START_MS: u64 = 1_000;
const DEFAULT_TYPING_TYPE_MS: u64 = 100;
const DEFAULT_TYPING_HOLD_MS: u64 = 2_000;
const DEFAULT_TYPING_DELETE_MS: u64 = 50;
const DEFAULT_TYPING_PHRASES: &[&str] = &["Software Developer", "Student", "Problem Solver", "Innovator"];
const DEFAULT_COUNTER_DURATION_MS: u64 = 2_000;
const DEFAULT_FILTER_SHOW_DELAY_MS: u64 = 100;
const DEFAULT_FILTER_HIDE_DELAY_MS: u64 = 300;
const DEFAULT_SUBMIT_DELAY_MS: u64 = 2_000;
const DEFAULT_STATUS_HIDE_MS: u64 = 5_000;
const DEFAULT_RIPPLE_MS: u64 = 600;
const DEFAULT_CURSOR_BREAKPOINT_PX: u32 = 768;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const LOADING_DELAY_MS_BOUNDS: (u64, u64) = (0, 10_000);
const LOADING_FADE_MS_BOUNDS: (u64, u64) = (0, 5_000);
const TYPING_START_MS_BOUNDS: (u64, u64) = (0, 10_000);
const TYPING_TYPE_MS_BOUNDS: (u64, u64) = (10, 1_000);
const TYPING_HOLD_MS_BOUNDS: (u64, u64) = (0, 10_000);
const TYPING_DELETE_MS_BOUNDS: (u64, u64) = (10, 1_000);
const COUNTER_DURATION_MS_BOUNDS: (u64, u64) = (100, 10_000);
const FILTER_DELAY_MS_BOUNDS: (u64, u64) = (0, 2_000);
const SUBMIT_DELAY_MS_BOUNDS: (u64, u64) = (0, 10_000);
const STATUS_HIDE_MS_BOUNDS: (u64, u64) = (500, 60_000);
const RIPPLE_MS_BOUNDS: (u64, u64) = (100, 5_000);
const CURSOR_BREAKPOINT_PX_BOUNDS: (u32, u32) = (0, 4_096);

const PHRASE_SEPARATOR: char = '|';

/// Timing constants and log level for every page behavior.
///
/// Values come from `data-*` attributes on the mount element; anything missing,
/// unparseable or out of bounds keeps its default.
#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    pub loading_delay: Duration,
    pub loading_fade: Duration,
    pub typing: TypingTimings,
    pub typing_phrases: Vec<String>,
    pub counter_duration: Duration,
    pub filter_show_delay: Duration,
    pub filter_hide_delay: Duration,
    pub submit_delay: Duration,
    pub status_hide_delay: Duration,
    pub ripple_lifetime: Duration,
    pub cursor_breakpoint_px: u32,
    pub log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTimings {
    pub start: Duration,
    pub type_interval: Duration,
    pub hold: Duration,
    pub delete_interval: Duration,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl PageConfig {
    pub fn from_lookup<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        let millis = |name: &str, default: u64, bounds: (u64, u64)| {
            Duration::from_millis(parse_u64_with_bounds(&lookup, name, default, bounds))
        };

        let typing = TypingTimings {
            start: millis("data-typing-start-ms", DEFAULT_TYPING_START_MS, TYPING_START_MS_BOUNDS),
            type_interval: millis("data-typing-type-ms", DEFAULT_TYPING_TYPE_MS, TYPING_TYPE_MS_BOUNDS),
            hold: millis("data-typing-hold-ms", DEFAULT_TYPING_HOLD_MS, TYPING_HOLD_MS_BOUNDS),
            delete_interval: millis(
                "data-typing-delete-ms",
                DEFAULT_TYPING_DELETE_MS,
                TYPING_DELETE_MS_BOUNDS,
            ),
        };
        let typing_phrases = parse_non_empty_string(&lookup, "data-typing-phrases")
            .map(|value| parse_phrases(&value))
            .filter(|phrases| !phrases.is_empty())
            .unwrap_or_else(|| DEFAULT_TYPING_PHRASES.iter().map(ToString::to_string).collect());
        let cursor_breakpoint_px = parse_non_empty_string(&lookup, "data-cursor-breakpoint-px")
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|value| (CURSOR_BREAKPOINT_PX_BOUNDS.0..=CURSOR_BREAKPOINT_PX_BOUNDS.1).contains(value))
            .unwrap_or(DEFAULT_CURSOR_BREAKPOINT_PX);

        Self {
            loading_delay: millis("data-loading-delay-ms", DEFAULT_LOADING_DELAY_MS, LOADING_DELAY_MS_BOUNDS),
            loading_fade: millis("data-loading-fade-ms", DEFAULT_LOADING_FADE_MS, LOADING_FADE_MS_BOUNDS),
            typing,
            typing_phrases,
            counter_duration: millis(
                "data-counter-duration-ms",
                DEFAULT_COUNTER_DURATION_MS,
                COUNTER_DURATION_MS_BOUNDS,
            ),
            filter_show_delay: millis(
                "data-filter-show-delay-ms",
                DEFAULT_FILTER_SHOW_DELAY_MS,
                FILTER_DELAY_MS_BOUNDS,
            ),
            filter_hide_delay: millis(
                "data-filter-hide-delay-ms",
                DEFAULT_FILTER_HIDE_DELAY_MS,
                FILTER_DELAY_MS_BOUNDS,
            ),
            submit_delay: millis("data-submit-delay-ms", DEFAULT_SUBMIT_DELAY_MS, SUBMIT_DELAY_MS_BOUNDS),
            status_hide_delay: millis("data-status-hide-ms", DEFAULT_STATUS_HIDE_MS, STATUS_HIDE_MS_BOUNDS),
            ripple_lifetime: millis("data-ripple-ms", DEFAULT_RIPPLE_MS, RIPPLE_MS_BOUNDS),
            cursor_breakpoint_px,
            log_level: parse_log_level(&lookup, "data-log-level", DEFAULT_LOG_LEVEL),
        }
    }
}

fn parse_non_empty_string<L>(lookup: &L, name: &str) -> Option<String>
where
    L: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_u64_with_bounds<L>(lookup: &L, name: &str, default: u64, bounds: (u64, u64)) -> u64
where
    L: Fn(&str) -> Option<String>,
{
    parse_non_empty_string(lookup, name)
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_log_level<L>(lookup: &L, name: &str, default: LogLevel) -> LogLevel
where
    L: Fn(&str) -> Option<String>,
{
    match parse_non_empty_string(lookup, name)
        .unwrap_or_else(|| default.as_str().to_string())
        .to_ascii_lowercase()
        .as_str()
    {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" => LogLevel::Warn,
        "error" => LogLevel::Error,
        _ => default,
    }
}

fn parse_phrases(value: &str) -> Vec<String> {
    value
        .split(PHRASE_SEPARATOR)
        .map(str::trim)
        .filter(|phrase| !phrase.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> PageConfig {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        PageConfig::from_lookup(|name| values.get(name).cloned())
    }

    #[test]
    fn defaults_match_page_timings() {
        let config = PageConfig::default();

        assert_eq!(config.filter_show_delay, Duration::from_millis(100));
        assert_eq!(config.filter_hide_delay, Duration::from_millis(300));
        assert_eq!(config.typing.hold, Duration::from_millis(2_000));
        assert_eq!(config.status_hide_delay, Duration::from_secs(5));
        assert_eq!(config.cursor_breakpoint_px, 768);
        assert_eq!(config.typing_phrases.len(), 4);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn in_bounds_values_override_defaults() {
        let config = config_from(&[
            ("data-filter-hide-delay-ms", " 450 "),
            ("data-log-level", "DEBUG"),
            ("data-typing-phrases", "Rustacean | | Writer"),
        ]);

        assert_eq!(config.filter_hide_delay, Duration::from_millis(450));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.typing_phrases, vec!["Rustacean", "Writer"]);
    }

    #[test]
    fn every_log_level_name_is_accepted() {
        for (raw, level) in [
            ("debug", LogLevel::Debug),
            ("Info", LogLevel::Info),
            ("warn", LogLevel::Warn),
            (" ERROR ", LogLevel::Error),
        ] {
            assert_eq!(config_from(&[("data-log-level", raw)]).log_level, level, "{raw}");
        }
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("data-filter-show-delay-ms", "soon"),
            ("data-typing-type-ms", "1"),
            ("data-status-hide-ms", "999999"),
            ("data-cursor-breakpoint-px", "-4"),
            ("data-log-level", "trace"),
            ("data-typing-phrases", " | "),
        ]);

        assert_eq!(config.filter_show_delay, Duration::from_millis(100));
        assert_eq!(config.typing.type_interval, Duration::from_millis(100));
        assert_eq!(config.status_hide_delay, Duration::from_millis(5_000));
        assert_eq!(config.cursor_breakpoint_px, 768);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.typing_phrases[0], "Software Developer");
    }
}
