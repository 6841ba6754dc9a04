//! Opt-in request telemetry.
//!
//! While debug mode is active every completed request adds its elapsed time
//! to a running total, bumps a counter and appends a line to a timestamped
//! trace. The data outlives [`DebugState::stop`] so it can be read after the
//! fact; only [`DebugState::reset`] clears it.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Unit label appended to the cumulative time in [`DebugReport`].
pub const TIME_UNIT: &str = "SECS";

/// ISO-8601 with microseconds and a numeric UTC offset.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

const START_MESSAGE: &str = "Start debug.";
const STOP_MESSAGE: &str = "Stop debug.";

/// Counters accumulated while debugging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestStats {
    /// Cumulative request time in seconds.
    pub time: f64,
    /// Number of completed requests.
    pub count: u64,
    /// Trace messages keyed by timestamp; keys sort in time order.
    pub trace: BTreeMap<String, String>,
}

/// Debug mode flag plus the stats it has gathered.
#[derive(Debug, Clone, Default)]
pub struct DebugState {
    enabled: bool,
    stats: Option<RequestStats>,
    last_stamp_micros: Option<i64>,
}

impl DebugState {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the accumulated stats, or `None` if debugging was never started.
    pub fn stats(&self) -> Option<&RequestStats> {
        self.stats.as_ref()
    }

    /// Enables debug mode, creating the stats on first use.
    pub fn start(&mut self) {
        self.enabled = true;
        self.stats.get_or_insert_with(RequestStats::default);
        self.trace(START_MESSAGE);
    }

    /// Disables debug mode. Accumulated stats are kept.
    pub fn stop(&mut self) {
        if self.enabled {
            self.trace(STOP_MESSAGE);
        }
        self.enabled = false;
    }

    /// Discards all stats and starts debugging afresh.
    pub fn reset(&mut self) {
        self.stats = None;
        self.start();
    }

    /// Records one completed request. Does nothing unless debug mode is active.
    pub fn record_request(&mut self, elapsed: Duration, url: &str) {
        if !self.enabled {
            return;
        }
        if let Some(stats) = self.stats.as_mut() {
            stats.time += elapsed.as_secs_f64();
            stats.count += 1;
        }
        self.trace(&format!("Request | {url}"));
    }

    /// Renders the stats for display, or `None` if debugging was never started.
    pub fn report(&self) -> Option<DebugReport> {
        self.stats.as_ref().map(|stats| DebugReport {
            requests: RequestsReport {
                time: format!("{} {TIME_UNIT}", stats.time),
                count: stats.count,
                trace: stats.trace.clone(),
            },
        })
    }

    fn trace(&mut self, message: &str) {
        let stamp = self.next_stamp();
        if let Some(stats) = self.stats.as_mut() {
            stats.trace.insert(stamp, message.to_string());
        }
    }

    /// Returns a timestamp strictly after the previous one, so entries
    /// recorded within the same microsecond keep distinct keys.
    fn next_stamp(&mut self) -> String {
        let now = Utc::now().timestamp_micros();
        let micros = match self.last_stamp_micros {
            Some(last) if now <= last => last + 1,
            _ => now,
        };
        self.last_stamp_micros = Some(micros);

        DateTime::<Utc>::from_timestamp_micros(micros)
            .unwrap_or_else(Utc::now)
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }
}

/// Read-time view of the debug stats.
///
/// Serializes to `{ "requests": { "time": "0.12 SECS", "count": 1, "trace": {..} } }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugReport {
    pub requests: RequestsReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestsReport {
    /// Cumulative request time with its unit label.
    pub time: String,
    pub count: u64,
    pub trace: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(state: &DebugState) -> Vec<String> {
        state
            .stats()
            .map(|stats| stats.trace.values().cloned().collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_never_started_has_no_report() {
        let state = DebugState::default();
        assert!(!state.is_enabled());
        assert!(state.report().is_none());
    }

    #[test]
    fn test_start_creates_single_entry() {
        let mut state = DebugState::default();
        state.start();

        let report = state.report().unwrap();
        assert_eq!(report.requests.time, "0 SECS");
        assert_eq!(report.requests.count, 0);
        assert_eq!(messages(&state), vec!["Start debug."]);
    }

    #[test]
    fn test_record_request() {
        let mut state = DebugState::default();
        state.start();
        state.record_request(Duration::from_millis(250), "api.example.com/x");

        let stats = state.stats().unwrap();
        assert_eq!(stats.count, 1);
        assert!((stats.time - 0.25).abs() < f64::EPSILON);
        assert_eq!(
            messages(&state),
            vec!["Start debug.", "Request | api.example.com/x"]
        );
        assert_eq!(state.report().unwrap().requests.time, "0.25 SECS");
    }

    #[test]
    fn test_record_request_ignored_when_stopped() {
        let mut state = DebugState::default();
        state.start();
        state.stop();
        state.record_request(Duration::from_secs(1), "x");

        assert_eq!(state.stats().unwrap().count, 0);
        assert_eq!(messages(&state), vec!["Start debug.", "Stop debug."]);
    }

    #[test]
    fn test_stop_without_start_adds_nothing() {
        let mut state = DebugState::default();
        state.stop();
        assert!(state.report().is_none());
    }

    #[test]
    fn test_stop_keeps_stats() {
        let mut state = DebugState::default();
        state.start();
        state.record_request(Duration::from_millis(10), "x");
        state.stop();
        state.stop();

        assert!(!state.is_enabled());
        assert_eq!(state.stats().unwrap().count, 1);
        assert_eq!(
            messages(&state),
            vec!["Start debug.", "Request | x", "Stop debug."]
        );
    }

    #[test]
    fn test_restart_keeps_existing_stats() {
        let mut state = DebugState::default();
        state.start();
        state.record_request(Duration::from_millis(10), "x");
        state.stop();
        state.start();

        assert_eq!(state.stats().unwrap().count, 1);
        assert_eq!(messages(&state).len(), 4);
    }

    #[test]
    fn test_reset_clears_and_restarts() {
        let mut state = DebugState::default();
        state.start();
        state.record_request(Duration::from_secs(2), "x");
        state.stop();
        state.reset();

        assert!(state.is_enabled());
        let report = state.report().unwrap();
        assert_eq!(report.requests.count, 0);
        assert_eq!(report.requests.time, "0 SECS");
        assert_eq!(messages(&state), vec!["Start debug."]);
    }

    #[test]
    fn test_rapid_entries_are_all_kept_in_order() {
        let mut state = DebugState::default();
        state.start();
        for i in 0..100 {
            state.record_request(Duration::ZERO, &i.to_string());
        }

        let trace = &state.stats().unwrap().trace;
        assert_eq!(trace.len(), 101);
        let recorded: Vec<_> = trace.values().skip(1).cloned().collect();
        let expected: Vec<_> = (0..100).map(|i| format!("Request | {i}")).collect();
        assert_eq!(recorded, expected);
    }

    #[test]
    fn test_timestamp_format() {
        let mut state = DebugState::default();
        state.start();

        let key = state.stats().unwrap().trace.keys().next().unwrap().clone();
        // e.g. 2026-10-18T09:15:02.123456+00:00
        assert_eq!(key.len(), 32);
        assert!(key.ends_with("+00:00"));
        assert_eq!(&key[10..11], "T");
        assert_eq!(&key[19..20], ".");
    }

    #[test]
    fn test_report_serializes_to_documented_shape() {
        let mut state = DebugState::default();
        state.start();

        let value = serde_json::to_value(state.report().unwrap()).unwrap();
        assert_eq!(value["requests"]["time"], "0 SECS");
        assert_eq!(value["requests"]["count"], 0);
        assert_eq!(value["requests"]["trace"].as_object().unwrap().len(), 1);
    }
}
