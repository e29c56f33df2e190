//! Process-wide request and dispatch counters
//!
//! Rendered in the Prometheus text exposition format at `/metrics`.

use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use dashmap::DashMap;

/// Content type of the text exposition format
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Operational counters for the web front end
#[derive(Default)]
pub struct Metrics {
    /// Requests by (method, endpoint)
    requests: DashMap<(String, String), AtomicU64>,
    /// Dispatch attempts by requested app name
    app_opens: DashMap<String, AtomicU64>,
    /// 1 once the dashboard has been served, 0 before
    system_status: AtomicI64,
}

impl Metrics {
    /// Create a registry with every counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one request to `endpoint` with `method`
    pub fn record_request(&self, method: &str, endpoint: &str) {
        self.requests
            .entry((method.to_string(), endpoint.to_string()))
            .or_default()
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Count one request to open `app_name`
    pub fn record_app_open(&self, app_name: &str) {
        self.app_opens
            .entry(app_name.to_string())
            .or_default()
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Set the system status gauge
    pub fn set_system_status(&self, value: i64) {
        self.system_status.store(value, Ordering::Relaxed);
    }

    /// Current request count for `method` + `endpoint`
    pub fn request_count(&self, method: &str, endpoint: &str) -> u64 {
        self.requests
            .get(&(method.to_string(), endpoint.to_string()))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Current open count for `app_name`
    pub fn app_open_count(&self, app_name: &str) -> u64 {
        self.app_opens
            .get(app_name)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Current system status gauge value
    pub fn system_status(&self) -> i64 {
        self.system_status.load(Ordering::Relaxed)
    }

    /// Snapshot of all metrics in text exposition format
    pub fn render(&self) -> String {
        let mut out = String::new();

        let mut requests: Vec<_> = self
            .requests
            .iter()
            .map(|e| (e.key().clone(), e.value().load(Ordering::Relaxed)))
            .collect();
        requests.sort();

        let _ = writeln!(out, "# HELP app_request_count_total Total app requests");
        let _ = writeln!(out, "# TYPE app_request_count_total counter");
        for ((method, endpoint), count) in requests {
            let _ = writeln!(
                out,
                "app_request_count_total{{method=\"{}\",endpoint=\"{}\"}} {}",
                escape_label(&method),
                escape_label(&endpoint),
                count
            );
        }

        let mut opens: Vec<_> = self
            .app_opens
            .iter()
            .map(|e| (e.key().clone(), e.value().load(Ordering::Relaxed)))
            .collect();
        opens.sort();

        let _ = writeln!(
            out,
            "# HELP app_open_count_total Number of times an app switch was toggled"
        );
        let _ = writeln!(out, "# TYPE app_open_count_total counter");
        for (app_name, count) in opens {
            let _ = writeln!(
                out,
                "app_open_count_total{{app_name=\"{}\"}} {}",
                escape_label(&app_name),
                count
            );
        }

        let _ = writeln!(out, "# HELP system_status System status (1=Up, 0=Down)");
        let _ = writeln!(out, "# TYPE system_status gauge");
        let _ = writeln!(out, "system_status {}", self.system_status());

        out
    }
}

/// Escape a label value per the exposition format
fn escape_label(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}
