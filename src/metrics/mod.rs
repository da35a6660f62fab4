//! Metrics collection module
//!
//! Tracks tool invocations, failures by kind, and local search fallbacks.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Process-wide tool counters
pub struct Metrics {
    /// Total tool calls
    total_calls: AtomicU64,
    /// Calls per tool
    tool_calls: RwLock<HashMap<String, u64>>,
    /// Failures per tool and error kind
    tool_errors: RwLock<HashMap<String, HashMap<String, u64>>>,
    /// Local searches answered by the web fallback
    fallbacks: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            total_calls: AtomicU64::new(0),
            tool_calls: RwLock::new(HashMap::new()),
            tool_errors: RwLock::new(HashMap::new()),
            fallbacks: AtomicU64::new(0),
        }
    }

    /// Record a tool invocation
    pub fn record_call(&self, tool: &str) {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        let mut calls = self.tool_calls.write().unwrap_or_else(|e| e.into_inner());
        *calls.entry(tool.to_string()).or_insert(0) += 1;
    }

    /// Record a failed invocation
    pub fn record_error(&self, tool: &str, kind: &str) {
        let mut errors = self.tool_errors.write().unwrap_or_else(|e| e.into_inner());
        *errors
            .entry(tool.to_string())
            .or_default()
            .entry(kind.to_string())
            .or_insert(0) += 1;
    }

    /// Record a local search that fell back to web search
    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total_calls(&self) -> u64 {
        self.total_calls.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> u64 {
        self.fallbacks.load(Ordering::Relaxed)
    }

    /// Get per-tool statistics, sorted by tool name
    pub fn get_stats(&self) -> Vec<ToolStats> {
        let calls = self.tool_calls.read().unwrap_or_else(|e| e.into_inner());
        let errors = self.tool_errors.read().unwrap_or_else(|e| e.into_inner());

        let mut stats: Vec<ToolStats> = calls
            .iter()
            .map(|(tool, &count)| {
                let by_kind: BTreeMap<String, u64> = errors
                    .get(tool)
                    .map(|m| m.iter().map(|(k, v)| (k.clone(), *v)).collect())
                    .unwrap_or_default();
                ToolStats {
                    name: tool.clone(),
                    calls: count,
                    errors: by_kind.values().sum(),
                    errors_by_kind: by_kind,
                }
            })
            .collect();

        stats.sort_by(|a, b| a.name.cmp(&b.name));
        stats
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics for a single tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolStats {
    pub name: String,
    pub calls: u64,
    pub errors: u64,
    pub errors_by_kind: BTreeMap<String, u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let metrics = Metrics::new();

        metrics.record_call("web_search");
        metrics.record_call("web_search");
        metrics.record_call("local_search");
        metrics.record_error("web_search", "invalid_argument");
        metrics.record_fallback();

        assert_eq!(metrics.total_calls(), 3);
        assert_eq!(metrics.fallbacks(), 1);

        let stats = metrics.get_stats();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].name, "local_search");
        assert_eq!(stats[0].errors, 0);
        assert_eq!(stats[1].calls, 2);
        assert_eq!(stats[1].errors, 1);
        assert_eq!(stats[1].errors_by_kind.get("invalid_argument"), Some(&1));
    }
}
