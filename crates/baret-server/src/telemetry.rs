// SPDX-License-Identifier: Apache-2.0
//! In-process request counters rendered as Prometheus text exposition.

use axum::http::StatusCode;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::sync::Mutex;

const METRIC_SUBSYSTEM: &str = "isg";
const METRIC_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Latency samples kept per route. Old samples fall off the front, so the
/// percentiles describe recent traffic rather than process lifetime.
const LATENCY_RING_CAPACITY: usize = 1024;

#[derive(Default)]
pub(crate) struct RequestMetrics {
    counts: Mutex<HashMap<(String, u16), u64>>,
    latency_ns: Mutex<HashMap<String, VecDeque<u64>>>,
    export_bytes: Mutex<HashMap<&'static str, u64>>,
}

impl RequestMetrics {
    pub(crate) async fn observe_request(&self, route: &str, status: StatusCode, latency: Duration) {
        let mut counts = self.counts.lock().await;
        *counts
            .entry((route.to_string(), status.as_u16()))
            .or_insert(0) += 1;
        drop(counts);

        let mut latency_ns = self.latency_ns.lock().await;
        let ring = latency_ns.entry(route.to_string()).or_default();
        ring.push_back(latency.as_nanos() as u64);
        while ring.len() > LATENCY_RING_CAPACITY {
            ring.pop_front();
        }
    }

    pub(crate) async fn observe_export(&self, kind: &'static str, bytes: usize) {
        let mut totals = self.export_bytes.lock().await;
        *totals.entry(kind).or_insert(0) += bytes as u64;
    }

    /// Key order is sorted before rendering so the exposition is stable
    /// across calls.
    pub(crate) async fn render_prometheus(&self) -> String {
        let mut body = String::new();

        let mut counts: Vec<((String, u16), u64)> = self
            .counts
            .lock()
            .await
            .iter()
            .map(|(key, value)| (key.clone(), *value))
            .collect();
        counts.sort();
        for ((route, status), count) in counts {
            let class = status_class(status);
            body.push_str(&format!(
                "baret_http_requests_total{{subsystem=\"{METRIC_SUBSYSTEM}\",version=\"{METRIC_VERSION}\",route=\"{route}\",status=\"{status}\",class=\"{class}\"}} {count}\n"
            ));
        }

        let mut latencies: Vec<(String, Vec<u64>)> = self
            .latency_ns
            .lock()
            .await
            .iter()
            .map(|(route, ring)| (route.clone(), ring.iter().copied().collect()))
            .collect();
        latencies.sort_by(|a, b| a.0.cmp(&b.0));
        for (route, samples) in latencies {
            for (name, pct) in [("p50", 0.50), ("p95", 0.95), ("p99", 0.99)] {
                let seconds = percentile_ns(&samples, pct) as f64 / 1_000_000_000.0;
                body.push_str(&format!(
                    "baret_http_request_latency_{name}_seconds{{subsystem=\"{METRIC_SUBSYSTEM}\",version=\"{METRIC_VERSION}\",route=\"{route}\"}} {seconds:.6}\n"
                ));
            }
        }

        let mut exports: Vec<(&'static str, u64)> = self
            .export_bytes
            .lock()
            .await
            .iter()
            .map(|(kind, bytes)| (*kind, *bytes))
            .collect();
        exports.sort();
        for (kind, bytes) in exports {
            body.push_str(&format!(
                "baret_export_bytes_total{{subsystem=\"{METRIC_SUBSYSTEM}\",version=\"{METRIC_VERSION}\",kind=\"{kind}\"}} {bytes}\n"
            ));
        }

        body
    }
}

const fn status_class(status: u16) -> &'static str {
    match status / 100 {
        2 => "2xx",
        3 => "3xx",
        4 => "4xx",
        5 => "5xx",
        _ => "other",
    }
}

fn percentile_ns(values: &[u64], pct: f64) -> u64 {
    if values.is_empty() {
        return 0;
    }
    let mut v = values.to_vec();
    v.sort_unstable();
    let idx = ((v.len() as f64 - 1.0) * pct).round() as usize;
    v[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_picks_rounded_rank() {
        assert_eq!(percentile_ns(&[], 0.95), 0);
        let samples: Vec<u64> = (1..=100).collect();
        assert_eq!(percentile_ns(&samples, 0.50), 51);
        assert_eq!(percentile_ns(&samples, 0.95), 95);
        assert_eq!(percentile_ns(&samples, 0.99), 99);
    }

    #[test]
    fn status_classes_cover_the_observed_range() {
        assert_eq!(status_class(200), "2xx");
        assert_eq!(status_class(304), "3xx");
        assert_eq!(status_class(403), "4xx");
        assert_eq!(status_class(500), "5xx");
        assert_eq!(status_class(101), "other");
    }

    #[tokio::test]
    async fn counters_and_export_totals_render_sorted() {
        let metrics = RequestMetrics::default();
        metrics
            .observe_request("/healthz", StatusCode::OK, Duration::from_millis(5))
            .await;
        metrics
            .observe_request("/healthz", StatusCode::OK, Duration::from_millis(15))
            .await;
        metrics
            .observe_request("/v1/calendar", StatusCode::BAD_REQUEST, Duration::from_millis(1))
            .await;
        metrics.observe_export("xlsx", 2048).await;
        metrics.observe_export("xlsx", 1024).await;

        let body = metrics.render_prometheus().await;
        assert!(body.contains("route=\"/healthz\",status=\"200\",class=\"2xx\"} 2"));
        assert!(body.contains("route=\"/v1/calendar\",status=\"400\",class=\"4xx\"} 1"));
        assert!(body.contains("baret_http_request_latency_p95_seconds"));
        assert!(body.contains("kind=\"xlsx\"} 3072"));
        let healthz_at = body.find("/healthz").unwrap();
        let calendar_at = body.find("/v1/calendar").unwrap();
        assert!(healthz_at < calendar_at);
    }

    #[tokio::test]
    async fn latency_ring_stays_bounded() {
        let metrics = RequestMetrics::default();
        for n in 0..(LATENCY_RING_CAPACITY + 100) {
            metrics
                .observe_request("/v1/stats/incidents", StatusCode::OK, Duration::from_nanos(n as u64))
                .await;
        }
        let latency_ns = metrics.latency_ns.lock().await;
        assert_eq!(
            latency_ns.get("/v1/stats/incidents").map(VecDeque::len),
            Some(LATENCY_RING_CAPACITY)
        );
    }
}
