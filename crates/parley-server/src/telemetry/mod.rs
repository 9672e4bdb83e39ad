// SPDX-License-Identifier: Apache-2.0

//! Per-route request accounting and the hand-rendered Prometheus text
//! endpoint.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;

use crate::http::handlers::{make_request_id, with_request_id};
use crate::AppState;

const METRIC_SUBSYSTEM: &str = "parley";
const METRIC_VERSION: &str = env!("CARGO_PKG_VERSION");
const LATENCY_SAMPLE_CAP: usize = 4096;

#[derive(Default)]
struct MetricsInner {
    request_counts: BTreeMap<(String, u16), u64>,
    latency_ns: BTreeMap<String, Vec<u64>>,
}

#[derive(Default)]
pub struct RequestMetrics {
    inner: Mutex<MetricsInner>,
}

impl RequestMetrics {
    pub async fn observe_request(&self, route: &str, status: StatusCode, elapsed: Duration) {
        let mut inner = self.inner.lock().await;
        *inner
            .request_counts
            .entry((route.to_string(), status.as_u16()))
            .or_insert(0) += 1;
        let samples = inner.latency_ns.entry(route.to_string()).or_default();
        if samples.len() >= LATENCY_SAMPLE_CAP {
            samples.drain(..LATENCY_SAMPLE_CAP / 2);
        }
        samples.push(elapsed.as_nanos() as u64);
    }

    pub async fn render(&self) -> String {
        let inner = self.inner.lock().await;
        let mut body = String::new();
        for ((route, status), count) in &inner.request_counts {
            body.push_str(&format!(
                "parley_http_requests_total{{subsystem=\"{METRIC_SUBSYSTEM}\",version=\"{METRIC_VERSION}\",route=\"{route}\",status=\"{status}\"}} {count}\n"
            ));
        }
        for (route, samples) in &inner.latency_ns {
            for (label, pct) in [("0.5", 0.5), ("0.95", 0.95), ("0.99", 0.99)] {
                let value = percentile_ns(samples, pct) as f64 / 1_000_000_000.0;
                body.push_str(&format!(
                    "parley_http_request_latency_seconds{{subsystem=\"{METRIC_SUBSYSTEM}\",version=\"{METRIC_VERSION}\",route=\"{route}\",quantile=\"{label}\"}} {value:.9}\n"
                ));
            }
            body.push_str(&format!(
                "parley_http_request_latency_samples{{subsystem=\"{METRIC_SUBSYSTEM}\",version=\"{METRIC_VERSION}\",route=\"{route}\"}} {}\n",
                samples.len()
            ));
        }
        body
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

pub(crate) async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let request_id = make_request_id(&state);
    let started = Instant::now();
    let body = state.metrics.render().await;
    let mut resp = (StatusCode::OK, body).into_response();
    resp.headers_mut().insert(
        "content-type",
        HeaderValue::from_static("text/plain; version=0.0.4"),
    );
    state
        .metrics
        .observe_request("/metrics", StatusCode::OK, started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}
