use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    actions_total: AtomicU64,
    free_text_total: AtomicU64,
    control_effects_total: AtomicU64,
    unresolved_total: AtomicU64,
    language_fallback_total: AtomicU64,
    default_category_total: AtomicU64,
    language_switches_total: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub actions_total: u64,
    pub free_text_total: u64,
    pub control_effects_total: u64,
    pub unresolved_total: u64,
    pub language_fallback_total: u64,
    pub default_category_total: u64,
    pub language_switches_total: u64,
    pub avg_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_action(&self) {
        self.actions_total.fetch_add(1, Ordering::Relaxed);
        counter!("riskalia_actions_total").increment(1);
    }

    pub fn inc_free_text(&self) {
        self.free_text_total.fetch_add(1, Ordering::Relaxed);
        counter!("riskalia_free_text_total").increment(1);
    }

    pub fn inc_control_effect(&self) {
        self.control_effects_total.fetch_add(1, Ordering::Relaxed);
        counter!("riskalia_control_effects_total").increment(1);
    }

    pub fn inc_unresolved(&self) {
        self.unresolved_total.fetch_add(1, Ordering::Relaxed);
        counter!("riskalia_unresolved_total").increment(1);
    }

    pub fn inc_language_fallback(&self) {
        self.language_fallback_total.fetch_add(1, Ordering::Relaxed);
        counter!("riskalia_language_fallback_total").increment(1);
    }

    pub fn inc_default_category(&self) {
        self.default_category_total.fetch_add(1, Ordering::Relaxed);
        counter!("riskalia_default_category_total").increment(1);
    }

    pub fn inc_language_switch(&self) {
        self.language_switches_total.fetch_add(1, Ordering::Relaxed);
        counter!("riskalia_language_switches_total").increment(1);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let actions = self.actions_total.load(Ordering::Relaxed);
        let free_text = self.free_text_total.load(Ordering::Relaxed);
        let handled = actions + free_text;
        let latency = self.total_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            actions_total: actions,
            free_text_total: free_text,
            control_effects_total: self.control_effects_total.load(Ordering::Relaxed),
            unresolved_total: self.unresolved_total.load(Ordering::Relaxed),
            language_fallback_total: self.language_fallback_total.load(Ordering::Relaxed),
            default_category_total: self.default_category_total.load(Ordering::Relaxed),
            language_switches_total: self.language_switches_total.load(Ordering::Relaxed),
            avg_latency_millis: if handled == 0 {
                0.0
            } else {
                latency as f64 / handled as f64
            },
        }
    }

    pub fn snapshot_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or(serde_json::Value::Null)
    }
}

/// Installs the global JSON subscriber once; later calls are no-ops.
/// Logs go to stderr so they never mix with chat output.
pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,riskalia_agents=info,riskalia_core=warn",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
