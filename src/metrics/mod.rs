// Private module declaration
mod server;

use std::future::Future;

use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

use crate::domain::customer::CustomerError;

pub use server::metrics_handler;

// ============================================================================
// Metrics Module - Prometheus metrics for customer operations
// ============================================================================
//
// - customer_operations_total{operation, outcome}
// - customer_operation_duration_seconds{operation}
//
// `outcome` is "ok" or the `CustomerError::kind()` label. Scraped via
// GET /metrics.
//
// ============================================================================

pub struct Metrics {
    registry: Registry,
    pub operations_total: IntCounterVec,
    pub operation_duration: HistogramVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let operations_total = IntCounterVec::new(
            Opts::new("customer_operations_total", "Total customer operations by outcome"),
            &["operation", "outcome"],
        )?;
        registry.register(Box::new(operations_total.clone()))?;

        let operation_duration = HistogramVec::new(
            HistogramOpts::new(
                "customer_operation_duration_seconds",
                "Customer operation duration",
            )
            .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
            &["operation"],
        )?;
        registry.register(Box::new(operation_duration.clone()))?;

        Ok(Self {
            registry,
            operations_total,
            operation_duration,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Time `operation` and count its outcome
    pub async fn observe<T, F>(&self, operation: &str, fut: F) -> Result<T, CustomerError>
    where
        F: Future<Output = Result<T, CustomerError>>,
    {
        let timer = self
            .operation_duration
            .with_label_values(&[operation])
            .start_timer();
        let result = fut.await;
        timer.observe_duration();

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        self.operations_total
            .with_label_values(&[operation, outcome])
            .inc();

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::{Encoder, TextEncoder};

    #[tokio::test]
    async fn test_observe_counts_outcomes() {
        let metrics = Metrics::new().unwrap();

        let ok = metrics.observe("get", async { Ok::<_, CustomerError>(1) }).await;
        let err = metrics
            .observe("get", async { Err::<i32, _>(CustomerError::NotFound(9)) })
            .await;

        assert_eq!(ok.unwrap(), 1);
        assert!(matches!(err, Err(CustomerError::NotFound(9))));
        assert_eq!(
            metrics.operations_total.with_label_values(&["get", "ok"]).get(),
            1
        );
        assert_eq!(
            metrics
                .operations_total
                .with_label_values(&["get", "not_found"])
                .get(),
            1
        );
        assert_eq!(
            metrics
                .operation_duration
                .with_label_values(&["get"])
                .get_sample_count(),
            2
        );
    }

    #[test]
    fn test_registry_contains_families() {
        let metrics = Metrics::new().unwrap();
        metrics
            .operations_total
            .with_label_values(&["list", "ok"])
            .inc();
        metrics
            .operation_duration
            .with_label_values(&["list"])
            .observe(0.01);

        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&metrics.registry().gather(), &mut buffer)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("customer_operations_total{operation=\"list\",outcome=\"ok\"} 1"));
        assert!(text.contains("customer_operation_duration_seconds_count{operation=\"list\"} 1"));
    }
}
