//! Prometheus metrics for the relay endpoint.
//!
//! Each [`RelayMetrics`] owns its registry so several routers can live in one
//! process (tests build many).

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};
use std::sync::Arc;

/// Service metrics for observability
#[derive(Debug)]
pub struct RelayMetrics {
    registry: Registry,

    pub webhooks_total: IntCounter,
    pub handshakes_total: IntCounter,
    pub invalid_payloads_total: IntCounter,
    pub notifications_delivered_total: IntCounter,
    pub events_unrouted_total: IntCounter,
    pub failures_total: IntCounter,
    pub webhook_duration_seconds: Histogram,
}

impl RelayMetrics {
    pub fn new() -> Result<Arc<Self>, prometheus::Error> {
        let registry = Registry::new();

        let counter = |name: &str, help: &str| -> Result<IntCounter, prometheus::Error> {
            let counter = IntCounter::new(name, help)?;
            registry.register(Box::new(counter.clone()))?;
            Ok(counter)
        };

        let webhooks_total = counter(
            "wrike_relay_webhooks_total",
            "Webhook requests received",
        )?;
        let handshakes_total = counter(
            "wrike_relay_handshakes_total",
            "Verification handshakes answered",
        )?;
        let invalid_payloads_total = counter(
            "wrike_relay_invalid_payloads_total",
            "Webhook payloads rejected as malformed",
        )?;
        let notifications_delivered_total = counter(
            "wrike_relay_notifications_delivered_total",
            "Messages posted to Webex",
        )?;
        let events_unrouted_total = counter(
            "wrike_relay_events_unrouted_total",
            "Events whose task folders map to no room",
        )?;
        let failures_total = counter(
            "wrike_relay_failures_total",
            "Events that failed task lookup or delivery",
        )?;

        let webhook_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "wrike_relay_webhook_duration_seconds",
                "Webhook handling time distribution",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )?;
        registry.register(Box::new(webhook_duration_seconds.clone()))?;

        Ok(Arc::new(Self {
            registry,
            webhooks_total,
            handshakes_total,
            invalid_payloads_total,
            notifications_delivered_total,
            events_unrouted_total,
            failures_total,
            webhook_duration_seconds,
        }))
    }

    /// Text exposition of every metric in this registry.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
