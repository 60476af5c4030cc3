use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static SESSION_DECODE_FAILURES_TOTAL: OnceLock<IntCounter> = OnceLock::new();
pub static LOGOUTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static TOKEN_REVOCATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

pub fn init_metrics() -> Result<(), prometheus::Error> {
    let registry = Registry::new();

    let decode_failures = IntCounter::new(
        "dashboard_session_decode_failures_total",
        "Session cookies that could not be decoded and were treated as logged out",
    )?;

    let logouts = IntCounterVec::new(
        Opts::new("dashboard_logouts_total", "Completed logouts"),
        &["mode"],
    )?;

    let revocations = IntCounterVec::new(
        Opts::new(
            "dashboard_token_revocations_total",
            "Upstream token revocation attempts during logout",
        ),
        &["outcome"],
    )?;

    registry.register(Box::new(decode_failures.clone()))?;
    registry.register(Box::new(logouts.clone()))?;
    registry.register(Box::new(revocations.clone()))?;

    // Initialize globals
    let _ = REGISTRY.set(registry);
    let _ = SESSION_DECODE_FAILURES_TOTAL.set(decode_failures);
    let _ = LOGOUTS_TOTAL.set(logouts);
    let _ = TOKEN_REVOCATIONS_TOTAL.set(revocations);

    Ok(())
}

// Recording is a no-op until init_metrics has run (unit tests, tools).

pub fn record_session_decode_failure() {
    if let Some(counter) = SESSION_DECODE_FAILURES_TOTAL.get() {
        counter.inc();
    }
}

pub fn record_logout(mode: &str) {
    if let Some(counter) = LOGOUTS_TOTAL.get() {
        counter.with_label_values(&[mode]).inc();
    }
}

pub fn record_token_revocation(outcome: &str) {
    if let Some(counter) = TOKEN_REVOCATIONS_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}

pub fn get_metrics() -> anyhow::Result<String> {
    let Some(registry) = REGISTRY.get() else {
        return Ok(String::new());
    };

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
