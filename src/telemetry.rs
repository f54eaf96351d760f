//! Telemetry helpers for hosts embedding `chart-segments`.
//!
//! Segment layout reports recoveries (skipped segments, substituted stroke
//! widths, animation fallbacks) through `tracing`. This module keeps the
//! subscriber setup explicit and opt-in.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "chart_segments=info";

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG`, falling
/// back to [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or the host
/// already installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-provided fallback
/// directive, e.g. `"chart_segments=trace"` to see every skipped segment.
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "telemetry"))]
    #[test]
    fn disabled_feature_installs_nothing() {
        assert!(!init_default_tracing());
        assert!(!init_tracing_with_filter("chart_segments=trace"));
    }

    #[cfg(feature = "telemetry")]
    #[test]
    fn second_install_is_refused() {
        let _ = init_tracing_with_filter("chart_segments=trace");
        assert!(!init_default_tracing());
    }
}
