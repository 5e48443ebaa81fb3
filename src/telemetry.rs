//! Telemetry helpers for binaries embedding `rrd-chart-rs`.
//!
//! The library only emits `tracing` events. Installing a subscriber stays
//! explicit and opt-in through the `telemetry` feature.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// `default_directive` is used when `RUST_LOG` is unset (for example `"info"`).
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing(default_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive)),
            )
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_directive;
        false
    }
}
