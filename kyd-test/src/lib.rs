//! Miscellaneous test code for KYD.
//!
//! Every test that wants log output or readable error reports starts with:
//!
//! ```ignore
//! let _init_guard = kyd_test::init();
//! ```

use std::sync::Once;

use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// A guard returned by [`init`].
///
/// Keeps the test's root span entered until it is dropped.
#[must_use = "the guard must be held for the duration of the test"]
pub struct InitGuard {
    _span: tracing::span::EnteredSpan,
}

/// Initialize global and thread-local state for tests.
///
/// Installs a `tracing` subscriber filtered by `RUST_LOG` (default `warn`) and
/// the `color-eyre` report hooks. Safe to call from every test, only the first
/// call has any global effect.
pub fn init() -> InitGuard {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        // Another subscriber may already be installed by the test binary.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_test_writer())
            .with(ErrorLayer::default())
            .try_init();

        let _ = color_eyre::install();
    });

    InitGuard {
        _span: tracing::info_span!("test").entered(),
    }
}
