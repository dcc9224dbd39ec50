use std::sync::Once;

/// Initialize the global tracing subscriber once, so scenario tests run with
/// `RUST_LOG` show the extractor/emitter's `tracing` events instead of
/// swallowing them.
pub fn init_tracing_from_env() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let subscriber = tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env());
        let _ = subscriber.try_init();
    });
}
