//! Logging and tracing setup
//!
//! The encoder reports through the `tracing` macros and never installs a
//! subscriber itself. Applications that embed it call `init_observability`
//! once at startup to get:
//!
//! - an `EnvFilter` driven by `RUST_LOG` (falling back to the configured level)
//! - a `fmt` layer, JSON-formatted by default
//! - optionally, an OpenTelemetry layer exporting spans over OTLP/gRPC
//!
//! Span export uses a tonic channel, so with traces enabled (the default)
//! `init_observability` must be called from inside a tokio runtime. Outside
//! one it returns an error; use `with_traces(false)` for log output only.
//!
//! ```rust,no_run
//! use rpcenv_core::ObservabilityConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ObservabilityConfig::new("rpc-gateway")
//!         .with_endpoint("http://localhost:4317")
//!         .with_log_level("debug");
//!
//!     rpcenv_core::init_observability(config).expect("Failed to init observability");
//!
//!     // ... serve requests ...
//!
//!     rpcenv_core::shutdown_observability();
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: Collector endpoint
//! - `RUST_LOG`: Log level filter (e.g., "info", "rpcenv_core=trace")

use opentelemetry::{global, KeyValue};
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

// Kept so shutdown can flush spans still sitting in the batch processor.
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

/// Logging and tracing configuration
///
/// # Defaults
///
/// - Service name: "rpcenv"
/// - Service version: the crate version
/// - OTLP endpoint: `$OTEL_EXPORTER_OTLP_ENDPOINT` or "http://localhost:4317"
/// - Trace export: enabled (needs a running tokio runtime)
/// - JSON log lines: enabled
/// - Log level: `$RUST_LOG` or "info"
///
/// # Examples
///
/// ```rust
/// use rpcenv_core::ObservabilityConfig;
///
/// let config = ObservabilityConfig::new("rpc-gateway")
///     .with_endpoint("http://collector:4317")
///     .with_traces(false)
///     .with_json(false);
/// assert!(!config.enable_traces);
/// ```
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name attached to exported spans
    pub service_name: String,

    /// Service version attached to exported spans
    pub service_version: String,

    /// OTLP/gRPC collector endpoint
    pub otlp_endpoint: String,

    /// Export spans to the collector
    ///
    /// When disabled only local log output is configured. When enabled,
    /// `init_observability` must run inside a tokio runtime.
    pub enable_traces: bool,

    /// Emit log lines as JSON objects instead of human-readable text
    pub json_logs: bool,

    /// Filter used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "rpcenv".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            otlp_endpoint: std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:4317".to_string()),
            enable_traces: true,
            json_logs: true,
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl ObservabilityConfig {
    /// Create a configuration for `service_name` with all other fields defaulted
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Set the OTLP collector endpoint, e.g. "http://collector:4317"
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = endpoint.into();
        self
    }

    /// Set the fallback log filter ("error", "warn", "info", "debug", "trace",
    /// or any `EnvFilter` directive)
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = version.into();
        self
    }

    pub fn with_traces(mut self, enable: bool) -> Self {
        self.enable_traces = enable;
        self
    }

    pub fn with_json(mut self, enable: bool) -> Self {
        self.json_logs = enable;
        self
    }
}

/// Install the global tracing subscriber
///
/// Call once at startup. A second call fails because the global subscriber
/// is already set.
///
/// # Errors
///
/// - traces are enabled but no tokio runtime is running on this thread
/// - the log filter directive cannot be parsed
/// - the OTLP exporter cannot be built
/// - a global subscriber is already installed
///
/// Nothing is installed when the runtime check fails.
pub fn init_observability(config: ObservabilityConfig) -> Result<(), BoxError> {
    let tracer = if config.enable_traces {
        // The tonic exporter panics when built outside a runtime.
        if let Err(e) = tokio::runtime::Handle::try_current() {
            return Err(format!(
                "span export requires a running tokio runtime ({}); \
                 call from within one or disable traces with `with_traces(false)`",
                e
            )
            .into());
        }
        Some(init_tracer(&config)?)
    } else {
        None
    };

    init_tracing_subscriber(&config, tracer)?;

    tracing::info!(
        service_name = %config.service_name,
        otlp_endpoint = %config.otlp_endpoint,
        traces = config.enable_traces,
        json = config.json_logs,
        "Observability initialized"
    );

    Ok(())
}

/// Build the OTLP tracer provider, register it globally and hand back a tracer
/// for the `tracing-opentelemetry` layer.
fn init_tracer(config: &ObservabilityConfig) -> Result<opentelemetry_sdk::trace::Tracer, BoxError> {
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::{RandomIdGenerator, Sampler};
    use opentelemetry_sdk::Resource;

    let resource = Resource::builder_empty()
        .with_attributes(vec![
            KeyValue::new(
                opentelemetry_semantic_conventions::resource::SERVICE_NAME,
                config.service_name.clone(),
            ),
            KeyValue::new(
                opentelemetry_semantic_conventions::resource::SERVICE_VERSION,
                config.service_version.clone(),
            ),
        ])
        .build();

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otlp_endpoint.clone())
        .build()?;

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .with_sampler(Sampler::ParentBased(Box::new(Sampler::AlwaysOn)))
        .with_id_generator(RandomIdGenerator::default())
        .build();

    let tracer = provider.tracer(config.service_name.clone());

    global::set_tracer_provider(provider.clone());
    if TRACER_PROVIDER.set(provider).is_err() {
        tracing::warn!("Tracer provider already registered; keeping the first one");
    }

    Ok(tracer)
}

fn init_tracing_subscriber(
    config: &ObservabilityConfig,
    tracer: Option<opentelemetry_sdk::trace::Tracer>,
) -> Result<(), BoxError> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let telemetry_layer = tracer.map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer));

    // Exactly one of these is Some.
    let (json_layer, text_layer) = if config.json_logs {
        let layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .json();
        (Some(layer), None)
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true);
        (None, Some(layer))
    };

    tracing_subscriber::registry()
        .with(telemetry_layer)
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()?;

    Ok(())
}

/// Flush and shut down span export
///
/// Safe to call more than once, and a no-op when traces were never enabled.
pub fn shutdown_observability() {
    tracing::info!("Shutting down observability");

    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error = %e, "Tracer provider shutdown failed");
        }
    }
}
