//! Tracing subscriber setup.
//!
//! A text or JSON `fmt` layer filtered by `RUST_LOG`, falling back to the
//! configured level. With the `observability` feature, spans are also exported
//! to stdout through OpenTelemetry.

use crate::LoggingConfig;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Settings for [`init_observability_with_config`].
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name for span attribution
    pub service_name: String,
    /// Filter directive used when `RUST_LOG` is unset (e.g. "info", "mediastash=debug")
    pub log_level: String,
    /// Emit JSON lines
    pub json_logs: bool,
}

impl ObservabilityConfig {
    /// Create a configuration for `service_name` at level `info`.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }

    /// Set the fallback filter directive.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

impl From<&LoggingConfig> for ObservabilityConfig {
    fn from(logging: &LoggingConfig) -> Self {
        Self::default()
            .with_log_level(logging.level.clone())
            .with_json_logs(logging.json)
    }
}

/// Install the global subscriber with default settings.
pub fn init_observability() -> Result<(), Box<dyn std::error::Error>> {
    init_observability_with_config(ObservabilityConfig::default())
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails if the fallback level is not a valid filter directive or a global
/// subscriber is already set.
pub fn init_observability_with_config(
    config: ObservabilityConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer(&config))
        .try_init()?;

    Ok(())
}

#[cfg(feature = "observability")]
fn otel_layer<S>(config: &ObservabilityConfig) -> Option<Box<dyn Layer<S> + Send + Sync>>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
{
    use opentelemetry::{KeyValue, global, trace::TracerProvider};
    use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};

    let resource = Resource::builder()
        .with_service_name(config.service_name.clone())
        .with_attributes(vec![KeyValue::new(
            "service.version",
            env!("CARGO_PKG_VERSION"),
        )])
        .build();

    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
        .with_resource(resource)
        .build();
    global::set_tracer_provider(provider.clone());

    let tracer = provider.tracer(config.service_name.clone());
    Some(tracing_opentelemetry::layer().with_tracer(tracer).boxed())
}

#[cfg(not(feature = "observability"))]
fn otel_layer<S>(_config: &ObservabilityConfig) -> Option<Box<dyn Layer<S> + Send + Sync>>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
{
    None
}
