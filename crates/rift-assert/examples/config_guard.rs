//! Guarding a configuration constructor with debug assertions.
//!
//! ```text
//! cargo run -p rift-assert --example config_guard                     # inert
//! cargo run -p rift-assert --example config_guard --features enabled  # active
//! ```
//!
//! The second config has an empty host. The active build stops there with an
//! assertion failure; the inert build falls through to the runtime validation,
//! which rejects it with an ordinary error.

use anyhow::{bail, Result};
use rift_assert::{should, Capture, Value};
use tracing::info;

#[derive(Debug)]
struct ListenerConfig {
    host: String,
    port: u16,
    user: String,
    tags: Vec<String>,
}

impl Capture for ListenerConfig {
    fn capture(&self) -> Value<'_> {
        Value::record(
            "ListenerConfig",
            [
                ("host", self.host.capture()),
                ("port", self.port.capture()),
                ("user", self.user.capture()),
                ("tags", self.tags.capture()),
            ],
        )
    }
}

fn listener_config(host: &str, port: u16, user: &str) -> Result<ListenerConfig> {
    // Preconditions, checked only in the active build.
    should(host).not_be_empty();
    should(port).be_greater_than(0);

    // Validation that production builds still rely on.
    if host.is_empty() {
        bail!("host cannot be empty");
    }
    if port == 0 {
        bail!("invalid port: {port}");
    }

    let config = ListenerConfig {
        host: host.to_string(),
        port,
        user: user.to_string(),
        tags: vec!["default".to_string(), "example".to_string()],
    };

    should(&config).not_be_nil().not_be_zero();
    should(&config.tags).have_len(2).contain("example");

    Ok(config)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(enabled = rift_assert::enabled(), "starting config guard demo");

    info!("building a valid listener config");
    let valid = listener_config("localhost", 8080, "admin");
    should(valid.as_ref().err()).not_be_error();
    match &valid {
        Ok(config) => info!(?config, "config created"),
        Err(err) => info!(%err, "config rejected"),
    }

    info!("building a listener config with an empty host");
    let invalid = listener_config("", 9000, "guest");
    should(invalid.as_ref().err()).be_error();
    match &invalid {
        Ok(config) => info!(?config, "config created unexpectedly"),
        Err(err) => info!(%err, "config rejected"),
    }

    info!("demo finished");
}
