//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check endpoint URLs parse with an http(s) scheme
//! - Validate value ranges (users > 0, wait bounds finite and ordered,
//!   budgets > 0)
//! - Require a run bound (duration or iterations)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoadConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::LoadConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "workload.users").
    pub field: String,
    /// Description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn err(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

fn check_http_url(field: &str, value: &str, errors: &mut Vec<ValidationError>) {
    match url::Url::parse(value) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
        Ok(parsed) => errors.push(err(
            field,
            format!("unsupported scheme '{}', expected http or https", parsed.scheme()),
        )),
        Err(e) => errors.push(err(field, format!("invalid URL '{}': {}", value, e))),
    }
}

/// Validate a configuration, collecting every semantic error found.
pub fn validate_config(config: &LoadConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_http_url("node.url", &config.node.url, &mut errors);
    check_http_url("faucet.url", &config.faucet.url, &mut errors);

    if config.node.request_timeout_secs == 0 {
        errors.push(err("node.request_timeout_secs", "must be greater than zero"));
    }

    let workload = &config.workload;
    if workload.users == 0 {
        errors.push(err("workload.users", "must be greater than zero"));
    }
    if !workload.wait_min_secs.is_finite() {
        errors.push(err("workload.wait_min_secs", "must be a finite number"));
    } else if workload.wait_min_secs < 0.0 {
        errors.push(err("workload.wait_min_secs", "must not be negative"));
    }
    if !workload.wait_max_secs.is_finite() {
        errors.push(err("workload.wait_max_secs", "must be a finite number"));
    } else if workload.wait_max_secs < workload.wait_min_secs {
        errors.push(err(
            "workload.wait_max_secs",
            format!(
                "must be >= wait_min_secs ({} < {})",
                workload.wait_max_secs, workload.wait_min_secs
            ),
        ));
    }
    if workload.duration_secs.is_none() && workload.iterations.is_none() {
        errors.push(err(
            "workload",
            "one of duration_secs or iterations must be set",
        ));
    }
    if workload.duration_secs == Some(0) {
        errors.push(err("workload.duration_secs", "must be greater than zero"));
    }
    if workload.iterations == Some(0) {
        errors.push(err("workload.iterations", "must be greater than zero"));
    }
    if workload.payload_tag.is_empty() {
        errors.push(err("workload.payload_tag", "must not be empty"));
    }
    if workload.max_in_flight == 0 {
        errors.push(err("workload.max_in_flight", "must be greater than zero"));
    }

    if config.confirmation.max_retries == 0 {
        errors.push(err("confirmation.max_retries", "must be greater than zero"));
    }

    if config.faucet.request_timeout_secs == 0 {
        errors.push(err("faucet.request_timeout_secs", "must be greater than zero"));
    }

    if config.faucet.poll_budget == 0 {
        errors.push(err("faucet.poll_budget", "must be greater than zero"));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(err(
            "observability.metrics_address",
            format!(
                "'{}' is not a valid socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
