//! Full configuration validation.
//!
//! Checks every numeric range plus the cross-section constraint that the
//! screen buffer is taller than the point where flow control pauses, and
//! collects all problems into a single `ConfigError`.

mod helpers;


use crate::schema::RelayConfig;
use conrelay_common::ConfigError;

use helpers::{validate_non_empty, validate_range};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &RelayConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_range(
        &mut errors,
        "transport.segment_capacity",
        config.transport.segment_capacity,
        64,
        1024 * 1024,
    );

    validate_flow(&mut errors, config);
    validate_surface(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_flow(errors: &mut Vec<String>, config: &RelayConfig) {
    let flow = &config.flow;
    validate_range(errors, "flow.high_water", flow.high_water, 1, 100_000);
    validate_range(errors, "flow.poll_interval_ms", flow.poll_interval_ms, 10, 10_000);
    validate_range(errors, "flow.tolerance", flow.tolerance, 0, 1000);
    validate_non_empty(errors, "flow.pause_input", &flow.pause_input);
    validate_non_empty(errors, "flow.resume_input", &flow.resume_input);
}

fn validate_surface(errors: &mut Vec<String>, config: &RelayConfig) {
    let surface = &config.surface;
    validate_range(errors, "surface.columns", surface.columns.into(), 20, 1000);
    validate_range(errors, "surface.rows", surface.rows.into(), 24, 32767);
    validate_range(
        errors,
        "surface.visible_rows",
        surface.visible_rows.into(),
        2,
        surface.rows.into(),
    );
    validate_range(errors, "surface.drain_grace_ms", surface.drain_grace_ms, 0, 10_000);

    let pause_row = config.flow.high_water.saturating_add(config.flow.tolerance);
    if u32::from(surface.rows) <= pause_row {
        errors.push(format!(
            "surface.rows = {} must exceed flow.high_water + flow.tolerance = {pause_row}",
            surface.rows
        ));
    }
}
