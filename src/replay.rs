//! Recorded pointer scripts replayed against an [`Engine`].
//!
//! A scenario is a JSON document holding the starting elements, an optional
//! viewport and handle config, and a list of input events in device pixels.
//! The `labelkit` binary and the integration tests both drive the engine
//! through here.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{self, ConfigError, ConfigOverrides, EngineConfig};
use crate::element::{ElementId, LabelElement};
use crate::engine::{Action, Engine};
use crate::input::{Button, Key, Tool};
use crate::units::{DevicePoint, Viewport};

/// Errors raised while loading or preparing a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid engine config: {0}")]
    Config(#[from] ConfigError),
    #[error("viewport scale must be a positive number, got {0}")]
    InvalidScale(f64),
}

/// One recorded input event. Coordinates are device pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
    },
    Leave,
    Cancel,
    Key {
        key: String,
    },
    Tool {
        tool: Tool,
    },
}

/// A starting label plus the events to feed it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub viewport: Viewport,
    /// Handle sizes. Fields left out keep the base config passed to [`run_with`].
    #[serde(default)]
    pub config: ConfigOverrides,
    pub elements: Vec<LabelElement>,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// State of the label after every event has been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayOutcome {
    pub elements: Vec<LabelElement>,
    pub actions_emitted: usize,
    pub selected: Option<ElementId>,
    pub committed: usize,
}

/// Read and parse a scenario file.
///
/// # Errors
///
/// Returns [`ReplayError::Io`] if the file cannot be read and
/// [`ReplayError::Json`] if it is not a valid scenario.
pub fn load(path: &Path) -> Result<Scenario, ReplayError> {
    let raw = fs::read_to_string(path)?;
    let scenario = parse(&raw)?;
    debug!(path = %path.display(), elements = scenario.elements.len(), events = scenario.events.len(), "scenario loaded");
    Ok(scenario)
}

/// Parse a scenario from a JSON string.
///
/// # Errors
///
/// Returns [`ReplayError::Json`] if `raw` is not a valid scenario.
pub fn parse(raw: &str) -> Result<Scenario, ReplayError> {
    Ok(serde_json::from_str(raw)?)
}

/// Feed every event of `scenario` to a fresh engine built on the default config.
///
/// # Errors
///
/// Same as [`run_with`].
pub fn run(scenario: &Scenario) -> Result<ReplayOutcome, ReplayError> {
    run_with(scenario, EngineConfig::default())
}

/// Feed every event of `scenario` to a fresh engine and report the result.
///
/// The scenario's `config` block is layered over `base` field by field.
///
/// # Errors
///
/// Returns [`ReplayError::Config`] if the merged handle sizes are not positive
/// and [`ReplayError::InvalidScale`] if the viewport scale is not.
pub fn run_with(scenario: &Scenario, base: EngineConfig) -> Result<ReplayOutcome, ReplayError> {
    let engine_config = scenario.config.apply_to(base).validate()?;
    if !config::is_positive(scenario.viewport.scale) {
        return Err(ReplayError::InvalidScale(scenario.viewport.scale));
    }

    let mut engine = Engine::new(scenario.viewport, engine_config);
    engine.load(scenario.elements.clone());

    let mut actions_emitted = 0;
    let mut committed = 0;
    for event in &scenario.events {
        let actions = apply(&mut engine, event);
        actions_emitted += actions.len();
        committed += actions.iter().filter(|a| matches!(a, Action::GestureCommitted { .. })).count();
    }

    info!(events = scenario.events.len(), actions_emitted, committed, "replay finished");
    Ok(ReplayOutcome {
        elements: engine.label().elements().to_vec(),
        actions_emitted,
        selected: engine.selection(),
        committed,
    })
}

fn apply(engine: &mut Engine, event: &Event) -> Vec<Action> {
    match event {
        Event::Down { x, y, button } => engine.on_pointer_down(DevicePoint::new(*x, *y), *button),
        Event::Move { x, y } => engine.on_pointer_move(DevicePoint::new(*x, *y)),
        Event::Up { x, y, button } => engine.on_pointer_up(DevicePoint::new(*x, *y), *button),
        Event::Leave => engine.on_pointer_leave(),
        Event::Cancel => engine.cancel(),
        Event::Key { key } => engine.on_key_down(Key(key.clone())),
        Event::Tool { tool } => engine.set_tool(*tool),
    }
}
