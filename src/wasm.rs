//! WebAssembly bindings for SecFlow.
//!
//! Thin wrapper around `PlaybackEngine` for a browser renderer: the host calls
//! `tick` from its animation frame callback and draws what comes back.

use std::sync::Arc;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{
    playback::{Command, PlaybackEngine, PlaybackEvent},
    scene::{SceneFrame, timeline},
    schema::Scenario,
};

/// Initialize WASM module with panic hook and logging.
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages in browser
    console_error_panic_hook::set_once();

    // Initialize WASM logger
    wasm_logger::init(wasm_logger::Config::default());
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// WebAssembly wrapper for the playback engine.
#[wasm_bindgen]
pub struct WasmPlayback {
    engine: PlaybackEngine,
    /// Called with `(index, cause)` whenever a step activates.
    on_step_change: Option<js_sys::Function>,
    /// Events forwarded to the callback but not yet returned from `tick`.
    events: Vec<PlaybackEvent>,
}

#[wasm_bindgen]
impl WasmPlayback {
    /// Create a player from scenario JSON, or the built-in scenario when omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(scenario_json: Option<String>) -> Result<WasmPlayback, JsValue> {
        let scenario = match scenario_json {
            Some(json) => Scenario::from_json(&json)
                .map_err(|e| JsValue::from_str(&format!("Invalid scenario: {e}")))?,
            None => Scenario::default(),
        };

        let engine = PlaybackEngine::new(Arc::new(scenario))
            .map_err(|e| JsValue::from_str(&format!("Invalid scenario: {e}")))?;

        Ok(WasmPlayback {
            engine,
            on_step_change: None,
            events: Vec::new(),
        })
    }

    /// Advance by `delta` seconds and return the frame snapshot.
    #[wasm_bindgen]
    pub fn tick(&mut self, delta: f32) -> Result<JsValue, JsValue> {
        self.engine.update(delta);
        self.collect_events()?;

        let mut frame = self.engine.snapshot();
        frame.events = std::mem::take(&mut self.events);
        to_js(&frame)
    }

    /// Draw list for the current frame at renderer clock `clock` (seconds).
    #[wasm_bindgen(js_name = getScene)]
    pub fn get_scene(&mut self, clock: f32) -> Result<JsValue, JsValue> {
        self.collect_events()?;

        let scenario = Arc::clone(self.engine.scenario());
        let frame = self.engine.snapshot();
        to_js(&SceneFrame::build(&scenario, &frame, clock))
    }

    /// Timeline rows for the sidebar.
    #[wasm_bindgen(js_name = getTimeline)]
    pub fn get_timeline(&self) -> Result<JsValue, JsValue> {
        let current = self.engine.state().current_step;
        to_js(&timeline(self.engine.scenario(), current))
    }

    /// Current playback state.
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.state())
    }

    /// Register a callback fired on step activation.
    #[wasm_bindgen(js_name = onStepChange)]
    pub fn on_step_change(&mut self, callback: js_sys::Function) {
        self.on_step_change = Some(callback);
    }

    /// Toggle play/pause.
    #[wasm_bindgen(js_name = playPause)]
    pub fn play_pause(&mut self) -> Result<(), JsValue> {
        self.apply(Command::PlayPause)
    }

    /// Manual next step.
    #[wasm_bindgen]
    pub fn next(&mut self) -> Result<(), JsValue> {
        self.apply(Command::Next)
    }

    /// Manual previous step.
    #[wasm_bindgen]
    pub fn prev(&mut self) -> Result<(), JsValue> {
        self.apply(Command::Prev)
    }

    /// Back to the first step, stopped.
    #[wasm_bindgen]
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.apply(Command::Reset)
    }

    /// Activate a step from the timeline.
    #[wasm_bindgen(js_name = jumpTo)]
    pub fn jump_to(&mut self, index: usize) -> Result<(), JsValue> {
        self.apply(Command::JumpTo(index))
    }

    /// Number of steps in the scenario.
    #[wasm_bindgen(js_name = stepCount)]
    pub fn step_count(&self) -> usize {
        self.engine.scenario().steps.len()
    }
}

impl WasmPlayback {
    fn apply(&mut self, command: Command) -> Result<(), JsValue> {
        self.engine.command(command);
        self.collect_events()
    }

    /// Move engine events into the local buffer, forwarding activations to JS.
    fn collect_events(&mut self) -> Result<(), JsValue> {
        let events = self.engine.drain_events();
        if let Some(callback) = &self.on_step_change {
            for event in &events {
                if let PlaybackEvent::StepActivated { index, cause } = event {
                    callback.call2(
                        &JsValue::NULL,
                        &JsValue::from(*index as u32),
                        &to_js(cause)?,
                    )?;
                }
            }
        }
        self.events.extend(events);
        Ok(())
    }
}
