//! Browser binding
//!
//! The page script owns the canvas, the HUD and `requestAnimationFrame`; it
//! forwards frame timestamps and button/key presses here and renders from
//! the JSON snapshot.

use wasm_bindgen::prelude::*;

use super::FrameClock;
use crate::config::{GameConfig, Variant};
use crate::sim::{RoundPhase, Session};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // Already initialized on hot reload
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Snake Cashout starting...");
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WebSession {
    session: Session,
    clock: FrameClock,
}

#[wasm_bindgen]
impl WebSession {
    /// New session for `variant` ("combo" or "spike"), seeded from the wall clock
    #[wasm_bindgen(constructor)]
    pub fn new(variant: &str) -> Result<WebSession, JsValue> {
        let variant = Variant::from_str(variant)
            .ok_or_else(|| JsValue::from_str(&format!("unknown variant '{}'", variant)))?;
        let seed = js_sys::Date::now() as u64;
        log::info!("New {} session (seed {})", variant.as_str(), seed);
        Ok(Self {
            session: Session::new(GameConfig::from_variant(variant), seed).map_err(js_err)?,
            clock: FrameClock::new(),
        })
    }

    /// Session from a JSON config document
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<WebSession, JsValue> {
        let config = GameConfig::from_json_str(json).map_err(js_err)?;
        Ok(Self {
            session: Session::new(config, js_sys::Date::now() as u64).map_err(js_err)?,
            clock: FrameClock::new(),
        })
    }

    /// Start a round with the raw bet-input text; `now` is the frame timestamp
    pub fn start(&mut self, bet: &str, now: f64) -> Result<(), JsValue> {
        self.session.request_start_str(bet).map_err(js_err)?;
        self.clock.resume(now);
        Ok(())
    }

    /// Drive one animation frame; returns the round state name
    pub fn frame(&mut self, now: f64) -> String {
        if let Some(elapsed) = self.clock.advance(now) {
            if self.session.on_tick(elapsed) != RoundPhase::Running {
                self.clock.suspend();
            }
        }
        self.session.phase().as_str().to_string()
    }

    #[wasm_bindgen(js_name = setDirection)]
    pub fn set_direction(&mut self, dx: i32, dy: i32) -> bool {
        self.session.set_direction(dx, dy)
    }

    /// Cash out; returns the payout, or `undefined` when no round is running
    #[wasm_bindgen(js_name = cashOut)]
    pub fn cash_out(&mut self) -> Option<f64> {
        let settlement = self.session.request_cash_out()?;
        self.clock.suspend();
        Some(settlement.payout as f64)
    }

    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.session.request_reset().map_err(js_err)
    }

    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot()).map_err(js_err)
    }

    /// Pending events as a JSON array
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.drain_events()).map_err(js_err)
    }
}
