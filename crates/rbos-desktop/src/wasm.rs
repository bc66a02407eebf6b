//! wasm-bindgen exports for the browser shell
//!
//! Window ids cross the boundary as `f64`; `Snapshot::MAX_COUNTER` keeps
//! restored ids within the safe integer range.
//! Structured values are exchanged as JSON strings.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::DesktopConfig;
use crate::desktop::Desktop;
use crate::error::PersistenceError;
use crate::persistence::KeyValueStore;
use crate::window::{WindowId, WindowOptions};

/// Desktop handle owned by the page
#[wasm_bindgen]
pub struct DesktopHandle {
    desktop: Desktop,
}

#[wasm_bindgen]
impl DesktopHandle {
    /// Create a desktop, optionally from a TOML config
    #[wasm_bindgen(constructor)]
    pub fn new(config_toml: Option<String>) -> Result<DesktopHandle, JsValue> {
        let config = match config_toml {
            Some(source) => DesktopConfig::from_toml_str(&source).map_err(to_js)?,
            None => DesktopConfig::default(),
        };
        Ok(Self {
            desktop: Desktop::new(config),
        })
    }

    /// Open a window from JSON `WindowOptions`, returning its id
    pub fn create_window(&mut self, options_json: &str) -> Result<f64, JsValue> {
        let options: WindowOptions = serde_json::from_str(options_json).map_err(to_js)?;
        Ok(self.desktop.windows_mut().create_window(options).id as f64)
    }

    pub fn close_window(&mut self, id: f64) {
        self.desktop.windows_mut().close_window(id as WindowId);
    }

    pub fn focus_window(&mut self, id: f64) {
        self.desktop.windows_mut().focus_window(id as WindowId);
    }

    pub fn move_window(&mut self, id: f64, x: f32, y: f32) {
        self.desktop.windows_mut().move_window(id as WindowId, x, y);
    }

    pub fn resize_window(&mut self, id: f64, width: f32, height: f32) {
        self.desktop.windows_mut().resize_window(id as WindowId, width, height);
    }

    pub fn minimize_window(&mut self, id: f64) {
        self.desktop.windows_mut().minimize_window(id as WindowId);
    }

    pub fn maximize_window(&mut self, id: f64) {
        self.desktop.windows_mut().maximize_window(id as WindowId);
    }

    pub fn restore_window(&mut self, id: f64) {
        self.desktop.windows_mut().restore_window(id as WindowId);
    }

    /// Windows in creation order, as JSON
    pub fn windows_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.desktop.windows().windows()).map_err(to_js)
    }

    /// CSS cursor for the region under the pointer
    pub fn cursor_at(&self, x: f32, y: f32) -> String {
        self.desktop
            .windows()
            .region_at(crate::math::Vec2::new(x, y))
            .map(|(_, region)| region.cursor())
            .unwrap_or("default")
            .to_string()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> Result<String, JsValue> {
        serde_json::to_string(&self.desktop.handle_pointer_down(x, y)).map_err(to_js)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> Result<String, JsValue> {
        serde_json::to_string(&self.desktop.handle_pointer_move(x, y)).map_err(to_js)
    }

    pub fn pointer_up(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.desktop.handle_pointer_up()).map_err(to_js)
    }

    /// Save the layout into browser local storage
    pub fn save_layout(&self) -> Result<(), JsValue> {
        let mut store = LocalStorage::open()?;
        self.desktop.save(&mut store).map_err(to_js)
    }

    /// Restore the layout from browser local storage
    pub fn load_layout(&mut self) -> Result<bool, JsValue> {
        let store = LocalStorage::open()?;
        self.desktop.load(&store).map_err(to_js)
    }
}

/// `window.localStorage` through the `KeyValueStore` trait
struct LocalStorage {
    storage: JsValue,
}

impl LocalStorage {
    fn open() -> Result<Self, JsValue> {
        let global = js_sys::global();
        let storage = js_sys::Reflect::get(&global, &JsValue::from_str("localStorage"))?;
        if storage.is_undefined() || storage.is_null() {
            return Err(JsValue::from_str("localStorage unavailable"));
        }
        Ok(Self { storage })
    }

    fn call(&self, method: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
        let function: js_sys::Function =
            js_sys::Reflect::get(&self.storage, &JsValue::from_str(method))?.dyn_into()?;
        let args: js_sys::Array = args.iter().collect();
        function.apply(&self.storage, &args)
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let value = self
            .call("getItem", &[JsValue::from_str(key)])
            .map_err(storage_error)?;
        Ok(value.as_string())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), PersistenceError> {
        self.call("setItem", &[JsValue::from_str(key), JsValue::from_str(&value)])
            .map(drop)
            .map_err(storage_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.call("removeItem", &[JsValue::from_str(key)])
            .map(drop)
            .map_err(storage_error)
    }
}

/// Thrown DOMExceptions (QuotaExceededError, SecurityError) carry a message
fn storage_error(err: JsValue) -> PersistenceError {
    let message = js_sys::Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "localStorage call threw".to_string());
    PersistenceError::Storage(message)
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
