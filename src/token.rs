use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Storage key of the admin session token.
pub const ADMIN_TOKEN_KEY: &str = "admin_token";

/// Key/value persistence for client credentials (browser local storage).
pub trait TokenStore {
    fn set(&self, key: &str, value: &str);
    fn get(&self, key: &str) -> Option<String>;
    fn remove(&self, key: &str);
}

/// In-process token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

impl<T: TokenStore + ?Sized> TokenStore for &T {
    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// `window.localStorage`, reached through the JS global object.
///
/// Storage failures (private mode, quota) are ignored, as the browser API does.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn call(method: &str, args: &[&str]) -> Option<wasm_bindgen::JsValue> {
        use wasm_bindgen::{JsCast, JsValue};

        let storage =
            js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("localStorage")).ok()?;
        if storage.is_undefined() || storage.is_null() {
            return None;
        }
        let function: js_sys::Function = js_sys::Reflect::get(&storage, &JsValue::from_str(method))
            .ok()?
            .dyn_into()
            .ok()?;
        let args: js_sys::Array = args.iter().map(|arg| JsValue::from_str(arg)).collect();
        function.apply(&storage, &args).ok()
    }
}

#[cfg(target_arch = "wasm32")]
impl TokenStore for LocalStorage {
    fn set(&self, key: &str, value: &str) {
        let _ = Self::call("setItem", &[key, value]);
    }

    fn get(&self, key: &str) -> Option<String> {
        Self::call("getItem", &[key])?.as_string()
    }

    fn remove(&self, key: &str) {
        let _ = Self::call("removeItem", &[key]);
    }
}
