use std::cell::RefCell;
use std::collections::HashMap;

use gloo_storage::{LocalStorage, Storage};
use serde::{de::DeserializeOwned, Serialize};

pub const TOKEN_KEY: &str = "taskflux_token";
pub const USER_KEY: &str = "taskflux_user";
pub const CURRENT_WORKSPACE_KEY: &str = "taskflux_current_workspace";

/// Almacenamiento clave/valor persistente (localStorage en el navegador)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str);
}

/// localStorage vía gloo-storage
#[derive(Clone, Copy, Default)]
pub struct LocalStore;

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::get::<String>(key).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        LocalStorage::set(key, value).map_err(|e| format!("Error guardando en localStorage: {}", e))
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// Store en memoria (tests y entornos sin localStorage)
#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

pub fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), String> {
    let json = serde_json::to_string(value)
        .map_err(|e| format!("Error serializando datos: {}", e))?;
    store.set(key, &json)
}

/// Valores corruptos se tratan como ausentes
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let json = store.get(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("⚠️ [STORAGE] Valor ilegible en '{}': {}", key, e);
            None
        }
    }
}

pub fn remove_keys(store: &dyn KeyValueStore, keys: &[&str]) {
    for key in keys {
        store.remove(key);
    }
}
