//! `localStorage`-backed durable store.
//!
//! The browser API is synchronous, so this adapter maps one-to-one onto
//! [`console_host::DurableStore`]. Outside `wasm32` it is inert: reads find nothing and writes
//! succeed without effect.

use console_host::DurableStore;

#[derive(Debug, Clone, Copy, Default)]
/// Durable store backed by `window.localStorage`.
pub struct WebLocalStorage;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| "localStorage unavailable".to_string())
}

impl WebLocalStorage {
    /// Returns `true` when the host exposes a usable `localStorage`.
    pub fn is_available(self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage().is_ok()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            false
        }
    }
}

impl DurableStore for WebLocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        #[cfg(target_arch = "wasm32")]
        {
            // Disabled storage reads as empty.
            let Ok(storage) = local_storage() else {
                return Ok(None);
            };
            storage
                .get_item(key)
                .map_err(|e| format!("localStorage get_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .set_item(key, value)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
            Ok(())
        }
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .remove_item(key)
                .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn local_storage_is_inert_off_wasm() {
        let store = WebLocalStorage;
        assert!(!store.is_available());
        store.set("user", "{}").expect("set");
        assert_eq!(store.get("user").expect("get"), None);
        store.remove("user").expect("remove");
    }
}
