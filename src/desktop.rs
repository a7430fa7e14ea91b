//! Desktop Host Bridge
//!
//! When the UI runs inside the Tauri desktop shell, some changes are
//! announced to the host through the Tauri event API.

use serde::Serialize;

#[cfg(target_arch = "wasm32")]
mod bindings {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "event"])]
        pub async fn emit(event: &str, payload: JsValue) -> Result<JsValue, JsValue>;
    }
}

/// True inside the desktop shell
pub fn is_desktop() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| js_sys::Reflect::get(&w, &"__TAURI__".into()).ok())
            .map(|value| !value.is_undefined() && !value.is_null())
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        false
    }
}

/// Emit `event` to the host. Silently skipped outside the desktop shell.
pub fn send_to_desktop<T: Serialize>(event: &'static str, payload: &T) {
    if !is_desktop() {
        return;
    }
    #[cfg(target_arch = "wasm32")]
    {
        let payload = match serde_wasm_bindgen::to_value(payload) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("[desktop] cannot encode {} payload: {}", event, e);
                return;
            }
        };
        leptos::task::spawn_local(async move {
            if let Err(e) = bindings::emit(event, payload).await {
                log::warn!("[desktop] emit {} failed: {:?}", event, e);
            }
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (event, payload);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_host_off_the_browser() {
        assert!(!is_desktop());
        // must not panic without a host
        send_to_desktop("team-update", &serde_json::json!({ "id": "t1" }));
    }
}
