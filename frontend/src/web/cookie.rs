use assetdesk::{CookieSource, read_cookie};
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

/// 读取 `document.cookie`
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentCookies;

impl CookieSource for DocumentCookies {
    fn cookie(&self, name: &str) -> Option<String> {
        let document = web_sys::window()?.document()?;
        let raw = document.dyn_into::<HtmlDocument>().ok()?.cookie().ok()?;
        read_cookie(&raw, name)
    }
}
