use gloo::file::{Blob, ObjectUrl};
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

/// Save bytes to disk through a temporary anchor element.
pub fn save_bytes(bytes: &[u8], filename: &str, mime_type: &str) -> Result<(), String> {
    let blob = Blob::new_with_options(bytes, Some(mime_type));
    let url = ObjectUrl::from(blob);

    let document = gloo::utils::document();
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "Could not create download link".to_string())?
        .dyn_into()
        .map_err(|_| "Could not create download link".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(filename);

    let body = gloo::utils::body();
    body.append_child(&anchor)
        .map_err(|_| "Could not attach download link".to_string())?;
    anchor.click();
    anchor.remove();
    // `url` is revoked when dropped here.
    Ok(())
}
