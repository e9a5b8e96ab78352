//! Hosted diagram link encoding.

use std::io::Write;

use base64::{Engine, engine::general_purpose::URL_SAFE};
use flate2::{Compression, write::ZlibEncoder};
use log::warn;

/// Path template of the hosted Mermaid renderer.
pub const DIAGRAM_SERVICE_URL: &str = "https://kroki.io/mermaid/svg/";

/// Compresses `diagram` at level 9 and encodes it with the URL-safe base64
/// alphabet (`+` as `-`, `/` as `_`).
pub fn encode_diagram(diagram: &str) -> std::io::Result<String> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(diagram.as_bytes())?;
    let compressed = encoder.finish()?;
    Ok(URL_SAFE.encode(compressed))
}

/// Full link to the rendered diagram, or `None` when encoding fails.
pub fn diagram_url(diagram: &str) -> Option<String> {
    match encode_diagram(diagram) {
        Ok(payload) => Some(format!("{DIAGRAM_SERVICE_URL}{payload}")),
        Err(e) => {
            warn!("Failed to encode diagram link: {e}");
            None
        }
    }
}
