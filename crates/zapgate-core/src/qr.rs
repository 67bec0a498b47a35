// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Login challenge rendering: challenge string -> scannable SVG artifact.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

use crate::error::ZapgateError;

/// Renders the login challenge as an SVG image.
pub fn render_svg(challenge: &str) -> Result<String, ZapgateError> {
    let code = QrCode::with_error_correction_level(challenge.as_bytes(), EcLevel::M)
        .map_err(|e| ZapgateError::Render(format!("failed to encode challenge: {e}")))?;

    Ok(code
        .render::<svg::Color>()
        .min_dimensions(300, 300)
        .quiet_zone(true)
        .build())
}

/// Renders the login challenge as a `data:image/svg+xml;base64,...` URL
/// suitable for embedding in status payloads and web pages.
pub fn render_data_url(challenge: &str) -> Result<String, ZapgateError> {
    let svg = render_svg(challenge)?;
    Ok(format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(svg.as_bytes())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_svg_for_typical_challenge() {
        let svg = render_svg("2@AbCdEf0123456789,KeyMaterial==,Extra==").unwrap();
        assert!(svg.starts_with("<?xml") || svg.starts_with("<svg"));
        assert!(svg.contains("svg"));
    }

    #[test]
    fn data_url_has_svg_media_type() {
        let url = render_data_url("2@AbCdEf0123456789").unwrap();
        assert!(url.starts_with("data:image/svg+xml;base64,"));
        // The payload must be valid base64.
        let payload = url.trim_start_matches("data:image/svg+xml;base64,");
        assert!(STANDARD.decode(payload).is_ok());
    }

    #[test]
    fn empty_challenge_still_renders() {
        // The encoder accepts empty input; the artifact is just a tiny code.
        assert!(render_svg("").is_ok());
    }
}
