// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the local observability endpoint.
//!
//! Pure read projections over the status watch channel: nothing here
//! mutates connection state.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use tracing::error;
use zapgate_core::qr;

use crate::server::WebState;

/// Response body for `GET /qr-data`.
#[derive(Debug, Serialize)]
pub struct QrDataResponse {
    /// Rendered login challenge as a data URL, or null.
    pub qr: Option<String>,
    /// Human-readable connection phase label.
    pub status: String,
    /// Whether a transport session is established.
    pub connected: bool,
    /// Bound account identifier, when connected.
    pub phone_number: Option<String>,
}

/// Response body for `GET /status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(rename = "hasQR")]
    pub has_qr: bool,
    pub connected: bool,
    pub phone_number: Option<String>,
}

/// GET /qr-data
///
/// The current snapshot plus the rendered QR artifact as a data URL.
pub async fn get_qr_data(State(state): State<WebState>) -> Json<QrDataResponse> {
    let snapshot = state.status.borrow().clone();
    Json(QrDataResponse {
        qr: snapshot.qr_data_url,
        status: snapshot.status_text,
        connected: snapshot.connected,
        phone_number: snapshot.session_identity,
    })
}

/// GET /qr
///
/// The raw QR artifact as image bytes; 404 while no challenge is
/// outstanding, generic 500 on a rendering failure.
pub async fn get_qr(State(state): State<WebState>) -> Response {
    let challenge = state.status.borrow().qr_challenge.clone();
    let Some(challenge) = challenge else {
        return (StatusCode::NOT_FOUND, "QR not available").into_response();
    };

    match qr::render_svg(&challenge) {
        Ok(svg) => ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response(),
        Err(e) => {
            error!(error = %e, "failed to render QR artifact");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render QR").into_response()
        }
    }
}

/// GET /status
pub async fn get_status(State(state): State<WebState>) -> Json<StatusResponse> {
    let snapshot = state.status.borrow().clone();
    Json(StatusResponse {
        status: snapshot.status_text,
        has_qr: snapshot.qr_challenge.is_some(),
        connected: snapshot.connected,
        phone_number: snapshot.session_identity,
    })
}

/// GET /
///
/// Minimal auto-refreshing status page for operators pairing a device.
pub async fn get_index(State(state): State<WebState>) -> Html<String> {
    let snapshot = state.status.borrow().clone();

    let body = if snapshot.connected {
        let identity = snapshot
            .session_identity
            .map(|p| format!("<p>Number: {p}</p>"))
            .unwrap_or_default();
        format!("<p>Session active and replying.</p>{identity}")
    } else if snapshot.qr_challenge.is_some() {
        r#"<p><img src="/qr" alt="QR code" width="300"></p>
<p>Open the app on your phone, go to Linked Devices and scan this code.</p>"#
            .to_string()
    } else {
        "<p>Waiting for the login challenge. This can take a few seconds.</p>".to_string()
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>Zapgate</title>
  <meta charset="UTF-8">
  <meta http-equiv="refresh" content="3">
</head>
<body>
  <h1>Zapgate</h1>
  <p><strong>{status}</strong></p>
  {body}
</body>
</html>
"#,
        status = snapshot.status_text,
    ))
}
