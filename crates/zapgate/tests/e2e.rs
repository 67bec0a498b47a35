// SPDX-FileCopyrightText: 2026 Zapgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end test over the assembled bridge: lifecycle manager, relay
//! pipeline, status publisher, and the local observability router, with a
//! mock transport and a mock backend standing in for the externals.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;
use zapgate_config::model::{RelayConfig, TransportConfig};
use zapgate_core::{CredentialStore, DisconnectCause, StatusSnapshot, TransportEvent};
use zapgate_session::{FsCredentialStore, LifecycleManager, RelayPipeline, StatusPublisher};
use zapgate_test_utils::{MockBackend, MockTransport, ScriptedRelay, make_inbound};
use zapgate_web::{WebState, router};

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test(start_paused = true)]
async fn full_session_pairing_relay_and_logout() {
    let tmp = tempfile::tempdir().unwrap();
    let transport = MockTransport::new();
    let backend = MockBackend::new();
    let store = Arc::new(FsCredentialStore::new(tmp.path().join("auth_state")));
    let (status_tx, status_rx) = watch::channel(StatusSnapshot::default());
    let cancel = CancellationToken::new();

    // Assemble the same components `zapgate serve` wires up.
    let relay = RelayPipeline::new(Arc::new(backend.clone()), &RelayConfig::default());
    let manager = LifecycleManager::new(
        Arc::new(transport.clone()),
        Arc::new(backend.clone()),
        store.clone(),
        relay,
        status_tx,
        TransportConfig::default(),
    );
    let manager_task = tokio::spawn(manager.run(cancel.clone()));

    let publisher = StatusPublisher::new(
        Arc::new(backend.clone()),
        status_rx.clone(),
        Duration::from_secs(5),
    );
    let publisher_task = tokio::spawn(publisher.run(cancel.clone()));

    let web_state = WebState {
        status: status_rx.clone(),
    };

    transport.wait_for_connects(1).await;

    // Phase 1: pairing. The QR shows up on the local endpoint.
    transport
        .emit(TransportEvent::QrIssued {
            challenge: "2@pairing-challenge".into(),
        })
        .await;
    loop {
        if status_rx.borrow().qr_challenge.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let (status, json) = get_json(router(web_state.clone()), "/qr-data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "Scan the QR code");
    assert!(
        json["qr"]
            .as_str()
            .is_some_and(|u| u.starts_with("data:image/svg+xml;base64,"))
    );

    // Phase 2: the device scans; the session opens.
    transport
        .emit(TransportEvent::SessionOpen {
            identity: "5511999990000".into(),
        })
        .await;
    loop {
        if status_rx.borrow().connected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let (status, json) = get_json(router(web_state.clone()), "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["connected"], true);
    assert_eq!(json["hasQR"], false);
    assert_eq!(json["phone_number"], "5511999990000");

    // The QR endpoint no longer serves an artifact.
    let response = router(web_state.clone())
        .oneshot(Request::builder().uri("/qr").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Phase 3: a customer message flows through with humanized delivery.
    backend
        .push_relay(ScriptedRelay::Reply(Some("Olá! Como posso ajudar?".into())))
        .await;
    transport
        .emit(TransportEvent::Message(make_inbound(
            "5511888880000@s.whatsapp.net",
            "A1",
            "oi",
        )))
        .await;

    transport.wait_for_sent_texts(1).await;
    let relayed = backend.relayed().await;
    assert_eq!(relayed.len(), 1);
    assert_eq!(relayed[0].0.0, "5511888880000@s.whatsapp.net");
    assert_eq!(relayed[0].1, "oi");

    let texts = transport.sent_texts().await;
    assert_eq!(texts[0].1, "Olá! Como posso ajudar?");
    // composing before the delay, paused after.
    let presences = transport.presence_updates().await;
    assert_eq!(presences.len(), 2);

    // A duplicate delivery is absorbed by the dedup gate.
    transport
        .emit(TransportEvent::Message(make_inbound(
            "5511888880000@s.whatsapp.net",
            "A1",
            "oi",
        )))
        .await;
    tokio::time::sleep(Duration::from_secs(4)).await;
    assert_eq!(backend.relay_count().await, 1);

    // Phase 4: the periodic publisher keeps resending the current truth.
    let pushed_before = backend.statuses().await.len();
    tokio::time::sleep(Duration::from_secs(11)).await;
    let pushed_after = backend.statuses().await.len();
    assert!(
        pushed_after >= pushed_before + 2,
        "expected at least two timer pushes, got {pushed_before} -> {pushed_after}"
    );

    // Phase 5: remote logout. The manager halts, credentials are gone, and
    // the local endpoint keeps answering with the terminal state.
    transport
        .emit(TransportEvent::SessionClosed {
            cause: DisconnectCause::LoggedOut,
        })
        .await;
    manager_task.await.unwrap();

    assert_eq!(transport.connect_count().await, 1);
    assert!(store.load_all().await.unwrap().is_empty());

    let (status, json) = get_json(router(web_state.clone()), "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "Logged out - scan again");
    assert_eq!(json["connected"], false);

    cancel.cancel();
    publisher_task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn backend_timeout_drops_reply_but_pipeline_survives() {
    let tmp = tempfile::tempdir().unwrap();
    let transport = MockTransport::new();
    let backend = MockBackend::new();
    // First relay fails like a timeout; the second succeeds.
    backend.push_relay(ScriptedRelay::Error).await;
    backend
        .push_relay(ScriptedRelay::Reply(Some("ainda aqui".into())))
        .await;

    let store = Arc::new(FsCredentialStore::new(tmp.path().join("auth_state")));
    let (status_tx, _status_rx) = watch::channel(StatusSnapshot::default());
    let cancel = CancellationToken::new();

    let relay = RelayPipeline::new(Arc::new(backend.clone()), &RelayConfig::default());
    let manager = LifecycleManager::new(
        Arc::new(transport.clone()),
        Arc::new(backend.clone()),
        store,
        relay,
        status_tx,
        TransportConfig::default(),
    );
    let manager_task = tokio::spawn(manager.run(cancel.clone()));
    transport.wait_for_connects(1).await;

    transport
        .emit(TransportEvent::Message(make_inbound(
            "a@s.whatsapp.net",
            "T1",
            "primeira",
        )))
        .await;
    transport
        .emit(TransportEvent::Message(make_inbound(
            "a@s.whatsapp.net",
            "T2",
            "segunda",
        )))
        .await;

    // Only the second message produced an outbound reply.
    transport.wait_for_sent_texts(1).await;
    let texts = transport.sent_texts().await;
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].1, "ainda aqui");
    assert_eq!(backend.relay_count().await, 2);

    cancel.cancel();
    manager_task.await.unwrap();
}
