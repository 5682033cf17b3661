// SPDX-License-Identifier: MIT

//! Connection lifecycle specs.

use std::sync::Arc;

use crate::prelude::*;
use lscp_client::ClientError;

#[tokio::test]
async fn connect_then_close() {
    let server = MockSampler::start(vec![]).await;
    let client = server.client().await;
    assert!(client.session_id().is_none());
    assert!(client.result().is_none());
    client.close().await;
}

#[tokio::test]
async fn connect_refused_reports_connect_error() {
    // Nothing listens on the discard port on loopback.
    let err = lscp_client::Client::connect("127.0.0.1", 9, Arc::new(NullHandler))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Connect(_)));
}

#[tokio::test]
async fn notification_port_is_bound() {
    let server = MockSampler::start(vec![]).await;
    let client = server.client().await;
    assert_ne!(client.notification_port(), 0);
    client.close().await;
}

#[test]
fn version_tellers() {
    assert_eq!(lscp_client::PACKAGE, "lscp-client");
    assert!(!lscp_client::VERSION.is_empty());
}
