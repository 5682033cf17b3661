// SPDX-License-Identifier: MIT

//! Subscribe/unsubscribe registration specs.

use crate::prelude::*;
use lscp_client::{ClientError, Status};

#[tokio::test]
async fn subscribe_parses_the_session_id() {
    let server = MockSampler::start(vec!["OK[abc123]\r\n"]).await;
    let mut client = server.client().await;

    assert_eq!(client.subscribe().await.unwrap(), Status::Ok);
    assert_eq!(client.session_id().as_deref(), Some("abc123"));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0],
        format!("SUBSCRIBE NOTIFICATION {}\r\n", client.notification_port())
    );
    client.close().await;
}

#[tokio::test]
async fn second_subscribe_is_refused_without_touching_the_wire() {
    let server = MockSampler::start(vec!["OK[abc123]\r\n"]).await;
    let mut client = server.client().await;

    client.subscribe().await.unwrap();
    let err = client.subscribe().await.unwrap_err();
    assert!(matches!(err, ClientError::AlreadySubscribed));
    assert_eq!(server.requests().len(), 1);
    client.close().await;
}

#[tokio::test]
async fn subscribe_rejected_by_server_holds_no_session() {
    let server = MockSampler::start(vec!["ERR:1:no notification support\r\n"]).await;
    let mut client = server.client().await;

    assert_eq!(client.subscribe().await.unwrap(), Status::Error);
    assert!(client.session_id().is_none());
    client.close().await;
}

#[tokio::test]
async fn unsubscribe_clears_the_session() {
    let server = MockSampler::start(vec!["OK[abc123]\r\n", "OK\r\n"]).await;
    let mut client = server.client().await;

    client.subscribe().await.unwrap();
    assert_eq!(client.unsubscribe().await.unwrap(), Status::Ok);
    assert!(client.session_id().is_none());

    let requests = server.requests();
    assert_eq!(requests[1], "UNSUBSCRIBE NOTIFICATION abc123\r\n");
    client.close().await;
}

#[tokio::test]
async fn unsubscribe_without_session_is_refused() {
    let server = MockSampler::start(vec![]).await;
    let mut client = server.client().await;

    let err = client.unsubscribe().await.unwrap_err();
    assert!(matches!(err, ClientError::NotSubscribed));
    assert!(server.requests().is_empty());
    client.close().await;
}

#[tokio::test]
async fn failed_unsubscribe_keeps_the_session() {
    let server = MockSampler::start(vec!["OK[abc123]\r\n", "ERR:9:not subscribed\r\n"]).await;
    let mut client = server.client().await;

    client.subscribe().await.unwrap();
    assert_eq!(client.unsubscribe().await.unwrap(), Status::Error);
    assert_eq!(client.session_id().as_deref(), Some("abc123"));
    client.close().await;
}
