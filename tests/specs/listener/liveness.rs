// SPDX-License-Identifier: MIT

//! Liveness (ping/pong) specs over a full client.

use crate::prelude::*;
use lscp_client::Status;

#[tokio::test]
async fn ping_is_answered_for_the_subscribed_session() {
    let server = MockSampler::start(vec!["OK[xyz42]\r\n"]).await;
    let peer = EventPeer::start().await;
    let mut client = server.client().await;

    assert_eq!(client.subscribe().await.unwrap(), Status::Ok);
    let port = client.notification_port();

    peer.send(format!("PING {port} xyz42\r\n").as_bytes(), port).await;
    assert_eq!(peer.recv().await.as_deref(), Some("PONG xyz42\r\n"));
    client.close().await;
}

#[tokio::test]
async fn first_ping_assigns_the_session_id() {
    let server = MockSampler::start(vec![]).await;
    let peer = EventPeer::start().await;
    let client = server.client().await;
    let port = client.notification_port();

    // No subscribe acknowledgment yet: the ping's token is adopted.
    peer.send(format!("PING {port} fresh77\r\n").as_bytes(), port).await;
    assert_eq!(peer.recv().await.as_deref(), Some("PONG fresh77\r\n"));
    assert_eq!(client.session_id().as_deref(), Some("fresh77"));
    client.close().await;
}

#[tokio::test]
async fn stray_ping_gets_no_pong_and_changes_nothing() {
    let server = MockSampler::start(vec!["OK[current1]\r\n"]).await;
    let peer = EventPeer::start().await;
    let mut client = server.client().await;

    client.subscribe().await.unwrap();
    let port = client.notification_port();

    peer.send(format!("PING {port} previous0\r\n").as_bytes(), port).await;
    assert_eq!(peer.recv().await, None);
    assert_eq!(client.session_id().as_deref(), Some("current1"));
    client.close().await;
}
