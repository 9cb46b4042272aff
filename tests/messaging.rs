//! Integration tests for direct messages.

mod common;

use std::time::Duration;

use common::TestServer;

#[tokio::test]
async fn test_direct_message() {
    let server = TestServer::spawn(17121)
        .await
        .expect("Failed to spawn test server");
    let mut alice = server.connect_registered("@alice").await.unwrap();
    let mut bob = server.connect_registered("@bob").await.unwrap();
    let mut carol = server.connect_registered("@carol").await.unwrap();

    alice.msg("@bob", "psst").await.unwrap();

    assert_eq!(bob.recv().await.unwrap(), "@alice: psst");
    assert_eq!(alice.recv().await.unwrap(), "->> MSG OK: delivered to @bob");
    carol
        .expect_silence(Duration::from_millis(200))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_direct_message_to_unknown_user() {
    let server = TestServer::spawn(17122)
        .await
        .expect("Failed to spawn test server");
    let mut alice = server.connect_registered("@alice").await.unwrap();

    alice.msg("@ghost", "boo").await.unwrap();
    assert_eq!(
        alice.recv().await.unwrap(),
        "->> ERR: @ghost is not a registered user"
    );
}

#[tokio::test]
async fn test_channel_message_requires_membership() {
    let server = TestServer::spawn(17123)
        .await
        .expect("Failed to spawn test server");
    let mut alice = server.connect_registered("@alice").await.unwrap();
    let mut bob = server.connect_registered("@bob").await.unwrap();
    alice.join("#rust").await.unwrap();

    bob.msg("#rust", "let me in").await.unwrap();
    assert_eq!(
        bob.recv().await.unwrap(),
        "->> ERR: @bob isn't a member of #rust"
    );
    alice
        .expect_silence(Duration::from_millis(200))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_literal_delimiter_is_accepted() {
    let server = TestServer::spawn(17124)
        .await
        .expect("Failed to spawn test server");
    let mut alice = server.connect_registered("@alice").await.unwrap();
    let mut bob = server.connect_registered("@bob").await.unwrap();

    alice.send_bytes(b"MSG @bob 2\\r\\nyo\r\n").await.unwrap();
    assert_eq!(bob.recv().await.unwrap(), "@alice: yo");
    assert_eq!(alice.recv().await.unwrap(), "->> MSG OK: delivered to @bob");
}

#[tokio::test]
async fn test_literal_delimiter_short_body_keeps_next_command() {
    let server = TestServer::spawn(17125)
        .await
        .expect("Failed to spawn test server");
    let mut alice = server.connect_registered("@alice").await.unwrap();
    let mut bob = server.connect_registered("@bob").await.unwrap();

    alice
        .send_bytes(b"MSG @bob 10\\r\\nhi\r\nCHNS\r\n")
        .await
        .unwrap();

    assert_eq!(
        alice.recv().await.unwrap(),
        "->> ERR: Body truncated: expected 10 bytes, got 2"
    );
    assert_eq!(alice.recv().await.unwrap(), "->> CHNS: no channels");
    bob.expect_silence(Duration::from_millis(200)).await.unwrap();
}
