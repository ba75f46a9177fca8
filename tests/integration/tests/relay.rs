//! Room relay behavior over real WebSocket connections.

use futures::SinkExt;
use pairdebug_core::RoomId;
use pairdebug_gateway::{ClientEvent, CodeUpdate, DebugResultUpdate, ServerEvent};
use pairdebug_integration_tests::{next_event, send_event, wait_for, TestServer};
use pairdebug_providers::HuggingFaceProvider;
use std::sync::Arc;
use std::time::Duration;
use tokio_tungstenite::tungstenite::Message;

const RECEIVE: Duration = Duration::from_secs(2);
const SILENCE: Duration = Duration::from_millis(200);

async fn start() -> TestServer {
    // Relay tests never reach the completion service.
    let provider = HuggingFaceProvider::new("http://127.0.0.1:9/unused", "").unwrap();
    TestServer::start(Arc::new(provider)).await
}

fn code_update(room: &str, code: &str) -> ClientEvent {
    ClientEvent::CodeUpdate(CodeUpdate {
        room_id: RoomId::from(room),
        code: code.to_string(),
    })
}

#[tokio::test]
async fn test_code_update_reaches_peer_untransformed() {
    let server = start().await;
    let room = RoomId::from("abc123");
    let mut a = server.connect().await;
    let mut b = server.connect().await;

    send_event(&mut a, &ClientEvent::JoinRoom(room.clone())).await;
    send_event(&mut b, &ClientEvent::JoinRoom(room.clone())).await;
    wait_for(|| server.gateway.relay().members(&room).len() == 2).await;

    send_event(&mut a, &code_update("abc123", "let x = 1;")).await;

    assert_eq!(
        next_event(&mut b, RECEIVE).await,
        Some(ServerEvent::CodeUpdate("let x = 1;".to_string()))
    );
    assert_eq!(next_event(&mut b, SILENCE).await, None);
    assert_eq!(next_event(&mut a, SILENCE).await, None);
}

#[tokio::test]
async fn test_debug_result_rebroadcast() {
    let server = start().await;
    let room = RoomId::from("review");
    let mut a = server.connect().await;
    let mut b = server.connect().await;
    let mut c = server.connect().await;

    for ws in [&mut a, &mut b, &mut c] {
        send_event(ws, &ClientEvent::JoinRoom(room.clone())).await;
    }
    wait_for(|| server.gateway.relay().members(&room).len() == 3).await;

    send_event(
        &mut b,
        &ClientEvent::DebugResult(DebugResultUpdate {
            room_id: room.clone(),
            result: "Line 3: undefined variable".to_string(),
        }),
    )
    .await;

    let expected = Some(ServerEvent::DebugResult("Line 3: undefined variable".to_string()));
    assert_eq!(next_event(&mut a, RECEIVE).await, expected);
    assert_eq!(next_event(&mut c, RECEIVE).await, expected);
    assert_eq!(next_event(&mut b, SILENCE).await, None);
}

#[tokio::test]
async fn test_connection_without_room_delivers_nothing() {
    let server = start().await;
    let room = RoomId::from("abc123");
    let mut member = server.connect().await;
    let mut outsider = server.connect().await;

    send_event(&mut member, &ClientEvent::JoinRoom(room.clone())).await;
    wait_for(|| server.gateway.relay().members(&room).len() == 1).await;

    send_event(&mut outsider, &code_update("abc123", "rm -rf /")).await;

    assert_eq!(next_event(&mut member, SILENCE).await, None);
}

#[tokio::test]
async fn test_disconnected_peer_stops_receiving() {
    let server = start().await;
    let room = RoomId::from("abc123");
    let other_room = RoomId::from("side");
    let mut a = server.connect().await;
    let mut b = server.connect().await;

    send_event(&mut a, &ClientEvent::JoinRoom(room.clone())).await;
    send_event(&mut b, &ClientEvent::JoinRoom(room.clone())).await;
    send_event(&mut b, &ClientEvent::JoinRoom(other_room.clone())).await;
    wait_for(|| {
        server.gateway.relay().members(&room).len() == 2
            && server.gateway.relay().members(&other_room).len() == 1
    })
    .await;

    b.close(None).await.unwrap();
    drop(b);
    wait_for(|| server.gateway.relay().connection_count() == 1).await;

    assert_eq!(server.gateway.relay().members(&room).len(), 1);
    assert_eq!(server.gateway.relay().room_count(), 1);

    // Sender sees no error and the connection stays usable.
    send_event(&mut a, &code_update("abc123", "still here")).await;
    send_event(&mut a, &ClientEvent::JoinRoom(other_room.clone())).await;
    wait_for(|| server.gateway.relay().members(&other_room).len() == 1).await;
}

#[tokio::test]
async fn test_malformed_frame_keeps_connection_open() {
    let server = start().await;
    let room = RoomId::from("abc123");
    let mut a = server.connect().await;
    let mut b = server.connect().await;

    a.send(Message::Text("{\"event\":\"leave-room\"}".to_string()))
        .await
        .unwrap();
    a.send(Message::Text("garbage".to_string())).await.unwrap();

    send_event(&mut a, &ClientEvent::JoinRoom(room.clone())).await;
    send_event(&mut b, &ClientEvent::JoinRoom(room.clone())).await;
    wait_for(|| server.gateway.relay().members(&room).len() == 2).await;

    send_event(&mut a, &code_update("abc123", "ok")).await;
    assert_eq!(
        next_event(&mut b, RECEIVE).await,
        Some(ServerEvent::CodeUpdate("ok".to_string()))
    );
}
