use super::*;
use crate::assets::{DirTextureProvider, TextureStatus};
use tokio::sync::mpsc;

const IDLE_MS: i64 = 120_000;

fn room(variant: Variant) -> Arc<SessionRoom> {
    let config = GameConfig {
        seed: Some(3),
        ..GameConfig::with_variant(variant)
    };
    Arc::new(SessionRoom::new(config, IDLE_MS, 0).expect("room"))
}

fn textures(root: &str) -> TextureCache<DirTextureProvider> {
    TextureCache::new(DirTextureProvider::new(std::env::temp_dir().join(root)))
}

fn parse(payload: &str) -> serde_json::Value {
    serde_json::from_str(payload).expect("json payload")
}

#[tokio::test]
async fn attach_sends_welcome_then_frames_stream_state() {
    let room = room(Variant::Grid);
    let textures = textures("snake-arcade-runtime-none");
    let (tx, mut rx) = mpsc::unbounded_channel();
    room.attach(tx).await;

    let welcome = parse(&rx.recv().await.expect("welcome"));
    assert_eq!(welcome["type"], "welcome");
    assert_eq!(welcome["sessionId"], room.id());
    assert_eq!(welcome["variant"], "grid");

    let delay = room.frame(&textures, 100).await;
    assert_eq!(delay, Some(Duration::from_millis(100)));
    let frame = parse(&rx.recv().await.expect("state"));
    assert_eq!(frame["type"], "state");
    assert_eq!(frame["state"]["now"], 100);
    assert!(frame["skin"].is_null());
}

#[tokio::test]
async fn frame_without_a_client_stops_the_loop() {
    let room = room(Variant::Grid);
    let textures = textures("snake-arcade-runtime-none");
    assert_eq!(room.frame(&textures, 0).await, None);

    let (tx, _rx) = mpsc::unbounded_channel();
    room.attach(tx).await;
    room.detach().await;
    assert_eq!(room.frame(&textures, 0).await, None);
}

#[tokio::test]
async fn closed_channel_ends_the_session_loop() {
    let room = room(Variant::Grid);
    let textures = textures("snake-arcade-runtime-none");
    let (tx, rx) = mpsc::unbounded_channel();
    room.attach(tx).await;
    drop(rx);
    assert_eq!(room.frame(&textures, 0).await, None);
}

#[tokio::test]
async fn key_messages_steer_the_snake() {
    let room = room(Variant::Grid);
    let textures = textures("snake-arcade-runtime-none");
    room.handle_text_message(r#"{"type":"key","key":"ArrowUp"}"#, &textures, 10)
        .await;
    let snapshot = serde_json::to_value(room.snapshot(10).await).expect("json");
    assert_eq!(snapshot["snake"]["direction"], "up");
}

#[tokio::test]
async fn purchase_over_the_socket_replies_with_outcome() {
    let room = room(Variant::Grid);
    let textures = textures("snake-arcade-runtime-none");
    let (tx, mut rx) = mpsc::unbounded_channel();
    room.attach(tx).await;
    rx.recv().await.expect("welcome");

    room.handle_text_message(r#"{"type":"purchase","item":"speedBoost"}"#, &textures, 0)
        .await;
    let reply = parse(&rx.recv().await.expect("store reply"));
    assert_eq!(reply["type"], "store");
    assert_eq!(reply["ok"], false);

    room.grant_gems(10).await.expect("grant");
    room.handle_text_message(r#"{"type":"purchase","item":"speedBoost"}"#, &textures, 0)
        .await;
    let reply = parse(&rx.recv().await.expect("store reply"));
    assert_eq!(reply["ok"], true);
    assert_eq!(room.frame(&textures, 0).await, Some(Duration::from_millis(70)));
}

#[tokio::test]
async fn idle_sessions_are_recreated() {
    let room = room(Variant::Grid);
    let textures = textures("snake-arcade-runtime-none");
    let (tx, _rx) = mpsc::unbounded_channel();
    room.attach(tx).await;

    room.grant_gems(7).await.expect("grant");
    room.frame(&textures, IDLE_MS - 1).await;
    assert!(room.snapshot(IDLE_MS - 1).await.gems >= 7);

    // A fresh session has at most the gem from a lucky first bite.
    room.frame(&textures, IDLE_MS).await;
    assert!(room.snapshot(IDLE_MS).await.gems < 7);
}

#[tokio::test]
async fn input_postpones_the_idle_reset() {
    let room = room(Variant::Grid);
    let textures = textures("snake-arcade-runtime-none");
    let (tx, _rx) = mpsc::unbounded_channel();
    room.attach(tx).await;

    room.grant_gems(7).await.expect("grant");
    room.handle_text_message(r#"{"type":"key","key":"w"}"#, &textures, IDLE_MS - 10)
        .await;
    room.frame(&textures, IDLE_MS).await;
    assert!(room.snapshot(IDLE_MS).await.gems >= 7);
}

#[tokio::test]
async fn unknown_skin_ids_are_dropped_before_the_cache() {
    let room = room(Variant::Space);
    let textures = textures("snake-arcade-runtime-none");
    let (tx, mut rx) = mpsc::unbounded_channel();
    room.attach(tx).await;
    rx.recv().await.expect("welcome");

    for index in 0..50 {
        let message = format!(r#"{{"type":"skin","id":"brie-{index}"}}"#);
        room.handle_text_message(&message, &textures, 0).await;
        assert_eq!(textures.status(&format!("brie-{index}")), TextureStatus::Unrequested);
    }

    room.frame(&textures, 0).await;
    let frame = parse(&rx.recv().await.expect("state"));
    assert!(frame["skin"].is_null());
    assert_eq!(frame["state"]["snake"]["variant"], "space");
}

#[tokio::test]
async fn shipped_skin_reaches_the_frame() {
    let root = std::env::temp_dir().join(format!("snake-arcade-runtime-skins-{}", std::process::id()));
    let dir = root.join("images").join("cheese");
    std::fs::create_dir_all(&dir).expect("create asset dir");
    std::fs::write(dir.join("cheddar.svg"), "<svg/>").expect("write svg");
    let textures = TextureCache::new(DirTextureProvider::new(&root));

    let room = room(Variant::Grid);
    let (tx, mut rx) = mpsc::unbounded_channel();
    room.attach(tx).await;
    rx.recv().await.expect("welcome");

    room.handle_text_message(r#"{"type":"skin","id":"cheddar"}"#, &textures, 0)
        .await;
    for _ in 0..200 {
        if textures.status("cheddar") != TextureStatus::Pending {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(textures.status("cheddar"), TextureStatus::Ready);

    room.frame(&textures, 0).await;
    let frame = parse(&rx.recv().await.expect("state"));
    assert_eq!(frame["skin"], "/assets/images/cheese/cheddar.svg");

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn direct_purchase_snapshot_uses_the_callers_clock() {
    let room = room(Variant::Grid);
    room.grant_gems(25).await.expect("grant");
    let snapshot = room
        .purchase(StoreItem::DoublePoints, 4_321)
        .await
        .expect("purchase");
    assert_eq!(snapshot.now, 4_321);
    assert_eq!(snapshot.multiplier, 2);
    assert_eq!(snapshot.gems, 0);
}

#[tokio::test]
async fn debug_kill_starts_the_reset_countdown() {
    let room = room(Variant::Grid);
    assert!(room.debug_kill(500).await);
    let snapshot = room.snapshot(500).await;
    assert_eq!(snapshot.death_count, 1);
    assert!(!room.debug_kill(600).await);
}
