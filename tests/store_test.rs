mod common;

use std::collections::BTreeMap;

use hot100cli::management::{load_document, lookup_playlist_id, merge_playlist_id};
use hot100cli::types::{PlaylistRecord, ResolvedTrack};
use serde_json::{Value, json};

fn record(entries: &[(&str, &str)]) -> PlaylistRecord {
    PlaylistRecord {
        playlist: entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
        ..Default::default()
    }
}

#[test]
fn test_lookup_playlist_id() {
    let doc = record(&[("2020-01-01 Billboard 100", "uri:X")]);

    assert_eq!(
        lookup_playlist_id("2020-01-01 Billboard 100", Some(&doc)),
        Some("uri:X".to_string())
    );
    assert_eq!(lookup_playlist_id("1999-12-31 Billboard 100", Some(&doc)), None);
    assert_eq!(lookup_playlist_id("2020-01-01 Billboard 100", None), None);
}

#[test]
fn test_merge_into_absent_document() {
    let merged = merge_playlist_id("name", "uri:1", None).unwrap();
    assert_eq!(merged, record(&[("name", "uri:1")]));
}

#[test]
fn test_merge_existing_name_is_skipped() {
    let doc = record(&[("name", "uri:1")]);
    assert_eq!(merge_playlist_id("name", "uri:2", Some(doc)), None);
}

#[test]
fn test_merge_keeps_existing_entries() {
    let doc = record(&[("a", "uri:a")]);
    let merged = merge_playlist_id("b", "uri:b", Some(doc)).unwrap();
    assert_eq!(merged, record(&[("a", "uri:a"), ("b", "uri:b")]));
}

#[tokio::test]
async fn test_load_missing_or_malformed_document() {
    let (dir, store) = common::temp_store();

    assert!(store.load_playlists().await.is_none());

    std::fs::create_dir_all(dir.join("data")).unwrap();
    std::fs::write(store.playlist_path(), "{ not json").unwrap();
    assert!(store.load_playlists().await.is_none());

    // Wrong shape under the top-level key is treated like no document
    std::fs::write(store.playlist_path(), r#"{"playlist": ["a", "b"]}"#).unwrap();
    assert!(load_document::<PlaylistRecord>(store.playlist_path()).await.is_none());
}

#[tokio::test]
async fn test_save_playlist_id_writes_and_skips() {
    let (_dir, store) = common::temp_store();

    let written = store
        .save_playlist_id("2020-01-01 Billboard 100", "uri:X", None)
        .await
        .unwrap();
    assert!(written);

    let on_disk: Value =
        serde_json::from_str(&std::fs::read_to_string(store.playlist_path()).unwrap()).unwrap();
    assert_eq!(on_disk, json!({"playlist": {"2020-01-01 Billboard 100": "uri:X"}}));

    let doc = store.load_playlists().await;
    let before = std::fs::read_to_string(store.playlist_path()).unwrap();
    let written = store
        .save_playlist_id("2020-01-01 Billboard 100", "uri:Y", doc)
        .await
        .unwrap();
    assert!(!written);
    assert_eq!(std::fs::read_to_string(store.playlist_path()).unwrap(), before);

    let doc = store.load_playlists().await;
    store
        .save_playlist_id("1985-07-13 Billboard 100", "uri:Z", doc)
        .await
        .unwrap();
    let doc = store.load_playlists().await.unwrap();
    assert_eq!(doc.playlist.len(), 2);
    assert_eq!(
        lookup_playlist_id("2020-01-01 Billboard 100", Some(&doc)),
        Some("uri:X".to_string())
    );
}

#[tokio::test]
async fn test_save_resolved_tracks() {
    let (_dir, store) = common::temp_store();

    assert!(!store.save_resolved_tracks(&[]).await.unwrap());
    assert!(!store.tracks_path().exists());

    let tracks = vec![
        ResolvedTrack {
            title: "Circles".to_string(),
            requested_date: "2020-01-01".to_string(),
            remote_track_id: Some("spotify:track:1".to_string()),
        },
        ResolvedTrack {
            title: "Unknown".to_string(),
            requested_date: "2020-01-01".to_string(),
            remote_track_id: None,
        },
    ];
    assert!(store.save_resolved_tracks(&tracks).await.unwrap());

    let on_disk: Value =
        serde_json::from_str(&std::fs::read_to_string(store.tracks_path()).unwrap()).unwrap();
    assert_eq!(
        on_disk,
        json!([
            {"track": "Circles", "date": "2020-01-01", "Spotify_uri": "spotify:track:1"},
            {"track": "Unknown", "date": "2020-01-01", "Spotify_uri": null}
        ])
    );

    // A later run overwrites the previous results
    store.save_resolved_tracks(&tracks[..1]).await.unwrap();
    assert_eq!(store.load_resolved_tracks().await.unwrap(), tracks[..1].to_vec());
}

#[tokio::test]
async fn test_save_playlist_id_keeps_other_top_level_keys() {
    let (_dir, store) = common::temp_store();
    std::fs::create_dir_all(store.playlist_path().parent().unwrap()).unwrap();
    std::fs::write(
        store.playlist_path(),
        r#"{"playlist": {"a": "uri:a"}, "owner": "me", "version": 2}"#,
    )
    .unwrap();

    let doc = store.load_playlists().await;
    assert!(store.save_playlist_id("b", "uri:b", doc).await.unwrap());

    let on_disk: Value =
        serde_json::from_str(&std::fs::read_to_string(store.playlist_path()).unwrap()).unwrap();
    assert_eq!(
        on_disk,
        json!({"playlist": {"a": "uri:a", "b": "uri:b"}, "owner": "me", "version": 2})
    );
}
