mod common;

use common::TestServer;
use serde_json::json;
use std::fs;
use warps_save_data::{DimensionId, WarpPoint};

#[test]
fn first_start_creates_empty_document() {
    let test = TestServer::new();
    assert!(test.server.store.is_empty());
    assert_eq!(test.file_json(), json!({ "version": 1, "warps": {} }));
}

#[test]
fn every_change_is_flushed() {
    let mut test = TestServer::new();
    let steve = test.join_op("Steve");
    test.move_player(steve, "minecraft:the_end", 100.1, 49.5, 0.9);
    test.player(steve).yaw = 180.0;

    test.run(steve, "setwarp Outpost");
    assert_eq!(
        test.file_json(),
        json!({
            "version": 1,
            "warps": {
                "outpost": {
                    "dimension": "minecraft:the_end",
                    "x": 100.5,
                    "y": 49.0,
                    "z": 0.5,
                    "yaw": 180.0,
                    "pitch": 0.0
                }
            }
        })
    );

    test.run(steve, "renamewarp outpost end");
    let json = test.file_json();
    let warps = json["warps"].as_object().unwrap();
    assert_eq!(warps.keys().collect::<Vec<_>>(), ["end"]);

    test.run(steve, "delwarp end");
    assert_eq!(test.file_json(), json!({ "version": 1, "warps": {} }));
}

#[test]
fn deferred_flush_writes_on_stop() {
    let mut test = TestServer::with_config(|config| config.flush_on_mutation = false);
    let steve = test.join_op("Steve");
    test.run(steve, "setwarp spawn");
    assert_eq!(test.file_json()["warps"], json!({}));

    test.server.stop();
    assert!(test.file_json()["warps"].get("spawn").is_some());
}

#[test]
fn warps_survive_restart() {
    let mut test = TestServer::new();
    let point = WarpPoint::new(
        DimensionId::parse("minecraft:the_nether").unwrap(),
        0.1 + 0.2,
        -59.0,
        1e-7,
        -179.9,
        89.99,
    );
    test.server.store.set_warp("b", point.clone());
    test.server.store.set_warp("a", point.clone());

    test.restart();
    let warps = test.server.store.list_warps();
    assert_eq!(warps.keys().collect::<Vec<_>>(), ["b", "a"]);
    assert_eq!(warps["a"], point);
    assert_eq!(warps["b"].x().to_bits(), (0.1f64 + 0.2).to_bits());
}

#[test]
fn legacy_documents_are_converted() {
    let mut test = TestServer::new();
    let legacy = json!({
        "minecraft:overworld": {
            "spawn": { "x": 0.5, "y": 64.0, "z": 0.5, "yaw": 0.0, "pitch": 0.0 }
        },
        "minecraft:the_nether": {
            "Hub": { "dim": "minecraft:the_nether", "x": 8.5, "y": 70.0, "z": 8.5, "yaw": 90.0, "pitch": 0.0 },
            "spawn": { "x": 1.5, "y": 80.0, "z": 1.5, "yaw": 0.0, "pitch": 0.0 }
        }
    });
    fs::write(test.warps_path(), legacy.to_string()).unwrap();

    test.reopen();
    let warps = test.server.store.list_warps();
    assert_eq!(warps.keys().collect::<Vec<_>>(), ["spawn", "hub"]);
    assert_eq!(warps["spawn"].dimension(), &DimensionId::overworld());
    assert_eq!(warps["hub"].yaw(), 90.0);

    assert_eq!(test.file_json()["version"], json!(1));
    let backup = test.warps_path().with_extension("bak");
    let backed_up: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(backup).unwrap()).unwrap();
    assert_eq!(backed_up, legacy);
}

#[test]
fn malformed_document_is_set_aside() {
    let mut test = TestServer::new();
    let steve = test.join_op("Steve");
    test.run(steve, "setwarp kept");

    fs::write(test.warps_path(), "{ \"version\": 1, \"warps\": [").unwrap();
    let config = test.server.config.clone();
    test.server.store.load(&config.warps_file).unwrap_err();

    assert!(test.server.store.get_warp("kept").is_ok());
    let backup = test.warps_path().with_extension("bak");
    assert_eq!(
        fs::read_to_string(backup).unwrap(),
        "{ \"version\": 1, \"warps\": ["
    );

    test.run(steve, "setwarp another");
    let json = test.file_json();
    assert!(json["warps"].get("kept").is_some());
    assert!(json["warps"].get("another").is_some());
}

#[test]
fn newer_document_is_left_alone() {
    let mut test = TestServer::new();
    let newer = r#"{ "version": 2, "warps": {}, "groups": {} }"#;
    fs::write(test.warps_path(), newer).unwrap();

    test.reopen();
    let steve = test.join_op("Steve");
    test.run(steve, "setwarp spawn");
    test.server.stop();

    assert_eq!(fs::read_to_string(test.warps_path()).unwrap(), newer);
}

#[test]
fn stored_names_that_cannot_be_typed_are_renamed() {
    let mut test = TestServer::new();
    let stored = json!({
        "version": 1,
        "warps": {
            "spawn.1": { "dimension": "minecraft:overworld", "x": 0.5, "y": 64.0, "z": 0.5, "yaw": 0.0, "pitch": 0.0 },
            "Spawn_1": { "dimension": "minecraft:the_end", "x": 9.5, "y": 64.0, "z": 9.5, "yaw": 0.0, "pitch": 0.0 }
        }
    });
    fs::write(test.warps_path(), stored.to_string()).unwrap();

    test.reopen();
    let steve = test.join_op("Steve");
    assert_eq!(
        test.output(steve, "warps"),
        ["[Simply Better Warps] Warps (1): spawn_1"]
    );
    assert_eq!(
        test.output(steve, "warp spawn_1"),
        ["[Simply Better Warps] Teleported to 'spawn_1' in minecraft:overworld."]
    );

    test.run(steve, "delwarp spawn_1");
    assert_eq!(test.file_json(), json!({ "version": 1, "warps": {} }));
}

#[test]
fn case_variant_legacy_names_keep_the_first() {
    let mut test = TestServer::new();
    let legacy = json!({
        "minecraft:overworld": {
            "Home": { "x": 1.0, "y": 64.0, "z": 0.0, "yaw": 0.0, "pitch": 0.0 }
        },
        "minecraft:the_end": {
            "home": { "x": 2.0, "y": 64.0, "z": 0.0, "yaw": 0.0, "pitch": 0.0 }
        }
    });
    fs::write(test.warps_path(), legacy.to_string()).unwrap();

    test.reopen();
    let home = test.server.store.get_warp("home").unwrap();
    assert_eq!(home.dimension(), &DimensionId::overworld());
    assert_eq!(home.x(), 1.0);
    assert_eq!(test.server.store.len(), 1);
}
