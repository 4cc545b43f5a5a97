use initiative_host::errors::RosterError;
use initiative_host::roster::Roster;
use initiative_host::types::Player;

#[tokio::test]
async fn save_then_load_round_trips_in_order() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("players.json");

    let mut roster = Roster::empty(&path);
    roster.add(Player::new("Aria", "Rogue", 12, 0));
    roster.add(Player::new("Bram", "Paladin", 20, 1).with_init(7));
    roster.add(Player::new("Cid", "Bard", -2, 3));
    roster.save().await.expect("save");

    let loaded = Roster::load(&path).await.expect("load");
    assert_eq!(loaded.players(), roster.players());
}

#[tokio::test]
async fn file_is_pretty_printed_array() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("players.json");
    let mut roster = Roster::empty(&path);
    roster.add(Player::new("Aria", "Rogue", 12, 0));
    roster.save().await.expect("save");

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("[\n  {\n    \"name\": \"Aria\""), "{text}");
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let obj = value[0].as_object().unwrap();
    let keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
    for key in ["name", "class", "hp", "cd", "init"] {
        assert!(keys.contains(&key), "missing {key}");
    }
    // no temp files left behind
    let entries = std::fs::read_dir(tmp.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[tokio::test]
async fn saving_twice_replaces_content() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("players.json");
    let mut roster = Roster::empty(&path);
    roster.add(Player::new("Aria", "Rogue", 12, 0));
    roster.add(Player::new("Bram", "Paladin", 20, 1));
    roster.save().await.unwrap();
    roster.remove(0).unwrap();
    roster.save().await.unwrap();

    let loaded = Roster::load(&path).await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.players()[0].name, "Bram");
}

#[tokio::test]
async fn partial_records_and_leading_nuls_load() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("players.json");
    std::fs::write(&path, "\0\0[{\"name\":\"Dana\",\"hp\":8}]").unwrap();

    let roster = Roster::load(&path).await.expect("load");
    assert_eq!(roster.players(), &[Player::new("Dana", "", 8, 0)]);
}

#[tokio::test]
async fn failed_save_leaves_no_stray_files() {
    let tmp = tempfile::tempdir().expect("tempdir");
    // a directory where the roster file should be cannot be replaced
    let path = tmp.path().join("players.json");
    std::fs::create_dir(&path).unwrap();

    let mut roster = Roster::empty(&path);
    roster.add(Player::new("Aria", "Rogue", 12, 0));
    let err = roster.save().await.expect_err("save onto a directory");
    assert!(matches!(err, RosterError::Io { .. }), "{err:?}");

    let names: Vec<String> = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["players.json".to_string()]);
    assert!(path.is_dir());
}
