//! Arrangement file integration tests
//!
//! Save windows to disk, reload them, and check that groups, colors,
//! collapsed state and selection come back, including from files written
//! before tab groups existed or edited by hand.

use serde_json::json;
use tabgroups_core::{
    GroupColor, PREDEFINED_COLORS, TAB_GROUPS_ARRANGEMENT_KEY, TabGroupArrangement,
    TabGroupSettings, TabId, TerminalWindow, WindowArrangement,
};
use tempfile::TempDir;

fn sample_window() -> (TerminalWindow, Vec<TabId>) {
    let mut window = TerminalWindow::new();
    let tabs: Vec<TabId> = (0..6).map(|i| window.new_tab(format!("shell {i}"))).collect();
    let build = window.create_group_with_tabs(&[tabs[1], tabs[2]], Some("Build"), None);
    window.create_group_with_tabs(
        &[tabs[4], tabs[5]],
        Some("Logs"),
        Some(GroupColor::rgb(0x12, 0x34, 0x56)),
    );
    window.collapse_tab_group(build);
    window.select_tab(tabs[4]);
    (window, tabs)
}

#[test]
fn window_survives_save_and_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("sessions").join("window.json");
    let (window, tabs) = sample_window();

    window.arrangement().save_to_file(&path).expect("save failed");
    let loaded = WindowArrangement::load_from_file(&path).expect("load failed");
    let restored = TerminalWindow::from_arrangement(&loaded, TabGroupSettings::default());

    assert_eq!(restored.strip().tab_ids(), tabs);
    assert_eq!(restored.selected_tab(), Some(tabs[4]));
    assert_eq!(restored.manager().arrangement(), window.manager().arrangement());

    let groups = restored.manager().groups();
    assert_eq!(groups[0].name, "Build");
    assert!(groups[0].is_collapsed());
    assert_eq!(groups[0].color, Some(PREDEFINED_COLORS[1]));
    assert_eq!(groups[1].name, "Logs");
    assert_eq!(groups[1].color, Some(GroupColor::rgb(0x12, 0x34, 0x56)));
    assert!(restored.strip().is_hidden(tabs[2]));
}

#[test]
fn file_layout_uses_documented_keys() {
    let (window, _) = sample_window();
    let json = window.arrangement().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let records = value[TAB_GROUPS_ARRANGEMENT_KEY].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "Build");
    assert_eq!(records[0]["color"], json!({ "palette": "blue" }));
    assert_eq!(records[0]["collapsed"], true);
    assert_eq!(records[0]["tab_guids"].as_array().unwrap().len(), 2);
    assert_eq!(records[1]["color"], json!({ "rgba": [0x12, 0x34, 0x56, 0xff] }));
    assert!(value["saved_at"].is_string());
    assert_eq!(value["tabs"].as_array().unwrap().len(), 6);
}

#[test]
fn pre_group_file_loads_without_groups() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("old.json");
    let first = TabId::new().as_uuid().to_string();
    let second = TabId::new().as_uuid().to_string();
    std::fs::write(
        &path,
        json!({
            "tabs": [
                { "guid": first, "title": "a" },
                { "guid": second, "title": "b" }
            ],
            "selected_tab": second
        })
        .to_string(),
    )
    .unwrap();

    let loaded = WindowArrangement::load_from_file(&path).unwrap();
    let window = TerminalWindow::from_arrangement(&loaded, TabGroupSettings::default());
    assert_eq!(window.strip().len(), 2);
    assert_eq!(window.manager().group_count(), 0);
    assert_eq!(
        window.selected_tab().map(|t| t.as_uuid().to_string()),
        Some(second)
    );
}

#[test]
fn hand_edited_file_is_repaired_on_restore() {
    let first = TabId::new().as_uuid().to_string();
    let second = TabId::new().as_uuid().to_string();
    let third = TabId::new().as_uuid().to_string();
    let gone = TabId::new().as_uuid().to_string();
    let value = json!({
        "tabs": [
            { "guid": first, "title": "a" },
            { "guid": second, "title": "b" },
            { "guid": third, "title": "c" }
        ],
        "tab_groups": [
            // Scattered members, unknown tab, empty name, unknown palette name
            { "name": "", "color": { "palette": "mauve" }, "tab_guids": [first, gone, third] },
            // Claims a tab the first record already owns
            { "name": "Second", "collapsed": true, "tab_guids": [third, second] },
            "not a record"
        ]
    });
    let arrangement: WindowArrangement = serde_json::from_value(value).unwrap();
    assert_eq!(arrangement.tab_groups.len(), 2);

    let window = TerminalWindow::from_arrangement(&arrangement, TabGroupSettings::default());
    let titles: Vec<_> = window
        .strip()
        .tabs()
        .iter()
        .map(|tab| tab.title().to_string())
        .collect();
    assert_eq!(titles, ["a", "c", "b"]);

    let groups = window.manager().groups();
    assert_eq!(groups[0].name, "Untitled Group");
    assert_eq!(groups[0].color, None);
    assert_eq!(groups[0].tab_count(), 2);
    assert_eq!(groups[1].tab_count(), 1);
    assert!(groups[1].is_collapsed());
}

#[test]
fn groups_embed_into_foreign_window_format() {
    let (window, _) = sample_window();
    let mut host_state = json!({ "frame": [0, 0, 800, 600], "profile": "Default" });
    window
        .manager()
        .arrangement()
        .embed_into(&mut host_state)
        .unwrap();
    assert_eq!(host_state["profile"], "Default");

    let extracted = TabGroupArrangement::from_window_arrangement(&host_state);
    assert_eq!(extracted, window.manager().arrangement());
}

#[test]
fn corrupt_file_is_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(WindowArrangement::load_from_file(&path).is_err());
}
