//! Window scenario integration tests
//!
//! Walk a terminal window through realistic sequences of user actions and
//! check what the tab strip shows after each step.

use tabgroups_core::{
    AnchorPolicy, PREDEFINED_COLORS, TabGroupDelegate, TabGroupSettings, TabId, TerminalWindow,
};

/// Opens `count` tabs named T0.. and returns their IDs in order.
fn open_tabs(window: &mut TerminalWindow, count: usize) -> Vec<TabId> {
    (0..count).map(|i| window.new_tab(format!("T{i}"))).collect()
}

fn titles(window: &TerminalWindow) -> Vec<String> {
    window
        .strip()
        .tabs()
        .iter()
        .map(|tab| tab.title().to_string())
        .collect()
}

fn visible_titles(window: &TerminalWindow) -> Vec<String> {
    window
        .manager()
        .visible_tabs(window.strip())
        .into_iter()
        .filter_map(|tab| window.strip().title(tab).map(String::from))
        .collect()
}

#[test]
fn work_group_collapse_and_expand() {
    let mut window = TerminalWindow::new();
    let t = open_tabs(&mut window, 5);

    let work = window.create_group_with_tabs(&[t[1], t[2], t[3]], Some("Work"), None);
    assert_eq!(titles(&window), ["T0", "T1", "T2", "T3", "T4"]);
    assert_eq!(window.strip().move_count(), 0);

    window.collapse_tab_group(work);
    assert_eq!(visible_titles(&window), ["T0", "T1", "T4"]);
    assert!(window.strip().is_hidden(t[2]));
    assert!(window.strip().is_hidden(t[3]));

    window.expand_tab_group(work);
    assert_eq!(visible_titles(&window), ["T0", "T1", "T2", "T3", "T4"]);
    assert_eq!(titles(&window), ["T0", "T1", "T2", "T3", "T4"]);
}

#[test]
fn grouping_distant_tabs_pulls_them_together() {
    let mut window = TerminalWindow::new();
    let t = open_tabs(&mut window, 6);

    window.set_marked_tabs(&[t[5], t[1], t[3]]);
    let group = window.create_group_with_selected_tabs().unwrap();

    assert_eq!(titles(&window), ["T0", "T1", "T3", "T5", "T2", "T4"]);
    assert_eq!(
        window.manager().group_with_id(group).unwrap().tabs(),
        &[t[1], t[3], t[5]]
    );
    // Only the two tabs that were out of place moved
    assert_eq!(window.strip().move_count(), 2);
}

#[test]
fn earliest_member_anchor_keeps_block_near_the_front() {
    let settings = TabGroupSettings::new().with_anchor_policy(AnchorPolicy::EarliestMember);
    let mut window = TerminalWindow::with_settings(settings);
    let t = open_tabs(&mut window, 5);

    window.create_group_with_tabs(&[t[4], t[1]], Some("Late first"), None);
    assert_eq!(titles(&window), ["T0", "T4", "T1", "T2", "T3"]);
}

#[test]
fn two_groups_swap_places() {
    let mut window = TerminalWindow::new();
    let t = open_tabs(&mut window, 6);
    let a = window.create_group_with_tabs(&[t[0], t[1]], Some("A"), None);
    let b = window.create_group_with_tabs(&[t[3], t[4]], Some("B"), None);

    window.move_tab_group(0, 1);
    assert_eq!(titles(&window), ["T3", "T4", "T2", "T0", "T1", "T5"]);
    assert_eq!(window.manager().index_of_group(b), Some(0));
    assert_eq!(window.manager().index_of_group(a), Some(1));
}

#[test]
fn moving_tabs_between_groups_keeps_both_contiguous() {
    let mut window = TerminalWindow::new();
    let t = open_tabs(&mut window, 6);
    let a = window.create_group_with_tabs(&[t[0], t[1], t[2]], Some("A"), None);
    let b = window.create_group_with_tabs(&[t[4], t[5]], Some("B"), None);

    window.select_tab(t[1]);
    assert!(window.add_current_tab_to_group(b));
    assert_eq!(titles(&window), ["T0", "T2", "T3", "T4", "T5", "T1"]);
    assert_eq!(window.manager().group_with_id(a).unwrap().tabs(), &[t[0], t[2]]);
    assert_eq!(
        window.manager().group_with_id(b).unwrap().tabs(),
        &[t[4], t[5], t[1]]
    );
}

#[test]
fn drag_within_group_reorders_members() {
    let mut window = TerminalWindow::new();
    let t = open_tabs(&mut window, 4);
    let group = window.create_group_with_tabs(&[t[1], t[2], t[3]], Some("G"), None);

    window.drag_tab(3, 1);
    assert_eq!(titles(&window), ["T0", "T3", "T1", "T2"]);
    assert_eq!(
        window.manager().group_with_id(group).unwrap().tabs(),
        &[t[3], t[1], t[2]]
    );
}

#[test]
fn drag_out_of_group_is_corrected() {
    let mut window = TerminalWindow::new();
    let t = open_tabs(&mut window, 5);
    window.create_group_with_tabs(&[t[1], t[2], t[3]], Some("G"), None);

    // Drag T2 to the front, splitting the block
    window.drag_tab(2, 0);
    assert_eq!(titles(&window), ["T0", "T1", "T2", "T3", "T4"]);
}

#[test]
fn closing_tabs_keeps_empty_group_until_ungrouped() {
    let mut window = TerminalWindow::new();
    let t = open_tabs(&mut window, 3);
    let group = window.create_group_with_tabs(&[t[1]], Some("Lonely"), None);

    assert!(window.close_tab(t[1]));
    let lonely = window.manager().group_with_id(group).unwrap();
    assert!(lonely.is_empty());
    assert_eq!(window.select_group(group), None);

    window.ungroup_tab_group(group);
    assert_eq!(window.manager().group_count(), 0);
}

#[test]
fn closing_collapsed_representative_reveals_next_member() {
    let mut window = TerminalWindow::new();
    let t = open_tabs(&mut window, 4);
    let group = window.create_group_with_tabs(&[t[1], t[2], t[3]], Some("G"), None);
    window.collapse_tab_group(group);
    assert!(window.strip().is_hidden(t[2]));

    window.close_tab(t[1]);
    assert!(!window.strip().is_hidden(t[2]));
    assert!(window.strip().is_hidden(t[3]));
    assert_eq!(window.manager().representative_tab(window.strip(), group), Some(t[2]));
}

#[test]
fn colors_rotate_across_new_groups() {
    let mut window = TerminalWindow::new();
    let t = open_tabs(&mut window, 3);
    let groups: Vec<_> = t
        .iter()
        .map(|tab| window.create_group_with_tabs(&[*tab], None, None))
        .collect();
    let colors: Vec<_> = groups
        .iter()
        .map(|id| window.manager().group_with_id(*id).unwrap().color)
        .collect();
    assert_eq!(
        colors,
        vec![
            Some(PREDEFINED_COLORS[1]),
            Some(PREDEFINED_COLORS[2]),
            Some(PREDEFINED_COLORS[3]),
        ]
    );
    let names: Vec<_> = groups
        .iter()
        .map(|id| window.manager().group_with_id(*id).unwrap().name.clone())
        .collect();
    assert_eq!(names, ["Group", "Group 2", "Group 3"]);
}

#[test]
fn keyboard_cycling_over_collapsed_groups() {
    let mut window = TerminalWindow::new();
    let t = open_tabs(&mut window, 6);
    let a = window.create_group_with_tabs(&[t[1], t[2]], Some("A"), None);
    let b = window.create_group_with_tabs(&[t[3], t[4]], Some("B"), None);
    window.collapse_tab_group(a);
    window.collapse_tab_group(b);

    window.select_tab(t[5]);
    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(window.select_next_visible_tab().unwrap());
    }
    assert_eq!(seen, vec![t[0], t[1], t[3], t[5]]);
}

#[test]
fn host_order_matches_manager_order() {
    let mut window = TerminalWindow::new();
    let t = open_tabs(&mut window, 7);
    window.create_group_with_tabs(&[t[6], t[0]], Some("A"), None);
    window.create_group_with_tabs(&[t[2], t[5], t[3]], Some("B"), None);
    window.drag_tab(0, 6);

    let strip = window.strip();
    assert_eq!(strip.all_tabs(), window.manager().tabs_in_display_order(strip));
}
