//! Property tests for `TabGroupManager`
//!
//! Random sequences of group operations are applied to a `TabStrip`, and the
//! manager's invariants are checked after every step.

use std::collections::HashSet;

use proptest::prelude::*;
use tabgroups_core::{
    AnchorPolicy, GroupId, TabGroup, TabGroupDelegate, TabGroupManager, TabGroupSettings, TabId,
    TabStrip, is_contiguous,
};

// ============================================================================
// Test Strategies
// ============================================================================

/// Operation applied to a manager and its strip. Indices are taken modulo
/// the current number of tabs or groups.
#[derive(Debug, Clone)]
enum GroupOperation {
    Create(Vec<usize>),
    AddTab {
        tab: usize,
        group: usize,
        index: Option<usize>,
    },
    RemoveTab(usize),
    MoveWithinGroup {
        tab: usize,
        index: usize,
    },
    RemoveGroup(usize),
    MoveGroup(usize, usize),
    ToggleCollapse(usize),
    Drag(usize, usize),
    CloseTab(usize),
    OpenTab(usize),
    /// Restores an edited snapshot onto the same strip: each record drops
    /// one tab when `drop` is set, rotates its tabs, and may flip collapse.
    Restore {
        drop: bool,
        rotate: usize,
        flip_collapsed: bool,
    },
}

fn operation_strategy() -> impl Strategy<Value = GroupOperation> {
    prop_oneof![
        3 => prop::collection::vec(0usize..32, 0..5).prop_map(GroupOperation::Create),
        3 => (0usize..32, 0usize..8, prop::option::of(0usize..6))
            .prop_map(|(tab, group, index)| GroupOperation::AddTab { tab, group, index }),
        1 => (0usize..32).prop_map(GroupOperation::RemoveTab),
        1 => (0usize..32, 0usize..6)
            .prop_map(|(tab, index)| GroupOperation::MoveWithinGroup { tab, index }),
        1 => (0usize..8).prop_map(GroupOperation::RemoveGroup),
        1 => (0usize..8, 0usize..8).prop_map(|(from, to)| GroupOperation::MoveGroup(from, to)),
        2 => (0usize..8).prop_map(GroupOperation::ToggleCollapse),
        2 => (0usize..32, 0usize..32).prop_map(|(from, to)| GroupOperation::Drag(from, to)),
        1 => (0usize..32).prop_map(GroupOperation::CloseTab),
        1 => (0usize..32).prop_map(GroupOperation::OpenTab),
        2 => (any::<bool>(), 0usize..6, any::<bool>()).prop_map(
            |(drop, rotate, flip_collapsed)| GroupOperation::Restore {
                drop,
                rotate,
                flip_collapsed,
            }
        ),
    ]
}

fn policy_strategy() -> impl Strategy<Value = AnchorPolicy> {
    prop_oneof![
        Just(AnchorPolicy::FirstMember),
        Just(AnchorPolicy::EarliestMember),
    ]
}

fn setup(tab_count: usize, policy: AnchorPolicy) -> (TabStrip, TabGroupManager) {
    let mut strip = TabStrip::new();
    for i in 0..tab_count {
        strip.push_tab(format!("T{i}"));
    }
    let settings = TabGroupSettings::new().with_anchor_policy(policy);
    (strip, TabGroupManager::with_settings(settings))
}

fn nth_group(manager: &TabGroupManager, index: usize) -> Option<GroupId> {
    let count = manager.group_count();
    (count > 0).then(|| manager.groups()[index % count].id())
}

fn apply(manager: &mut TabGroupManager, strip: &mut TabStrip, op: &GroupOperation, step: usize) {
    let tabs = strip.tab_ids();
    let tab = |index: usize| tabs[index % tabs.len()];
    match op {
        GroupOperation::Create(members) => {
            let members: Vec<TabId> = members.iter().map(|i| tab(*i)).collect();
            manager.create_group(strip, &format!("G{step}"), None, &members);
        }
        GroupOperation::AddTab { tab: t, group, index } => {
            if let Some(group) = nth_group(manager, *group) {
                manager.add_tab(strip, tab(*t), group, *index);
            }
        }
        GroupOperation::RemoveTab(t) => manager.remove_tab_from_group(strip, tab(*t)),
        GroupOperation::MoveWithinGroup { tab: t, index } => {
            manager.move_tab_within_group(strip, tab(*t), *index);
        }
        GroupOperation::RemoveGroup(group) => {
            if let Some(group) = nth_group(manager, *group) {
                manager.remove_group(strip, group);
            }
        }
        GroupOperation::MoveGroup(from, to) => manager.move_group_at_index(strip, *from, *to),
        GroupOperation::ToggleCollapse(group) => {
            if let Some(group) = nth_group(manager, *group) {
                manager.toggle_collapse_group(strip, group);
            }
        }
        GroupOperation::Drag(from, to) => {
            strip.move_tab(from % tabs.len(), to % tabs.len());
            let order = strip.tab_ids();
            manager.tabs_were_reordered(strip, &order);
        }
        GroupOperation::CloseTab(t) => {
            if tabs.len() > 1 {
                let closed = tab(*t);
                strip.remove_tab(closed);
                manager.tab_was_removed(strip, closed);
            }
        }
        GroupOperation::OpenTab(index) => {
            let opened = strip.insert_tab(index % (tabs.len() + 1), format!("N{step}"));
            manager.tab_was_added(strip, opened);
        }
        GroupOperation::Restore {
            drop,
            rotate,
            flip_collapsed,
        } => {
            let mut snapshot = manager.arrangement();
            for (i, record) in snapshot.groups.iter_mut().enumerate() {
                let len = record.tab_guids.len();
                if len == 0 {
                    continue;
                }
                if *drop {
                    record.tab_guids.remove((rotate + i) % len);
                }
                let len = record.tab_guids.len();
                if len > 0 {
                    record.tab_guids.rotate_left(rotate % len);
                }
                if *flip_collapsed && i % 2 == 0 {
                    record.collapsed = Some(!record.collapsed.unwrap_or(false));
                }
            }
            manager.restore_from_arrangement(strip, &snapshot);
        }
    }
}

fn memberships(manager: &TabGroupManager) -> Vec<&[TabId]> {
    manager.groups().iter().map(TabGroup::tabs).collect()
}

/// Checks every manager invariant against the strip.
fn check_invariants(manager: &TabGroupManager, strip: &TabStrip) -> Result<(), TestCaseError> {
    let order = strip.tab_ids();

    // Exclusivity and lookup consistency
    let mut seen = HashSet::new();
    for group in manager.groups() {
        for tab in group.tabs() {
            prop_assert!(seen.insert(*tab), "tab {} is in two groups", tab);
            prop_assert!(strip.contains_tab(*tab), "group holds closed tab {}", tab);
            prop_assert_eq!(manager.group_for_tab(*tab).map(TabGroup::id), Some(group.id()));
        }
    }
    for tab in &order {
        if !seen.contains(tab) {
            prop_assert!(manager.group_for_tab(*tab).is_none());
        }
    }

    // Contiguity in membership order
    prop_assert!(is_contiguous(&order, &memberships(manager)));

    // Blocks follow the groups list
    let starts: Vec<usize> = manager
        .groups()
        .iter()
        .filter_map(|g| g.first_tab())
        .filter_map(|t| strip.index_of_tab(t))
        .collect();
    prop_assert!(starts.windows(2).all(|w| w[0] < w[1]), "blocks out of order: {:?}", starts);

    // The strip already matches the planned order
    prop_assert_eq!(manager.tabs_in_display_order(strip), order.clone());

    // Visibility partitions the strip
    let visible = manager.visible_tabs(strip);
    let hidden = manager.hidden_tabs(strip);
    prop_assert_eq!(visible.len() + hidden.len(), order.len());
    let expected_hidden: usize = manager
        .groups()
        .iter()
        .filter(|g| g.is_collapsed() && !g.is_empty())
        .map(|g| g.tab_count() - 1)
        .sum();
    prop_assert_eq!(hidden.len(), expected_hidden);
    for tab in &hidden {
        prop_assert!(strip.is_hidden(*tab), "hidden tab {} shown by host", tab);
    }
    for tab in &visible {
        prop_assert!(!strip.is_hidden(*tab), "visible tab {} hidden by host", tab);
    }
    Ok(())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Every operation sequence leaves the manager and strip consistent.
    #[test]
    fn invariants_hold_after_every_operation(
        tab_count in 1usize..12,
        policy in policy_strategy(),
        ops in prop::collection::vec(operation_strategy(), 1..30),
    ) {
        let (mut strip, mut manager) = setup(tab_count, policy);
        for (step, op) in ops.iter().enumerate() {
            apply(&mut manager, &mut strip, op, step);
            check_invariants(&manager, &strip)?;
        }
    }

    /// Restoring contiguity twice in a row never moves anything the second time.
    #[test]
    fn ensure_is_idempotent(
        tab_count in 1usize..12,
        policy in policy_strategy(),
        ops in prop::collection::vec(operation_strategy(), 1..20),
    ) {
        let (mut strip, mut manager) = setup(tab_count, policy);
        for (step, op) in ops.iter().enumerate() {
            apply(&mut manager, &mut strip, op, step);
        }
        let before = strip.tab_ids();
        prop_assert_eq!(manager.ensure_grouped_tabs_are_contiguous(&mut strip), 0);
        prop_assert_eq!(strip.tab_ids(), before);
    }

    /// Operations only ever permute the strip; no tab is lost or duplicated.
    #[test]
    fn strip_is_permuted_not_changed(
        tab_count in 1usize..12,
        groups in prop::collection::vec(prop::collection::vec(0usize..12, 0..6), 0..5),
    ) {
        let (mut strip, mut manager) = setup(tab_count, AnchorPolicy::FirstMember);
        let before: HashSet<TabId> = strip.tab_ids().into_iter().collect();
        let tabs = strip.tab_ids();
        for (i, members) in groups.iter().enumerate() {
            let members: Vec<TabId> = members.iter().map(|m| tabs[m % tabs.len()]).collect();
            manager.create_group(&mut strip, &format!("G{i}"), None, &members);
        }
        let after: HashSet<TabId> = strip.tab_ids().into_iter().collect();
        prop_assert_eq!(strip.len(), tab_count);
        prop_assert_eq!(before, after);
    }

    /// Saving and restoring into a fresh manager reproduces the same groups.
    #[test]
    fn arrangement_round_trip_preserves_groups(
        tab_count in 1usize..10,
        ops in prop::collection::vec(operation_strategy(), 1..20),
    ) {
        let (mut strip, mut manager) = setup(tab_count, AnchorPolicy::FirstMember);
        for (step, op) in ops.iter().enumerate() {
            apply(&mut manager, &mut strip, op, step);
        }
        let saved = manager.arrangement();
        let order = strip.tab_ids();

        let mut restored = TabGroupManager::new();
        restored.restore_from_arrangement(&mut strip, &saved);
        prop_assert_eq!(restored.arrangement(), saved);
        prop_assert_eq!(strip.tab_ids(), order);
        check_invariants(&restored, &strip)?;
    }

    /// A collapsed group hides exactly its non-first members.
    #[test]
    fn collapse_hides_all_but_representative(
        tab_count in 2usize..10,
        members in prop::collection::hash_set(0usize..10, 1..6),
    ) {
        let (mut strip, mut manager) = setup(tab_count, AnchorPolicy::FirstMember);
        let tabs = strip.tab_ids();
        let members: Vec<TabId> = members
            .into_iter()
            .filter(|m| *m < tab_count)
            .map(|m| tabs[m])
            .collect();
        prop_assume!(!members.is_empty());

        let group = manager.create_group(&mut strip, "G", None, &members);
        manager.collapse_group(&mut strip, group);
        let representative = manager.representative_tab(&strip, group);
        prop_assert_eq!(representative, members.first().copied());
        for tab in &members {
            prop_assert_eq!(manager.is_tab_visible(*tab), Some(*tab) == representative);
        }

        manager.expand_group(&mut strip, group);
        prop_assert!(manager.hidden_tabs(&strip).is_empty());
    }
}

#[test]
fn default_creates_empty_manager() {
    let manager = TabGroupManager::default();
    assert_eq!(manager.group_count(), 0);
    assert!(manager.groups().is_empty());
    assert_eq!(manager.settings(), &TabGroupSettings::default());
}

#[test]
fn empty_group_survives_until_removed() {
    let (mut strip, mut manager) = setup(2, AnchorPolicy::FirstMember);
    let tabs = strip.tab_ids();
    let group = manager.create_group(&mut strip, "G", None, &[tabs[0]]);
    manager.remove_tab_from_group(&mut strip, tabs[0]);
    assert!(manager.group_with_id(group).is_some_and(TabGroup::is_empty));
    assert_eq!(manager.representative_tab(&strip, group), None);
    manager.remove_group(&mut strip, group);
    assert_eq!(manager.group_count(), 0);
}
