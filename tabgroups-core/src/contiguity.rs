//! Contiguity planning for grouped tabs
//!
//! Given the host's physical tab order and the groups' membership lists, the
//! planner computes an order in which:
//!
//! - every group's members form one unbroken run, in membership order
//! - group blocks appear in the same order as the groups list
//! - ungrouped tabs keep their relative order and stay where they were
//!
//! Group blocks occupy *slots*: the physical positions of the groups'
//! anchor tabs, sorted ascending. The i-th non-empty group takes the i-th
//! slot. Reordering the groups list therefore permutes blocks among the same
//! slots without disturbing ungrouped tabs.
//!
//! [`moves_between`] turns a planned order into the smallest sequence of
//! single-tab moves the host has to perform.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::types::{TabId, TabMove};

/// Chooses which member's position anchors a group's block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorPolicy {
    /// The block starts where the group's first member sits.
    #[default]
    FirstMember,
    /// The block starts where the earliest-positioned member sits.
    EarliestMember,
}

/// Computes a physical order satisfying the contiguity invariant.
///
/// Members that are not present in `current` are ignored, as are tabs that
/// an earlier group already claimed. The result is a permutation of
/// `current`, and planning it again yields the same order.
#[must_use]
pub fn plan_contiguous_order(
    current: &[TabId],
    groups: &[&[TabId]],
    policy: AnchorPolicy,
) -> Vec<TabId> {
    let mut positions: HashMap<TabId, usize> = HashMap::with_capacity(current.len());
    for (index, tab) in current.iter().enumerate() {
        positions.entry(*tab).or_insert(index);
    }

    let mut claimed: HashSet<TabId> = HashSet::new();
    let mut blocks: Vec<(usize, Vec<TabId>)> = Vec::new();
    for members in groups {
        let present: Vec<TabId> = members
            .iter()
            .copied()
            .filter(|tab| positions.contains_key(tab) && claimed.insert(*tab))
            .collect();
        let Some(first) = present.first() else {
            continue;
        };
        let anchor = match policy {
            AnchorPolicy::FirstMember => positions[first],
            AnchorPolicy::EarliestMember => present
                .iter()
                .map(|tab| positions[tab])
                .min()
                .unwrap_or(positions[first]),
        };
        blocks.push((anchor, present));
    }

    let mut slots: Vec<usize> = blocks.iter().map(|(anchor, _)| *anchor).collect();
    slots.sort_unstable();
    let slot_to_block: HashMap<usize, usize> = slots
        .into_iter()
        .enumerate()
        .map(|(block, slot)| (slot, block))
        .collect();

    let mut planned = Vec::with_capacity(current.len());
    for (index, tab) in current.iter().enumerate() {
        if let Some(block) = slot_to_block.get(&index) {
            planned.extend_from_slice(&blocks[*block].1);
        } else if !claimed.contains(tab) {
            planned.push(*tab);
        }
    }
    planned
}

/// Returns `true` if each group's present members form one run in
/// membership order.
#[must_use]
pub fn is_contiguous(order: &[TabId], groups: &[&[TabId]]) -> bool {
    let positions: HashMap<TabId, usize> = order
        .iter()
        .enumerate()
        .map(|(index, tab)| (*tab, index))
        .collect();
    groups.iter().all(|members| {
        let present: Vec<usize> = members
            .iter()
            .filter_map(|tab| positions.get(tab).copied())
            .collect();
        present.windows(2).all(|pair| pair[1] == pair[0] + 1)
    })
}

/// Computes the minimal list of single-tab moves that turns `current` into
/// `target`.
///
/// Tabs on a longest subsequence already in target order stay put; every
/// other tab is moved exactly once. Moves are meant to be applied in order,
/// each against the result of the previous one. Returns no moves when
/// `target` is not a permutation of `current`.
#[must_use]
pub fn moves_between(current: &[TabId], target: &[TabId]) -> Vec<TabMove> {
    if current.len() != target.len() {
        return Vec::new();
    }
    let target_index: HashMap<TabId, usize> = target
        .iter()
        .enumerate()
        .map(|(index, tab)| (*tab, index))
        .collect();
    if target_index.len() != target.len() || !current.iter().all(|t| target_index.contains_key(t))
    {
        return Vec::new();
    }

    let sequence: Vec<usize> = current.iter().map(|tab| target_index[tab]).collect();
    let mut placed: HashSet<TabId> = longest_increasing_subsequence(&sequence)
        .into_iter()
        .map(|index| current[index])
        .collect();

    let mut movers: Vec<TabId> = current
        .iter()
        .copied()
        .filter(|tab| !placed.contains(tab))
        .collect();
    movers.sort_by_key(|tab| target_index[tab]);

    let mut working = current.to_vec();
    let mut moves = Vec::with_capacity(movers.len());
    for tab in movers {
        let Some(from) = working.iter().position(|t| *t == tab) else {
            continue;
        };
        working.remove(from);
        let predecessor = target[..target_index[&tab]]
            .iter()
            .rev()
            .find(|t| placed.contains(*t));
        let to = predecessor
            .and_then(|p| working.iter().position(|t| t == p))
            .map_or(0, |index| index + 1);
        working.insert(to, tab);
        placed.insert(tab);
        if from != to {
            moves.push(TabMove::new(from, to));
        }
    }
    moves
}

/// Indices of one longest strictly increasing subsequence of `values`.
fn longest_increasing_subsequence(values: &[usize]) -> Vec<usize> {
    // tails[k] = index into `values` of the smallest tail of a run of length k + 1
    let mut tails: Vec<usize> = Vec::new();
    let mut previous: Vec<Option<usize>> = vec![None; values.len()];
    for (index, value) in values.iter().enumerate() {
        let length = tails.partition_point(|&tail| values[tail] < *value);
        if length > 0 {
            previous[index] = Some(tails[length - 1]);
        }
        if length == tails.len() {
            tails.push(index);
        } else {
            tails[length] = index;
        }
    }
    let mut result = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(index) = cursor {
        result.push(index);
        cursor = previous[index];
    }
    result.reverse();
    result
}
