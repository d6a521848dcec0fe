// ABOUTME: Conflict resolution between contradicting plan modifications
// ABOUTME: Groups opposite-kind modifications and keeps the highest priority one per group
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Conflict Resolver
//!
//! Two modifications conflict when their kinds form one of the fixed opposite
//! pairs (intensity, volume and phase length). A group is everything reachable
//! from a seed through opposite pairs, so same-axis modifications linked by a
//! common opponent land in one group. Each group collapses to a single winner
//! placed where the group's first member was; everything else passes through
//! in its original order.

use serde::{Deserialize, Serialize};
use stride_core::models::{Modification, ModificationKind, Priority};
use tracing::debug;

/// Summary of one resolved conflict group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictGroup {
    /// Kinds of every member in input order
    pub member_kinds: Vec<ModificationKind>,
    /// Kind of the kept modification
    pub kept: ModificationKind,
    /// Priority of the kept modification
    pub kept_priority: Priority,
}

/// Resolver output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Conflict-free modifications
    pub modifications: Vec<Modification>,
    /// Groups that were collapsed
    pub conflict_groups: Vec<ConflictGroup>,
}

/// Collapses conflicting modifications
pub struct ConflictResolver;

impl ConflictResolver {
    /// Resolve conflicts in a candidate list
    #[must_use]
    pub fn resolve(candidates: Vec<Modification>) -> Resolution {
        let groups = Self::conflict_groups(&candidates);
        if groups.is_empty() {
            return Resolution {
                modifications: candidates,
                conflict_groups: Vec::new(),
            };
        }

        let mut group_of: Vec<Option<usize>> = vec![None; candidates.len()];
        for (g, members) in groups.iter().enumerate() {
            for &i in members {
                group_of[i] = Some(g);
            }
        }
        let winners: Vec<usize> = groups
            .iter()
            .map(|members| Self::winner(&candidates, members))
            .collect();
        let conflict_groups = groups
            .iter()
            .zip(&winners)
            .map(|(members, &w)| ConflictGroup {
                member_kinds: members.iter().map(|&i| candidates[i].kind).collect(),
                kept: candidates[w].kind,
                kept_priority: candidates[w].priority,
            })
            .collect::<Vec<_>>();

        let mut slots: Vec<Option<Modification>> = candidates.into_iter().map(Some).collect();
        let mut modifications = Vec::with_capacity(slots.len());
        for (i, group) in group_of.iter().enumerate() {
            match *group {
                None => modifications.extend(slots[i].take()),
                Some(g) if groups[g][0] == i => modifications.extend(slots[winners[g]].take()),
                Some(_) => {}
            }
        }

        debug!(
            groups = conflict_groups.len(),
            remaining = modifications.len(),
            "Modification conflicts resolved"
        );
        Resolution {
            modifications,
            conflict_groups,
        }
    }

    /// Index groups with at least one opposite pair, members in input order
    fn conflict_groups(candidates: &[Modification]) -> Vec<Vec<usize>> {
        let mut assigned = vec![false; candidates.len()];
        let mut groups = Vec::new();

        for seed in 0..candidates.len() {
            if assigned[seed] || candidates[seed].kind.opposite().is_none() {
                continue;
            }
            let mut members = vec![seed];
            assigned[seed] = true;
            let mut cursor = 0;
            while cursor < members.len() {
                let kind = candidates[members[cursor]].kind;
                for (j, candidate) in candidates.iter().enumerate() {
                    if !assigned[j] && candidate.kind.conflicts_with(kind) {
                        assigned[j] = true;
                        members.push(j);
                    }
                }
                cursor += 1;
            }
            if members.len() > 1 {
                members.sort_unstable();
                groups.push(members);
            } else {
                assigned[seed] = false;
            }
        }
        groups
    }

    /// Highest priority member, first-seen on ties
    fn winner(candidates: &[Modification], members: &[usize]) -> usize {
        members.iter().copied().fold(members[0], |best, i| {
            if candidates[i].priority > candidates[best].priority {
                i
            } else {
                best
            }
        })
    }
}
