// ============================================================================
// Console Core - Menu Tree Builder
// File: crates/console-core/src/services/menu_tree.rs
// ============================================================================
//! Turns a flat, parent-linked menu list into a forest.
//!
//! Nodes live in flat slots; parent and child links are slot indices, so no
//! node ever points back at its parent.

use std::collections::{HashMap, HashSet};

use tracing::warn;
use uuid::Uuid;

use crate::domain::MenuNode;

/// Builds the menu forest.
///
/// * A node hangs under its parent when the parent id occurs in the input;
///   otherwise it becomes a root.
/// * Sibling groups and the root list keep input order. The store hands the
///   nodes over sorted by description, so siblings come out alphabetically.
/// * When an id occurs more than once, only its first occurrence is kept.
/// * A cycle is broken by promoting its first member in input order to a
///   root, so every distinct input node appears exactly once in the output.
/// * Children already present on an input node are kept ahead of the ones
///   attached here, which makes the function idempotent on its own output.
pub fn build_hierarchy(nodes: Vec<MenuNode>) -> Vec<MenuNode> {
    let nodes = distinct(nodes);
    let len = nodes.len();

    let index: HashMap<Uuid, usize> = nodes.iter().enumerate().map(|(slot, node)| (node.id, slot)).collect();

    let mut parent_of: Vec<Option<usize>> = nodes
        .iter()
        .enumerate()
        .map(|(slot, node)| {
            node.parent_id
                .and_then(|p| index.get(&p).copied())
                .filter(|&p| p != slot)
        })
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); len];
    for (slot, parent) in parent_of.iter().enumerate() {
        if let Some(p) = *parent {
            children[p].push(slot);
        }
    }

    let mut reached = vec![false; len];
    for slot in 0..len {
        if parent_of[slot].is_none() {
            mark_reached(slot, &children, &mut reached);
        }
    }

    // Whatever is still unreached sits on a cycle or below one.
    for slot in 0..len {
        if reached[slot] {
            continue;
        }
        let head = first_cycle_member(slot, &parent_of);
        if let Some(p) = parent_of[head].take() {
            children[p].retain(|&c| c != head);
        }
        mark_reached(head, &children, &mut reached);
    }

    let roots: Vec<usize> = (0..len).filter(|&slot| parent_of[slot].is_none()).collect();

    // Post-order, so every child is complete before its parent takes it.
    let mut order = Vec::with_capacity(len);
    let mut stack: Vec<(usize, bool)> = roots.iter().rev().map(|&r| (r, false)).collect();
    while let Some((slot, expanded)) = stack.pop() {
        if expanded {
            order.push(slot);
            continue;
        }
        stack.push((slot, true));
        stack.extend(children[slot].iter().rev().map(|&c| (c, false)));
    }

    let mut slots: Vec<Option<MenuNode>> = nodes.into_iter().map(Some).collect();
    for slot in order {
        let attached = std::mem::take(&mut children[slot]);
        let built: Vec<MenuNode> = attached.into_iter().filter_map(|c| slots[c].take()).collect();
        if let Some(node) = slots[slot].as_mut() {
            node.children.extend(built);
        }
    }

    roots.into_iter().filter_map(|r| slots[r].take()).collect()
}

fn distinct(nodes: Vec<MenuNode>) -> Vec<MenuNode> {
    let mut seen = HashSet::with_capacity(nodes.len());
    nodes
        .into_iter()
        .filter(|node| {
            let first = seen.insert(node.id);
            if !first {
                warn!(menu_id = %node.id, "Dropping duplicate menu id");
            }
            first
        })
        .collect()
}

/// Follows parent links from `start` until a slot repeats and returns the
/// lowest slot on the cycle found. Every slot on the walk must have a parent.
fn first_cycle_member(start: usize, parent_of: &[Option<usize>]) -> usize {
    let mut path: Vec<usize> = Vec::new();
    let mut position: HashMap<usize, usize> = HashMap::new();
    let mut current = start;

    loop {
        if let Some(&at) = position.get(&current) {
            return path[at..].iter().copied().min().unwrap_or(current);
        }
        position.insert(current, path.len());
        path.push(current);
        match parent_of[current] {
            Some(p) => current = p,
            None => return current,
        }
    }
}

fn mark_reached(start: usize, children: &[Vec<usize>], reached: &mut [bool]) {
    let mut stack = vec![start];
    while let Some(slot) = stack.pop() {
        if reached[slot] {
            continue;
        }
        reached[slot] = true;
        stack.extend(children[slot].iter().copied().filter(|&c| !reached[c]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::lorem::en::Word;
    use fake::Fake;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    fn node(id: Uuid, parent: Option<Uuid>) -> MenuNode {
        MenuNode::leaf(id, Word().fake::<String>(), parent)
    }

    fn root_ids(forest: &[MenuNode]) -> Vec<Uuid> {
        forest.iter().map(|n| n.id).collect()
    }

    fn total(forest: &[MenuNode]) -> usize {
        forest.iter().map(|n| 1 + n.descendant_count()).sum()
    }

    #[test]
    fn test_orphan_is_promoted() {
        let id = ids(4);
        let missing = id[3];
        let forest = build_hierarchy(vec![
            node(id[0], None),
            node(id[1], Some(id[0])),
            node(id[2], Some(missing)),
        ]);

        assert_eq!(root_ids(&forest), vec![id[0], id[2]]);
        assert_eq!(root_ids(&forest[0].children), vec![id[1]]);
        assert!(forest[1].children.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(build_hierarchy(Vec::new()).is_empty());
    }

    #[test]
    fn test_sibling_order_is_preserved() {
        let id = ids(5);
        let forest = build_hierarchy(vec![
            node(id[3], Some(id[0])),
            node(id[0], None),
            node(id[1], Some(id[0])),
            node(id[4], None),
            node(id[2], Some(id[0])),
        ]);

        assert_eq!(root_ids(&forest), vec![id[0], id[4]]);
        assert_eq!(root_ids(&forest[0].children), vec![id[3], id[1], id[2]]);
    }

    #[test]
    fn test_child_listed_before_parent() {
        let id = ids(3);
        let forest = build_hierarchy(vec![
            node(id[2], Some(id[1])),
            node(id[1], Some(id[0])),
            node(id[0], None),
        ]);

        assert_eq!(root_ids(&forest), vec![id[0]]);
        assert_eq!(forest[0].children[0].id, id[1]);
        assert_eq!(forest[0].children[0].children[0].id, id[2]);
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let id = ids(6);
        let input = vec![
            node(id[0], None),
            node(id[1], Some(id[0])),
            node(id[2], Some(id[1])),
            node(id[3], Some(Uuid::new_v4())),
            node(id[4], Some(id[5])),
            node(id[5], Some(id[4])),
        ];

        let once = build_hierarchy(input);
        let twice = build_hierarchy(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_two_node_cycle_promotes_first_member() {
        let id = ids(2);
        let forest = build_hierarchy(vec![node(id[0], Some(id[1])), node(id[1], Some(id[0]))]);

        assert_eq!(root_ids(&forest), vec![id[0]]);
        assert_eq!(root_ids(&forest[0].children), vec![id[1]]);
    }

    #[test]
    fn test_cycle_with_tail_keeps_every_node() {
        let id = ids(4);
        // 3 hangs below the 0 -> 1 -> 2 -> 0 cycle.
        let forest = build_hierarchy(vec![
            node(id[3], Some(id[2])),
            node(id[0], Some(id[2])),
            node(id[1], Some(id[0])),
            node(id[2], Some(id[1])),
        ]);

        assert_eq!(total(&forest), 4);
        assert_eq!(root_ids(&forest), vec![id[0]]);
    }

    #[test]
    fn test_self_parent_becomes_root() {
        let id = ids(2);
        let forest = build_hierarchy(vec![node(id[0], Some(id[0])), node(id[1], Some(id[0]))]);

        assert_eq!(root_ids(&forest), vec![id[0]]);
        assert_eq!(root_ids(&forest[0].children), vec![id[1]]);
    }

    #[test]
    fn test_duplicate_id_keeps_first_occurrence() {
        let id = ids(2);
        let mut first = node(id[0], None);
        first.description = "Reports".to_string();
        let mut second = node(id[0], None);
        second.description = "Reports (copy)".to_string();

        let forest = build_hierarchy(vec![first, second, node(id[1], Some(id[0]))]);

        assert_eq!(root_ids(&forest), vec![id[0]]);
        assert_eq!(forest[0].description, "Reports");
        assert_eq!(root_ids(&forest[0].children), vec![id[1]]);
    }

    #[test]
    fn test_duplicate_id_inside_cycle_is_idempotent() {
        let id = ids(2);
        let input = vec![node(id[0], Some(id[1])), node(id[1], Some(id[0])), node(id[1], None)];

        let once = build_hierarchy(input);
        let twice = build_hierarchy(once.clone());

        assert_eq!(total(&once), 2);
        assert_eq!(root_ids(&once), vec![id[0]]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_description_sorted_input_keeps_alphabetical_siblings() {
        let id = ids(5);
        let named = |i: usize, description: &str, parent: Option<Uuid>| {
            MenuNode::leaf(id[i], description.to_string(), parent)
        };
        // Store order: ORDER BY descripcion.
        let forest = build_hierarchy(vec![
            named(0, "Alpha", None),
            named(1, "Billing", Some(id[4])),
            named(2, "Invoices", Some(id[4])),
            named(3, "Payments", Some(id[4])),
            named(4, "Zeta", None),
        ]);

        let names = |nodes: &[MenuNode]| nodes.iter().map(|n| n.description.clone()).collect::<Vec<_>>();
        assert_eq!(names(&forest), vec!["Alpha", "Zeta"]);
        assert_eq!(names(&forest[1].children), vec!["Billing", "Invoices", "Payments"]);
    }

    #[test]
    fn test_child_count_matches_input_minus_roots() {
        for _ in 0..25 {
            let n: usize = (1..60).fake();
            let id = ids(n);
            let input: Vec<MenuNode> = (0..n)
                .map(|i| {
                    let parent = match (0..4).fake::<u8>() {
                        0 => None,
                        1 => Some(Uuid::new_v4()),
                        _ => Some(id[(0..n).fake::<usize>()]),
                    };
                    node(id[i], parent)
                })
                .collect();

            let forest = build_hierarchy(input);
            let nested: usize = forest.iter().map(MenuNode::descendant_count).sum();
            assert_eq!(nested, n - forest.len());
            assert_eq!(total(&forest), n);
        }
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let id = ids(1_000);
        let input: Vec<MenuNode> = (0..id.len())
            .map(|i| node(id[i], i.checked_sub(1).map(|p| id[p])))
            .collect();

        let forest = build_hierarchy(input);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].descendant_count(), 999);
    }
}
