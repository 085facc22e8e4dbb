//! Node-inclusion selection.
//!
//! The legacy format only needs explicit elevation declarations for
//! topologically significant nodes. Intermediate nodes along a single run are
//! implied, and a couple of shapes seen in reference exports are elided as
//! well. These elision rules are compatibility heuristics, not a general
//! graph-theoretic criterion.

use std::collections::{BTreeSet, HashMap, HashSet};

use hn_core::NodeKey;
use tracing::debug;

use crate::traverse::LinkRecord;

/// Decide which node keys need a `NODE … ELEV …` declaration.
///
/// Rules, in priority order:
/// 1. Special keys are always declared.
/// 2. A node whose single incoming and single outgoing link carry the same
///    element is a pass-through and is never declared.
/// 3. A transition node (one link in, a different one out) is declared unless
///    - it sits right before a terminal special node and the two elements
///      follow sequential naming (`C5` then `C6`), or
///    - it is the first node after a branching node and the chain of
///      elements downstream of it repeats one already seen from a sibling
///      branch. Only the first outgoing link of each node is followed when
///      building that chain, so this is an approximation.
/// 4. Every other node (endpoints, merges, splits) is declared.
///
/// The result iterates in export order (see [`NodeKey`]'s `Ord`).
pub fn select_nodes_to_declare(
    links: &[LinkRecord],
    special: &BTreeSet<NodeKey>,
) -> BTreeSet<NodeKey> {
    let table = LinkTable::new(links);
    let mut declared: BTreeSet<NodeKey> = special.clone();
    let mut branch_patterns: HashMap<&NodeKey, HashSet<Vec<&str>>> = HashMap::new();

    for &key in &table.order {
        if special.contains(key) {
            continue;
        }
        let incoming = table.incoming(key);
        let outgoing = table.outgoing(key);

        let include = match (incoming, outgoing) {
            ([inc], [out]) => {
                let (inc, out) = (*inc, *out);
                if inc.element == out.element {
                    false
                } else {
                    let duplicate = table.is_duplicate_branch(key, inc, &mut branch_patterns);
                    let elided = duplicate || table.precedes_terminal(inc, out, special);
                    !elided
                }
            }
            _ => true,
        };

        if include {
            declared.insert(key.clone());
        }
    }

    debug!(
        links = links.len(),
        special = special.len(),
        declared = declared.len(),
        "node declarations selected"
    );
    declared
}

/// Links grouped by endpoint, with node keys in first-appearance order.
struct LinkTable<'a> {
    incoming: HashMap<&'a NodeKey, Vec<&'a LinkRecord>>,
    outgoing: HashMap<&'a NodeKey, Vec<&'a LinkRecord>>,
    order: Vec<&'a NodeKey>,
}

impl<'a> LinkTable<'a> {
    fn new(links: &'a [LinkRecord]) -> Self {
        let mut incoming: HashMap<&NodeKey, Vec<&LinkRecord>> = HashMap::new();
        let mut outgoing: HashMap<&NodeKey, Vec<&LinkRecord>> = HashMap::new();
        let mut order = Vec::new();
        let mut seen = HashSet::new();

        for link in links {
            outgoing.entry(&link.from).or_default().push(link);
            incoming.entry(&link.to).or_default().push(link);
            for key in [&link.from, &link.to] {
                if seen.insert(key) {
                    order.push(key);
                }
            }
        }

        Self {
            incoming,
            outgoing,
            order,
        }
    }

    fn incoming(&self, key: &NodeKey) -> &[&'a LinkRecord] {
        self.incoming.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    fn outgoing(&self, key: &NodeKey) -> &[&'a LinkRecord] {
        self.outgoing.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Last transition before a terminal special node, with sequentially
    /// named elements on either side.
    fn precedes_terminal(
        &self,
        inc: &LinkRecord,
        out: &LinkRecord,
        special: &BTreeSet<NodeKey>,
    ) -> bool {
        special.contains(&out.to)
            && self.outgoing(&out.to).is_empty()
            && is_sequential(&inc.element, &out.element)
    }

    /// First node of a parallel branch whose downstream chain was already
    /// seen from a sibling branch. Records the chain when it is new.
    fn is_duplicate_branch(
        &self,
        key: &'a NodeKey,
        inc: &'a LinkRecord,
        patterns: &mut HashMap<&'a NodeKey, HashSet<Vec<&'a str>>>,
    ) -> bool {
        if self.outgoing(&inc.from).len() <= 1 {
            return false;
        }
        let pattern = self.chain_from(key);
        !patterns.entry(&inc.from).or_default().insert(pattern)
    }

    /// Elements met following the first outgoing link of each node until a
    /// node without outgoing links (or one already on the chain).
    fn chain_from(&self, start: &'a NodeKey) -> Vec<&'a str> {
        let mut chain = Vec::new();
        let mut on_chain: HashSet<&NodeKey> = HashSet::from([start]);
        let mut current = start;
        while let Some(&link) = self.outgoing(current).first() {
            chain.push(link.element.as_str());
            if !on_chain.insert(&link.to) {
                break;
            }
            current = &link.to;
        }
        chain
    }
}

/// `C5` → `C6`: same alphabetic prefix, numeric suffix incremented by one.
fn is_sequential(first: &str, second: &str) -> bool {
    match (split_suffix(first), split_suffix(second)) {
        (Some((p1, n1)), Some((p2, n2))) => p1 == p2 && n1.checked_add(1) == Some(n2),
        _ => false,
    }
}

/// Split `ABC12` into (`ABC`, 12). The prefix must be non-empty and start
/// with a letter; the suffix must be all digits.
fn split_suffix(id: &str) -> Option<(&str, u64)> {
    let digits_at = id.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    let (prefix, digits) = id.split_at(digits_at);
    if digits.is_empty() || !prefix.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    digits.parse().ok().map(|n| (prefix, n))
}
