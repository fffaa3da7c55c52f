//! Disjoint-Set Union (Union-Find)
//!
//! Arena-backed: every registered id gets a slot index, and `parent`, `rank` and `size` are
//! parallel vectors indexed by slot. An `id -> slot` map translates caller identifiers.
//!
//! `find` compresses paths (every visited slot is re-pointed at the root) and `union` attaches
//! the lower-rank root under the higher-rank one, which together give near-constant amortized
//! operations. Only roots carry a meaningful `size`.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct DisjointSet<K> {
    slots: HashMap<K, usize>,
    ids: Vec<K>,
    parent: Vec<usize>,
    rank: Vec<u32>,
    size: Vec<usize>,
}

impl<K> DisjointSet<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            ids: Vec::new(),
            parent: Vec::new(),
            rank: Vec::new(),
            size: Vec::new(),
        }
    }

    /// Registers `id` as a singleton component. Returns its slot; idempotent.
    pub fn add(&mut self, id: &K) -> usize {
        if let Some(&slot) = self.slots.get(id) {
            return slot;
        }

        let slot = self.ids.len();
        self.slots.insert(id.clone(), slot);
        self.ids.push(id.clone());
        self.parent.push(slot);
        self.rank.push(0);
        self.size.push(1);
        slot
    }

    /// Representative of `id`'s component. Unseen ids are registered first.
    pub fn find(&mut self, id: &K) -> K {
        let slot = self.add(id);
        let root = self.find_slot(slot);
        self.ids[root].clone()
    }

    /// Merges the components of `a` and `b`. Returns `false` when they were already joined.
    pub fn union(&mut self, a: &K, b: &K) -> bool {
        let slot_a = self.add(a);
        let slot_b = self.add(b);
        let root_a = self.find_slot(slot_a);
        let root_b = self.find_slot(slot_b);

        if root_a == root_b {
            return false;
        }

        let (root, child) = match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => (root_b, root_a),
            std::cmp::Ordering::Greater => (root_a, root_b),
            std::cmp::Ordering::Equal => {
                self.rank[root_a] += 1;
                (root_a, root_b)
            }
        };

        self.parent[child] = root;
        self.size[root] += self.size[child];
        true
    }

    pub fn connected(&mut self, a: &K, b: &K) -> bool {
        let slot_a = self.add(a);
        let slot_b = self.add(b);
        self.find_slot(slot_a) == self.find_slot(slot_b)
    }

    /// Size of `id`'s component, as recorded at its root.
    pub fn component_size(&mut self, id: &K) -> usize {
        let slot = self.add(id);
        let root = self.find_slot(slot);
        self.size[root]
    }

    /// Full partition: root id -> member ids, members in registration order.
    pub fn components(&mut self) -> HashMap<K, Vec<K>> {
        let mut groups: HashMap<K, Vec<K>> = HashMap::new();
        for slot in 0..self.ids.len() {
            let root = self.find_slot(slot);
            groups
                .entry(self.ids[root].clone())
                .or_default()
                .push(self.ids[slot].clone());
        }
        groups
    }

    /// Components as plain lists, ordered by the earliest-registered member of each.
    pub fn clusters(&mut self) -> Vec<Vec<K>> {
        let mut by_root: HashMap<usize, usize> = HashMap::new();
        let mut clusters: Vec<Vec<K>> = Vec::new();

        for slot in 0..self.ids.len() {
            let root = self.find_slot(slot);
            let position = *by_root.entry(root).or_insert_with(|| {
                clusters.push(Vec::new());
                clusters.len() - 1
            });
            clusters[position].push(self.ids[slot].clone());
        }

        clusters
    }

    /// Number of registered ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &K) -> bool {
        self.slots.contains_key(id)
    }

    fn find_slot(&mut self, slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // Second pass: point every slot on the path straight at the root.
        let mut current = slot;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    #[cfg(test)]
    pub(crate) fn parent_of(&self, id: &K) -> Option<K> {
        let slot = *self.slots.get(id)?;
        Some(self.ids[self.parent[slot]].clone())
    }
}

impl<K> Default for DisjointSet<K>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
