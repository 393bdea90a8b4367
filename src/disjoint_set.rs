//! Union-find over an explicit node table, addressed by index rather than
//! by a self-referential node type (an interior-node pattern, since Rust's
//! trait system has no F-bounded `Self` recursion to lean on here).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Node {
    parent: usize,
    size: usize,
    priority: i64,
}

/// A disjoint-set forest over `0..n` elements, with union by size and an
/// optional per-element priority that overrides the size tiebreak.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    nodes: Vec<Node>,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        let nodes = (0..n)
            .map(|i| Node { parent: i, size: 1, priority: 0 })
            .collect();
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends a new singleton node, returning its index. Lets a caller
    /// grow the forest incrementally rather than fixing `n` up front.
    pub fn push(&mut self) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(Node { parent: idx, size: 1, priority: 0 });
        idx
    }

    pub fn priority(&self, x: usize) -> i64 {
        self.nodes[x].priority
    }

    pub fn set_priority(&mut self, x: usize, priority: i64) {
        self.nodes[x].priority = priority;
    }

    /// Size of the set containing `x`, valid for any member (it looks up
    /// the root first).
    pub fn size_of(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.nodes[root].size
    }

    /// Finds the representative of `x`'s set, splitting every visited node
    /// to point directly at its grandparent as it walks to the root.
    pub fn find(&mut self, x: usize) -> usize {
        let mut current = x;
        while self.nodes[current].parent != current {
            let parent = self.nodes[current].parent;
            let grandparent = self.nodes[parent].parent;
            self.nodes[current].parent = grandparent;
            current = grandparent;
        }
        current
    }

    /// Unites the sets containing `a` and `b`. The new root is whichever
    /// side has the higher priority; ties go to the larger set.
    pub fn unite(&mut self, a: usize, b: usize) -> usize {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return ra;
        }

        let (winner, loser) = if self.nodes[ra].priority != self.nodes[rb].priority {
            if self.nodes[ra].priority > self.nodes[rb].priority {
                (ra, rb)
            } else {
                (rb, ra)
            }
        } else if self.nodes[ra].size >= self.nodes[rb].size {
            (ra, rb)
        } else {
            (rb, ra)
        };

        self.nodes[loser].parent = winner;
        self.nodes[winner].size += self.nodes[loser].size;
        winner
    }

    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_grows_the_forest_with_a_fresh_singleton() {
        let mut ds = DisjointSet::new(2);
        let idx = ds.push();
        assert_eq!(idx, 2);
        assert_eq!(ds.len(), 3);
        assert!(!ds.same_set(0, idx));
    }

    #[test]
    fn singletons_start_in_their_own_set() {
        let mut ds = DisjointSet::new(4);
        assert!(!ds.same_set(0, 1));
        assert_eq!(ds.size_of(0), 1);
    }

    #[test]
    fn unite_merges_sets_transitively() {
        let mut ds = DisjointSet::new(5);
        ds.unite(0, 1);
        ds.unite(1, 2);
        assert!(ds.same_set(0, 2));
        assert!(!ds.same_set(0, 3));
        assert_eq!(ds.size_of(0), 3);
    }

    #[test]
    fn priority_overrides_size_when_choosing_the_root() {
        let mut ds = DisjointSet::new(4);
        ds.unite(0, 1); // size-2 set rooted somewhere in {0,1}
        ds.set_priority(2, 10);
        let root = ds.unite(2, 0);
        assert_eq!(root, 2);
        assert_eq!(ds.find(0), 2);
        assert_eq!(ds.find(1), 2);
    }

    #[test]
    fn equivalence_closure_matches_union_sequence() {
        let mut ds = DisjointSet::new(6);
        ds.unite(0, 1);
        ds.unite(2, 3);
        ds.unite(1, 2);
        for (a, b) in [(0, 1), (0, 2), (0, 3), (1, 3)] {
            assert!(ds.same_set(a, b));
        }
        assert!(!ds.same_set(0, 4));
        assert!(!ds.same_set(4, 5));
    }
}
