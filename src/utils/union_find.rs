/// Disjoint-set forest over row indices `0..n`, with path compression and
/// union by size.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        DisjointSet {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Root of `x`'s set. Every node on the path is re-pointed at the root.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merges the sets of `a` and `b`. Returns false if they were already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        true
    }

    /// Joins every pair of elements that share a set in `other`. Both forests
    /// must cover the same `0..n`.
    pub fn absorb(&mut self, other: &mut DisjointSet) {
        debug_assert_eq!(self.len(), other.len());
        for x in 0..other.len() {
            let root = other.find(x);
            if root != x {
                self.union(x, root);
            }
        }
    }

    /// Members of every set with at least `min_size` elements. Each group is
    /// sorted, and groups are ordered by their smallest member.
    pub fn groups(&mut self, min_size: usize) -> Vec<Vec<usize>> {
        let n = self.len();
        let mut by_root: Vec<Vec<usize>> = vec![Vec::new(); n];
        for x in 0..n {
            let root = self.find(x);
            by_root[root].push(x);
        }
        let mut groups: Vec<Vec<usize>> = by_root
            .into_iter()
            .filter(|members| !members.is_empty() && members.len() >= min_size)
            .collect();
        groups.sort_by_key(|members| members[0]);
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons_start_apart() {
        let mut set = DisjointSet::new(3);
        assert_ne!(set.find(0), set.find(1));
        assert!(set.groups(2).is_empty());
    }

    #[test]
    fn test_union_is_transitive() {
        let mut set = DisjointSet::new(5);
        assert!(set.union(0, 1));
        assert!(set.union(1, 2));
        assert!(!set.union(0, 2));
        assert_eq!(set.find(0), set.find(2));
        assert_eq!(set.groups(2), vec![vec![0, 1, 2]]);
        assert_eq!(set.groups(1).len(), 3);
    }

    #[test]
    fn test_path_compression_flattens_chain() {
        let mut set = DisjointSet::new(6);
        for i in 0..5 {
            set.union(i, i + 1);
        }
        let root = set.find(5);
        for i in 0..6 {
            assert_eq!(set.parent[i], root, "node {} should point at root", i);
        }
    }

    #[test]
    fn test_absorb_merges_partial_forests() {
        let mut left = DisjointSet::new(6);
        left.union(0, 1);
        left.union(4, 5);
        let mut right = DisjointSet::new(6);
        right.union(1, 2);
        left.absorb(&mut right);
        assert_eq!(left.groups(2), vec![vec![0, 1, 2], vec![4, 5]]);
        assert_eq!(left.groups(1).len(), 3);
    }

    #[test]
    fn test_absorb_empty_forest_changes_nothing() {
        let mut left = DisjointSet::new(3);
        left.union(0, 2);
        left.absorb(&mut DisjointSet::new(3));
        assert_eq!(left.groups(2), vec![vec![0, 2]]);
    }

    #[test]
    fn test_empty() {
        let mut set = DisjointSet::new(0);
        assert!(set.is_empty());
        assert!(set.groups(1).is_empty());
    }
}
