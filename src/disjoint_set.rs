
// https://en.wikipedia.org/wiki/Disjoint-set_data_structure
use crate::error::DisjointSetError;

/// Weighted quick-union with full path compression over a fixed number of elements.
#[derive(Debug, Clone)]
pub struct DisjointSet {
	parent: Vec<usize>,
	weight: Vec<usize>,
	count: usize,
}

impl DisjointSet {
	/// `size` should be positive; an empty forest is accepted but every query on it fails.
	pub fn make_singletons(size: usize) -> DisjointSet {
		DisjointSet {
			parent: (0..size).collect(),
			weight: vec![1; size],
			count: size,
		}
	}

	pub fn len(&self) -> usize {
		self.parent.len()
	}

	pub fn is_empty(&self) -> bool {
		self.parent.is_empty()
	}

	/// Number of disjoint sets remaining.
	pub fn count(&self) -> usize {
		self.count
	}

	pub fn find(&mut self, p: usize) -> Result<usize, DisjointSetError> {
		self.check(p)?;
		Ok(self.root(p))
	}

	/// Merges the sets of `p` and `q`. Returns false if they already shared a set.
	pub fn union(&mut self, p: usize, q: usize) -> Result<bool, DisjointSetError> {
		self.check(p)?;
		self.check(q)?;
		Ok(self.unite(p, q))
	}

	pub fn connected(&mut self, p: usize, q: usize) -> Result<bool, DisjointSetError> {
		self.check(p)?;
		self.check(q)?;
		Ok(self.same_set(p, q))
	}

	/// Number of elements in the set containing `p`.
	pub fn set_size(&mut self, p: usize) -> Result<usize, DisjointSetError> {
		self.check(p)?;
		let root = self.root(p);
		Ok(self.weight[root])
	}

	fn check(&self, p: usize) -> Result<(), DisjointSetError> {
		if p < self.len() {
			Ok(())
		} else {
			Err(DisjointSetError::OutOfRange { index: p, len: self.len() })
		}
	}

	// Callers guarantee `p < len`.
	pub(crate) fn root(&mut self, p: usize) -> usize {
		let mut root = p;
		while self.parent[root] != root {
			root = self.parent[root];
		}

		// second pass: point everything on the walk straight at the root
		let mut x = p;
		while x != root {
			let next = self.parent[x];
			self.parent[x] = root;
			x = next;
		}
		root
	}

	pub(crate) fn unite(&mut self, p: usize, q: usize) -> bool {
		let p_root = self.root(p);
		let q_root = self.root(q);
		if p_root == q_root {
			return false;
		}

		// union by size, ties go to p
		if self.weight[p_root] < self.weight[q_root] {
			self.parent[p_root] = q_root;
			self.weight[q_root] += self.weight[p_root];
		} else {
			self.parent[q_root] = p_root;
			self.weight[p_root] += self.weight[q_root];
		}
		self.count -= 1;
		true
	}

	pub(crate) fn same_set(&mut self, p: usize, q: usize) -> bool {
		self.root(p) == self.root(q)
	}
}
