use crate::data::{Direction, Site, SiteState};
use crate::disjoint_set::DisjointSet;
use crate::error::GridError;

/// An n-by-n grid of sites, all blocked at construction.
///
/// Site (row, col) is forest element `n*(row-1) + (col-1)`. Two extra
/// elements, `n*n` and `n*n + 1`, stand for the top and bottom edges: every
/// open site of the first row is joined to the top one and every open site of
/// the last row to the bottom one, so both `is_full` and `percolates` are a
/// single connectivity query.
#[derive(Debug, Clone)]
pub struct PercolationGrid {
	n: usize,
	sites: DisjointSet,
	states: Vec<SiteState>,
	num_open: usize,
	virtual_top: usize,
	virtual_btm: usize,
	// set by the first `open` after which top and bottom share a set
	percolated: bool,
}

impl PercolationGrid {
	pub fn new(n: isize) -> Result<PercolationGrid, GridError> {
		if n <= 0 {
			return Err(GridError::Construction { n });
		}
		let size = n as usize;
		let num_sites = match size.checked_mul(size).and_then(|s| s.checked_add(2)) {
			Some(elements) => elements - 2,
			None => return Err(GridError::TooLarge { n }),
		};
		let n = size;
		debug!("new {}x{} grid, {} forest elements", n, n, num_sites + 2);

		Ok(PercolationGrid {
			n,
			sites: DisjointSet::make_singletons(num_sites + 2),
			states: vec![SiteState::Blocked; num_sites],
			num_open: 0,
			virtual_top: num_sites,
			virtual_btm: num_sites + 1,
			percolated: false,
		})
	}

	pub fn size(&self) -> usize {
		self.n
	}

	/// Opens (row, col). Opening an already open site changes nothing.
	pub fn open(&mut self, row: isize, col: isize) -> Result<(), GridError> {
		let i = self.index(row, col)?;
		if self.states[i].is_open() {
			return Ok(());
		}
		self.states[i] = SiteState::Open;
		self.num_open += 1;

		let site = Site::new(row, col);
		for d in Direction::adjacent_directions() {
			// neighbours come from coordinates so the row ends never wrap
			if let Some(j) = self.neighbor_index(site.step(d)) {
				if self.states[j].is_open() {
					self.sites.unite(i, j);
				}
			}
		}

		if row == 1 {
			self.sites.unite(i, self.virtual_top);
		}
		if row as usize == self.n {
			self.sites.unite(i, self.virtual_btm);
		}
		trace!("opened ({}, {}), {} open", row, col, self.num_open);

		if !self.percolated && self.sites.same_set(self.virtual_btm, self.virtual_top) {
			self.percolated = true;
			info!("{}x{} grid percolates after opening ({}, {}) with {} open sites",
				self.n, self.n, row, col, self.num_open);
		}
		Ok(())
	}

	pub fn is_open(&self, row: isize, col: isize) -> Result<bool, GridError> {
		Ok(self.state(row, col)?.is_open())
	}

	pub fn state(&self, row: isize, col: isize) -> Result<SiteState, GridError> {
		let i = self.index(row, col)?;
		Ok(self.states[i])
	}

	/// Whether (row, col) shares a set with the top edge. Not gated on the
	/// site being open; only open sites are ever joined, so a blocked site
	/// never reports full.
	pub fn is_full(&mut self, row: isize, col: isize) -> Result<bool, GridError> {
		let i = self.index(row, col)?;
		Ok(self.sites.same_set(i, self.virtual_top))
	}

	pub fn number_of_open_sites(&self) -> usize {
		self.num_open
	}

	pub fn percolates(&mut self) -> bool {
		self.sites.same_set(self.virtual_btm, self.virtual_top)
	}

	pub fn open_site(&mut self, site: Site) -> Result<(), GridError> {
		self.open(site.row, site.col)
	}

	pub fn is_open_site(&self, site: Site) -> Result<bool, GridError> {
		self.is_open(site.row, site.col)
	}

	pub fn is_full_site(&mut self, site: Site) -> Result<bool, GridError> {
		self.is_full(site.row, site.col)
	}

	fn contains(&self, row: isize, col: isize) -> bool {
		let n = self.n as isize;
		row >= 1 && row <= n && col >= 1 && col <= n
	}

	fn index(&self, row: isize, col: isize) -> Result<usize, GridError> {
		if !self.contains(row, col) {
			return Err(GridError::Coordinate { row, col, n: self.n });
		}
		Ok(self.n * (row as usize - 1) + (col as usize - 1))
	}

	fn neighbor_index(&self, site: Site) -> Option<usize> {
		self.index(site.row, site.col).ok()
	}
}
