//! Hypercubic lattices with open or periodic boundaries.

use indexmap::IndexSet;
use itertools::Itertools;
use rustc_hash::FxHashSet as HashSet;
use crate::error::EdError;

/// A `length`<sup>`n_dim`</sup> hypercubic lattice with nearest-neighbor
/// edges.
///
/// Sites are numbered in row-major order over their integer coordinates, so
/// the last coordinate varies fastest. Edges are undirected, stored as `(i, j)`
/// with `i < j`, and sorted. Periodic wrapping never produces self-loops or
/// repeated edges, so a periodic chain of length 2 has the single edge
/// `(0, 1)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hypercube {
    length: usize,
    n_dim: usize,
    pbc: bool,
    coords: IndexSet<Vec<usize>>,
    edges: Vec<(usize, usize)>,
}

impl Hypercube {
    /// Create a new `Hypercube`.
    pub fn new(length: usize, n_dim: usize, pbc: bool)
        -> Result<Self, EdError>
    {
        if length == 0 { return Err(EdError::InvalidLength(length)); }
        if n_dim == 0 { return Err(EdError::InvalidDimension(n_dim)); }
        u32::try_from(n_dim).ok()
            .and_then(|d| length.checked_pow(d))
            .ok_or(EdError::InvalidDimension(n_dim))?;

        let coords: IndexSet<Vec<usize>>
            = (0..n_dim).map(|_| 0..length)
            .multi_cartesian_product()
            .collect();

        let mut seen: HashSet<(usize, usize)> = HashSet::default();
        let mut edges: Vec<(usize, usize)> = Vec::new();
        for (site, coord) in coords.iter().enumerate() {
            for d in 0..n_dim {
                let mut nb = coord.clone();
                if coord[d] + 1 < length {
                    nb[d] += 1;
                } else if pbc {
                    nb[d] = 0;
                } else {
                    continue;
                }
                let Some(other) = coords.get_index_of(&nb) else { continue; };
                if other == site { continue; }
                let edge = (site.min(other), site.max(other));
                if seen.insert(edge) { edges.push(edge); }
            }
        }
        edges.sort_unstable();

        Ok(Self { length, n_dim, pbc, coords, edges })
    }

    /// Create a periodic 1D chain of `length` sites.
    pub fn chain(length: usize) -> Result<Self, EdError> {
        Self::new(length, 1, true)
    }

    /// Number of sites along each dimension.
    pub fn length(&self) -> usize { self.length }

    /// Number of dimensions.
    pub fn n_dim(&self) -> usize { self.n_dim }

    /// Return `true` if the lattice has periodic boundaries.
    pub fn is_periodic(&self) -> bool { self.pbc }

    /// Total number of sites.
    pub fn n_sites(&self) -> usize { self.coords.len() }

    /// All nearest-neighbor edges.
    pub fn edges(&self) -> &[(usize, usize)] { &self.edges }

    /// Return the coordinates of a site.
    pub fn coords(&self, site: usize) -> Option<&[usize]> {
        self.coords.get_index(site).map(|c| c.as_slice())
    }

    /// Return the site at a set of coordinates.
    pub fn site_at(&self, coords: &[usize]) -> Option<usize> {
        self.coords.get_index_of(coords)
    }

    /// Return all sites sharing an edge with `site`, in ascending order.
    pub fn neighbours(&self, site: usize) -> Vec<usize> {
        let mut nbs: Vec<usize>
            = self.edges.iter()
            .filter_map(|&(i, j)| {
                if i == site {
                    Some(j)
                } else if j == site {
                    Some(i)
                } else {
                    None
                }
            })
            .collect();
        nbs.sort_unstable();
        nbs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periodic_chain_edges() {
        let g = Hypercube::chain(5).unwrap();
        assert_eq!(g.n_sites(), 5);
        assert_eq!(g.edges(), &[(0, 1), (0, 4), (1, 2), (2, 3), (3, 4)]);
        assert_eq!(g.neighbours(0), vec![1, 4]);
        assert!(g.is_periodic());
    }

    #[test]
    fn open_chain_edges() {
        let g = Hypercube::new(4, 1, false).unwrap();
        assert_eq!(g.edges(), &[(0, 1), (1, 2), (2, 3)]);
        assert_eq!(g.neighbours(0), vec![1]);
    }

    #[test]
    fn short_periodic_chains() {
        let g2 = Hypercube::chain(2).unwrap();
        assert_eq!(g2.edges(), &[(0, 1)]);
        let g1 = Hypercube::chain(1).unwrap();
        assert_eq!(g1.n_sites(), 1);
        assert!(g1.edges().is_empty());
    }

    #[test]
    fn square_lattice() {
        let g = Hypercube::new(3, 2, true).unwrap();
        assert_eq!(g.n_sites(), 9);
        assert_eq!(g.edges().len(), 18);
        assert_eq!(g.coords(5), Some([1, 2].as_slice()));
        assert_eq!(g.site_at(&[2, 0]), Some(6));
        assert_eq!(g.neighbours(4), vec![1, 3, 5, 7]);

        let open = Hypercube::new(3, 2, false).unwrap();
        assert_eq!(open.edges().len(), 12);
    }

    #[test]
    fn rejects_empty_lattices() {
        assert!(matches!(Hypercube::chain(0), Err(EdError::InvalidLength(0))));
        assert!(matches!(
            Hypercube::new(3, 0, true),
            Err(EdError::InvalidDimension(0)),
        ));
    }
}
