use crate::common::error::XsResult;
use crate::common::nuclide_grid::NuclideGrids;
use crate::common::utils;

use ndarray::prelude::*;

/// Unionized energy grid
///
/// Every energy of every nuclide grid, sorted by increasing value. Identical
/// energies coming from different nuclides are kept as separate entries.
///
/// # Attributes
/// * `energies` unionized energies
/// * `nuclide_indices` dual index table, one row per unionized energy and one
///   column per nuclide: index of the last point of the nuclide grid whose
///   energy is lower or equal to the unionized energy (0 below the grid)
#[derive(Clone, Debug)]
pub struct UnionizedGrid {
    energies: Vec<f64>,
    nuclide_indices: Array2<u32>,
}

impl UnionizedGrid {
    /// Builds the unionized grid and its dual index table
    ///
    /// # Arguments
    /// * `nuclide_grids` sorted grids of every nuclide
    pub fn build(nuclide_grids: &NuclideGrids) -> XsResult<Self> {
        let n_isotopes = nuclide_grids.n_isotopes();

        let mut energies = utils::try_allocate(nuclide_grids.len(), "unionized energy grid")?;
        energies.extend(nuclide_grids.points().iter().map(|point| point.energy));
        energies.sort_unstable_by(f64::total_cmp);

        let table_len = energies.len().saturating_mul(n_isotopes);
        let mut indices = utils::try_allocate::<u32>(table_len, "dual index table")?;

        // unionized energies are sorted, so the index of every nuclide only
        // moves forward: one cursor per nuclide is enough to fill the table
        let mut cursors = vec![0usize; n_isotopes];
        for &energy in &energies {
            for (nuclide, cursor) in cursors.iter_mut().enumerate() {
                let grid = nuclide_grids.grid(nuclide);
                while *cursor + 1 < grid.len() && grid[*cursor + 1].energy <= energy {
                    *cursor += 1;
                }
                indices.push(*cursor as u32);
            }
        }

        let nuclide_indices = Array2::from_shape_vec((energies.len(), n_isotopes), indices)?;

        Ok(UnionizedGrid {
            energies,
            nuclide_indices,
        })
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    pub fn n_isotopes(&self) -> usize {
        self.nuclide_indices.ncols()
    }

    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    /// Index of the last unionized energy lower or equal to `energy`,
    /// clamped to the first and last entries
    #[inline]
    pub fn search(&self, energy: f64) -> usize {
        utils::get_index(energy, &self.energies)
    }

    /// Dual index row of a unionized entry
    #[inline]
    pub fn nuclide_indices(&self, entry: usize) -> ArrayView1<'_, u32> {
        self.nuclide_indices.row(entry)
    }

    /// Index in the grid of `nuclide` of the point at or below the unionized entry
    pub fn nuclide_index(&self, entry: usize, nuclide: usize) -> usize {
        self.nuclide_indices[(entry, nuclide)] as usize
    }
}
