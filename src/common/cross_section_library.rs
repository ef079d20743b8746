use crate::common::cross_section::{self, XsVector, NUM_INTERACTIONS};
use crate::common::energy_grid::UnionizedGrid;
use crate::common::error::{XsBenchError, XsResult};
use crate::common::material::{Material, MaterialTable};
use crate::common::nuclide_grid::NuclideGrids;
use crate::common::report;
use crate::common::rng::RandomStream;
use crate::input::config::BenchmarkConfig;

/// Cross section library
///
/// Read-only data set shared by all the lookup threads.
///
/// # Attributes
/// * `nuclide_grids` sorted energy grids of every nuclide
/// * `energy_grid` unionized energy grid with its dual index table
/// * `materials` composition of every material
#[derive(Clone, Debug)]
pub struct CrossSectionLibrary {
    pub nuclide_grids: NuclideGrids,
    pub energy_grid: UnionizedGrid,
    pub materials: MaterialTable,
}

impl CrossSectionLibrary {
    /// Creates a library from existing grids and materials, building the
    /// unionized energy grid
    pub fn new(nuclide_grids: NuclideGrids, materials: MaterialTable) -> XsResult<Self> {
        if materials.n_isotopes() != nuclide_grids.n_isotopes() {
            return Err(XsBenchError::InvalidInput(format!(
                "materials are defined on {} nuclides but the grids hold {}",
                materials.n_isotopes(),
                nuclide_grids.n_isotopes()
            )));
        }
        let energy_grid = UnionizedGrid::build(&nuclide_grids)?;

        Ok(CrossSectionLibrary {
            nuclide_grids,
            energy_grid,
            materials,
        })
    }

    /// Generates the synthetic data set of a benchmark run
    ///
    /// Grids and concentrations are drawn from a stream seeded with
    /// `config.seed`, so the same seed always gives the same library.
    pub fn generate(config: &BenchmarkConfig) -> XsResult<Self> {
        let mut rng = RandomStream::new(config.seed);

        if !config.quiet {
            report::step("\u{2699}", "Generating and sorting nuclide energy grids...");
        }
        let nuclide_grids =
            NuclideGrids::generate(config.n_isotopes(), config.n_gridpoints, &mut rng)?;

        if !config.quiet {
            report::step("\u{26EB}", "Building unionized energy grid and dual index...");
        }
        let energy_grid = UnionizedGrid::build(&nuclide_grids)?;

        if !config.quiet {
            report::step("\u{1F9EA}", "Loading materials...");
        }
        let materials = MaterialTable::canonical(config.n_isotopes(), &mut rng)?;

        Ok(CrossSectionLibrary {
            nuclide_grids,
            energy_grid,
            materials,
        })
    }

    /// Macroscopic cross sections of a material at a given energy
    ///
    /// One search in the unionized grid, then the dual index gives the
    /// bracket of every nuclide of the material without any further search.
    /// Nuclides of a material taken from a larger table are not in this
    /// library and contribute nothing.
    ///
    /// # Arguments
    /// * `energy` energy of the particle
    /// * `material` material the particle is in
    ///
    /// # Returns
    /// * `macro_xs` concentration weighted sum of the microscopic cross sections
    ///
    /// # Example
    /// ```
    /// use xsbench::common::cross_section_library::CrossSectionLibrary;
    /// use xsbench::input::config::{BenchmarkConfig, ProblemSize};
    ///
    /// let config = BenchmarkConfig {
    ///     problem_size: ProblemSize::Small,
    ///     n_gridpoints: 10,
    ///     quiet: true,
    ///     ..BenchmarkConfig::default()
    /// };
    /// let library = CrossSectionLibrary::generate(&config).unwrap();
    /// let fuel = library.materials.get(0).unwrap();
    /// let macro_xs = library.calculate_macro_xs(0.4, fuel);
    /// assert!(macro_xs.iter().all(|xs| xs.is_finite()));
    /// ```
    #[inline]
    pub fn calculate_macro_xs(&self, energy: f64, material: &Material) -> XsVector {
        let mut macro_xs = [0.; NUM_INTERACTIONS];

        let entry = self.energy_grid.search(energy);
        let nuclide_indices = self.energy_grid.nuclide_indices(entry);

        for (nuclide, concentration) in material.composition() {
            let Some(&index) = nuclide_indices.get(nuclide) else {
                continue;
            };
            let micro_xs = self.calculate_micro_xs(energy, nuclide, index as usize);
            for (xs, micro) in macro_xs.iter_mut().zip(micro_xs) {
                *xs += concentration * micro;
            }
        }
        macro_xs
    }

    /// Same as `calculate_macro_xs`, with the material given by its index
    pub fn try_calculate_macro_xs(&self, energy: f64, material_id: usize) -> XsResult<XsVector> {
        let material = self
            .materials
            .get(material_id)
            .ok_or(XsBenchError::UnknownMaterial(material_id))?;
        Ok(self.calculate_macro_xs(energy, material))
    }

    /// Microscopic cross sections of a nuclide
    ///
    /// # Arguments
    /// * `energy` energy of the particle
    /// * `nuclide` nuclide index
    /// * `index` index of the grid point at or below the energy, from the dual index
    #[inline]
    pub fn calculate_micro_xs(&self, energy: f64, nuclide: usize, index: usize) -> XsVector {
        let grid = self.nuclide_grids.grid(nuclide);
        if grid.len() < 2 {
            return grid[0].cross_sections();
        }
        // the last point is the upper bound of the last interval
        let low = index.min(grid.len() - 2);
        cross_section::calculate_micro_xs(energy, &grid[low], &grid[low + 1])
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::common::cross_section::Interaction;
    use crate::common::nuclide_grid::NuclideGridPoint;
    use crate::input::config::ProblemSize;
    use approx::assert_relative_eq;

    fn small_config() -> BenchmarkConfig {
        BenchmarkConfig {
            problem_size: ProblemSize::Small,
            n_gridpoints: 40,
            quiet: true,
            ..BenchmarkConfig::default()
        }
    }

    fn hand_library() -> CrossSectionLibrary {
        let points = vec![
            // nuclide 0
            NuclideGridPoint::new(1., [10., 8., 2., 1., 2.5]),
            NuclideGridPoint::new(3., [20., 15., 5., 3., 7.5]),
            // nuclide 1
            NuclideGridPoint::new(2., [4., 3., 1., 0.5, 1.2]),
            NuclideGridPoint::new(4., [2., 1.5, 0.5, 0.25, 0.6]),
        ];
        let nuclide_grids = NuclideGrids::from_points(2, 2, points).unwrap();
        let materials =
            MaterialTable::from_compositions(2, vec![vec![(0, 1.), (1, 1.)], vec![(1, 2.)]])
                .unwrap();
        CrossSectionLibrary::new(nuclide_grids, materials).unwrap()
    }

    fn log_log(energy: f64, e0: f64, e1: f64, y0: f64, y1: f64) -> f64 {
        (y0.ln() + (energy.ln() - e0.ln()) / (e1.ln() - e0.ln()) * (y1.ln() - y0.ln())).exp()
    }

    #[test]
    fn test_two_nuclide_lookup() {
        let library = hand_library();

        assert_eq!(library.energy_grid.energies(), &[1., 2., 3., 4.]);

        let macro_xs = library.try_calculate_macro_xs(2.5, 0).unwrap();
        let nuclide_0 = [10., 8., 2., 1., 2.5];
        let nuclide_0_high = [20., 15., 5., 3., 7.5];
        let nuclide_1 = [4., 3., 1., 0.5, 1.2];
        let nuclide_1_high = [2., 1.5, 0.5, 0.25, 0.6];
        for i in 0..NUM_INTERACTIONS {
            let expected = log_log(2.5, 1., 3., nuclide_0[i], nuclide_0_high[i])
                + log_log(2.5, 2., 4., nuclide_1[i], nuclide_1_high[i]);
            assert_relative_eq!(macro_xs[i], expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_concentrations_weight_the_sum() {
        let library = hand_library();

        let macro_xs = library.try_calculate_macro_xs(3., 1).unwrap();
        let expected = 2. * log_log(3., 2., 4., 4., 2.);
        assert_relative_eq!(macro_xs[Interaction::Total.index()], expected, max_relative = 1e-12);
    }

    #[test]
    fn test_lookup_at_grid_energy() {
        let library = hand_library();

        // energy 4 is the last point of nuclide 1 and above the grid of nuclide 0
        let macro_xs = library.try_calculate_macro_xs(4., 1).unwrap();
        assert_relative_eq!(macro_xs[Interaction::Total.index()], 4.);

        let macro_xs = library.try_calculate_macro_xs(4., 0).unwrap();
        assert_relative_eq!(macro_xs[Interaction::Total.index()], 20. + 2.);
    }

    #[test]
    fn test_lookup_outside_of_the_grid() {
        let library = hand_library();

        let below = library.try_calculate_macro_xs(0.01, 0).unwrap();
        assert_relative_eq!(below[Interaction::Total.index()], 10. + 4.);

        let above = library.try_calculate_macro_xs(100., 0).unwrap();
        assert_relative_eq!(above[Interaction::Total.index()], 20. + 2.);
    }

    #[test]
    fn test_lookup_at_non_finite_energies() {
        let library = hand_library();

        let above = library.try_calculate_macro_xs(f64::INFINITY, 0).unwrap();
        assert_relative_eq!(above[Interaction::Total.index()], 20. + 2.);

        let below = library.try_calculate_macro_xs(f64::NEG_INFINITY, 0).unwrap();
        assert_relative_eq!(below[Interaction::Total.index()], 10. + 4.);

        let nan = library.try_calculate_macro_xs(f64::NAN, 0).unwrap();
        assert!(nan.iter().all(|xs| xs.is_finite() && *xs >= 0.));
    }

    #[test]
    fn test_material_of_a_larger_table() {
        let library = hand_library();
        let materials =
            MaterialTable::from_compositions(4, vec![vec![(3, 1.)], vec![(1, 2.), (3, 5.)]])
                .unwrap();

        let foreign = library.calculate_macro_xs(2.5, materials.get(0).unwrap());
        assert_eq!(foreign, [0.; NUM_INTERACTIONS]);

        // only the nuclide known to the library is accumulated
        let mixed = library.calculate_macro_xs(3., materials.get(1).unwrap());
        let expected = library.try_calculate_macro_xs(3., 1).unwrap();
        assert_eq!(mixed, expected);
    }

    #[test]
    fn test_unknown_material() {
        let library = hand_library();
        assert!(matches!(
            library.try_calculate_macro_xs(1., 5),
            Err(XsBenchError::UnknownMaterial(5))
        ));
    }

    #[test]
    fn test_mismatched_materials() {
        let nuclide_grids =
            NuclideGrids::from_points(1, 1, vec![NuclideGridPoint::new(1., [1.; 5])]).unwrap();
        let materials = MaterialTable::from_compositions(2, vec![vec![(1, 1.)]]).unwrap();
        assert!(CrossSectionLibrary::new(nuclide_grids, materials).is_err());
    }

    #[test]
    fn test_single_point_grids() {
        let nuclide_grids =
            NuclideGrids::from_points(1, 1, vec![NuclideGridPoint::new(1., [1., 2., 3., 4., 5.])])
                .unwrap();
        let materials = MaterialTable::from_compositions(1, vec![vec![(0, 2.)]]).unwrap();
        let library = CrossSectionLibrary::new(nuclide_grids, materials).unwrap();

        assert_eq!(library.try_calculate_macro_xs(0.3, 0).unwrap(), [2., 4., 6., 8., 10.]);
    }

    #[test]
    fn test_generated_library_lookups_are_finite() {
        let library = CrossSectionLibrary::generate(&small_config()).unwrap();
        assert_eq!(library.materials.len(), 12);
        assert_eq!(library.energy_grid.len(), 68 * 40);

        let mut rng = RandomStream::new(99);
        for material in library.materials.iter() {
            for _ in 0..200 {
                let macro_xs = library.calculate_macro_xs(rng.draw(), material);
                assert!(macro_xs.iter().all(|xs| xs.is_finite() && *xs >= 0.));
            }
            for energy in [0., 1e-12, 1., 10.] {
                let macro_xs = library.calculate_macro_xs(energy, material);
                assert!(macro_xs.iter().all(|xs| xs.is_finite() && *xs >= 0.));
            }
        }
    }

    #[test]
    fn test_lookup_at_nuclide_points_is_exact() {
        let library = CrossSectionLibrary::generate(&small_config()).unwrap();
        let materials = MaterialTable::from_compositions(68, vec![vec![(5, 1.)]]).unwrap();
        let single = materials.get(0).unwrap();

        for point in library.nuclide_grids.grid(5) {
            let macro_xs = library.calculate_macro_xs(point.energy, single);
            for (xs, expected) in macro_xs.iter().zip(point.cross_sections()) {
                assert_relative_eq!(*xs, expected, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let first = CrossSectionLibrary::generate(&small_config()).unwrap();
        let second = CrossSectionLibrary::generate(&small_config()).unwrap();

        assert_eq!(first.nuclide_grids.points(), second.nuclide_grids.points());
        assert_eq!(first.energy_grid.energies(), second.energy_grid.energies());
        for (a, b) in first.materials.iter().zip(second.materials.iter()) {
            assert_eq!(a, b);
        }
    }
}
