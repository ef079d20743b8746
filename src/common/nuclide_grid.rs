use crate::common::cross_section::XsVector;
use crate::common::error::{XsBenchError, XsResult};
use crate::common::rng::RandomStream;
use crate::common::utils;

/// One tabulated energy point of a nuclide
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NuclideGridPoint {
    pub energy: f64,
    pub total_xs: f64,
    pub elastic_xs: f64,
    pub absorption_xs: f64,
    pub fission_xs: f64,
    pub nu_fission_xs: f64,
}

impl NuclideGridPoint {
    pub fn new(energy: f64, cross_sections: XsVector) -> Self {
        let [total_xs, elastic_xs, absorption_xs, fission_xs, nu_fission_xs] = cross_sections;
        NuclideGridPoint {
            energy,
            total_xs,
            elastic_xs,
            absorption_xs,
            fission_xs,
            nu_fission_xs,
        }
    }

    /// Synthetic point: random energy, cross sections in (0, 1]
    fn sample(rng: &mut RandomStream) -> Self {
        NuclideGridPoint {
            energy: rng.draw(),
            total_xs: 1. - rng.draw(),
            elastic_xs: 1. - rng.draw(),
            absorption_xs: 1. - rng.draw(),
            fission_xs: 1. - rng.draw(),
            nu_fission_xs: 1. - rng.draw(),
        }
    }

    #[inline]
    pub fn cross_sections(&self) -> XsVector {
        [
            self.total_xs,
            self.elastic_xs,
            self.absorption_xs,
            self.fission_xs,
            self.nu_fission_xs,
        ]
    }
}

/// Energy grids of all nuclides
///
/// The grids are stored one after the other in a single arena of
/// `n_isotopes * n_gridpoints` points, each grid sorted by increasing energy.
/// The arena is never resized after construction, so indices into it stay
/// valid for the whole run.
#[derive(Clone, Debug)]
pub struct NuclideGrids {
    n_isotopes: usize,
    n_gridpoints: usize,
    points: Vec<NuclideGridPoint>,
}

impl NuclideGrids {
    /// Generates and sorts synthetic grids
    ///
    /// # Arguments
    /// * `n_isotopes` number of nuclides
    /// * `n_gridpoints` number of points per nuclide
    /// * `rng` stream the energies and cross sections are drawn from
    pub fn generate(
        n_isotopes: usize,
        n_gridpoints: usize,
        rng: &mut RandomStream,
    ) -> XsResult<Self> {
        let len = grid_len(n_isotopes, n_gridpoints)?;
        let mut points = utils::try_allocate(len, "nuclide energy grids")?;
        points.extend((0..len).map(|_| NuclideGridPoint::sample(rng)));

        let mut grids = NuclideGrids {
            n_isotopes,
            n_gridpoints,
            points,
        };
        grids.sort();
        Ok(grids)
    }

    /// Builds grids from explicit points, nuclide after nuclide
    pub fn from_points(
        n_isotopes: usize,
        n_gridpoints: usize,
        points: Vec<NuclideGridPoint>,
    ) -> XsResult<Self> {
        let len = grid_len(n_isotopes, n_gridpoints)?;
        if points.len() != len {
            return Err(XsBenchError::InvalidInput(format!(
                "expected {} grid points for {} nuclides, got {}",
                len,
                n_isotopes,
                points.len()
            )));
        }
        if let Some(point) = points.iter().find(|point| !point.energy.is_finite()) {
            return Err(XsBenchError::InvalidInput(format!(
                "grid point energy {} is not finite",
                point.energy
            )));
        }
        if let Some(point) = points
            .iter()
            .find(|point| !point.cross_sections().iter().all(|xs| xs.is_finite() && *xs >= 0.))
        {
            return Err(XsBenchError::InvalidInput(format!(
                "grid point at energy {} has invalid cross sections {:?}",
                point.energy,
                point.cross_sections()
            )));
        }

        let mut grids = NuclideGrids {
            n_isotopes,
            n_gridpoints,
            points,
        };
        grids.sort();
        Ok(grids)
    }

    /// Sorts the grid of every nuclide by increasing energy
    pub fn sort(&mut self) {
        for grid in self.points.chunks_exact_mut(self.n_gridpoints) {
            grid.sort_unstable_by(|a, b| a.energy.total_cmp(&b.energy));
        }
    }

    pub fn n_isotopes(&self) -> usize {
        self.n_isotopes
    }

    pub fn n_gridpoints(&self) -> usize {
        self.n_gridpoints
    }

    /// Total number of points over all nuclides
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sorted grid of one nuclide
    #[inline]
    pub fn grid(&self, nuclide: usize) -> &[NuclideGridPoint] {
        let start = nuclide * self.n_gridpoints;
        &self.points[start..start + self.n_gridpoints]
    }

    /// All points, nuclide after nuclide
    pub fn points(&self) -> &[NuclideGridPoint] {
        &self.points
    }

    pub fn is_sorted(&self) -> bool {
        self.points
            .chunks_exact(self.n_gridpoints)
            .all(|grid| grid.windows(2).all(|pair| pair[0].energy <= pair[1].energy))
    }
}

fn grid_len(n_isotopes: usize, n_gridpoints: usize) -> XsResult<usize> {
    if n_isotopes == 0 || n_gridpoints == 0 {
        return Err(XsBenchError::InvalidInput(format!(
            "grids need at least one nuclide and one point, got {} nuclides of {} points",
            n_isotopes, n_gridpoints
        )));
    }
    if n_gridpoints > u32::MAX as usize {
        return Err(XsBenchError::InvalidInput(format!(
            "{} points per nuclide cannot be indexed",
            n_gridpoints
        )));
    }
    n_isotopes.checked_mul(n_gridpoints).ok_or_else(|| {
        XsBenchError::InvalidInput(format!(
            "{} nuclides of {} points overflow the grid size",
            n_isotopes, n_gridpoints
        ))
    })
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_generated_grids_are_sorted() {
        let mut rng = RandomStream::new(42);
        let grids = NuclideGrids::generate(5, 200, &mut rng).unwrap();

        assert_eq!(grids.len(), 1000);
        assert_eq!(grids.grid(4).len(), 200);
        assert!(grids.is_sorted());
        for nuclide in 0..grids.n_isotopes() {
            for pair in grids.grid(nuclide).windows(2) {
                assert!(pair[0].energy < pair[1].energy);
            }
        }
    }

    #[test]
    fn test_generated_cross_sections_are_positive() {
        let mut rng = RandomStream::new(7);
        let grids = NuclideGrids::generate(3, 100, &mut rng).unwrap();

        for point in grids.points() {
            assert!((0.0..1.0).contains(&point.energy));
            for xs in point.cross_sections() {
                assert!(xs > 0. && xs <= 1.);
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let first = NuclideGrids::generate(4, 50, &mut RandomStream::new(11)).unwrap();
        let second = NuclideGrids::generate(4, 50, &mut RandomStream::new(11)).unwrap();
        let other = NuclideGrids::generate(4, 50, &mut RandomStream::new(12)).unwrap();

        assert_eq!(first.points(), second.points());
        assert_ne!(first.points(), other.points());
    }

    #[test]
    fn test_from_points_sorts_each_nuclide() {
        let points = vec![
            NuclideGridPoint::new(3., [1.; 5]),
            NuclideGridPoint::new(1., [2.; 5]),
            NuclideGridPoint::new(4., [3.; 5]),
            NuclideGridPoint::new(2., [4.; 5]),
        ];
        let grids = NuclideGrids::from_points(2, 2, points).unwrap();

        let energies: Vec<f64> = grids.points().iter().map(|p| p.energy).collect();
        assert_eq!(energies, vec![1., 3., 2., 4.]);
        assert_eq!(grids.grid(0)[0].total_xs, 2.);
        assert_eq!(grids.grid(1)[1].total_xs, 3.);
    }

    #[test]
    fn test_invalid_grids() {
        assert!(NuclideGrids::from_points(2, 2, vec![NuclideGridPoint::default(); 3]).is_err());
        assert!(NuclideGrids::from_points(0, 2, vec![]).is_err());
        assert!(NuclideGrids::generate(2, 0, &mut RandomStream::new(1)).is_err());
        assert!(NuclideGrids::from_points(
            1,
            1,
            vec![NuclideGridPoint::new(f64::NAN, [1.; 5])]
        )
        .is_err());
    }

    #[test]
    fn test_non_finite_or_negative_points() {
        let grid = |points: Vec<NuclideGridPoint>| NuclideGrids::from_points(1, 2, points);

        assert!(grid(vec![
            NuclideGridPoint::new(1., [1.; 5]),
            NuclideGridPoint::new(f64::INFINITY, [1.; 5]),
        ])
        .is_err());
        assert!(grid(vec![
            NuclideGridPoint::new(f64::NEG_INFINITY, [1.; 5]),
            NuclideGridPoint::new(1., [1.; 5]),
        ])
        .is_err());
        assert!(grid(vec![
            NuclideGridPoint::new(1., [-1.; 5]),
            NuclideGridPoint::new(2., [-2.; 5]),
        ])
        .is_err());
        assert!(grid(vec![
            NuclideGridPoint::new(1., [1., 1., f64::INFINITY, 1., 1.]),
            NuclideGridPoint::new(2., [1.; 5]),
        ])
        .is_err());
        assert!(grid(vec![
            NuclideGridPoint::new(1., [1., f64::NAN, 1., 1., 1.]),
            NuclideGridPoint::new(2., [1.; 5]),
        ])
        .is_err());

        // zero cross sections are handled by the interpolation fallback
        assert!(grid(vec![
            NuclideGridPoint::new(1., [0.; 5]),
            NuclideGridPoint::new(2., [1.; 5]),
        ])
        .is_ok());
    }
}
