use crate::common::nuclide_grid::NuclideGridPoint;
use crate::common::utils;

/// Number of cross sections carried by every grid point and lookup result
pub const NUM_INTERACTIONS: usize = 5;

/// Cross sections of one lookup, indexed by `Interaction::index`
pub type XsVector = [f64; NUM_INTERACTIONS];

/// Interaction type
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Interaction {
    Total,
    ElasticScattering,
    Absorption,
    Fission,
    NuFission,
}

impl Interaction {
    pub const ALL: [Interaction; NUM_INTERACTIONS] = [
        Interaction::Total,
        Interaction::ElasticScattering,
        Interaction::Absorption,
        Interaction::Fission,
        Interaction::NuFission,
    ];

    /// Position of the interaction in a `XsVector`
    pub fn index(self) -> usize {
        match self {
            Interaction::Total => 0,
            Interaction::ElasticScattering => 1,
            Interaction::Absorption => 2,
            Interaction::Fission => 3,
            Interaction::NuFission => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Interaction::Total => "total",
            Interaction::ElasticScattering => "elastic",
            Interaction::Absorption => "absorption",
            Interaction::Fission => "fission",
            Interaction::NuFission => "nu-fission",
        }
    }
}

/// Microscopic cross sections of a nuclide at a given energy
///
/// Log-log interpolation between the two grid points bounding the energy.
/// Energies outside of the bracket take the value of the nearest point, and
/// brackets that cannot be log-transformed fall back to the nearest point too.
///
/// # Arguments
/// * `energy` energy at which the cross sections are evaluated
/// * `low` grid point below the energy
/// * `high` grid point above the energy
///
/// # Returns
/// * `micro_xs` total, elastic, absorption, fission and nu-fission cross sections
#[inline]
pub fn calculate_micro_xs(
    energy: f64,
    low: &NuclideGridPoint,
    high: &NuclideGridPoint,
) -> XsVector {
    let low_xs = low.cross_sections();
    let high_xs = high.cross_sections();

    match utils::get_log_fraction(energy, low.energy, high.energy) {
        Some(fraction) => {
            let mut micro_xs = [0.; NUM_INTERACTIONS];
            for (xs, (low_xs, high_xs)) in micro_xs.iter_mut().zip(low_xs.into_iter().zip(high_xs)) {
                *xs = utils::get_log_interpolated_value(fraction, low_xs, high_xs);
            }
            micro_xs
        }
        None => {
            if (energy - low.energy).abs() <= (high.energy - energy).abs() {
                low_xs
            } else {
                high_xs
            }
        }
    }
}
