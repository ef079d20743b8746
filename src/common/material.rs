use crate::common::error::{XsBenchError, XsResult};
use crate::common::rng::RandomStream;

use std::ops::Index;

/// Number of materials of the reactor model
pub const NUM_MATERIALS: usize = 12;

/// Number of nuclides below which the reactor model cannot be built
pub const MIN_ISOTOPES: usize = 68;

/// Volume fraction of every material of the reactor model
pub const VOLUME_FRACTIONS: [f64; NUM_MATERIALS] = [
    0.140, // fuel
    0.052, // cladding
    0.275, // cold, borated water
    0.134, // hot, borated water
    0.154, // reactor pressure vessel
    0.064, // lower, radial reflector
    0.066, // upper reflector, top plate
    0.055, // bottom plate
    0.008, // bottom nozzle
    0.015, // top nozzle
    0.025, // top of fuel assemblies
    0.013, // bottom of fuel assemblies
];

const MATERIAL_NAMES: [&str; NUM_MATERIALS] = [
    "fuel",
    "cladding",
    "cold borated water",
    "hot borated water",
    "reactor pressure vessel",
    "lower radial reflector",
    "top reflector",
    "bottom plate",
    "bottom nozzle",
    "top nozzle",
    "top of fuel assemblies",
    "bottom of fuel assemblies",
];

// fuel nuclides of the small problem, the large one appends 68..n_isotopes
const FUEL: [usize; 34] = [
    58, 59, 60, 61, 40, 42, 43, 44, 45, 46, 1, 2, 3, 7, 8, 9, 10, 29, 57, 47, 48, 0, 62, 15, 33,
    34, 52, 53, 54, 55, 56, 18, 23, 41,
];
const CLADDING: [usize; 5] = [63, 64, 65, 66, 67];
const BORATED_WATER: [usize; 4] = [24, 41, 4, 5];
const PRESSURE_VESSEL: [usize; 27] = [
    19, 20, 21, 22, 35, 36, 37, 38, 39, 25, 27, 28, 29, 30, 31, 32, 26, 49, 50, 51, 11, 12, 13,
    14, 6, 16, 17,
];
const REFLECTOR: [usize; 21] = [
    24, 41, 4, 5, 19, 20, 21, 22, 35, 36, 37, 38, 39, 25, 49, 50, 51, 11, 12, 13, 14,
];
const ASSEMBLY_END: [usize; 9] = [24, 41, 4, 5, 63, 64, 65, 66, 67];

/// Material
///
/// Only built by a `MaterialTable`, which keeps one concentration per
/// nuclide and every nuclide index within the table.
///
/// # Attributes
/// * `name` name of the material
/// * `volume_fraction` share of the reactor volume filled with the material
/// * `nuclides` indices of the nuclides of the material
/// * `concentrations` concentrations of the nuclides in the material
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    name: String,
    volume_fraction: f64,
    nuclides: Vec<usize>,
    concentrations: Vec<f64>,
}

impl Material {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn volume_fraction(&self) -> f64 {
        self.volume_fraction
    }

    pub fn nuclides(&self) -> &[usize] {
        &self.nuclides
    }

    pub fn concentrations(&self) -> &[f64] {
        &self.concentrations
    }

    pub fn num_nuclides(&self) -> usize {
        self.nuclides.len()
    }

    /// Iterates on (nuclide index, concentration) pairs
    #[inline]
    pub fn composition(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.nuclides
            .iter()
            .copied()
            .zip(self.concentrations.iter().copied())
    }
}

/// Material composition table, static for the whole run
#[derive(Clone, Debug)]
pub struct MaterialTable {
    n_isotopes: usize,
    materials: Vec<Material>,
}

impl MaterialTable {
    /// Builds the twelve materials of the reactor model
    ///
    /// # Arguments
    /// * `n_isotopes` number of nuclides of the problem, at least `MIN_ISOTOPES`
    /// * `rng` stream the concentrations are drawn from
    pub fn canonical(n_isotopes: usize, rng: &mut RandomStream) -> XsResult<Self> {
        if n_isotopes < MIN_ISOTOPES {
            return Err(XsBenchError::InvalidInput(format!(
                "the reactor model needs at least {} nuclides, got {}",
                MIN_ISOTOPES, n_isotopes
            )));
        }

        let fuel: Vec<usize> = FUEL.iter().copied().chain(MIN_ISOTOPES..n_isotopes).collect();
        let nuclide_lists: [&[usize]; NUM_MATERIALS] = [
            &fuel,
            &CLADDING,
            &BORATED_WATER,
            &BORATED_WATER,
            &PRESSURE_VESSEL,
            &REFLECTOR,
            &REFLECTOR,
            &REFLECTOR,
            &REFLECTOR,
            &REFLECTOR,
            &ASSEMBLY_END,
            &ASSEMBLY_END,
        ];

        let materials = nuclide_lists
            .iter()
            .enumerate()
            .map(|(i, nuclides)| Material {
                name: MATERIAL_NAMES[i].to_string(),
                volume_fraction: VOLUME_FRACTIONS[i],
                nuclides: nuclides.to_vec(),
                concentrations: nuclides.iter().map(|_| 1. - rng.draw()).collect(),
            })
            .collect();

        Ok(MaterialTable {
            n_isotopes,
            materials,
        })
    }

    /// Builds a table from explicit compositions, all materials sharing the
    /// same volume fraction
    ///
    /// # Arguments
    /// * `n_isotopes` number of nuclides of the problem
    /// * `compositions` (nuclide index, concentration) pairs of every material
    pub fn from_compositions(
        n_isotopes: usize,
        compositions: Vec<Vec<(usize, f64)>>,
    ) -> XsResult<Self> {
        let volume_fraction = 1. / compositions.len().max(1) as f64;
        let mut materials = Vec::with_capacity(compositions.len());

        for (i, composition) in compositions.into_iter().enumerate() {
            if let Some((nuclide, _)) = composition.iter().find(|(n, _)| *n >= n_isotopes) {
                return Err(XsBenchError::InvalidInput(format!(
                    "material {} refers to nuclide {} out of {}",
                    i, nuclide, n_isotopes
                )));
            }
            if let Some((_, concentration)) =
                composition.iter().find(|(_, c)| !(c.is_finite() && *c >= 0.))
            {
                return Err(XsBenchError::InvalidInput(format!(
                    "material {} has invalid concentration {}",
                    i, concentration
                )));
            }
            let (nuclides, concentrations) = composition.into_iter().unzip();
            materials.push(Material {
                name: format!("material {}", i),
                volume_fraction,
                nuclides,
                concentrations,
            });
        }

        Ok(MaterialTable {
            n_isotopes,
            materials,
        })
    }

    pub fn n_isotopes(&self) -> usize {
        self.n_isotopes
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn get(&self, material_id: usize) -> Option<&Material> {
        self.materials.get(material_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Material> {
        self.materials.iter()
    }

    /// Returns the (nuclide index, concentration) pairs of a material
    pub fn composition_of(
        &self,
        material_id: usize,
    ) -> Option<impl Iterator<Item = (usize, f64)> + '_> {
        self.get(material_id).map(Material::composition)
    }
}

impl Index<usize> for MaterialTable {
    type Output = Material;

    fn index(&self, material_id: usize) -> &Material {
        &self.materials[material_id]
    }
}
