use crate::common::error::{XsBenchError, XsResult};
use crate::common::material::{Material, MaterialTable};

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::{RngCore, SeedableRng};

const MULTIPLIER: u64 = 2806196910506780709;
const INCREMENT: u64 = 1;
// modulus is 2^63
const STATE_MASK: u64 = (1 << 63) - 1;
const DOUBLE_SCALE: f64 = 1. / (1u64 << 53) as f64;

/// Random stream
///
/// Linear congruential generator with a 63-bit state. Every worker thread
/// owns its own stream, nothing is shared during the lookups.
///
/// # Attributes
/// * `state` current seed, updated on every draw
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomStream {
    state: u64,
}

impl RandomStream {
    pub fn new(seed: u64) -> Self {
        RandomStream {
            state: seed & STATE_MASK,
        }
    }

    /// Stream of worker `thread`, distinct for every thread and reproducible
    pub fn for_thread(thread: usize) -> Self {
        RandomStream::new((thread as u64 + 1) * 19 + 17)
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    #[inline]
    fn step(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT)
            & STATE_MASK;
        self.state
    }

    /// Draws a number uniformly in [0, 1)
    #[inline]
    pub fn draw(&mut self) -> f64 {
        // the 53 high bits of the state fill the mantissa
        (self.step() >> 10) as f64 * DOUBLE_SCALE
    }
}

impl RngCore for RandomStream {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 31) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let high = self.next_u32() as u64;
        let low = self.next_u32() as u64;
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for RandomStream {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        RandomStream::new(u64::from_le_bytes(seed))
    }
}

/// Samples the material a particle is in, weighted by the volume fraction
/// of every material of the table
pub struct MaterialSampler {
    distribution: WeightedIndex<f64>,
}

impl MaterialSampler {
    pub fn new(materials: &MaterialTable) -> XsResult<Self> {
        let weights: Vec<f64> = materials
            .iter()
            .map(Material::volume_fraction)
            .collect();
        MaterialSampler::from_weights(&weights)
    }

    pub fn from_weights(weights: &[f64]) -> XsResult<Self> {
        let distribution = WeightedIndex::new(weights).map_err(|error| {
            XsBenchError::InvalidInput(format!("material weights {:?}: {}", weights, error))
        })?;
        Ok(MaterialSampler { distribution })
    }

    #[inline]
    pub fn sample(&self, rng: &mut RandomStream) -> usize {
        self.distribution.sample(rng)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::common::material::{MaterialTable, VOLUME_FRACTIONS};

    #[test]
    fn test_draw_range() {
        let mut rng = RandomStream::new(42);
        for _ in 0..100_000 {
            let xsi = rng.draw();
            assert!((0.0..1.0).contains(&xsi));
        }
    }

    #[test]
    fn test_draw_mean() {
        let mut rng = RandomStream::for_thread(0);
        let n = 200_000;
        let mean = (0..n).map(|_| rng.draw()).sum::<f64>() / n as f64;
        assert!((mean - 0.5).abs() < 0.01, "mean {}", mean);
    }

    #[test]
    fn test_streams_are_reproducible() {
        let mut first = RandomStream::for_thread(3);
        let mut second = RandomStream::for_thread(3);
        for _ in 0..1000 {
            assert_eq!(first.draw(), second.draw());
        }
        assert_eq!(first, second);
    }

    #[test]
    fn test_thread_streams_differ() {
        let mut first = RandomStream::for_thread(0);
        let mut second = RandomStream::for_thread(1);
        let first_draws: Vec<f64> = (0..10).map(|_| first.draw()).collect();
        let second_draws: Vec<f64> = (0..10).map(|_| second.draw()).collect();
        assert_ne!(first_draws, second_draws);
    }

    #[test]
    fn test_seed_from_u64_is_deterministic() {
        let mut first = RandomStream::seed_from_u64(7);
        let mut second = RandomStream::seed_from_u64(7);
        assert_eq!(first.next_u64(), second.next_u64());

        let mut bytes = [0u8; 7];
        first.fill_bytes(&mut bytes);
        let mut other_bytes = [0u8; 7];
        second.fill_bytes(&mut other_bytes);
        assert_eq!(bytes, other_bytes);
    }

    #[test]
    fn test_material_sampler_frequencies() {
        let sampler = MaterialSampler::from_weights(&VOLUME_FRACTIONS).unwrap();
        let mut rng = RandomStream::new(1234);
        let n = 200_000;
        let mut counts = [0usize; VOLUME_FRACTIONS.len()];
        for _ in 0..n {
            counts[sampler.sample(&mut rng)] += 1;
        }
        let norm: f64 = VOLUME_FRACTIONS.iter().sum();
        for (count, fraction) in counts.iter().zip(VOLUME_FRACTIONS.iter()) {
            let frequency = *count as f64 / n as f64;
            assert!((frequency - fraction / norm).abs() < 0.01);
        }
    }

    #[test]
    fn test_material_sampler_from_table() {
        let materials =
            MaterialTable::from_compositions(2, vec![vec![(0, 1.)], vec![(1, 1.)]]).unwrap();
        let sampler = MaterialSampler::new(&materials).unwrap();
        let mut rng = RandomStream::new(5);
        for _ in 0..1000 {
            assert!(sampler.sample(&mut rng) < 2);
        }
    }

    #[test]
    fn test_material_sampler_rejects_empty_weights() {
        assert!(MaterialSampler::from_weights(&[]).is_err());
        assert!(MaterialSampler::from_weights(&[0., 0.]).is_err());
    }
}
