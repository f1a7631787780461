use rand::{seq::index::sample, Rng};
use ringbuffer::{ConstGenericRingBuffer, RingBuffer};

use super::Experience;

pub type MemoryIndices = Vec<usize>;

/// Samples `size` distinct indexes below `len`, fewer if `len` is smaller
pub fn sample_indices<R: Rng>(rng: &mut R, len: usize, size: usize) -> MemoryIndices {
    sample(rng, len, size.min(len)).into_vec()
}

/// Bounded FIFO of experience, the oldest entry is overwritten once `CAP` is reached
pub struct ReplayMemory<const CAP: usize> {
    experiences: ConstGenericRingBuffer<Experience, CAP>,
}

impl<const CAP: usize> Default for ReplayMemory<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> ReplayMemory<CAP> {
    pub fn new() -> Self {
        Self {
            experiences: ConstGenericRingBuffer::new(),
        }
    }

    pub fn push(&mut self, experience: Experience) {
        self.experiences.push(experience);
    }

    /// A uniform random batch without replacement
    pub fn sample<R: Rng>(&self, rng: &mut R, size: usize) -> Vec<&Experience> {
        sample_indices(rng, self.experiences.len(), size)
            .into_iter()
            .filter_map(|index| self.experiences.get(index))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.experiences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiences.is_empty()
    }
}
