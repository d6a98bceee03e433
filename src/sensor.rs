//! Pretend ground sensor: what the rover finds where it stands. Dust is
//! everywhere, ice turns up now and then, water is rare.
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sample {
    Water,
    Ice,
    Dust,
}

/// Probability of each reading, in the same order as [`Sample`].
pub const SAMPLE_WEIGHTS: [(Sample, f64); 3] =
    [(Sample::Water, 0.1), (Sample::Ice, 0.2), (Sample::Dust, 0.7)];

impl Sample {
    pub fn name(&self) -> &'static str {
        match self {
            Sample::Water => "water",
            Sample::Ice => "ice",
            Sample::Dust => "dust",
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Draws one reading from `rng`.
pub fn sample_with<R: Rng + ?Sized>(rng: &mut R) -> Sample {
    let weights = WeightedIndex::new(SAMPLE_WEIGHTS.iter().map(|(_, w)| *w))
        .expect("sample weights are positive constants");
    SAMPLE_WEIGHTS[weights.sample(rng)].0
}

pub fn sample() -> Sample {
    sample_with(&mut rand::thread_rng())
}
