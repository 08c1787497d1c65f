//! Injectable randomness for rolls.

use crate::core::constants::DIE_FACES;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of die faces and probability draws.
pub trait FaceSource {
    /// A face in `1..=DIE_FACES`.
    fn roll_face(&mut self) -> u8;

    /// A uniform value in `[0, 1)`.
    fn roll_chance(&mut self) -> f64;
}

/// Adapts any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomFaces<R> {
    rng: R,
}

impl<R: Rng> RandomFaces<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomFaces<ChaCha8Rng> {
    /// Reproducible source for simulations and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> FaceSource for RandomFaces<R> {
    fn roll_face(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_FACES)
    }

    fn roll_chance(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays fixed sequences, cycling when exhausted.
///
/// An empty face script yields 1s; an empty chance script yields 1.0,
/// which never triggers a probability check.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFaces {
    faces: Vec<u8>,
    chances: Vec<f64>,
    face_pos: usize,
    chance_pos: usize,
}

impl ScriptedFaces {
    pub fn new(faces: Vec<u8>) -> Self {
        Self {
            faces,
            ..Default::default()
        }
    }

    pub fn with_chances(mut self, chances: Vec<f64>) -> Self {
        self.chances = chances;
        self
    }

    /// Faces handed out so far.
    pub fn faces_drawn(&self) -> usize {
        self.face_pos
    }
}

impl FaceSource for ScriptedFaces {
    fn roll_face(&mut self) -> u8 {
        if self.faces.is_empty() {
            return 1;
        }
        let face = self.faces[self.face_pos % self.faces.len()];
        self.face_pos += 1;
        face
    }

    fn roll_chance(&mut self) -> f64 {
        if self.chances.is_empty() {
            return 1.0;
        }
        let chance = self.chances[self.chance_pos % self.chances.len()];
        self.chance_pos += 1;
        chance
    }
}
