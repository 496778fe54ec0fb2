//! The arithmetic gate in front of the family settings panel: a small
//! addition problem an adult solves before the editor opens. A wrong
//! answer regenerates the problem.

use rand::rngs::StdRng;
use rand::Rng;

pub struct ParentGate {
    a: u32,
    b: u32,
    rng: StdRng,
}

impl ParentGate {
    pub fn new(mut rng: StdRng) -> Self {
        let (a, b) = Self::problem_from(&mut rng);
        Self { a, b, rng }
    }

    /// The two addends to show ("3 + 5 = ?").
    pub fn problem(&self) -> (u32, u32) {
        (self.a, self.b)
    }

    /// Checks the answer. On failure a new problem is generated, so the
    /// same sum cannot be brute-forced by repetition.
    pub fn verify(&mut self, answer: u32) -> bool {
        if answer == self.a + self.b {
            true
        } else {
            let (a, b) = Self::problem_from(&mut self.rng);
            self.a = a;
            self.b = b;
            false
        }
    }

    fn problem_from(rng: &mut StdRng) -> (u32, u32) {
        (rng.gen_range(1..=10), rng.gen_range(1..=10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn correct_sum_opens_the_gate() {
        let mut gate = ParentGate::new(StdRng::seed_from_u64(1));
        let (a, b) = gate.problem();
        assert!((1..=10).contains(&a) && (1..=10).contains(&b));
        assert!(gate.verify(a + b));
    }

    #[test]
    fn wrong_answer_regenerates_the_problem() {
        let mut gate = ParentGate::new(StdRng::seed_from_u64(1));
        let (a, b) = gate.problem();
        assert!(!gate.verify(a + b + 1));
        // The new problem is still solvable.
        let (a, b) = gate.problem();
        assert!(gate.verify(a + b));
    }
}
