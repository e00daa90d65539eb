//! Opponent move selection

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::moves::Move;

/// Picks the computer's final move when deliberation ends
pub trait OpponentStrategy: Send + 'static {
    fn choose(&mut self) -> Move;
}

/// Uniform draw over the move set, independent of the player's move
pub struct RandomOpponent {
    rng: ChaCha8Rng,
}

impl RandomOpponent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }
}

impl OpponentStrategy for RandomOpponent {
    fn choose(&mut self) -> Move {
        Move::ALL[self.rng.gen_range(0..Move::ALL.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RandomOpponent::new(7);
        let mut b = RandomOpponent::new(7);
        let left: Vec<Move> = (0..32).map(|_| a.choose()).collect();
        let right: Vec<Move> = (0..32).map(|_| b.choose()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn draws_cover_move_set_evenly() {
        let mut opponent = RandomOpponent::new(0x5eed);
        let mut counts = [0u32; 3];
        for _ in 0..3000 {
            let mv = opponent.choose();
            let idx = Move::ALL.iter().position(|m| *m == mv).unwrap();
            counts[idx] += 1;
        }
        for count in counts {
            assert!((800..1200).contains(&count), "skewed draw: {counts:?}");
        }
    }
}
