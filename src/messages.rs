//! Message pool: the greetings a card can carry.
//!
//! One message is chosen uniformly at random per generation. The first entry
//! doubles as the placeholder shown before any generation and after a reset.

use crate::random::RandomSource;

pub static MESSAGES: [&str; 10] = [
    "May Allah accept your fasting and prayers",
    "Wishing you a blessed and peaceful Ramadan",
    "May this holy month bring you countless blessings",
    "Ramadan Mubarak to you and your family",
    "May your heart be filled with peace and joy",
    "Wishing you a month of blessings and forgiveness",
    "May Allah shower His blessings upon you",
    "May this Ramadan be the best one yet",
    "Sending you warm wishes for a blessed Ramadan",
    "May your prayers be answered this Ramadan",
];

pub fn all() -> &'static [&'static str] {
    &MESSAGES
}

pub fn first() -> &'static str {
    MESSAGES[0]
}

/// Pick a message uniformly at random.
pub fn pick(rng: &mut dyn RandomSource) -> &'static str {
    MESSAGES[rng.pick_index(MESSAGES.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{SequenceRandom, SystemRandom};
    use std::collections::HashSet;

    #[test]
    fn pick_follows_random_source() {
        let mut rng = SequenceRandom::new(vec![0.0, 0.35, 0.95]);
        assert_eq!(pick(&mut rng), MESSAGES[0]);
        assert_eq!(pick(&mut rng), MESSAGES[3]);
        assert_eq!(pick(&mut rng), MESSAGES[9]);
    }

    #[test]
    fn every_message_is_reachable() {
        let mut rng = SystemRandom::seeded(42);
        let seen: HashSet<&str> = (0..2_000).map(|_| pick(&mut rng)).collect();
        assert_eq!(seen.len(), MESSAGES.len());
    }

    #[test]
    fn scripted_sweep_hits_each_message() {
        let values: Vec<f64> = (0..MESSAGES.len())
            .map(|i| (i as f64 + 0.5) / MESSAGES.len() as f64)
            .collect();
        let mut rng = SequenceRandom::new(values);
        let picked: Vec<&str> = (0..MESSAGES.len()).map(|_| pick(&mut rng)).collect();
        assert_eq!(picked, MESSAGES.to_vec());
    }
}
