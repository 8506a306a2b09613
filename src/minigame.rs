//! Minigames: stakes, payouts and the offline outcome simulation used when
//! the backend cannot settle a play.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const STAKE_OPTIONS: [u64; 5] = [100, 500, 1000, 5000, 10000];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MinigameKind {
    Spin,
    TreasureHunt,
    CoinFlip,
}

impl MinigameKind {
    /// Path segment of the backend's `/game/{segment}` endpoint.
    pub fn endpoint(self) -> &'static str {
        match self {
            MinigameKind::Spin => "spin",
            MinigameKind::TreasureHunt => "treasure",
            MinigameKind::CoinFlip => "flip",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MinigameKind::Spin => "Lucky Spin",
            MinigameKind::TreasureHunt => "Treasure Hunt",
            MinigameKind::CoinFlip => "Coin Flip",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinSide {
    Heads,
    Tails,
}

/// A play the player has committed to; the stake is already known affordable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MinigamePlay {
    Spin { stake: u64 },
    TreasureHunt { stake: u64 },
    CoinFlip { stake: u64, guess: CoinSide },
}

impl MinigamePlay {
    pub fn kind(&self) -> MinigameKind {
        match self {
            MinigamePlay::Spin { .. } => MinigameKind::Spin,
            MinigamePlay::TreasureHunt { .. } => MinigameKind::TreasureHunt,
            MinigamePlay::CoinFlip { .. } => MinigameKind::CoinFlip,
        }
    }

    pub fn stake(&self) -> u64 {
        match *self {
            MinigamePlay::Spin { stake }
            | MinigamePlay::TreasureHunt { stake }
            | MinigamePlay::CoinFlip { stake, .. } => stake,
        }
    }

    pub fn choice(&self) -> Option<CoinSide> {
        match *self {
            MinigamePlay::CoinFlip { guess, .. } => Some(guess),
            _ => None,
        }
    }
}

/// Gross payout of a play. The stake is subtracted by the reducer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinigamePayout {
    pub coins: u64,
    #[serde(default)]
    pub ton_coins: u64,
}

impl MinigamePayout {
    pub fn coins(coins: u64) -> Self {
        Self { coins, ton_coins: 0 }
    }

    pub fn net(&self, stake: u64) -> i128 {
        i128::from(self.coins) - i128::from(stake)
    }
}

/// Wheel table, `roll` uniform in [0, 1).
pub fn spin_payout(stake: u64, roll: f64) -> MinigamePayout {
    if roll < 0.02 {
        MinigamePayout { coins: stake.saturating_mul(10), ton_coins: stake / 1000 }
    } else if roll < 0.1 {
        MinigamePayout::coins(stake.saturating_mul(5))
    } else if roll < 0.3 {
        MinigamePayout::coins(stake.saturating_mul(2))
    } else if roll < 0.5 {
        MinigamePayout::coins(stake.saturating_add(stake / 2))
    } else if roll < 0.7 {
        MinigamePayout::coins(stake)
    } else {
        MinigamePayout::default()
    }
}

/// 40% find chance; the tier rolls are drawn lazily (10x, then 5x, else 3x).
pub fn treasure_payout<F>(stake: u64, find_roll: f64, mut tier_roll: F) -> MinigamePayout
where
    F: FnMut() -> f64,
{
    if find_roll >= 0.4 {
        return MinigamePayout::default();
    }
    let multiplier = if tier_roll() < 0.1 {
        10
    } else if tier_roll() < 0.3 {
        5
    } else {
        3
    };
    MinigamePayout::coins(stake.saturating_mul(multiplier))
}

pub fn flip_payout(stake: u64, guess: CoinSide, landed: CoinSide) -> MinigamePayout {
    if guess == landed {
        MinigamePayout::coins(stake.saturating_mul(2))
    } else {
        MinigamePayout::default()
    }
}

fn roll<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..1.0)
}

/// Settles a play locally.
pub fn simulate<R: Rng + ?Sized>(play: MinigamePlay, rng: &mut R) -> MinigamePayout {
    match play {
        MinigamePlay::Spin { stake } => spin_payout(stake, roll(rng)),
        MinigamePlay::TreasureHunt { stake } => {
            let find = roll(rng);
            treasure_payout(stake, find, || roll(rng))
        }
        MinigamePlay::CoinFlip { stake, guess } => {
            let landed = if roll(rng) < 0.5 { CoinSide::Heads } else { CoinSide::Tails };
            flip_payout(stake, guess, landed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn spin_table_boundaries() {
        assert_eq!(spin_payout(1000, 0.0), MinigamePayout { coins: 10_000, ton_coins: 1 });
        assert_eq!(spin_payout(500, 0.01), MinigamePayout { coins: 5_000, ton_coins: 0 });
        assert_eq!(spin_payout(100, 0.02), MinigamePayout::coins(500));
        assert_eq!(spin_payout(100, 0.2), MinigamePayout::coins(200));
        assert_eq!(spin_payout(101, 0.4), MinigamePayout::coins(151));
        assert_eq!(spin_payout(100, 0.6), MinigamePayout::coins(100));
        assert_eq!(spin_payout(100, 0.7), MinigamePayout::default());
    }

    #[test]
    fn treasure_tiers_draw_lazily() {
        let mut draws = 0;
        let miss = treasure_payout(100, 0.5, || {
            draws += 1;
            0.0
        });
        assert_eq!((miss, draws), (MinigamePayout::default(), 0));

        assert_eq!(treasure_payout(100, 0.1, || 0.05), MinigamePayout::coins(1000));

        let mut rolls = [0.5, 0.2].into_iter();
        let five = treasure_payout(100, 0.1, || rolls.next().unwrap_or(1.0));
        assert_eq!(five, MinigamePayout::coins(500));

        assert_eq!(treasure_payout(100, 0.39, || 0.9), MinigamePayout::coins(300));
    }

    #[test]
    fn coin_flip_doubles_on_a_correct_guess() {
        assert_eq!(flip_payout(500, CoinSide::Heads, CoinSide::Heads).coins, 1000);
        assert_eq!(flip_payout(500, CoinSide::Heads, CoinSide::Tails).coins, 0);
    }

    #[test]
    fn simulated_payouts_stay_on_the_table() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let flip = simulate(MinigamePlay::CoinFlip { stake: 100, guess: CoinSide::Tails }, &mut rng);
            assert!(flip.coins == 0 || flip.coins == 200);

            let spin = simulate(MinigamePlay::Spin { stake: 1000 }, &mut rng);
            assert!([0, 1000, 1500, 2000, 5000, 10_000].contains(&spin.coins));

            let hunt = simulate(MinigamePlay::TreasureHunt { stake: 100 }, &mut rng);
            assert!([0, 300, 500, 1000].contains(&hunt.coins));
            assert_eq!(hunt.ton_coins, 0);
        }
    }

    #[test]
    fn play_accessors() {
        let play = MinigamePlay::CoinFlip { stake: 500, guess: CoinSide::Heads };
        assert_eq!(play.kind(), MinigameKind::CoinFlip);
        assert_eq!(play.stake(), 500);
        assert_eq!(play.choice(), Some(CoinSide::Heads));
        assert_eq!(MinigameKind::TreasureHunt.endpoint(), "treasure");
        assert_eq!(MinigamePayout::coins(0).net(500), -500);
    }
}
