//! Actions and the state transition table.
//!
//! [`PlayerState::apply`] is pure: the clock is injected, every counter is
//! checked, and a failing action yields an error instead of a partial state.
//! The [`Reducible`] impl is the fail-safe wrapper the UI store uses: errors
//! are logged and the previous state is kept.

use serde::Deserialize;
use serde_json::Value;
use std::rc::Rc;
use yew::Reducible;

use crate::error::{GameError, Result};
use crate::minigame::{MinigameKind, MinigamePayout};
use crate::model::{
    BOOST_MULTIPLIER, BoostKind, BoostOffer, ENERGY_RESTORE_AMOUNT, Identity, PlayerState, REFERRAL_BONUS,
    Referral, TASK_COIN_COLLECTOR, TASK_DAILY_ENERGY, TASK_DAILY_TAPS, TASK_LEVEL_CHAMPION,
    coins_per_tap_for_level, max_energy_for_level, xp_to_next_for_level,
};
use crate::util::{generate_referral_code, now_ms};

#[derive(Clone, Debug, PartialEq)]
pub enum GameAction {
    Initialize { is_initialized: bool, telegram_available: bool },
    Tap,
    CompleteTask { task_id: String },
    AddReferral { referral: Referral },
    LevelUp,
    RestoreEnergy,
    /// Foreign snapshot (storage or backend), merged over the current state.
    LoadGame { snapshot: Value },
    MinigameResult { game: MinigameKind, stake: u64, result: MinigamePayout },
    InitIdentity { identity: Identity },
    ActivateBoost { kind: BoostKind, cost: u64, duration_ms: i64 },
    SweepExpiredBoosts,
}

impl GameAction {
    pub fn name(&self) -> &'static str {
        match self {
            GameAction::Initialize { .. } => "initialize",
            GameAction::Tap => "tap",
            GameAction::CompleteTask { .. } => "complete_task",
            GameAction::AddReferral { .. } => "add_referral",
            GameAction::LevelUp => "level_up",
            GameAction::RestoreEnergy => "restore_energy",
            GameAction::LoadGame { .. } => "load_game",
            GameAction::MinigameResult { .. } => "minigame_result",
            GameAction::InitIdentity { .. } => "init_identity",
            GameAction::ActivateBoost { .. } => "activate_boost",
            GameAction::SweepExpiredBoosts => "sweep_expired_boosts",
        }
    }

    /// ActivateBoost priced and timed from the shop catalog.
    pub fn purchase_boost(kind: BoostKind) -> Option<GameAction> {
        BoostOffer::for_kind(kind).map(|offer| GameAction::ActivateBoost {
            kind,
            cost: offer.cost,
            duration_ms: offer.duration_ms,
        })
    }
}

fn add_u64(a: u64, b: u64, field: &'static str) -> Result<u64> {
    a.checked_add(b).ok_or(GameError::Overflow { field })
}

impl PlayerState {
    /// Computes the state following `action` at wall-clock time `now` (epoch ms).
    pub fn apply(&self, action: GameAction, now: i64) -> Result<PlayerState> {
        let mut next = self.clone();
        match action {
            GameAction::Initialize { is_initialized, telegram_available } => {
                next.is_initialized = is_initialized;
                next.telegram_web_app_available = telegram_available;
            }
            GameAction::Tap => {
                if self.energy == 0 {
                    return Ok(next);
                }
                let tap_mult = u64::from(self.boosts.tap_power.effective_multiplier(now));
                let xp_mult = u64::from(self.boosts.xp.effective_multiplier(now));
                let coins_earned = self
                    .coins_per_tap
                    .checked_mul(tap_mult)
                    .ok_or(GameError::Overflow { field: "coins" })?;

                next.coins = add_u64(self.coins, coins_earned, "coins")?;
                next.experience = add_u64(self.experience, xp_mult, "experience")?;
                next.taps_count = add_u64(self.taps_count, 1, "tapsCount")?;
                next.energy = self.energy - 1;
                next.total_earnings = add_u64(self.total_earnings, coins_earned, "totalEarnings")?;

                let energy_used = u64::from(next.max_energy.saturating_sub(next.energy));
                let coins = next.coins;
                for task in next.tasks.iter_mut().filter(|t| !t.completed) {
                    match task.id.as_str() {
                        TASK_DAILY_TAPS => {
                            let taps = task.progress.unwrap_or(0).saturating_add(1);
                            task.record_progress(taps, 100);
                        }
                        TASK_DAILY_ENERGY => task.record_progress(energy_used, 1000),
                        TASK_COIN_COLLECTOR => task.record_progress(coins, 10_000),
                        _ => {}
                    }
                }
            }
            GameAction::CompleteTask { task_id } => {
                let Some(task) = next.tasks.iter_mut().find(|t| t.id == task_id) else {
                    return Ok(next);
                };
                if task.completed {
                    return Ok(next);
                }
                task.completed = true;
                let reward = task.reward;
                next.coins = add_u64(self.coins, reward, "coins")?;
                next.total_earnings = add_u64(self.total_earnings, reward, "totalEarnings")?;
                tracing::info!(task = %task_id, reward, "task completed");
            }
            GameAction::AddReferral { referral } => {
                next.coins = add_u64(self.coins, REFERRAL_BONUS, "coins")?;
                next.total_earnings = add_u64(self.total_earnings, REFERRAL_BONUS, "totalEarnings")?;
                next.referrals.push(referral);
            }
            GameAction::LevelUp => {
                let level = self.level.checked_add(1).ok_or(GameError::Overflow { field: "level" })?;
                next.level = level;
                next.max_energy = max_energy_for_level(level);
                next.coins_per_tap = coins_per_tap_for_level(level);
                next.experience = 0;
                next.experience_to_next = xp_to_next_for_level(level);
                next.energy = next.max_energy;
                for task in next.tasks.iter_mut().filter(|t| !t.completed) {
                    if task.id == TASK_LEVEL_CHAMPION {
                        task.record_progress(u64::from(level), 5);
                    }
                }
                tracing::info!(level, "level up");
            }
            GameAction::RestoreEnergy => {
                next.energy = self
                    .energy
                    .saturating_add(ENERGY_RESTORE_AMOUNT)
                    .min(self.max_energy);
            }
            GameAction::LoadGame { snapshot } => {
                next = self.merge_snapshot(snapshot)?;
            }
            GameAction::MinigameResult { game, stake, result } => {
                let gross = add_u64(self.coins, result.coins, "coins")?;
                next.coins = gross.checked_sub(stake).ok_or(GameError::InsufficientCoins {
                    needed: stake,
                    available: gross,
                })?;
                next.ton_coins = add_u64(self.ton_coins, result.ton_coins, "tonCoins")?;
                let gain = result.coins.saturating_sub(stake);
                next.total_earnings = add_u64(self.total_earnings, gain, "totalEarnings")?;
                tracing::debug!(game = ?game, stake, payout = result.coins, "minigame settled");
            }
            GameAction::InitIdentity { identity } => {
                if let Some(id) = identity.user_id {
                    next.referral_code = id.to_string();
                }
                next.user_id = identity.user_id;
                next.username = identity.username;
                next.first_name = identity.first_name;
                next.last_name = identity.last_name;
            }
            GameAction::ActivateBoost { kind, cost, duration_ms } => {
                if self.coins < cost {
                    return Ok(next);
                }
                let expiry = now
                    .checked_add(duration_ms)
                    .ok_or(GameError::Overflow { field: "boostExpiry" })?;
                next.coins = self.coins - cost;
                let slot = next.boosts.slot_mut(kind);
                slot.multiplier = BOOST_MULTIPLIER;
                slot.expiry = expiry;
                tracing::info!(boost = %kind, cost, expiry, "boost activated");
            }
            GameAction::SweepExpiredBoosts => next.boosts.sweep(now),
        }
        Ok(next)
    }

    /// Shallow merge of a foreign snapshot. Keys whose values do not decode
    /// into the matching field are skipped; unknown keys are ignored.
    fn merge_snapshot(&self, snapshot: Value) -> Result<PlayerState> {
        let Value::Object(fields) = snapshot else {
            return Err(GameError::SnapshotNotObject);
        };
        let mut base = serde_json::to_value(self)?;
        let mut merged = self.clone();
        for (key, value) in fields {
            let Some(map) = base.as_object_mut() else {
                return Err(GameError::Snapshot("state did not encode as an object".into()));
            };
            let previous = map.insert(key.clone(), value);
            match PlayerState::deserialize(&base) {
                Ok(candidate) => merged = candidate,
                Err(err) => {
                    tracing::debug!(field = %key, error = %err, "skipping snapshot field");
                    if let Some(map) = base.as_object_mut() {
                        match previous {
                            Some(old) => map.insert(key, old),
                            None => map.remove(&key),
                        };
                    }
                }
            }
        }

        if merged.referral_code.trim().is_empty() {
            merged.referral_code = if self.referral_code.trim().is_empty() {
                generate_referral_code(&mut rand::thread_rng())
            } else {
                self.referral_code.clone()
            };
        }
        if merged.user_id.is_none() {
            merged.user_id = self.user_id;
        }
        merged.is_initialized = true;
        Ok(merged)
    }
}

impl Reducible for PlayerState {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let name = action.name();
        match self.apply(action, now_ms()) {
            Ok(next) if next == *self => self,
            Ok(next) => Rc::new(next),
            Err(err) => {
                tracing::warn!(action = name, error = %err, "action rejected, keeping previous state");
                self
            }
        }
    }
}
