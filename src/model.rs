//! Core data model for the tap game.
//! `PlayerState` is the single aggregate; it only changes through the reducer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GameError;
use crate::util::generate_referral_code;

// ---------------- Economy -----------------
pub const BASE_MAX_ENERGY: u32 = 1000;
pub const MAX_ENERGY_PER_LEVEL: u32 = 100;
pub const XP_PER_LEVEL: u64 = 1000;
pub const ENERGY_RESTORE_AMOUNT: u32 = 50;
pub const REFERRAL_BONUS: u64 = 1000;
pub const BOOST_MULTIPLIER: u32 = 2;
pub const REFERRAL_LINK_BASE: &str = "https://t.me/kezeBot?start=";
pub const SOCIAL_CHANNEL_URL: &str = "https://t.me/kezeChannel";

// Catalog ids the reducer tracks progress for.
pub const TASK_DAILY_TAPS: &str = "daily-tap-100";
pub const TASK_DAILY_ENERGY: &str = "daily-energy";
pub const TASK_SOCIAL_FOLLOW: &str = "social-follow";
pub const TASK_LEVEL_CHAMPION: &str = "achievement-level-5";
pub const TASK_COIN_COLLECTOR: &str = "achievement-10k";

pub fn max_energy_for_level(level: u32) -> u32 {
    BASE_MAX_ENERGY.saturating_add(level.saturating_sub(1).saturating_mul(MAX_ENERGY_PER_LEVEL))
}

pub fn coins_per_tap_for_level(level: u32) -> u64 {
    u64::from(level / 3) + 1
}

pub fn xp_to_next_for_level(level: u32) -> u64 {
    u64::from(level) * XP_PER_LEVEL
}

// ---------------- Tasks -----------------
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Daily,
    Social,
    Achievement,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub reward: u64,
    /// One-way false -> true.
    pub completed: bool,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u64>,
}

impl Task {
    fn catalog(
        id: &str,
        title: &str,
        description: &str,
        reward: u64,
        kind: TaskKind,
        requirement: Option<u64>,
        progress: Option<u64>,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            reward,
            completed: false,
            kind,
            requirement,
            progress,
        }
    }

    /// Sets progress clamped to the requirement (or `fallback` when the task
    /// carries none) and completes the task once the target is met.
    pub fn record_progress(&mut self, value: u64, fallback: u64) {
        let target = self.requirement.unwrap_or(fallback);
        let progress = value.min(target);
        self.progress = Some(progress);
        self.completed = progress >= target;
    }

    pub fn is_claimable(&self) -> bool {
        if self.completed {
            return false;
        }
        match (self.kind, self.requirement) {
            (TaskKind::Social, _) | (_, None) => true,
            (_, Some(req)) => self.progress.unwrap_or(0) >= req,
        }
    }
}

pub fn default_tasks() -> Vec<Task> {
    vec![
        Task::catalog(
            TASK_DAILY_TAPS,
            "Daily Tapper",
            "Tap 100 times today",
            500,
            TaskKind::Daily,
            Some(100),
            Some(0),
        ),
        Task::catalog(
            TASK_DAILY_ENERGY,
            "Energy Saver",
            "Use all your energy today",
            300,
            TaskKind::Daily,
            Some(1000),
            Some(0),
        ),
        Task::catalog(
            TASK_SOCIAL_FOLLOW,
            "Follow Us",
            "Follow our Telegram channel",
            1000,
            TaskKind::Social,
            None,
            None,
        ),
        Task::catalog(
            TASK_LEVEL_CHAMPION,
            "Level Up Champion",
            "Reach level 5",
            2500,
            TaskKind::Achievement,
            Some(5),
            Some(1),
        ),
        Task::catalog(
            TASK_COIN_COLLECTOR,
            "Coin Collector",
            "Earn 10,000 Keze coins",
            5000,
            TaskKind::Achievement,
            Some(10_000),
            Some(0),
        ),
    ]
}

// ---------------- Referrals -----------------
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    pub id: String,
    pub username: String,
    pub earnings: u64,
    pub joined_at: DateTime<Utc>,
}

// ---------------- Boosts -----------------
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoostKind {
    TapPower,
    Energy,
    Xp,
    Level,
}

impl BoostKind {
    pub const ALL: [BoostKind; 4] = [BoostKind::TapPower, BoostKind::Energy, BoostKind::Xp, BoostKind::Level];

    pub fn as_str(self) -> &'static str {
        match self {
            BoostKind::TapPower => "tapPower",
            BoostKind::Energy => "energy",
            BoostKind::Xp => "xp",
            BoostKind::Level => "level",
        }
    }
}

impl fmt::Display for BoostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoostKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoostKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| GameError::UnknownBoost(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostSlot {
    /// 1 = inactive, 2 = active.
    pub multiplier: u32,
    /// Epoch milliseconds; 0 or past means inactive.
    pub expiry: i64,
}

impl Default for BoostSlot {
    fn default() -> Self {
        Self { multiplier: 1, expiry: 0 }
    }
}

impl BoostSlot {
    pub fn is_active(&self, now: i64) -> bool {
        now < self.expiry
    }

    /// Multiplier consumers should apply at `now`, independent of the sweep.
    pub fn effective_multiplier(&self, now: i64) -> u32 {
        if self.is_active(now) { self.multiplier } else { 1 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boosts {
    pub tap_power: BoostSlot,
    pub energy: BoostSlot,
    pub xp: BoostSlot,
    pub level: BoostSlot,
}

impl Boosts {
    pub fn slot(&self, kind: BoostKind) -> &BoostSlot {
        match kind {
            BoostKind::TapPower => &self.tap_power,
            BoostKind::Energy => &self.energy,
            BoostKind::Xp => &self.xp,
            BoostKind::Level => &self.level,
        }
    }

    pub fn slot_mut(&mut self, kind: BoostKind) -> &mut BoostSlot {
        match kind {
            BoostKind::TapPower => &mut self.tap_power,
            BoostKind::Energy => &mut self.energy,
            BoostKind::Xp => &mut self.xp,
            BoostKind::Level => &mut self.level,
        }
    }

    /// Resets the multiplier of every expired slot. Expiry stays untouched.
    pub fn sweep(&mut self, now: i64) {
        for kind in BoostKind::ALL {
            let slot = self.slot_mut(kind);
            if now >= slot.expiry {
                slot.multiplier = 1;
            }
        }
    }
}

/// Purchasable boost as listed in the shop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoostOffer {
    pub kind: BoostKind,
    pub title: &'static str,
    pub description: &'static str,
    pub cost: u64,
    pub duration_ms: i64,
}

const MINUTE_MS: i64 = 60_000;

pub const BOOST_OFFERS: [BoostOffer; 4] = [
    BoostOffer {
        kind: BoostKind::TapPower,
        title: "2x Tap Power",
        description: "Double your coins per tap",
        cost: 1000,
        duration_ms: 30 * MINUTE_MS,
    },
    BoostOffer {
        kind: BoostKind::Energy,
        title: "2x Energy Regen",
        description: "Regenerate energy twice as fast",
        cost: 800,
        duration_ms: 60 * MINUTE_MS,
    },
    BoostOffer {
        kind: BoostKind::Xp,
        title: "2x Experience",
        description: "Gain double XP from all actions",
        cost: 1200,
        duration_ms: 45 * MINUTE_MS,
    },
    BoostOffer {
        kind: BoostKind::Level,
        title: "Level Boost",
        description: "Temporary level increase benefits",
        cost: 1500,
        duration_ms: 20 * MINUTE_MS,
    },
];

impl BoostOffer {
    pub fn for_kind(kind: BoostKind) -> Option<&'static BoostOffer> {
        BOOST_OFFERS.iter().find(|o| o.kind == kind)
    }
}

// ---------------- Identity -----------------
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Identity {
    /// Identity used when the page is not running inside Telegram.
    pub fn demo() -> Self {
        Self {
            user_id: Some(123_456_789),
            username: Some("webuser".into()),
            first_name: Some("Web".into()),
            last_name: Some("User".into()),
        }
    }
}

// ---------------- Player state -----------------
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub coins: u64,
    pub ton_coins: u64,
    /// Running total of positive net gains; never decreases.
    pub total_earnings: u64,
    pub level: u32,
    pub experience: u64,
    pub experience_to_next: u64,
    pub taps_count: u64,
    pub coins_per_tap: u64,
    pub energy: u32,
    pub max_energy: u32,
    pub boosts: Boosts,
    pub tasks: Vec<Task>,
    pub referrals: Vec<Referral>,
    pub referral_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub is_initialized: bool,
    pub telegram_web_app_available: bool,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::with_referral_code(generate_referral_code(&mut rand::thread_rng()))
    }

    pub fn with_referral_code(referral_code: String) -> Self {
        Self {
            coins: 0,
            ton_coins: 0,
            total_earnings: 0,
            level: 1,
            experience: 0,
            experience_to_next: xp_to_next_for_level(1),
            taps_count: 0,
            coins_per_tap: coins_per_tap_for_level(1),
            energy: max_energy_for_level(1),
            max_energy: max_energy_for_level(1),
            boosts: Boosts::default(),
            tasks: default_tasks(),
            referrals: Vec::new(),
            referral_code,
            user_id: None,
            username: None,
            first_name: None,
            last_name: None,
            is_initialized: false,
            telegram_web_app_available: false,
        }
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Host-side trigger: experience reached the threshold and LevelUp is owed.
    pub fn level_up_due(&self) -> bool {
        self.is_initialized && self.experience >= self.experience_to_next
    }

    /// Coins a tap earns at `now`, tap-power boost included.
    pub fn tap_yield(&self, now: i64) -> u64 {
        let mult = self.boosts.tap_power.effective_multiplier(now);
        self.coins_per_tap.saturating_mul(u64::from(mult))
    }

    /// Host-side trigger for the energy regeneration timer.
    pub fn needs_energy(&self) -> bool {
        self.is_initialized && self.energy < self.max_energy
    }

    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id,
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }

    pub fn display_name(&self) -> String {
        self.first_name
            .clone()
            .or_else(|| self.username.clone())
            .unwrap_or_else(|| format!("Player #{}", self.referral_code))
    }

    pub fn referral_link(&self) -> String {
        format!("{}{}", REFERRAL_LINK_BASE, self.referral_code)
    }

    pub fn snapshot(&self) -> crate::error::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_matches_the_starting_economy() {
        let s = PlayerState::with_referral_code("ABC123".into());
        assert_eq!((s.coins, s.level, s.experience, s.experience_to_next), (0, 1, 0, 1000));
        assert_eq!((s.energy, s.max_energy, s.coins_per_tap), (1000, 1000, 1));
        assert_eq!(s.tasks.len(), 5);
        assert!(!s.is_initialized);
        assert!(BoostKind::ALL.iter().all(|k| *s.boosts.slot(*k) == BoostSlot::default()));
    }

    #[test]
    fn new_state_always_has_a_referral_code() {
        assert!(!PlayerState::new().referral_code.is_empty());
    }

    #[test]
    fn regen_gate_needs_initialized_and_missing_energy() {
        let mut s = PlayerState::with_referral_code("ABC123".into());
        s.energy = 400;
        assert!(!s.needs_energy());
        s.is_initialized = true;
        assert!(s.needs_energy());
        s.energy = s.max_energy;
        assert!(!s.needs_energy());
    }

    #[test]
    fn tap_yield_applies_boost_and_saturates() {
        let mut s = PlayerState::with_referral_code("ABC123".into());
        s.coins_per_tap = 3;
        assert_eq!(s.tap_yield(10), 3);
        s.boosts.tap_power = BoostSlot { multiplier: 2, expiry: 20 };
        assert_eq!(s.tap_yield(10), 6);
        assert_eq!(s.tap_yield(20), 3);
        s.coins_per_tap = u64::MAX;
        assert_eq!(s.tap_yield(10), u64::MAX);
    }

    #[test]
    fn level_curves() {
        assert_eq!(max_energy_for_level(1), 1000);
        assert_eq!(max_energy_for_level(2), 1100);
        assert_eq!(coins_per_tap_for_level(2), 1);
        assert_eq!(coins_per_tap_for_level(3), 2);
        assert_eq!(coins_per_tap_for_level(6), 3);
        assert_eq!(xp_to_next_for_level(2), 2000);
    }

    #[test]
    fn boost_kind_parses_only_known_names() {
        assert_eq!("tapPower".parse::<BoostKind>(), Ok(BoostKind::TapPower));
        assert_eq!("level".parse::<BoostKind>(), Ok(BoostKind::Level));
        assert_eq!(
            "turbo".parse::<BoostKind>(),
            Err(GameError::UnknownBoost("turbo".into()))
        );
    }

    #[test]
    fn slot_is_inactive_at_its_expiry_instant() {
        let slot = BoostSlot { multiplier: 2, expiry: 1_000 };
        assert_eq!(slot.effective_multiplier(999), 2);
        assert_eq!(slot.effective_multiplier(1_000), 1);
    }

    #[test]
    fn sweep_only_touches_expired_slots() {
        let mut boosts = Boosts::default();
        boosts.tap_power = BoostSlot { multiplier: 2, expiry: 5_000 };
        boosts.xp = BoostSlot { multiplier: 2, expiry: 1_000 };
        boosts.sweep(2_000);
        assert_eq!(boosts.tap_power.multiplier, 2);
        assert_eq!(boosts.xp, BoostSlot { multiplier: 1, expiry: 1_000 });
    }

    #[test]
    fn every_boost_kind_has_one_offer() {
        for kind in BoostKind::ALL {
            assert_eq!(BOOST_OFFERS.iter().filter(|o| o.kind == kind).count(), 1);
        }
        let tap = BoostOffer::for_kind(BoostKind::TapPower).unwrap();
        assert_eq!((tap.cost, tap.duration_ms), (1000, 1_800_000));
    }

    #[test]
    fn record_progress_clamps_and_completes() {
        let mut task = default_tasks().remove(0);
        task.record_progress(40, 100);
        assert_eq!((task.progress, task.completed), (Some(40), false));
        task.record_progress(250, 100);
        assert_eq!((task.progress, task.completed), (Some(100), true));
    }

    #[test]
    fn social_tasks_are_claimable_without_progress() {
        let s = PlayerState::with_referral_code("X".into());
        assert!(s.task(TASK_SOCIAL_FOLLOW).is_some_and(Task::is_claimable));
        assert!(!s.task(TASK_DAILY_TAPS).is_some_and(Task::is_claimable));
    }

    #[test]
    fn snapshot_uses_camel_case_wire_names() {
        let s = PlayerState::with_referral_code("ABC123".into());
        let snap = s.snapshot().unwrap();
        assert!(snap.get("tonCoins").is_some());
        assert!(snap.get("experienceToNext").is_some());
        assert_eq!(snap["boosts"]["tapPower"]["multiplier"], 1);
        assert_eq!(snap["tasks"][0]["type"], "daily");
        assert!(snap.get("userId").is_none());
    }

    #[test]
    fn display_name_prefers_first_name() {
        let mut s = PlayerState::with_referral_code("ABC123".into());
        assert_eq!(s.display_name(), "Player #ABC123");
        s.username = Some("tapper".into());
        assert_eq!(s.display_name(), "tapper");
        s.first_name = Some("Ada".into());
        assert_eq!(s.display_name(), "Ada");
        assert_eq!(s.referral_link(), "https://t.me/kezeBot?start=ABC123");
    }
}
