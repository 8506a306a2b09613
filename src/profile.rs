//! Read-only views derived from `PlayerState` for the profile screen.

use crate::model::PlayerState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl Tier {
    pub fn for_earnings(total_earnings: u64) -> Self {
        match total_earnings {
            100_000.. => Tier::Diamond,
            50_000.. => Tier::Platinum,
            25_000.. => Tier::Gold,
            10_000.. => Tier::Silver,
            _ => Tier::Bronze,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
            Tier::Diamond => "Diamond",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Tier::Bronze => "#fb923c",
            Tier::Silver => "#9ca3af",
            Tier::Gold => "#facc15",
            Tier::Platinum => "#d1d5db",
            Tier::Diamond => "#22d3ee",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub earned: bool,
}

pub fn badges(state: &PlayerState) -> Vec<Badge> {
    let completed = completed_tasks(state);
    vec![
        Badge { id: "first-tap", name: "First Tap", description: "Made your first tap", earned: state.taps_count > 0 },
        Badge { id: "hundred-taps", name: "Tap Master", description: "Made 100 taps", earned: state.taps_count >= 100 },
        Badge { id: "thousand-taps", name: "Tap Champion", description: "Made 1,000 taps", earned: state.taps_count >= 1000 },
        Badge { id: "level-5", name: "Rising Star", description: "Reached level 5", earned: state.level >= 5 },
        Badge { id: "first-friend", name: "Social Butterfly", description: "Invited first friend", earned: !state.referrals.is_empty() },
        Badge { id: "task-master", name: "Task Master", description: "Completed 5 tasks", earned: completed >= 5 },
    ]
}

pub fn completed_tasks(state: &PlayerState) -> usize {
    state.tasks.iter().filter(|t| t.completed).count()
}

/// Experience towards the next level, 0..=100.
pub fn experience_percent(state: &PlayerState) -> u32 {
    percent(state.experience, state.experience_to_next)
}

pub fn energy_percent(state: &PlayerState) -> u32 {
    percent(u64::from(state.energy), u64::from(state.max_energy))
}

pub fn task_completion_percent(state: &PlayerState) -> u32 {
    percent(completed_tasks(state) as u64, state.tasks.len() as u64)
}

fn percent(value: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    (u128::from(value.min(total)) * 100 / u128::from(total)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::GameAction;

    fn state() -> PlayerState {
        PlayerState::with_referral_code("ABC123".into())
    }

    #[test]
    fn tier_thresholds() {
        assert_eq!(Tier::for_earnings(0), Tier::Bronze);
        assert_eq!(Tier::for_earnings(9_999), Tier::Bronze);
        assert_eq!(Tier::for_earnings(10_000), Tier::Silver);
        assert_eq!(Tier::for_earnings(25_000), Tier::Gold);
        assert_eq!(Tier::for_earnings(50_000), Tier::Platinum);
        assert_eq!(Tier::for_earnings(100_000), Tier::Diamond);
    }

    #[test]
    fn badges_follow_counters() {
        let mut s = state();
        assert!(badges(&s).iter().all(|b| !b.earned));
        s.taps_count = 150;
        s.level = 5;
        let earned: Vec<_> = badges(&s).into_iter().filter(|b| b.earned).map(|b| b.id).collect();
        assert_eq!(earned, ["first-tap", "hundred-taps", "level-5"]);
    }

    #[test]
    fn percentages_are_bounded() {
        let mut s = state();
        s.experience = 250;
        assert_eq!(experience_percent(&s), 25);
        s.experience = 5_000;
        assert_eq!(experience_percent(&s), 100);
        s.energy = 500;
        assert_eq!(energy_percent(&s), 50);
        s.tasks[0].completed = true;
        assert_eq!(task_completion_percent(&s), 20);
        s.tasks.clear();
        assert_eq!(task_completion_percent(&s), 0);
    }

    #[test]
    fn percentages_survive_huge_loaded_values() {
        let snapshot = serde_json::json!({ "experience": 1u64 << 62, "experienceToNext": 1u64 << 63 });
        let s = state().apply(GameAction::LoadGame { snapshot }, 0).unwrap();
        assert_eq!(s.experience_to_next, 1 << 63);
        assert_eq!(experience_percent(&s), 50);

        let s = s
            .apply(GameAction::LoadGame { snapshot: serde_json::json!({ "experience": u64::MAX, "experienceToNext": u64::MAX }) }, 0)
            .unwrap();
        assert_eq!(experience_percent(&s), 100);
    }
}
