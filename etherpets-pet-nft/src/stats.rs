//! Pet stat rules: the activity delta table, time decay and the leveling curve.
//!
//! Everything here is pure so the contract handlers and queries share one
//! definition of how a pet changes.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Timestamp;

use crate::error::ContractError;
use crate::state::{DecayRates, Pet, PetStats};

pub const MAX_STAT: u32 = 100;
pub const XP_PER_LEVEL: u64 = 100;
/// Ritual duration bounds, in minutes
pub const MIN_RITUAL_MINUTES: u32 = 1;
pub const MAX_RITUAL_MINUTES: u32 = 60;

const SECONDS_PER_HOUR: u64 = 3_600;

#[cw_serde]
#[derive(Copy, Eq)]
pub enum FoodType {
    Basic,
    Premium,
    Treat,
}

#[cw_serde]
#[derive(Copy, Eq)]
pub enum GameType {
    Fetch,
    Puzzle,
    Race,
}

#[cw_serde]
#[derive(Copy, Eq)]
pub enum TrainingType {
    Strength,
    Agility,
    Intelligence,
}

/// What an item NFT does when used on a pet
#[cw_serde]
#[derive(Copy, Eq)]
pub enum ItemKind {
    Food(FoodType),
    Toy(GameType),
}

impl ItemKind {
    pub fn action(&self) -> PetAction {
        match *self {
            ItemKind::Food(food) => PetAction::Feed(food),
            ItemKind::Toy(game) => PetAction::Play(game),
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            ItemKind::Food(_) => "food",
            ItemKind::Toy(_) => "toy",
        }
    }
}

/// Activity family, as reported to the quest contract
#[cw_serde]
#[derive(Copy, Eq)]
pub enum Activity {
    Feed,
    Play,
    Train,
    Rest,
    Meditate,
    Breathe,
    Reflect,
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Feed => "feed",
            Activity::Play => "play",
            Activity::Train => "train",
            Activity::Rest => "rest",
            Activity::Meditate => "meditate",
            Activity::Breathe => "breathe",
            Activity::Reflect => "reflect",
        }
    }
}

/// A concrete activity a pet performs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PetAction {
    Feed(FoodType),
    Play(GameType),
    Train(TrainingType),
    Rest,
    /// Rituals carry their duration in minutes, already validated to 1–60
    Meditate(u32),
    Breathe(u32),
    Reflect(u32),
}

/// Signed stat change plus experience granted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatDelta {
    pub energy: i32,
    pub hunger: i32,
    pub happiness: i32,
    pub experience: u64,
}

impl PetAction {
    pub fn activity(&self) -> Activity {
        match self {
            PetAction::Feed(_) => Activity::Feed,
            PetAction::Play(_) => Activity::Play,
            PetAction::Train(_) => Activity::Train,
            PetAction::Rest => Activity::Rest,
            PetAction::Meditate(_) => Activity::Meditate,
            PetAction::Breathe(_) => Activity::Breathe,
            PetAction::Reflect(_) => Activity::Reflect,
        }
    }

    pub fn delta(&self) -> StatDelta {
        let (energy, hunger, happiness, experience) = match *self {
            PetAction::Feed(FoodType::Basic) => (5, 20, 0, 5),
            PetAction::Feed(FoodType::Premium) => (10, 35, 5, 8),
            PetAction::Feed(FoodType::Treat) => (0, 10, 15, 4),
            PetAction::Play(GameType::Fetch) => (-15, -10, 20, 10),
            PetAction::Play(GameType::Puzzle) => (-5, -5, 10, 15),
            PetAction::Play(GameType::Race) => (-25, -15, 15, 12),
            PetAction::Train(TrainingType::Strength) => (-20, -10, -5, 25),
            PetAction::Train(TrainingType::Agility) => (-15, -10, 0, 20),
            PetAction::Train(TrainingType::Intelligence) => (-10, -5, 5, 30),
            PetAction::Rest => (30, -5, 0, 2),
            PetAction::Meditate(minutes) => {
                let m = ritual_minutes(minutes);
                (m / 2, 0, m / 3, m as u64)
            }
            PetAction::Breathe(minutes) => {
                let m = ritual_minutes(minutes);
                (m / 3, 0, m / 6, (m / 2) as u64)
            }
            PetAction::Reflect(minutes) => {
                let m = ritual_minutes(minutes);
                (0, 0, m / 2, (m * 3 / 4) as u64)
            }
        };
        StatDelta {
            energy,
            hunger,
            happiness,
            experience,
        }
    }

    /// Energy the pet must have before the activity starts
    pub fn energy_cost(&self) -> u32 {
        let energy = self.delta().energy;
        if energy < 0 {
            energy.unsigned_abs()
        } else {
            0
        }
    }
}

fn ritual_minutes(minutes: u32) -> i32 {
    minutes.min(MAX_RITUAL_MINUTES) as i32
}

fn apply_clamped(stat: u32, delta: i32) -> u32 {
    (stat as i64 + delta as i64).clamp(0, MAX_STAT as i64) as u32
}

impl PetStats {
    pub fn full() -> Self {
        PetStats {
            energy: MAX_STAT,
            hunger: MAX_STAT,
            happiness: MAX_STAT,
        }
    }

    pub fn apply(&self, delta: &StatDelta) -> PetStats {
        PetStats {
            energy: apply_clamped(self.energy, delta.energy),
            hunger: apply_clamped(self.hunger, delta.hunger),
            happiness: apply_clamped(self.happiness, delta.happiness),
        }
    }
}

/// `level = 1 + experience / XP_PER_LEVEL`
pub fn level_for_experience(experience: u64) -> u32 {
    let level = 1 + experience / XP_PER_LEVEL;
    u32::try_from(level).unwrap_or(u32::MAX)
}

/// Experience at which `level` is reached
pub fn xp_for_level(level: u32) -> u64 {
    (level.max(1) as u64 - 1) * XP_PER_LEVEL
}

/// Stats after linear decay from `pet.last_decay` to `now`, plus the new
/// decay checkpoint. Only whole hours are consumed; the remainder carries over.
pub fn decayed(pet: &Pet, rates: &DecayRates, now: Timestamp) -> (PetStats, Timestamp) {
    if now <= pet.last_decay {
        return (pet.stats, pet.last_decay);
    }
    let hours = (now.seconds() - pet.last_decay.seconds()) / SECONDS_PER_HOUR;
    if hours == 0 {
        return (pet.stats, pet.last_decay);
    }
    let loss = |rate: u32| -> u32 {
        u32::try_from((rate as u64).saturating_mul(hours)).unwrap_or(u32::MAX)
    };
    let stats = PetStats {
        energy: pet.stats.energy.saturating_sub(loss(rates.energy_per_hour)),
        hunger: pet.stats.hunger.saturating_sub(loss(rates.hunger_per_hour)),
        happiness: pet
            .stats
            .happiness
            .saturating_sub(loss(rates.happiness_per_hour)),
    };
    let checkpoint = pet.last_decay.plus_seconds(hours * SECONDS_PER_HOUR);
    (stats, checkpoint)
}

/// Outcome of one activity on a pet
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityOutcome {
    pub pet: Pet,
    pub previous_level: u32,
}

impl ActivityOutcome {
    pub fn leveled_up(&self) -> bool {
        self.pet.level > self.previous_level
    }
}

/// Decay the pet up to `now`, then run `action` on it.
pub fn perform(
    pet: &Pet,
    action: PetAction,
    rates: &DecayRates,
    now: Timestamp,
) -> Result<ActivityOutcome, ContractError> {
    let (stats, checkpoint) = decayed(pet, rates, now);

    let cost = action.energy_cost();
    if stats.energy < cost {
        return Err(ContractError::InsufficientEnergy {
            required: cost,
            available: stats.energy,
        });
    }

    let delta = action.delta();
    let experience = pet.experience.saturating_add(delta.experience);
    let mut next = pet.clone();
    next.stats = stats.apply(&delta);
    next.experience = experience;
    next.level = level_for_experience(experience);
    next.last_decay = checkpoint;

    Ok(ActivityOutcome {
        pet: next,
        previous_level: pet.level,
    })
}
