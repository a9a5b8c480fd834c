use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};
use etherpets_pet_nft::stats::Activity;

use crate::error::ContractError;

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    /// Native denomination rewards are paid in
    pub denom: String,
    pub paused: bool,
    /// Seasons are counted from this instant
    pub season_start: Timestamp,
    pub season_length_seconds: u64,
}

#[cw_serde]
pub struct PendingOwnerTransfer {
    pub proposed_owner: Addr,
}

/// How often a quest's progress starts over
#[cw_serde]
#[derive(Copy)]
pub enum QuestPeriod {
    /// Resets at 00:00 UTC
    Daily,
    /// Resets on 7-day boundaries counted from the unix epoch
    Weekly,
    /// Resets every `season_length_seconds` from `season_start`
    Seasonal,
}

#[cw_serde]
pub struct Quest {
    pub quest_id: String,
    pub title: String,
    pub description: String,
    pub period: QuestPeriod,
    pub target: u32,
    /// Pet activity that advances this quest automatically, if any
    pub activity: Option<Activity>,
    /// Paid in `Config::denom` on claim
    pub reward: Uint128,
    pub active: bool,
    pub created_at: Timestamp,
}

/// One player's progress on one quest within one period
#[cw_serde]
pub struct QuestProgress {
    pub player: Addr,
    pub quest_id: String,
    /// Start of the period this record belongs to
    pub reset_date: Timestamp,
    pub progress: u32,
    pub target: u32,
    pub completed: bool,
    pub claimed: bool,
    pub completed_at: Option<Timestamp>,
    pub claimed_at: Option<Timestamp>,
}

impl QuestProgress {
    pub fn new(player: Addr, quest: &Quest, reset_date: Timestamp) -> Self {
        QuestProgress {
            player,
            quest_id: quest.quest_id.clone(),
            reset_date,
            progress: 0,
            target: quest.target,
            completed: false,
            claimed: false,
            completed_at: None,
            claimed_at: None,
        }
    }

    /// Ratchet progress towards the target. Progress never decreases and
    /// never exceeds `target`. Returns whether anything changed.
    pub fn update_progress(&mut self, new_progress: u32, now: Timestamp) -> bool {
        let next = new_progress.max(self.progress).min(self.target);
        if next == self.progress {
            return false;
        }
        self.progress = next;
        if self.progress == self.target && !self.completed {
            self.completed = true;
            self.completed_at = Some(now);
        }
        true
    }

    /// Mark the reward as claimed. Only a completed, unclaimed record can be claimed.
    pub fn claim_reward(&mut self, now: Timestamp) -> Result<(), ContractError> {
        if !self.completed {
            return Err(ContractError::QuestNotCompleted {
                quest_id: self.quest_id.clone(),
            });
        }
        if self.claimed {
            return Err(ContractError::RewardAlreadyClaimed {
                quest_id: self.quest_id.clone(),
            });
        }
        self.claimed = true;
        self.claimed_at = Some(now);
        Ok(())
    }
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const PENDING_OWNER: Item<PendingOwnerTransfer> = Item::new("pending_owner");

/// quest_id -> Quest
pub const QUESTS: Map<&str, Quest> = Map::new("quests");
pub const QUEST_COUNT: Item<u32> = Item::new("quest_count");

/// (player, quest_id, reset_date seconds) -> QuestProgress
pub const PROGRESS: Map<(&Addr, &str, u64), QuestProgress> = Map::new("progress");

/// Addresses allowed to post progress (backend wallet, pet contract)
pub const REPORTERS: Map<&Addr, bool> = Map::new("reporters");
