use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Timestamp, Uint128};
use etherpets_pet_nft::stats::Activity;

use crate::state::{Quest, QuestPeriod};

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub denom: String,
    /// Addresses allowed to post progress, typically the pet contract and a backend wallet
    pub reporters: Vec<String>,
    /// Defaults to 90 days
    pub season_length_seconds: Option<u64>,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ─── Quest board (owner) ───
    CreateQuest {
        quest_id: String,
        title: String,
        description: String,
        period: QuestPeriod,
        target: u32,
        activity: Option<Activity>,
        reward: Uint128,
    },
    SetQuestActive {
        quest_id: String,
        active: bool,
    },

    // ─── Progress (reporters) ───
    /// Set absolute progress for the current period. Lower values are ignored.
    UpdateProgress {
        player: String,
        quest_id: String,
        progress: u32,
    },
    /// Advance every active quest tracking `activity` by `amount`.
    RecordActivity {
        player: String,
        activity: Activity,
        amount: u32,
    },

    // ─── Rewards ───
    ClaimReward {
        quest_id: String,
    },
    /// Top up the reward pool. Anyone may fund it.
    FundRewards {},

    // ─── Admin ───
    AddReporter {
        address: String,
    },
    RemoveReporter {
        address: String,
    },
    Pause {},
    Unpause {},
    ProposeOwner {
        new_owner: String,
    },
    AcceptOwner {},
    CancelOwnerTransfer {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::Config)]
    Config {},
    #[returns(Quest)]
    Quest { quest_id: String },
    #[returns(QuestsResponse)]
    Quests {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    /// Progress in the quest's current period
    #[returns(ProgressResponse)]
    Progress { player: String, quest_id: String },
    /// Current-period progress on every quest
    #[returns(PlayerProgressResponse)]
    PlayerProgress { player: String },
    #[returns(ReportersResponse)]
    Reporters {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(Option<crate::state::PendingOwnerTransfer>)]
    PendingOwner {},
}

#[cw_serde]
pub struct QuestsResponse {
    pub quests: Vec<Quest>,
}

#[cw_serde]
pub struct ProgressResponse {
    pub player: Addr,
    pub quest_id: String,
    pub reset_date: Timestamp,
    pub progress: u32,
    pub target: u32,
    pub completed: bool,
    pub claimed: bool,
    pub reward: Uint128,
}

#[cw_serde]
pub struct PlayerProgressResponse {
    pub progress: Vec<ProgressResponse>,
}

#[cw_serde]
pub struct ReportersResponse {
    pub reporters: Vec<Addr>,
}

#[cw_serde]
pub struct MigrateMsg {}
