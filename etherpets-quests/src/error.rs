use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: only {role} can perform this action")]
    Unauthorized { role: String },

    #[error("contract is paused")]
    Paused,

    #[error("contract is not paused")]
    NotPaused,

    #[error("quest not found: {quest_id}")]
    QuestNotFound { quest_id: String },

    #[error("quest {quest_id} already exists")]
    QuestAlreadyExists { quest_id: String },

    #[error("quest {quest_id} is not active")]
    QuestInactive { quest_id: String },

    #[error("quest board is full: at most {max} quests")]
    TooManyQuests { max: u32 },

    #[error("invalid quest: {reason}")]
    InvalidQuest { reason: String },

    #[error("invalid season length: must be at least one day")]
    InvalidSeasonLength,

    #[error("quest {quest_id} is not completed")]
    QuestNotCompleted { quest_id: String },

    #[error("reward for quest {quest_id} already claimed")]
    RewardAlreadyClaimed { quest_id: String },

    #[error("insufficient reward pool: need {needed}, have {available}")]
    InsufficientRewardPool { needed: String, available: String },

    #[error("no owner transfer pending")]
    NoOwnerTransferPending,

    #[error("caller is not the pending owner")]
    NotPendingOwner,

    #[error("owner transfer already pending")]
    OwnerTransferAlreadyPending,

    #[error("no funds sent")]
    NoFundsSent,

    #[error("must send exactly one coin denomination")]
    MultipleDenomsSent,

    #[error("wrong denomination: expected {expected}, got {got}")]
    WrongDenom { expected: String, got: String },

    #[error("zero amount not allowed")]
    ZeroAmount,

    #[error("unexpected funds sent with this message")]
    UnexpectedFunds,
}
