use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Binary, Uint128};
use cw721::receiver::Cw721ReceiveMsg;

use crate::state::{DecayRates, Pet, PetStats, UserProfile};
use crate::stats::{Activity, FoodType, GameType, ItemKind, TrainingType};

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    /// Authorized minter address (backend wallet)
    pub minter: String,
    pub name: String,
    pub symbol: String,
    /// Falls back to the default rates when omitted
    pub decay: Option<DecayRates>,
    pub denom: String,
    pub adoption_fee: Option<Uint128>,
    pub quest_contract: Option<String>,
    pub item_contract: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Link the sender to an external wallet and optional username
    RegisterUser {
        wallet_address: String,
        username: Option<String>,
    },
    UpdateUsername {
        username: Option<String>,
    },
    /// Registered user mints a pet to themselves
    Adopt {
        name: String,
        species: String,
        token_uri: Option<String>,
    },
    /// Mint a pet to any address (minter only)
    Mint {
        to: String,
        name: String,
        species: String,
        token_uri: Option<String>,
    },
    RenamePet {
        token_id: String,
        name: String,
    },
    Feed {
        token_id: String,
        food_type: FoodType,
    },
    Play {
        token_id: String,
        game_type: GameType,
    },
    Train {
        token_id: String,
        training_type: TrainingType,
    },
    Rest {
        token_id: String,
    },
    /// Rituals take a `duration` in minutes (1–60)
    Meditate {
        token_id: String,
        duration: u32,
    },
    Breathe {
        token_id: String,
        duration: u32,
    },
    Reflect {
        token_id: String,
        duration: u32,
    },
    /// Item contract only: `player` consumed an item on the pet
    UseItem {
        player: String,
        token_id: String,
        item: ItemKind,
    },
    TransferNft {
        recipient: String,
        token_id: String,
    },
    /// Send an NFT to a contract with a callback message
    SendNft {
        contract: String,
        token_id: String,
        msg: Binary,
    },
    Approve {
        spender: String,
        token_id: String,
    },
    Revoke {
        token_id: String,
    },
    ApproveAll {
        operator: String,
    },
    RevokeAll {
        operator: String,
    },
    Burn {
        token_id: String,
    },
    ProposeMinter {
        new_minter: String,
    },
    AcceptMinter {},
    CancelMinterTransfer {},
    Pause {},
    Unpause {},
    /// Fields left as `None` keep their current value. A zero fee makes
    /// adoption free, an empty contract address detaches that contract.
    UpdateConfig {
        decay: Option<DecayRates>,
        adoption_fee: Option<Uint128>,
        quest_contract: Option<String>,
        item_contract: Option<String>,
    },
    /// Move collected adoption fees out of the contract (owner only)
    WithdrawFees {
        amount: Uint128,
        recipient: String,
    },
    ProposeOwner {
        new_owner: String,
    },
    AcceptOwner {},
    CancelOwnerTransfer {},
}

/// Callback executed on the receiving contract of `SendNft`
#[cw_serde]
pub enum ReceiverExecuteMsg {
    ReceiveNft(Cw721ReceiveMsg),
}

/// Message sent to the quest contract after each activity
#[cw_serde]
pub enum QuestHookMsg {
    RecordActivity {
        player: String,
        activity: Activity,
        amount: u32,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::Config)]
    Config {},
    #[returns(UserResponse)]
    User { address: String },
    #[returns(UserResponse)]
    UserByWallet { wallet_address: String },
    /// Pet state with decay applied up to the current block
    #[returns(PetResponse)]
    Pet { token_id: String },
    #[returns(PetsResponse)]
    PetsByOwner {
        owner: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(NftInfoResponse)]
    NftInfo { token_id: String },
    #[returns(OwnerOfResponse)]
    OwnerOf { token_id: String },
    #[returns(TokensResponse)]
    Tokens {
        owner: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(TokensResponse)]
    AllTokens {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(NumTokensResponse)]
    NumTokens {},
    #[returns(ApprovalResponse)]
    Approval { token_id: String, spender: String },
    #[returns(OperatorResponse)]
    Operator { owner: String, operator: String },
    #[returns(CollectionInfoResponse)]
    CollectionInfo {},
    #[returns(Option<crate::state::PendingMinterTransfer>)]
    PendingMinter {},
    #[returns(Option<crate::state::PendingOwnerTransfer>)]
    PendingOwner {},
}

#[cw_serde]
pub struct UserResponse {
    pub user: Option<UserProfile>,
}

#[cw_serde]
pub struct PetResponse {
    pub token_id: String,
    pub owner: String,
    pub name: String,
    pub species: String,
    pub stats: PetStats,
    pub experience: u64,
    pub level: u32,
    /// Experience still needed for the next level
    pub experience_to_next_level: u64,
}

#[cw_serde]
pub struct PetsResponse {
    pub pets: Vec<PetResponse>,
}

#[cw_serde]
pub struct NftInfoResponse {
    pub token_id: String,
    pub owner: String,
    pub pet: Pet,
    pub token_uri: Option<String>,
    pub approval: Option<String>,
}

#[cw_serde]
pub struct OwnerOfResponse {
    pub owner: String,
    pub approvals: Vec<String>,
}

#[cw_serde]
pub struct TokensResponse {
    pub tokens: Vec<String>,
}

#[cw_serde]
pub struct NumTokensResponse {
    pub count: u64,
}

#[cw_serde]
pub struct ApprovalResponse {
    pub approved: bool,
}

#[cw_serde]
pub struct OperatorResponse {
    pub approved: bool,
}

#[cw_serde]
pub struct CollectionInfoResponse {
    pub name: String,
    pub symbol: String,
}

#[cw_serde]
pub struct MigrateMsg {}
