use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

/// Contract-level configuration
#[cw_serde]
pub struct Config {
    /// Contract owner: pauses, tunes decay and hands over the minter role
    pub owner: Addr,
    /// Authorized minter (backend wallet)
    pub minter: Addr,
    /// Freezes minting, activities, transfers, approvals and burns. Revoking stays open.
    pub paused: bool,
    pub name: String,
    pub symbol: String,
    /// Per-hour stat decay
    pub decay: DecayRates,
    /// Native denomination used for adoption fees
    pub denom: String,
    /// Exact fee charged by `Adopt`, `None` means adoption is free
    pub adoption_fee: Option<Uint128>,
    /// Quest contract notified after every activity
    pub quest_contract: Option<Addr>,
    /// Item contract allowed to apply consumed items to pets
    pub item_contract: Option<Addr>,
}

/// Stat points lost per whole elapsed hour
#[cw_serde]
pub struct DecayRates {
    pub energy_per_hour: u32,
    pub hunger_per_hour: u32,
    pub happiness_per_hour: u32,
}

impl Default for DecayRates {
    fn default() -> Self {
        DecayRates {
            energy_per_hour: 2,
            hunger_per_hour: 3,
            happiness_per_hour: 1,
        }
    }
}

/// Two-step minter transfer state
#[cw_serde]
pub struct PendingMinterTransfer {
    pub proposed_minter: Addr,
}

#[cw_serde]
pub struct PendingOwnerTransfer {
    pub proposed_owner: Addr,
}

/// Wellness meters, each kept in `[0, MAX_STAT]`. 100 is best for all three.
#[cw_serde]
#[derive(Copy)]
pub struct PetStats {
    pub energy: u32,
    /// Satiation: feeding raises it, time lowers it
    pub hunger: u32,
    pub happiness: u32,
}

/// On-chain pet state
#[cw_serde]
pub struct Pet {
    pub name: String,
    pub species: String,
    pub stats: PetStats,
    pub experience: u64,
    pub level: u32,
    pub born_at: Timestamp,
    /// Decay has been applied up to this instant
    pub last_decay: Timestamp,
}

/// Full on-chain token data
#[cw_serde]
pub struct TokenData {
    pub owner: Addr,
    pub pet: Pet,
    pub token_uri: Option<String>,
}

/// Registered player profile
#[cw_serde]
pub struct UserProfile {
    pub address: Addr,
    /// External wallet, lower-cased `0x` + 40 hex
    pub wallet_address: String,
    pub username: Option<String>,
    pub registered_at: Timestamp,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const TOKEN_COUNT: Item<u64> = Item::new("token_count");
/// Monotonic id source; unlike TOKEN_COUNT it never goes down on burn
pub const NEXT_TOKEN_ID: Item<u64> = Item::new("next_token_id");
pub const PENDING_MINTER: Item<PendingMinterTransfer> = Item::new("pending_minter");
pub const PENDING_OWNER: Item<PendingOwnerTransfer> = Item::new("pending_owner");

/// token_id (string of u64) -> TokenData
pub const TOKENS: Map<&str, TokenData> = Map::new("pet_tokens");

/// token_id -> spender Addr (single approval per token)
pub const TOKEN_APPROVALS: Map<&str, Addr> = Map::new("pet_approvals");

/// (owner, operator) -> bool
pub const OPERATOR_APPROVALS: Map<(&Addr, &Addr), bool> = Map::new("pet_operators");

/// (owner_addr, token_id) -> bool
pub const OWNER_TOKENS: Map<(&Addr, &str), bool> = Map::new("owner_tokens");

/// account -> profile
pub const USERS: Map<&Addr, UserProfile> = Map::new("users");

/// lower-cased wallet address -> account
pub const WALLET_INDEX: Map<&str, Addr> = Map::new("wallet_idx");

/// lower-cased username -> account
pub const USERNAME_INDEX: Map<&str, Addr> = Map::new("username_idx");
