use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Item, Map};
use etherpets_pet_nft::stats::ItemKind;

#[cw_serde]
pub struct Config {
    /// Contract owner: pauses, sets royalties and links the pet contract
    pub owner: Addr,
    /// Authorized minter (shop or quest backend)
    pub minter: Addr,
    /// Pet contract that items are used on, unset until linked
    pub pet_contract: Option<Addr>,
    /// Freezes minting, use, transfers, approvals and burns
    pub paused: bool,
    /// Royalty basis points (e.g., 500 = 5%)
    pub royalty_bps: u16,
    pub royalty_recipient: Addr,
    pub name: String,
    pub symbol: String,
}

#[cw_serde]
pub struct PendingMinterTransfer {
    pub proposed_minter: Addr,
}

#[cw_serde]
pub struct PendingOwnerTransfer {
    pub proposed_owner: Addr,
}

/// One consumable item
#[cw_serde]
pub struct ItemData {
    pub owner: Addr,
    pub kind: ItemKind,
    pub token_uri: Option<String>,
    pub minted_at: Timestamp,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const TOKEN_COUNT: Item<u64> = Item::new("token_count");
pub const NEXT_TOKEN_ID: Item<u64> = Item::new("next_token_id");
pub const PENDING_MINTER: Item<PendingMinterTransfer> = Item::new("pending_minter");
pub const PENDING_OWNER: Item<PendingOwnerTransfer> = Item::new("pending_owner");

/// token_id (string of u64) -> ItemData
pub const TOKENS: Map<&str, ItemData> = Map::new("item_tokens");

pub const TOKEN_APPROVALS: Map<&str, Addr> = Map::new("item_approvals");

pub const OPERATOR_APPROVALS: Map<(&Addr, &Addr), bool> = Map::new("item_operators");

/// (owner_addr, token_id) -> bool
pub const OWNER_TOKENS: Map<(&Addr, &str), bool> = Map::new("owner_tokens");
