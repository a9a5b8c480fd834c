use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

pub const MAX_FEE_BPS: u16 = 10_000;

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    /// The only NFT contract whose tokens may be listed
    pub pet_contract: Addr,
    pub denom: String,
    /// Marketplace fee in basis points, taken from the sale price
    pub fee_bps: u16,
    pub treasury: Addr,
    pub paused: bool,
}

#[cw_serde]
pub struct PendingOwnerTransfer {
    pub proposed_owner: Addr,
}

#[cw_serde]
pub struct Listing {
    pub token_id: String,
    pub seller: Addr,
    pub price: Uint128,
    pub listed_at: Timestamp,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const PENDING_OWNER: Item<PendingOwnerTransfer> = Item::new("pending_owner");

/// token_id -> Listing. The marketplace holds the NFT while it is listed.
pub const LISTINGS: Map<&str, Listing> = Map::new("listings");

/// (seller, token_id) -> bool
pub const SELLER_LISTINGS: Map<(&Addr, &str), bool> = Map::new("seller_listings");
