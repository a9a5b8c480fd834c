use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;
use cw721::receiver::Cw721ReceiveMsg;

use crate::state::Listing;

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub pet_contract: String,
    pub denom: String,
    pub fee_bps: u16,
    pub treasury: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Entry point for `SendNft` from the pet contract
    ReceiveNft(Cw721ReceiveMsg),
    /// Pay the listed price and receive the pet
    Buy {
        token_id: String,
    },
    /// Withdraw a listing and get the pet back
    CancelListing {
        token_id: String,
    },
    UpdatePrice {
        token_id: String,
        price: Uint128,
    },

    // ─── Admin ───
    UpdateFee {
        fee_bps: u16,
        treasury: Option<String>,
    },
    Pause {},
    Unpause {},
    ProposeOwner {
        new_owner: String,
    },
    AcceptOwner {},
    CancelOwnerTransfer {},
}

/// Payload carried in `Cw721ReceiveMsg::msg`
#[cw_serde]
pub enum ReceiveMsg {
    ListPet { price: Uint128 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::Config)]
    Config {},
    #[returns(Option<Listing>)]
    Listing { token_id: String },
    #[returns(ListingsResponse)]
    Listings {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(ListingsResponse)]
    ListingsBySeller {
        seller: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(Option<crate::state::PendingOwnerTransfer>)]
    PendingOwner {},
}

#[cw_serde]
pub struct ListingsResponse {
    pub listings: Vec<Listing>,
}

#[cw_serde]
pub struct MigrateMsg {}
