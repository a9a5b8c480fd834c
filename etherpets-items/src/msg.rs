use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Binary;
use etherpets_pet_nft::stats::ItemKind;

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub minter: String,
    /// Can be linked later with `SetPetContract`
    pub pet_contract: Option<String>,
    /// Max 10000
    pub royalty_bps: u16,
    pub royalty_recipient: String,
    pub name: String,
    pub symbol: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Mint a single item (minter only)
    Mint {
        to: String,
        kind: ItemKind,
        token_uri: Option<String>,
    },
    /// Mint up to 50 items at once (minter only)
    BatchMint {
        mints: Vec<MintRequest>,
    },
    /// Consume the item on a pet. The item is burned and its effect applied
    /// in the same transaction, so a rejected effect keeps the item.
    UseItem {
        item_id: String,
        pet_id: String,
    },
    TransferNft {
        recipient: String,
        token_id: String,
    },
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
    UpdateRoyalty {
        royalty_bps: u16,
        royalty_recipient: String,
    },
    /// An empty address unlinks the pet contract
    SetPetContract {
        pet_contract: String,
    },
    ProposeOwner {
        new_owner: String,
    },
    AcceptOwner {},
    CancelOwnerTransfer {},
}

#[cw_serde]
pub struct MintRequest {
    pub to: String,
    pub kind: ItemKind,
    pub token_uri: Option<String>,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::Config)]
    Config {},
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
    /// Royalty settings for marketplace integration
    #[returns(RoyaltyInfoResponse)]
    RoyaltyInfo {},
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
pub struct NftInfoResponse {
    pub token_id: String,
    pub owner: String,
    pub kind: ItemKind,
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
pub struct RoyaltyInfoResponse {
    pub royalty_bps: u16,
    pub royalty_recipient: String,
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
