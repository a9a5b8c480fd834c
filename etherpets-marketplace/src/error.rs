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

    #[error("only pets from {expected} can be listed")]
    UnknownNftContract { expected: String },

    #[error("listing not found: {token_id}")]
    ListingNotFound { token_id: String },

    #[error("price must be greater than zero")]
    ZeroPrice,

    #[error("fee of {fee_bps} bps exceeds the maximum of 10000")]
    InvalidFee { fee_bps: u16 },

    #[error("arithmetic overflow")]
    Overflow,

    #[error("seller cannot buy their own listing")]
    CannotBuyOwnListing,

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

    #[error("wrong amount: expected {expected}, got {got}")]
    WrongAmount { expected: String, got: String },

    #[error("unexpected funds sent with this message")]
    UnexpectedFunds,
}
