use cosmwasm_std::StdError;
use thiserror::Error;

use crate::validation::FieldError;

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

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

    #[error("validation failed: {}", describe(.errors))]
    Validation { errors: Vec<FieldError> },

    #[error("token not found: {token_id}")]
    TokenNotFound { token_id: String },

    #[error("address {address} is already registered")]
    AlreadyRegistered { address: String },

    #[error("address {address} is not registered")]
    NotRegistered { address: String },

    #[error("wallet {wallet_address} is already linked to another account")]
    WalletTaken { wallet_address: String },

    #[error("username {username} is already taken")]
    UsernameTaken { username: String },

    #[error("not enough energy: activity needs {required}, pet has {available}")]
    InsufficientEnergy { required: u32, available: u32 },

    #[error("no minter transfer pending")]
    NoMinterTransferPending,

    #[error("caller is not the pending minter")]
    NotPendingMinter,

    #[error("minter transfer already pending")]
    MinterTransferAlreadyPending,

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

    #[error("wrong payment amount: expected {expected}, got {got}")]
    WrongAmount { expected: String, got: String },

    #[error("zero amount not allowed")]
    ZeroAmount,

    #[error("unexpected funds sent with this message")]
    UnexpectedFunds,
}
