use cosmwasm_std::{Addr, Deps, MessageInfo, StdResult, Uint128};

use crate::error::ContractError;
use crate::state::{
    TokenData, UserProfile, CONFIG, OPERATOR_APPROVALS, TOKENS, TOKEN_APPROVALS, USERS,
};

/// Verify the caller is the contract owner.
pub fn assert_owner(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.owner {
        return Err(ContractError::Unauthorized {
            role: "owner".to_string(),
        });
    }
    Ok(())
}

/// Verify the caller is the authorized minter.
pub fn assert_minter(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.minter {
        return Err(ContractError::Unauthorized {
            role: "minter".to_string(),
        });
    }
    Ok(())
}

pub fn assert_not_paused(deps: Deps) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::Paused);
    }
    Ok(())
}

pub fn load_token(deps: Deps, token_id: &str) -> Result<TokenData, ContractError> {
    TOKENS
        .may_load(deps.storage, token_id)?
        .ok_or_else(|| ContractError::TokenNotFound {
            token_id: token_id.to_string(),
        })
}

pub fn load_user(deps: Deps, address: &Addr) -> Result<UserProfile, ContractError> {
    USERS
        .may_load(deps.storage, address)?
        .ok_or_else(|| ContractError::NotRegistered {
            address: address.to_string(),
        })
}

/// Check if `spender` may act on `token_id`: owner, token-level approval, or operator.
pub fn is_authorized(deps: Deps, token: &TokenData, token_id: &str, spender: &Addr) -> StdResult<bool> {
    if *spender == token.owner {
        return Ok(true);
    }
    if let Some(approved) = TOKEN_APPROVALS.may_load(deps.storage, token_id)? {
        if approved == *spender {
            return Ok(true);
        }
    }
    if let Some(true) = OPERATOR_APPROVALS.may_load(deps.storage, (&token.owner, spender))? {
        return Ok(true);
    }
    Ok(false)
}

/// Load the token and verify the caller may act on it.
pub fn load_authorized(
    deps: Deps,
    token_id: &str,
    sender: &Addr,
) -> Result<TokenData, ContractError> {
    let token = load_token(deps, token_id)?;
    if !is_authorized(deps, &token, token_id, sender)? {
        return Err(ContractError::Unauthorized {
            role: "owner or approved".to_string(),
        });
    }
    Ok(token)
}

pub fn reject_funds(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }
    Ok(())
}

/// Validate that exactly `expected` of `denom` was sent, nothing more and nothing else.
pub fn validate_exact_funds(
    info: &MessageInfo,
    denom: &str,
    expected: Uint128,
) -> Result<(), ContractError> {
    if info.funds.is_empty() {
        return Err(ContractError::NoFundsSent);
    }
    if info.funds.len() > 1 {
        return Err(ContractError::MultipleDenomsSent);
    }
    let coin = &info.funds[0];
    if coin.denom != denom {
        return Err(ContractError::WrongDenom {
            expected: denom.to_string(),
            got: coin.denom.clone(),
        });
    }
    if coin.amount != expected {
        return Err(ContractError::WrongAmount {
            expected: expected.to_string(),
            got: coin.amount.to_string(),
        });
    }
    Ok(())
}
