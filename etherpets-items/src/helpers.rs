use cosmwasm_std::{Addr, Deps, MessageInfo, StdResult, Storage};

use crate::error::ContractError;
use crate::state::{
    ItemData, CONFIG, OPERATOR_APPROVALS, OWNER_TOKENS, TOKENS, TOKEN_APPROVALS, TOKEN_COUNT,
};

pub const MAX_BATCH_MINT: u32 = 50;
pub const MAX_ROYALTY_BPS: u16 = 10_000;

pub fn assert_owner(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.owner {
        return Err(ContractError::Unauthorized {
            role: "owner".to_string(),
        });
    }
    Ok(())
}

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

pub fn load_item(deps: Deps, token_id: &str) -> Result<ItemData, ContractError> {
    TOKENS
        .may_load(deps.storage, token_id)?
        .ok_or_else(|| ContractError::TokenNotFound {
            token_id: token_id.to_string(),
        })
}

/// Owner, token-level approval, or operator.
pub fn is_authorized(deps: Deps, item: &ItemData, token_id: &str, spender: &Addr) -> StdResult<bool> {
    if *spender == item.owner {
        return Ok(true);
    }
    if let Some(approved) = TOKEN_APPROVALS.may_load(deps.storage, token_id)? {
        if approved == *spender {
            return Ok(true);
        }
    }
    Ok(OPERATOR_APPROVALS
        .may_load(deps.storage, (&item.owner, spender))?
        .unwrap_or(false))
}

pub fn load_authorized(deps: Deps, token_id: &str, sender: &Addr) -> Result<ItemData, ContractError> {
    let item = load_item(deps, token_id)?;
    if !is_authorized(deps, &item, token_id, sender)? {
        return Err(ContractError::Unauthorized {
            role: "owner or approved".to_string(),
        });
    }
    Ok(item)
}

/// Drop the item and every index entry pointing at it.
pub fn remove_item(storage: &mut dyn Storage, token_id: &str, item: &ItemData) -> StdResult<()> {
    OWNER_TOKENS.remove(storage, (&item.owner, token_id));
    TOKENS.remove(storage, token_id);
    TOKEN_APPROVALS.remove(storage, token_id);
    TOKEN_COUNT.update(storage, |count| -> StdResult<_> { Ok(count.saturating_sub(1)) })?;
    Ok(())
}

pub fn validate_royalty_bps(bps: u16) -> Result<(), ContractError> {
    if bps > MAX_ROYALTY_BPS {
        return Err(ContractError::InvalidRoyaltyBps { bps });
    }
    Ok(())
}

pub fn reject_funds(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }
    Ok(())
}
