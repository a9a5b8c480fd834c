use cosmwasm_std::{to_json_binary, Addr, Deps, MessageInfo, StdResult, Uint128, WasmMsg};
use etherpets_pet_nft::msg::ExecuteMsg as PetExecuteMsg;

use crate::error::ContractError;
use crate::state::{Listing, CONFIG, LISTINGS};

pub fn assert_owner(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.owner {
        return Err(ContractError::Unauthorized {
            role: "owner".to_string(),
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

pub fn reject_funds(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }
    Ok(())
}

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

pub fn load_listing(deps: Deps, token_id: &str) -> Result<Listing, ContractError> {
    LISTINGS
        .may_load(deps.storage, token_id)?
        .ok_or_else(|| ContractError::ListingNotFound {
            token_id: token_id.to_string(),
        })
}

/// Only the seller may change or withdraw a listing.
pub fn load_own_listing(deps: Deps, token_id: &str, sender: &Addr) -> Result<Listing, ContractError> {
    let listing = load_listing(deps, token_id)?;
    if listing.seller != *sender {
        return Err(ContractError::Unauthorized {
            role: "seller".to_string(),
        });
    }
    Ok(listing)
}

/// Fee share of `price` at `fee_bps` basis points, rounded down.
pub fn fee_for(price: Uint128, fee_bps: u16) -> Result<Uint128, ContractError> {
    price
        .checked_mul(Uint128::from(fee_bps as u128))
        .map_err(|_| ContractError::Overflow)?
        .checked_div(Uint128::from(10_000u128))
        .map_err(|_| ContractError::Overflow)
}

/// Message moving a held pet out of escrow.
pub fn transfer_pet(pet_contract: &Addr, token_id: &str, recipient: &Addr) -> StdResult<WasmMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: pet_contract.to_string(),
        msg: to_json_binary(&PetExecuteMsg::TransferNft {
            recipient: recipient.to_string(),
            token_id: token_id.to_string(),
        })?,
        funds: vec![],
    })
}
