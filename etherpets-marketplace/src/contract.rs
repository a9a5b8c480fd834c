use cosmwasm_std::{
    entry_point, from_json, to_json_binary, BankMsg, Binary, Coin, Deps, DepsMut, Env,
    MessageInfo, Order, Response, StdResult, Uint128,
};
use cw2::set_contract_version;
use cw721::receiver::Cw721ReceiveMsg;
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::helpers::{
    assert_not_paused, assert_owner, fee_for, load_listing, load_own_listing, reject_funds,
    transfer_pet, validate_exact_funds,
};
use crate::msg::*;
use crate::state::*;

const CONTRACT_NAME: &str = "crates.io:etherpets-marketplace";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_QUERY_LIMIT: u32 = 30;
const MAX_QUERY_LIMIT: u32 = 100;

// ─── Instantiate ────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.fee_bps > MAX_FEE_BPS {
        return Err(ContractError::InvalidFee {
            fee_bps: msg.fee_bps,
        });
    }
    let config = Config {
        owner: deps.api.addr_validate(&msg.owner)?,
        pet_contract: deps.api.addr_validate(&msg.pet_contract)?,
        denom: msg.denom,
        fee_bps: msg.fee_bps,
        treasury: deps.api.addr_validate(&msg.treasury)?,
        paused: false,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("pet_contract", config.pet_contract.as_str())
        .add_attribute("fee_bps", config.fee_bps.to_string()))
}

// ─── Execute ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::ReceiveNft(receive) => execute_receive_nft(deps, env, info, receive),
        ExecuteMsg::Buy { token_id } => execute_buy(deps, info, token_id),
        ExecuteMsg::CancelListing { token_id } => execute_cancel_listing(deps, info, token_id),
        ExecuteMsg::UpdatePrice { token_id, price } => {
            execute_update_price(deps, info, token_id, price)
        }
        ExecuteMsg::UpdateFee { fee_bps, treasury } => {
            execute_update_fee(deps, info, fee_bps, treasury)
        }
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::ProposeOwner { new_owner } => execute_propose_owner(deps, info, new_owner),
        ExecuteMsg::AcceptOwner {} => execute_accept_owner(deps, info),
        ExecuteMsg::CancelOwnerTransfer {} => execute_cancel_owner_transfer(deps, info),
    }
}

// ─── Listings ───────────────────────────────────────────────────────────────

/// The pet contract has already moved the token to us when this runs.
pub fn execute_receive_nft(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    receive: Cw721ReceiveMsg,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.pet_contract {
        return Err(ContractError::UnknownNftContract {
            expected: config.pet_contract.to_string(),
        });
    }

    let ReceiveMsg::ListPet { price } = from_json::<ReceiveMsg>(&receive.msg)?;
    if price.is_zero() {
        return Err(ContractError::ZeroPrice);
    }

    let seller = deps.api.addr_validate(&receive.sender)?;
    let listing = Listing {
        token_id: receive.token_id,
        seller,
        price,
        listed_at: env.block.time,
    };
    LISTINGS.save(deps.storage, &listing.token_id, &listing)?;
    SELLER_LISTINGS.save(deps.storage, (&listing.seller, &listing.token_id), &true)?;

    Ok(Response::new()
        .add_attribute("action", "list_pet")
        .add_attribute("token_id", &listing.token_id)
        .add_attribute("seller", listing.seller.as_str())
        .add_attribute("price", listing.price.to_string()))
}

pub fn execute_buy(
    deps: DepsMut,
    info: MessageInfo,
    token_id: String,
) -> Result<Response, ContractError> {
    assert_not_paused(deps.as_ref())?;

    let config = CONFIG.load(deps.storage)?;
    let listing = load_listing(deps.as_ref(), &token_id)?;
    if listing.seller == info.sender {
        return Err(ContractError::CannotBuyOwnListing);
    }
    validate_exact_funds(&info, &config.denom, listing.price)?;

    LISTINGS.remove(deps.storage, &token_id);
    SELLER_LISTINGS.remove(deps.storage, (&listing.seller, &token_id));

    let fee = fee_for(listing.price, config.fee_bps)?;
    let proceeds = listing.price - fee;

    let mut resp = Response::new().add_message(transfer_pet(
        &config.pet_contract,
        &token_id,
        &info.sender,
    )?);
    if !proceeds.is_zero() {
        resp = resp.add_message(BankMsg::Send {
            to_address: listing.seller.to_string(),
            amount: vec![Coin {
                denom: config.denom.clone(),
                amount: proceeds,
            }],
        });
    }
    if !fee.is_zero() {
        resp = resp.add_message(BankMsg::Send {
            to_address: config.treasury.to_string(),
            amount: vec![Coin {
                denom: config.denom,
                amount: fee,
            }],
        });
    }

    Ok(resp
        .add_attribute("action", "buy")
        .add_attribute("token_id", token_id)
        .add_attribute("buyer", info.sender.as_str())
        .add_attribute("seller", listing.seller.as_str())
        .add_attribute("price", listing.price.to_string())
        .add_attribute("fee", fee.to_string()))
}

/// Cancelling stays available while paused so sellers can recover their pets.
pub fn execute_cancel_listing(
    deps: DepsMut,
    info: MessageInfo,
    token_id: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;

    let listing = load_own_listing(deps.as_ref(), &token_id, &info.sender)?;
    let config = CONFIG.load(deps.storage)?;
    LISTINGS.remove(deps.storage, &token_id);
    SELLER_LISTINGS.remove(deps.storage, (&listing.seller, &token_id));

    Ok(Response::new()
        .add_message(transfer_pet(&config.pet_contract, &token_id, &listing.seller)?)
        .add_attribute("action", "cancel_listing")
        .add_attribute("token_id", token_id)
        .add_attribute("seller", listing.seller.as_str()))
}

pub fn execute_update_price(
    deps: DepsMut,
    info: MessageInfo,
    token_id: String,
    price: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;
    if price.is_zero() {
        return Err(ContractError::ZeroPrice);
    }

    let mut listing = load_own_listing(deps.as_ref(), &token_id, &info.sender)?;
    listing.price = price;
    LISTINGS.save(deps.storage, &token_id, &listing)?;

    Ok(Response::new()
        .add_attribute("action", "update_price")
        .add_attribute("token_id", token_id)
        .add_attribute("price", price.to_string()))
}

// ─── Admin ──────────────────────────────────────────────────────────────────

pub fn execute_update_fee(
    deps: DepsMut,
    info: MessageInfo,
    fee_bps: u16,
    treasury: Option<String>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    if fee_bps > MAX_FEE_BPS {
        return Err(ContractError::InvalidFee { fee_bps });
    }

    let mut config = CONFIG.load(deps.storage)?;
    config.fee_bps = fee_bps;
    if let Some(treasury) = treasury {
        config.treasury = deps.api.addr_validate(&treasury)?;
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_fee")
        .add_attribute("fee_bps", fee_bps.to_string())
        .add_attribute("treasury", config.treasury.as_str()))
}

pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    assert_not_paused(deps.as_ref())?;

    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.paused = true;
        Ok(c)
    })?;

    Ok(Response::new().add_attribute("action", "pause"))
}

pub fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    if !config.paused {
        return Err(ContractError::NotPaused);
    }
    config.paused = false;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "unpause"))
}

pub fn execute_propose_owner(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    if PENDING_OWNER.may_load(deps.storage)?.is_some() {
        return Err(ContractError::OwnerTransferAlreadyPending);
    }
    let proposed = deps.api.addr_validate(&new_owner)?;
    PENDING_OWNER.save(
        deps.storage,
        &PendingOwnerTransfer {
            proposed_owner: proposed.clone(),
        },
    )?;
    Ok(Response::new()
        .add_attribute("action", "propose_owner")
        .add_attribute("proposed_owner", proposed.as_str()))
}

pub fn execute_accept_owner(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let pending = PENDING_OWNER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoOwnerTransferPending)?;
    if info.sender != pending.proposed_owner {
        return Err(ContractError::NotPendingOwner);
    }
    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.owner = pending.proposed_owner.clone();
        Ok(c)
    })?;
    PENDING_OWNER.remove(deps.storage);
    Ok(Response::new()
        .add_attribute("action", "accept_owner")
        .add_attribute("new_owner", pending.proposed_owner.as_str()))
}

pub fn execute_cancel_owner_transfer(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    if PENDING_OWNER.may_load(deps.storage)?.is_none() {
        return Err(ContractError::NoOwnerTransferPending);
    }
    PENDING_OWNER.remove(deps.storage);
    Ok(Response::new().add_attribute("action", "cancel_owner_transfer"))
}

// ─── Queries ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Listing { token_id } => {
            to_json_binary(&LISTINGS.may_load(deps.storage, &token_id)?)
        }
        QueryMsg::Listings { start_after, limit } => query_listings(deps, start_after, limit),
        QueryMsg::ListingsBySeller {
            seller,
            start_after,
            limit,
        } => query_listings_by_seller(deps, seller, start_after, limit),
        QueryMsg::PendingOwner {} => to_json_binary(&PENDING_OWNER.may_load(deps.storage)?),
    }
}

fn query_listings(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let listings: Vec<Listing> = LISTINGS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, listing)| listing))
        .collect::<StdResult<_>>()?;

    to_json_binary(&ListingsResponse { listings })
}

fn query_listings_by_seller(
    deps: Deps,
    seller: String,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let seller_addr = deps.api.addr_validate(&seller)?;
    let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let listings: Vec<Listing> = SELLER_LISTINGS
        .prefix(&seller_addr)
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|token_id| LISTINGS.load(deps.storage, &token_id?))
        .collect::<StdResult<_>>()?;

    to_json_binary(&ListingsResponse { listings })
}

// ─── Migrate ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
