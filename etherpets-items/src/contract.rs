use cosmwasm_std::{
    entry_point, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response,
    StdResult, Storage, Timestamp, WasmMsg,
};
use cw2::set_contract_version;
use cw721::receiver::Cw721ReceiveMsg;
use cw_storage_plus::Bound;
use etherpets_pet_nft::msg::{ExecuteMsg as PetExecuteMsg, ReceiverExecuteMsg};
use etherpets_pet_nft::stats::ItemKind;

use crate::error::ContractError;
use crate::helpers::{
    assert_minter, assert_not_paused, assert_owner, load_authorized, load_item, reject_funds,
    remove_item, validate_royalty_bps, MAX_BATCH_MINT,
};
use crate::msg::*;
use crate::state::*;

const CONTRACT_NAME: &str = "crates.io:etherpets-items";
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
    validate_royalty_bps(msg.royalty_bps)?;

    let config = Config {
        owner: deps.api.addr_validate(&msg.owner)?,
        minter: deps.api.addr_validate(&msg.minter)?,
        pet_contract: msg
            .pet_contract
            .map(|addr| deps.api.addr_validate(&addr))
            .transpose()?,
        paused: false,
        royalty_bps: msg.royalty_bps,
        royalty_recipient: deps.api.addr_validate(&msg.royalty_recipient)?,
        name: msg.name,
        symbol: msg.symbol,
    };
    CONFIG.save(deps.storage, &config)?;
    TOKEN_COUNT.save(deps.storage, &0u64)?;
    NEXT_TOKEN_ID.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("owner", config.owner.as_str())
        .add_attribute("minter", config.minter.as_str()))
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
        ExecuteMsg::Mint {
            to,
            kind,
            token_uri,
        } => execute_mint(deps, env, info, to, kind, token_uri),
        ExecuteMsg::BatchMint { mints } => execute_batch_mint(deps, env, info, mints),
        ExecuteMsg::UseItem { item_id, pet_id } => execute_use_item(deps, info, item_id, pet_id),
        ExecuteMsg::TransferNft {
            recipient,
            token_id,
        } => execute_transfer_nft(deps, info, recipient, token_id),
        ExecuteMsg::SendNft {
            contract,
            token_id,
            msg,
        } => execute_send_nft(deps, info, contract, token_id, msg),
        ExecuteMsg::Approve { spender, token_id } => {
            execute_approve(deps, info, spender, token_id)
        }
        ExecuteMsg::Revoke { token_id } => execute_revoke(deps, info, token_id),
        ExecuteMsg::ApproveAll { operator } => execute_approve_all(deps, info, operator),
        ExecuteMsg::RevokeAll { operator } => execute_revoke_all(deps, info, operator),
        ExecuteMsg::Burn { token_id } => execute_burn(deps, info, token_id),
        ExecuteMsg::ProposeMinter { new_minter } => {
            execute_propose_minter(deps, info, new_minter)
        }
        ExecuteMsg::AcceptMinter {} => execute_accept_minter(deps, info),
        ExecuteMsg::CancelMinterTransfer {} => execute_cancel_minter_transfer(deps, info),
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::UpdateRoyalty {
            royalty_bps,
            royalty_recipient,
        } => execute_update_royalty(deps, info, royalty_bps, royalty_recipient),
        ExecuteMsg::SetPetContract { pet_contract } => {
            execute_set_pet_contract(deps, info, pet_contract)
        }
        ExecuteMsg::ProposeOwner { new_owner } => execute_propose_owner(deps, info, new_owner),
        ExecuteMsg::AcceptOwner {} => execute_accept_owner(deps, info),
        ExecuteMsg::CancelOwnerTransfer {} => execute_cancel_owner_transfer(deps, info),
    }
}

// ─── Execute: Minting ───────────────────────────────────────────────────────

pub fn execute_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    to: String,
    kind: ItemKind,
    token_uri: Option<String>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;
    assert_minter(deps.as_ref(), &info.sender)?;

    let recipient = deps.api.addr_validate(&to)?;
    let token_id = mint_single(deps.storage, env.block.time, &recipient, kind, token_uri)?;

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("token_id", &token_id)
        .add_attribute("to", recipient.as_str())
        .add_attribute("kind", kind.category()))
}

pub fn execute_batch_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    mints: Vec<MintRequest>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;
    assert_minter(deps.as_ref(), &info.sender)?;

    if mints.is_empty() {
        return Err(ContractError::EmptyBatch);
    }
    if mints.len() > MAX_BATCH_MINT as usize {
        return Err(ContractError::BatchTooLarge {
            max: MAX_BATCH_MINT,
        });
    }

    // Validate every recipient before the first write
    let recipients = mints
        .iter()
        .map(|m| deps.api.addr_validate(&m.to))
        .collect::<StdResult<Vec<Addr>>>()?;

    let mut token_ids = Vec::with_capacity(mints.len());
    for (mint, recipient) in mints.into_iter().zip(recipients) {
        token_ids.push(mint_single(
            deps.storage,
            env.block.time,
            &recipient,
            mint.kind,
            mint.token_uri,
        )?);
    }

    Ok(Response::new()
        .add_attribute("action", "batch_mint")
        .add_attribute("count", token_ids.len().to_string())
        .add_attribute("token_ids", token_ids.join(",")))
}

fn mint_single(
    storage: &mut dyn Storage,
    now: Timestamp,
    recipient: &Addr,
    kind: ItemKind,
    token_uri: Option<String>,
) -> StdResult<String> {
    let next_id = NEXT_TOKEN_ID.load(storage)? + 1;
    let token_id = next_id.to_string();

    let item = ItemData {
        owner: recipient.clone(),
        kind,
        token_uri,
        minted_at: now,
    };
    TOKENS.save(storage, &token_id, &item)?;
    OWNER_TOKENS.save(storage, (recipient, &token_id), &true)?;
    NEXT_TOKEN_ID.save(storage, &next_id)?;
    TOKEN_COUNT.update(storage, |count| -> StdResult<_> { Ok(count + 1) })?;

    Ok(token_id)
}

// ─── Execute: Use ───────────────────────────────────────────────────────────

/// Burn the item, then ask the pet contract to apply it on behalf of the sender.
pub fn execute_use_item(
    deps: DepsMut,
    info: MessageInfo,
    item_id: String,
    pet_id: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    let config = CONFIG.load(deps.storage)?;
    let pet_contract = config.pet_contract.ok_or(ContractError::PetContractNotSet)?;
    let item = load_authorized(deps.as_ref(), &item_id, &info.sender)?;
    remove_item(deps.storage, &item_id, &item)?;

    let apply = PetExecuteMsg::UseItem {
        player: info.sender.to_string(),
        token_id: pet_id.clone(),
        item: item.kind,
    };
    let msg = WasmMsg::Execute {
        contract_addr: pet_contract.to_string(),
        msg: to_json_binary(&apply)?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(msg)
        .add_attribute("action", "use_item")
        .add_attribute("item_id", &item_id)
        .add_attribute("kind", item.kind.category())
        .add_attribute("pet_id", &pet_id)
        .add_attribute("player", info.sender.as_str()))
}

// ─── Execute: Transfers ─────────────────────────────────────────────────────

fn move_item(
    storage: &mut dyn Storage,
    token_id: &str,
    mut item: ItemData,
    new_owner: &Addr,
) -> StdResult<Addr> {
    let old_owner = item.owner.clone();
    OWNER_TOKENS.remove(storage, (&old_owner, token_id));
    OWNER_TOKENS.save(storage, (new_owner, token_id), &true)?;
    item.owner = new_owner.clone();
    TOKENS.save(storage, token_id, &item)?;
    TOKEN_APPROVALS.remove(storage, token_id);
    Ok(old_owner)
}

pub fn execute_transfer_nft(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    token_id: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    let item = load_authorized(deps.as_ref(), &token_id, &info.sender)?;
    let new_owner = deps.api.addr_validate(&recipient)?;
    let old_owner = move_item(deps.storage, &token_id, item, &new_owner)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_nft")
        .add_attribute("token_id", &token_id)
        .add_attribute("from", old_owner.as_str())
        .add_attribute("to", new_owner.as_str()))
}

pub fn execute_send_nft(
    deps: DepsMut,
    info: MessageInfo,
    contract: String,
    token_id: String,
    msg: Binary,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    let item = load_authorized(deps.as_ref(), &token_id, &info.sender)?;
    let contract_addr = deps.api.addr_validate(&contract)?;
    let old_owner = move_item(deps.storage, &token_id, item, &contract_addr)?;

    let callback = ReceiverExecuteMsg::ReceiveNft(Cw721ReceiveMsg {
        sender: info.sender.to_string(),
        token_id: token_id.clone(),
        msg,
    });
    let callback_msg = WasmMsg::Execute {
        contract_addr: contract_addr.to_string(),
        msg: to_json_binary(&callback)?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(callback_msg)
        .add_attribute("action", "send_nft")
        .add_attribute("token_id", &token_id)
        .add_attribute("from", old_owner.as_str())
        .add_attribute("to", contract_addr.as_str()))
}

pub fn execute_burn(
    deps: DepsMut,
    info: MessageInfo,
    token_id: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    let item = load_item(deps.as_ref(), &token_id)?;
    if info.sender != item.owner {
        return Err(ContractError::Unauthorized {
            role: "token owner".to_string(),
        });
    }
    remove_item(deps.storage, &token_id, &item)?;

    Ok(Response::new()
        .add_attribute("action", "burn")
        .add_attribute("token_id", &token_id))
}

// ─── Execute: Approvals ─────────────────────────────────────────────────────

pub fn execute_approve(
    deps: DepsMut,
    info: MessageInfo,
    spender: String,
    token_id: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    let item = load_item(deps.as_ref(), &token_id)?;
    if info.sender != item.owner {
        return Err(ContractError::Unauthorized {
            role: "token owner".to_string(),
        });
    }
    let spender_addr = deps.api.addr_validate(&spender)?;
    TOKEN_APPROVALS.save(deps.storage, &token_id, &spender_addr)?;

    Ok(Response::new()
        .add_attribute("action", "approve")
        .add_attribute("token_id", &token_id)
        .add_attribute("spender", spender_addr.as_str()))
}

pub fn execute_revoke(
    deps: DepsMut,
    info: MessageInfo,
    token_id: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let item = load_item(deps.as_ref(), &token_id)?;
    if info.sender != item.owner {
        return Err(ContractError::Unauthorized {
            role: "token owner".to_string(),
        });
    }
    TOKEN_APPROVALS.remove(deps.storage, &token_id);

    Ok(Response::new()
        .add_attribute("action", "revoke")
        .add_attribute("token_id", &token_id))
}

pub fn execute_approve_all(
    deps: DepsMut,
    info: MessageInfo,
    operator: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    let operator_addr = deps.api.addr_validate(&operator)?;
    OPERATOR_APPROVALS.save(deps.storage, (&info.sender, &operator_addr), &true)?;

    Ok(Response::new()
        .add_attribute("action", "approve_all")
        .add_attribute("owner", info.sender.as_str())
        .add_attribute("operator", operator_addr.as_str()))
}

pub fn execute_revoke_all(
    deps: DepsMut,
    info: MessageInfo,
    operator: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let operator_addr = deps.api.addr_validate(&operator)?;
    OPERATOR_APPROVALS.remove(deps.storage, (&info.sender, &operator_addr));

    Ok(Response::new()
        .add_attribute("action", "revoke_all")
        .add_attribute("owner", info.sender.as_str())
        .add_attribute("operator", operator_addr.as_str()))
}

// ─── Execute: Admin ─────────────────────────────────────────────────────────

pub fn execute_propose_minter(
    deps: DepsMut,
    info: MessageInfo,
    new_minter: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    if PENDING_MINTER.may_load(deps.storage)?.is_some() {
        return Err(ContractError::MinterTransferAlreadyPending);
    }

    let proposed = deps.api.addr_validate(&new_minter)?;
    PENDING_MINTER.save(
        deps.storage,
        &PendingMinterTransfer {
            proposed_minter: proposed.clone(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "propose_minter")
        .add_attribute("proposed_minter", proposed.as_str()))
}

pub fn execute_accept_minter(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let pending = PENDING_MINTER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoMinterTransferPending)?;
    if info.sender != pending.proposed_minter {
        return Err(ContractError::NotPendingMinter);
    }

    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.minter = pending.proposed_minter.clone();
        Ok(c)
    })?;
    PENDING_MINTER.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("action", "accept_minter")
        .add_attribute("new_minter", pending.proposed_minter.as_str()))
}

pub fn execute_cancel_minter_transfer(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    if PENDING_MINTER.may_load(deps.storage)?.is_none() {
        return Err(ContractError::NoMinterTransferPending);
    }
    PENDING_MINTER.remove(deps.storage);
    Ok(Response::new().add_attribute("action", "cancel_minter_transfer"))
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

    let config = CONFIG.load(deps.storage)?;
    if !config.paused {
        return Err(ContractError::NotPaused);
    }
    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.paused = false;
        Ok(c)
    })?;

    Ok(Response::new().add_attribute("action", "unpause"))
}

pub fn execute_update_royalty(
    deps: DepsMut,
    info: MessageInfo,
    royalty_bps: u16,
    royalty_recipient: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    validate_royalty_bps(royalty_bps)?;

    let recipient = deps.api.addr_validate(&royalty_recipient)?;
    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.royalty_bps = royalty_bps;
        c.royalty_recipient = recipient.clone();
        Ok(c)
    })?;

    Ok(Response::new()
        .add_attribute("action", "update_royalty")
        .add_attribute("royalty_bps", royalty_bps.to_string())
        .add_attribute("royalty_recipient", recipient.as_str()))
}

pub fn execute_set_pet_contract(
    deps: DepsMut,
    info: MessageInfo,
    pet_contract: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    let linked = if pet_contract.is_empty() {
        None
    } else {
        Some(deps.api.addr_validate(&pet_contract)?)
    };
    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.pet_contract = linked.clone();
        Ok(c)
    })?;

    Ok(Response::new()
        .add_attribute("action", "set_pet_contract")
        .add_attribute(
            "pet_contract",
            linked.map(|a| a.to_string()).unwrap_or_default(),
        ))
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
        QueryMsg::NftInfo { token_id } => query_nft_info(deps, token_id),
        QueryMsg::OwnerOf { token_id } => query_owner_of(deps, token_id),
        QueryMsg::Tokens {
            owner,
            start_after,
            limit,
        } => query_tokens(deps, owner, start_after, limit),
        QueryMsg::AllTokens { start_after, limit } => query_all_tokens(deps, start_after, limit),
        QueryMsg::NumTokens {} => to_json_binary(&NumTokensResponse {
            count: TOKEN_COUNT.load(deps.storage)?,
        }),
        QueryMsg::RoyaltyInfo {} => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&RoyaltyInfoResponse {
                royalty_bps: config.royalty_bps,
                royalty_recipient: config.royalty_recipient.to_string(),
            })
        }
        QueryMsg::Approval { token_id, spender } => query_approval(deps, token_id, spender),
        QueryMsg::Operator { owner, operator } => query_operator(deps, owner, operator),
        QueryMsg::CollectionInfo {} => {
            let config = CONFIG.load(deps.storage)?;
            to_json_binary(&CollectionInfoResponse {
                name: config.name,
                symbol: config.symbol,
            })
        }
        QueryMsg::PendingMinter {} => to_json_binary(&PENDING_MINTER.may_load(deps.storage)?),
        QueryMsg::PendingOwner {} => to_json_binary(&PENDING_OWNER.may_load(deps.storage)?),
    }
}

fn query_nft_info(deps: Deps, token_id: String) -> StdResult<Binary> {
    let item = TOKENS.load(deps.storage, &token_id)?;
    let approval = TOKEN_APPROVALS
        .may_load(deps.storage, &token_id)?
        .map(|a| a.to_string());

    to_json_binary(&NftInfoResponse {
        token_id,
        owner: item.owner.to_string(),
        kind: item.kind,
        token_uri: item.token_uri,
        approval,
    })
}

fn query_owner_of(deps: Deps, token_id: String) -> StdResult<Binary> {
    let item = TOKENS.load(deps.storage, &token_id)?;
    let approvals = TOKEN_APPROVALS
        .may_load(deps.storage, &token_id)?
        .map(|a| a.to_string())
        .into_iter()
        .collect();

    to_json_binary(&OwnerOfResponse {
        owner: item.owner.to_string(),
        approvals,
    })
}

fn query_tokens(
    deps: Deps,
    owner: String,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let owner_addr = deps.api.addr_validate(&owner)?;
    let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let tokens: Vec<String> = OWNER_TOKENS
        .prefix(&owner_addr)
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .collect::<StdResult<_>>()?;

    to_json_binary(&TokensResponse { tokens })
}

fn query_all_tokens(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let tokens: Vec<String> = TOKENS
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .collect::<StdResult<_>>()?;

    to_json_binary(&TokensResponse { tokens })
}

fn query_approval(deps: Deps, token_id: String, spender: String) -> StdResult<Binary> {
    let spender_addr = deps.api.addr_validate(&spender)?;
    let approved = TOKEN_APPROVALS
        .may_load(deps.storage, &token_id)?
        .map(|a| a == spender_addr)
        .unwrap_or(false);

    to_json_binary(&ApprovalResponse { approved })
}

fn query_operator(deps: Deps, owner: String, operator: String) -> StdResult<Binary> {
    let owner_addr = deps.api.addr_validate(&owner)?;
    let operator_addr = deps.api.addr_validate(&operator)?;
    let approved = OPERATOR_APPROVALS
        .may_load(deps.storage, (&owner_addr, &operator_addr))?
        .unwrap_or(false);

    to_json_binary(&OperatorResponse { approved })
}

// ─── Migrate ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
