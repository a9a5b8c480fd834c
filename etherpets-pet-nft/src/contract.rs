use cosmwasm_std::{
    entry_point, to_json_binary, Addr, BankMsg, Binary, Coin, Deps, DepsMut, Env, MessageInfo,
    Order, Reply, Response, StdError, StdResult, Storage, SubMsg, SubMsgResult, Timestamp,
    Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw721::receiver::Cw721ReceiveMsg;
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::helpers::{
    assert_minter, assert_not_paused, assert_owner, load_authorized, load_token, load_user,
    reject_funds, validate_exact_funds,
};
use crate::msg::*;
use crate::state::*;
use crate::stats::{
    decayed, level_for_experience, perform, xp_for_level, FoodType, GameType, ItemKind,
    PetAction, TrainingType,
};
use crate::validation::{normalize, Validator};

const CONTRACT_NAME: &str = "crates.io:etherpets-pet-nft";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_QUERY_LIMIT: u32 = 30;
const MAX_QUERY_LIMIT: u32 = 100;

pub const QUEST_HOOK_REPLY_ID: u64 = 1;

// ─── Instantiate ────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;
    let minter = deps.api.addr_validate(&msg.minter)?;
    let quest_contract = msg
        .quest_contract
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let item_contract = msg
        .item_contract
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;

    let config = Config {
        owner,
        minter,
        paused: false,
        name: msg.name,
        symbol: msg.symbol,
        decay: msg.decay.unwrap_or_default(),
        denom: msg.denom,
        adoption_fee: msg.adoption_fee.filter(|fee| !fee.is_zero()),
        quest_contract,
        item_contract,
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
        ExecuteMsg::RegisterUser {
            wallet_address,
            username,
        } => execute_register_user(deps, env, info, wallet_address, username),
        ExecuteMsg::UpdateUsername { username } => execute_update_username(deps, info, username),
        ExecuteMsg::Adopt {
            name,
            species,
            token_uri,
        } => execute_adopt(deps, env, info, name, species, token_uri),
        ExecuteMsg::Mint {
            to,
            name,
            species,
            token_uri,
        } => execute_mint(deps, env, info, to, name, species, token_uri),
        ExecuteMsg::RenamePet { token_id, name } => execute_rename_pet(deps, info, token_id, name),
        ExecuteMsg::Feed {
            token_id,
            food_type,
        } => execute_feed(deps, env, info, token_id, food_type),
        ExecuteMsg::Play {
            token_id,
            game_type,
        } => execute_play(deps, env, info, token_id, game_type),
        ExecuteMsg::Train {
            token_id,
            training_type,
        } => execute_train(deps, env, info, token_id, training_type),
        ExecuteMsg::Rest { token_id } => execute_rest(deps, env, info, token_id),
        ExecuteMsg::Meditate { token_id, duration } => {
            execute_ritual(deps, env, info, token_id, duration, PetAction::Meditate)
        }
        ExecuteMsg::Breathe { token_id, duration } => {
            execute_ritual(deps, env, info, token_id, duration, PetAction::Breathe)
        }
        ExecuteMsg::Reflect { token_id, duration } => {
            execute_ritual(deps, env, info, token_id, duration, PetAction::Reflect)
        }
        ExecuteMsg::UseItem {
            player,
            token_id,
            item,
        } => execute_use_item(deps, env, info, player, token_id, item),
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
        ExecuteMsg::UpdateConfig {
            decay,
            adoption_fee,
            quest_contract,
            item_contract,
        } => execute_update_config(deps, info, decay, adoption_fee, quest_contract, item_contract),
        ExecuteMsg::WithdrawFees { amount, recipient } => {
            execute_withdraw_fees(deps, info, amount, recipient)
        }
        ExecuteMsg::ProposeOwner { new_owner } => execute_propose_owner(deps, info, new_owner),
        ExecuteMsg::AcceptOwner {} => execute_accept_owner(deps, info),
        ExecuteMsg::CancelOwnerTransfer {} => execute_cancel_owner_transfer(deps, info),
    }
}

// ─── Execute: Users ─────────────────────────────────────────────────────────

pub fn execute_register_user(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    wallet_address: String,
    username: Option<String>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    if USERS.has(deps.storage, &info.sender) {
        return Err(ContractError::AlreadyRegistered {
            address: info.sender.to_string(),
        });
    }

    let mut validator = Validator::new();
    validator.wallet_address("wallet_address", &wallet_address);
    if let Some(name) = &username {
        validator.username("username", name);
    }
    validator.finish()?;

    let wallet_key = normalize(&wallet_address);
    if WALLET_INDEX.has(deps.storage, &wallet_key) {
        return Err(ContractError::WalletTaken { wallet_address });
    }
    if let Some(name) = &username {
        claim_username(deps.storage, name, &info.sender)?;
    }

    let profile = UserProfile {
        address: info.sender.clone(),
        wallet_address: wallet_key.clone(),
        username: username.clone(),
        registered_at: env.block.time,
    };
    USERS.save(deps.storage, &info.sender, &profile)?;
    WALLET_INDEX.save(deps.storage, &wallet_key, &info.sender)?;

    Ok(Response::new()
        .add_attribute("action", "register_user")
        .add_attribute("address", info.sender.as_str())
        .add_attribute("wallet_address", wallet_key)
        .add_attribute("username", username.unwrap_or_default()))
}

pub fn execute_update_username(
    deps: DepsMut,
    info: MessageInfo,
    username: Option<String>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    let mut profile = load_user(deps.as_ref(), &info.sender)?;
    if let Some(name) = &username {
        Validator::new().username("username", name).finish()?;
    }

    if let Some(name) = &username {
        claim_username(deps.storage, name, &info.sender)?;
    }
    if let Some(old) = &profile.username {
        let old_key = normalize(old);
        if username.as_deref().map(normalize) != Some(old_key.clone()) {
            USERNAME_INDEX.remove(deps.storage, &old_key);
        }
    }

    profile.username = username.clone();
    USERS.save(deps.storage, &info.sender, &profile)?;

    Ok(Response::new()
        .add_attribute("action", "update_username")
        .add_attribute("address", info.sender.as_str())
        .add_attribute("username", username.unwrap_or_default()))
}

fn claim_username(
    storage: &mut dyn Storage,
    username: &str,
    account: &Addr,
) -> Result<(), ContractError> {
    let key = normalize(username);
    if let Some(holder) = USERNAME_INDEX.may_load(storage, &key)? {
        if holder != *account {
            return Err(ContractError::UsernameTaken {
                username: username.to_string(),
            });
        }
    }
    USERNAME_INDEX.save(storage, &key, account)?;
    Ok(())
}

// ─── Execute: Minting ───────────────────────────────────────────────────────

pub fn execute_adopt(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    name: String,
    species: String,
    token_uri: Option<String>,
) -> Result<Response, ContractError> {
    assert_not_paused(deps.as_ref())?;
    load_user(deps.as_ref(), &info.sender)?;

    let config = CONFIG.load(deps.storage)?;
    match config.adoption_fee {
        Some(fee) => validate_exact_funds(&info, &config.denom, fee)?,
        None => reject_funds(&info)?,
    }

    let token_id = mint_single(deps, env.block.time, &info.sender, name.clone(), species, token_uri)?;

    Ok(Response::new()
        .add_attribute("action", "adopt")
        .add_attribute("token_id", &token_id)
        .add_attribute("owner", info.sender.as_str())
        .add_attribute("name", name))
}

pub fn execute_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    to: String,
    name: String,
    species: String,
    token_uri: Option<String>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;
    assert_minter(deps.as_ref(), &info.sender)?;

    let recipient = deps.api.addr_validate(&to)?;
    let token_id = mint_single(deps, env.block.time, &recipient, name.clone(), species, token_uri)?;

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("token_id", &token_id)
        .add_attribute("to", recipient.as_str())
        .add_attribute("name", name))
}

fn mint_single(
    deps: DepsMut,
    now: Timestamp,
    recipient: &Addr,
    name: String,
    species: String,
    token_uri: Option<String>,
) -> Result<String, ContractError> {
    Validator::new()
        .pet_name("name", &name)
        .species("species", &species)
        .finish()?;

    let next_id = NEXT_TOKEN_ID.load(deps.storage)? + 1;
    let token_id = next_id.to_string();

    let data = TokenData {
        owner: recipient.clone(),
        pet: Pet {
            name,
            species,
            stats: PetStats::full(),
            experience: 0,
            level: level_for_experience(0),
            born_at: now,
            last_decay: now,
        },
        token_uri,
    };

    TOKENS.save(deps.storage, &token_id, &data)?;
    OWNER_TOKENS.save(deps.storage, (recipient, &token_id), &true)?;
    NEXT_TOKEN_ID.save(deps.storage, &next_id)?;
    TOKEN_COUNT.update(deps.storage, |count| -> StdResult<_> { Ok(count + 1) })?;

    Ok(token_id)
}

pub fn execute_rename_pet(
    deps: DepsMut,
    info: MessageInfo,
    token_id: String,
    name: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    let mut token = load_token(deps.as_ref(), &token_id)?;
    if info.sender != token.owner {
        return Err(ContractError::Unauthorized {
            role: "token owner".to_string(),
        });
    }
    Validator::new().pet_name("name", &name).finish()?;

    token.pet.name = name.clone();
    TOKENS.save(deps.storage, &token_id, &token)?;

    Ok(Response::new()
        .add_attribute("action", "rename_pet")
        .add_attribute("token_id", &token_id)
        .add_attribute("name", name))
}

// ─── Execute: Activities ────────────────────────────────────────────────────

pub fn execute_feed(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: String,
    food_type: FoodType,
) -> Result<Response, ContractError> {
    run_activity(deps, env, info, token_id, PetAction::Feed(food_type))
}

pub fn execute_play(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: String,
    game_type: GameType,
) -> Result<Response, ContractError> {
    run_activity(deps, env, info, token_id, PetAction::Play(game_type))
}

pub fn execute_train(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: String,
    training_type: TrainingType,
) -> Result<Response, ContractError> {
    run_activity(deps, env, info, token_id, PetAction::Train(training_type))
}

pub fn execute_rest(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: String,
) -> Result<Response, ContractError> {
    run_activity(deps, env, info, token_id, PetAction::Rest)
}

/// Meditate, Breathe or Reflect. The duration is checked before anything runs.
pub fn execute_ritual(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: String,
    duration: u32,
    ritual: fn(u32) -> PetAction,
) -> Result<Response, ContractError> {
    Validator::new().duration("duration", duration).finish()?;
    run_activity(deps, env, info, token_id, ritual(duration))
}

/// The item contract has already burned the item. Any error here reverts that burn.
pub fn execute_use_item(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    player: String,
    token_id: String,
    item: ItemKind,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    let config = CONFIG.load(deps.storage)?;
    if config.item_contract.as_ref() != Some(&info.sender) {
        return Err(ContractError::Unauthorized {
            role: "item contract".to_string(),
        });
    }

    let player = deps.api.addr_validate(&player)?;
    let resp = apply_activity(deps, env, &player, token_id, item.action())?;
    Ok(resp.add_attribute("item", item.category()))
}

fn run_activity(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token_id: String,
    action: PetAction,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    apply_activity(deps, env, &info.sender, token_id, action)
}

/// Decay, apply the activity delta, then notify the quest contract if one is set.
fn apply_activity(
    deps: DepsMut,
    env: Env,
    actor: &Addr,
    token_id: String,
    action: PetAction,
) -> Result<Response, ContractError> {
    assert_not_paused(deps.as_ref())?;

    let mut token = load_authorized(deps.as_ref(), &token_id, actor)?;
    let config = CONFIG.load(deps.storage)?;

    let outcome = perform(&token.pet, action, &config.decay, env.block.time)?;
    token.pet = outcome.pet.clone();
    TOKENS.save(deps.storage, &token_id, &token)?;

    let activity = action.activity();
    let stats = token.pet.stats;
    let mut resp = Response::new()
        .add_attribute("action", activity.as_str())
        .add_attribute("token_id", &token_id)
        .add_attribute("energy", stats.energy.to_string())
        .add_attribute("hunger", stats.hunger.to_string())
        .add_attribute("happiness", stats.happiness.to_string())
        .add_attribute("experience", token.pet.experience.to_string())
        .add_attribute("level", token.pet.level.to_string());
    if outcome.leveled_up() {
        resp = resp.add_attribute("level_up", token.pet.level.to_string());
    }

    if let Some(quest_contract) = config.quest_contract {
        let hook = QuestHookMsg::RecordActivity {
            player: token.owner.to_string(),
            activity,
            amount: 1,
        };
        let msg = WasmMsg::Execute {
            contract_addr: quest_contract.to_string(),
            msg: to_json_binary(&hook)?,
            funds: vec![],
        };
        resp = resp.add_submessage(SubMsg::reply_on_error(msg, QUEST_HOOK_REPLY_ID));
    }

    Ok(resp)
}

// ─── Execute: Transfers ─────────────────────────────────────────────────────

fn move_token(
    storage: &mut dyn Storage,
    token_id: &str,
    mut token: TokenData,
    new_owner: &Addr,
) -> StdResult<Addr> {
    let old_owner = token.owner.clone();
    OWNER_TOKENS.remove(storage, (&old_owner, token_id));
    OWNER_TOKENS.save(storage, (new_owner, token_id), &true)?;
    token.owner = new_owner.clone();
    TOKENS.save(storage, token_id, &token)?;
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

    let token = load_authorized(deps.as_ref(), &token_id, &info.sender)?;
    let new_owner = deps.api.addr_validate(&recipient)?;
    let old_owner = move_token(deps.storage, &token_id, token, &new_owner)?;

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

    let token = load_authorized(deps.as_ref(), &token_id, &info.sender)?;
    let contract_addr = deps.api.addr_validate(&contract)?;
    // State mutation before the callback is dispatched
    let old_owner = move_token(deps.storage, &token_id, token, &contract_addr)?;

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

// ─── Execute: Approvals ─────────────────────────────────────────────────────

pub fn execute_approve(
    deps: DepsMut,
    info: MessageInfo,
    spender: String,
    token_id: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    let token = load_token(deps.as_ref(), &token_id)?;
    if info.sender != token.owner {
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
    let token = load_token(deps.as_ref(), &token_id)?;
    if info.sender != token.owner {
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

pub fn execute_burn(
    deps: DepsMut,
    info: MessageInfo,
    token_id: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    let token = load_token(deps.as_ref(), &token_id)?;
    if info.sender != token.owner {
        return Err(ContractError::Unauthorized {
            role: "token owner".to_string(),
        });
    }

    OWNER_TOKENS.remove(deps.storage, (&token.owner, &token_id));
    TOKENS.remove(deps.storage, &token_id);
    TOKEN_APPROVALS.remove(deps.storage, &token_id);
    TOKEN_COUNT.update(deps.storage, |count| -> StdResult<_> {
        Ok(count.saturating_sub(1))
    })?;

    Ok(Response::new()
        .add_attribute("action", "burn")
        .add_attribute("token_id", &token_id))
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

pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    decay: Option<DecayRates>,
    adoption_fee: Option<Uint128>,
    quest_contract: Option<String>,
    item_contract: Option<String>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    if let Some(decay) = decay {
        config.decay = decay;
    }
    if let Some(fee) = adoption_fee {
        config.adoption_fee = Some(fee).filter(|f| !f.is_zero());
    }
    if let Some(addr) = quest_contract {
        config.quest_contract = linked_contract(deps.as_ref(), &addr)?;
    }
    if let Some(addr) = item_contract {
        config.item_contract = linked_contract(deps.as_ref(), &addr)?;
    }
    CONFIG.save(deps.storage, &config)?;

    let shown = |addr: Option<Addr>| addr.map(|a| a.to_string()).unwrap_or_default();
    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_attribute("quest_contract", shown(config.quest_contract))
        .add_attribute("item_contract", shown(config.item_contract)))
}

/// An empty address unlinks the contract.
fn linked_contract(deps: Deps, addr: &str) -> StdResult<Option<Addr>> {
    if addr.is_empty() {
        return Ok(None);
    }
    deps.api.addr_validate(addr).map(Some)
}

pub fn execute_withdraw_fees(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
    recipient: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let config = CONFIG.load(deps.storage)?;
    let recipient_addr = deps.api.addr_validate(&recipient)?;
    let msg = BankMsg::Send {
        to_address: recipient_addr.to_string(),
        amount: vec![Coin {
            denom: config.denom,
            amount,
        }],
    };

    Ok(Response::new()
        .add_message(msg)
        .add_attribute("action", "withdraw_fees")
        .add_attribute("amount", amount.to_string())
        .add_attribute("recipient", recipient_addr.as_str()))
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

// ─── Reply ──────────────────────────────────────────────────────────────────

/// A failing quest hook must not undo the activity: record the error and move on.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match (msg.id, msg.result) {
        (QUEST_HOOK_REPLY_ID, SubMsgResult::Err(err)) => Ok(Response::new()
            .add_attribute("action", "quest_hook_failed")
            .add_attribute("quest_hook_error", err)),
        (QUEST_HOOK_REPLY_ID, SubMsgResult::Ok(_)) => Ok(Response::new()),
        (id, _) => Err(StdError::generic_err(format!("unknown reply id {id}")).into()),
    }
}

// ─── Queries ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::User { address } => query_user(deps, address),
        QueryMsg::UserByWallet { wallet_address } => query_user_by_wallet(deps, wallet_address),
        QueryMsg::Pet { token_id } => query_pet(deps, env, token_id),
        QueryMsg::PetsByOwner {
            owner,
            start_after,
            limit,
        } => query_pets_by_owner(deps, env, owner, start_after, limit),
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

fn query_user(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let user = USERS.may_load(deps.storage, &addr)?;
    to_json_binary(&UserResponse { user })
}

fn query_user_by_wallet(deps: Deps, wallet_address: String) -> StdResult<Binary> {
    let user = match WALLET_INDEX.may_load(deps.storage, &normalize(&wallet_address))? {
        Some(addr) => USERS.may_load(deps.storage, &addr)?,
        None => None,
    };
    to_json_binary(&UserResponse { user })
}

/// Pet view at block time; decay is computed, not persisted.
fn pet_response(token_id: String, token: TokenData, rates: &DecayRates, now: Timestamp) -> PetResponse {
    let (stats, _) = decayed(&token.pet, rates, now);
    let next_level_xp = xp_for_level(token.pet.level.saturating_add(1));
    PetResponse {
        token_id,
        owner: token.owner.to_string(),
        name: token.pet.name,
        species: token.pet.species,
        stats,
        experience: token.pet.experience,
        level: token.pet.level,
        experience_to_next_level: next_level_xp.saturating_sub(token.pet.experience),
    }
}

fn query_pet(deps: Deps, env: Env, token_id: String) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let token = TOKENS.load(deps.storage, &token_id)?;
    to_json_binary(&pet_response(token_id, token, &config.decay, env.block.time))
}

fn query_pets_by_owner(
    deps: Deps,
    env: Env,
    owner: String,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let owner_addr = deps.api.addr_validate(&owner)?;
    let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let pets: Vec<PetResponse> = OWNER_TOKENS
        .prefix(&owner_addr)
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|key| {
            let token_id = key?;
            let token = TOKENS.load(deps.storage, &token_id)?;
            Ok(pet_response(token_id, token, &config.decay, env.block.time))
        })
        .collect::<StdResult<_>>()?;

    to_json_binary(&PetsResponse { pets })
}

fn query_nft_info(deps: Deps, token_id: String) -> StdResult<Binary> {
    let token = TOKENS.load(deps.storage, &token_id)?;
    let approval = TOKEN_APPROVALS
        .may_load(deps.storage, &token_id)?
        .map(|a| a.to_string());

    to_json_binary(&NftInfoResponse {
        token_id,
        owner: token.owner.to_string(),
        pet: token.pet,
        token_uri: token.token_uri,
        approval,
    })
}

fn query_owner_of(deps: Deps, token_id: String) -> StdResult<Binary> {
    let token = TOKENS.load(deps.storage, &token_id)?;
    let approvals = TOKEN_APPROVALS
        .may_load(deps.storage, &token_id)?
        .map(|a| a.to_string())
        .into_iter()
        .collect();

    to_json_binary(&OwnerOfResponse {
        owner: token.owner.to_string(),
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
