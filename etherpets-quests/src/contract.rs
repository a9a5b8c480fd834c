use cosmwasm_std::{
    entry_point, to_json_binary, Addr, BankMsg, Binary, Coin, Deps, DepsMut, Env, MessageInfo,
    Order, Response, StdResult, Timestamp, Uint128,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;
use etherpets_pet_nft::stats::Activity;

use crate::error::ContractError;
use crate::helpers::{
    assert_not_paused, assert_owner, assert_reporter, current_progress, load_quest, must_pay,
    reject_funds, save_progress, validate_quest_fields, DEFAULT_SEASON_LENGTH, MAX_QUESTS,
    SECONDS_PER_DAY,
};
use crate::msg::*;
use crate::state::*;

const CONTRACT_NAME: &str = "crates.io:etherpets-quests";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_QUERY_LIMIT: u32 = 30;
const MAX_QUERY_LIMIT: u32 = 100;

// ─── Instantiate ────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let season_length_seconds = msg.season_length_seconds.unwrap_or(DEFAULT_SEASON_LENGTH);
    if season_length_seconds < SECONDS_PER_DAY {
        return Err(ContractError::InvalidSeasonLength);
    }

    let owner = deps.api.addr_validate(&msg.owner)?;
    let reporters = msg
        .reporters
        .iter()
        .map(|r| deps.api.addr_validate(r))
        .collect::<StdResult<Vec<Addr>>>()?;

    let config = Config {
        owner,
        denom: msg.denom,
        paused: false,
        season_start: Timestamp::from_seconds(env.block.time.seconds()),
        season_length_seconds,
    };
    CONFIG.save(deps.storage, &config)?;
    QUEST_COUNT.save(deps.storage, &0u32)?;
    for reporter in &reporters {
        REPORTERS.save(deps.storage, reporter, &true)?;
    }

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", config.owner.as_str())
        .add_attribute("reporters", reporters.len().to_string()))
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
        ExecuteMsg::CreateQuest {
            quest_id,
            title,
            description,
            period,
            target,
            activity,
            reward,
        } => execute_create_quest(
            deps,
            env,
            info,
            NewQuest {
                quest_id,
                title,
                description,
                period,
                target,
                activity,
                reward,
            },
        ),
        ExecuteMsg::SetQuestActive { quest_id, active } => {
            execute_set_quest_active(deps, info, quest_id, active)
        }
        ExecuteMsg::UpdateProgress {
            player,
            quest_id,
            progress,
        } => execute_update_progress(deps, env, info, player, quest_id, progress),
        ExecuteMsg::RecordActivity {
            player,
            activity,
            amount,
        } => execute_record_activity(deps, env, info, player, activity, amount),
        ExecuteMsg::ClaimReward { quest_id } => execute_claim_reward(deps, env, info, quest_id),
        ExecuteMsg::FundRewards {} => execute_fund_rewards(deps, info),
        ExecuteMsg::AddReporter { address } => execute_add_reporter(deps, info, address),
        ExecuteMsg::RemoveReporter { address } => execute_remove_reporter(deps, info, address),
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
        ExecuteMsg::ProposeOwner { new_owner } => execute_propose_owner(deps, info, new_owner),
        ExecuteMsg::AcceptOwner {} => execute_accept_owner(deps, info),
        ExecuteMsg::CancelOwnerTransfer {} => execute_cancel_owner_transfer(deps, info),
    }
}

// ─── Quest board ────────────────────────────────────────────────────────────

pub struct NewQuest {
    pub quest_id: String,
    pub title: String,
    pub description: String,
    pub period: QuestPeriod,
    pub target: u32,
    pub activity: Option<Activity>,
    pub reward: Uint128,
}

pub fn execute_create_quest(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new: NewQuest,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    validate_quest_fields(&new.quest_id, &new.title, &new.description, new.target)?;

    if QUESTS.has(deps.storage, &new.quest_id) {
        return Err(ContractError::QuestAlreadyExists {
            quest_id: new.quest_id,
        });
    }
    let count = QUEST_COUNT.load(deps.storage)?;
    if count >= MAX_QUESTS {
        return Err(ContractError::TooManyQuests { max: MAX_QUESTS });
    }

    let quest = Quest {
        quest_id: new.quest_id,
        title: new.title.trim().to_string(),
        description: new.description,
        period: new.period,
        target: new.target,
        activity: new.activity,
        reward: new.reward,
        active: true,
        created_at: env.block.time,
    };
    QUESTS.save(deps.storage, &quest.quest_id, &quest)?;
    QUEST_COUNT.save(deps.storage, &(count + 1))?;

    Ok(Response::new()
        .add_attribute("action", "create_quest")
        .add_attribute("quest_id", &quest.quest_id)
        .add_attribute("target", quest.target.to_string())
        .add_attribute("reward", quest.reward.to_string()))
}

pub fn execute_set_quest_active(
    deps: DepsMut,
    info: MessageInfo,
    quest_id: String,
    active: bool,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;

    let mut quest = load_quest(deps.storage, &quest_id)?;
    quest.active = active;
    QUESTS.save(deps.storage, &quest_id, &quest)?;

    Ok(Response::new()
        .add_attribute("action", "set_quest_active")
        .add_attribute("quest_id", quest_id)
        .add_attribute("active", active.to_string()))
}

// ─── Progress ───────────────────────────────────────────────────────────────

pub fn execute_update_progress(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    player: String,
    quest_id: String,
    progress: u32,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;
    assert_reporter(deps.as_ref(), &info.sender)?;

    let player = deps.api.addr_validate(&player)?;
    let quest = load_quest(deps.storage, &quest_id)?;
    if !quest.active {
        return Err(ContractError::QuestInactive { quest_id });
    }

    let config = CONFIG.load(deps.storage)?;
    let mut record = current_progress(deps.storage, &config, &quest, &player, env.block.time)?;
    if record.update_progress(progress, env.block.time) {
        save_progress(deps.storage, &record)?;
    }

    Ok(Response::new()
        .add_attribute("action", "update_progress")
        .add_attribute("player", player.as_str())
        .add_attribute("quest_id", quest_id)
        .add_attribute("progress", record.progress.to_string())
        .add_attribute("target", record.target.to_string())
        .add_attribute("completed", record.completed.to_string()))
}

pub fn execute_record_activity(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    player: String,
    activity: Activity,
    amount: u32,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;
    assert_reporter(deps.as_ref(), &info.sender)?;

    let player = deps.api.addr_validate(&player)?;
    let config = CONFIG.load(deps.storage)?;

    let tracking: Vec<Quest> = QUESTS
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, quest)| quest))
        .filter(|item| {
            item.as_ref()
                .map(|q| q.active && q.activity == Some(activity))
                .unwrap_or(true)
        })
        .collect::<StdResult<_>>()?;

    let mut updated = 0u32;
    let mut completed = Vec::new();
    for quest in &tracking {
        let mut record = current_progress(deps.storage, &config, quest, &player, env.block.time)?;
        let was_completed = record.completed;
        let next = record.progress.saturating_add(amount);
        if record.update_progress(next, env.block.time) {
            save_progress(deps.storage, &record)?;
            updated += 1;
            if record.completed && !was_completed {
                completed.push(quest.quest_id.clone());
            }
        }
    }

    let mut resp = Response::new()
        .add_attribute("action", "record_activity")
        .add_attribute("player", player.as_str())
        .add_attribute("activity", activity.as_str())
        .add_attribute("quests_updated", updated.to_string());
    if !completed.is_empty() {
        resp = resp.add_attribute("quests_completed", completed.join(","));
    }
    Ok(resp)
}

// ─── Rewards ────────────────────────────────────────────────────────────────

pub fn execute_claim_reward(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    quest_id: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    let config = CONFIG.load(deps.storage)?;
    let quest = load_quest(deps.storage, &quest_id)?;
    let mut record = current_progress(deps.storage, &config, &quest, &info.sender, env.block.time)?;
    record.claim_reward(env.block.time)?;

    let mut resp = Response::new();
    if !quest.reward.is_zero() {
        let pool = deps
            .querier
            .query_balance(&env.contract.address, &config.denom)?;
        if pool.amount < quest.reward {
            return Err(ContractError::InsufficientRewardPool {
                needed: quest.reward.to_string(),
                available: pool.amount.to_string(),
            });
        }
        resp = resp.add_message(BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: vec![Coin {
                denom: config.denom,
                amount: quest.reward,
            }],
        });
    }
    save_progress(deps.storage, &record)?;

    Ok(resp
        .add_attribute("action", "claim_reward")
        .add_attribute("player", info.sender.as_str())
        .add_attribute("quest_id", quest_id)
        .add_attribute("reward", quest.reward.to_string()))
}

pub fn execute_fund_rewards(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let amount = must_pay(&info, &config.denom)?;

    Ok(Response::new()
        .add_attribute("action", "fund_rewards")
        .add_attribute("funder", info.sender.as_str())
        .add_attribute("amount", amount.to_string()))
}

// ─── Admin ──────────────────────────────────────────────────────────────────

pub fn execute_add_reporter(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    let reporter = deps.api.addr_validate(&address)?;
    REPORTERS.save(deps.storage, &reporter, &true)?;
    Ok(Response::new()
        .add_attribute("action", "add_reporter")
        .add_attribute("reporter", reporter.as_str()))
}

pub fn execute_remove_reporter(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_owner(deps.as_ref(), &info.sender)?;
    let reporter = deps.api.addr_validate(&address)?;
    REPORTERS.remove(deps.storage, &reporter);
    Ok(Response::new()
        .add_attribute("action", "remove_reporter")
        .add_attribute("reporter", reporter.as_str()))
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
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Quest { quest_id } => to_json_binary(&QUESTS.load(deps.storage, &quest_id)?),
        QueryMsg::Quests { start_after, limit } => query_quests(deps, start_after, limit),
        QueryMsg::Progress { player, quest_id } => query_progress(deps, env, player, quest_id),
        QueryMsg::PlayerProgress { player } => query_player_progress(deps, env, player),
        QueryMsg::Reporters { start_after, limit } => query_reporters(deps, start_after, limit),
        QueryMsg::PendingOwner {} => to_json_binary(&PENDING_OWNER.may_load(deps.storage)?),
    }
}

fn query_quests(deps: Deps, start_after: Option<String>, limit: Option<u32>) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let quests: Vec<Quest> = QUESTS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, quest)| quest))
        .collect::<StdResult<_>>()?;

    to_json_binary(&QuestsResponse { quests })
}

fn progress_response(
    deps: Deps,
    env: &Env,
    config: &Config,
    quest: &Quest,
    player: &Addr,
) -> StdResult<ProgressResponse> {
    let record = current_progress(deps.storage, config, quest, player, env.block.time)?;
    Ok(ProgressResponse {
        player: record.player,
        quest_id: record.quest_id,
        reset_date: record.reset_date,
        progress: record.progress,
        target: record.target,
        completed: record.completed,
        claimed: record.claimed,
        reward: quest.reward,
    })
}

fn query_progress(deps: Deps, env: Env, player: String, quest_id: String) -> StdResult<Binary> {
    let player = deps.api.addr_validate(&player)?;
    let config = CONFIG.load(deps.storage)?;
    let quest = QUESTS.load(deps.storage, &quest_id)?;
    to_json_binary(&progress_response(deps, &env, &config, &quest, &player)?)
}

fn query_player_progress(deps: Deps, env: Env, player: String) -> StdResult<Binary> {
    let player = deps.api.addr_validate(&player)?;
    let config = CONFIG.load(deps.storage)?;

    let progress = QUESTS
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| {
            let (_, quest) = item?;
            progress_response(deps, &env, &config, &quest, &player)
        })
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&PlayerProgressResponse { progress })
}

fn query_reporters(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize;
    let start_addr = start_after
        .map(|a| deps.api.addr_validate(&a))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);

    let reporters: Vec<Addr> = REPORTERS
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .collect::<StdResult<_>>()?;

    to_json_binary(&ReportersResponse { reporters })
}

// ─── Migrate ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
