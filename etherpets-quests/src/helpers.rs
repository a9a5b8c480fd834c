use cosmwasm_std::{Addr, Deps, MessageInfo, StdResult, Storage, Timestamp, Uint128};

use crate::error::ContractError;
use crate::state::{Config, Quest, QuestPeriod, QuestProgress, CONFIG, PROGRESS, QUESTS, REPORTERS};

pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_WEEK: u64 = 7 * SECONDS_PER_DAY;
/// 90 days
pub const DEFAULT_SEASON_LENGTH: u64 = 90 * SECONDS_PER_DAY;

pub const MAX_QUESTS: u32 = 100;
pub const MAX_QUEST_ID_LEN: usize = 32;
pub const MAX_TITLE_LEN: usize = 64;
pub const MAX_DESCRIPTION_LEN: usize = 512;

pub fn assert_owner(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.owner {
        return Err(ContractError::Unauthorized {
            role: "owner".to_string(),
        });
    }
    Ok(())
}

/// Reporters post progress on behalf of players. The owner always may.
pub fn assert_reporter(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender == config.owner || REPORTERS.has(deps.storage, sender) {
        return Ok(());
    }
    Err(ContractError::Unauthorized {
        role: "reporter".to_string(),
    })
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

/// Validate a single-coin deposit in `denom` and return its amount.
pub fn must_pay(info: &MessageInfo, denom: &str) -> Result<Uint128, ContractError> {
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
    if coin.amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    Ok(coin.amount)
}

/// Start of the period containing `now`.
pub fn period_start(period: QuestPeriod, config: &Config, now: Timestamp) -> Timestamp {
    let secs = now.seconds();
    match period {
        QuestPeriod::Daily => Timestamp::from_seconds(secs - secs % SECONDS_PER_DAY),
        QuestPeriod::Weekly => Timestamp::from_seconds(secs - secs % SECONDS_PER_WEEK),
        QuestPeriod::Seasonal => {
            let start = config.season_start.seconds();
            if secs <= start {
                return Timestamp::from_seconds(start);
            }
            let elapsed = secs - start;
            let len = config.season_length_seconds;
            Timestamp::from_seconds(start + elapsed - elapsed % len)
        }
    }
}

pub fn load_quest(storage: &dyn Storage, quest_id: &str) -> Result<Quest, ContractError> {
    QUESTS
        .may_load(storage, quest_id)?
        .ok_or_else(|| ContractError::QuestNotFound {
            quest_id: quest_id.to_string(),
        })
}

/// Load the player's record for the quest's current period, or a fresh one.
pub fn current_progress(
    storage: &dyn Storage,
    config: &Config,
    quest: &Quest,
    player: &Addr,
    now: Timestamp,
) -> StdResult<QuestProgress> {
    let reset_date = period_start(quest.period, config, now);
    let existing = PROGRESS.may_load(storage, (player, &quest.quest_id, reset_date.seconds()))?;
    Ok(existing.unwrap_or_else(|| QuestProgress::new(player.clone(), quest, reset_date)))
}

pub fn save_progress(storage: &mut dyn Storage, record: &QuestProgress) -> StdResult<()> {
    PROGRESS.save(
        storage,
        (&record.player, &record.quest_id, record.reset_date.seconds()),
        record,
    )
}

pub fn validate_quest_fields(
    quest_id: &str,
    title: &str,
    description: &str,
    target: u32,
) -> Result<(), ContractError> {
    let invalid = |reason: &str| ContractError::InvalidQuest {
        reason: reason.to_string(),
    };
    if quest_id.is_empty() || quest_id.len() > MAX_QUEST_ID_LEN {
        return Err(invalid("quest_id must be 1-32 characters"));
    }
    if !quest_id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(invalid("quest_id may only contain a-z, 0-9 and _"));
    }
    let title_len = title.trim().chars().count();
    if title_len == 0 || title.chars().count() > MAX_TITLE_LEN {
        return Err(invalid("title must be 1-64 characters"));
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(invalid("description must be at most 512 characters"));
    }
    if target == 0 {
        return Err(invalid("target must be greater than zero"));
    }
    Ok(())
}
