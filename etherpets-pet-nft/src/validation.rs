use cosmwasm_schema::cw_serde;

use crate::error::ContractError;
use crate::stats::{MAX_RITUAL_MINUTES, MIN_RITUAL_MINUTES};

/// One rejected input field
#[cw_serde]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Collects field errors so one message reports every bad input at once.
#[derive(Default, Debug)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&mut self, field: &str, result: Result<(), String>) -> &mut Self {
        if let Err(message) = result {
            self.errors.push(FieldError {
                field: field.to_string(),
                message,
            });
        }
        self
    }

    pub fn pet_name(&mut self, field: &str, name: &str) -> &mut Self {
        self.check(field, check_pet_name(name))
    }

    pub fn username(&mut self, field: &str, username: &str) -> &mut Self {
        self.check(field, check_username(username))
    }

    pub fn wallet_address(&mut self, field: &str, address: &str) -> &mut Self {
        self.check(field, check_wallet_address(address))
    }

    pub fn species(&mut self, field: &str, species: &str) -> &mut Self {
        self.check(field, check_species(species))
    }

    pub fn duration(&mut self, field: &str, minutes: u32) -> &mut Self {
        self.check(field, check_duration(minutes))
    }

    pub fn finish(&mut self) -> Result<(), ContractError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        Err(ContractError::Validation {
            errors: std::mem::take(&mut self.errors),
        })
    }
}

/// 2–20 characters, ASCII letters, digits and spaces, not blank
pub fn check_pet_name(name: &str) -> Result<(), String> {
    let len = name.chars().count();
    if !(2..=20).contains(&len) {
        return Err("must be between 2 and 20 characters".to_string());
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ') {
        return Err("may only contain letters, numbers and spaces".to_string());
    }
    if name.trim().is_empty() {
        return Err("must not be blank".to_string());
    }
    Ok(())
}

/// 3–15 characters, ASCII letters, digits and underscores
pub fn check_username(username: &str) -> Result<(), String> {
    let len = username.chars().count();
    if !(3..=15).contains(&len) {
        return Err("must be between 3 and 15 characters".to_string());
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err("may only contain letters, numbers and underscores".to_string());
    }
    Ok(())
}

/// `0x` followed by exactly 40 hex digits, any case
pub fn check_wallet_address(address: &str) -> Result<(), String> {
    let hex = address
        .strip_prefix("0x")
        .ok_or_else(|| "must start with 0x".to_string())?;
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("must be 0x followed by 40 hex characters".to_string());
    }
    Ok(())
}

pub fn check_species(species: &str) -> Result<(), String> {
    let len = species.chars().count();
    if !(1..=32).contains(&len) || species.trim().is_empty() {
        return Err("must be between 1 and 32 characters".to_string());
    }
    Ok(())
}

pub fn check_duration(minutes: u32) -> Result<(), String> {
    if !(MIN_RITUAL_MINUTES..=MAX_RITUAL_MINUTES).contains(&minutes) {
        return Err(format!(
            "must be between {} and {} minutes",
            MIN_RITUAL_MINUTES, MAX_RITUAL_MINUTES
        ));
    }
    Ok(())
}

pub fn is_valid_wallet_address(address: &str) -> bool {
    check_wallet_address(address).is_ok()
}

/// Index key for uniqueness checks
pub fn normalize(value: &str) -> String {
    value.to_ascii_lowercase()
}
