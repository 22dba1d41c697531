//! Player setup form
//!
//! Text entry filters and the validation run when the player presses start.
//! Only a validated `PlayerProfile` ever reaches the session.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::Appearance;

pub const MAX_NAME_CHARS: usize = 20;
pub const MAX_AGE_CHARS: usize = 2;
pub const MIN_AGE: u8 = 10;
pub const MAX_AGE: u8 = 50;

/// Validated session-start parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub age: u8,
    pub appearance: Appearance,
}

/// Why the form was rejected; `Display` is the on-screen message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    MissingName,
    InvalidAge,
    MissingAppearance,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SetupError::MissingName => "Username required",
            SetupError::InvalidAge => "Invalid age (10-50 only)",
            SetupError::MissingAppearance => "Select gender",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for SetupError {}

/// Raw form contents as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupForm {
    pub name: String,
    pub age: String,
    pub appearance: Option<Appearance>,
}

impl SetupForm {
    /// Accept letters and spaces up to the length limit
    pub fn push_name_char(&mut self, c: char) -> bool {
        if (c.is_alphabetic() || c == ' ') && self.name.chars().count() < MAX_NAME_CHARS {
            self.name.push(c);
            true
        } else {
            false
        }
    }

    /// Accept digits up to the length limit
    pub fn push_age_char(&mut self, c: char) -> bool {
        if c.is_ascii_digit() && self.age.len() < MAX_AGE_CHARS {
            self.age.push(c);
            true
        } else {
            false
        }
    }

    pub fn backspace_name(&mut self) {
        self.name.pop();
    }

    pub fn backspace_age(&mut self) {
        self.age.pop();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check the form; the first failing field wins
    pub fn validate(&self) -> Result<PlayerProfile, SetupError> {
        if self.name.is_empty() {
            return Err(SetupError::MissingName);
        }

        let age = if !self.age.is_empty() && self.age.chars().all(|c| c.is_ascii_digit()) {
            self.age.parse::<u8>().ok()
        } else {
            None
        };
        let age = match age {
            Some(age) if (MIN_AGE..=MAX_AGE).contains(&age) => age,
            _ => return Err(SetupError::InvalidAge),
        };

        let appearance = self.appearance.ok_or(SetupError::MissingAppearance)?;

        Ok(PlayerProfile {
            name: self.name.clone(),
            age,
            appearance,
        })
    }
}
