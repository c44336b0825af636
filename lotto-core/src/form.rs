use serde::{Deserialize, Serialize};

use crate::error::{LottoError, Result};
use crate::models::{TICKET_SIZE, validate_numbers};

pub const FORM_NAMES: [&str; 5] = ["A", "B", "C", "D", "E"];

/// One slip on the play sheet. Missing numbers are auto-picked on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketForm {
    pub name: String,
    pub enabled: bool,
    pub numbers: Vec<u8>,
}

impl TicketForm {
    pub fn new(name: impl Into<String>, numbers: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            numbers,
        }
    }

    pub fn auto(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Parses "3,12 40" style input. Empty or "-" means a fully automatic slip.
    pub fn parse(name: impl Into<String>, input: &str) -> Result<Self> {
        let name = name.into();
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == "-" {
            return Ok(Self::auto(name));
        }
        let numbers = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<u8>().map_err(|_| LottoError::Parse(s.to_string())))
            .collect::<Result<Vec<u8>>>()?;
        let form = Self::new(name, numbers);
        form.validate()?;
        Ok(form)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Err(LottoError::Disabled(self.name.clone()));
        }
        if self.numbers.len() > TICKET_SIZE {
            return Err(LottoError::Overflow(self.numbers.len()));
        }
        validate_numbers(&self.numbers)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormBook {
    forms: Vec<TicketForm>,
}

impl Default for FormBook {
    fn default() -> Self {
        Self {
            forms: FORM_NAMES.iter().map(|&name| TicketForm::auto(name)).collect(),
        }
    }
}

impl FormBook {
    pub fn forms(&self) -> &[TicketForm] {
        &self.forms
    }

    pub fn update(&mut self, index: usize, form: TicketForm) -> Result<()> {
        let slot = self.forms.get_mut(index).ok_or(LottoError::FormIndex(index))?;
        *slot = form;
        Ok(())
    }

    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> Result<()> {
        let slot = self.forms.get_mut(index).ok_or(LottoError::FormIndex(index))?;
        slot.enabled = enabled;
        Ok(())
    }

    /// Enabled, well-formed forms; these are what a round submits.
    pub fn valid_forms(&self) -> Vec<TicketForm> {
        self.forms.iter().filter(|f| f.is_valid()).cloned().collect()
    }
}
