use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{LottoError, Result};
use crate::models::WinningRank;

/// Largest prize or ticket price a config may carry, so a single amount
/// always fits a signed profit figure.
pub const MAX_AMOUNT: u64 = i64::MAX as u64;

/// Payout per rank, in won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrizeMap {
    pub first: u64,
    pub second: u64,
    pub third: u64,
    pub fourth: u64,
    pub fifth: u64,
}

impl Default for PrizeMap {
    fn default() -> Self {
        Self {
            first: 2_000_000_000,
            second: 50_000_000,
            third: 1_500_000,
            fourth: 50_000,
            fifth: 5_000,
        }
    }
}

impl PrizeMap {
    pub fn prize_for(&self, rank: WinningRank) -> u64 {
        match rank {
            WinningRank::None => 0,
            WinningRank::First => self.first,
            WinningRank::Second => self.second,
            WinningRank::Third => self.third,
            WinningRank::Fourth => self.fourth,
            WinningRank::Fifth => self.fifth,
        }
    }

    /// No-prize tickets always pay nothing; setting it is ignored.
    pub fn set_prize(&mut self, rank: WinningRank, amount: u64) {
        match rank {
            WinningRank::None => {}
            WinningRank::First => self.first = amount,
            WinningRank::Second => self.second = amount,
            WinningRank::Third => self.third = amount,
            WinningRank::Fourth => self.fourth = amount,
            WinningRank::Fifth => self.fifth = amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub prize_map: PrizeMap,
    pub ticket_price: u64,
    pub auto_run_interval_ms: u64,
    pub max_history: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            prize_map: PrizeMap::default(),
            ticket_price: 1_000,
            auto_run_interval_ms: 100,
            max_history: 200,
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig =
            serde_json::from_str(json).map_err(|e| LottoError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| LottoError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.ticket_price == 0 {
            return Err(LottoError::Config("ticket_price must be > 0".to_string()));
        }
        if self.max_history == 0 {
            return Err(LottoError::Config("max_history must be > 0".to_string()));
        }
        if self.ticket_price > MAX_AMOUNT {
            return Err(LottoError::Config(format!(
                "ticket_price must be <= {MAX_AMOUNT}"
            )));
        }
        for rank in WinningRank::ALL {
            if self.prize_map.prize_for(rank) > MAX_AMOUNT {
                return Err(LottoError::Config(format!(
                    "{} prize must be <= {MAX_AMOUNT}",
                    rank.label()
                )));
            }
        }
        Ok(())
    }

    pub fn auto_run_interval(&self) -> Duration {
        Duration::from_millis(self.auto_run_interval_ms)
    }
}
