use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LottoError, Result};

pub const MIN_NUMBER: u8 = 1;
pub const MAX_NUMBER: u8 = 45;
pub const POOL_SIZE: usize = MAX_NUMBER as usize;
pub const TICKET_SIZE: usize = 6;
pub const DRAW_SIZE: usize = TICKET_SIZE + 1;

/// Checks that every number is in range and appears once.
pub fn validate_numbers(numbers: &[u8]) -> Result<()> {
    let mut seen = [false; POOL_SIZE + 1];
    for &n in numbers {
        if !(MIN_NUMBER..=MAX_NUMBER).contains(&n) {
            return Err(LottoError::OutOfRange(n));
        }
        if seen[n as usize] {
            return Err(LottoError::Duplicate(n));
        }
        seen[n as usize] = true;
    }
    Ok(())
}

/// Six distinct numbers, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>")]
pub struct Ticket([u8; TICKET_SIZE]);

impl TryFrom<Vec<u8>> for Ticket {
    type Error = LottoError;

    fn try_from(numbers: Vec<u8>) -> Result<Self> {
        Self::from_slice(&numbers)
    }
}

impl Ticket {
    pub(crate) fn from_sorted_unchecked(numbers: [u8; TICKET_SIZE]) -> Self {
        Self(numbers)
    }

    pub fn new(mut numbers: [u8; TICKET_SIZE]) -> Result<Self> {
        validate_numbers(&numbers)?;
        numbers.sort_unstable();
        Ok(Self(numbers))
    }

    pub fn from_slice(numbers: &[u8]) -> Result<Self> {
        let arr: [u8; TICKET_SIZE] = numbers.try_into().map_err(|_| LottoError::InvalidInput {
            ticket: numbers.len(),
            draw: DRAW_SIZE,
        })?;
        Self::new(arr)
    }

    pub fn numbers(&self) -> &[u8; TICKET_SIZE] {
        &self.0
    }

    pub fn contains(&self, n: u8) -> bool {
        self.0.contains(&n)
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_numbers(f, &self.0)
    }
}

/// Six main numbers (ascending) and one bonus number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDraw")]
pub struct WinningDraw {
    main: [u8; TICKET_SIZE],
    bonus: u8,
}

/// Unchecked wire form of a draw.
#[derive(Deserialize)]
struct RawDraw {
    main: [u8; TICKET_SIZE],
    bonus: u8,
}

impl TryFrom<RawDraw> for WinningDraw {
    type Error = LottoError;

    fn try_from(raw: RawDraw) -> Result<Self> {
        Self::new(raw.main, raw.bonus)
    }
}

impl WinningDraw {
    pub fn new(mut main: [u8; TICKET_SIZE], bonus: u8) -> Result<Self> {
        let mut all = [0u8; DRAW_SIZE];
        all[..TICKET_SIZE].copy_from_slice(&main);
        all[TICKET_SIZE] = bonus;
        validate_numbers(&all)?;
        main.sort_unstable();
        Ok(Self { main, bonus })
    }

    pub fn from_slice(numbers: &[u8]) -> Result<Self> {
        if numbers.len() != DRAW_SIZE {
            return Err(LottoError::InvalidInput {
                ticket: TICKET_SIZE,
                draw: numbers.len(),
            });
        }
        let mut main = [0u8; TICKET_SIZE];
        main.copy_from_slice(&numbers[..TICKET_SIZE]);
        Self::new(main, numbers[TICKET_SIZE])
    }

    /// Caller guarantees distinct, in-range numbers with `main` sorted.
    pub(crate) fn from_parts_unchecked(main: [u8; TICKET_SIZE], bonus: u8) -> Self {
        Self { main, bonus }
    }

    pub fn main(&self) -> &[u8; TICKET_SIZE] {
        &self.main
    }

    pub fn bonus(&self) -> u8 {
        self.bonus
    }

    /// Main numbers followed by the bonus, the layout the evaluator expects.
    pub fn numbers(&self) -> [u8; DRAW_SIZE] {
        let mut all = [0u8; DRAW_SIZE];
        all[..TICKET_SIZE].copy_from_slice(&self.main);
        all[TICKET_SIZE] = self.bonus;
        all
    }
}

impl std::fmt::Display for WinningDraw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_numbers(f, &self.main)?;
        write!(f, " + {:2}", self.bonus)
    }
}

fn write_numbers(f: &mut std::fmt::Formatter<'_>, numbers: &[u8]) -> std::fmt::Result {
    for (i, n) in numbers.iter().enumerate() {
        if i > 0 {
            write!(f, " - ")?;
        }
        write!(f, "{:2}", n)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WinningRank {
    None,
    First,
    Second,
    Third,
    Fourth,
    Fifth,
}

impl WinningRank {
    /// Display order: best prize first, no prize last.
    pub const ALL: [WinningRank; 6] = [
        WinningRank::First,
        WinningRank::Second,
        WinningRank::Third,
        WinningRank::Fourth,
        WinningRank::Fifth,
        WinningRank::None,
    ];

    pub fn as_u8(&self) -> u8 {
        match self {
            WinningRank::None => 0,
            WinningRank::First => 1,
            WinningRank::Second => 2,
            WinningRank::Third => 3,
            WinningRank::Fourth => 4,
            WinningRank::Fifth => 5,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(WinningRank::None),
            1 => Some(WinningRank::First),
            2 => Some(WinningRank::Second),
            3 => Some(WinningRank::Third),
            4 => Some(WinningRank::Fourth),
            5 => Some(WinningRank::Fifth),
            _ => None,
        }
    }

    pub fn is_winning(&self) -> bool {
        *self != WinningRank::None
    }

    pub fn message(&self) -> &'static str {
        match self {
            WinningRank::None => "낙첨",
            WinningRank::First => "1등당첨",
            WinningRank::Second => "2등당첨",
            WinningRank::Third => "3등당첨",
            WinningRank::Fourth => "4등당첨",
            WinningRank::Fifth => "5등당첨",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WinningRank::None => "낙첨",
            WinningRank::First => "1등",
            WinningRank::Second => "2등",
            WinningRank::Third => "3등",
            WinningRank::Fourth => "4등",
            WinningRank::Fifth => "5등",
        }
    }
}

impl std::fmt::Display for WinningRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub rank: WinningRank,
    /// Main matches ascending, then the bonus if it matched.
    pub matched_numbers: Vec<u8>,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberStats {
    /// Times the number was played on a ticket.
    pub submitted_count: u64,
    /// Times it appeared in a ticket's matched numbers.
    pub hit_count: u64,
    /// Times it was drawn (main or bonus).
    pub result_count: u64,
}

pub type NumberStatsMap = BTreeMap<u8, NumberStats>;

pub type RankCounts = BTreeMap<WinningRank, u64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub submitted_count: u64,
    pub used_money: u64,
    pub total_prize: u64,
    pub net_profit: i64,
    pub profit_rate: f64,
}

/// Saturates at the `i64` bounds.
pub fn net_profit(total_prize: u64, used_money: u64) -> i64 {
    let diff = i128::from(total_prize) - i128::from(used_money);
    i64::try_from(diff).unwrap_or(if diff < 0 { i64::MIN } else { i64::MAX })
}

pub fn profit_rate(total_prize: u64, used_money: u64) -> f64 {
    if used_money == 0 {
        return 0.0;
    }
    (total_prize as f64 - used_money as f64) / used_money as f64 * 100.0
}
