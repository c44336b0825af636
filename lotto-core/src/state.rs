use std::collections::VecDeque;

use chrono::Utc;
use rand::Rng;
use serde::Serialize;

use crate::config::SimConfig;
use crate::error::{LottoError, Result};
use crate::evaluator::evaluate;
use crate::form::TicketForm;
use crate::generator::draw_winning;
use crate::models::{
    MatchResult, NumberStatsMap, RankCounts, SimulationSnapshot, Ticket, WinningDraw, WinningRank,
    net_profit, profit_rate,
};
use crate::normalizer::complete_ticket;

/// A setter argument: either a new value or a function of the current one.
pub enum Update<T> {
    Replace(T),
    With(Box<dyn FnOnce(&T) -> T>),
}

impl<T> Update<T> {
    pub fn with(f: impl FnOnce(&T) -> T + 'static) -> Self {
        Update::With(Box::new(f))
    }

    pub fn apply(self, current: &mut T) {
        *current = match self {
            Update::Replace(value) => value,
            Update::With(f) => f(current),
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventKind {
    /// Ranks 1 to 3.
    Jackpot,
    Notice,
}

/// Something worth telling the player about after a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankEvent {
    pub kind: EventKind,
    pub rank: WinningRank,
    pub prize: u64,
    pub ticket: Ticket,
    pub draw: WinningDraw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketOutcome {
    pub form_name: String,
    pub ticket: Ticket,
    pub result: MatchResult,
    pub prize: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    pub draw: Option<WinningDraw>,
    pub outcomes: Vec<TicketOutcome>,
    pub cost: u64,
    pub prize: u64,
    pub events: Vec<RankEvent>,
}

impl RoundReport {
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Ranks 1-4 always notify; rank 5 only until the first one has been shown.
pub(crate) fn collect_events(
    outcomes: &[TicketOutcome],
    draw: &WinningDraw,
    mut fifth_notified: bool,
) -> (Vec<RankEvent>, bool) {
    let mut events = Vec::new();
    for outcome in outcomes {
        let kind = match outcome.result.rank {
            WinningRank::First | WinningRank::Second | WinningRank::Third => EventKind::Jackpot,
            WinningRank::Fourth => EventKind::Notice,
            WinningRank::Fifth if !fifth_notified => {
                fifth_notified = true;
                EventKind::Notice
            }
            WinningRank::Fifth | WinningRank::None => continue,
        };
        events.push(RankEvent {
            kind,
            rank: outcome.result.rank,
            prize: outcome.prize,
            ticket: outcome.ticket,
            draw: *draw,
        });
    }
    (events, fifth_notified)
}

/// Aggregate simulation state. Owned by the caller and mutated only through
/// `submit`, `initialize` and `update_number_stats`.
#[derive(Debug, Clone, Default)]
pub struct ResultState {
    used_money: u64,
    total_prize: u64,
    submitted_count: u64,
    submitted_tickets: Vec<Ticket>,
    winning_numbers: Option<WinningDraw>,
    winning_rank_counts: RankCounts,
    number_stats: NumberStatsMap,
    history: VecDeque<SimulationSnapshot>,
    fifth_rank_notified: bool,
}

impl ResultState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plays one round: every form becomes a ticket, all tickets face one
    /// shared draw. Nothing is committed unless every ticket normalizes and
    /// the money totals still fit.
    pub fn submit(
        &mut self,
        forms: &[TicketForm],
        config: &SimConfig,
        rng: &mut impl Rng,
    ) -> Result<RoundReport> {
        if forms.is_empty() {
            return Ok(RoundReport::default());
        }

        let tickets = forms
            .iter()
            .map(|form| complete_ticket(&form.numbers, rng))
            .collect::<Result<Vec<Ticket>>>()?;
        let draw = draw_winning(rng);
        let draw_numbers = draw.numbers();

        let mut stats = self.number_stats.clone();
        let mut rank_counts = self.winning_rank_counts.clone();
        let mut outcomes = Vec::with_capacity(tickets.len());
        let mut round_prize = 0u64;

        for (form, ticket) in forms.iter().zip(&tickets) {
            let result = evaluate(ticket.numbers(), &draw_numbers)?;
            let prize = config.prize_map.prize_for(result.rank);
            round_prize = round_prize
                .checked_add(prize)
                .ok_or(LottoError::MoneyOverflow(prize))?;

            for &n in ticket.numbers() {
                stats.entry(n).or_default().submitted_count += 1;
            }
            for &n in &result.matched_numbers {
                stats.entry(n).or_default().hit_count += 1;
            }
            *rank_counts.entry(result.rank).or_insert(0) += 1;

            outcomes.push(TicketOutcome {
                form_name: form.name.clone(),
                ticket: *ticket,
                result,
                prize,
            });
        }
        for &n in &draw_numbers {
            stats.entry(n).or_default().result_count += 1;
        }

        let cost = (tickets.len() as u64)
            .checked_mul(config.ticket_price)
            .ok_or(LottoError::MoneyOverflow(config.ticket_price))?;
        let used_money = self
            .used_money
            .checked_add(cost)
            .ok_or(LottoError::MoneyOverflow(cost))?;
        let total_prize = self
            .total_prize
            .checked_add(round_prize)
            .ok_or(LottoError::MoneyOverflow(round_prize))?;
        let (events, fifth_notified) = collect_events(&outcomes, &draw, self.fifth_rank_notified);

        self.submitted_count += 1;
        self.used_money = used_money;
        self.total_prize = total_prize;
        self.submitted_tickets = tickets;
        self.winning_numbers = Some(draw);
        self.update_number_stats(Update::Replace(stats));
        self.winning_rank_counts = rank_counts;
        self.fifth_rank_notified = fifth_notified;
        self.push_snapshot(config.max_history);

        log::debug!(
            "round {}: {} tickets, draw [{}], prize {}, events {}",
            self.submitted_count,
            outcomes.len(),
            draw,
            round_prize,
            events.len()
        );

        Ok(RoundReport {
            draw: Some(draw),
            outcomes,
            cost,
            prize: round_prize,
            events,
        })
    }

    fn push_snapshot(&mut self, max_history: usize) {
        self.history.push_back(SimulationSnapshot {
            id: self.submitted_count,
            timestamp: Utc::now(),
            submitted_count: self.submitted_count,
            used_money: self.used_money,
            total_prize: self.total_prize,
            net_profit: self.net_profit(),
            profit_rate: self.profit_rate(),
        });
        while self.history.len() > max_history {
            self.history.pop_front();
        }
    }

    /// Back to the zero state.
    pub fn initialize(&mut self) {
        log::info!(
            "Resetting simulation after {} rounds",
            self.submitted_count
        );
        *self = Self::default();
    }

    pub fn update_number_stats(&mut self, update: Update<NumberStatsMap>) {
        update.apply(&mut self.number_stats);
    }

    pub fn used_money(&self) -> u64 {
        self.used_money
    }

    pub fn total_prize(&self) -> u64 {
        self.total_prize
    }

    pub fn submitted_count(&self) -> u64 {
        self.submitted_count
    }

    /// Tickets of the latest round.
    pub fn submitted_tickets(&self) -> &[Ticket] {
        &self.submitted_tickets
    }

    /// Draw of the latest round.
    pub fn winning_numbers(&self) -> Option<&WinningDraw> {
        self.winning_numbers.as_ref()
    }

    pub fn winning_rank_counts(&self) -> &RankCounts {
        &self.winning_rank_counts
    }

    pub fn rank_count(&self, rank: WinningRank) -> u64 {
        self.winning_rank_counts.get(&rank).copied().unwrap_or(0)
    }

    pub fn number_stats(&self) -> &NumberStatsMap {
        &self.number_stats
    }

    pub fn history(&self) -> &VecDeque<SimulationSnapshot> {
        &self.history
    }

    pub fn net_profit(&self) -> i64 {
        net_profit(self.total_prize, self.used_money)
    }

    pub fn profit_rate(&self) -> f64 {
        profit_rate(self.total_prize, self.used_money)
    }
}
