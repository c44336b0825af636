use serde::Serialize;

use crate::models::{MAX_NUMBER, MIN_NUMBER, NumberStatsMap, RankCounts, WinningRank};
use crate::state::ResultState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumberHeat {
    pub number: u8,
    pub submitted_count: u64,
    pub hit_count: u64,
    pub result_count: u64,
    /// Share of all played numbers, in [0, 1].
    pub frequency_ratio: f64,
    /// Hits per play, in percent.
    pub hit_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapStats {
    pub stats: Vec<NumberHeat>,
    pub max_frequency_ratio: f64,
    pub max_hit_rate: f64,
}

impl HeatmapStats {
    pub fn max_result_count(&self) -> u64 {
        self.stats.iter().map(|s| s.result_count).max().unwrap_or(0)
    }
}

fn hit_rate(hit_count: u64, submitted_count: u64) -> f64 {
    if submitted_count == 0 {
        0.0
    } else {
        hit_count as f64 / submitted_count as f64 * 100.0
    }
}

/// One row per number 1..=45, including numbers never seen.
pub fn number_heatmap(stats: &NumberStatsMap) -> HeatmapStats {
    let total_submitted: u64 = stats.values().map(|s| s.submitted_count).sum();

    let mut max_frequency_ratio = 0.0f64;
    let mut max_hit_rate = 0.0f64;

    let rows = (MIN_NUMBER..=MAX_NUMBER)
        .map(|number| {
            let s = stats.get(&number).copied().unwrap_or_default();
            let frequency_ratio = if total_submitted > 0 {
                s.submitted_count as f64 / total_submitted as f64
            } else {
                0.0
            };
            let rate = hit_rate(s.hit_count, s.submitted_count);
            max_frequency_ratio = max_frequency_ratio.max(frequency_ratio);
            max_hit_rate = max_hit_rate.max(rate);
            NumberHeat {
                number,
                submitted_count: s.submitted_count,
                hit_count: s.hit_count,
                result_count: s.result_count,
                frequency_ratio,
                hit_rate: rate,
            }
        })
        .collect();

    HeatmapStats {
        stats: rows,
        max_frequency_ratio,
        max_hit_rate,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Intensity {
    Zero,
    Low,
    Medium,
    MediumHigh,
    High,
}

impl Intensity {
    pub fn classify(value: f64, max: f64) -> Self {
        if max <= 0.0 {
            return Intensity::Zero;
        }
        let ratio = value / max;
        if ratio > 0.75 {
            Intensity::High
        } else if ratio > 0.5 {
            Intensity::MediumHigh
        } else if ratio > 0.25 {
            Intensity::Medium
        } else if ratio > 0.0 {
            Intensity::Low
        } else {
            Intensity::Zero
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumberHitRate {
    pub number: u8,
    pub hit_rate: f64,
    pub hit_count: u64,
    pub submitted_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LuckyNumbers {
    pub lucky: Vec<NumberHitRate>,
    pub unlucky: Vec<NumberHitRate>,
}

const LUCKY_COUNT: usize = 6;

/// Best and worst hit rates among numbers that have been played at least once.
pub fn lucky_numbers(stats: &NumberStatsMap) -> LuckyNumbers {
    let mut rates: Vec<NumberHitRate> = stats
        .iter()
        .filter(|(_, s)| s.submitted_count > 0)
        .map(|(&number, s)| NumberHitRate {
            number,
            hit_rate: hit_rate(s.hit_count, s.submitted_count),
            hit_count: s.hit_count,
            submitted_count: s.submitted_count,
        })
        .collect();

    // Stable sort keeps ascending number order among equal rates.
    rates.sort_by(|a, b| b.hit_rate.partial_cmp(&a.hit_rate).unwrap_or(std::cmp::Ordering::Equal));

    let lucky = rates.iter().take(LUCKY_COUNT).copied().collect();
    let unlucky = rates.iter().rev().take(LUCKY_COUNT).copied().collect();
    LuckyNumbers { lucky, unlucky }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevenueSummary {
    pub net_profit: i64,
    pub profit_rate: f64,
    pub average_spend: f64,
    pub average_prize: f64,
    pub net_profit_delta: Option<i64>,
    pub profit_rate_delta: Option<f64>,
}

/// Deltas compare against the snapshot before the latest one.
pub fn revenue_summary(state: &ResultState) -> RevenueSummary {
    let net_profit = state.net_profit();
    let profit_rate = state.profit_rate();
    let rounds = state.submitted_count();
    let (average_spend, average_prize) = if rounds == 0 {
        (0.0, 0.0)
    } else {
        (
            state.used_money() as f64 / rounds as f64,
            state.total_prize() as f64 / rounds as f64,
        )
    };

    let history = state.history();
    let previous = if history.len() > 1 {
        history.get(history.len() - 2)
    } else {
        None
    };

    RevenueSummary {
        net_profit,
        profit_rate,
        average_spend,
        average_prize,
        net_profit_delta: previous.map(|p| net_profit.saturating_sub(p.net_profit)),
        profit_rate_delta: previous.map(|p| profit_rate - p.profit_rate),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankRow {
    pub rank: WinningRank,
    pub label: &'static str,
    pub count: u64,
}

/// Ranks 1-5 then no-prize, skipping ranks nobody landed in.
pub fn rank_distribution(counts: &RankCounts) -> Vec<RankRow> {
    WinningRank::ALL
        .iter()
        .map(|&rank| RankRow {
            rank,
            label: rank.label(),
            count: counts.get(&rank).copied().unwrap_or(0),
        })
        .filter(|row| row.count > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::form::TicketForm;
    use crate::models::NumberStats;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn stats_of(entries: &[(u8, u64, u64, u64)]) -> NumberStatsMap {
        entries
            .iter()
            .map(|&(n, submitted_count, hit_count, result_count)| {
                (n, NumberStats { submitted_count, hit_count, result_count })
            })
            .collect()
    }

    #[test]
    fn test_heatmap_empty() {
        let heat = number_heatmap(&NumberStatsMap::new());
        assert_eq!(heat.stats.len(), 45);
        assert_eq!(heat.max_frequency_ratio, 0.0);
        assert_eq!(heat.max_hit_rate, 0.0);
        assert_eq!(heat.max_result_count(), 0);
    }

    #[test]
    fn test_heatmap_ratios() {
        let heat = number_heatmap(&stats_of(&[(1, 3, 3, 2), (45, 1, 0, 5)]));
        let one = heat.stats[0];
        assert_eq!(one.number, 1);
        assert!((one.frequency_ratio - 0.75).abs() < 1e-10);
        assert!((one.hit_rate - 100.0).abs() < 1e-10);
        let last = heat.stats[44];
        assert_eq!(last.number, 45);
        assert!((last.frequency_ratio - 0.25).abs() < 1e-10);
        assert!((heat.max_frequency_ratio - 0.75).abs() < 1e-10);
        assert!((heat.max_hit_rate - 100.0).abs() < 1e-10);
        assert_eq!(heat.max_result_count(), 5);
    }

    #[test]
    fn test_intensity() {
        assert_eq!(Intensity::classify(5.0, 0.0), Intensity::Zero);
        assert_eq!(Intensity::classify(0.0, 10.0), Intensity::Zero);
        assert_eq!(Intensity::classify(1.0, 10.0), Intensity::Low);
        assert_eq!(Intensity::classify(2.5, 10.0), Intensity::Low);
        assert_eq!(Intensity::classify(4.0, 10.0), Intensity::Medium);
        assert_eq!(Intensity::classify(6.0, 10.0), Intensity::MediumHigh);
        assert_eq!(Intensity::classify(10.0, 10.0), Intensity::High);
    }

    #[test]
    fn test_lucky_numbers() {
        let stats = stats_of(&[
            (1, 10, 5, 0),
            (2, 10, 1, 0),
            (3, 10, 9, 0),
            (4, 0, 0, 3),
        ]);
        let lucky = lucky_numbers(&stats);
        let best: Vec<u8> = lucky.lucky.iter().map(|r| r.number).collect();
        let worst: Vec<u8> = lucky.unlucky.iter().map(|r| r.number).collect();
        assert_eq!(best, vec![3, 1, 2]);
        assert_eq!(worst, vec![2, 1, 3]);
    }

    #[test]
    fn test_lucky_numbers_caps_at_six() {
        let entries: Vec<(u8, u64, u64, u64)> = (1..=20).map(|n| (n, 10, n as u64 % 10, 0)).collect();
        let lucky = lucky_numbers(&stats_of(&entries));
        assert_eq!(lucky.lucky.len(), 6);
        assert_eq!(lucky.unlucky.len(), 6);
        assert!(lucky.lucky[0].hit_rate >= lucky.lucky[5].hit_rate);
        assert!(lucky.unlucky[0].hit_rate <= lucky.unlucky[5].hit_rate);
    }

    #[test]
    fn test_rank_distribution() {
        let mut counts = RankCounts::new();
        counts.insert(WinningRank::None, 90);
        counts.insert(WinningRank::Fifth, 8);
        counts.insert(WinningRank::Second, 0);
        counts.insert(WinningRank::Fourth, 2);
        let rows = rank_distribution(&counts);
        let labels: Vec<(&str, u64)> = rows.iter().map(|r| (r.label, r.count)).collect();
        assert_eq!(labels, vec![("4등", 2), ("5등", 8), ("낙첨", 90)]);
    }

    #[test]
    fn test_revenue_summary() {
        let state = ResultState::new();
        let summary = revenue_summary(&state);
        assert_eq!(summary.net_profit, 0);
        assert_eq!(summary.average_spend, 0.0);
        assert!(summary.net_profit_delta.is_none());

        let mut state = ResultState::new();
        let mut rng = StdRng::seed_from_u64(42);
        let forms = vec![TicketForm::auto("A"), TicketForm::auto("B")];
        state.submit(&forms, &SimConfig::default(), &mut rng).unwrap();
        assert!(revenue_summary(&state).net_profit_delta.is_none());

        let report = state.submit(&forms, &SimConfig::default(), &mut rng).unwrap();
        let summary = revenue_summary(&state);
        assert!((summary.average_spend - 2_000.0).abs() < 1e-10);
        assert_eq!(
            summary.net_profit_delta,
            Some(report.prize as i64 - report.cost as i64)
        );
        assert!(summary.profit_rate_delta.is_some());
    }
}
