use std::collections::VecDeque;

use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use textplots::Plot;

use lotto_core::analytics::{HeatmapStats, Intensity, LuckyNumbers, RankRow, RevenueSummary};
use lotto_core::models::{MatchResult, SimulationSnapshot, Ticket, WinningRank};
use lotto_core::state::{EventKind, RankEvent, RoundReport};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// 1234567 -> "1,234,567", keeping the sign.
pub fn format_won(value: impl Into<i128>) -> String {
    let value: i128 = value.into();
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if value < 0 {
        format!("-{out}")
    } else {
        out
    }
}

fn signed_won(value: i64) -> String {
    if value >= 0 {
        format!("+{} 원", format_won(value))
    } else {
        format!("{} 원", format_won(value))
    }
}

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn rank_color(rank: WinningRank) -> Color {
    match rank {
        WinningRank::First | WinningRank::Second | WinningRank::Third => Color::Green,
        WinningRank::Fourth | WinningRank::Fifth => Color::Cyan,
        WinningRank::None => Color::DarkGrey,
    }
}

fn profit_color(value: f64) -> Color {
    if value >= 0.0 { Color::Green } else { Color::Red }
}

pub fn display_draws(draws: &[Vec<u8>]) {
    let mut table = new_table();
    table.set_header(vec!["#", "번호", "보너스"]);

    for (i, draw) in draws.iter().enumerate() {
        let (main, bonus) = if draw.len() > 6 {
            (&draw[..6], format!("{:2}", draw[6]))
        } else {
            (&draw[..], "-".to_string())
        };
        table.add_row(vec![format!("{}", i + 1), join_numbers(main), bonus]);
    }
    println!("{table}");
}

pub fn display_ticket(ticket: &Ticket, user_numbers: &[u8]) {
    let mut table = new_table();
    table.set_header(vec!["번호", "선택"]);
    for &n in ticket.numbers() {
        let origin = if user_numbers.contains(&n) { "수동" } else { "자동" };
        table.add_row(vec![format!("{:2}", n), origin.to_string()]);
    }
    println!("{table}");
}

pub fn display_match(ticket: &[u8], draw: &[u8], result: &MatchResult, prize: u64) {
    println!("\n티켓   : {}", join_numbers(ticket));
    println!("당첨번호: {} + {:2}", join_numbers(&draw[..6]), draw[6]);

    let mut table = new_table();
    table.set_header(vec!["결과", "일치 번호", "당첨금"]);
    table.add_row(vec![
        Cell::new(result.message).fg(rank_color(result.rank)),
        Cell::new(join_numbers(&result.matched_numbers)),
        Cell::new(format!("{} 원", format_won(prize))),
    ]);
    println!("{table}");
}

pub fn display_round(report: &RoundReport) {
    let Some(draw) = report.draw else {
        println!("제출된 티켓이 없습니다.");
        return;
    };
    println!("\n🎱 마지막 회차 당첨번호 : {draw}\n");

    let mut table = new_table();
    table.set_header(vec!["슬롯", "티켓", "일치 번호", "결과", "당첨금"]);
    for outcome in &report.outcomes {
        table.add_row(vec![
            Cell::new(&outcome.form_name),
            Cell::new(outcome.ticket.to_string()),
            Cell::new(join_numbers(&outcome.result.matched_numbers)),
            Cell::new(outcome.result.message).fg(rank_color(outcome.result.rank)),
            Cell::new(format!("{} 원", format_won(outcome.prize))),
        ]);
    }
    println!("{table}");
}

pub fn format_event(event: &RankEvent) -> String {
    let marker = match event.kind {
        EventKind::Jackpot => "🎉",
        EventKind::Notice => "🔔",
    };
    format!(
        "{marker} {} ! 티켓 [{}] / 당첨번호 [{}] / {} 원",
        event.rank.message(),
        event.ticket,
        event.draw,
        format_won(event.prize)
    )
}

pub fn display_revenue(summary: &RevenueSummary, used_money: u64, total_prize: u64, rounds: u64) {
    println!("\n💰 수입 요약 ({rounds}회)\n");

    let mut table = new_table();
    table.set_header(vec!["항목", "값", "이전 대비"]);

    table.add_row(vec![
        Cell::new("구매 금액"),
        Cell::new(format!("{} 원", format_won(used_money))),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("당첨금"),
        Cell::new(format!("{} 원", format_won(total_prize))),
        Cell::new(""),
    ]);

    let profit_delta = summary
        .net_profit_delta
        .map(|d| format!("{} {} 원", if d >= 0 { "▲" } else { "▼" }, format_won(d.unsigned_abs())))
        .unwrap_or_default();
    table.add_row(vec![
        Cell::new("순이익"),
        Cell::new(signed_won(summary.net_profit)).fg(profit_color(summary.net_profit as f64)),
        Cell::new(profit_delta),
    ]);

    let rate_delta = summary
        .profit_rate_delta
        .map(|d| format!("{} {:.2}%", if d >= 0.0 { "▲" } else { "▼" }, d.abs()))
        .unwrap_or_default();
    let sign = if summary.profit_rate >= 0.0 { "+" } else { "" };
    table.add_row(vec![
        Cell::new("수익률"),
        Cell::new(format!("{sign}{:.2}%", summary.profit_rate)).fg(profit_color(summary.profit_rate)),
        Cell::new(rate_delta),
    ]);
    table.add_row(vec![
        Cell::new("평균 구매 금액"),
        Cell::new(format!("{} 원", format_won(summary.average_spend.round() as i64))),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("평균 상금"),
        Cell::new(format!("{} 원", format_won(summary.average_prize.round() as i64))),
        Cell::new(""),
    ]);
    println!("{table}");
}

pub fn display_rank_distribution(rows: &[RankRow]) {
    println!("\n🏆 등수 분포\n");
    if rows.is_empty() {
        println!("  (데이터 없음)");
        return;
    }

    let total: u64 = rows.iter().map(|r| r.count).sum();
    let mut table = new_table();
    table.set_header(vec!["등수", "횟수", "비율", ""]);
    for row in rows {
        let share = row.count as f64 / total as f64;
        let bar = "█".repeat(((share * 30.0).round() as usize).max(1));
        table.add_row(vec![
            Cell::new(row.label).fg(rank_color(row.rank)),
            Cell::new(row.count.to_string()),
            Cell::new(format!("{:.3}%", share * 100.0)),
            Cell::new(bar),
        ]);
    }
    println!("{table}");
}

pub fn display_lucky_numbers(lucky: &LuckyNumbers) {
    println!("\n🍀 행운의 숫자 / 😔 피해야 할 숫자\n");
    if lucky.lucky.is_empty() {
        println!("  시뮬레이션 데이터가 충분하지 않습니다.");
        return;
    }

    let mut table = new_table();
    table.set_header(vec!["#", "행운", "적중률", "불운", "적중률"]);
    let rows = lucky.lucky.len().max(lucky.unlucky.len());
    for i in 0..rows {
        let (good, good_rate) = lucky
            .lucky
            .get(i)
            .map(|r| (format!("{:2}", r.number), format!("{:.1}%", r.hit_rate)))
            .unwrap_or_default();
        let (bad, bad_rate) = lucky
            .unlucky
            .get(i)
            .map(|r| (format!("{:2}", r.number), format!("{:.1}%", r.hit_rate)))
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(good).fg(Color::Green),
            Cell::new(good_rate),
            Cell::new(bad).fg(Color::Red),
            Cell::new(bad_rate),
        ]);
    }
    println!("{table}");
}

#[derive(Debug, Clone, Copy)]
pub enum HeatmapKind {
    Frequency,
    Hit,
    Result,
}

impl HeatmapKind {
    fn title(&self) -> &'static str {
        match self {
            HeatmapKind::Frequency => "구매 빈도",
            HeatmapKind::Hit => "적중률",
            HeatmapKind::Result => "추첨 등장",
        }
    }

    fn palette(&self) -> (Color, Color) {
        match self {
            HeatmapKind::Frequency => (Color::DarkGreen, Color::Green),
            HeatmapKind::Hit => (Color::DarkBlue, Color::Blue),
            HeatmapKind::Result => (Color::DarkYellow, Color::Yellow),
        }
    }
}

fn heat_cell(label: String, intensity: Intensity, (dark, bright): (Color, Color)) -> Cell {
    let cell = Cell::new(label);
    match intensity {
        Intensity::Zero => cell.fg(Color::DarkGrey),
        Intensity::Low => cell.fg(dark),
        Intensity::Medium => cell.fg(bright),
        Intensity::MediumHigh => cell.fg(bright).add_attribute(Attribute::Bold),
        Intensity::High => cell.bg(bright).fg(Color::Black).add_attribute(Attribute::Bold),
    }
}

const HEATMAP_COLUMNS: usize = 9;

pub fn display_heatmap(heat: &HeatmapStats, kind: HeatmapKind) {
    println!("\n🔥 {} 히트맵\n", kind.title());

    let max_result = heat.max_result_count() as f64;
    let mut table = new_table();
    for chunk in heat.stats.chunks(HEATMAP_COLUMNS) {
        let cells: Vec<Cell> = chunk
            .iter()
            .map(|s| {
                let (label, value, max) = match kind {
                    HeatmapKind::Frequency => (
                        format!("{:2}\n{:.1}%", s.number, s.frequency_ratio * 100.0),
                        s.frequency_ratio,
                        heat.max_frequency_ratio,
                    ),
                    HeatmapKind::Hit => (
                        format!("{:2}\n{:.1}%", s.number, s.hit_rate),
                        s.hit_rate,
                        heat.max_hit_rate,
                    ),
                    HeatmapKind::Result => (
                        format!("{:2}\n{}", s.number, s.result_count),
                        s.result_count as f64,
                        max_result,
                    ),
                };
                heat_cell(label, Intensity::classify(value, max), kind.palette())
            })
            .collect();
        table.add_row(cells);
    }
    println!("{table}");
}

pub fn display_history_chart(history: &VecDeque<SimulationSnapshot>) {
    println!("\n📈 실시간 진행률\n");
    if history.len() < 2 {
        println!("  (그래프를 그리기에 기록이 부족합니다)");
        return;
    }

    let x_min = history.front().map(|s| s.submitted_count).unwrap_or(0) as f32;
    let x_max = history.back().map(|s| s.submitted_count).unwrap_or(1) as f32;

    let profit: Vec<(f32, f32)> = history
        .iter()
        .map(|s| (s.submitted_count as f32, s.net_profit as f32 / 1_000.0))
        .collect();
    let rate: Vec<(f32, f32)> = history
        .iter()
        .map(|s| (s.submitted_count as f32, s.profit_rate as f32))
        .collect();

    for (title, points) in [("순이익 (천원)", &profit), ("수익률 (%)", &rate)] {
        let (y_min, y_max) = points
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
        let pad = ((y_max - y_min) * 0.1).max(1.0);

        println!("  {title} :");
        let shape = textplots::Shape::Lines(points.as_slice());
        let mut chart =
            textplots::Chart::new_with_y_range(120, 40, x_min, x_max, y_min - pad, y_max + pad);
        println!("{}", chart.lineplot(&shape));
    }
}

pub fn display_history_log(history: &VecDeque<SimulationSnapshot>, last: usize) {
    println!("\n📜 기록 (최근 {} / 총 {}개)\n", last.min(history.len()), history.len());
    if history.is_empty() {
        println!("  (기록 없음)");
        return;
    }

    let mut table = new_table();
    table.set_header(vec!["회차", "시각", "구매 금액", "당첨금", "순이익", "수익률"]);
    for snap in history.iter().rev().take(last) {
        table.add_row(vec![
            Cell::new(format!("{}회", snap.submitted_count)),
            Cell::new(snap.timestamp.format("%H:%M:%S%.3f").to_string()),
            Cell::new(format!("{} 원", format_won(snap.used_money))),
            Cell::new(format!("{} 원", format_won(snap.total_prize))),
            Cell::new(signed_won(snap.net_profit)).fg(profit_color(snap.net_profit as f64)),
            Cell::new(format!("{:.2}%", snap.profit_rate)).fg(profit_color(snap.profit_rate)),
        ]);
    }
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_won() {
        assert_eq!(format_won(0), "0");
        assert_eq!(format_won(999), "999");
        assert_eq!(format_won(1_000), "1,000");
        assert_eq!(format_won(2_000_000_000), "2,000,000,000");
        assert_eq!(format_won(-45_000), "-45,000");
        assert_eq!(format_won(u64::MAX), "18,446,744,073,709,551,615");
        assert_eq!(format_won(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_signed_won() {
        assert_eq!(signed_won(5_000), "+5,000 원");
        assert_eq!(signed_won(-1_000), "-1,000 원");
    }

    #[test]
    fn test_join_numbers() {
        assert_eq!(join_numbers(&[1, 22, 45]), " 1 - 22 - 45");
        assert_eq!(join_numbers(&[]), "");
    }
}
