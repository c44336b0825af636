mod display;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;

use lotto_core::analytics::{lucky_numbers, number_heatmap, rank_distribution, revenue_summary};
use lotto_core::config::SimConfig;
use lotto_core::evaluator::evaluate;
use lotto_core::form::{FORM_NAMES, FormBook, TicketForm};
use lotto_core::generator::generate_draw;
use lotto_core::models::{Ticket, WinningDraw, WinningRank};
use lotto_core::normalizer::complete_ticket;
use lotto_core::runner::AutoRunner;
use lotto_core::state::{ResultState, RoundReport};

use crate::display::{
    HeatmapKind, display_draws, display_heatmap, display_history_chart, display_history_log,
    display_lucky_numbers, display_match, display_rank_distribution, display_revenue,
    display_round, display_ticket, format_event,
};

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum View {
    /// 요약, 등수 분포, 행운의 숫자
    #[default]
    Summary,
    /// 요약 + 히트맵 + 그래프 + 기록
    Full,
    /// JSON 출력
    Json,
}

#[derive(Parser)]
#[command(name = "lotto", about = "로또 6/45 시뮬레이터")]
struct Cli {
    /// 설정 파일 (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 재현 가능한 결과를 위한 시드
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 당첨번호 추첨
    Draw {
        /// 보너스 번호 포함
        #[arg(short, long)]
        bonus: bool,

        /// 추첨 횟수
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },

    /// 선택한 번호를 6개로 자동 완성
    Complete {
        /// 0~6개의 번호 (1-45)
        numbers: Vec<u8>,
    },

    /// 티켓과 당첨번호 비교
    Check {
        /// 티켓 번호 6개
        #[arg(short, long, num_args = 1.., required = true)]
        ticket: Vec<u8>,

        /// 당첨번호 6개 + 보너스 1개
        #[arg(short, long, num_args = 1.., required = true)]
        draw: Vec<u8>,
    },

    /// 시뮬레이션 실행
    Simulate {
        /// 회차 수
        #[arg(short, long, default_value = "1")]
        rounds: u64,

        /// 슬롯 A~E 번호 ("3,12,40", 자동은 "-", 비활성은 "off")
        #[arg(short, long = "form")]
        forms: Vec<String>,

        /// 설정된 간격으로 자동 실행
        #[arg(long)]
        auto: bool,

        /// 출력 형식
        #[arg(short, long, default_value = "summary")]
        view: View,

        /// 표시할 기록 수
        #[arg(long, default_value = "10")]
        last: usize,
    },

    /// 설정 출력 또는 저장
    Config {
        /// 저장할 파일
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Draw { bonus, count } => cmd_draw(bonus, count, cli.seed),
        Command::Complete { numbers } => cmd_complete(&numbers, cli.seed),
        Command::Check { ticket, draw } => cmd_check(&ticket, &draw, &config),
        Command::Simulate {
            rounds,
            forms,
            auto,
            view,
            last,
        } => cmd_simulate(&config, &forms, rounds, auto, view, last, cli.seed),
        Command::Config { output } => cmd_config(&config, output.as_deref()),
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("설정 파일을 읽을 수 없습니다: {}", path.display()))?;
    let config = SimConfig::from_json(&json)
        .with_context(|| format!("잘못된 설정 파일: {}", path.display()))?;
    log::info!("Configuration loaded from {}", path.display());
    Ok(config)
}

fn build_forms(inputs: &[String]) -> Result<FormBook> {
    if inputs.len() > FORM_NAMES.len() {
        bail!("슬롯은 최대 {}개입니다 (입력: {})", FORM_NAMES.len(), inputs.len());
    }

    let mut book = FormBook::default();
    for (i, input) in inputs.iter().enumerate() {
        if input.trim().eq_ignore_ascii_case("off") {
            book.set_enabled(i, false)?;
            continue;
        }
        let form = TicketForm::parse(FORM_NAMES[i], input)
            .with_context(|| format!("슬롯 {} 입력 오류: '{}'", FORM_NAMES[i], input))?;
        book.update(i, form)?;
    }
    Ok(book)
}

fn cmd_draw(bonus: bool, count: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = make_rng(seed);
    let draws: Vec<Vec<u8>> = (0..count).map(|_| generate_draw(bonus, &mut rng)).collect();
    display_draws(&draws);
    Ok(())
}

fn cmd_complete(numbers: &[u8], seed: Option<u64>) -> Result<()> {
    let mut rng = make_rng(seed);
    let ticket = complete_ticket(numbers, &mut rng).context("번호를 완성할 수 없습니다")?;
    display_ticket(&ticket, numbers);
    Ok(())
}

fn cmd_check(ticket: &[u8], draw: &[u8], config: &SimConfig) -> Result<()> {
    let ticket = Ticket::from_slice(ticket).context("잘못된 티켓 번호")?;
    let draw = WinningDraw::from_slice(draw).context("잘못된 당첨번호")?;
    let draw_numbers = draw.numbers();
    let result = evaluate(ticket.numbers(), &draw_numbers)?;
    let prize = config.prize_map.prize_for(result.rank);
    display_match(ticket.numbers(), &draw_numbers, &result, prize);
    Ok(())
}

fn progress_bar(rounds: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(rounds);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )?
        .progress_chars("=> "),
    );
    Ok(pb)
}

fn cmd_simulate(
    config: &SimConfig,
    form_inputs: &[String],
    rounds: u64,
    auto: bool,
    view: View,
    last: usize,
    seed: Option<u64>,
) -> Result<()> {
    let book = build_forms(form_inputs)?;
    let forms = book.valid_forms();
    if forms.is_empty() {
        bail!("활성화된 슬롯이 없습니다");
    }
    if rounds == 0 {
        bail!("회차 수는 1 이상이어야 합니다");
    }

    let mut rng = make_rng(seed);
    let mut state = ResultState::new();

    let interval = if auto {
        config.auto_run_interval()
    } else {
        Duration::ZERO
    };
    let runner = AutoRunner::new(interval).with_max_rounds(rounds);

    let pb = progress_bar(rounds)?;
    let mut last_report = RoundReport::default();
    runner.run(&mut state, &forms, config, &mut rng, |report, state| {
        pb.inc(1);
        pb.set_message(format!("{:+.2}%", state.profit_rate()));
        if view != View::Json {
            for event in &report.events {
                pb.println(format_event(event));
            }
        }
        last_report = report.clone();
    })?;
    pb.finish_and_clear();

    let summary = revenue_summary(&state);
    let distribution = rank_distribution(state.winning_rank_counts());
    let lucky = lucky_numbers(state.number_stats());

    if view == View::Json {
        let history: Vec<_> = state.history().iter().rev().take(last).collect();
        let output = serde_json::json!({
            "rounds": state.submitted_count(),
            "used_money": state.used_money(),
            "total_prize": state.total_prize(),
            "summary": summary,
            "rank_distribution": distribution,
            "lucky_numbers": lucky,
            "last_round": last_report,
            "history": history,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    display_round(&last_report);
    display_revenue(&summary, state.used_money(), state.total_prize(), state.submitted_count());
    display_rank_distribution(&distribution);
    display_lucky_numbers(&lucky);

    if view == View::Full {
        let heat = number_heatmap(state.number_stats());
        display_heatmap(&heat, HeatmapKind::Frequency);
        display_heatmap(&heat, HeatmapKind::Hit);
        display_heatmap(&heat, HeatmapKind::Result);
        display_history_chart(state.history());
        display_history_log(state.history(), last);
    }

    let jackpots = state.rank_count(WinningRank::First);
    if jackpots > 0 {
        log::info!("{} first-rank wins in {} rounds", jackpots, state.submitted_count());
    }
    Ok(())
}

fn cmd_config(config: &SimConfig, output: Option<&Path>) -> Result<()> {
    let json = config.to_json()?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("저장할 수 없습니다: {}", path.display()))?;
            println!("설정을 {}에 저장했습니다", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
