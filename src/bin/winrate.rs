use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

use clap::{ArgAction, Parser};
use log::{debug, info, warn};
use plotters::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use nomercy::{Bot, DeckVariant, Game, GameError, StackRule, winner_points};
use nomercy::{create_bot_from_spec, is_human_spec, label_for_spec, seat_for_spec};

const DEFAULT_SEED: u64 = 0x4E0_4E5C_DEAD_C0DE;

#[derive(Parser, Debug)]
#[command(
    name = "winrate",
    about = "Pit CPU players against each other over many No Mercy games."
)]
struct Args {
    /// Games to play
    #[arg(short = 'g', long, default_value_t = 200)]
    games: usize,

    /// Base seed; seating, decks and bots derive their seeds from it
    #[arg(short = 's', long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Where to write the PNG chart
    #[arg(short = 'o', long, default_value = "winrates.png")]
    out: PathBuf,

    /// Print the table only
    #[arg(long, action = ArgAction::SetTrue)]
    no_chart: bool,

    /// Decisions allowed per game before it is abandoned
    #[arg(long, default_value_t = 5000)]
    max_turns: usize,

    /// Deal the No Mercy extras (skip-everyone, discard-all, color roulette)
    #[arg(long, action = ArgAction::SetTrue)]
    no_mercy: bool,

    /// Let any draw card stack regardless of the top card's value
    #[arg(long, action = ArgAction::SetTrue)]
    stack_any: bool,

    /// CPU specs, one per seat (2-10), e.g. `heuristic random random:7`
    #[arg(required = true, num_args = 2..=10)]
    bots: Vec<String>,
}

/// Totals gathered for one bot label across every seat it occupied.
#[derive(Debug, Default)]
struct LabelStats {
    seats: usize,
    wins: usize,
    points: u64,
    eliminations: usize,
    decisions: usize,
    thinking: Duration,
}

impl LabelStats {
    fn rate(&self, count: usize) -> f64 {
        if self.seats == 0 {
            0.0
        } else {
            count as f64 / self.seats as f64
        }
    }

    fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    fn elimination_rate(&self) -> f64 {
        self.rate(self.eliminations)
    }

    fn avg_points(&self) -> f64 {
        if self.seats == 0 {
            0.0
        } else {
            self.points as f64 / self.seats as f64
        }
    }
}

/// Everything the runner needs to set up one table.
struct Table<'a> {
    specs: &'a [String],
    variant: DeckVariant,
    stack_rule: StackRule,
    max_turns: usize,
}

fn main() {
    env_logger::init();
    if let Err(err) = run(Args::parse()) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if args.bots.iter().any(|spec| is_human_spec(spec)) {
        return Err("winrate runs CPU players only; drop the human seat".into());
    }
    let table = Table {
        specs: &args.bots,
        variant: if args.no_mercy {
            DeckVariant::NoMercy
        } else {
            DeckVariant::Standard
        },
        stack_rule: if args.stack_any {
            StackRule::AnyDraw
        } else {
            StackRule::AtLeastTop
        },
        max_turns: args.max_turns,
    };

    let mut stats: BTreeMap<String, LabelStats> = BTreeMap::new();
    let mut abandoned = 0usize;
    let started = Instant::now();
    for game_index in 0..args.games {
        let finished = play_game(&table, args.seed, game_index as u64, &mut stats)?;
        if !finished {
            warn!("game {game_index} abandoned after {} decisions", args.max_turns);
            abandoned += 1;
        }
    }
    info!(
        "played {} game(s) in {:.2?}",
        args.games,
        started.elapsed()
    );

    let mut ranking: Vec<(&String, &LabelStats)> = stats.iter().collect();
    ranking.sort_by(|a, b| b.1.win_rate().total_cmp(&a.1.win_rate()));
    print_table(&ranking);
    if abandoned > 0 {
        println!("\n{abandoned} game(s) were abandoned without a winner.");
    }

    if !args.no_chart {
        if !has_png_extension(&args.out) {
            return Err(format!("{} is not a .png path", args.out.display()).into());
        }
        render_chart(&args.out, &ranking)?;
        println!("\nChart written to {}", args.out.display());
    }
    Ok(())
}

/// Plays one seeded game and folds its result into `stats`. Returns false when the
/// decision cap cut the game short.
fn play_game(
    table: &Table<'_>,
    base_seed: u64,
    game_index: u64,
    stats: &mut BTreeMap<String, LabelStats>,
) -> Result<bool, Box<dyn Error>> {
    // Rotate who sits where so no label keeps the first-move advantage.
    let mut order: Vec<usize> = (0..table.specs.len()).collect();
    order.shuffle(&mut StdRng::seed_from_u64(derive_seed(base_seed, game_index, 1)));

    let seats = order
        .iter()
        .enumerate()
        .map(|(seat, &spec)| seat_for_spec(&table.specs[spec], seat))
        .collect();
    let mut game = Game::builder(seats)?
        .with_seed(derive_seed(base_seed, game_index, 2))
        .with_variant(table.variant)
        .with_stack_rule(table.stack_rule)
        .build()?;

    let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(order.len());
    let mut labels: Vec<String> = Vec::with_capacity(order.len());
    for (seat, &spec) in order.iter().enumerate() {
        let bot_seed = derive_seed(base_seed, game_index, 16 + seat as u64);
        bots.push(create_bot_from_spec(&table.specs[spec], seat, bot_seed)?);
        let label = label_for_spec(&table.specs[spec]);
        stats.entry(label.clone()).or_default().seats += 1;
        labels.push(label);
    }

    let mut decisions = 0usize;
    while !game.is_finished() {
        if decisions >= table.max_turns {
            return Ok(false);
        }
        let seat = game.current_player();
        let legal = game.legal_actions(seat)?;
        if legal.is_empty() {
            return Err(GameError::InvalidConfiguration("no legal actions available").into());
        }
        let view = game.view(seat)?;
        let clock = Instant::now();
        let action = bots[seat].select_action(&view, &legal);
        let entry = stats.entry(labels[seat].clone()).or_default();
        entry.thinking += clock.elapsed();
        entry.decisions += 1;
        game.apply_action(seat, action)?;
        decisions += 1;
    }

    for (seat, player) in game.players().iter().enumerate() {
        if player.is_eliminated() {
            stats.entry(labels[seat].clone()).or_default().eliminations += 1;
        }
    }
    if let Some(winner) = game.winner() {
        debug!("game {game_index}: {} wins", labels[winner]);
        let entry = stats.entry(labels[winner].clone()).or_default();
        entry.wins += 1;
        entry.points += u64::from(winner_points(&game, winner));
    }
    Ok(true)
}

fn print_table(ranking: &[(&String, &LabelStats)]) {
    println!(
        "{:<12} {:>11} {:>8} {:>9} {:>10} {:>12}",
        "bot", "wins/seats", "win %", "avg pts", "mercy %", "avg decide"
    );
    for (label, s) in ranking {
        let avg_decide = if s.decisions == 0 {
            Duration::ZERO
        } else {
            s.thinking / s.decisions as u32
        };
        println!(
            "{:<12} {:>11} {:>7.2}% {:>9.1} {:>9.2}% {:>12.2?}",
            label,
            format!("{}/{}", s.wins, s.seats),
            s.win_rate() * 100.0,
            s.avg_points(),
            s.elimination_rate() * 100.0,
            avg_decide,
        );
    }
}

fn has_png_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// SplitMix-style mixing so neighbouring games and seats get unrelated streams.
fn derive_seed(base: u64, game: u64, stream: u64) -> u64 {
    let mut z = base
        .wrapping_add(game.wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add(stream.wrapping_mul(0xD1B5_4A32_D192_ED03));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Grouped bars per label: win rate next to mercy-elimination rate.
fn render_chart(out: &Path, ranking: &[(&String, &LabelStats)]) -> Result<(), Box<dyn Error>> {
    let labels: Vec<&str> = ranking.iter().map(|(label, _)| label.as_str()).collect();
    let top = ranking
        .iter()
        .flat_map(|(_, s)| [s.win_rate(), s.elimination_rate()])
        .fold(0.0_f64, f64::max)
        * 100.0;

    let root = BitMapBackend::new(out, (1000, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| e.to_string())?;
    let mut chart = ChartBuilder::on(&root)
        .caption("No Mercy: win and mercy-elimination rates", ("sans-serif", 26).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0f64..labels.len() as f64, 0.0f64..(top * 1.1).max(10.0))
        .map_err(|e| e.to_string())?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len() * 2 + 1)
        .x_label_formatter(&|x| {
            let slot = x.floor() as usize;
            if (x - x.floor() - 0.5).abs() < 0.26 && slot < labels.len() {
                labels[slot].to_string()
            } else {
                String::new()
            }
        })
        .y_desc("% of seats")
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()
        .map_err(|e| e.to_string())?;

    let series = [
        (0.1, BLUE.mix(0.8), "win %"),
        (0.5, RED.mix(0.6), "mercy %"),
    ];
    for (offset, color, name) in series {
        let bars = ranking.iter().enumerate().map(|(i, (_, s))| {
            let value = if name == "win %" {
                s.win_rate()
            } else {
                s.elimination_rate()
            } * 100.0;
            let left = i as f64 + offset;
            Rectangle::new([(left, 0.0), (left + 0.4, value)], color.filled())
        });
        chart
            .draw_series(bars)
            .map_err(|e| e.to_string())?
            .label(name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }
    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.9))
        .draw()
        .map_err(|e| e.to_string())?;
    root.present().map_err(|e| e.to_string())?;
    Ok(())
}
