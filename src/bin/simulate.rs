use std::env;
use std::error::Error;
use std::process;

use log::info;

use nomercy::{
    Bot, DeckVariant, Game, GameError, StackRule, create_bot_from_spec, describe_action,
    hand_points, render_view, seat_for_spec,
};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

struct Options {
    visualize: bool,
    seed: u64,
    max_turns: Option<usize>,
    variant: DeckVariant,
    stack_rule: StackRule,
    bots: Vec<String>,
}

impl Options {
    /// Returns `None` when only the usage text was asked for.
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Option<Self>, Box<dyn Error>> {
        let mut options = Options {
            visualize: false,
            seed: DEFAULT_SEED,
            max_turns: None,
            variant: DeckVariant::Standard,
            stack_rule: StackRule::AtLeastTop,
            bots: Vec::new(),
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-v" | "--visualize" => options.visualize = true,
                "--no-mercy" => options.variant = DeckVariant::NoMercy,
                "--stack-any" => options.stack_rule = StackRule::AnyDraw,
                "--seed" => options.seed = parse_value(&arg, args.next())?,
                "--max-turns" => options.max_turns = Some(parse_value(&arg, args.next())?),
                "-h" | "--help" => return Ok(None),
                flag if flag.starts_with('-') => {
                    return Err(format!("unknown option {flag}; see --help").into());
                }
                spec => options.bots.push(spec.to_string()),
            }
        }
        if options.bots.is_empty() {
            options.bots = vec!["human".into(), "heuristic".into()];
        }
        Ok(Some(options))
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|_| format!("{flag}: cannot parse '{value}'"))
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let Some(options) = Options::parse(env::args().skip(1))? else {
        print_usage();
        return Ok(());
    };

    let seats = options
        .bots
        .iter()
        .enumerate()
        .map(|(seat, spec)| seat_for_spec(spec, seat))
        .collect();
    let mut game = Game::builder(seats)?
        .with_seed(options.seed)
        .with_variant(options.variant)
        .with_stack_rule(options.stack_rule)
        .build()?;
    let mut bots = options
        .bots
        .iter()
        .enumerate()
        .map(|(seat, spec)| create_bot_from_spec(spec, seat, options.seed))
        .collect::<Result<Vec<Box<dyn Bot>>, _>>()?;

    println!(
        "No Mercy, {} players, {:?} deck, seed {:#x}\n",
        options.bots.len(),
        options.variant,
        options.seed
    );
    let mut decisions = 0usize;
    while !game.is_finished() {
        if options.max_turns.is_some_and(|limit| decisions >= limit) {
            println!("Stopped after {decisions} decisions.");
            break;
        }
        let seat = game.current_player();
        let view = game.view(seat)?;
        let legal = game.legal_actions(seat)?;
        if legal.is_empty() {
            return Err(GameError::InvalidConfiguration("no legal actions for the current seat").into());
        }
        if options.visualize {
            println!("{}", render_view(&view));
        }
        let action = bots[seat].select_action(&view, &legal);
        if options.visualize {
            println!("> {}: {}\n", view.players[seat].name, describe_action(&view, &action));
        }
        game.apply_action(seat, action)?;
        decisions += 1;
    }
    info!("simulation ran {decisions} decision(s)");

    match game.winner() {
        Some(winner) => println!("Winner: {} (seat {winner})", game.player(winner)?.name()),
        None => println!("No winner yet."),
    }
    for (seat, player) in game.players().iter().enumerate() {
        let state = if player.is_eliminated() {
            String::from("eliminated")
        } else {
            format!(
                "{} card(s), {} pts",
                player.hand_size(),
                hand_points(player.hand())
            )
        };
        println!("  [{seat}] {:<14} {state}", player.name());
    }
    Ok(())
}

fn print_usage() {
    println!("Usage: simulate [OPTIONS] [BOT ...]");
    println!("  -v, --visualize       Print the table and each chosen action");
    println!("  --seed <u64>          Shuffle seed (default: {DEFAULT_SEED:#x})");
    println!("  --max-turns <n>       Stop after n decisions");
    println!("  --no-mercy            Add skip-everyone, discard-all and roulette cards");
    println!("  --stack-any           Allow any draw card to stack on any other");
    println!("  -h, --help            Show this help");
    println!("Bots (2-10): human[:name], random[:seed], heuristic.");
    println!("Without bots, one human plays one heuristic CPU.");
}
