use std::io::{self, Write};
use std::time::Duration;

use anyhow::{bail, Context};
use broadside::{
    init_logging,
    terminal::{clear_screen, pause},
    AgentKind, ComputerAgent, HumanAgent, Match, MatchPhase, PlacementMode, PlayerSlot,
    DEFAULT_THINK_TIME,
};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Two humans sharing one terminal.
    Pvp,
    /// Human against the computer.
    Pvc,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Placement {
    Auto,
    Manual,
}

impl From<Placement> for PlacementMode {
    fn from(p: Placement) -> Self {
        match p {
            Placement::Auto => PlacementMode::Automatic,
            Placement::Manual => PlacementMode::Manual,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in this terminal. Anything not given is asked for.
    Play {
        #[arg(long, value_enum)]
        mode: Option<Mode>,
        #[arg(long)]
        name1: Option<String>,
        #[arg(long)]
        name2: Option<String>,
        #[arg(long, value_enum)]
        placement1: Option<Placement>,
        #[arg(long, value_enum)]
        placement2: Option<Placement>,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = DEFAULT_THINK_TIME.as_millis() as u64, help = "Computer thinking delay in milliseconds")]
        think_ms: u64,
    },
}

struct Setup {
    mode: Option<Mode>,
    names: [Option<String>; 2],
    placements: [Option<Placement>; 2],
    seed: Option<u64>,
    think_time: Duration,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let setup = match cli.command {
        Some(Commands::Play {
            mode,
            name1,
            name2,
            placement1,
            placement2,
            seed,
            think_ms,
        }) => Setup {
            mode,
            names: [name1, name2],
            placements: [placement1, placement2],
            seed,
            think_time: Duration::from_millis(think_ms),
        },
        None => Setup {
            mode: None,
            names: [None, None],
            placements: [None, None],
            seed: None,
            think_time: DEFAULT_THINK_TIME,
        },
    };
    play(setup)
}

fn read_line() -> anyhow::Result<String> {
    let mut line = String::new();
    let read = io::stdin()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if read == 0 {
        bail!("input closed");
    }
    Ok(line.trim().to_string())
}

fn ask(prompt: &str) -> anyhow::Result<String> {
    println!("{}", prompt);
    if let Err(e) = io::stdout().flush() {
        log::warn!("could not flush stdout: {}", e);
    }
    read_line()
}

/// Numbered menu; loops until one of `options` is picked.
fn menu(title: &str, options: &[&str]) -> anyhow::Result<usize> {
    loop {
        println!("{}", title);
        for (i, opt) in options.iter().enumerate() {
            println!("{} - {}", i + 1, opt);
        }
        let line = read_line()?;
        match line.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
            _ => println!("Please choose a number between 1 and {}.", options.len()),
        }
    }
}

fn ask_name(index: usize, given: Option<String>) -> anyhow::Result<String> {
    let name = match given {
        Some(n) => n,
        None => ask(&format!("Enter the name of Player {}:", index + 1))?,
    };
    Ok(if name.is_empty() {
        format!("Player {}", index + 1)
    } else {
        name
    })
}

fn ask_placement(name: &str, given: Option<Placement>) -> anyhow::Result<PlacementMode> {
    if let Some(p) = given {
        return Ok(p.into());
    }
    let choice = menu(
        &format!("{}, choose how to place your ships:", name),
        &["Automatic", "Manual"],
    )?;
    Ok(if choice == 0 {
        PlacementMode::Automatic
    } else {
        PlacementMode::Manual
    })
}

fn continue_prompt() {
    if let Err(e) = pause(&mut io::stdin().lock(), &mut io::stdout(), "Press Enter to continue...") {
        log::warn!("pause failed: {}", e);
    }
}

fn play(setup: Setup) -> anyhow::Result<()> {
    println!("Welcome to Broadside!");
    let mode = match setup.mode {
        Some(m) => m,
        None => {
            let choice = menu("Game mode:", &["Player vs Player", "Player vs Computer"])?;
            if choice == 0 {
                Mode::Pvp
            } else {
                Mode::Pvc
            }
        }
    };
    if let Some(s) = setup.seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }
    let rng = match setup.seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    };
    let [name1, name2] = setup.names;
    let [placement1, placement2] = setup.placements;
    let hot_seat = mode == Mode::Pvp;

    let name1 = ask_name(0, name1)?;
    let mode1 = ask_placement(&name1, placement1)?;
    let first = PlayerSlot::new(
        name1,
        Box::new(HumanAgent::stdio(mode1).with_opponent_reports(!hot_seat)),
    );

    let second = if hot_seat {
        let name2 = ask_name(1, name2)?;
        let mode2 = ask_placement(&name2, placement2)?;
        PlayerSlot::new(
            name2,
            Box::new(HumanAgent::stdio(mode2).with_opponent_reports(false)),
        )
    } else {
        PlayerSlot::new(
            "Computer",
            Box::new(ComputerAgent::with_think_time(setup.think_time)),
        )
    };

    let mut game = Match::new(first, second, rng);

    game.setup_player(0)?;
    continue_prompt();
    clear_screen();
    game.setup_player(1)?;
    if game.slot(1).is_some_and(|s| s.kind() == AgentKind::Human) {
        continue_prompt();
    }
    clear_screen();

    while game.phase() == MatchPhase::InProgress {
        clear_screen();
        let attacker = game.attacker();
        println!("{}'s turn", attacker.name());
        if attacker.kind() == AgentKind::Computer {
            println!("The computer is thinking...");
        }
        game.play_turn()?;
        continue_prompt();
    }

    clear_screen();
    println!("Game over!");
    if let Some(winner) = game.winner().and_then(|w| game.slot(w)) {
        println!("{} wins!", winner.name());
    }
    for slot in game.slots() {
        let stats = slot.stats();
        println!(
            "{}: {} shots, {} hits, {} misses, {} rejected",
            slot.name(),
            stats.shots,
            stats.hits,
            stats.misses,
            stats.rejected
        );
    }
    Ok(())
}
