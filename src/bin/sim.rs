use broadside::{init_logging, ComputerAgent, Match, PlayerSlot};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <seed>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;

    let mut game = Match::new(
        PlayerSlot::new("player1", Box::new(ComputerAgent::new())),
        PlayerSlot::new("player2", Box::new(ComputerAgent::new())),
        SmallRng::seed_from_u64(seed),
    );
    let winner = game.run()?;
    let winner = game
        .slot(winner)
        .ok_or_else(|| anyhow::anyhow!("no player slot {}", winner))?;
    let [player1, player2] = game.slots();

    let result = json!({
        "seed": seed,
        "turns": game.turns(),
        "winner": winner.name(),
        "player1": player1.stats(),
        "player2": player2.stats(),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
