use std::time::Duration;

use clap::Parser;
use game_core::{ControllerConfig, GameController, HttpRelayClient};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

mod command;
mod render;

use command::{Command, HELP};

#[derive(Parser)]
#[command(name = "rps")]
#[command(about = "Play Rock Paper Scissors against the AI through the move relay")]
struct Args {
    /// Base URL of the move relay
    #[arg(long, env = "RELAY_URL", default_value = "http://localhost:3001")]
    relay_url: String,

    /// Bearer token sent with every move (required when the relay has auth enabled)
    #[arg(long, env = "RPS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Pause before revealing the AI's hand
    #[arg(long, default_value_t = 1500)]
    thinking_delay_ms: u64,

    /// Relay request timeout
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let client = match HttpRelayClient::new(&args.relay_url, Duration::from_millis(args.timeout_ms))
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Failed to build relay client: {e}");
            std::process::exit(1);
        }
    };
    debug!(url = %client.play_url(), "using relay");

    let game = GameController::new(
        client,
        ControllerConfig {
            thinking_delay: Duration::from_millis(args.thinking_delay_ms),
            token: args.token.filter(|t| !t.trim().is_empty()),
        },
    );

    println!("🪨📄✂️  Rock Paper Scissors. First to win three rounds takes the game.");
    println!("{HELP}\n");

    let session = game.start_session();
    println!("{}\n", render::render(&session));

    // Render every later state change, including the "thinking" state shown while
    // a move is in flight.
    let renderer = tokio::spawn(render::follow(game.subscribe(), std::io::stdout()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("❌ Failed to read input: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Play(player_move)) => {
                if game.snapshot().is_over() {
                    println!("The game is over. Type 'restart' to play again.");
                    continue;
                }
                game.submit_move(player_move).await;
            }
            Ok(Command::Restart) => {
                if !game.snapshot().is_over() {
                    println!("Finish the current game first (first to three).");
                    continue;
                }
                game.restart();
            }
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Quit) => break,
            Err(message) => println!("{message}"),
        }
    }

    // Dropping the controller closes the channel; the renderer prints any
    // pending state and then stops.
    drop(game);
    if let Err(e) = renderer.await {
        debug!(error = %e, "renderer task ended abnormally");
    }
    println!("👋 Bye!");
}
