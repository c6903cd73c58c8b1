use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use chess_referee::config::AppConfig;
use chess_referee::engine::Game;

fn main() -> ExitCode {
    // Logs go to stderr so they never interleave with the board on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chess_referee=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        "chess-referee v{} on a {}x{} board",
        env!("CARGO_PKG_VERSION"),
        config.ranks,
        config.files
    );

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut game = Game::with_size(config.board_size()?);
    game.setup_standard_board()?;
    game.start_game()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_position(&mut out, &game)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        match game.make_move(input) {
            Ok(notation) => {
                writeln!(out, "{notation}")?;
                if config.show_moves {
                    writeln!(out, "Moves: {}", game.move_list().join(" "))?;
                }
            }
            Err(e) => writeln!(out, "Rejected: {e}")?,
        }
        print_position(&mut out, &game)?;
        if game.is_game_over() {
            break;
        }
    }
    Ok(())
}

fn print_position(out: &mut impl Write, game: &Game) -> io::Result<()> {
    write!(out, "{}", game.board_text())?;
    writeln!(out, "{}", game.status_text())?;
    out.flush()
}
