//! Cube Solver
//!
//! Scrambles an N×N×N cube from move notation, prints it as an unfolded net
//! and solves 2x2 and 3x3 cubes stage by stage.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use cuber::cube::DEFAULT_ANIMATION_SPEED;
use cuber::{cases, grid, solve, Cube};

/// Frame rate of the simulated animation playback.
const FRAMES_PER_SECOND: f32 = 60.0;

/// Applies moves to a cube, prints it and solves it.
#[derive(Parser)]
#[command(name = "cuber")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Layers along each edge of the cube.
    #[arg(long, short, global = true, default_value_t = 3, value_parser = parse_size)]
    size: usize,
    /// Complete every move instantly instead of animating it.
    #[arg(long, global = true)]
    no_animations: bool,
    /// Animation speed in degrees per second.
    #[arg(long, global = true, default_value_t = DEFAULT_ANIMATION_SPEED)]
    speed: f32,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scramble a cube, solve it and print every stage.
    Solve {
        /// Space-separated scramble, e.g. "R U2 R' D".
        scramble: String,
    },
    /// Print the cube after a sequence of moves.
    Show {
        /// Space-separated moves.
        #[arg(default_value = "")]
        moves: String,
    },
    /// List the last-layer cases for the cube size.
    Cases,
}

fn parse_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|e| format!("{e}"))?;
    if size < 2 {
        return Err(format!("a cube needs at least 2 layers, got {size}"));
    }
    Ok(size)
}

fn main() -> ExitCode {
    env_logger::builder().init();
    let cli = Cli::parse();

    let mut cube = Cube::new(cli.size);
    cube.set_animations_enabled(!cli.no_animations);
    cube.set_animation_speed(cli.speed);

    match cli.command {
        Command::Solve { scramble } => run_solve(&mut cube, &scramble),
        Command::Show { moves } => {
            apply_moves(&mut cube, &moves);
            print!("{}", grid::format_net(&cube));
            ExitCode::SUCCESS
        }
        Command::Cases => run_cases(cli.size),
    }
}

/// Applies `moves`, reporting tokens that do not apply to this cube.
fn apply_moves(cube: &mut Cube, moves: &str) {
    for token in moves.split_whitespace() {
        if let Err(e) = cube.try_move(token) {
            eprintln!("Skipping move: {e}");
        }
    }
}

/// Scrambles, solves and plays back the animation queue.
fn run_solve(cube: &mut Cube, scramble: &str) -> ExitCode {
    apply_moves(cube, scramble);
    println!("Scrambled:");
    print!("{}", grid::format_net(cube));

    let solution = match solve(cube) {
        Ok(solution) => solution,
        Err(e) => {
            eprintln!("Cannot solve: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!();
    print!("{solution}");
    println!("{} moves", solution.len());

    let turns = cube.pending_animations();
    let frames = play_back(cube);
    println!(
        "Played {turns} animated turns in {frames} frames ({:.1}s)",
        frames as f32 / FRAMES_PER_SECOND
    );

    println!();
    println!("Solved:");
    print!("{}", grid::format_net(cube));
    ExitCode::SUCCESS
}

/// Steps the animation queue at a fixed frame rate until it is empty and
/// returns the number of frames it took.
fn play_back(cube: &mut Cube) -> usize {
    if cube.animation_speed() <= 0.0 {
        cube.finish_animations();
        return 0;
    }
    let mut frames = 0;
    while cube.is_turning() {
        cube.update(1.0 / FRAMES_PER_SECOND);
        frames += 1;
    }
    frames
}

/// Prints the orientation and permutation tables.
fn run_cases(size: usize) -> ExitCode {
    let (Some(orientation), Some(permutation)) =
        (cases::orientation_cases(size), cases::permutation_cases(size))
    else {
        eprintln!("No case tables for a {size}x{size} cube");
        return ExitCode::FAILURE;
    };
    for (title, table) in [("Orientation", orientation), ("Permutation", permutation)] {
        println!("{title} ({} cases):", table.len());
        for case in table {
            println!("  {:<8} {}  {}", case.name, case.pattern, case.moves);
        }
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrambled_net_snapshot() {
        let mut cube = Cube::new(3);
        apply_moves(&mut cube, "R U2 R' U' R U' R' D2 F U F'");
        insta::assert_snapshot!("scrambled_net", grid::format_net(&cube));
    }

    #[test]
    fn test_play_back_drains_the_queue() {
        let mut cube = Cube::new(2);
        cube.set_animation_speed(90.0 * FRAMES_PER_SECOND);
        cube.make_moves("R U R'");
        // one quarter turn per frame
        assert_eq!(play_back(&mut cube), 3);
        assert!(!cube.is_turning());

        cube.make_move("U");
        cube.set_animations_enabled(false);
        assert_eq!(play_back(&mut cube), 1);
    }

    #[test]
    fn test_size_argument() {
        assert_eq!(parse_size("4"), Ok(4));
        assert!(parse_size("1").is_err());
        assert!(parse_size("three").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["cuber", "--size", "2", "solve", "R U R'"])
            .expect("valid arguments");
        assert_eq!(cli.size, 2);
        assert!(matches!(cli.command, Command::Solve { ref scramble } if scramble == "R U R'"));
        assert!(Cli::try_parse_from(["cuber", "cases", "--size", "1"]).is_err());
    }
}
