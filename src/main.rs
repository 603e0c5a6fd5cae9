//! # Delve Main Entry Point
//!
//! Parses arguments, initializes logging, shows the intro screen, and runs
//! the macroquad game loop around the simulation core.

use clap::Parser;
use log::info;
use macroquad::prelude::*;

use delve::{
    DelveResult, GenerationConfig, InputHandler, MacroquadDisplay, PlayerInput, Session,
};

/// Command line arguments for Delve.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A small turn-based roguelite dungeon crawler")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log filter (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[macroquad::main("Delve")]
async fn main() -> DelveResult<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .init();

    // `::rand` because the macroquad prelude exports its own `rand` module.
    let seed = args.seed.unwrap_or_else(::rand::random::<u64>);
    info!("starting delve v{} with seed {seed}", delve::VERSION);

    request_new_screen_size(1320.0, 620.0);

    show_intro().await;

    let config = GenerationConfig::new(seed);
    let mut session = Session::new(config)?;
    let input_handler = InputHandler::new();
    let mut display = MacroquadDisplay::new();

    loop {
        if let Some(input) = input_handler.get_input() {
            match input {
                PlayerInput::Quit => {
                    info!("player quit on level {}", session.level);
                    break;
                }
                PlayerInput::Move(direction) => session.submit_move(direction)?,
                PlayerInput::NextLevel => session.advance_level()?,
                PlayerInput::Restart => session.restart()?,
            }
        }

        display.add_flashes(session.take_hit_events());
        display.render(&session);

        next_frame().await;
    }

    info!("game loop ended");
    Ok(())
}

/// Shows the intro card until any key is pressed.
async fn show_intro() {
    let lines = [
        ("Delve", 44.0, SKYBLUE),
        ("", 20.0, WHITE),
        ("A tiny roguelite dungeon crawler", 24.0, WHITE),
        ("", 20.0, WHITE),
        ("Move with arrows / WASD / HJKL", 20.0, GRAY),
        ("Kill enemies, survive, go deeper", 20.0, GRAY),
        ("", 20.0, WHITE),
        ("Press any key to enter...", 22.0, GREEN),
    ];

    loop {
        clear_background(BLACK);

        let mut y = screen_height() / 2.0 - 120.0;
        for (text, size, color) in lines {
            let dims = measure_text(text, None, size as u16, 1.0);
            draw_text(
                text,
                (screen_width() - dims.width) / 2.0,
                y,
                size,
                color,
            );
            y += size + 8.0;
        }

        if get_last_key_pressed().is_some() {
            break;
        }
        next_frame().await;
    }
}
