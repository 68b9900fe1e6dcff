//! Aquanaut - headless 2D platformer: walk, jump, drop through bridges, swim,
//! and collect oxygen and fuel before the air runs out.

mod animation;
mod bridge;
mod character;
mod collectable;
mod config;
mod demo;
mod events;
mod ground;
mod hud;
mod level;
mod movement;
mod player;
mod resources;
mod state;
mod survival;
mod water;

pub use state::GameState;

use anyhow::{Context, Result};
use std::time::Duration;

use config::GameConfig;
use demo::DemoScript;
use level::LevelLayout;

/// Wall-clock seconds the session waits on a death before respawning.
const RESPAWN_AFTER: f32 = 1.5;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════╗");
    println!("║                    AQUANAUT                      ║");
    println!("╠══════════════════════════════════════════════════╣");
    println!("║  A/D - Move  │  Space - Jump  │  S+Space - Drop  ║");
    println!("║  W/S in water - Swim                             ║");
    println!("╚══════════════════════════════════════════════════╝");

    let config = GameConfig::load();
    if std::env::args().any(|arg| arg == "--write-config") {
        config.save();
    }

    let layout = LevelLayout::load();
    let frame_rate = config.frame_rate;
    let session_seconds = config.session_seconds;
    let mut state = GameState::new(config, &layout).context("scene setup failed")?;

    log::info!(
        "Starting session: {:.0}s at {:.0} fps, physics at {:.0} Hz",
        session_seconds,
        frame_rate,
        1.0 / state.time.fixed_timestep_seconds()
    );

    let delta = Duration::from_secs_f64(1.0 / frame_rate);
    let frames = (session_seconds as f64 * frame_rate).ceil() as u64;
    let report_every = frame_rate.round().max(1.0) as u64;
    let mut script = DemoScript::standard();
    let mut paused_since: Option<f32> = None;

    for _ in 0..frames {
        let now = state.time.elapsed_seconds();
        if script.apply(now, &mut state.input) > 0 && script.is_finished() {
            log::info!("Demo script finished at {:.2}s", now);
        }
        state.frame(delta);

        if state.time.is_paused() {
            let since = *paused_since.get_or_insert(now);
            if now - since >= RESPAWN_AFTER {
                state.respawn();
                paused_since = None;
            }
        } else {
            paused_since = None;
        }

        if state.time.frame_count() % report_every == 0 {
            println!("{}", state.hud.render_console_hud(&state.hud_data()));
        }
    }

    let ledger = state.player.ledger();
    log::info!(
        "Session over: oxygen {}, fuel {}, deaths {}, game time {:.2}s of {:.2}s",
        ledger.oxygen(),
        ledger.fuel(),
        state.player.deaths(),
        state.time.game_elapsed_seconds(),
        state.time.elapsed_seconds()
    );

    Ok(())
}
