//! Developer tooling for inspecting room generation and progression from the
//! command line, without booting the game host.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clanker_core::{
    generate_room, generate_runtime_seed, Cell, Director, DirectorConfig, FloorTile, GenConfig,
    PropKind, Room, WatchdogPolicy, WorldVec,
};

#[derive(Parser)]
#[command(name = "clanker-tools", about = "Inspect clanker room generation and progression")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a single room and print it as ASCII art.
    Render {
        /// Room seed. Omit for a fresh runtime seed.
        #[arg(long)]
        seed: Option<u64>,
        /// Optional JSON config file overriding the generation defaults.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Emit a JSON summary instead of ASCII art.
        #[arg(long)]
        json: bool,
    },
    /// Run a director through a number of cleared rooms and print the events.
    Simulate {
        /// Run seed. Omit for a fresh runtime seed.
        #[arg(long)]
        seed: Option<u64>,
        /// How many rooms to report as cleared.
        #[arg(long, default_value_t = 6)]
        clears: u32,
        /// Use the force-advance watchdog policy instead of log-only.
        #[arg(long)]
        force_advance: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Render { seed, config, json } => render(seed, config, json),
        Command::Simulate { seed, clears, force_advance } => simulate(seed, clears, force_advance),
    }
}

fn render(seed: Option<u64>, config_path: Option<PathBuf>, json: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => load_gen_config(&path)?,
        None => GenConfig::default(),
    };
    let seed = seed.unwrap_or_else(generate_runtime_seed);
    let room = generate_room(&config, seed);

    if json {
        println!("{}", serde_json::to_string_pretty(&summarize(&room))?);
    } else {
        println!("seed: {seed}");
        println!("fingerprint: {:016x}", room.layout_fingerprint());
        print!("{}", render_ascii(&room));
    }
    Ok(())
}

fn simulate(seed: Option<u64>, clears: u32, force_advance: bool) -> Result<()> {
    let policy =
        if force_advance { WatchdogPolicy::ForceAdvance } else { WatchdogPolicy::LogOnly };
    let config = DirectorConfig { watchdog_policy: policy, ..DirectorConfig::default() };

    let run_seed = seed.unwrap_or_else(generate_runtime_seed);
    let mut director = Director::with_seed(config, run_seed);
    director
        .initialize(Some(WorldVec::ZERO))
        .context("director refused to start without a player")?;

    println!("run seed: {run_seed}");
    for cleared in 0..=clears {
        for event in director.drain_events() {
            println!("[level {} cleared {cleared}] {event:?}", director.level());
        }
        if cleared < clears {
            director.on_room_cleared();
        }
    }
    Ok(())
}

fn load_gen_config(path: &PathBuf) -> Result<GenConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
}

/// One character per cell, perimeter included. Props win over tiles so doors
/// and torches show up on the wall ring.
fn render_ascii(room: &Room) -> String {
    let grid = &room.grid;
    let mut out = String::new();

    for y in (grid.y_min() - 1)..=(grid.y_max() + 1) {
        for x in (grid.x_min() - 1)..=(grid.x_max() + 1) {
            let cell = Cell { y, x };
            let glyph = if let Some(placement) = room.props.iter().find(|p| p.cell == cell) {
                match placement.kind {
                    PropKind::Door => 'D',
                    PropKind::Torch => 't',
                    PropKind::Chest => 'C',
                    PropKind::Pot => 'o',
                    PropKind::Skull => 's',
                    PropKind::Stairs => '>',
                }
            } else if grid.has_wall(cell) {
                '#'
            } else {
                match grid.floor_at(cell) {
                    Some(FloorTile::VentPlate) => ',',
                    Some(_) => '.',
                    None => ' ',
                }
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn summarize(room: &Room) -> serde_json::Value {
    let count =
        |kind: PropKind| room.props.iter().filter(|p| p.kind == kind).count();
    serde_json::json!({
        "seed": room.seed,
        "width": room.width(),
        "height": room.height(),
        "fingerprint": format!("{:016x}", room.layout_fingerprint()),
        "entry_cell": room.entry_cell.map(|cell| [cell.y, cell.x]),
        "props": {
            "doors": count(PropKind::Door),
            "torches": count(PropKind::Torch),
            "chests": count(PropKind::Chest),
            "pots": count(PropKind::Pot),
            "skulls": count(PropKind::Skull),
            "stairs": count(PropKind::Stairs),
        },
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn ascii_render_covers_the_full_ring_and_is_deterministic() {
        let room = generate_room(&GenConfig::default(), 7);
        let art = render_ascii(&room);

        let lines: Vec<&str> = art.lines().collect();
        assert_eq!(lines.len(), room.height() as usize + 2);
        for line in &lines {
            assert_eq!(line.chars().count(), room.width() as usize + 2);
        }
        assert!(art.contains('D'), "door glyph missing");
        assert!(art.contains('#'), "wall glyph missing");

        let again = render_ascii(&generate_room(&GenConfig::default(), 7));
        assert_eq!(art, again);
    }

    #[test]
    fn gen_config_loads_from_a_json_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"room_width": 20, "room_height": 12}}"#).expect("write config");

        let config = load_gen_config(&file.path().to_path_buf()).expect("load config");
        assert_eq!(config.room_width, 20);
        assert_eq!(config.room_height, 12);
        assert_eq!(config.tile_size, 32.0, "unset fields keep their defaults");
    }

    #[test]
    fn missing_config_file_reports_the_path() {
        let error = load_gen_config(&PathBuf::from("/nonexistent/clanker.json"))
            .expect_err("missing file must error");
        assert!(format!("{error:#}").contains("/nonexistent/clanker.json"));
    }
}
