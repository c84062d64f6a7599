use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use city::{CityFounder, CityTurnManager, CityTurnResult, GameInfo, TerritoryRules};
use map::{HexCoord, MapGenerator};
use rules::TerritoryConstants;
use ui::{new_shared_viewport, CityScreen, StageSize, TileIcon};

#[derive(Parser, Debug)]
#[command(author, version, about = "Replays a city territory session on a generated map", long_about = None)]
struct Args {
    /// JSON file overriding the territory constants
    #[arg(short, long)]
    constants: Option<PathBuf>,

    /// Radius of the generated hexagonal map
    #[arg(short, long, default_value_t = 8, value_parser = clap::value_parser!(i32).range(5..))]
    radius: i32,

    /// Seed for map generation
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Starting gold of the player
    #[arg(short, long, default_value_t = 100)]
    gold: i32,

    /// Turns to play after the territory has been set up
    #[arg(short, long, default_value_t = 10)]
    turns: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let constants = match &args.constants {
        Some(path) => TerritoryConstants::load(path)?,
        None => TerritoryConstants::default(),
    };
    let tile_map = MapGenerator::new(args.seed).generate_map(args.radius);
    info!("Generated a map of {} tiles with seed {}", tile_map.len(), args.seed);

    let mut game = GameInfo::new(tile_map, constants);
    let rules = TerritoryRules::default();
    let civ = game.add_civilization("Rome", args.gold);

    let founder = CityFounder::new(&rules);
    let capital = founder
        .found_city(&mut game, civ, "Roma", HexCoord::ZERO)
        .ok_or("could not found the capital")?;
    if founder.found_city(&mut game, civ, "Antium", HexCoord::new(4, 0)).is_none() {
        warn!("Antium could not be founded, playing with a single city");
    }

    let mut screen = CityScreen::new(&game, &rules, capital, new_shared_viewport(), StageSize::default());

    // put every citizen to work on the first ring
    for position in HexCoord::ZERO.neighbors() {
        screen.on_tile_clicked(&mut game, position);
    }

    // buy the cheapest tile on offer
    let cheapest = screen
        .tile_groups()
        .iter()
        .filter_map(|group| match group.icon {
            TileIcon::Buy { price, .. } => Some((price, group.position)),
            _ => None,
        })
        .min();
    if let Some((price, position)) = cheapest {
        screen.on_tile_clicked(&mut game, position);
        if screen.buy_selected_tile(&mut game) {
            info!("Bought {} for {} gold", position, price);
        } else {
            info!("Could not afford {} at {} gold", position, price);
        }
    }

    screen.map_holder_mut().on_pan_gesture(-40.0, 25.0);
    screen.map_holder_mut().on_zoom(120.0, 180.0);
    screen.map_holder_mut().on_zoom(120.0, 240.0);

    let turns = CityTurnManager::new(&rules);
    for turn in 1..=args.turns {
        let city_ids: Vec<_> = game.cities().map(|city| city.id).collect();
        for city_id in city_ids {
            if let Some(CityTurnResult::Continued { border_growth: Some(position) }) =
                turns.end_turn(&mut game, city_id)
            {
                info!("Turn {}: {} grew to {}", turn, city_id, position);
            }
        }
        screen.update(&game);
    }

    if let Some(picker) = screen.city_picker(&game) {
        info!(
            "{}: population {}, {} free, {} tiles",
            picker.city_name,
            picker.population,
            picker.free_population,
            screen.tile_groups().iter().filter(|group| group.state.is_owned()).count()
        );
    }
    if let Some(city) = game.get_city(capital) {
        let stats = &city.city_stats;
        info!(
            "{} yields {} food, {} production, {} gold per turn",
            city.name,
            stats.food(),
            stats.production(),
            stats.gold()
        );
    }

    let screen = match screen.page(&game, 1) {
        Some(next) => next,
        None => screen,
    };
    let transform = screen.map_holder().transform();
    info!(
        "Viewing {} at offset ({}, {}) and zoom {:.3}",
        screen.city_id(),
        transform.x,
        transform.y,
        transform.scale
    );

    if let Some(location) = screen.exit(&game) {
        info!("Back to the world map, centered on {}", location);
    }
    if let Some(civ) = game.get_civ(civ) {
        info!("{} ends with {} gold", civ.civ_name, civ.gold);
    }
    Ok(())
}
