//! FFXIV Treasure Route Planner (CLI-Host).
//!
//! Importiert Schatzkarten-Koordinaten, berechnet eine Route mit Teleports
//! und gibt sie mit Etappen-Hinweisen aus.

use anyhow::Context;
use clap::Parser;
use ffxiv_treasure_route::engine::{AcceptAllRegions, FastTravelResolver, RegionValidator};
use ffxiv_treasure_route::{
    format_marker_line, parse_marker_line, AetheryteTable, AppController, AppEvent, AppIntent,
    AppState, RouteOptions, RouteStep, StaticResolver,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Kommandozeilen-Argumente
#[derive(Debug, Parser)]
#[command(name = "ffxiv-treasure-route", version, about)]
struct Cli {
    /// Textdatei mit Marker-Zeilen, z.B. "Name: Region (x, y)"
    #[arg(long)]
    markers: PathBuf,

    /// JSON-Datei mit Ätheryten ({"Aetherytes":[...]})
    #[arg(long)]
    aetherytes: Option<PathBuf>,

    /// Startpunkt im Marker-Format, z.B. "Limsa Lominsa Lower Decks (9.5, 11.2)"
    #[arg(long)]
    start: Option<String>,

    /// Optionen-Datei (TOML); Standard: neben der Binary
    #[arg(long)]
    config: Option<PathBuf>,

    /// Share-String des Bestands zusätzlich ausgeben
    #[arg(long)]
    share: bool,
}

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "FFXIV Treasure Route v{} startet...",
        env!("CARGO_PKG_VERSION")
    );

    let cli = Cli::parse();
    run(cli)
}

fn build_state(cli: &Cli) -> anyhow::Result<AppState> {
    let config_path = cli.config.clone().unwrap_or_else(RouteOptions::config_path);
    let options = RouteOptions::load_from_file(&config_path);

    let mut state = match &cli.aetherytes {
        Some(path) => {
            let table = Arc::new(AetheryteTable::load_from_file(path)?);
            let resolver: Arc<dyn FastTravelResolver> = table.clone();
            let validator: Arc<dyn RegionValidator> = table;
            AppState::with_services(resolver, validator)
        }
        None => {
            log::warn!("Keine Ätheryten-Daten: Regionswechsel haben unbekannte Kosten");
            AppState::with_services(Arc::new(StaticResolver::new()), Arc::new(AcceptAllRegions))
        }
    };
    state.options = options;
    Ok(state)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut state = build_state(&cli)?;
    let mut controller = AppController::new();

    controller.handle_intent(
        &mut state,
        AppIntent::MarkerFileImportRequested {
            path: cli.markers.clone(),
        },
    )?;

    if let Some(start) = &cli.start {
        let draft = parse_marker_line(start)
            .with_context(|| format!("Startpunkt nicht erkannt: {start:?}"))?;
        controller.handle_intent(
            &mut state,
            AppIntent::StartPositionSet {
                region: draft.region,
                position: draft.position.point,
            },
        )?;
    }

    controller.handle_intent(&mut state, AppIntent::OptimizeRequested)?;
    print_route(&state);

    if cli.share {
        controller.handle_intent(&mut state, AppIntent::ShareExportRequested)?;
        if let Some(encoded) = &state.ui.last_share_export {
            println!();
            println!("{encoded}");
        }
    }

    for event in state.drain_events() {
        match event {
            AppEvent::Imported { count } => log::debug!("Ereignis: {} Marker importiert", count),
            AppEvent::Optimized { placed_count } => {
                log::debug!("Ereignis: {} Marker eingeplant", placed_count)
            }
        }
    }

    Ok(())
}

fn print_route(state: &AppState) {
    let Some(route) = state.route.as_ref() else {
        return;
    };

    for (step_index, step) in route.steps().iter().enumerate() {
        match step {
            RouteStep::FastTravel(leg) => println!("    -> {}", leg.describe()),
            RouteStep::Visit(marker) => {
                let number = route.point_index(step_index).map_or(0, |i| i + 1);
                let collected = if marker.is_collected() { " [x]" } else { "" };
                println!("{number:>3}. {}{collected}", format_marker_line(marker));
                if let Some(warning) = marker.warning() {
                    println!("       ! {warning}");
                }
            }
        }
    }

    if let Some(msg) = &state.ui.status_message {
        println!("{msg}");
    }
}
