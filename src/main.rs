//! RoutineLog - Personal Training Log
//!
//! Prints the dashboard summary for the stored routine collection.

use anyhow::Context;
use routinelog::routines::{Dashboard, RoutineRepository};
use routinelog::storage::{config, RoutineStore, SqliteStore};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting RoutineLog v{}", env!("CARGO_PKG_VERSION"));

    let config = config::load_config().context("failed to load configuration")?;

    // Write the defaults on first run so they can be edited
    if !config::get_config_path().exists() {
        config::save_config(&config).context("failed to write default configuration")?;
        tracing::info!("Wrote default configuration to {}", config::get_config_path().display());
    }

    let db_path = config.database_path();
    let backend = SqliteStore::open(&db_path)
        .with_context(|| format!("failed to open {}", db_path.display()))?;

    let repository = RoutineRepository::open(RoutineStore::new(Arc::new(backend)));
    let dashboard = Dashboard::build(&repository, &config.history);
    let stats = dashboard.stats;

    println!("Week {}", dashboard.week);
    println!(
        "  routines: {}  completed: {}  exercises: {}  total logged: {}",
        stats.routines_this_week,
        stats.completed_this_week,
        stats.total_exercises,
        stats.total_routines
    );

    let Some(latest) = dashboard.recent.first() else {
        println!("No routines logged yet.");
        return Ok(());
    };

    println!("Recent routines:");
    for routine in &dashboard.recent {
        let status = if routine.completed { "done" } else { "open" };
        println!(
            "  {}  {:<24} {:>2} exercises  [{}]  {}",
            routine.date,
            routine.name,
            routine.exercises.len(),
            routine.week,
            status
        );
    }

    if !dashboard.progress.is_empty() {
        println!("Earlier {} sessions:", latest.name);
        for past in &dashboard.progress {
            let sets: Vec<String> = past
                .exercises
                .iter()
                .map(|e| format!("{} {}x{}", e.name, e.sets, e.reps))
                .collect();
            println!("  {}  {}", past.date, sets.join(", "));
        }
    }

    println!(
        "History: {} routines, {} pages of {}",
        dashboard.history.total_count,
        dashboard.history.total_pages,
        config.history.page_size
    );

    Ok(())
}
