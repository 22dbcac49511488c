//! Walk and ride through the sample catalog and print exploration progress.
//!
//! Run with: cargo run --example explore_city

use road_explorer::catalog::{interpolate_points, sample_catalog};
use road_explorer::{ActivityType, ExplorationEngine, ExploredRoute, GeoPoint};

fn main() -> road_explorer::Result<()> {
    let mut engine = ExplorationEngine::new(sample_catalog())?;

    let stats = engine.stats();
    println!("Road Exploration Example\n");
    println!(
        "Catalog: {} roads, {:.0}m total\n",
        stats.total_roads, stats.total_distance
    );

    // Walk the length of Pratt Street on the recorded centerline
    let walk = interpolate_points(
        GeoPoint::new(39.2854, -76.6122),
        GeoPoint::new(39.2854, -76.6222),
        40,
    );

    // Ride halfway up Charles Street, a few meters off the centerline
    let ride = interpolate_points(
        GeoPoint::new(39.2800, -76.61555),
        GeoPoint::new(39.2875, -76.61555),
        25,
    );

    // A run far outside the catalog
    let run = vec![GeoPoint::new(39.3300, -76.6500), GeoPoint::new(39.3310, -76.6510)];

    let routes = vec![
        ExploredRoute::new("walk-1", walk, ActivityType::Walk, 1_700_000_000)
            .with_name("Harbor stroll"),
        ExploredRoute::new("ride-1", ride, ActivityType::Bike, 1_700_086_400),
        ExploredRoute::new("run-1", run, ActivityType::Run, 1_700_172_800),
    ];

    for route in routes {
        let update = engine.add_explored_route(route)?;
        println!("Route {}:", update.route_id);
        if update.road_changes.is_empty() {
            println!("   No new roads explored");
        }
        for change in &update.road_changes {
            println!(
                "   {}: {:.0}% -> {:.0}% ({:?})",
                change.road_id,
                change.previous_percentage * 100.0,
                change.new_percentage * 100.0,
                change.new_status
            );
        }
        println!(
            "   City explored: {} ({:.0}m of road)\n",
            update.stats.display_percentage(),
            update.stats.explored_distance
        );
    }

    println!("By activity:");
    for summary in engine.activity_summaries() {
        println!(
            "   {}: {} routes, {:.0}m",
            summary.activity_type, summary.route_count, summary.total_distance
        );
    }

    println!("\nAchievements:");
    for achievement in engine.achievements() {
        println!("   {} - {}", achievement.title, achievement.description);
    }

    Ok(())
}
