use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

use rn_analysis::ComponentSummary;
use rn_core::LevelTier;
use rn_app::{
    AppError, AppResult, FacilityFilter, RouteOutcome, RouteRequest, RouteTarget,
    analyze_components, load_network, plan_route, spanning_backbone,
};

#[derive(Parser)]
#[command(name = "rn-cli")]
#[command(about = "RefNet CLI - Referral network routing and coverage analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the network and report row diagnostics
    Check {
        /// Path to the rows file (JSON or YAML)
        rows: PathBuf,
    },
    /// Route a referral from a facility
    Route {
        /// Path to the rows file (JSON or YAML)
        rows: PathBuf,
        /// Origin facility code
        origin: String,
        /// Destination facility code
        #[arg(long, conflicts_with = "nearest")]
        to: Option<String>,
        #[command(flatten)]
        nearest: NearestArgs,
    },
    /// Minimum spanning backbone of the undirected network
    Mst {
        /// Path to the rows file (JSON or YAML)
        rows: PathBuf,
        /// Span every component instead of only the first node's
        #[arg(long)]
        all_components: bool,
    },
    /// List connected components with their coverage label
    Components {
        /// Path to the rows file (JSON or YAML)
        rows: PathBuf,
        /// Restrict to facilities in this region
        #[arg(long)]
        region: Option<String>,
    },
}

#[derive(Args)]
struct NearestArgs {
    /// Route to the closest facility matching the filters
    #[arg(long)]
    nearest: bool,
    /// Lowest acceptable level tier (I, II or III)
    #[arg(long, requires = "nearest", default_value = "II")]
    tier: LevelTier,
    /// Required service
    #[arg(long, requires = "nearest")]
    service: Option<String>,
    /// Required region
    #[arg(long, requires = "nearest")]
    region: Option<String>,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { rows } => cmd_check(&rows),
        Commands::Route {
            rows,
            origin,
            to,
            nearest,
        } => cmd_route(&rows, origin, to, nearest),
        Commands::Mst {
            rows,
            all_components,
        } => cmd_mst(&rows, all_components),
        Commands::Components { rows, region } => cmd_components(&rows, region.as_deref()),
    }
}

fn cmd_check(rows: &Path) -> AppResult<()> {
    println!("Checking rows: {}", rows.display());
    let report = load_network(rows)?;
    let graph = &report.graph;

    println!(
        "  {} rows read, {} skipped",
        report.rows_read,
        report.rows_skipped()
    );
    println!(
        "  {} facilities ({} referenced only), {} relations",
        graph.node_count(),
        graph.nodes().iter().filter(|n| n.placeholder).count(),
        graph.directed_edge_count()
    );

    if report.diagnostics.is_empty() {
        println!("✓ No row diagnostics");
    } else {
        println!("Diagnostics:");
        for diagnostic in &report.diagnostics {
            println!("  {}", diagnostic);
        }
    }

    graph.check_invariants()?;
    println!("✓ Graph is consistent");
    println!("Fingerprint: {}", graph.fingerprint());
    Ok(())
}

fn cmd_route(
    rows: &Path,
    origin: String,
    to: Option<String>,
    nearest: NearestArgs,
) -> AppResult<()> {
    let target = match (to, nearest.nearest) {
        (Some(code), _) => RouteTarget::Facility(code),
        (None, true) => RouteTarget::Nearest(FacilityFilter {
            min_tier: nearest.tier,
            service: nearest.service,
            region: nearest.region,
        }),
        (None, false) => {
            return Err(AppError::InvalidInput(
                "route needs either --to <code> or --nearest".to_string(),
            ));
        }
    };
    let report = load_network(rows)?;
    let graph = &report.graph;
    let request = RouteRequest { origin, target };
    debug!(?request, "routing");

    let outcome = plan_route(graph, &request);
    match &outcome {
        RouteOutcome::Found(plan) => {
            println!("✓ Route found: {}", plan.codes.join(" -> "));
            println!("  Distance: {:.2} km", plan.distance_km);
            if let Some(node) = graph.node(plan.destination) {
                let level = node.level.as_deref().unwrap_or("unknown level");
                println!("  Destination: {} - {} ({})", node.code, node.name, level);
            }
        }
        RouteOutcome::UnknownFacility(code) => {
            println!("Unknown facility: {}", code);
        }
        RouteOutcome::NoRoute { .. } => {
            println!("No route to the destination along referral directions");
        }
        RouteOutcome::NoMatchingFacility { .. } => {
            println!("No reachable facility matches the filters");
        }
    }
    if let Some(summary) = outcome.origin_component() {
        print_origin_component(summary);
    }
    Ok(())
}

fn print_origin_component(summary: &ComponentSummary) {
    println!(
        "  Origin component: {} facilities ({})",
        summary.size,
        label_text(summary)
    );
    if summary.at_risk {
        println!("  ⚠ Origin component is at risk: small or without level III care");
    }
}

fn cmd_mst(rows: &Path, all_components: bool) -> AppResult<()> {
    let report = load_network(rows)?;
    let graph = &report.graph;
    let forest = spanning_backbone(graph, all_components);

    if forest.nodes_spanned == 0 {
        println!("Network is empty");
        return Ok(());
    }
    println!(
        "✓ Backbone spans {} of {} facilities",
        forest.nodes_spanned,
        graph.node_count()
    );
    for edge in &forest.edges {
        println!(
            "  {} - {}: {:.2} km",
            graph.code(edge.parent),
            graph.code(edge.child),
            edge.weight_km
        );
    }
    println!("  Total: {:.2} km", forest.total_weight_km);
    Ok(())
}

fn cmd_components(rows: &Path, region: Option<&str>) -> AppResult<()> {
    let report = load_network(rows)?;
    let components = analyze_components(&report.graph, region);

    if components.is_empty() {
        match region {
            Some(r) => println!("No facilities in region {}", r),
            None => println!("Network is empty"),
        }
        return Ok(());
    }
    println!("Components:");
    for (i, component) in components.iter().enumerate() {
        let summary = &component.summary;
        let risk = if summary.at_risk { " ⚠ at risk" } else { "" };
        println!(
            "  #{} - {} facilities, I/II/III = {}/{}/{} ({}){}",
            i + 1,
            summary.size,
            summary.levels.i,
            summary.levels.ii,
            summary.levels.iii,
            label_text(summary),
            risk
        );
        if !summary.regions.is_empty() {
            let regions: Vec<&str> = summary.regions.iter().map(String::as_str).collect();
            println!("    Regions: {}", regions.join(", "));
        }
        println!("    Facilities: {}", component.codes.join(", "));
    }
    Ok(())
}

fn label_text(summary: &ComponentSummary) -> String {
    summary
        .label
        .map(|label| label.to_string())
        .unwrap_or_else(|| "unclassified".to_string())
}
