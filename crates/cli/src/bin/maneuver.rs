use clap::{Parser, ValueEnum};
use kerbol_mechanics::config::load_catalog;
use kerbol_mechanics::core::{time::split_duration, units::rad_to_deg};
use kerbol_mechanics::impulsive::hohmann;
use kerbol_mechanics::mission::{Apsides, MissionConfig, plan_mission};
use kerbol_mechanics::orbits::Catalog;
use kerbol_mechanics::transfer::{ManeuverPlan, ManeuverRequest, Refinement, WindowSearchConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Delta-v and transfer window planner for the Kerbol system"
)]
struct Cli {
    /// Body catalog (YAML list, TOML file or directory of TOML files)
    #[arg(long, default_value = "configs/kerbol_system.yaml")]
    catalog: String,

    /// Departure body name (case-insensitive)
    #[arg(long)]
    from: Option<String>,

    /// Destination body name (defaults to the departure body)
    #[arg(long)]
    to: Option<String>,

    /// Source orbit periapsis height in metres (defaults to the parking orbit)
    #[arg(long)]
    source_periapsis: Option<f64>,

    /// Source orbit apoapsis height in metres
    #[arg(long)]
    source_apoapsis: Option<f64>,

    /// Target orbit periapsis height in metres (defaults to the parking orbit)
    #[arg(long)]
    target_periapsis: Option<f64>,

    /// Target orbit apoapsis height in metres
    #[arg(long)]
    target_apoapsis: Option<f64>,

    /// Start from the surface
    #[arg(long, default_value_t = false)]
    launch: bool,

    /// End on the surface
    #[arg(long, default_value_t = false)]
    land: bool,

    /// Aerobrake at the destination when it has an atmosphere
    #[arg(long, default_value_t = false)]
    aerobrake: bool,

    /// Earliest departure, seconds since the universal epoch
    #[arg(long, default_value_t = 0.0)]
    start: f64,

    /// Window refinement method
    #[arg(long, value_enum, default_value_t = RefinementMode::Bisection)]
    refinement: RefinementMode,

    /// Print the plan as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Print coplanar circular Hohmann estimate between the bodies' orbits
    #[arg(long, default_value_t = false)]
    estimate_hohmann: bool,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum RefinementMode {
    Bisection,
    FalsePosition,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = load_catalog(&cli.catalog)?;
    debug!(path = %cli.catalog, bodies = catalog.len(), "catalog loaded");

    let config = MissionConfig {
        from: cli.from.clone(),
        to: cli.to.clone(),
        source: Apsides {
            periapsis: cli.source_periapsis,
            apoapsis: cli.source_apoapsis,
        },
        target: Apsides {
            periapsis: cli.target_periapsis,
            apoapsis: cli.target_apoapsis,
        },
        launch: cli.launch,
        land: cli.land,
        aerobrake: cli.aerobrake,
        start_time: cli.start,
    };
    let search = WindowSearchConfig {
        refinement: match cli.refinement {
            RefinementMode::Bisection => Refinement::Bisection,
            RefinementMode::FalsePosition => Refinement::FalsePosition,
        },
        ..WindowSearchConfig::default()
    };

    let (request, plan) = plan_mission(&catalog, &config, &search)?;
    info!(kind = %plan.kind, delta_v = plan.delta_v, "maneuver planned");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&catalog, &request, &plan);
    }

    if cli.estimate_hohmann {
        print_hohmann_estimate(&catalog, &request);
    }

    Ok(())
}

fn print_plan(catalog: &Catalog, request: &ManeuverRequest, plan: &ManeuverPlan) {
    println!("=== {} ===", request.description(catalog));
    println!("Total Δv        : {:.1} m/s", plan.delta_v);
    if let Some(dv) = plan.ejection_delta_v {
        println!("Ejection burn   : Δv = {:.1} m/s", dv);
    }
    if let Some(dv) = plan.plane_change_delta_v {
        println!("Plane change    : Δv = {:.1} m/s", dv);
    }
    if let Some(dv) = plan.capture_delta_v {
        println!("Capture burn    : Δv = {:.1} m/s", dv);
    }
    if let (Some(escape), Some(capture)) = (
        plan.hyperbolic_excess_escape_velocity,
        plan.hyperbolic_excess_capture_velocity,
    ) {
        println!(
            "Excess speeds   : v_inf out = {:.1} m/s, v_inf in = {:.1} m/s",
            escape, capture
        );
    }
    if let Some(t) = plan.transfer_time {
        println!("Departure       : {}", format_date(t));
    }
    if let Some(t) = plan.travel_time {
        println!("Travel time     : {}", format_duration(t));
    }
    if let Some(angle) = plan.transfer_phase_angle {
        println!("Phase angle     : {:.2}°", rad_to_deg(angle));
    }
    if let Some(angle) = plan.current_phase_angle {
        println!("Current phase   : {:.2}°", rad_to_deg(angle));
    }
    if let Some(angle) = plan.ejection_angle {
        println!("Ejection angle  : {:.2}°", rad_to_deg(angle));
    }
}

fn print_hohmann_estimate(catalog: &Catalog, request: &ManeuverRequest) {
    let bodies = (
        request.source_body.and_then(|id| catalog.body(id)),
        request.target_body.and_then(|id| catalog.body(id)),
    );
    let (Some(source), Some(target)) = bodies else {
        return;
    };
    let estimate = match (source.orbit, target.orbit) {
        (Some(a), Some(b)) if a.primary == b.primary => a
            .gravitational_parameter(catalog)
            .and_then(|mu| hohmann(a.semi_major_axis, b.semi_major_axis, mu)),
        _ => None,
    };
    match estimate {
        Some(h) => println!(
            "Hohmann est.    : Δv_total = {:.1} m/s (dv1={:.1}, dv2={:.1}), travel = {}",
            h.dv_total_m_s,
            h.dv1_m_s,
            h.dv2_m_s,
            format_duration(h.tof_seconds)
        ),
        None => println!("Hohmann est.    : bodies do not orbit a common primary"),
    }
}

fn format_date(seconds: f64) -> String {
    let (years, days, hours, minutes) = split_duration(seconds);
    format!(
        "year {}, day {} {:02}:{:02}",
        years + 1,
        days + 1,
        hours,
        minutes
    )
}

fn format_duration(seconds: f64) -> String {
    let (years, days, hours, minutes) = split_duration(seconds);
    if years > 0 {
        format!("{}y {}d {}h {}m", years, days, hours, minutes)
    } else {
        format!("{}d {}h {}m", days, hours, minutes)
    }
}
