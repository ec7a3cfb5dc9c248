//! Opsgrid Headless Validation Harness
//!
//! Sweeps the pure decision logic and the session engine without any
//! rendering shell. Runs entirely in-process — no network, no UI.
//!
//! Usage:
//!   cargo run -p opsgrid-simtest
//!   cargo run -p opsgrid-simtest -- --verbose

use opsgrid_core::prelude::*;
use opsgrid_logic::comms::{self, CommunicationMode};
use opsgrid_logic::dispatch::{self, DispatchRejection};
use opsgrid_logic::grid::{CellKind, CityGrid};
use opsgrid_logic::model::{
    EventId, EventStatus, MapPoint, MessagePriority, Receiver, RequiredResources, ResourceId,
    ResourceStatus, Severity,
};
use opsgrid_logic::ranking::{SortOrder, StatusFilter};
use opsgrid_logic::roles::{ResourceKind, Role, Subsystem};
use opsgrid_logic::viewport::{Vec2, Viewport, MIN_ZOOM};
use opsgrid_logic::visibility;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Bundled scenario (same JSON the host application ships) ─────────────
const SCENARIO_JSON: &str = include_str!("../../../data/scenario.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail: detail.into(),
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Opsgrid Validation Harness ===\n");

    let mut results = Vec::new();

    // 1. Grid generation sweep
    results.extend(validate_grid(verbose));

    // 2. Viewport pan/zoom and culling
    results.extend(validate_viewport(verbose));

    // 3. Role visibility
    results.extend(validate_visibility(verbose));

    // 4. Dispatch matching
    results.extend(validate_dispatch(verbose));

    // 5. Event feed ranking
    results.extend(validate_ranking(verbose));

    // 6. Communication routing
    results.extend(validate_comms(verbose));

    // 7. Session engine intents
    results.extend(validate_engine(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Grid Generation ──────────────────────────────────────────────────

fn validate_grid(_verbose: bool) -> Vec<TestResult> {
    println!("--- Grid Generation ---");
    let mut results = Vec::new();

    let grid = CityGrid::from_seed(20_240_601);

    results.push(check(
        "grid_cell_count",
        grid.cells().len() == 10_000,
        format!("{} cells generated", grid.cells().len()),
    ));

    let mut seen = std::collections::HashSet::new();
    let unique = grid.cells().iter().all(|c| seen.insert((c.x, c.y)));
    results.push(check(
        "grid_unique_coordinates",
        unique,
        "one cell per (x, y)",
    ));

    let road_count = grid.count_of(CellKind::Road);
    results.push(check(
        "grid_road_band_count",
        road_count == 1_900,
        format!("{road_count} road cells (expected 1900)"),
    ));

    // Park interior away from road-adjacent lines must survive the
    // priority chain for every seed.
    let mut park_ok = true;
    for seed in 0..20 {
        let g = CityGrid::from_seed(seed);
        for x in 22..=28 {
            for y in 22..=28 {
                if g.kind_at(x, y) != Some(CellKind::Park) {
                    park_ok = false;
                }
            }
        }
    }
    results.push(check(
        "grid_park_priority",
        park_ok,
        "park rectangle interior stable across 20 seeds",
    ));

    results.push(check(
        "grid_deterministic_per_seed",
        CityGrid::from_seed(7) == CityGrid::from_seed(7),
        "same seed, same map",
    ));

    let commercial = grid.count_of(CellKind::Commercial);
    let industrial = grid.count_of(CellKind::Industrial);
    let water = grid.count_of(CellKind::Water);
    results.push(check(
        "grid_distribution",
        commercial > 0 && industrial > 0 && water > 0,
        format!("{commercial} commercial, {industrial} industrial, {water} water"),
    ));

    results.push(check(
        "grid_total_lookup",
        grid.kind_at(-5, 5).is_none() && grid.kind_at(50, 100).is_none(),
        "out-of-range lookups return None",
    ));

    results
}

// ── 2. Viewport ─────────────────────────────────────────────────────────

fn validate_viewport(_verbose: bool) -> Vec<TestResult> {
    println!("--- Viewport ---");
    let mut results = Vec::new();
    let screen = Vec2::new(800.0, 600.0);

    let mut vp = Viewport::new();
    vp.begin_pan(Vec2::new(100.0, 100.0));
    vp.update_pan(Vec2::new(40.0, 160.0));
    vp.end_pan();
    results.push(check(
        "viewport_pan_offset",
        vp.offset == Vec2::new(-60.0, 60.0),
        format!("offset after drag: ({}, {})", vp.offset.x, vp.offset.y),
    ));

    let moved = vp.update_pan(Vec2::new(0.0, 0.0));
    results.push(check(
        "viewport_no_momentum",
        !moved && vp.offset == Vec2::new(-60.0, 60.0),
        "samples after release are ignored",
    ));

    let vp = Viewport::new();
    let in_window = vp.is_cell_visible(0, 0, screen) && vp.is_cell_visible(-10, -10, screen);
    let out_window = !vp.is_cell_visible(-11, 0, screen) && !vp.is_cell_visible(811, 0, screen);
    results.push(check(
        "viewport_margin_window",
        in_window && out_window,
        "10-cell margin honored on both edges",
    ));

    let mut zoomed = Viewport::new();
    zoomed.set_zoom(2.0);
    results.push(check(
        "viewport_zoom_narrows",
        !zoomed.is_cell_visible(500, 0, screen) && zoomed.is_cell_visible(300, 0, screen),
        "doubling zoom halves the visible span",
    ));

    let mut clamped = Viewport::new();
    clamped.set_zoom(-1.0);
    results.push(check(
        "viewport_zoom_clamped",
        clamped.zoom() >= MIN_ZOOM,
        format!("zoom {} after non-positive request", clamped.zoom()),
    ));

    // Predicate is pure: same inputs, same answer, state untouched.
    let vp = Viewport::new();
    let a = vp.is_cell_visible(42, 42, screen);
    let b = vp.is_cell_visible(42, 42, screen);
    results.push(check(
        "viewport_predicate_pure",
        a == b && vp.offset == Vec2::ZERO,
        "re-evaluation is stable",
    ));

    results
}

// ── 3. Role Visibility ──────────────────────────────────────────────────

fn validate_visibility(_verbose: bool) -> Vec<TestResult> {
    println!("--- Role Visibility ---");
    let mut results = Vec::new();

    let scenario = match Scenario::from_json(SCENARIO_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(check(
                "scenario_parse",
                false,
                format!("JSON parse error: {e}"),
            ));
            return results;
        }
    };
    let session = SessionEngine::from_scenario(scenario, Role::Coordinator);
    let pool = session.resources();

    let all = visibility::visible_resources(&pool, Role::Coordinator);
    results.push(check(
        "visibility_coordinator_full_pool",
        all.len() == pool.len(),
        format!("{}/{} resources visible", all.len(), pool.len()),
    ));

    let medical = visibility::visible_resources(&pool, Role::Medical);
    let only_own = medical
        .iter()
        .all(|r| matches!(r.kind, ResourceKind::Medical | ResourceKind::Coordination));
    results.push(check(
        "visibility_medical_scope",
        only_own && !medical.is_empty(),
        format!("{} resources for medical", medical.len()),
    ));

    let status = session.city_status();
    let full = visibility::visible_status(&status, Role::Coordinator);
    let own = visibility::visible_status(&status, Role::Power);
    results.push(check(
        "visibility_status_projection",
        full.subsystems.len() == 4
            && own.subsystems == vec![(Subsystem::Power, status.power)]
            && own.overall == status.overall,
        "coordinator sees four metrics, power sees one",
    ));

    results
}

// ── 4. Dispatch Matching ────────────────────────────────────────────────

fn validate_dispatch(_verbose: bool) -> Vec<TestResult> {
    println!("--- Dispatch Matching ---");
    let mut results = Vec::new();

    let event = opsgrid_logic::model::GameEvent {
        id: EventId(1),
        title: "Mass-casualty incident".into(),
        description: String::new(),
        severity: Severity::Critical,
        status: EventStatus::Active,
        location: MapPoint::new(50.0, 50.0),
        affected_systems: vec![Subsystem::Medical],
        required: RequiredResources::none().with(Subsystem::Medical, 2),
        timestamp: 1,
    };
    let unit = |id: u32, kind: ResourceKind, status: ResourceStatus| {
        opsgrid_logic::model::ResourceUnit {
            id: ResourceId(id),
            name: format!("unit-{id}"),
            kind,
            quantity: 1,
            status,
            location: MapPoint::new(0.0, 0.0),
            assigned_to: None,
        }
    };
    let pool = vec![
        unit(1, ResourceKind::Medical, ResourceStatus::Available),
        unit(2, ResourceKind::Medical, ResourceStatus::Dispatched),
        unit(3, ResourceKind::Power, ResourceStatus::Available),
        unit(4, ResourceKind::Coordination, ResourceStatus::Available),
    ];

    let eligible = dispatch::eligible_resources(&pool, &event, Role::Medical);
    results.push(check(
        "dispatch_three_predicates",
        eligible.len() == 1 && eligible[0].id == ResourceId(1),
        format!("{} of {} units eligible", eligible.len(), pool.len()),
    ));

    let verdict = dispatch::validate_dispatch(&pool[1], &event, Role::Medical);
    results.push(check(
        "dispatch_unavailable_rejected",
        verdict == Err(DispatchRejection::ResourceUnavailable),
        format!("{verdict:?}"),
    ));

    let verdict = dispatch::validate_dispatch(&pool[3], &event, Role::Medical);
    results.push(check(
        "dispatch_coordination_not_required",
        verdict == Err(DispatchRejection::NotRequired),
        format!("{verdict:?}"),
    ));

    let mut resolved = event.clone();
    resolved.status = EventStatus::Resolved;
    let verdict = dispatch::validate_dispatch(&pool[0], &resolved, Role::Medical);
    results.push(check(
        "dispatch_inactive_event_rejected",
        verdict == Err(DispatchRejection::EventNotActive),
        format!("{verdict:?}"),
    ));

    results
}

// ── 5. Feed Ranking ─────────────────────────────────────────────────────

fn validate_ranking(_verbose: bool) -> Vec<TestResult> {
    println!("--- Feed Ranking ---");
    let mut results = Vec::new();

    let mut rng = StdRng::seed_from_u64(99);
    let scenario = Scenario::generate(&mut rng);
    let session = SessionEngine::from_scenario(scenario, Role::Coordinator);

    let by_severity = session.event_feed(StatusFilter::All, SortOrder::Severity);
    let ranks: Vec<u8> = by_severity.iter().map(|e| e.severity.rank()).collect();
    let descending = ranks.windows(2).all(|w| w[0] >= w[1]);
    results.push(check(
        "ranking_severity_descending",
        descending,
        format!("ranks {ranks:?}"),
    ));

    let newest = session.event_feed(StatusFilter::All, SortOrder::Newest);
    let stamps: Vec<u64> = newest.iter().map(|e| e.timestamp).collect();
    results.push(check(
        "ranking_newest_first",
        stamps.windows(2).all(|w| w[0] >= w[1]),
        format!("stamps {stamps:?}"),
    ));

    let active = session.event_feed(StatusFilter::Active, SortOrder::Oldest);
    results.push(check(
        "ranking_status_filter",
        active.iter().all(|e| e.status == EventStatus::Active),
        format!("{} active events", active.len()),
    ));

    results
}

// ── 6. Communication Routing ────────────────────────────────────────────

fn validate_comms(_verbose: bool) -> Vec<TestResult> {
    println!("--- Communication Routing ---");
    let mut results = Vec::new();

    let team = vec![Role::Traffic, Role::Power, Role::Coordinator];

    let receivers = comms::allowed_receivers(Role::Traffic, CommunicationMode::Hierarchical, &team);
    results.push(check(
        "comms_hierarchical_upward_only",
        receivers == vec![Role::Coordinator],
        format!("{receivers:?}"),
    ));

    let receivers =
        comms::allowed_receivers(Role::Coordinator, CommunicationMode::Hierarchical, &team);
    results.push(check(
        "comms_coordinator_full_team",
        receivers == team,
        format!("{} receivers", receivers.len()),
    ));

    let receivers = comms::allowed_receivers(Role::Power, CommunicationMode::Limited, &team);
    results.push(check(
        "comms_limited_unrestricted",
        receivers == team,
        "limited mode models no extra restriction",
    ));

    let mut session = SessionEngine::new(Role::Power);
    session.send_message(
        "grid section 4 down",
        Receiver::Role(Role::Coordinator),
        MessagePriority::Urgent,
    );
    session.post_system_message("exercise started", MessagePriority::Normal);
    let own = session.transcript().len();
    results.push(check(
        "comms_sender_sees_own_direct",
        own == 2,
        format!("{own} entries in sender transcript"),
    ));

    results
}

// ── 7. Session Engine ───────────────────────────────────────────────────

fn validate_engine(verbose: bool) -> Vec<TestResult> {
    println!("--- Session Engine ---");
    let mut results = Vec::new();

    let scenario = match Scenario::from_json(SCENARIO_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(check(
                "engine_scenario_parse",
                false,
                format!("JSON parse error: {e}"),
            ));
            return results;
        }
    };
    results.push(check(
        "engine_scenario_parse",
        true,
        format!(
            "'{}': {} events, {} resources",
            scenario.name,
            scenario.events.len(),
            scenario.resources.len()
        ),
    ));

    let mut session = SessionEngine::from_scenario(scenario, Role::Medical);
    results.push(check(
        "engine_load_invariants",
        session.assignment_invariants_hold(),
        "assigned_to set iff dispatched",
    ));

    // Find an active event needing medical and its eligible unit.
    let feed = session.event_feed(StatusFilter::Active, SortOrder::Severity);
    let target = feed
        .iter()
        .find(|e| e.required.get(Subsystem::Medical) > 0)
        .map(|e| e.id);
    let Some(target) = target else {
        results.push(check(
            "engine_dispatch_target",
            false,
            "no active medical event in scenario",
        ));
        return results;
    };

    let eligible = session.eligible_for(target);
    results.push(check(
        "engine_eligible_nonempty",
        !eligible.is_empty(),
        format!("{} eligible units", eligible.len()),
    ));

    let unit = eligible[0];
    let first = session.dispatch_resource(unit, target);
    let second = session.dispatch_resource(unit, target);
    if verbose {
        println!("  dispatch race: first={first:?}, second={second:?}");
    }
    results.push(check(
        "engine_dispatch_race",
        first.is_success() && !second.is_success(),
        "exactly one of two racing intents wins",
    ));

    let held = session.resource(unit).map(|r| r.assigned_to);
    results.push(check(
        "engine_back_reference",
        held == Some(Some(target)),
        format!("{held:?}"),
    ));

    let resolved = session.resolve_event(target);
    let still_held = session
        .resource(unit)
        .map(|r| r.status == ResourceStatus::Dispatched)
        .unwrap_or(false);
    results.push(check(
        "engine_resolve_keeps_assignment",
        resolved && still_held && session.assignment_invariants_hold(),
        "resolution does not release dispatched units",
    ));

    let again = session.resolve_event(target);
    results.push(check(
        "engine_resolve_single_shot",
        !again,
        "second resolve is a no-op",
    ));

    session.post_thought(Role::Medical, "reassessing after resolution", vec![target, EventId(9_999)]);
    let thoughts = session.recent_thoughts();
    let titles = session.related_titles(thoughts[0]);
    results.push(check(
        "engine_thought_miss_tolerated",
        titles.len() == 2 && titles[1] == opsgrid_logic::thoughts::UNKNOWN_EVENT_TITLE,
        format!("{titles:?}"),
    ));

    session.select_event(Some(EventId(9_999)));
    results.push(check(
        "engine_unknown_selection_clears",
        session.selected_event().is_none(),
        "selection of unknown id falls back to None",
    ));

    // Generated scenarios load cleanly across seeds.
    let mut all_ok = true;
    for seed in 0..10 {
        let s = Scenario::generate(&mut StdRng::seed_from_u64(seed));
        let engine = SessionEngine::from_scenario(s, Role::Coordinator);
        if !engine.assignment_invariants_hold() || engine.events().is_empty() {
            all_ok = false;
        }
    }
    results.push(check(
        "engine_generated_scenarios",
        all_ok,
        "10 seeded scenarios load with invariants intact",
    ));

    results
}
