//! Procedural city grid generation.
//!
//! The backdrop map is a fixed 100×100 cell grid. Each cell gets exactly
//! one [`CellKind`], decided by rules evaluated in strict priority
//! order — the first matching rule wins and later rules are never
//! consulted:
//!
//! 1. `Road` on every 10th column and row.
//! 2. `Commercial` on the columns/rows adjacent to a road band, for
//!    roughly 30% of eligible cells (weighted draw).
//! 3. `Industrial` in the far corner quarter (`x > 70 && y > 70`), for
//!    roughly 40% of eligible cells (weighted draw).
//! 4. `Park` inside two fixed rectangles.
//! 5. `Water` inside two fixed rectangles.
//! 6. `Residential` everywhere else.
//!
//! Generation consumes a caller-supplied RNG, so
//! [`CityGrid::from_seed`] is fully reproducible while
//! [`CityGrid::generate`] keeps the historical draw-fresh-every-time
//! behavior. Either way the grid is immutable once built; a session
//! generates one map and keeps it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Grid width in cells.
pub const GRID_WIDTH: i32 = 100;
/// Grid height in cells.
pub const GRID_HEIGHT: i32 = 100;

/// Share of road-adjacent cells that become commercial.
const COMMERCIAL_DENSITY: f64 = 0.30;
/// Share of far-corner cells that become industrial.
const INDUSTRIAL_DENSITY: f64 = 0.40;

/// Inclusive `(min_x, min_y, max_x, max_y)` rectangles.
const PARK_ZONES: [(i32, i32, i32, i32); 2] = [(20, 20, 30, 30), (60, 40, 70, 50)];
const WATER_ZONES: [(i32, i32, i32, i32); 2] = [(80, 10, 95, 30), (10, 60, 20, 90)];

/// Classification of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Road,
    Residential,
    Commercial,
    Industrial,
    Park,
    Water,
}

impl CellKind {
    pub const ALL: [CellKind; 6] = [
        CellKind::Road,
        CellKind::Residential,
        CellKind::Commercial,
        CellKind::Industrial,
        CellKind::Park,
        CellKind::Water,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CellKind::Road => "Road",
            CellKind::Residential => "Residential",
            CellKind::Commercial => "Commercial",
            CellKind::Industrial => "Industrial",
            CellKind::Park => "Park",
            CellKind::Water => "Water",
        }
    }
}

/// One cell of the generated map. Immutable once generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
    pub kind: CellKind,
}

fn in_zone(x: i32, y: i32, zone: &(i32, i32, i32, i32)) -> bool {
    let (min_x, min_y, max_x, max_y) = *zone;
    x >= min_x && x <= max_x && y >= min_y && y <= max_y
}

/// Whether the cell sits on the column/row directly beside a road band.
fn beside_road(x: i32, y: i32) -> bool {
    matches!(x % 10, 1 | 9) || matches!(y % 10, 1 | 9)
}

/// Classify one cell. Rules run in priority order; a failed weighted
/// draw means the rule did not match and evaluation falls through.
fn classify_cell(x: i32, y: i32, rng: &mut impl Rng) -> CellKind {
    if x % 10 == 0 || y % 10 == 0 {
        return CellKind::Road;
    }
    if beside_road(x, y) && rng.gen_bool(COMMERCIAL_DENSITY) {
        return CellKind::Commercial;
    }
    if x > 70 && y > 70 && rng.gen_bool(INDUSTRIAL_DENSITY) {
        return CellKind::Industrial;
    }
    if PARK_ZONES.iter().any(|z| in_zone(x, y, z)) {
        return CellKind::Park;
    }
    if WATER_ZONES.iter().any(|z| in_zone(x, y, z)) {
        return CellKind::Water;
    }
    CellKind::Residential
}

/// The generated city map: exactly one record per `(x, y)` in
/// `[0,99]×[0,99]`, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityGrid {
    cells: Vec<GridCell>,
}

impl CityGrid {
    /// Generate with the caller's RNG. Deterministic given the RNG state.
    pub fn generate_with(rng: &mut impl Rng) -> Self {
        let mut cells = Vec::with_capacity((GRID_WIDTH * GRID_HEIGHT) as usize);
        for y in 0..GRID_HEIGHT {
            for x in 0..GRID_WIDTH {
                cells.push(GridCell {
                    x,
                    y,
                    kind: classify_cell(x, y, rng),
                });
            }
        }
        Self { cells }
    }

    /// Reproducible map for a session seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::generate_with(&mut StdRng::seed_from_u64(seed))
    }

    /// Fresh map from entropy. Two calls yield different commercial and
    /// industrial scatter; callers needing a stable map generate once
    /// and retain the value for the session.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Cell kind at `(x, y)`; `None` outside the 100×100 domain.
    pub fn kind_at(&self, x: i32, y: i32) -> Option<CellKind> {
        if !(0..GRID_WIDTH).contains(&x) || !(0..GRID_HEIGHT).contains(&y) {
            return None;
        }
        Some(self.cells[(y * GRID_WIDTH + x) as usize].kind)
    }

    /// Number of cells of the given kind.
    pub fn count_of(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind == kind).count()
    }
}
