//! Opsgrid session engine.
//!
//! Owns the state the decision layer (`opsgrid-logic`) reads: events and
//! resources as entities in an `hecs` world, the shared message log, the
//! agent thought log, city status, and selection state. Every mutation
//! funnels through an intent method that re-validates against current
//! state before writing — a stale intent degrades to a reported no-op,
//! never a fault.
//!
//! # Example
//!
//! ```rust
//! use opsgrid_core::prelude::*;
//! use opsgrid_logic::roles::Role;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let scenario = Scenario::generate(&mut StdRng::seed_from_u64(7));
//! let mut session = SessionEngine::from_scenario(scenario, Role::Medical);
//!
//! let feed = session.event_feed(Default::default(), Default::default());
//! if let Some(event) = feed.first() {
//!     session.select_event(Some(event.id));
//! }
//! ```

pub mod engine;
pub mod scenario;

/// Commonly used types for convenient importing.
pub mod prelude {
    pub use crate::engine::{DispatchOutcome, SessionEngine};
    pub use crate::scenario::{EventSpec, ResourceSpec, Scenario};
}
