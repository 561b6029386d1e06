//! Shared application service layer for refnet.
//!
//! Loads row files, owns the current graph, and answers the three questions
//! the front end asks: how to route a referral, what the backbone of the
//! network looks like, and which clusters are isolated.

pub mod dataset;
pub mod error;
pub mod query;
pub mod session;

// Re-export key types for convenience
pub use dataset::{RowFormat, load_network, load_rows, parse_rows};
pub use error::{AppError, AppResult};
pub use query::{
    ComponentReport, FacilityFilter, RouteOutcome, RoutePlan, RouteRequest, RouteTarget,
    analyze_components, plan_route, spanning_backbone,
};
pub use session::Session;
