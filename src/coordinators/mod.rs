// Coordinators layer - Workflow orchestration
//
// Coordinators sequence provider and store calls for specific API endpoints.
// The order coordinator additionally owns the compensation logic that keeps
// multi-row order changes consistent.

pub mod auth_coordinator;
pub mod order_coordinator;
pub mod order_lines;
pub mod product_coordinator;
pub mod user_coordinator;

pub use auth_coordinator::{AuthCoordinator, LoginOutcome};
pub use order_coordinator::OrderCoordinator;
pub use product_coordinator::ProductCoordinator;
pub use user_coordinator::UserCoordinator;
