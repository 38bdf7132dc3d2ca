// Stores layer - Data access
//
// Every public store method is one statement in its own transaction: it fully
// applies or fully fails. Multi-step consistency is the coordinators' job.
pub mod order_gateway;
pub mod order_store;
pub mod product_store;
pub mod user_store;

pub use order_gateway::OrderGateway;
pub use order_store::OrderStore;
pub use product_store::ProductStore;
pub use user_store::UserStore;
