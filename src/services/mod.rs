//! Endpoint services.
//!
//! Each service is a thin, cheaply cloneable handle over the shared
//! [`RequestExecutor`](crate::execution::RequestExecutor). Operations are
//! plain `async fn`s; see [`CallbackExt`](crate::callback::CallbackExt) for
//! the callback form.

pub mod authentication;
pub mod inventory;
pub mod items;
pub mod orders;
pub mod prices;
pub mod reports;

pub use authentication::Authentication;
pub use inventory::Inventory;
pub use items::Items;
pub use orders::Orders;
pub use prices::Prices;
pub use reports::Reports;
