pub mod cache;
pub mod selection;
pub mod session;
pub mod store;

pub use cache::ForecastCache;
pub use selection::{Selection, SelectionController};
pub use session::LocationSession;
pub use store::ForecastStore;
