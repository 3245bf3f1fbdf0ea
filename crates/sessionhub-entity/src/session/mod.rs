//! Session domain entities.

pub mod inactivity;
pub mod model;
pub mod network;
pub mod status;
pub mod view;

pub use inactivity::InactivityDuration;
pub use model::SessionRecord;
pub use network::NetworkInfo;
pub use status::SessionStatus;
pub use view::SessionView;
