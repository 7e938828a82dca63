mod session;
mod state;

pub use session::{CountyView, DetailOutcome, DetailResponse, NationalView, Session, StateDetail};
pub use state::{DetailTicket, DrillDown, View};
