mod level;
mod region;
mod state;

pub use level::RegionLevel;
pub use region::Region;
pub use state::{LabelOffset, StateCenter, StateId};
