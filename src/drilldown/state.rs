use crate::{error::UnsupportedRegion, types::StateId};

/// Which geometry and label pipeline is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// All states, joined with the national summary.
    National,
    /// Counties of one state; no summary join.
    County(StateId),
}

/// Identifies the detail request belonging to one selection.
/// A response may only be applied while its ticket is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DetailTicket {
    pub state: StateId,
    generation: u64,
}

/// Drill-down navigation: national view, or one selected state.
///
/// Transitions are synchronous and never fail. Every transition bumps a
/// generation counter, so a `back()` or a new `select_state()` supersedes
/// every ticket handed out before it.
#[derive(Debug, Clone, Default)]
pub struct DrillDown {
    selected: Option<StateId>,
    generation: u64,
}

impl DrillDown {
    pub fn new() -> Self { Self::default() }

    pub fn selected(&self) -> Option<StateId> { self.selected }

    /// Select `state`, switching target if another state is already selected.
    pub fn select_state(&mut self, state: StateId) -> DetailTicket {
        self.selected = Some(state);
        self.generation += 1;
        DetailTicket { state, generation: self.generation }
    }

    /// Select by display name; unknown names leave the selection untouched.
    pub fn select_state_by_name(&mut self, name: &str) -> Result<DetailTicket, UnsupportedRegion> {
        let state = StateId::from_name(name)?;
        Ok(self.select_state(state))
    }

    /// Return to the national view. No-op (returns `false`) when already there.
    pub fn back(&mut self) -> bool {
        if self.selected.take().is_none() {
            return false;
        }
        self.generation += 1;
        true
    }

    pub fn current_view(&self) -> View {
        match self.selected {
            Some(state) => View::County(state),
            None => View::National,
        }
    }

    /// Whether a response issued for `ticket` still matches the current selection.
    pub fn is_current(&self, ticket: &DetailTicket) -> bool {
        self.generation == ticket.generation && self.selected == Some(ticket.state)
    }
}
