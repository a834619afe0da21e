//! Bookkeeping for overlapping search invocations.
//!
//! Only one search may be in flight. Every search gets a [`SearchTicket`];
//! a response is applied only if its ticket is still current when it
//! arrives. Clearing the ingredient list invalidates the current ticket, so
//! a late response for the old list is dropped (ignore-stale-response).

/// Identifies one search invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

#[derive(Debug, Default)]
pub struct SearchSession {
    next_id: u64,
    current: Option<SearchTicket>,
    in_flight: Option<SearchTicket>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a search. Returns `None` while another search is in flight.
    pub fn begin(&mut self) -> Option<SearchTicket> {
        if self.in_flight.is_some() {
            return None;
        }

        self.next_id += 1;
        let ticket = SearchTicket(self.next_id);
        self.current = Some(ticket);
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Record that the search for `ticket` finished. Returns `true` when its
    /// results should be shown, `false` when they are stale.
    pub fn finish(&mut self, ticket: SearchTicket) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
        }
        self.current == Some(ticket)
    }

    /// Discard the current search so its results are never shown
    pub fn invalidate(&mut self) {
        self.current = None;
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }
}
