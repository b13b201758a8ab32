//! Single-flight request gating.
//!
//! Each coordinator owns one [`RequestGate`]. A request may only start when
//! the gate is idle; the returned [`RequestToken`] remembers the gate's
//! generation. Invalidating the gate (logout, session switch) bumps the
//! generation so a response arriving afterwards can be recognised as stale
//! and discarded.

use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct GateState {
    generation: u64,
    in_flight: bool,
}

#[derive(Debug, Default, Clone)]
pub struct RequestGate {
    state: Arc<Mutex<GateState>>,
}

fn lock(state: &Mutex<GateState>) -> MutexGuard<'_, GateState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request, or returns `None` while another one is outstanding.
    pub fn try_begin(&self) -> Option<RequestToken> {
        let mut state = lock(&self.state);
        if state.in_flight {
            return None;
        }
        state.in_flight = true;
        Some(RequestToken {
            state: self.state.clone(),
            generation: state.generation,
        })
    }

    /// Supersedes any outstanding request and reopens the gate.
    pub fn invalidate(&self) {
        let mut state = lock(&self.state);
        state.generation += 1;
        state.in_flight = false;
    }

    pub fn is_busy(&self) -> bool {
        lock(&self.state).in_flight
    }
}

/// Proof that a request is in flight. Dropping it reopens the gate unless
/// the gate was invalidated in the meantime.
#[derive(Debug)]
pub struct RequestToken {
    state: Arc<Mutex<GateState>>,
    generation: u64,
}

impl RequestToken {
    /// Whether the response for this request may still be applied.
    pub fn is_current(&self) -> bool {
        lock(&self.state).generation == self.generation
    }

    /// Ends the request. Returns `false` if it was superseded.
    pub fn finish(self) -> bool {
        self.is_current()
    }
}

impl Drop for RequestToken {
    fn drop(&mut self) {
        let mut state = lock(&self.state);
        if state.generation == self.generation {
            state.in_flight = false;
        }
    }
}
