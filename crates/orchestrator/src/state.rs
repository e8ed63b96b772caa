//! Per-call-site request state machine.

use assist_core::ErrorInfo;

/// Lifecycle phase of a call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No request outstanding. Success and failure both settle here.
    #[default]
    Idle,
    /// A request has been sent and has not settled.
    InFlight,
}

/// Busy/error state owned by one call site.
///
/// Invariant: while `InFlight`, `last_error` is `None`. An error from a
/// previous request never coexists with a busy flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrchestrationState {
    phase: Phase,
    last_error: Option<ErrorInfo>,
}

impl OrchestrationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True exactly while a request is in flight. Drives input disabling.
    pub fn busy(&self) -> bool {
        self.phase == Phase::InFlight
    }

    /// Error from the most recently settled request, if it failed.
    pub fn last_error(&self) -> Option<&ErrorInfo> {
        self.last_error.as_ref()
    }

    /// `Idle -> InFlight`. Rejected with `Busy` when already in flight;
    /// a rejection leaves the state untouched.
    pub fn begin(&mut self) -> Result<(), ErrorInfo> {
        match self.phase {
            Phase::InFlight => Err(ErrorInfo::busy()),
            Phase::Idle => {
                self.phase = Phase::InFlight;
                self.last_error = None;
                Ok(())
            }
        }
    }

    /// `InFlight -> Idle`, recording the failure (if any) of the settled request.
    pub fn settle(&mut self, error: Option<ErrorInfo>) {
        self.phase = Phase::Idle;
        self.last_error = error;
    }
}
