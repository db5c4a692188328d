//! Exposure session timer state machine.
//!
//! The timer itself is pure: it never schedules anything. Whoever drives it
//! owns the ~1 Hz tick loop and must stop ticking the instant the timer
//! leaves `Running`, so no tick can land after a stop, reset or teardown.

/// Phase of an exposure session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// No session; counter at zero
    Idle,
    /// Session in progress; counter advancing
    Running,
    /// Session finished but not yet reset; counter frozen
    Stopped,
}

/// Start/stop/reset stopwatch counting whole seconds of sun exposure
#[derive(Clone, Debug)]
pub struct SessionTimer {
    phase: SessionPhase,
    elapsed_seconds: u32,
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTimer {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            elapsed_seconds: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Begin a new session from `Idle` or `Stopped`, zeroing the counter.
    ///
    /// No-op while already `Running`; returns whether a session started.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            tracing::debug!("start ignored: session already running");
            return false;
        }
        self.elapsed_seconds = 0;
        self.phase = SessionPhase::Running;
        true
    }

    /// Advance the counter by one second. Only counts while `Running`.
    pub fn tick(&mut self) {
        if self.is_running() {
            self.elapsed_seconds += 1;
        }
    }

    /// Freeze the session and return the elapsed seconds to commit.
    ///
    /// Returns `None` unless the timer was `Running`, so a stray stop from
    /// `Idle` or `Stopped` can never commit a spurious zero-second gain.
    pub fn stop(&mut self) -> Option<u32> {
        if !self.is_running() {
            tracing::debug!("stop ignored: no session running");
            return None;
        }
        self.phase = SessionPhase::Stopped;
        Some(self.elapsed_seconds)
    }

    /// Force `Idle` from any phase, discarding any uncommitted elapsed time.
    pub fn reset(&mut self) {
        self.phase = SessionPhase::Idle;
        self.elapsed_seconds = 0;
    }
}
