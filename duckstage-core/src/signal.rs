//! Signal-aware lifecycle control.
//!
//! One background listener task watches for interrupt and termination
//! signals and records the first one into a shared [`SignalState`]. The
//! listener never forces an exit: the foreground interactive child
//! observes the same terminal-generated signal and ends the session on
//! its own terms, after which the normal cleanup path runs and the
//! process finishes with the conventional `128 + signal` status.

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use tokio::signal::unix::{SignalKind, signal};
use tracing::debug;

use crate::error::SignalError;

const IDLE: i32 = 0;

/// Shared record of whether a termination signal arrived during the run.
///
/// Transitions exactly once, from idle to signal-received, and never
/// back. Single writer (the listener task), single reader (the
/// finalisation check), so an atomic is all the synchronisation needed.
#[derive(Debug)]
pub struct SignalState {
    signum: AtomicI32,
}

impl SignalState {
    fn new() -> Self {
        Self {
            signum: AtomicI32::new(IDLE),
        }
    }

    /// Records `signum` as the terminating signal. Returns `true` only
    /// for the call that performed the idle → signal-received
    /// transition; later signals are ignored.
    pub fn record(&self, signum: i32) -> bool {
        self.signum
            .compare_exchange(IDLE, signum, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Signal number observed during the run, if any.
    pub fn received(&self) -> Option<i32> {
        match self.signum.load(Ordering::SeqCst) {
            IDLE => None,
            signum => Some(signum),
        }
    }

    /// Conventional `128 + signal` exit status to finish the process
    /// with, when a signal was observed.
    pub fn exit_code(&self) -> Option<u8> {
        self.received()
            .and_then(|signum| u8::try_from(128 + signum).ok())
    }
}

/// Installs the background signal listener for a run.
#[derive(Debug)]
pub struct SignalController {
    state: Arc<SignalState>,
}

impl SignalController {
    /// Registers interest in SIGINT and SIGTERM and spawns the listener
    /// task. Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// Returns [`SignalError`] when handler registration fails.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime context.
    pub fn install() -> Result<Self, SignalError> {
        let mut interrupt =
            signal(SignalKind::interrupt()).map_err(|source| SignalError { source })?;
        let mut terminate =
            signal(SignalKind::terminate()).map_err(|source| SignalError { source })?;

        let state = Arc::new(SignalState::new());
        let listener = Arc::clone(&state);
        tokio::spawn(async move {
            let signum = tokio::select! {
                _ = interrupt.recv() => SignalKind::interrupt().as_raw_value(),
                _ = terminate.recv() => SignalKind::terminate().as_raw_value(),
            };
            if listener.record(signum) {
                // Notice only; the foreground child handles the signal
                // itself and cleanup runs once it exits.
                eprintln!(
                    "\nreceived signal {signum}; waiting for the session to end before cleaning up"
                );
            }
        });
        debug!("signal listener installed");

        Ok(Self { state })
    }

    /// Shared state checked during finalisation.
    pub fn state(&self) -> Arc<SignalState> {
        Arc::clone(&self.state)
    }
}
