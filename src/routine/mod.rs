//! Routine sequencer.
//!
//! Routines compose seeks and blind moves into the user-facing home, play and
//! pause behaviors. A routine stops at its first failing step, and the
//! mechanism is brought to rest after every routine whether it succeeded or
//! not.

mod sequences;

use crate::error::Result;

/// User-facing tonearm routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Routine {
    /// Return the arm to its rest.
    Home,
    /// Move to the lead-in of the selected record and lower the stylus.
    Play,
    /// Lift or lower the arm in place.
    PauseToggle,
}

/// Vertical position left by the pause toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LiftPosition {
    /// Stylus off the record.
    Raised,
    /// Stylus on the record.
    Lowered,
}

/// Run `body` on `target`, then `make_safe`, and report the first error.
///
/// `make_safe` runs on success and on failure. A failed body wins over a
/// failed cleanup.
pub(crate) fn guarded<A, T, B, F>(routine: Routine, target: &mut A, body: B, make_safe: F) -> Result<T>
where
    B: FnOnce(&mut A) -> Result<T>,
    F: FnOnce(&mut A) -> Result<()>,
{
    info!("{:?} routine started", routine);

    let outcome = body(target);
    let rest = make_safe(target);

    match (outcome, rest) {
        (Ok(value), Ok(())) => {
            info!("{:?} routine finished", routine);
            Ok(value)
        }
        (Ok(_), Err(e)) => {
            error!("{:?} routine could not reach a safe state: {:?}", routine, e);
            Err(e)
        }
        (Err(e), rest) => {
            if let Err(cleanup) = rest {
                error!("{:?} routine cleanup failed: {:?}", routine, cleanup);
            }
            warn!("{:?} routine aborted: {:?}", routine, e);
            Err(e)
        }
    }
}
