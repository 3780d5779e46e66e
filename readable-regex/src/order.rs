//! Order checker for builder calls
//!
//! The checker knows nothing about pattern text. It receives abstract
//! [`Move`]s and rejects those that would produce an incoherent pattern:
//! - a repetition at the start, after another repetition, or right after a
//!   group start
//! - `reluctant`/`possessive` anywhere but directly after a repetition
//! - closing a group that was never opened
//! - finishing while groups are still open
//!
//! Finishing is not terminal: moves stay legal after a successful
//! [`Move::Finish`] check and the pattern can be finished again later.

use tracing::{debug, trace};

use crate::error::ConstructionError;

/// The kinds of builder calls the checker distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Any call that appends an atomic block (literal, class, anchor, ...)
    StandaloneBlock,
    /// A repetition modifier (`+`, `?`, `*`, `{n,m}`)
    Repetition,
    /// `reluctant` or `possessive`
    ReluctantOrPossessive,
    /// Opening a capturing, non-capturing or lookaround group
    StartGroup,
    /// Closing the innermost open group
    EndGroup,
    /// Finishing the pattern
    Finish,
}

/// Tracks which moves are legal next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderChecker {
    repetition_allowed: bool,
    last_move_was_repetition: bool,
    open_groups: usize,
}

impl OrderChecker {
    /// Create a checker in its initial state
    pub fn new() -> Self {
        OrderChecker::default()
    }

    /// Whether a repetition would be accepted now
    pub fn repetition_allowed(&self) -> bool {
        self.repetition_allowed
    }

    /// Whether the previous move was a repetition
    pub fn last_move_was_repetition(&self) -> bool {
        self.last_move_was_repetition
    }

    /// Number of groups opened and not yet closed
    pub fn open_groups(&self) -> usize {
        self.open_groups
    }

    /// The state after `mv`, or the reason `mv` is illegal now.
    ///
    /// `self` is left untouched either way, so callers can validate a move
    /// and commit it only once the rest of the operation has succeeded.
    pub fn after(&self, mv: Move) -> Result<OrderChecker, ConstructionError> {
        let mut next = *self;
        match mv {
            Move::StandaloneBlock => {
                next.repetition_allowed = true;
                next.last_move_was_repetition = false;
            }
            Move::Repetition => {
                if !self.repetition_allowed {
                    return Err(self.reject(mv, ConstructionError::RepetitionNotAllowed));
                }
                next.repetition_allowed = false;
                next.last_move_was_repetition = true;
            }
            Move::ReluctantOrPossessive => {
                if !self.last_move_was_repetition {
                    return Err(self.reject(mv, ConstructionError::ReluctantWithoutRepetition));
                }
                next.repetition_allowed = false;
                next.last_move_was_repetition = false;
            }
            Move::StartGroup => {
                next.open_groups += 1;
                next.repetition_allowed = false;
                next.last_move_was_repetition = false;
            }
            Move::EndGroup => {
                if self.open_groups == 0 {
                    return Err(self.reject(mv, ConstructionError::NoOpenGroup));
                }
                next.open_groups -= 1;
                next.repetition_allowed = true;
                next.last_move_was_repetition = false;
            }
            Move::Finish => {
                if self.open_groups != 0 {
                    return Err(
                        self.reject(mv, ConstructionError::UnclosedGroups(self.open_groups))
                    );
                }
            }
        }
        Ok(next)
    }

    /// Check `mv` and apply its effect
    pub fn check(&mut self, mv: Move) -> Result<(), ConstructionError> {
        *self = self.after(mv)?;
        trace!(?mv, state = ?self, "accepted construction move");
        Ok(())
    }

    /// A standalone block is always legal
    pub fn standalone_block(&mut self) {
        self.repetition_allowed = true;
        self.last_move_was_repetition = false;
    }

    /// A group start is always legal
    pub fn start_group(&mut self) {
        self.open_groups += 1;
        self.repetition_allowed = false;
        self.last_move_was_repetition = false;
    }

    /// Check that the pattern can be finished; does not change the state
    pub fn finish(&self) -> Result<(), ConstructionError> {
        self.after(Move::Finish).map(|_| ())
    }

    fn reject(&self, mv: Move, error: ConstructionError) -> ConstructionError {
        debug!(?mv, state = ?self, %error, "rejected construction move");
        error
    }
}
