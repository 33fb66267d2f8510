//! The calculator session.

mod builder;

pub use builder::Builder;

use crate::socket::{Signal, Slot, Socket};
use crate::{evaluator, Display, HistoryStore, Operator, Result, Rounding, Step};
use core::fmt::{self, Formatter};
use log::{debug, trace};
use rust_decimal::Decimal;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where the session is in its history.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq)]
pub enum Cursor {
    /// New steps are appended at the tip and the last step is displayed.
    #[default]
    Live,
    /// The step at the index is displayed.
    Rewound(usize),
    /// The only step was undone and zero is displayed.
    Reset,
}

/// The outcome of an undo, redo or go to.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum Status {
    /// The cursor moved to another step.
    Moved,
    /// The only step was undone and the accumulated value is now zero.
    Reset,
    /// There are no steps that can be undone.
    NothingToUndo,
    /// The cursor is at the first step.
    CannotUndoFurther,
    /// The session is live so there is nothing to redo.
    NothingToRedo,
    /// The cursor is at the last step.
    CannotRedoFurther,
    /// The requested step is already displayed.
    AlreadyThere,
}

impl Status {
    /// Returns `true` if the session was left untouched.
    pub fn is_noop(self) -> bool {
        !matches!(self, Status::Moved | Status::Reset)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            Status::Moved => "moved",
            Status::Reset => "reset to zero",
            Status::NothingToUndo => "nothing to undo",
            Status::CannotUndoFurther => "cannot undo further",
            Status::NothingToRedo => "nothing to redo",
            Status::CannotRedoFurther => "cannot redo further",
            Status::AlreadyThere => "already there",
        })
    }
}

/// What an undo, redo or go to did, and the accumulated value afterwards.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct Outcome {
    /// What happened.
    pub status: Status,
    /// The accumulated value after the operation.
    pub value: Option<Decimal>,
}

/// The displayable state of a session.
///
/// Formats like `8.00*2`: the accumulated value padded to the rounding
/// scale, followed by the pending operator and operand.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// The accumulated value.
    pub accumulated: Option<Decimal>,
    /// The pending operator.
    pub operator: Option<Operator>,
    /// The pending operand.
    pub operand: Option<Decimal>,
    rounding: Rounding,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if let Some(accumulated) = self.accumulated {
            write!(f, "{}", self.rounding.fixed(accumulated))?;
        }
        if let Some(operator) = self.operator {
            write!(f, "{operator}")?;
        }
        if let Some(operand) = self.operand {
            write!(f, "{operand}")?;
        }
        Ok(())
    }
}

/// A chainable calculator with linear undo-redo.
///
/// Every [`calculate`](Session::calculate) records a [`Step`]. Undo and redo
/// move a cursor through the recorded steps without evaluating anything.
/// Calculating while rewound discards the steps that could have been redone
/// and keeps the cursor pinned at the new last step.
///
/// # Examples
/// ```
/// # use rust_decimal::Decimal;
/// # use tally::{Operator, Session, Status};
/// let mut session = Session::new();
/// session.set_operand(Decimal::from(3));
/// session.set_operator(Operator::Add);
/// session.set_operand(Decimal::from(5));
/// assert_eq!(session.calculate().unwrap(), Some(Decimal::from(8)));
///
/// session.set_operator(Operator::Multiply);
/// session.set_operand(Decimal::from(2));
/// assert_eq!(session.calculate().unwrap(), Some(Decimal::from(16)));
///
/// assert_eq!(session.undo().value, Some(Decimal::from(8)));
/// session.set_operand(Decimal::from(7));
/// assert_eq!(session.calculate().unwrap(), Some(Decimal::from(15)));
/// assert_eq!(session.redo().status, Status::CannotRedoFurther);
/// ```
#[derive(Debug)]
pub struct Session<S = ()> {
    history: HistoryStore,
    cursor: Cursor,
    accumulated: Option<Decimal>,
    operator: Option<Operator>,
    operand: Option<Decimal>,
    rounding: Rounding,
    socket: Socket<S>,
}

impl Session {
    /// Returns a new session.
    pub fn new() -> Session {
        Session::builder().build()
    }
}

impl<S> Session<S> {
    /// Returns a builder for a session.
    pub fn builder() -> Builder<S> {
        Builder::default()
    }

    /// Returns the accumulated value, or `None` before the first operand.
    pub fn accumulated(&self) -> Option<Decimal> {
        self.accumulated
    }

    /// Returns the cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Returns the recorded steps.
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Returns an iterator over the recorded steps, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &Step> {
        self.history.iter().map(|e| e.get())
    }

    /// Returns the rounding policy.
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Returns the number of recorded steps.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Returns `true` if no steps have been recorded.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Returns `true` if the session can undo.
    pub fn can_undo(&self) -> bool {
        match self.cursor {
            Cursor::Live => !self.history.is_empty(),
            Cursor::Rewound(index) => index > 0,
            Cursor::Reset => false,
        }
    }

    /// Returns `true` if the session can redo.
    pub fn can_redo(&self) -> bool {
        match self.cursor {
            Cursor::Rewound(index) => index + 1 < self.history.len(),
            Cursor::Live | Cursor::Reset => false,
        }
    }

    /// Returns the index of the displayed step.
    pub fn head(&self) -> Option<usize> {
        match self.cursor {
            Cursor::Live => self.history.len().checked_sub(1),
            Cursor::Rewound(index) => Some(index),
            Cursor::Reset => None,
        }
    }

    /// Returns the displayable state of the session.
    pub fn peek(&self) -> Snapshot {
        Snapshot {
            accumulated: self.accumulated,
            operator: self.operator,
            operand: self.operand,
            rounding: self.rounding,
        }
    }

    /// Sets the operand.
    ///
    /// The first operand ever given becomes the accumulated value.
    pub fn set_operand(&mut self, operand: Decimal) {
        if self.accumulated.is_none() {
            trace!("seed {operand}");
            self.accumulated = Some(operand);
        } else {
            trace!("operand {operand}");
            self.operand = Some(operand);
        }
    }

    /// Sets the operator used by the next calculation.
    pub fn set_operator(&mut self, operator: Operator) {
        trace!("operator {operator}");
        self.operator = Some(operator);
    }

    /// Parses `symbol` and sets it as the operator.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperator`](crate::Error::InvalidOperator) if
    /// `symbol` is not one of `+ - * /`. The pending operator is left as is.
    pub fn set_operator_symbol(&mut self, symbol: &str) -> Result<()> {
        let operator = symbol.parse::<Operator>()?;
        self.set_operator(operator);
        Ok(())
    }

    /// Sets how the signal should be handled when the state changes.
    ///
    /// The previous slot is returned if it exists.
    pub fn connect(&mut self, slot: S) -> Option<S> {
        self.socket.connect(Some(slot))
    }

    /// Removes and returns the slot if it exists.
    pub fn disconnect(&mut self) -> Option<S> {
        self.socket.disconnect()
    }

    /// Returns the text of the step the next [`undo`](Session::undo) steps away from.
    pub fn undo_text(&self) -> Option<String> {
        self.can_undo()
            .then(|| self.head().and_then(|i| self.text(i)))
            .flatten()
    }

    /// Returns the text of the step the next [`redo`](Session::redo) steps onto.
    pub fn redo_text(&self) -> Option<String> {
        self.can_redo()
            .then(|| self.head().and_then(|i| self.text(i + 1)))
            .flatten()
    }

    /// Returns a structure for configurable formatting of the history.
    pub fn display(&self) -> Display<'_, S> {
        Display::from(self)
    }

    fn text(&self, index: usize) -> Option<String> {
        self.history.get(index).map(|e| e.to_string())
    }

    fn move_to(&mut self, index: usize) {
        self.cursor = Cursor::Rewound(index);
        self.accumulated = Some(self.history[index].get().result);
    }

    fn outcome(&self, status: Status) -> Outcome {
        Outcome {
            status,
            value: self.accumulated,
        }
    }
}

impl<S: Slot> Session<S> {
    /// Applies the pending operator and operand to the accumulated value.
    ///
    /// Nothing happens if no operand is pending. When no operator has been
    /// set, the operand is added. Calculating while rewound discards every
    /// step after the cursor before the new step is recorded.
    ///
    /// # Errors
    /// If the evaluation fails the error is returned and the session is left
    /// unchanged.
    pub fn calculate(&mut self) -> Result<Option<Decimal>> {
        let (Some(accumulated), Some(operand)) = (self.accumulated, self.operand) else {
            return Ok(self.accumulated);
        };
        let operator = self.operator.unwrap_or_default();
        let result = evaluator::apply(accumulated, operator, operand, self.rounding)?;
        let could_undo = self.can_undo();
        let could_redo = self.can_redo();
        let step = Step::new(result, operand, operator);
        self.cursor = match self.cursor {
            Cursor::Live | Cursor::Reset => {
                self.history.append(step);
                Cursor::Live
            }
            Cursor::Rewound(index) => {
                let discarded = self.history.truncate_after(index).len();
                if discarded > 0 {
                    debug!("branch cut after {index}, discarded {discarded} steps");
                }
                self.socket
                    .emit_if(discarded > 0, || Signal::Branch { discarded });
                self.history.append(step);
                Cursor::Rewound(index + 1)
            }
        };
        debug!("calculate {accumulated} {step}");
        self.accumulated = Some(result);
        self.clear_pending();
        self.emit_changes(could_undo, could_redo);
        Ok(self.accumulated)
    }

    /// Moves the cursor back one step.
    ///
    /// From the live state the step before the last one is displayed, since
    /// the last one is already on display. Undoing the only step resets the
    /// accumulated value to zero.
    pub fn undo(&mut self) -> Outcome {
        let could_undo = self.can_undo();
        let could_redo = self.can_redo();
        let status = match self.cursor {
            Cursor::Reset => Status::NothingToUndo,
            Cursor::Live => match self.history.len() {
                0 => Status::NothingToUndo,
                1 => {
                    self.accumulated = Some(Decimal::ZERO);
                    self.cursor = Cursor::Reset;
                    Status::Reset
                }
                len => {
                    self.move_to(len - 2);
                    Status::Moved
                }
            },
            Cursor::Rewound(0) => Status::CannotUndoFurther,
            Cursor::Rewound(index) => {
                self.move_to(index - 1);
                Status::Moved
            }
        };
        self.finish("undo", status, could_undo, could_redo)
    }

    /// Moves the cursor forward one step.
    pub fn redo(&mut self) -> Outcome {
        let could_undo = self.can_undo();
        let could_redo = self.can_redo();
        let status = match self.cursor {
            Cursor::Live | Cursor::Reset => Status::NothingToRedo,
            Cursor::Rewound(index) if index + 1 >= self.history.len() => {
                Status::CannotRedoFurther
            }
            Cursor::Rewound(index) => {
                self.move_to(index + 1);
                Status::Moved
            }
        };
        self.finish("redo", status, could_undo, could_redo)
    }

    /// Moves the cursor directly to the step at `index`.
    ///
    /// Going to the displayed step leaves the session untouched, so going to
    /// the last step while live keeps the session live.
    /// Returns `None` if `index` is out of range.
    pub fn go_to(&mut self, index: usize) -> Option<Outcome> {
        if index >= self.history.len() {
            return None;
        }
        if self.head() == Some(index) {
            return Some(self.finish("go to", Status::AlreadyThere, false, false));
        }
        let could_undo = self.can_undo();
        let could_redo = self.can_redo();
        self.move_to(index);
        Some(self.finish("go to", Status::Moved, could_undo, could_redo))
    }

    /// Removes all steps without undoing them.
    ///
    /// The accumulated value is kept and becomes the new starting value.
    pub fn clear(&mut self) {
        let could_undo = self.can_undo();
        let could_redo = self.can_redo();
        debug!("clear {} steps", self.history.len());
        self.history.clear();
        self.cursor = Cursor::Live;
        self.clear_pending();
        self.emit_changes(could_undo, could_redo);
    }

    fn finish(&mut self, op: &str, status: Status, could_undo: bool, could_redo: bool) -> Outcome {
        if status.is_noop() {
            trace!("{op}: {status}");
        } else {
            debug!("{op}: {status}, cursor {:?}", self.cursor);
            self.clear_pending();
            self.emit_changes(could_undo, could_redo);
        }
        self.outcome(status)
    }

    fn clear_pending(&mut self) {
        self.operator = None;
        self.operand = None;
    }

    fn emit_changes(&mut self, could_undo: bool, could_redo: bool) {
        let can_undo = self.can_undo();
        let can_redo = self.can_redo();
        self.socket
            .emit_if(could_undo != can_undo, || Signal::Undo(can_undo));
        self.socket
            .emit_if(could_redo != can_redo, || Signal::Redo(can_redo));
    }
}

impl Default for Session {
    fn default() -> Session {
        Session::new()
    }
}
