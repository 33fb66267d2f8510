//! A chainable decimal calculator with linear undo-redo.
//!
//! Values and operators are supplied one at a time and applied left to right.
//! Every calculation is recorded as a [`Step`], and the [`Session`] can move
//! backwards and forwards through the recorded steps. Calculating after one
//! or more undos cuts the history at the displayed step, discarding the steps
//! that could have been redone.
//!
//! # Features
//!
//! * [`Session`] holds the accumulated value, the pending input and the cursor.
//! * [`HistoryStore`] is the ordered record of steps.
//! * [`evaluator::apply`] evaluates a single operation with a configurable [`Rounding`].
//! * Undo and redo report their outcome as a [`Status`] instead of failing.
//! * State changes are reported through a [`Slot`] connected with the [`Builder`].
//! * Configurable display formatting of the history, colored with the `colored` feature.
//! * Time stamps on every step when the `chrono` feature is enabled.
//! * Serialization of the value types when the `serde` feature is enabled.
//!
//! # Examples
//!
//! ```
//! use rust_decimal::Decimal;
//! use tally::{Session, Status};
//!
//! fn main() -> tally::Result<()> {
//!     let mut session = Session::new();
//!     session.set_operand(Decimal::from(3));
//!     session.set_operator_symbol("+")?;
//!     session.set_operand(Decimal::from(5));
//!     assert_eq!(session.calculate()?, Some(Decimal::from(8)));
//!
//!     session.set_operator_symbol("*")?;
//!     session.set_operand(Decimal::from(2));
//!     assert_eq!(session.calculate()?, Some(Decimal::from(16)));
//!
//!     assert_eq!(session.undo().value, Some(Decimal::from(8)));
//!     assert_eq!(session.redo().value, Some(Decimal::from(16)));
//!     assert_eq!(session.redo().status, Status::CannotRedoFurther);
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/tally")]
#![deny(missing_docs)]

mod display;
pub mod evaluator;
mod format;
mod session;
mod socket;
mod store;

pub use self::{
    display::Display,
    evaluator::{Operator, Rounding},
    session::{Builder, Cursor, Outcome, Session, Snapshot, Status},
    socket::{Signal, Slot},
    store::{Entry, HistoryStore, Step},
};
pub use rust_decimal::{Decimal, RoundingStrategy};

use thiserror::Error;

/// A specialized Result type for calculator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The errors a calculation can fail with.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// The operand of a division was zero.
    #[error("division by zero is undefined")]
    DivisionUndefined,
    /// The operator symbol is not one of `+ - * /`.
    #[error("invalid operator `{0}`")]
    InvalidOperator(String),
    /// The result does not fit in a decimal.
    #[error("result is out of range")]
    Overflow,
}
