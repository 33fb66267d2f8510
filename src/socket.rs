//! Module used to communicate changes in the session.

use core::mem;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{Sender, SyncSender};

/// Slot wrapper that adds some additional functionality.
#[derive(Clone, Debug)]
pub(crate) struct Socket<S>(Option<S>);

impl<S> Socket<S> {
    pub const fn new(slot: S) -> Socket<S> {
        Socket(Some(slot))
    }

    pub fn connect(&mut self, slot: Option<S>) -> Option<S> {
        mem::replace(&mut self.0, slot)
    }

    pub fn disconnect(&mut self) -> Option<S> {
        self.0.take()
    }
}

impl<S> Default for Socket<S> {
    fn default() -> Self {
        Socket(None)
    }
}

impl<S: Slot> Socket<S> {
    pub fn emit(&mut self, signal: impl FnOnce() -> Signal) {
        if let Some(slot) = &mut self.0 {
            slot.on_emit(signal());
        }
    }

    pub fn emit_if(&mut self, cond: bool, signal: impl FnOnce() -> Signal) {
        if cond {
            self.emit(signal);
        }
    }
}

/// The `Signal` describes the state change done to the session.
///
/// See [`Slot`] for more information.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Signal {
    /// Emitted when the sessions ability to undo has changed.
    Undo(bool),
    /// Emitted when the sessions ability to redo has changed.
    Redo(bool),
    /// Emitted when a calculation made while rewound discarded redoable steps.
    Branch {
        /// The number of steps that were discarded.
        discarded: usize,
    },
}

/// Use this to handle signals emitted.
///
/// This allows you to trigger events on certain state changes.
///
/// # Examples
/// ```
/// # use std::sync::mpsc;
/// # use rust_decimal::Decimal;
/// # use tally::{Operator, Session, Signal};
/// let (sender, receiver) = mpsc::channel();
/// let mut iter = receiver.try_iter();
///
/// let mut session = Session::builder().connect(sender).build();
/// session.set_operand(Decimal::from(3));
/// session.set_operand(Decimal::from(5));
/// session.calculate().unwrap();
/// assert_eq!(iter.next(), Some(Signal::Undo(true)));
/// assert_eq!(iter.next(), None);
///
/// session.set_operator(Operator::Multiply);
/// session.set_operand(Decimal::from(2));
/// session.calculate().unwrap();
/// assert_eq!(iter.next(), None);
///
/// session.undo();
/// assert_eq!(iter.next(), Some(Signal::Undo(false)));
/// assert_eq!(iter.next(), Some(Signal::Redo(true)));
/// assert_eq!(iter.next(), None);
/// ```
pub trait Slot {
    /// Receives a signal that describes the state change done to the session.
    fn on_emit(&mut self, signal: Signal);
}

impl Slot for () {
    fn on_emit(&mut self, _: Signal) {}
}

impl<F: FnMut(Signal)> Slot for F {
    fn on_emit(&mut self, signal: Signal) {
        self(signal)
    }
}

impl Slot for Sender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        self.send(signal).ok();
    }
}

impl Slot for SyncSender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        self.send(signal).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_if_respects_condition() {
        let mut signals: Vec<Signal> = Vec::new();
        let mut socket = Socket::new(|s: Signal| signals.push(s));
        socket.emit_if(false, || Signal::Undo(true));
        socket.emit_if(true, || Signal::Redo(false));
        drop(socket);
        assert_eq!(signals, [Signal::Redo(false)]);
    }

    #[test]
    fn disconnected_socket_is_silent() {
        let (sender, receiver) = std::sync::mpsc::channel();
        let mut socket = Socket::new(sender);
        let slot = socket.disconnect();
        socket.emit(|| Signal::Undo(true));
        socket.connect(slot);
        socket.emit(|| Signal::Branch { discarded: 2 });
        assert_eq!(
            receiver.try_iter().collect::<Vec<_>>(),
            [Signal::Branch { discarded: 2 }]
        );
    }
}
