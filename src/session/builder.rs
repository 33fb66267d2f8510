use crate::socket::Socket;
use crate::{HistoryStore, Rounding, Session};

/// Builder for a [`Session`].
///
/// # Examples
/// ```
/// # use rust_decimal::{Decimal, RoundingStrategy};
/// # use tally::{Rounding, Session, Signal};
/// let mut session = Session::builder()
///     .capacity(100)
///     .rounding(Rounding::new(4, RoundingStrategy::MidpointNearestEven))
///     .connect(|s: Signal| { dbg!(s); })
///     .build();
/// # session.set_operand(Decimal::ONE);
/// # session.calculate().unwrap();
/// ```
#[derive(Debug)]
pub struct Builder<S = ()> {
    capacity: usize,
    rounding: Rounding,
    socket: Socket<S>,
}

impl<S> Builder<S> {
    /// Sets the capacity for the history.
    pub fn capacity(mut self, capacity: usize) -> Builder<S> {
        self.capacity = capacity;
        self
    }

    /// Sets the rounding policy used for calculation and display.
    pub fn rounding(mut self, rounding: Rounding) -> Builder<S> {
        self.rounding = rounding;
        self
    }

    /// Connects the slot.
    pub fn connect(mut self, slot: S) -> Builder<S> {
        self.socket = Socket::new(slot);
        self
    }

    /// Builds the session.
    pub fn build(self) -> Session<S> {
        Session {
            history: HistoryStore::with_capacity(self.capacity),
            cursor: Default::default(),
            accumulated: None,
            operator: None,
            operand: None,
            rounding: self.rounding,
            socket: self.socket,
        }
    }
}

impl<S> Default for Builder<S> {
    fn default() -> Self {
        Builder {
            capacity: 0,
            rounding: Rounding::default(),
            socket: Socket::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Operator, Rounding, Session};
    use rust_decimal::{Decimal, RoundingStrategy};

    #[test]
    fn build_with_rounding() {
        let mut session = Session::<()>::builder()
            .capacity(8)
            .rounding(Rounding::new(4, RoundingStrategy::MidpointAwayFromZero))
            .build();
        assert!(session.history().capacity() >= 8);
        session.set_operand(Decimal::from(2));
        session.set_operator(Operator::Divide);
        session.set_operand(Decimal::from(3));
        let result = session.calculate().unwrap();
        assert_eq!(result, Some(Decimal::new(6667, 4)));
        assert_eq!(session.peek().to_string(), "0.6667");
    }
}
