use crate::format::Format;
use crate::{Entry, Session};
use core::fmt;

/// Configurable display formatting for the history of a [`Session`].
///
/// Steps are listed newest first, one per line.
pub struct Display<'a, S> {
    session: &'a Session<S>,
    format: Format,
}

impl<S> Display<'_, S> {
    /// Show colored output (on by default).
    ///
    /// Requires the `colored` feature to be enabled.
    #[cfg(feature = "colored")]
    pub fn colored(&mut self, on: bool) -> &mut Self {
        self.format.colored = on;
        self
    }

    /// Show the operator and operand of each step (on by default).
    pub fn detailed(&mut self, on: bool) -> &mut Self {
        self.format.detailed = on;
        self
    }

    /// Show the displayed step in the output (on by default).
    pub fn head(&mut self, on: bool) -> &mut Self {
        self.format.head = on;
        self
    }

    fn fmt_entry(&self, f: &mut fmt::Formatter, index: usize, entry: &Entry) -> fmt::Result {
        self.format.position(f, index)?;
        if self.format.detailed {
            self.format.step(f, entry.get())?;
            #[cfg(feature = "chrono")]
            self.format.timestamp(f, entry.timestamp())?;
        } else {
            self.format.step(f, &entry.get().result)?;
        }
        self.format.label(f, index, self.session.head())?;
        self.format.end(f)
    }
}

impl<'a, S> From<&'a Session<S>> for Display<'a, S> {
    fn from(session: &'a Session<S>) -> Self {
        Display {
            session,
            format: Format::default(),
        }
    }
}

impl<S> fmt::Display for Display<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, entry) in self.session.history().iter().enumerate().rev() {
            self.fmt_entry(f, i, entry)?;
        }
        Ok(())
    }
}
