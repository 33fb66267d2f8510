#![cfg_attr(not(feature = "colored"), allow(unused_variables))]

#[cfg(feature = "chrono")]
use chrono::{DateTime, Utc};
#[cfg(feature = "colored")]
use colored::Colorize;
use core::fmt::{self, Write};

#[derive(Copy, Clone, Debug)]
pub(crate) struct Format {
    #[cfg(feature = "colored")]
    pub colored: bool,
    pub detailed: bool,
    pub head: bool,
}

impl Default for Format {
    fn default() -> Self {
        Format {
            #[cfg(feature = "colored")]
            colored: true,
            detailed: true,
            head: true,
        }
    }
}

impl Format {
    pub fn position(self, f: &mut fmt::Formatter, index: usize) -> fmt::Result {
        #[cfg(feature = "colored")]
        if self.colored {
            return write!(f, "{}", index.to_string().yellow().bold());
        }
        write!(f, "{index}")
    }

    pub fn step(self, f: &mut fmt::Formatter, step: &impl fmt::Display) -> fmt::Result {
        #[cfg(feature = "colored")]
        if self.colored {
            return write!(f, " {}", step.to_string().cyan());
        }
        write!(f, " {step}")
    }

    pub fn label(self, f: &mut fmt::Formatter, at: usize, head: Option<usize>) -> fmt::Result {
        if !self.head || head != Some(at) {
            return Ok(());
        }
        #[cfg(feature = "colored")]
        if self.colored {
            return write!(f, " {}{}{}", "[".yellow(), "HEAD".cyan().bold(), "]".yellow());
        }
        f.write_str(" [HEAD]")
    }

    #[cfg(feature = "chrono")]
    pub fn timestamp(self, f: &mut fmt::Formatter, at: DateTime<Utc>) -> fmt::Result {
        let at = at.format("%H:%M:%S%.3f").to_string();
        #[cfg(feature = "colored")]
        if self.colored {
            return write!(f, " {}", at.yellow());
        }
        write!(f, " {at}")
    }

    pub fn end(self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char('\n')
    }
}
