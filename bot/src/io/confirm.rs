//! Operator confirmation between iterations.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::error::{BotError, Result};

/// Input that releases the cycle to the next prompt.
pub const CONFIRM_TOKEN: &str = ".";

/// Blocks until the operator allows the next iteration.
pub trait ConfirmationGate {
    fn wait(&mut self) -> Result<()>;
}

/// Line-oriented gate over any reader/writer pair (stdin/stdout in the binary).
///
/// Each line is trimmed; anything other than [`CONFIRM_TOKEN`] is rejected
/// with a hint and the prompt is shown again. End of input is
/// [`BotError::InputClosed`].
pub struct LineGate<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineGate<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.output, "Type '{CONFIRM_TOKEN}' to continue: ")?;
        self.output.flush()
    }
}

impl LineGate<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConfirmationGate for LineGate<R, W> {
    fn wait(&mut self) -> Result<()> {
        // Raw bytes: input that is not UTF-8 is just another rejected line.
        let mut line = Vec::new();
        loop {
            self.prompt().map_err(|_| BotError::InputClosed)?;
            line.clear();
            let read = self
                .input
                .read_until(b'\n', &mut line)
                .map_err(|_| BotError::InputClosed)?;
            if read == 0 {
                return Err(BotError::InputClosed);
            }
            if line.trim_ascii() == CONFIRM_TOKEN.as_bytes() {
                debug!("operator confirmed");
                return Ok(());
            }
            writeln!(self.output, "Only '{CONFIRM_TOKEN}' continues.")
                .map_err(|_| BotError::InputClosed)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn confirms_on_dot() {
        let mut gate = LineGate::new(Cursor::new(" . \n"), Vec::new());
        gate.wait().expect("confirm");
        let out = String::from_utf8(gate.into_output()).expect("utf8");
        assert_eq!(out, "Type '.' to continue: ");
    }

    #[test]
    fn rejects_other_input_then_confirms() {
        let mut gate = LineGate::new(Cursor::new("yes\n\n..\n.\n"), Vec::new());
        gate.wait().expect("confirm");
        let out = String::from_utf8(gate.into_output()).expect("utf8");
        assert_eq!(out.matches("Only '.' continues.").count(), 3);
        assert_eq!(out.matches("Type '.' to continue: ").count(), 4);
    }

    #[test]
    fn consumes_exactly_one_confirmation_per_wait() {
        let mut gate = LineGate::new(Cursor::new(".\n.\n"), Vec::new());
        gate.wait().expect("first");
        gate.wait().expect("second");
        assert!(matches!(gate.wait(), Err(BotError::InputClosed)));
    }

    #[test]
    fn non_utf8_line_is_rejected_not_fatal() {
        let mut gate = LineGate::new(Cursor::new(vec![0xff, 0xfe, b'\n', b'.', b'\n']), Vec::new());
        gate.wait().expect("confirm after invalid line");
        let out = String::from_utf8(gate.into_output()).expect("utf8");
        assert_eq!(out.matches("Only '.' continues.").count(), 1);
    }

    #[test]
    fn end_of_input_is_input_closed() {
        let mut gate = LineGate::new(Cursor::new("nope\n"), Vec::new());
        assert!(matches!(gate.wait(), Err(BotError::InputClosed)));
    }
}
