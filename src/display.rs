use std::io::Write;

use crate::velocity::VelocityReadout;

pub trait VelocityDisplay: Send {
    fn update(&mut self, readout: &VelocityReadout);
}

/// Prints the current speeds as a status line
pub struct TerminalDisplay<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TerminalDisplay<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> VelocityDisplay for TerminalDisplay<W> {
    fn update(&mut self, readout: &VelocityReadout) {
        // display errors are ignored
        let _ = writeln!(
            self.out,
            "linear: {} angular: {}",
            readout.linear, readout.angular
        );
        let _ = self.out.flush();
    }
}
