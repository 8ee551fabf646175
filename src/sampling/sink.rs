/// Destinations for report lines
use std::io::{self, Write};

use log::error;

pub trait ReportSink {
    fn emit(&mut self, line: &str);
}

/// Writes each line to standard output, flushing so serial monitors see it at once
#[derive(Debug, Default)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn emit(&mut self, line: &str) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", line).and_then(|_| stdout.flush()) {
            error!("Failed to write report line: {}", e);
        }
    }
}

/// Collects lines in memory
impl ReportSink for Vec<String> {
    fn emit(&mut self, line: &str) {
        self.push(line.to_string());
    }
}
