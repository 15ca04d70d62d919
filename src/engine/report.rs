//! Accounting for one run and the final report.

use std::fmt;

use super::relocate::Action;

/// Final counts of a run. Produced once by [`Accountant::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationReport {
    DryRun {
        found: usize,
        would_move: usize,
    },
    Live {
        found: usize,
        succeeded: usize,
        failed: usize,
    },
}

impl RelocationReport {
    pub fn found(&self) -> usize {
        match *self {
            RelocationReport::DryRun { found, .. } | RelocationReport::Live { found, .. } => found,
        }
    }

    /// A live run with at least one failed move.
    pub fn has_failures(&self) -> bool {
        matches!(*self, RelocationReport::Live { failed, .. } if failed > 0)
    }
}

impl fmt::Display for RelocationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Final Report ---")?;
        match *self {
            RelocationReport::DryRun { found, would_move } => {
                writeln!(f, "Total found:          {found}")?;
                write!(f, "Would move:           {would_move}")
            }
            RelocationReport::Live {
                found,
                succeeded,
                failed,
            } => {
                writeln!(f, "Total found:          {found}")?;
                writeln!(f, "Moved successfully:   {succeeded}")?;
                write!(f, "Failed to move:       {failed}")
            }
        }
    }
}

/// Per-run counters. One value per run, so repeated runs never share counts.
#[derive(Debug, Default)]
pub struct Accountant {
    dry_run: bool,
    found: usize,
    succeeded: usize,
    failed: usize,
    would_move: usize,
}

impl Accountant {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    pub fn record(&mut self, action: &Action) {
        self.found += 1;
        match action {
            Action::Moved { .. } => self.succeeded += 1,
            Action::Failed { .. } => self.failed += 1,
            Action::WouldMove { .. } => self.would_move += 1,
        }
    }

    pub fn finish(self) -> RelocationReport {
        if self.dry_run {
            RelocationReport::DryRun {
                found: self.found,
                would_move: self.would_move,
            }
        } else {
            RelocationReport::Live {
                found: self.found,
                succeeded: self.succeeded,
                failed: self.failed,
            }
        }
    }
}
