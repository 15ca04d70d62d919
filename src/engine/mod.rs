//! Relocation engine: selector, relocator and accountant.

mod candidate;
mod relocate;
mod report;
mod select;

pub use candidate::{Candidate, EntryKind};
pub use relocate::{run, run_with, Action, PlannedSlot, Relocator};
pub use report::{Accountant, RelocationReport};
pub use select::Selector;
