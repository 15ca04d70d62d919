//! Filesystem operations: the move primitive and slot naming.

mod atomic;
mod dir_move;
mod duplicate;
mod entry;
mod file_move;
mod helpers;
mod io_copy;
mod meta;
mod space;
mod util;

pub use dir_move::move_dir;
pub use duplicate::resolve_destination;
pub use entry::move_entry;
pub use file_move::move_file;
