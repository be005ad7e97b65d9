pub mod log;
pub mod next;
pub mod remaining;
pub mod watch;
