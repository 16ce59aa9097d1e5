pub mod context;
pub mod schedule;
pub mod session;
pub mod time;
pub mod watch;
