mod pid;
pub mod setup;
mod state;

#[cfg(test)]
mod tests;

pub use pid::{remove_pid, write_pid};
pub use setup::{build_pingora_server, run};
pub use state::AppState;
