//! Background services

pub mod heartbeat;

pub use heartbeat::{HeartbeatConfig, HeartbeatWorker};
