//! Station Core - Core types and utilities for Central Station
//!
//! This crate provides the foundational types shared by the content and game crates:
//! - Messages and live message sources
//! - Game clock (day and time of day)
//! - Screen identifiers for split-screen sessions
//! - Deduplicated warning logging for content validation

pub mod log_once;
pub mod message;
pub mod time;
pub mod types;

pub use log_once::LogOnce;
pub use message::{Message, MessageSource};
pub use time::{GameClock, MIDNIGHT};
pub use types::ScreenId;
