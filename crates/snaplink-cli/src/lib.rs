pub use snaplink_core as core;

pub mod cli;
pub mod client;
pub mod clipboard;
pub mod color;
pub mod completion;
pub mod config;
pub mod logging;
pub mod password;
pub mod qr;
pub mod reveal;
pub mod share;
pub mod shorten;
