pub mod actions;
pub mod completion;
pub mod config;
pub mod lists;
pub mod session;
pub mod settings;
pub mod settlements;
pub mod stats;
