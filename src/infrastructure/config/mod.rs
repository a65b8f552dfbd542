//! Local configuration storage

mod flags;
mod xdg;

pub use flags::{TomlFlagStore, FLAGS_FILE};
pub use xdg::{XdgConfigStore, APP_DIR};
