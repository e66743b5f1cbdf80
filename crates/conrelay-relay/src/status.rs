//! Synthetic status lines delivered through the normal relay path.

use std::fmt::Display;

pub const PREFIX: &str = "CONSOLE PROCESS";

pub fn ended() -> String {
    format!("{PREFIX} ENDED")
}

pub fn error(err: impl Display) -> String {
    format!("{PREFIX} ERROR {err}")
}

pub fn could_not_start(command_line: &str) -> String {
    format!("{PREFIX} COULD NOT START {command_line}")
}
