//! log macro's for nearest airport logging

/// Writes a debug! message to the app::nearest logger
#[macro_export]
macro_rules! nearest_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "app::nearest", $($arg)+)
    };
}

/// Writes an info! message to the app::nearest logger
#[macro_export]
macro_rules! nearest_info {
    ($($arg:tt)+) => {
        log::info!(target: "app::nearest", $($arg)+)
    };
}

/// Writes an warn! message to the app::nearest logger
#[macro_export]
macro_rules! nearest_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "app::nearest", $($arg)+)
    };
}

/// Writes an error! message to the app::nearest logger
#[macro_export]
macro_rules! nearest_error {
    ($($arg:tt)+) => {
        log::error!(target: "app::nearest", $($arg)+)
    };
}
