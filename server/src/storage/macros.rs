//! log macro's for airport storage logging

/// Writes a debug! message to the app::storage logger
#[macro_export]
macro_rules! storage_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "app::storage", $($arg)+)
    };
}

/// Writes an info! message to the app::storage logger
#[macro_export]
macro_rules! storage_info {
    ($($arg:tt)+) => {
        log::info!(target: "app::storage", $($arg)+)
    };
}

/// Writes an warn! message to the app::storage logger
#[macro_export]
macro_rules! storage_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "app::storage", $($arg)+)
    };
}

/// Writes an error! message to the app::storage logger
#[macro_export]
macro_rules! storage_error {
    ($($arg:tt)+) => {
        log::error!(target: "app::storage", $($arg)+)
    };
}
