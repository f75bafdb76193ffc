use log::error;
use std::fmt::Debug;

pub mod env_args;

/// Log the error, then return `value_to_return` instead.
pub fn log_error<E: Debug, T>(value_to_return: T) -> impl FnOnce(E) -> T {
    |e| {
        error!("{e:#?}");
        value_to_return
    }
}

/// Log the error along with a message, then return `value_to_return` instead.
pub fn log_error_and_message<E: Debug, T>(
    message: &str,
    value_to_return: T,
) -> impl FnOnce(E) -> T {
    move |e| {
        error!("{message}\n{e:#?}");
        value_to_return
    }
}
