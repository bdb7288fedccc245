use anyhow::Error;

/// [`assert`]s that the result is an [`Error`] with the given message.
#[track_caller]
pub fn assert_error_message<T>(result: Result<T, Error>, message: &str) {
    match result {
        Ok(_) => panic!("expected error \"{message}\", got a value"),
        Err(err) => pretty_assertions::assert_eq!(format!("{err:#}"), message),
    }
}

/// [`assert`]s that the result is an [`Error`] that contains the given message.
#[track_caller]
pub fn assert_error_message_contains<T>(result: Result<T, Error>, message: &str) {
    assert!(result.is_err_and(|err| format!("{err:#}").contains(message)))
}
