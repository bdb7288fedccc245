use std::fmt::Display;

use anyhow::Result;

use crate::error::not_found_error;

/// Turns a failed lookup into a [`NotFoundError`][`crate::error::NotFoundError`].
pub trait OrNotFound<T> {
    /// Returns the value, or an error naming the missing target.
    fn or_not_found<D>(self, target: D) -> Result<T>
    where
        D: Display;
}

impl<T> OrNotFound<T> for Option<T> {
    fn or_not_found<D>(self, target: D) -> Result<T>
    where
        D: Display,
    {
        self.ok_or_else(|| not_found_error(target))
    }
}

#[cfg(test)]
mod lookup_test {
    use crate::error::{
        NotFoundError,
        OrNotFound,
    };

    #[test]
    fn missing_value_names_target() {
        let error = None::<u8>
            .or_not_found(format_args!("mon {},{}", 1, 3))
            .unwrap_err();
        assert_eq!(error.to_string(), "mon 1,3 not found");
        assert!(error.downcast_ref::<NotFoundError>().is_some());
    }

    #[test]
    fn present_value_passes_through() {
        assert_eq!(Some(4).or_not_found("side 0").unwrap(), 4);
    }
}
