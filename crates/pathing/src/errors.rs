use std::error::Error;

/// Logs an error together with all its sources at the error level.
///
/// The first argument is the error, the remaining arguments are formatted as
/// the message prefix.
macro_rules! log_full_error {
    ($err:ident, $($arg:tt)+) => {
        tracing::error!(
            "{}: {}",
            format!($($arg)+),
            $crate::errors::full_error_message(&$err)
        );
    };
}

pub(crate) use log_full_error;

/// Returns the message of an error followed by messages of all its sources.
pub(crate) fn full_error_message(err: &dyn Error) -> String {
    let mut error_message = format!("{err}");
    let mut error = err;
    while let Some(source) = error.source() {
        error = source;
        error_message.push_str(&format!(": {error}"));
    }
    error_message
}

#[cfg(test)]
mod tests {
    use thiserror::Error;

    use super::*;
    use crate::CorridorError;

    #[derive(Error, Debug)]
    enum RequestError {
        #[error("path request failed")]
        Corridor {
            #[source]
            source: CorridorError,
        },
    }

    #[test]
    fn test_full_error_message() {
        let err = CorridorError::Empty;
        assert_eq!(full_error_message(&err), "corridor contains no triangles");

        let err = RequestError::Corridor {
            source: CorridorError::NonAdjacent {
                index: 1,
                from: 2,
                to: 7,
            },
        };
        assert_eq!(
            full_error_message(&err),
            "path request failed: triangles 2 and 7 at corridor position 1 are not adjacent"
        );
        log_full_error!(err, "Invalid corridor {}", 3);
    }
}
