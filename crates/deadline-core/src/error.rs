use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid weekday: '{0}'. Use a day name like 'thursday' or 'thu', or 0-6 counting from Sunday")]
    InvalidWeekday(String),

    #[error("Invalid time of day: '{0}'. Use HH:MM or HH:MM:SS")]
    InvalidTime(String),

    #[error("Ticker error: {0}")]
    Ticker(String),
}
