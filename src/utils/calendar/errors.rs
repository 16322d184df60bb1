use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Unknown weekday `{0}`")]
    UnknownWeekday(String),
    #[error("Invalid date `{0}`")]
    InvalidDate(String),
    #[error("Unknown window `{0}`")]
    UnknownWindow(String),
}

impl CalendarError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
