use crate::utils::calendar::errors::CalendarError;
use crate::utils::guestlist::errors::GuestlistError;
use crate::utils::invitations::errors::InvitationError;
use crate::validation::ValidateContentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    CalendarError(#[from] CalendarError),
    #[error(transparent)]
    GuestlistError(#[from] GuestlistError),
    #[error(transparent)]
    InvitationError(#[from] InvitationError),
    #[error(transparent)]
    ValidationError(#[from] ValidateContentError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::CalendarError(e) => e.user_message(),
            AppError::GuestlistError(e) => e.user_message(),
            AppError::InvitationError(e) => e.user_message(),
            AppError::ValidationError(e) => e.user_message(),
            AppError::Unexpected(e) => {
                tracing::error!("Unexpected error: {e:?}");
                "Unexpected server error".to_string()
            }
        }
    }
}
