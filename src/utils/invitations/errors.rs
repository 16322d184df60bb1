use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvitationError {
    #[error("Invitation not found")]
    NotFound,
    #[error("Cannot {action} a {from} invitation")]
    InvalidTransition { from: String, action: &'static str },
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl InvitationError {
    pub fn user_message(&self) -> String {
        match self {
            InvitationError::Unexpected(e) => {
                tracing::error!("Unexpected invitation error: {e:?}");
                "Unexpected server error".to_string()
            }
            _ => self.to_string(),
        }
    }
}
