use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum GuestlistError {
    #[error("Guestlist request not found")]
    NotFound,
    #[error("Cannot {action} a {from} guestlist request")]
    InvalidTransition { from: String, action: &'static str },
    #[error("An active guestlist request already exists")]
    DuplicateActiveRequest(Uuid),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl GuestlistError {
    pub fn user_message(&self) -> String {
        match self {
            GuestlistError::DuplicateActiveRequest(_) => {
                "You've already requested this guestlist".to_string()
            }
            GuestlistError::Unexpected(e) => {
                tracing::error!("Unexpected guestlist error: {e:?}");
                "Unexpected server error".to_string()
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod errors_tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            GuestlistError::DuplicateActiveRequest(Uuid::nil()).user_message(),
            "You've already requested this guestlist"
        );
        assert_eq!(
            GuestlistError::InvalidTransition {
                from: "rejected".into(),
                action: "review",
            }
            .user_message(),
            "Cannot review a rejected guestlist request"
        );
        assert_eq!(
            GuestlistError::Unexpected(anyhow::anyhow!("lock poisoned")).user_message(),
            "Unexpected server error"
        );
    }
}
