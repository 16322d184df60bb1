use std::collections::HashSet;

use thiserror::Error;

use crate::utils::analytics::models::Booking;
use crate::utils::commands::scenario::Scenario;
use crate::utils::schedule::models::{Promoter, PromoterSchedule, ScheduleEntry};

#[derive(Debug, Error)]
pub enum ValidateContentError {
    #[error("Data rejected with validation: {0}")]
    Expected(String),
    #[error("Unexpected server error")]
    Unexpected(#[from] anyhow::Error),
}

impl ValidateContentError {
    pub fn new(content: impl ToString) -> Self {
        Self::Expected(content.to_string())
    }

    pub fn user_message(&self) -> String {
        match self {
            ValidateContentError::Expected(content) => content.clone(),
            ValidateContentError::Unexpected(e) => {
                tracing::error!("Unexpected validation error: {e:?}");
                "Unexpected server error".to_string()
            }
        }
    }
}

pub trait ValidateContent {
    fn validate_content(&self) -> Result<(), ValidateContentError>;
}

impl ValidateContent for ScheduleEntry {
    fn validate_content(&self) -> Result<(), ValidateContentError> {
        if self.venue_id.is_none() && self.event_id.is_none() {
            Err(ValidateContentError::new(format!(
                "Schedule entry on {} names neither a venue nor an event",
                self.day
            )))
        } else {
            Ok(())
        }
    }
}

impl ValidateContent for PromoterSchedule {
    fn validate_content(&self) -> Result<(), ValidateContentError> {
        self.entries
            .iter()
            .try_for_each(ValidateContent::validate_content)
    }
}

impl ValidateContent for Promoter {
    fn validate_content(&self) -> Result<(), ValidateContentError> {
        if self.name.trim().is_empty() {
            return Err(ValidateContentError::new(format!(
                "Promoter {} has no name",
                self.id
            )));
        }
        self.schedule.validate_content()
    }
}

impl ValidateContent for Booking {
    fn validate_content(&self) -> Result<(), ValidateContentError> {
        let negative = [Some(self.amount), self.full_price, self.deposit_price]
            .into_iter()
            .flatten()
            .any(|price| price < 0.0);

        if negative {
            Err(ValidateContentError::new(format!(
                "Booking {} has a negative price",
                self.id
            )))
        } else {
            Ok(())
        }
    }
}

impl ValidateContent for Scenario {
    fn validate_content(&self) -> Result<(), ValidateContentError> {
        let mut seen = HashSet::new();
        for promoter in &self.promoters {
            if !seen.insert(promoter.id) {
                return Err(ValidateContentError::new(format!(
                    "Promoter {} is listed twice",
                    promoter.id
                )));
            }
            promoter.validate_content()?;
        }

        self.bookings
            .iter()
            .try_for_each(ValidateContent::validate_content)
    }
}

#[cfg(test)]
mod validation_tests {
    use time::macros::datetime;
    use time::Weekday;

    use super::*;
    use crate::utils::analytics::models::PaymentOption;

    fn booking(full_price: Option<f64>) -> Booking {
        Booking {
            id: 1,
            user_id: 101,
            venue_id: 1,
            promoter_id: Some(1),
            amount: 100.0,
            payment_option: PaymentOption::Full,
            full_price,
            deposit_price: None,
            timestamp: datetime!(2025-06-17 22:00 UTC),
        }
    }

    #[test]
    fn schedule_entry_needs_target() {
        let entry = ScheduleEntry {
            day: Weekday::Friday,
            venue_id: None,
            event_id: None,
        };
        assert!(entry.validate_content().is_err());
        assert!(ScheduleEntry::at_venue(Weekday::Friday, 1)
            .validate_content()
            .is_ok());
        assert!(ScheduleEntry::for_event(Weekday::Friday, 7)
            .validate_content()
            .is_ok());
    }

    #[test]
    fn promoter_validation() {
        let promoter = Promoter {
            id: 1,
            name: "  ".to_string(),
            schedule: PromoterSchedule::default(),
        };
        assert!(promoter.validate_content().is_err());
    }

    #[test]
    fn booking_validation() {
        assert!(booking(Some(100.0)).validate_content().is_ok());
        assert!(booking(None).validate_content().is_ok());
        assert!(booking(Some(-1.0)).validate_content().is_err());
    }
}
