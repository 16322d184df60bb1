use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{serde::timestamp, OffsetDateTime};

use crate::utils::calendar::errors::CalendarError;
use crate::utils::ids::{BookingId, PromoterId, UserId, VenueId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    Day,
    Week,
    Month,
    Year,
    All,
}

impl FromStr for Window {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(Window::Day),
            "week" => Ok(Window::Week),
            "month" => Ok(Window::Month),
            "year" => Ok(Window::Year),
            "all" => Ok(Window::All),
            other => Err(CalendarError::UnknownWindow(other.to_string())),
        }
    }
}

impl Display for Window {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Window::Day => write!(f, "day"),
            Window::Week => write!(f, "week"),
            Window::Month => write!(f, "month"),
            Window::Year => write!(f, "year"),
            Window::All => write!(f, "all"),
        }
    }
}

/// Anything other than `full` is collected as a deposit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOption {
    Full,
    #[default]
    #[serde(other)]
    Deposit,
}

/// Table booking as recorded by the host application.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub venue_id: VenueId,
    #[serde(default)]
    pub promoter_id: Option<PromoterId>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub payment_option: PaymentOption,
    #[serde(default)]
    pub full_price: Option<f64>,
    #[serde(default)]
    pub deposit_price: Option<f64>,
    #[serde(with = "timestamp")]
    pub timestamp: OffsetDateTime,
}

impl Booking {
    /// Price collected for the booking. Missing or non-finite prices count as 0.
    pub fn revenue(&self) -> f64 {
        let price = match self.payment_option {
            PaymentOption::Full => self.full_price,
            PaymentOption::Deposit => self.deposit_price,
        };
        price.filter(|p| p.is_finite()).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct GuestlistPerformance {
    pub approved: usize,
    pub shows: usize,
    pub no_shows: usize,
    pub pending: usize,
    pub show_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessTier {
    Vip,
    Standard,
}

impl AccessTier {
    pub fn of(is_vip: bool) -> Self {
        if is_vip {
            AccessTier::Vip
        } else {
            AccessTier::Standard
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct TierPerformance {
    pub tier: AccessTier,
    pub performance: GuestlistPerformance,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PromoterStats {
    pub promoter_id: PromoterId,
    pub name: String,
    pub revenue: f64,
    pub bookings: usize,
    pub guestlist: GuestlistPerformance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Revenue,
    Bookings,
    Approved,
    Shows,
    ShowRate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}
