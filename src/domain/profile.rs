/// UserProfile entity with the attributes risk scoring needs
///
/// The surrounding service owns the full account; this crate only sees
/// date of birth and gender.

use serde::{Deserialize, Serialize};
use chrono::{Datelike, NaiveDate, Utc};
use crate::domain::{DomainError, Gender, UserId};

/// Profile attributes relevant to risk assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Which user this profile belongs to
    pub user_id: UserId,
    /// Date of birth
    pub date_of_birth: NaiveDate,
    /// Recorded gender (not used in scoring)
    pub gender: Option<Gender>,
}

impl UserProfile {
    /// Create a new profile with validation
    pub fn new(
        user_id: UserId,
        date_of_birth: NaiveDate,
        gender: Option<Gender>,
    ) -> Result<Self, DomainError> {
        let today = Utc::now().date_naive();
        if date_of_birth > today {
            return Err(DomainError::InvalidDate(
                "Date of birth cannot be in the future".to_string()
            ));
        }

        Ok(Self::from_existing(user_id, date_of_birth, gender))
    }

    /// Create a profile from existing data (used when loading from database)
    pub fn from_existing(
        user_id: UserId,
        date_of_birth: NaiveDate,
        gender: Option<Gender>,
    ) -> Self {
        Self {
            user_id,
            date_of_birth,
            gender,
        }
    }

    /// Age on the given day, as a calendar-year difference
    ///
    /// This is `today.year() - birth_year`, so it reads one year high
    /// until the birthday has passed in the current year.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        today.year() - self.date_of_birth.year()
    }
}
