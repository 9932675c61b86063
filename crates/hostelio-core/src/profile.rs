// ── Registration and profile edits ──
//
// Client-side checks run before anything reaches the backend. The backend
// only rejects missing fields and duplicate emails; the password and age
// rules live here.

use chrono::NaiveDate;
use secrecy::{ExposeSecret, SecretString};

use hostelio_api::Role;
use hostelio_api::models::{NewAccount, ProfileUpdateRequest};

use crate::error::CoreError;

/// Youngest age accepted on a profile.
pub const MIN_AGE_YEARS: u32 = 16;

const PASSWORD_LEN: std::ops::RangeInclusive<usize> = 8..=30;

/// A new seeker or owner account, as typed by the user.
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub email: String,
    pub phone: String,
    pub name: String,
    pub role: Role,
    pub password: SecretString,
    /// The password typed a second time.
    pub confirmation: SecretString,
}

impl SignupForm {
    /// Check the form and produce the account to register.
    ///
    /// Whitespace inside the phone number is dropped. Admin accounts cannot
    /// be self-registered.
    pub fn validate(&self) -> Result<NewAccount, CoreError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(CoreError::validation("email is required"));
        }
        if !email.contains('@') {
            return Err(CoreError::validation(format!("'{email}' is not an email address")));
        }
        let phone: String = self.phone.chars().filter(|c| !c.is_whitespace()).collect();
        if phone.is_empty() {
            return Err(CoreError::validation("phone number is required"));
        }
        if self.role == Role::Admin {
            return Err(CoreError::validation(
                "admin accounts cannot be created by signing up",
            ));
        }

        let password = self.password.expose_secret();
        if password != self.confirmation.expose_secret() {
            return Err(CoreError::validation("passwords do not match"));
        }
        check_password_strength(password)?;

        Ok(NewAccount {
            email: email.to_owned(),
            phone,
            name: self.name.trim().to_owned(),
            role: self.role,
        })
    }
}

/// 8 to 30 characters mixing upper case, lower case, a digit, and a symbol.
pub fn check_password_strength(password: &str) -> Result<(), CoreError> {
    let len = password.chars().count();
    let strong = PASSWORD_LEN.contains(&len)
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password
            .chars()
            .any(|c| !c.is_alphanumeric() && !c.is_whitespace());
    if strong {
        Ok(())
    } else {
        Err(CoreError::validation(
            "password must be 8-30 characters with an upper-case letter, a lower-case letter, \
             a digit, and a special character",
        ))
    }
}

/// Requested changes to the signed-in user's profile. `None` leaves a
/// field as it is.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub bio: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// An empty string clears the UPI id.
    pub upi_id: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.bio.is_none() && self.date_of_birth.is_none() && self.upi_id.is_none()
    }

    /// Check the changes against `today` and build the request body.
    pub fn validate(&self, today: NaiveDate) -> Result<ProfileUpdateRequest, CoreError> {
        if self.is_empty() {
            return Err(CoreError::validation("nothing to update"));
        }
        if let Some(dob) = self.date_of_birth {
            let age = today.years_since(dob).ok_or_else(|| {
                CoreError::validation(format!("date of birth {dob} is in the future"))
            })?;
            if age < MIN_AGE_YEARS {
                return Err(CoreError::validation(format!(
                    "you must be at least {MIN_AGE_YEARS} years old"
                )));
            }
        }
        let upi_id = self.upi_id.as_deref().map(str::trim);
        if let Some(upi) = upi_id.filter(|u| !u.is_empty() && !is_upi_id(u)) {
            return Err(CoreError::validation(format!(
                "'{upi}' is not a UPI id (expected name@bank)"
            )));
        }
        Ok(ProfileUpdateRequest {
            bio: self.bio.as_deref().map(|b| b.trim().to_owned()),
            date_of_birth: self.date_of_birth,
            upi_id: upi_id.map(str::to_owned),
        })
    }
}

/// `handle@provider`: the handle may use letters, digits, `.`, `_`, `-`;
/// the provider only letters and digits.
pub fn is_upi_id(candidate: &str) -> bool {
    let Some((handle, provider)) = candidate.split_once('@') else {
        return false;
    };
    !handle.is_empty()
        && !provider.is_empty()
        && handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        && provider.chars().all(|c| c.is_ascii_alphanumeric())
}
