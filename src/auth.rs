//! Simulated login and registration.
//!
//! Nothing is checked against a server: a filled-in form is a signed-in user.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::{Result, ShopError, User, MISSING_FIELDS};

#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[validate(schema(function = "email_required_when_registering", skip_on_field_errors = false))]
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(default)]
    pub register: bool,
}

fn email_required_when_registering(form: &LoginForm) -> std::result::Result<(), ValidationError> {
    if form.register && form.email.trim().is_empty() {
        return Err(ValidationError::new("email_required"));
    }
    Ok(())
}

impl LoginForm {
    /// Accepts any complete form. The password is dropped once checked for presence.
    pub fn authenticate(mut self) -> Result<User> {
        self.username = self.username.trim().to_string();
        self.validate().map_err(|_| ShopError::Validation(MISSING_FIELDS.to_string()))?;
        let username = self.username;
        let email = match self.email.trim() {
            "" => format!("{username}@example.com"),
            email => email.to_string(),
        };
        tracing::debug!(%username, register = self.register, "simulated sign-in accepted");
        Ok(User { username, email })
    }
}
