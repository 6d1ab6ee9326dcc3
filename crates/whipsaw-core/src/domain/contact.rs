use serde::{Deserialize, Serialize};

use super::document::{Problems, Validate};
use crate::error::DomainError;

/// A message submitted through the public contact form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Validate for ContactMessage {
    fn validate(&self) -> Result<(), DomainError> {
        let mut problems = Problems::default();
        problems.require("name", &self.name);
        problems.require("email", &self.email);
        problems.require("message", &self.message);
        let email = self.email.trim();
        if !email.is_empty() && (!email.contains('@') || email.contains(char::is_whitespace)) {
            problems.push("email must be a valid address");
        }
        problems.finish()
    }
}
