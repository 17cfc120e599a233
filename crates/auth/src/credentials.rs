use serde::Serialize;

use crate::Role;

/// Email/password pair.
///
/// Forwarded as-is: the client performs no validation and no retry, the
/// remote API is the authority. `Debug` never prints the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /api/auth/login`.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for LoginRequest<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            email: &credentials.email,
            password: &credentials.password,
        }
    }
}

/// Body of `POST /api/auth/register`.
#[derive(Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub role: &'a Role,
}

impl<'a> RegisterRequest<'a> {
    pub fn new(credentials: &'a Credentials, role: &'a Role) -> Self {
        Self {
            email: &credentials.email,
            password: &credentials.password,
            role,
        }
    }
}
