//! Registration form data.

use secrecy::SecretString;

use pharmconnect_core::Email;

/// Sign-up details for a pharmacy joining through a central fill.
#[derive(Debug)]
pub struct PharmacyRegistration {
    pub email: Email,
    /// Accepted but never checked or stored.
    pub password: SecretString,
    pub name: String,
    pub organization_name: String,
    /// Code shared by the central fill the pharmacy orders from, as typed.
    pub connection_code: String,
}

/// Sign-up details for a new central-fill operator.
#[derive(Debug)]
pub struct CentralFillRegistration {
    pub email: Email,
    /// Accepted but never checked or stored.
    pub password: SecretString,
    pub name: String,
    pub organization_name: String,
}
