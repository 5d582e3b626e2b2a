//! Session commands.
//!
//! # Usage
//!
//! ```bash
//! pharmconnect login -e pharmacy@example.com -p secret
//! pharmconnect register central-fill -e ops@fill.com -p secret -n "Ops" -o "Metro Fill"
//! pharmconnect whoami
//! pharmconnect logout
//! ```

use std::io::Write;

use clap::Args;
use secrecy::SecretString;

use pharmconnect_core::Email;
use pharmconnect_portal::Portal;
use pharmconnect_portal::models::{Membership, User};
use pharmconnect_portal::services::{CentralFillRegistration, PharmacyRegistration};
use pharmconnect_portal::views;

use super::CliError;
use crate::telemetry;

/// Account fields shared by both registration forms.
#[derive(Args)]
pub struct AccountArgs {
    /// Account email address
    #[arg(short, long)]
    pub email: String,

    /// Account password
    #[arg(short, long)]
    pub password: String,

    /// Your full name
    #[arg(short, long)]
    pub name: String,

    /// Organization name
    #[arg(short, long = "organization")]
    pub organization: String,
}

/// Sign in and show where to start.
pub async fn login(
    portal: &Portal,
    email: &str,
    password: String,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let user = portal
        .session()
        .login(email, &SecretString::from(password))
        .await?;
    telemetry::set_sentry_user(&user);

    writeln!(out, "Signed in as {} ({})", user.name, user.role().portal_title())?;
    writeln!(out, "Start at {}", views::landing_page(user.role()).path())?;
    Ok(())
}

/// Register a pharmacy linked to the central fill holding `connection_code`.
pub async fn register_pharmacy(
    portal: &Portal,
    account: AccountArgs,
    connection_code: String,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let registration = PharmacyRegistration {
        email: Email::parse(&account.email)?,
        password: SecretString::from(account.password),
        name: account.name,
        organization_name: account.organization,
        connection_code,
    };

    let user = portal.session().register_pharmacy(registration).await?;
    telemetry::set_sentry_user(&user);

    writeln!(out, "Created pharmacy account for {}", user.organization_name)?;
    for id in user.central_fill_connections() {
        writeln!(out, "Connected to central fill {id}")?;
    }
    Ok(())
}

/// Register a central fill and print its new connection code.
pub async fn register_central_fill(
    portal: &Portal,
    account: AccountArgs,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let registration = CentralFillRegistration {
        email: Email::parse(&account.email)?,
        password: SecretString::from(account.password),
        name: account.name,
        organization_name: account.organization,
    };

    let user = portal.session().register_central_fill(registration).await?;
    telemetry::set_sentry_user(&user);

    writeln!(out, "Created central fill account for {}", user.organization_name)?;
    if let Some(code) = user.central_fill_code() {
        writeln!(out, "Connection code: {code}")?;
    }
    Ok(())
}

/// Sign out.
pub fn logout(portal: &Portal) {
    portal.session().logout();
    telemetry::clear_sentry_user();
}

/// Describe the signed-in user.
pub fn whoami(portal: &Portal, out: &mut impl Write) -> Result<(), CliError> {
    match portal.session().user() {
        Some(user) => write_profile(&user, out)?,
        None => writeln!(out, "Not signed in")?,
    }
    Ok(())
}

fn write_profile(user: &User, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Name:         {}", user.name)?;
    writeln!(out, "Email:        {}", user.email)?;
    writeln!(out, "Portal:       {}", user.role().portal_title())?;
    writeln!(
        out,
        "Organization: {} ({})",
        user.organization_name, user.organization_id
    )?;

    match &user.membership {
        Membership::Pharmacy {
            central_fill_connections,
        } => writeln!(out, "Central fills: {}", join_ids(central_fill_connections))?,
        Membership::CentralFill {
            pharmacy_connections,
            central_fill_code,
        } => {
            writeln!(out, "Pharmacies:   {}", join_ids(pharmacy_connections))?;
            writeln!(out, "Code:         {central_fill_code}")?;
        }
    }

    let pages: Vec<_> = views::navigation(user.role())
        .iter()
        .copied()
        .map(views::Page::label)
        .collect();
    writeln!(out, "Pages:        {}", pages.join(", "))
}

fn join_ids<T: std::fmt::Display>(ids: &[T]) -> String {
    if ids.is_empty() {
        return "none".to_owned();
    }
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::tests::{output, portal};

    #[tokio::test]
    async fn test_login_then_whoami() {
        let portal = portal();
        let mut out = Vec::new();
        login(&portal, "centralfill@example.com", "pw".to_owned(), &mut out)
            .await
            .unwrap();
        assert_eq!(
            output(out),
            "Signed in as Jane CentralFill (Central Fill Portal)\nStart at /dashboard/pharmacies\n"
        );

        let mut out = Vec::new();
        whoami(&portal, &mut out).unwrap();
        let text = output(out);
        assert!(text.contains("Organization: XYZ Central Fill (cf-456)"));
        assert!(text.contains("Code:         XYZ12345"));
        assert!(text.contains("Pages:        Products, Orders, Pharmacies, Analytics"));
    }

    #[tokio::test]
    async fn test_register_pharmacy_rejects_bad_email() {
        let portal = portal();
        let account = AccountArgs {
            email: "not-an-email".to_owned(),
            password: "pw".to_owned(),
            name: "Sam".to_owned(),
            organization: "Lee Pharmacy".to_owned(),
        };

        let err = register_pharmacy(&portal, account, "XYZ12345".to_owned(), &mut Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::InvalidEmail(_)));
        assert!(!portal.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_register_central_fill_prints_code() {
        let portal = portal();
        let account = AccountArgs {
            email: "ops@metro.com".to_owned(),
            password: "pw".to_owned(),
            name: "Ops".to_owned(),
            organization: "Metro Fill".to_owned(),
        };

        let mut out = Vec::new();
        register_central_fill(&portal, account, &mut out).await.unwrap();
        let text = output(out);
        assert!(text.starts_with("Created central fill account for Metro Fill\n"));
        assert!(text.contains("Connection code: MET"));
    }

    #[test]
    fn test_whoami_signed_out() {
        let mut out = Vec::new();
        whoami(&portal(), &mut out).unwrap();
        assert_eq!(output(out), "Not signed in\n");
    }
}
