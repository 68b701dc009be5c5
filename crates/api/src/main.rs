use std::sync::Arc;

use chrono::NaiveDate;

use clientele_api::app::services::{self, AppServices};
use clientele_auth::Role;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    clientele_observability::init();

    let services = Arc::new(services::build_services());
    seed_dev_fixtures(&services)?;

    let app = clientele_api::app::build_app(services);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Seed the in-memory stores with the development accounts and a few records.
fn seed_dev_fixtures(services: &AppServices) -> anyhow::Result<()> {
    tracing::warn!("seeding insecure dev accounts (user/userpass, admin/adminpass)");

    let user =
        services.provision_account("user", "user@example.com", "userpass", vec![Role::User])?;
    services.provision_account("admin", "admin@example.com", "adminpass", vec![Role::Admin])?;

    for (first, last, dob) in [
        ("Alice", "Morgan", "1993-04-12"),
        ("Bruno", "Keller", "1988-11-02"),
        ("Chiara", "Rossi", "2001-06-30"),
    ] {
        let dob = NaiveDate::parse_from_str(dob, "%Y-%m-%d")?;
        services.add_customer(first, last, dob, user.id)?;
    }

    Ok(())
}
