//! Customer directory - Registration and phone-number lookup.

use crate::{
    core::{
        ledger::round_cents,
        session::{Capability, Session},
    },
    entities::{Customer, customer},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::{info, instrument};

/// Number of digits in a customer phone number
pub const PHONE_DIGITS: usize = 10;

/// Whether `phone` is exactly [`PHONE_DIGITS`] ASCII digits.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_DIGITS && phone.bytes().all(|b| b.is_ascii_digit())
}

/// Registers a customer under a unique phone number.
///
/// The billing amount is stored rounded to cents.
///
/// # Errors
/// Returns an error if:
/// - The session may not register customers
/// - The phone is not exactly ten digits, the name is blank, or the billing amount
///   is not positive after rounding (`Error::Validation`)
/// - The phone number is already registered (`Error::Duplicate`)
#[instrument(skip(db, session))]
pub async fn add_customer(
    db: &DatabaseConnection,
    session: &Session,
    phone: &str,
    name: &str,
    billing_amount: f64,
) -> Result<customer::Model> {
    session.require(Capability::ManageCustomers)?;

    let phone = phone.trim();
    if !is_valid_phone(phone) {
        return Err(Error::validation(format!(
            "Phone number must be exactly {PHONE_DIGITS} digits"
        )));
    }
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::validation("Customer name cannot be empty"));
    }
    let billing_amount = if billing_amount.is_finite() {
        round_cents(billing_amount)
    } else {
        billing_amount
    };
    if !billing_amount.is_finite() || billing_amount <= 0.0 {
        return Err(Error::validation(format!(
            "Billing amount must be greater than zero (got {billing_amount})"
        )));
    }

    let customer = customer::ActiveModel {
        phone: Set(phone.to_string()),
        name: Set(name.to_string()),
        billing_amount: Set(billing_amount),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    let customer = customer
        .insert(db)
        .await
        .map_err(|e| Error::from_insert(e, "Customer", phone))?;

    info!("Registered customer '{}' (ID: {})", customer.name, customer.id);
    Ok(customer)
}

/// Finds a customer by exact phone number, returning None if not registered.
///
/// # Errors
/// Returns an error if the session may not look up customers or the query fails.
pub async fn find_customer(
    db: &DatabaseConnection,
    session: &Session,
    phone: &str,
) -> Result<Option<customer::Model>> {
    session.require(Capability::LookupCustomers)?;
    Customer::find()
        .filter(customer::Column::Phone.eq(phone.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::Role;
    use crate::test_utils::*;

    #[test]
    fn test_is_valid_phone() {
        assert!(is_valid_phone("1234567890"));
        assert!(!is_valid_phone("123456789"));
        assert!(!is_valid_phone("12345678901"));
        assert!(!is_valid_phone("12345-7890"));
        assert!(!is_valid_phone("١٢٣٤٥٦٧٨٩٠"));
    }

    #[tokio::test]
    async fn test_duplicate_phone_rejected() -> Result<()> {
        let (db, _settings, _dir, _manager) = setup_with_manager().await?;
        let cashier = create_test_session(&db, "till", Role::Cashier).await?;

        let first = add_customer(&db, &cashier, "1234567890", "Maya", 42.5).await?;
        let second = add_customer(&db, &cashier, "1234567890", "Someone Else", 10.0).await;
        assert!(matches!(
            second.unwrap_err(),
            Error::Duplicate { entity: "Customer", .. }
        ));

        let found = find_customer(&db, &cashier, "1234567890").await?.unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(found.name, "Maya");
        assert_eq!(found.billing_amount, 42.5);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_customer_validation() -> Result<()> {
        let (db, _settings, _dir, manager) = setup_with_manager().await?;

        for (phone, name, billing) in [
            ("12345", "Short", 5.0),
            ("abcdefghij", "Letters", 5.0),
            ("1234567890", " ", 5.0),
            ("1234567890", "Zero", 0.0),
            ("1234567890", "Negative", -1.0),
            ("1234567890", "Fraction", 0.004),
        ] {
            let result = add_customer(&db, &manager, phone, name, billing).await;
            assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        }
        assert!(find_customer(&db, &manager, "1234567890").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_billing_amount_rounded_to_cents() -> Result<()> {
        let (db, _settings, _dir, manager) = setup_with_manager().await?;

        let created = add_customer(&db, &manager, "5550001111", "Ravi", 42.499).await?;
        assert_eq!(created.billing_amount, 42.5);

        let found = find_customer(&db, &manager, "5550001111").await?.unwrap();
        assert_eq!(found.billing_amount, 42.5);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_customer_missing() -> Result<()> {
        let (db, _settings, _dir, manager) = setup_with_manager().await?;
        assert!(find_customer(&db, &manager, "0000000000").await?.is_none());
        Ok(())
    }
}
