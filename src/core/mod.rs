//! Core business logic - framework-agnostic catalog, ledger, attendance and directory
//! operations. Callers (any UI layer) pass an explicit [`session::Session`] into every
//! operation that acts on behalf of a user.

/// Account registration and authentication
pub mod account;
/// Managed copies of SKU images
pub mod asset;
/// Employee roster and daily attendance
pub mod attendance;
/// SKU catalog maintenance
pub mod catalog;
/// Customer directory
pub mod customer;
/// Cash ledger and financial aggregation
pub mod ledger;
/// Low-inventory notification sweep
pub mod monitor;
/// Financial and tax summary documents
pub mod report;
/// Sessions and the role capability table
pub mod session;
/// Tax filing
pub mod tax;
