//! Entity module - Contains all SeaORM entity definitions for the store.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod account;
pub mod attendance;
pub mod customer;
pub mod employee;
pub mod ledger_entry;
pub mod sku;
pub mod tax_filing;

// Re-export specific types to avoid conflicts
pub use account::{Column as AccountColumn, Entity as Account, Model as AccountModel, Role};
pub use attendance::{
    AttendanceStatus, Column as AttendanceColumn, Entity as Attendance, Model as AttendanceModel,
};
pub use customer::{Column as CustomerColumn, Entity as Customer, Model as CustomerModel};
pub use employee::{Column as EmployeeColumn, Entity as Employee, Model as EmployeeModel};
pub use ledger_entry::{
    Column as LedgerEntryColumn, Entity as LedgerEntry, EntryKind, Model as LedgerEntryModel,
};
pub use sku::{Column as SkuColumn, Entity as Sku, Model as SkuModel};
pub use tax_filing::{Column as TaxFilingColumn, Entity as TaxFiling, Model as TaxFilingModel};
