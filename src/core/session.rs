//! Sessions and role capabilities.
//!
//! A [`Session`] is produced by [`crate::core::account::authenticate`] and passed
//! explicitly into every operation. What a session may do is decided solely by the
//! capability table keyed on its account's [`Role`].

use crate::{
    entities::{Role, account},
    errors::{Error, Result},
};

/// An operation class that can be granted to a role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// List and look up SKUs
    ViewCatalog,
    /// Create SKUs and adjust stock
    ManageCatalog,
    /// Record cash-in / cash-out entries
    RecordTransactions,
    /// Read ledger totals and write the financial summary
    ViewFinancials,
    /// Compute and persist tax filings
    FileTaxes,
    /// Add employees to the roster
    ManageEmployees,
    /// Mark an employee present
    MarkAttendance,
    /// Read the attendance log
    ViewAttendance,
    /// Register customers
    ManageCustomers,
    /// Look customers up by phone
    LookupCustomers,
}

impl Capability {
    /// Every capability, in declaration order.
    pub const ALL: &'static [Self] = &[
        Self::ViewCatalog,
        Self::ManageCatalog,
        Self::RecordTransactions,
        Self::ViewFinancials,
        Self::FileTaxes,
        Self::ManageEmployees,
        Self::MarkAttendance,
        Self::ViewAttendance,
        Self::ManageCustomers,
        Self::LookupCustomers,
    ];

    const fn action(self) -> &'static str {
        match self {
            Self::ViewCatalog => "view the catalog",
            Self::ManageCatalog => "manage the catalog",
            Self::RecordTransactions => "record transactions",
            Self::ViewFinancials => "view financials",
            Self::FileTaxes => "file taxes",
            Self::ManageEmployees => "manage employees",
            Self::MarkAttendance => "mark attendance",
            Self::ViewAttendance => "view attendance",
            Self::ManageCustomers => "register customers",
            Self::LookupCustomers => "look up customers",
        }
    }
}

const CASHIER_CAPABILITIES: &[Capability] = &[
    Capability::ViewCatalog,
    Capability::RecordTransactions,
    Capability::MarkAttendance,
    Capability::ManageCustomers,
    Capability::LookupCustomers,
];

/// Capabilities granted to a role.
#[must_use]
pub const fn capabilities(role: Role) -> &'static [Capability] {
    match role {
        Role::Manager => Capability::ALL,
        Role::Cashier => CASHIER_CAPABILITIES,
    }
}

/// The authenticated caller of an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// Account the session belongs to; recorded as the actor on ledger entries and filings
    pub account_id: i64,
    /// Login name of the account
    pub username: String,
    /// Role of the account
    pub role: Role,
}

impl Session {
    pub(crate) fn from_account(account: &account::Model) -> Self {
        Self {
            account_id: account.id,
            username: account.username.clone(),
            role: account.role,
        }
    }

    /// Whether this session's role carries `capability`.
    #[must_use]
    pub fn can(&self, capability: Capability) -> bool {
        capabilities(self.role).contains(&capability)
    }

    /// Fails with [`Error::Forbidden`] unless the role carries `capability`.
    pub fn require(&self, capability: Capability) -> Result<()> {
        if self.can(capability) {
            Ok(())
        } else {
            Err(Error::Forbidden {
                role: self.role.to_string(),
                action: capability.action().to_string(),
            })
        }
    }
}
