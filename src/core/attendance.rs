//! Attendance business logic - Employee roster and daily presence.
//!
//! Only presence is ever recorded. A day with no record for an employee means the
//! attendance is unknown; nothing in this module writes an absence.

use crate::{
    core::session::{Capability, Session},
    entities::{Account, Attendance, AttendanceStatus, Employee, attendance, employee},
    errors::{Error, Result},
};
use chrono::{Local, NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, SqlErr, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{info, instrument};

/// One attendance record joined with the employee's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRow {
    /// Record ID
    pub id: i64,
    /// Employee the record belongs to
    pub employee_id: i64,
    /// Employee display name
    pub employee_name: String,
    /// Calendar day
    pub date: NaiveDate,
    /// Presence status
    pub status: AttendanceStatus,
}

/// Adds an employee to the roster, optionally linked to a login account.
///
/// # Errors
/// Returns an error if:
/// - The session may not manage employees
/// - The name is empty or whitespace-only
/// - `account_id` is given but no such account exists (`Error::NotFound`)
#[instrument(skip(db, session))]
pub async fn add_employee(
    db: &DatabaseConnection,
    session: &Session,
    name: &str,
    account_id: Option<i64>,
) -> Result<employee::Model> {
    session.require(Capability::ManageEmployees)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::validation("Employee name cannot be empty"));
    }
    if let Some(account_id) = account_id {
        Account::find_by_id(account_id)
            .one(db)
            .await?
            .ok_or_else(|| Error::NotFound {
                entity: "Account",
                key: account_id.to_string(),
            })?;
    }

    let employee = employee::ActiveModel {
        name: Set(name.to_string()),
        account_id: Set(account_id),
        attendance_count: Set(0),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };
    let employee = employee.insert(db).await?;
    info!("Added employee '{}' (ID: {})", employee.name, employee.id);
    Ok(employee)
}

/// Fetches an employee by ID.
///
/// This is a plain primary-key lookup with no role check, used by the attendance
/// operations to resolve the employee before writing. A missing employee is not an
/// error here: it comes back as `Ok(None)` and the caller decides what that means.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_employee_by_id(
    db: &DatabaseConnection,
    employee_id: i64,
) -> Result<Option<employee::Model>> {
    Employee::find_by_id(employee_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Marks an employee present for today.
///
/// # Errors
/// See [`mark_present_on`].
pub async fn mark_present(
    db: &DatabaseConnection,
    session: &Session,
    employee_id: i64,
) -> Result<attendance::Model> {
    mark_present_on(db, session, employee_id, Local::now().date_naive()).await
}

/// Marks an employee present for `date` and bumps their attendance count.
///
/// Only employees linked to a login account can be marked. An existing record for
/// the same employee and day is reported before anything is written; the unique
/// index on (employee, date) still rejects a record that slips in between, and that
/// rejection is reported the same way. The record insert and the count update run in
/// one store transaction, so the count always matches the number of records.
///
/// # Errors
/// Returns an error if:
/// - The session may not mark attendance (`Error::Forbidden`)
/// - The employee does not exist or has no linked account (`Error::NotFound`)
/// - The employee is already marked for `date` (`Error::AlreadyMarked`)
/// - The database transaction fails (`Error::Storage`)
#[instrument(skip(db, session))]
pub async fn mark_present_on(
    db: &DatabaseConnection,
    session: &Session,
    employee_id: i64,
    date: NaiveDate,
) -> Result<attendance::Model> {
    session.require(Capability::MarkAttendance)?;

    let employee = get_employee_by_id(db, employee_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "Employee",
            key: employee_id.to_string(),
        })?;
    if employee.account_id.is_none() {
        return Err(Error::NotFound {
            entity: "Linked account for employee",
            key: employee_id.to_string(),
        });
    }

    let already_marked = Attendance::find()
        .filter(attendance::Column::EmployeeId.eq(employee_id))
        .filter(attendance::Column::Date.eq(date))
        .one(db)
        .await?;
    if already_marked.is_some() {
        return Err(Error::AlreadyMarked { employee_id, date });
    }

    let txn = db.begin().await?;
    let record = attendance::ActiveModel {
        employee_id: Set(employee_id),
        date: Set(date),
        status: Set(AttendanceStatus::Present),
        marked_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };
    let record = record
        .insert(&txn)
        .await
        .map_err(|e| insert_error(e, employee_id, date))?;

    Employee::update_many()
        .col_expr(
            employee::Column::AttendanceCount,
            Expr::col(employee::Column::AttendanceCount).add(1),
        )
        .filter(employee::Column::Id.eq(employee_id))
        .exec(&txn)
        .await?;
    txn.commit().await?;

    info!("Marked employee '{}' present for {}", employee.name, date);
    Ok(record)
}

/// Maps a failed attendance insert, reading a unique-index violation as a repeat mark.
fn insert_error(err: DbErr, employee_id: i64, date: NaiveDate) -> Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::AlreadyMarked { employee_id, date },
        _ => Error::Storage(err),
    }
}

/// Lists every attendance record with the employee's name, most recent day first.
/// Records on the same day keep the order they were written in.
///
/// # Errors
/// Returns an error if the session may not view attendance or the query fails.
pub async fn list_attendance(
    db: &DatabaseConnection,
    session: &Session,
) -> Result<Vec<AttendanceRow>> {
    session.require(Capability::ViewAttendance)?;
    let rows = Attendance::find()
        .find_also_related(Employee)
        .order_by_desc(attendance::Column::Date)
        .order_by_asc(attendance::Column::Id)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(record, employee)| AttendanceRow {
            id: record.id,
            employee_id: record.employee_id,
            employee_name: employee.map(|e| e.name).unwrap_or_default(),
            date: record.date,
            status: record.status,
        })
        .collect())
}
