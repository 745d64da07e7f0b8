use sea_orm::ConnectionTrait;

use crate::adapters::financial_entries_sea as entries_adapter;
use crate::domain::finance_permissions::EntryRef;
use crate::domain::permissions::FinanceScope;
use crate::domain::settlement::EntryAmount;
use crate::entities::financial_entries;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use entries_adapter::{EntryCreate, EntryFilter};

pub type FinancialEntry = financial_entries::Model;

pub fn scope(entry: &FinancialEntry) -> FinanceScope {
    FinanceScope {
        project_id: entry.project_id,
        bu_code: entry.bu_code,
        created_by: entry.created_by,
        kind: entry.kind,
    }
}

pub fn entry_ref(entry: &FinancialEntry) -> EntryRef {
    EntryRef {
        bu_code: entry.bu_code,
        created_by: entry.created_by,
    }
}

pub fn amount(entry: &FinancialEntry) -> EntryAmount {
    EntryAmount {
        kind: entry.kind,
        status: entry.status,
        amount: entry.amount,
    }
}

pub async fn find_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<FinancialEntry>, DomainError> {
    Ok(entries_adapter::find_by_id(conn, id).await?)
}

pub async fn require_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<FinancialEntry, DomainError> {
    find_entry(conn, id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::FinancialEntry, "Financial entry not found")
    })
}

pub async fn list_entries<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: EntryFilter,
) -> Result<Vec<FinancialEntry>, DomainError> {
    Ok(entries_adapter::list(conn, filter).await?)
}

pub async fn entries_for_project<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    project_id: i64,
) -> Result<Vec<FinancialEntry>, DomainError> {
    Ok(entries_adapter::for_project(conn, project_id).await?)
}

pub async fn create_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: EntryCreate,
) -> Result<FinancialEntry, DomainError> {
    Ok(entries_adapter::create_entry(conn, dto).await?)
}

pub async fn save_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    entry: FinancialEntry,
) -> Result<FinancialEntry, DomainError> {
    Ok(entries_adapter::save_entry(conn, entry).await?)
}

pub async fn delete_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), DomainError> {
    match entries_adapter::delete_entry(conn, id).await? {
        0 => Err(DomainError::not_found(
            NotFoundKind::FinancialEntry,
            "Financial entry not found",
        )),
        _ => Ok(()),
    }
}
