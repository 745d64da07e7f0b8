use sea_orm::ConnectionTrait;
use serde::Deserialize;

use crate::domain::permissions::visible_menus;
use crate::entities::partners;
use crate::error::AppError;
use crate::repos::partners::{self as partners_repo, PartnerCreate};
use crate::repos::users::User;

const DEFAULT_ENTITY_TYPE: &str = "individual";

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    entity_type: Option<&str>,
) -> Result<Vec<partners::Model>, AppError> {
    Ok(partners_repo::list_partners(conn, entity_type).await?)
}

pub async fn get<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<partners::Model, AppError> {
    Ok(partners_repo::require_partner(conn, id).await?)
}

#[derive(Debug, Deserialize)]
pub struct CreatePartner {
    pub display_name: Option<String>,
    pub entity_type: Option<String>,
    pub legal_name: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
}

/// Same audience as the partners menu.
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    input: CreatePartner,
) -> Result<partners::Model, AppError> {
    if !visible_menus(&caller.actor()).contains(&"partners") {
        return Err(AppError::forbidden("Permission denied"));
    }

    let display_name = input
        .display_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::missing_fields("display_name is required"))?;

    let dto = PartnerCreate {
        display_name,
        entity_type: input
            .entity_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENTITY_TYPE.to_string()),
        legal_name: input.legal_name,
        contact_email: input.contact_email,
        phone: input.phone,
    };
    Ok(partners_repo::create_partner(conn, dto).await?)
}
