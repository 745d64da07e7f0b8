use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_400() {
    let app: AppError =
        DomainError::validation(ValidationKind::Other("x".into()), "bad field").into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 400);

    let fk: AppError = DomainError::validation(ValidationKind::ForeignKey, "fk").into();
    assert_eq!(fk.code(), ErrorCode::FkViolation);
    assert_eq!(fk.status().as_u16(), 400);
}

#[test]
fn maps_conflicts() {
    let app: AppError = DomainError::conflict(ConflictKind::UniqueEmail, "email exists").into();
    assert_eq!(app.code(), ErrorCode::UniqueEmail);
    assert_eq!(app.status().as_u16(), 409);

    let app: AppError =
        DomainError::conflict(ConflictKind::Other("x".into()), "generic").into();
    assert_eq!(app.code(), ErrorCode::Conflict);
}

#[test]
fn maps_not_found_by_entity() {
    let cases = [
        (NotFoundKind::Project, ErrorCode::ProjectNotFound),
        (NotFoundKind::Task, ErrorCode::TaskNotFound),
        (NotFoundKind::LeaveRequest, ErrorCode::LeaveRequestNotFound),
        (NotFoundKind::Other("Record".into()), ErrorCode::NotFound),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::not_found(kind, "missing").into();
        assert_eq!(app.code(), code);
        assert_eq!(app.status().as_u16(), 404);
    }
}

#[test]
fn maps_infra() {
    let app: AppError = DomainError::infra(InfraErrorKind::Timeout, "timeout").into();
    assert_eq!(app.code(), ErrorCode::DbTimeout);
    assert_eq!(app.status().as_u16(), 504);

    let app: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
    assert_eq!(app.code(), ErrorCode::DbUnavailable);
    assert_eq!(app.status().as_u16(), 503);

    let app: AppError = DomainError::infra(InfraErrorKind::DataCorruption, "bad").into();
    assert_eq!(app.code(), ErrorCode::DataCorruption);
    assert_eq!(app.status().as_u16(), 500);

    let app: AppError = DomainError::infra(InfraErrorKind::Other("x".into()), "other").into();
    assert_eq!(app.code(), ErrorCode::Internal);
}
