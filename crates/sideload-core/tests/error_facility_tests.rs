use sideload_core::errors::{ExError, ExErrorKind, SideloadError};
use sideload_core_types::RequestId;

#[test]
fn test_missing_target_type_is_configuration_error() {
    let err = SideloadError::MissingTargetType {
        alias: "author".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::Configuration);
    assert_eq!(ex_err.code(), "ERR_CONFIGURATION");
    assert_eq!(ex_err.alias(), Some("author"));
    assert_eq!(ex_err.op(), Some("resolve_target_type"));
}

#[test]
fn test_missing_identifier_carries_type() {
    let err = SideloadError::MissingIdentifier {
        alias: "tags".to_string(),
        target_type: "tag".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::MissingField);
    assert_eq!(ex_err.alias(), Some("tags"));
    assert_eq!(ex_err.type_name(), Some("tag"));
}

#[test]
fn test_reserved_primary_type_is_configuration_error() {
    let ex_err: ExError = SideloadError::ReservedPrimaryType {
        primary_type: "meta".to_string(),
    }
    .into();

    assert_eq!(ex_err.code(), "ERR_CONFIGURATION");
    assert_eq!(ex_err.op(), Some("assemble"));
    assert_eq!(ex_err.type_name(), Some("meta"));
}

#[test]
fn test_unflattened_list_is_unsupported_shape() {
    let ex_err: ExError = SideloadError::UnflattenedList {
        primary_type: "post".to_string(),
    }
    .into();

    assert_eq!(ex_err.code(), "ERR_UNSUPPORTED_SHAPE");
    assert_eq!(ex_err.type_name(), Some("post"));
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::Configuration, "ERR_CONFIGURATION"),
        (ExErrorKind::MissingField, "ERR_MISSING_FIELD"),
        (ExErrorKind::UnsupportedShape, "ERR_UNSUPPORTED_SHAPE"),
        (ExErrorKind::InvalidConfig, "ERR_INVALID_CONFIG"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
        (ExErrorKind::Io, "ERR_IO"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_request_id_attached_to_display() {
    let ex_err = ExError::from(SideloadError::MissingPrimaryType)
        .with_request_id(RequestId::from_string("req-7".to_string()));

    assert!(ex_err.to_string().contains("(request_id: req-7)"));
    assert_eq!(ex_err.request_id().map(RequestId::as_str), Some("req-7"));
}

#[test]
fn test_domain_error_messages_name_the_alias() {
    let err = SideloadError::MissingTargetType {
        alias: "owner".to_string(),
    };
    assert!(err.to_string().contains("'owner'"));
}
