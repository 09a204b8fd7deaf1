use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::{CanonicalStatus, Status};
use crate::errors::OperationError;

/// Tabla fija de status soportados. Invariante: cada código tiene exactamente
/// un nombre y viceversa.
const STATUSES: &[(u16, &str)] = &[(100, "continue"),
                                   (101, "switching_protocols"),
                                   (102, "processing"),
                                   (200, "ok"),
                                   (201, "created"),
                                   (202, "accepted"),
                                   (203, "non_authoritative_information"),
                                   (204, "no_content"),
                                   (205, "reset_content"),
                                   (206, "partial_content"),
                                   (207, "multi_status"),
                                   (208, "already_reported"),
                                   (300, "multiple_choices"),
                                   (301, "moved_permanently"),
                                   (302, "found"),
                                   (303, "see_other"),
                                   (304, "not_modified"),
                                   (305, "use_proxy"),
                                   (307, "temporary_redirect"),
                                   (400, "bad_request"),
                                   (401, "unauthorized"),
                                   (402, "payment_required"),
                                   (403, "forbidden"),
                                   (404, "not_found"),
                                   (405, "method_not_allowed"),
                                   (406, "not_acceptable"),
                                   (407, "proxy_authentication_required"),
                                   (408, "request_timeout"),
                                   (409, "conflict"),
                                   (410, "gone"),
                                   (411, "length_required"),
                                   (412, "precondition_failed"),
                                   (413, "request_entity_too_large"),
                                   (414, "request_uri_too_large"),
                                   (415, "unsupported_media_type"),
                                   (416, "request_range_not_satisfiable"),
                                   (417, "expectation_failed"),
                                   (418, "im_a_teapot"),
                                   (422, "unprocessable_entity"),
                                   (423, "locked"),
                                   (424, "failed_dependency"),
                                   (425, "unordered_collection"),
                                   (426, "upgrade_required"),
                                   (428, "precondition_required"),
                                   (429, "too_many_requests"),
                                   (431, "request_header_fields_too_large"),
                                   (449, "retry_with"),
                                   (500, "internal_server_error"),
                                   (501, "not_implemented"),
                                   (502, "bad_gateway"),
                                   (503, "service_unavailable"),
                                   (504, "gateway_timeout"),
                                   (505, "http_version_not_supported"),
                                   (506, "variant_also_negotiates"),
                                   (507, "insufficient_storage"),
                                   (509, "bandwidth_limit_exceeded"),
                                   (510, "not_extended"),
                                   (511, "network_authentication_required")];

static BY_CODE: Lazy<HashMap<u16, &'static str>> = Lazy::new(|| STATUSES.iter().copied().collect());
static BY_NAME: Lazy<HashMap<&'static str, u16>> =
    Lazy::new(|| STATUSES.iter().map(|(code, name)| (*name, *code)).collect());

/// Búsquedas puras sobre la tabla canónica de status.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusTable;

impl StatusTable {
    pub fn name_for_code(code: u16) -> Option<&'static str> {
        BY_CODE.get(&code).copied()
    }

    pub fn code_for_name(name: &str) -> Option<u16> {
        BY_NAME.get(name).copied()
    }

    /// Acepta tanto código como nombre.
    pub fn is_valid(status: &Status) -> bool {
        Self::lookup(status).is_some()
    }

    /// Valida y convierte a la forma canónica. Nunca coacciona valores
    /// desconocidos.
    pub fn canonicalize(status: &Status) -> Result<CanonicalStatus, OperationError> {
        Self::lookup(status).ok_or_else(|| OperationError::InvalidStatus(status.to_string()))
    }

    /// Recorre la tabla en orden ascendente de código.
    pub fn entries() -> impl Iterator<Item = CanonicalStatus> {
        STATUSES.iter().map(|(code, name)| CanonicalStatus::new(*code, *name))
    }

    fn lookup(status: &Status) -> Option<CanonicalStatus> {
        match status {
            Status::Code(code) => Self::name_for_code(*code).map(|name| CanonicalStatus::new(*code, name)),
            Status::Name(name) => BY_NAME.get_key_value(&**name)
                                         .map(|(name, code)| CanonicalStatus::new(*code, *name)),
        }
    }
}
