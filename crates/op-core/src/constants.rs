//! Constantes del motor.
//!
//! Mensajes canónicos de los payloads de error y separadores del header
//! `Link`. Forman parte del contrato observable por los clientes HTTP, así que
//! cambiarlos es un cambio incompatible.

/// Nombre del header que construye `BuildLinkHeader`.
pub const LINK_HEADER: &str = "Link";

/// Separador entre entradas del header `Link`.
pub const LINK_SEPARATOR: &str = ",\n";

/// `error_type` usado por `authorize_or_halt`.
pub const FORBIDDEN_ERROR_TYPE: &str = "forbidden";
pub const FORBIDDEN_OPERATION_MESSAGE: &str = "You are not authorized to perform this operation.";

/// `error_type` usado por `validate_or_halt`.
pub const CONTRACT_ERROR_TYPE: &str = "contract_not_respected";
pub const CONTRACT_ERROR_MESSAGE: &str = "The contract for this operation was not respected.";
