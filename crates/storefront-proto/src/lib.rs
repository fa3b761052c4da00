//! # storefront-proto
//!
//! Protobuf definitions and generated code for the storefront services.
//!
//! The user directory is the only cross-language contract: the order
//! service resolves users through it over gRPC when configured for that
//! transport.
//!
//! ## Proto File Organization
//!
//! ```text
//! proto/storefront/v1/
//! └── users.proto    - UserDirectory service definition
//! ```
//!
//! Wire-format rules follow Protobuf evolution conventions: field numbers
//! are never reused and removed fields are reserved.

/// Version 1 of the storefront protocol.
pub mod v1 {
    tonic::include_proto!("storefront.v1");
}
