//! RPC-shaped request/response adaptation.
//!
//! Grounded in `original_source`'s `service/v1/conversions.cc`: the same
//! `ToInternalRequest`/`ToV1Response` boundary, minus the protobuf/gRPC
//! machinery (spec's "Non-goals" drop gRPC; the wire format here is
//! newline-delimited JSON, see [`v1`] and `src/bin/aur-server.rs`). The
//! boundary still does exactly what the original did: default the field
//! mask when the caller omits one, and coerce an unrecognized wire enum
//! value into the engine's own `Unknown`/`Other` representation rather
//! than rejecting the request outright.

pub mod v1;
