//! # Schema Module
//!
//! Declared-field validation of structured payloads (JSON bodies).
//!
//! A [`Schema`] is a named, ordered collection of [`FieldSpec`]s, built once
//! at startup and shared immutably (`Arc`) across requests. Validation is a
//! pure function of the payload and the schema: every declared field is
//! visited, failures are collected rather than short-circuited, and nested
//! schemas produce nested error paths (`["address", "zipcode"]`).
//!
//! Unknown keys in the payload are silently ignored. This is intentional
//! leniency so clients can send forward-compatible payloads.

mod core;

pub use core::{
    FieldKind, FieldSpec, Schema, SchemaBuilder, ValidationError, INVALID_INPUT_MSG,
    MISSING_FIELD_MSG,
};
