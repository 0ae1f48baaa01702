//! Bearer token primitives.
//!
//! - [`jwt`] -- HS256 access-token generation and validation.
//!
//! Credential exchange (login, refresh, password storage) is handled by the
//! identity provider that issues these tokens, not by this service.

pub mod jwt;
