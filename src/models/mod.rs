//! # Domain Models
//!
//! Plain data containers mirroring each endpoint's JSON shape. Response
//! types deserialize leniently: unknown fields are ignored and every
//! field is optional, so a contract drift surfaces as an assertion
//! failure rather than a parse error. Request types skip `None` fields
//! when serializing.

pub mod bomb;
pub mod buyer;
pub mod placeholder;
