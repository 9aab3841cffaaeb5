//! Application layer: orchestrates domain logic through ports.
//!
//! Handlers receive commands plus `CommandMetadata`, call into the pure
//! domain modules, and persist through repository ports. No HTTP or SQL
//! concerns live here.

pub mod handlers;
