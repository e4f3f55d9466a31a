//! Request middleware and extractors.
//!
//! - [`auth`]: Bearer authentication (`require_auth`) and the `AuthUser`
//!   extractor
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `require_auth` verifies the token and resolves the caller's `Identity`
//! 3. The `Identity` is stored in the request extensions
//! 4. Handlers read it through `AuthUser`
//!
//! ```ignore
//! async fn profile(AuthUser(identity): AuthUser) -> String {
//!     identity.id()
//! }
//! ```

pub mod auth;
