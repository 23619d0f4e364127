/*!
 * Authenticated identity extractor
 *
 * Responsibility:
 * - Hand the request's Identity to handlers
 * - axum-specific code stays in core, the type lives in types
 *
 * Public API:
 * - Identity
 * - IdentityExtractor
 */

mod core;
mod types;

pub use self::core::IdentityExtractor;
pub use self::types::Identity;
