/*
 * Responsibility
 * - middleware public interface
 * - auth: access guard per route
 * - envelope: success response wrapping
 * - http: transport-level layers (request id, trace, timeout, CORS, ...)
 */
pub mod auth;
pub mod envelope;
pub mod http;
