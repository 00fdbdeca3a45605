//! Typed resource calls over the authenticated pipeline.
//!
//! Each submodule pairs the wire models for one backend resource with an [`ApiClient`]
//! impl block exposing its operations. All of them are thin passthroughs: build an
//! [`crate::http::ApiRequest`], execute it through the pipeline (picking up bearer
//! injection and transparent token renewal), and decode the envelope payload.
//!
//! [`ApiClient`]: crate::client::ApiClient

pub mod notifications;
pub mod payment_methods;
pub mod ratings;
pub mod reservations;
pub mod services;
pub mod workers;

pub use notifications::*;
pub use payment_methods::*;
pub use ratings::*;
pub use reservations::*;
pub use services::*;
pub use workers::*;
