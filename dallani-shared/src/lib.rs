#![cfg_attr(not(test), forbid(unsafe_code))]
#![warn(clippy::pedantic)]
#![allow(clippy::multiple_crate_versions)]

//! Platform-neutral core of the Dallani admin console.
//!
//! Everything in here compiles for both the browser (`wasm32`) and native
//! targets: the session store, the authenticated API client, the list query
//! controller shared by every collection page, the confirmation desk for
//! mutating actions and the settlements CSV export.

pub mod actions;
pub mod client;
pub mod config;
pub mod errors;
pub mod export;
pub mod format;
pub mod messages;
pub mod models;
pub mod query;
pub mod session;
pub mod transport;

pub use client::{ApiClient, LoginSuccess, Navigator};
pub use errors::ApiError;
pub use session::{SessionStore, TokenStorage};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
