//! Blog post CRUD service: an actix-web HTTP API over a document store.
//!
//! Layers, from the wire inwards: [`presentation`] (handlers and routes),
//! [`application`] (validation and mapping), [`data`] (repositories) and
//! [`domain`] (persisted and wire shapes). [`startup`] wires them together.

pub mod application;
pub mod data;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod startup;

pub use startup::{start_server, Application, RunningServer};
