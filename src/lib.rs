//! # Task front end
//!
//! Server-rendered pages for managing tasks held by a remote task API.
//!
//! ## Request flow
//!
//! ```text
//!   browser ──► api (one handler per route)
//!                 │            │
//!                 ▼            ▼
//!            validation     gateway ──► remote task API
//!                 │            │
//!                 └─────┬──────┘
//!                       ▼
//!                 view (assemble + render)
//! ```
//!
//! ## Modules
//! - `task`: records exchanged with the API and the raw form input
//! - `validation`: form and due-date rules, mirrored by `assets/task-form.js`
//! - `gateway`: the only code that talks to the remote API
//! - `view`: display records and the rendering collaborator
//! - `api`: routes and handlers

pub mod api;
pub mod config;
pub mod gateway;
pub mod task;
pub mod validation;
pub mod view;

pub use config::Config;
pub use gateway::{GatewayError, GatewayResult, HttpTaskGateway, TaskGateway};
