//! Domain layer containing the link entity, its repository contract, and
//! click tracking.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. The redirect handler resolves the code and answers immediately
//! 2. A [`click_event::ClickEvent`] is offered to a bounded channel (never awaited)
//! 3. [`click_worker::run_click_worker`] applies the increment with retry
//! 4. Failures are logged and counted, never reported to the visitor

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
