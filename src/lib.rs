//! Panelist - a terminal admin panel for a content backend
//!
//! This library drives create/read/update/delete screens for post
//! categories, banners and users against a REST API. Every screen is the
//! same table controller configured by a resource schema.
//!
//! # Modules
//!
//! * [`schema`] / [`resources`] - Resource descriptions and the three built-in schemas
//! * [`record`] - Loosely-typed records as returned by the backend
//! * [`collection`] - Client-side filtering and pagination
//! * [`dialog`] - View, form, delete and status dialog state
//! * [`controller`] - The table controller and its command/outcome protocol
//! * [`api`] - Backend client trait and its HTTP implementation
//! * [`ui`] - Terminal user interface components and rendering

/// Backend client abstraction and the reqwest implementation
pub mod api;

/// Bearer token storage
pub mod auth;

/// Filtering and pagination over loaded records
pub mod collection;

/// Configuration module for managing application settings
pub mod config;

/// Application constants: messages, key help and layout sizes
pub mod constants;

/// Table controller state machine
pub mod controller;

/// Dialog states and form drafts
pub mod dialog;

/// Executes controller commands against the backend
pub mod dispatcher;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Transient user notifications
pub mod notify;

pub mod record;

/// Built-in resource schemas
pub mod resources;

pub mod schema;

/// Terminal user interface components and rendering
pub mod ui;

/// Utility functions for date/time handling
pub mod utils;
