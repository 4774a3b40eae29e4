//! formgen - terminal forms generated from a declarative schema
//!
//! A schema (JSON or YAML) lists the fields of a form. From it formgen
//! derives default values, compiles a validator, and renders an
//! interactive Ratatui form whose validated values are handed to a
//! [`submit::SubmitHandler`].

pub mod app;
pub mod config;
pub mod defaults;
pub mod error;
pub mod platform;
pub mod schema;
pub mod state;
pub mod submit;
pub mod ui;
pub mod validation;
