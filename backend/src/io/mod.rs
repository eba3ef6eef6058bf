//! # IO Module
//!
//! Interface layer between the frontend and the domain services. Translates
//! HTTP requests into service calls and domain errors into status codes.
//!
//! ## Current Implementation
//!
//! - **Web Framework**: Axum, one router per resource
//! - **Serialization**: Serde JSON using the DTOs from the `shared` crate
//! - **State Management**: [`crate::AppState`] through axum's `State` extractor

pub mod rest;
