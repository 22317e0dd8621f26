// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! ask-relay core
//!
//! Forwards a caller's prompt to one of a fixed set of LLM providers and
//! normalizes whatever comes back into `{ "answer": ... }`.
//!
//! # Architecture
//!
//! - **Domain:** request/response contract, provider set, configuration, errors
//! - **Application:** validation and dispatch (`AskService`)
//! - **Infrastructure:** one adapter per provider wire format, plus the registry
//! - **Presentation:** axum router and the bearer-token access gate

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
