// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod ask;
pub mod config;
pub mod error;
pub mod llm;
