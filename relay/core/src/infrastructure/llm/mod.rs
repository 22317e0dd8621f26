// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// LLM Provider Infrastructure - Anti-Corruption Layer Implementations
//
// Each adapter translates a GenerationRequest into one vendor wire format and
// normalizes the vendor reply back into plain answer text.

pub mod anthropic;
pub mod gemini;
pub mod openai;
pub mod registry;
mod transport;

pub use registry::ProviderRegistry;
