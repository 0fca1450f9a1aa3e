//! Core domain concepts shared across all subdomains.
//!
//! - [`agent::AgentName`] — the two fixed speakers
//! - [`agent::AgentIdentity`] — a speaker plus its immutable system prompt
//! - [`agent::AgentPair`] — one value per speaker

pub mod agent;
