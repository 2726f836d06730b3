// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod cli;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod directory;
pub mod error;
pub mod graph;
pub mod kubernetes;
pub mod params;
pub mod render;
pub mod types;

#[cfg(test)]
mod test_utils;
