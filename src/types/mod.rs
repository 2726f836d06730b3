// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Object types declared by the directory component.

pub mod cert_manager;
pub mod resource;

pub use cert_manager::{Certificate, Issuer};
pub use resource::{GeneratedToken, Resource};
