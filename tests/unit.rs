// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Unit tests for individual components, through the public API.

mod common;

#[path = "unit/scenarios.rs"]
mod scenarios;

#[path = "unit/errors.rs"]
mod errors;

#[path = "unit/normalization.rs"]
mod normalization;

#[path = "unit/regions.rs"]
mod regions;
