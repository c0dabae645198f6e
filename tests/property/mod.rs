// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Properties of query validation and the pure filter engine.

mod query_filters;
