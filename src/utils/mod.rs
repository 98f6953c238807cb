// Copyright (c) 2025-2026 the packcode contributors
// SPDX-License-Identifier: Apache-2.0

pub mod error;
pub mod formatting;
pub mod report;
