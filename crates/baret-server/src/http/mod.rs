// SPDX-License-Identifier: Apache-2.0

pub(crate) mod exports;
pub(crate) mod handlers;
pub(crate) mod records;
pub(crate) mod stats;
