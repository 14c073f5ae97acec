// SPDX-License-Identifier: MPL-2.0
//! Localization of the labels and placeholders in the view description.
//!
//! Translations are Fluent `.ftl` files embedded at build time from
//! `assets/i18n/`. The locale comes from the CLI, then the config file, then
//! the OS, and falls back to `en-US`.

pub mod fluent;

pub use fluent::I18n;
