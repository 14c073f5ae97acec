// SPDX-License-Identifier: MPL-2.0
//! `image_search_view` is the interactive result browser of an image
//! similarity search, rendered inside a host frame.
//!
//! The crate owns every piece of browser state (sorting, filtering,
//! selection, the detail modal) and describes what to draw; the host draws
//! it, forwards user interactions, and answers metadata requests. All of the
//! traffic is JSON messages, see [`bridge`].

pub mod app;
pub mod bridge;
pub mod config;
pub mod error;
pub mod gallery;
pub mod i18n;
pub mod metadata;
pub mod modal;
pub mod search;
pub mod ui;
