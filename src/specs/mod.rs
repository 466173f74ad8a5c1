// src/specs/mod.rs
//! # Page “specs” module
//!
//! One module per portal page. Each spec knows *where the ground truth lives
//! in the HTML* for its page and turns a parsed document into a typed value.
//!
//! ## What lives here
//! - **Pure HTML reading** of already-fetched pages (`scraper::Html` in,
//!   `model` types out). No requests are made from here.
//! - **Selector choice** for each page (form names, hidden input names,
//!   `span[data-value]` offers, the shaper form).
//!
//! ## What does **not** live here
//! - **Networking and cookies** – `session` drives the transport.
//! - **Policy** – plan validation (`plan`) and shaper math (`shaper`).
//! - **Outcome banners** – matched centrally in `status`.
//!
//! ## Typical call chain
//! ```text
//! runner → session::Session::<step>() → transport.get/post_form
//!                                     ↘ specs::<page>::parse(&doc)
//! ```
//!
//! ## Testing notes
//! Specs are tested offline against saved pages in `tests/fixtures/`.
//! Markup changes upstream should only ever need edits in this module.
pub mod confirm;
pub mod login;
pub mod service;
pub mod services;
pub mod shaper;
