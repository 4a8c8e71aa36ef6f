//! shindan-toot adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `site`: Generator site fetchers (tokenized-form, direct-post)
//! - `mastodon`: Mastodon publishing adapter

pub mod mastodon;
pub mod site;
