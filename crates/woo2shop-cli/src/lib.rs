//! CLI library components for the WooCommerce to Shopify migration toolkit.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
