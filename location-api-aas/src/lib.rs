#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::redundant_pub_crate,
    clippy::future_not_send
)]

pub mod commands;
pub mod resolver;
mod utils;

pub use utils::{config, error, tracing::init_tracing};
