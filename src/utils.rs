//! Utils

use clap::Parser;

/// Arguments for the storefront demos
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Catalog fixture set to load
    #[clap(short, long, default_value = "summer")]
    pub fixture: String,
}
