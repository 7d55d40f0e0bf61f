//! Count decimal-encoded MAC addresses by IEEE OUI vendor.
//!
//! Pipeline: input lines → [`mac::decode`] → [`resolver::Resolver`] →
//! [`aggregate::Aggregator`] → [`report::render`].

pub mod aggregate;
pub mod config;
pub mod error;
pub mod mac;
pub mod oui;
pub mod report;
pub mod resolver;

use std::io::BufRead;

pub use aggregate::{Aggregator, Group, Tally};
pub use error::OuiCountError;
pub use mac::{MacAddress, Prefix};
pub use oui::ReferenceTable;
pub use resolver::{OuiRecord, Resolver};

/// Ingest every record from `input` against `table` and return the totals.
///
/// MAC lists are only collected when `verbose` is set.
pub fn count<R: BufRead>(
    input: R,
    table: &ReferenceTable,
    fold: bool,
    verbose: bool,
) -> Result<Tally, OuiCountError> {
    let mut agg = Aggregator::new(Resolver::new(table, fold), verbose);
    agg.ingest(input)?;
    Ok(agg.finish())
}
