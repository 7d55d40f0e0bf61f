use std::collections::BTreeMap;
use std::io::BufRead;

use tracing::{debug, info};

use crate::error::OuiCountError;
use crate::mac::{self, MacAddress};
use crate::resolver::{OuiRecord, Resolver};

/// Per-record accumulation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub count: usize,
    /// Contributing addresses in input order; only filled when collecting.
    pub macs: Vec<MacAddress>,
}

impl Group {
    fn add(&mut self, mac: Option<MacAddress>) {
        self.count += 1;
        self.macs.extend(mac);
    }
}

/// Final result of one ingestion run.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    pub groups: BTreeMap<OuiRecord, Group>,
    /// Non-blank lines that decoded.
    pub mac_count: usize,
    /// Every line read, blanks included.
    pub line_count: usize,
    /// Addresses whose prefix is not in the registry.
    pub unknown_count: usize,
}

/// Streams input records through a [`Resolver`] into a [`Tally`].
pub struct Aggregator<'a> {
    resolver: Resolver<'a>,
    collect_macs: bool,
    tally: Tally,
}

impl<'a> Aggregator<'a> {
    /// `collect_macs` keeps every address per group for verbose reporting.
    pub fn new(resolver: Resolver<'a>, collect_macs: bool) -> Self {
        Self {
            resolver,
            collect_macs,
            tally: Tally::default(),
        }
    }

    /// Account for one input line. Blank lines only bump `line_count`.
    pub fn ingest_line(&mut self, line: &str) -> Result<(), OuiCountError> {
        self.tally.line_count += 1;
        if line.trim().is_empty() {
            return Ok(());
        }

        let mac = mac::decode(line).map_err(|e| OuiCountError::AtLine {
            line_no: self.tally.line_count,
            source: Box::new(e),
        })?;
        let record = self.resolver.resolve(mac.prefix());

        self.tally.mac_count += 1;
        if record.is_unknown {
            self.tally.unknown_count += 1;
        }

        let collected = self.collect_macs.then_some(mac);
        match self.tally.groups.get_mut(record) {
            Some(group) => group.add(collected),
            None => {
                let mut group = Group::default();
                group.add(collected);
                self.tally.groups.insert(record.clone(), group);
            }
        }
        Ok(())
    }

    /// Read `reader` to the end. The first bad record aborts ingestion.
    ///
    /// A line that is not valid UTF-8 is a malformed record at that line.
    pub fn ingest<R: BufRead>(&mut self, mut reader: R) -> Result<(), OuiCountError> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }
            let raw = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);

            match std::str::from_utf8(raw) {
                Ok(line) => self.ingest_line(line)?,
                Err(e) => {
                    self.tally.line_count += 1;
                    return Err(OuiCountError::AtLine {
                        line_no: self.tally.line_count,
                        source: Box::new(OuiCountError::MalformedRecord {
                            record: String::from_utf8_lossy(raw).into_owned(),
                            reason: format!("not valid UTF-8 ({e})"),
                        }),
                    });
                }
            }
        }
    }

    pub fn finish(self) -> Tally {
        debug!(
            prefixes = self.resolver.cached(),
            fold = self.resolver.fold(),
            "Resolution cache"
        );
        info!(
            macs = self.tally.mac_count,
            unknown = self.tally.unknown_count,
            lines = self.tally.line_count,
            groups = self.tally.groups.len(),
            "Ingestion complete"
        );
        self.tally
    }
}
