use std::collections::HashMap;

use crate::mac::Prefix;
use crate::oui::ReferenceTable;

/// Grouping key for the report.
///
/// Field order is the sort order: known vendors first, then by name, then
/// by prefix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OuiRecord {
    pub is_unknown: bool,
    pub name: String,
    /// Real prefix, or [`Prefix::ZERO`] for a known vendor under folding.
    pub prefix: Prefix,
}

/// Maps raw prefixes to [`OuiRecord`]s, memoizing each decision.
pub struct Resolver<'a> {
    table: &'a ReferenceTable,
    fold: bool,
    cache: HashMap<Prefix, OuiRecord>,
}

impl<'a> Resolver<'a> {
    /// With `fold` set, every prefix that maps to the same vendor name
    /// resolves to one shared record.
    pub fn new(table: &'a ReferenceTable, fold: bool) -> Self {
        Self {
            table,
            fold,
            cache: HashMap::new(),
        }
    }

    pub fn fold(&self) -> bool {
        self.fold
    }

    pub fn resolve(&mut self, prefix: Prefix) -> &OuiRecord {
        let table = self.table;
        let fold = self.fold;
        self.cache
            .entry(prefix)
            .or_insert_with(|| match table.get(&prefix) {
                None => OuiRecord {
                    is_unknown: true,
                    name: format!("(unknown) {prefix}"),
                    prefix,
                },
                Some(name) => OuiRecord {
                    is_unknown: false,
                    name: name.to_string(),
                    prefix: if fold { Prefix::ZERO } else { prefix },
                },
            })
    }

    /// Number of distinct prefixes resolved so far.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
