use crate::aggregate::Tally;

/// Render the tally as output lines, groups in record order.
///
/// Compact form is `name<TAB>count` per group. Verbose form puts
/// `count<TAB>name` above the group's sorted, tab-indented addresses and ends
/// with a blank line and a totals summary.
pub fn render(tally: &Tally, verbose: bool) -> Vec<String> {
    let mut out = Vec::new();

    for (record, group) in &tally.groups {
        if !verbose {
            out.push(format!("{}\t{}", record.name, group.count));
            continue;
        }

        out.push(format!("{}\t{}", group.count, record.name));
        let mut macs = group.macs.clone();
        macs.sort_unstable();
        out.extend(macs.iter().map(|mac| format!("\t{mac}")));
    }

    if verbose {
        out.push(String::new());
        out.push(format!(
            "{} MACs ({} with unknown OUI) in {} lines",
            tally.mac_count, tally.unknown_count, tally.line_count
        ));
    }

    out
}
