//! Maximal runs of uniform formatting.

use crate::link::LinkTable;
use crate::range::TextRange;
use crate::style::{StyleSets, TextAttributes};

/// A stretch of text where the styles and link target do not change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatRun<'a> {
    pub range: TextRange,
    pub attributes: TextAttributes,
    pub href: Option<&'a str>,
}

impl FormatRun<'_> {
    /// Check if the run carries no formatting at all.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.attributes.is_empty() && self.href.is_none()
    }
}

/// Split `range` into maximal runs of identical attributes and link.
///
/// Runs cover `range` exactly, in order. An empty range yields no runs.
#[must_use]
pub fn format_runs<'a>(
    styles: &StyleSets,
    links: &'a LinkTable,
    range: TextRange,
) -> Vec<FormatRun<'a>> {
    if range.is_empty() {
        return Vec::new();
    }

    let mut cuts = vec![range.start, range.end];
    let spans = styles
        .iter()
        .flat_map(|(_, set)| set.overlapping(range).map(|s| s.range))
        .chain(links.ranges().overlapping(range).map(|s| s.range));
    for span in spans {
        cuts.extend([span.start, span.end].into_iter().filter(|&p| p > range.start && p < range.end));
    }
    cuts.sort_unstable();
    cuts.dedup();

    let mut runs: Vec<FormatRun<'a>> = Vec::with_capacity(cuts.len());
    for pair in cuts.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let attributes = styles.attributes_at(start);
        let href = links.lookup_at(start);
        if let Some(last) = runs.last_mut() {
            if last.attributes == attributes && last.href == href {
                last.range.end = end;
                continue;
            }
        }
        runs.push(FormatRun {
            range: TextRange::from_ordered(start, end),
            attributes,
            href,
        });
    }
    runs
}
