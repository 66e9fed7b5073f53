//! Typed template model for the published page.
//!
//! The page is parsed once into literal segments and named slots, located by
//! unique textual anchors:
//!
//! - the embedded primary point array (`const HEAT_POINTS = [...];`)
//! - the date stamp (`id="updated-date">Updated <value><`)
//! - the aggregate listing count (`id="listing-count">`)
//! - one rent statistic per borough (`id="stat-<slug>">$<value><`)
//!
//! Parsing fails up front if any anchor is missing or matches more than once,
//! so a structural page edit that breaks an anchor surfaces immediately
//! instead of leaving a stale value behind. Rendering substitutes slot values
//! and leaves every literal byte untouched, which makes publishing idempotent
//! for unchanged data.

use std::collections::HashMap;

use regex::Regex;

use crate::domain::Region;
use crate::error::AppError;

/// A named substitution target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The primary point-array literal (brackets included).
    Points,
    /// The variable part of the date stamp (after the fixed `Updated ` label).
    Date,
    /// The aggregate listing-count display value.
    Count,
    /// One borough's displayed median (digits only, after the `$`).
    RegionStat(Region),
}

impl Slot {
    fn describe(self) -> String {
        match self {
            Slot::Points => "primary point array (const HEAT_POINTS = [...];)".to_string(),
            Slot::Date => "date stamp (id=\"updated-date\")".to_string(),
            Slot::Count => "listing count (id=\"listing-count\")".to_string(),
            Slot::RegionStat(r) => format!("borough stat (id=\"stat-{}\")", r.slug()),
        }
    }

    fn pattern(self) -> String {
        match self {
            Slot::Points => r"(?s)const HEAT_POINTS = (\[.*?\]);".to_string(),
            Slot::Date => r#"id="updated-date">Updated ([^<]*)<"#.to_string(),
            Slot::Count => r#"id="listing-count">([^<]*)<"#.to_string(),
            Slot::RegionStat(r) => {
                format!(r#"id="stat-{}">\$([^<]*)<"#, regex::escape(r.slug()))
            }
        }
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Slot(Slot),
}

/// A parsed page: literals interleaved with slots.
#[derive(Debug, Clone)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a page, requiring every slot for `regions` plus the points
    /// array, date stamp, and listing count. Each anchor must match exactly
    /// once.
    pub fn parse(html: &str, regions: &[Region]) -> Result<Template, AppError> {
        let mut slots: Vec<Slot> = vec![Slot::Points, Slot::Date, Slot::Count];
        slots.extend(regions.iter().map(|&r| Slot::RegionStat(r)));

        // Locate each slot's replaceable span (capture group 1).
        let mut spans: Vec<(usize, usize, Slot)> = Vec::with_capacity(slots.len());
        for slot in slots {
            let re = Regex::new(&slot.pattern())
                .map_err(|e| AppError::new(5, format!("Bad anchor pattern: {e}")))?;
            let mut matches = re.captures_iter(html);
            let first = matches.next().ok_or_else(|| {
                AppError::new(5, format!("Anchor not found: {}", slot.describe()))
            })?;
            if matches.next().is_some() {
                return Err(AppError::new(
                    5,
                    format!("Anchor matched more than once: {}", slot.describe()),
                ));
            }
            let group = first
                .get(1)
                .ok_or_else(|| AppError::new(5, format!("Anchor has no value group: {}", slot.describe())))?;
            spans.push((group.start(), group.end(), slot));
        }

        spans.sort_by_key(|&(start, _, _)| start);
        for pair in spans.windows(2) {
            if pair[1].0 < pair[0].1 {
                return Err(AppError::new(
                    5,
                    format!(
                        "Overlapping anchors: {} and {}",
                        pair[0].2.describe(),
                        pair[1].2.describe()
                    ),
                ));
            }
        }

        let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
        let mut cursor = 0usize;
        for (start, end, slot) in spans {
            segments.push(Segment::Literal(html[cursor..start].to_string()));
            segments.push(Segment::Slot(slot));
            cursor = end;
        }
        segments.push(Segment::Literal(html[cursor..].to_string()));

        Ok(Template { segments })
    }

    /// Render the page with new slot values. Every slot must have a value.
    pub fn render(&self, values: &HashMap<Slot, String>) -> Result<String, AppError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(slot) => {
                    let value = values.get(slot).ok_or_else(|| {
                        AppError::new(5, format!("No value provided for slot: {}", slot.describe()))
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    /// Slots found in the template, in document order.
    pub fn slots(&self) -> Vec<Slot> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Slot(slot) => Some(*slot),
                Segment::Literal(_) => None,
            })
            .collect()
    }
}
