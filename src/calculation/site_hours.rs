//! Per-site hour breakdown.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{Shift, SiteHours};

/// Sums worked hours per work site.
///
/// Sites are ordered by site id. The display name is taken from the first
/// shift seen for each site.
pub fn summarize_site_hours(shifts: &[Shift]) -> Vec<SiteHours> {
    let mut by_site: BTreeMap<&str, SiteHours> = BTreeMap::new();

    for shift in shifts {
        by_site
            .entry(shift.site_id.as_str())
            .or_insert_with(|| SiteHours {
                site_id: shift.site_id.clone(),
                site_name: shift.site_name.clone(),
                hours: Decimal::ZERO,
            })
            .hours += shift.worked_hours;
    }

    by_site.into_values().collect()
}
