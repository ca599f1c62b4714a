//! Fixed literal dataset, 2010–2024.

use crate::panel::{IndicatorRecord, Panel};

/// First year of the literal dataset.
pub const LITERAL_START_YEAR: i32 = 2010;

/// Last year of the literal dataset.
pub const LITERAL_END_YEAR: i32 = 2024;

/// Hand-curated annual values: (year, favorability %, trade volume B$,
/// Canadian FDI B$, U.S. tourism M visitors).
///
/// Illustrative, not official statistics. The 2020 rows reflect the
/// pandemic dip in trade and tourism.
const ROWS: [(i32, f64, f64, f64, f64); 15] = [
    (2010, 80.1, 560.3, 322.5, 11.5),
    (2011, 80.5, 596.5, 340.2, 11.6),
    (2012, 81.2, 616.7, 365.9, 11.9),
    (2013, 81.0, 634.4, 390.1, 12.1),
    (2014, 81.9, 658.1, 411.8, 12.3),
    (2015, 82.4, 662.7, 435.4, 12.5),
    (2016, 81.7, 627.8, 454.0, 12.7),
    (2017, 82.6, 673.9, 490.3, 12.9),
    (2018, 83.1, 714.1, 511.3, 13.2),
    (2019, 82.8, 718.4, 531.5, 13.5),
    (2020, 81.5, 614.9, 546.2, 10.6),
    (2021, 82.9, 664.9, 570.7, 10.9),
    (2022, 83.4, 793.8, 601.2, 13.1),
    (2023, 83.6, 773.5, 651.3, 13.9),
    (2024, 84.1, 762.1, 683.9, 14.6),
];

/// The fixed 2010–2024 panel. No randomness.
pub fn literal_panel() -> Panel {
    let records = ROWS
        .iter()
        .map(|&(year, fav, trade, fdi, tourism)| IndicatorRecord {
            year,
            favorable_opinion_pct: fav,
            trade_volume_bil_usd: trade,
            canadian_fdi_bil_usd: fdi,
            us_tourism_mil_visitors: tourism,
        })
        .collect();
    Panel::new(records).expect("literal table is contiguous")
}
