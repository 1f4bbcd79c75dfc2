use crate::model::PriceHistory;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Chart points keyed by position; the backend's date order is trusted.
pub fn series(history: &PriceHistory) -> Vec<(f64, f64)> {
    history
        .history
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.price))
        .collect()
}

/// Y axis bounds with a little headroom. A flat series gets one unit either side.
pub fn price_bounds(history: &PriceHistory) -> [f64; 2] {
    let prices = history.history.iter().map(|p| p.price).filter(|p| p.is_finite());
    let (min, max) = prices.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p), hi.max(p))
    });

    if !min.is_finite() {
        return [0.0, 1.0];
    }

    let range = max - min;
    if range <= 0.0 {
        return [min - 1.0, max + 1.0];
    }

    let pad = range / 20.0;
    [min - pad, max + pad]
}

pub fn x_bounds(history: &PriceHistory) -> [f64; 2] {
    [0.0, history.history.len().saturating_sub(1).max(1) as f64]
}

/// Renders a backend date as `M/D/YYYY`. Unrecognised formats pass through.
pub fn format_date_label(date: &str) -> String {
    const LABEL: &str = "%-m/%-d/%Y";

    if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return d.format(LABEL).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return dt.format(LABEL).to_string();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date, fmt) {
            return dt.format(LABEL).to_string();
        }
    }
    date.to_string()
}

pub fn format_price_label(price: f64) -> String {
    format!("${:.2}", price)
}

/// `M/D/YYYY $x.xx` for the point at `index`.
pub fn point_label(history: &PriceHistory, index: usize) -> Option<String> {
    history.history.get(index).map(|p| {
        format!("{} {}", format_date_label(&p.date), format_price_label(p.price))
    })
}

/// First, middle and last date labels for the X axis.
pub fn axis_date_labels(history: &PriceHistory) -> Vec<String> {
    let points = &history.history;
    match points.len() {
        0 => Vec::new(),
        1 => vec![format_date_label(&points[0].date)],
        2 => vec![
            format_date_label(&points[0].date),
            format_date_label(&points[1].date),
        ],
        n => vec![
            format_date_label(&points[0].date),
            format_date_label(&points[n / 2].date),
            format_date_label(&points[n - 1].date),
        ],
    }
}

pub fn axis_price_labels(bounds: [f64; 2]) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    vec![
        format_price_label(bounds[0]),
        format_price_label(mid),
        format_price_label(bounds[1]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PricePoint;

    fn history(points: &[(&str, f64)]) -> PriceHistory {
        PriceHistory {
            asin: "B000X".into(),
            history: points
                .iter()
                .map(|(d, p)| PricePoint {
                    date: d.to_string(),
                    price: *p,
                })
                .collect(),
        }
    }

    #[test]
    fn series_follows_backend_order() {
        let h = history(&[("2024-01-02", 17.49), ("2024-01-01", 19.99)]);
        assert_eq!(series(&h), vec![(0.0, 17.49), (1.0, 19.99)]);
    }

    #[test]
    fn bounds_are_padded() {
        let h = history(&[("2024-01-01", 10.0), ("2024-01-02", 20.0)]);
        assert_eq!(price_bounds(&h), [9.5, 20.5]);
    }

    #[test]
    fn flat_and_empty_bounds() {
        let flat = history(&[("2024-01-01", 5.0), ("2024-01-02", 5.0)]);
        assert_eq!(price_bounds(&flat), [4.0, 6.0]);
        assert_eq!(price_bounds(&history(&[])), [0.0, 1.0]);
        assert_eq!(x_bounds(&history(&[])), [0.0, 1.0]);
    }

    #[test]
    fn date_labels() {
        assert_eq!(format_date_label("2024-01-02"), "1/2/2024");
        assert_eq!(format_date_label("2024-11-30T12:00:00Z"), "11/30/2024");
        assert_eq!(format_date_label("2024-03-05 08:15:00"), "3/5/2024");
        assert_eq!(format_date_label("last tuesday"), "last tuesday");
    }

    #[test]
    fn price_labels() {
        assert_eq!(format_price_label(19.99), "$19.99");
        assert_eq!(format_price_label(17.5), "$17.50");
    }

    #[test]
    fn point_labels() {
        let h = history(&[("2024-01-01", 19.99), ("2024-01-02", 17.49)]);
        assert_eq!(point_label(&h, 1).as_deref(), Some("1/2/2024 $17.49"));
        assert!(point_label(&h, 2).is_none());
    }

    #[test]
    fn axis_labels_pick_ends_and_middle() {
        let h = history(&[
            ("2024-01-01", 1.0),
            ("2024-01-02", 2.0),
            ("2024-01-03", 3.0),
            ("2024-01-04", 4.0),
        ]);
        assert_eq!(axis_date_labels(&h), vec!["1/1/2024", "1/3/2024", "1/4/2024"]);
    }
}
