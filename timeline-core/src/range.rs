//! Cửa sổ thời gian đang hiển thị và phép quy đổi thời gian sang pixel.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::TimelineError;

/// Cửa sổ thời gian của một lượt bố cục.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawRange")]
pub struct VisibleRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawRange> for VisibleRange {
    type Error = TimelineError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

/// Kiểm tra tỉ lệ nới cửa sổ nhận từ bên ngoài (JS, dòng lệnh).
pub fn validate_margin(margin: f64) -> Result<f64, TimelineError> {
    if margin.is_finite() && margin >= 0.0 {
        Ok(margin)
    } else {
        Err(TimelineError::InvalidRange(format!(
            "tỉ lệ nới cửa sổ không hợp lệ: {margin}"
        )))
    }
}

impl VisibleRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TimelineError> {
        if end < start {
            return Err(TimelineError::InvalidRange(format!(
                "end {end} đứng trước start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn span(&self) -> Duration {
        self.end - self.start
    }

    /// Kiểm tra `time` nằm hẳn trong cửa sổ (so sánh chặt cả hai đầu) sau khi
    /// nới mỗi phía thêm `margin` lần độ dài cửa sổ.
    ///
    /// `margin` âm hoặc NaN coi như 0. Biên nới vượt giới hạn của `DateTime`
    /// thì phía đó coi như không có biên.
    pub fn contains(&self, time: DateTime<Utc>, margin: f64) -> bool {
        let padding_ms = self.span().num_milliseconds() as f64 * margin;
        let padding = if padding_ms > 0.0 {
            Duration::try_milliseconds(padding_ms as i64)
        } else {
            Some(Duration::zero())
        };

        let lower = padding.and_then(|padding| self.start.checked_sub_signed(padding));
        let upper = padding.and_then(|padding| self.end.checked_add_signed(padding));
        lower.map_or(true, |lower| time > lower) && upper.map_or(true, |upper| time < upper)
    }
}

/// Ánh xạ tuyến tính thời gian -> pixel trên chiều rộng vùng vẽ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    range: VisibleRange,
    width: f64,
}

impl TimeScale {
    pub fn new(range: VisibleRange, width: f64) -> Result<Self, TimelineError> {
        if range.span() <= Duration::zero() {
            return Err(TimelineError::InvalidRange(
                "cửa sổ thời gian có độ dài 0".to_string(),
            ));
        }
        if !(width.is_finite() && width > 0.0) {
            return Err(TimelineError::InvalidRange(format!(
                "chiều rộng vùng vẽ không hợp lệ: {width}"
            )));
        }
        Ok(Self { range, width })
    }

    pub fn range(&self) -> &VisibleRange {
        &self.range
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    fn pixels_per_ms(&self) -> f64 {
        self.width / self.range.span().num_milliseconds() as f64
    }

    pub fn to_screen(&self, time: DateTime<Utc>) -> f64 {
        (time - self.range.start).num_milliseconds() as f64 * self.pixels_per_ms()
    }

    pub fn to_time(&self, x: f64) -> DateTime<Utc> {
        let offset = (x / self.pixels_per_ms()).round() as i64;
        self.range.start + Duration::milliseconds(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn window() -> VisibleRange {
        VisibleRange::new(at(1_000), at(2_000)).unwrap()
    }

    #[rstest]
    #[case(1_500, true)]
    #[case(1_001, true)]
    #[case(1_000, false)]
    #[case(2_000, false)]
    #[case(999, false)]
    #[case(2_100, false)]
    fn exact_window_uses_strict_bounds(#[case] start: i64, #[case] expected: bool) {
        assert_eq!(window().contains(at(start), 0.0), expected);
    }

    #[rstest]
    #[case(800, true)]
    #[case(750, false)]
    #[case(2_249, true)]
    #[case(2_250, false)]
    fn quarter_margin_pads_both_sides(#[case] start: i64, #[case] expected: bool) {
        assert_eq!(window().contains(at(start), 0.25), expected);
    }

    #[rstest]
    #[case(f64::NAN, 1_500, true)]
    #[case(f64::NAN, 2_000, false)]
    #[case(-0.5, 1_500, true)]
    #[case(-0.5, 999, false)]
    fn unusable_margin_means_no_padding(
        #[case] margin: f64,
        #[case] start: i64,
        #[case] expected: bool,
    ) {
        assert_eq!(window().contains(at(start), margin), expected);
    }

    #[rstest]
    #[case(1.0e9)]
    #[case(f64::INFINITY)]
    fn huge_margin_saturates_instead_of_overflowing(#[case] margin: f64) {
        let day = VisibleRange::new(at(0), at(86_400_000)).unwrap();
        assert!(day.contains(at(1_000), margin));
        assert!(day.contains(at(-86_400_000), margin));
    }

    #[rstest]
    #[case(0.0, true)]
    #[case(0.25, true)]
    #[case(-0.1, false)]
    #[case(f64::NAN, false)]
    #[case(f64::INFINITY, false)]
    fn external_margins_are_validated(#[case] margin: f64, #[case] accepted: bool) {
        assert_eq!(validate_margin(margin).is_ok(), accepted);
    }

    #[test]
    fn deserializing_checks_order() {
        let reversed = r#"{"start":"2024-03-01T10:00:00Z","end":"2024-03-01T08:00:00Z"}"#;
        assert!(serde_json::from_str::<VisibleRange>(reversed).is_err());

        let ordered = r#"{"start":"2024-03-01T08:00:00Z","end":"2024-03-01T10:00:00Z"}"#;
        let range: VisibleRange = serde_json::from_str(ordered).unwrap();
        assert!(range.start < range.end);
    }

    #[test]
    fn rejects_reversed_range() {
        assert!(matches!(
            VisibleRange::new(at(10), at(5)),
            Err(TimelineError::InvalidRange(_))
        ));
    }

    #[test]
    fn scale_maps_linearly() {
        let scale = TimeScale::new(window(), 500.0).unwrap();
        assert_eq!(scale.to_screen(at(1_000)), 0.0);
        assert_eq!(scale.to_screen(at(1_500)), 250.0);
        assert_eq!(scale.to_screen(at(2_400)), 700.0);
        assert_eq!(scale.to_time(250.0), at(1_500));
    }

    #[test]
    fn scale_rejects_degenerate_input() {
        let empty = VisibleRange::new(at(5), at(5)).unwrap();
        assert!(TimeScale::new(empty, 100.0).is_err());
        assert!(TimeScale::new(window(), 0.0).is_err());
        assert!(TimeScale::new(window(), f64::NAN).is_err());
    }
}
