//! Battery level text and charge estimation

use core::fmt::Write;

use heapless::{String, Vec};

/// Maximum points on a charge curve
pub const MAX_CURVE_POINTS: usize = 8;

/// Battery state as pushed by the battery service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryState {
    /// Charge level, 0..=100
    pub percent: u8,
    pub charging: bool,
}

/// Battery layer text: `charging` or `<percent>%`
pub fn format_battery(state: &BatteryState) -> String<12> {
    let mut text = String::new();
    if state.charging {
        let _ = text.push_str("charging");
    } else {
        let _ = write!(text, "{}%", state.percent.min(100));
    }
    text
}

/// Piecewise-linear voltage to charge mapping
///
/// Points are `(millivolts, percent)`, strictly ascending in voltage.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChargeCurve {
    points: Vec<(u16, u8), MAX_CURVE_POINTS>,
}

impl Default for ChargeCurve {
    /// Typical single-cell LiPo discharge shape
    fn default() -> Self {
        let mut points = Vec::new();
        let _ = points.extend_from_slice(&[(3450, 0), (3700, 50), (4200, 100)]);
        Self { points }
    }
}

impl ChargeCurve {
    /// Build a curve, or `None` if the points are unusable
    pub fn from_points(points: &[(u16, u8)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let ordered = points
            .windows(2)
            .all(|w| w[0].0 < w[1].0 && w[0].1 <= w[1].1);
        if !ordered || points.iter().any(|&(_, pct)| pct > 100) {
            return None;
        }
        Some(Self {
            points: Vec::from_slice(points).ok()?,
        })
    }

    pub fn points(&self) -> &[(u16, u8)] {
        &self.points
    }

    /// Charge percentage for a battery voltage
    pub fn percent(&self, millivolts: u16) -> u8 {
        let (Some(&(lo_mv, lo_pct)), Some(&(hi_mv, hi_pct))) =
            (self.points.first(), self.points.last())
        else {
            return 0;
        };
        if millivolts <= lo_mv {
            return lo_pct;
        }
        if millivolts >= hi_mv {
            return hi_pct;
        }

        self.points
            .windows(2)
            .find(|w| millivolts < w[1].0)
            .map(|w| {
                let (v0, p0) = (w[0].0 as u32, w[0].1 as u32);
                let (v1, p1) = (w[1].0 as u32, w[1].1 as u32);
                (p0 + (millivolts as u32 - v0) * (p1 - p0) / (v1 - v0)) as u8
            })
            .unwrap_or(hi_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percent() {
        let text = format_battery(&BatteryState {
            percent: 80,
            charging: false,
        });
        assert_eq!(text.as_str(), "80%");
    }

    #[test]
    fn test_format_charging_ignores_percent() {
        let text = format_battery(&BatteryState {
            percent: 42,
            charging: true,
        });
        assert_eq!(text.as_str(), "charging");
    }

    #[test]
    fn test_format_clamps() {
        let text = format_battery(&BatteryState {
            percent: 250,
            charging: false,
        });
        assert_eq!(text.as_str(), "100%");
    }

    #[test]
    fn test_default_curve() {
        let curve = ChargeCurve::default();
        assert_eq!(curve.percent(3000), 0);
        assert_eq!(curve.percent(3450), 0);
        assert_eq!(curve.percent(3575), 25);
        assert_eq!(curve.percent(3700), 50);
        assert_eq!(curve.percent(3950), 75);
        assert_eq!(curve.percent(4200), 100);
        assert_eq!(curve.percent(4400), 100);
    }

    #[test]
    fn test_rejects_bad_curves() {
        assert!(ChargeCurve::from_points(&[(3700, 50)]).is_none());
        assert!(ChargeCurve::from_points(&[(3700, 50), (3600, 60)]).is_none());
        assert!(ChargeCurve::from_points(&[(3600, 60), (3700, 50)]).is_none());
        assert!(ChargeCurve::from_points(&[(3600, 0), (4100, 101)]).is_none());
        assert!(ChargeCurve::from_points(&[(3300, 0), (4100, 100)]).is_some());
    }
}
