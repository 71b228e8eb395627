use crate::core::types::PlotArea;
use crate::error::{ChartError, ChartResult};

/// Relative padding applied around a flat domain.
const FLAT_DOMAIN_PAD_RATIO: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    /// Builds a value domain covering `values`.
    ///
    /// Empty input yields `0..1`. A flat series is widened on each side by
    /// `max(|v| * 1e-9, 1)`, clamped to the finite range. With
    /// `include_zero` the domain is stretched to contain 0.
    pub fn covering(values: impl IntoIterator<Item = f64>, include_zero: bool) -> ChartResult<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(
                    "scale values must be finite".to_owned(),
                ));
            }
            min = min.min(value);
            max = max.max(value);
        }

        if min > max {
            return Self::new(0.0, 1.0);
        }
        if include_zero {
            min = min.min(0.0);
            max = max.max(0.0);
        }
        if min == max {
            if include_zero && min == 0.0 {
                return Self::new(0.0, 1.0);
            }
            let pad = (min.abs() * FLAT_DOMAIN_PAD_RATIO).max(1.0);
            min = (min - pad).max(-f64::MAX);
            max = (max + pad).min(f64::MAX);
        }
        Self::new(min, max)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Maps a value onto the vertical extent of `area`; larger values sit higher.
    pub fn value_to_pixel_y(self, value: f64, area: PlotArea) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }
        let normalized = (value * 0.5 - self.domain_start * 0.5) / self.half_span();
        Ok(area.bottom() - normalized * area.height)
    }

    pub fn pixel_y_to_value(self, pixel: f64, area: PlotArea) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        if area.height <= 0.0 {
            return Err(ChartError::InvalidData(
                "plot area height must be > 0".to_owned(),
            ));
        }
        let normalized = (area.bottom() - pixel) / area.height;
        let offset = normalized * self.half_span();
        Ok(self.domain_start + offset + offset)
    }

    /// Evenly spaced tick values from domain start to end, inclusive.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.domain_start],
            _ => {
                let half_step = self.half_span() / (count - 1) as f64;
                (0..count)
                    .map(|i| {
                        let offset = half_step * i as f64;
                        self.domain_start + offset + offset
                    })
                    .collect()
            }
        }
    }

    /// Half the domain width; finite for any pair of finite ends.
    fn half_span(self) -> f64 {
        self.domain_end * 0.5 - self.domain_start * 0.5
    }
}
