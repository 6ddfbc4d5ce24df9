//! Chart-facing views: plain (x, y) series with no styling.
//!
//! Selection and slicing only; chart type, color, and layout belong to the
//! rendering layer.

use serde::{Deserialize, Serialize};

use crate::{Bar, Forecast, PriceSeries, UtcDateTime};

/// One point on a line chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub ts: UtcDateTime,
    pub value: f64,
}

/// Named line series ready for plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<LinePoint>,
}

impl LineSeries {
    pub fn new(name: impl Into<String>, points: Vec<LinePoint>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

/// Test-window history next to the projected forecast, for overlay charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastOverlay {
    pub historical: LineSeries,
    pub prediction: LineSeries,
}

/// Full historical close-price line.
pub fn close_line(series: &PriceSeries) -> LineSeries {
    let points = series
        .bars
        .iter()
        .map(|bar| LinePoint {
            ts: bar.ts,
            value: bar.close,
        })
        .collect();

    LineSeries::new("Close", points)
}

/// Historical closes from the train/test split onward, plus the forecast.
pub fn forecast_overlay(series: &PriceSeries, forecast: &Forecast) -> ForecastOverlay {
    let window = series
        .bars
        .get(forecast.split_index.min(series.len())..)
        .unwrap_or(&[])
        .iter()
        .map(|bar| LinePoint {
            ts: bar.ts,
            value: bar.close,
        })
        .collect();

    let prediction = forecast
        .points
        .iter()
        .map(|point| LinePoint {
            ts: point.ts,
            value: point.close,
        })
        .collect();

    ForecastOverlay {
        historical: LineSeries::new("Historical Data", window),
        prediction: LineSeries::new("Future Prediction", prediction),
    }
}

/// Pass-through OHLC slice for candlestick rendering.
pub fn candles(series: &PriceSeries) -> &[Bar] {
    &series.bars
}
