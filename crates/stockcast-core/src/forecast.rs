//! Seasonal autoregressive forecasting over a normalized daily series.
//!
//! The model regresses each close on its previous [`LAG_ORDER`] closes plus a
//! day-of-week dummy per weekday (daily cadence means a weekly season). The
//! fit runs on the full series: the nominal train/test split only anchors the
//! forecast start index and the overlay's test window, so the names describe
//! the chart layout rather than the fitting data. That asymmetry is inherited
//! behavior and kept on purpose.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{PriceSeries, TickerSymbol, UtcDateTime};

/// Number of lagged closes feeding each prediction.
pub const LAG_ORDER: usize = 100;

/// Seasonal period for daily data: one dummy per weekday.
pub const SEASONAL_PERIOD: usize = 7;

/// Future points predicted beyond the last observed day.
pub const HORIZON: usize = 50;

const PARAM_COUNT: usize = SEASONAL_PERIOD + LAG_ORDER;

/// Share of the series counted as training data when anchoring the forecast.
const TRAIN_SHARE: f64 = 0.8;

/// Forecasting failures. Both variants are caller-recoverable: thinly-traded
/// or newly-listed instruments are expected to land here, and the pipeline
/// renders an explicit "forecast unavailable" state instead of propagating.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForecastError {
    #[error("series has {len} points but the lag order requires at least {required}")]
    InsufficientHistory { len: usize, required: usize },

    #[error("model fit failed: {0}")]
    ModelFit(String),
}

/// Single predicted close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub ts: UtcDateTime,
    pub close: f64,
}

/// Fixed-horizon forecast continuing a normalized daily series.
///
/// Holds exactly `HORIZON + 1` points: the first shares the last historical
/// timestamp (the presentation layer overlays or discards it), the rest step
/// one calendar day at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub symbol: TickerSymbol,
    pub points: Vec<ForecastPoint>,
    /// Index of the train/test boundary in the source series.
    pub split_index: usize,
}

/// Fit the seasonal autoregression and project `HORIZON` days past the end
/// of `series`. Expects daily cadence (see [`crate::normalize::to_daily`]).
pub fn predict(series: &PriceSeries) -> Result<Forecast, ForecastError> {
    let len = series.len();
    if len <= LAG_ORDER {
        return Err(ForecastError::InsufficientHistory {
            len,
            required: LAG_ORDER + 1,
        });
    }

    let closes = series.closes();
    if closes.iter().any(|value| !value.is_finite()) {
        return Err(ForecastError::ModelFit(String::from(
            "series contains non-finite closes",
        )));
    }

    let base = series.bars[0].ts;
    let params = fit(&closes, base)?;

    let split_index = (TRAIN_SHARE * len as f64).floor() as usize;
    let start = len - 1;
    let end = start + HORIZON;

    let mut extended = closes;
    let mut points = Vec::with_capacity(HORIZON + 1);

    for t in start..=end {
        let prediction = predict_one(&params, &extended, t, base)?;
        if t >= extended.len() {
            extended.push(prediction);
        }
        points.push(ForecastPoint {
            ts: base.add_days(t as i64),
            close: prediction,
        });
    }

    Ok(Forecast {
        symbol: series.symbol.clone(),
        points,
        split_index,
    })
}

/// Coefficients: seasonal dummies first, then lag weights (lag 1 first).
struct ModelParams(Vec<f64>);

fn fit(closes: &[f64], base: UtcDateTime) -> Result<ModelParams, ForecastError> {
    let rows = closes.len() - LAG_ORDER;

    // Normal equations: accumulate X'X and X'y row by row instead of
    // materializing the full design matrix.
    let mut xtx = vec![vec![0.0_f64; PARAM_COUNT]; PARAM_COUNT];
    let mut xty = vec![0.0_f64; PARAM_COUNT];
    let mut row = vec![0.0_f64; PARAM_COUNT];

    for offset in 0..rows {
        let t = LAG_ORDER + offset;
        fill_features(&mut row, closes, t, base);

        let target = closes[t];
        for i in 0..PARAM_COUNT {
            if row[i] == 0.0 {
                continue;
            }
            xty[i] += row[i] * target;
            for j in i..PARAM_COUNT {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }

    // Mirror the upper triangle.
    for i in 0..PARAM_COUNT {
        for j in 0..i {
            xtx[i][j] = xtx[j][i];
        }
    }

    let coefficients = solve(xtx, xty)?;
    if coefficients.iter().any(|value| !value.is_finite()) {
        return Err(ForecastError::ModelFit(String::from(
            "fit produced non-finite coefficients",
        )));
    }

    Ok(ModelParams(coefficients))
}

fn predict_one(
    params: &ModelParams,
    history: &[f64],
    t: usize,
    base: UtcDateTime,
) -> Result<f64, ForecastError> {
    let mut row = vec![0.0_f64; PARAM_COUNT];
    fill_features(&mut row, history, t, base);

    let prediction: f64 = row
        .iter()
        .zip(params.0.iter())
        .map(|(x, beta)| x * beta)
        .sum();

    if !prediction.is_finite() {
        return Err(ForecastError::ModelFit(String::from(
            "prediction diverged to a non-finite value",
        )));
    }

    Ok(prediction)
}

/// Feature vector at index `t`: one-hot weekday dummy, then the previous
/// `LAG_ORDER` closes (most recent first). Requires `t >= LAG_ORDER` and
/// `t <= history.len()`.
fn fill_features(row: &mut [f64], history: &[f64], t: usize, base: UtcDateTime) {
    for slot in row.iter_mut() {
        *slot = 0.0;
    }

    let weekday = base.add_days(t as i64).weekday_index();
    row[weekday] = 1.0;

    for lag in 0..LAG_ORDER {
        row[SEASONAL_PERIOD + lag] = history[t - 1 - lag];
    }
}

/// Solve the symmetric system via Gaussian elimination with partial pivoting.
///
/// Rank-tolerant: a column with no usable pivot is linearly dependent on the
/// columns before it, so it is dropped from elimination and its coefficient
/// fixed at zero (pseudo-inverse semantics on a basic solution). The normal
/// equations are always consistent, so the remaining pivots still yield a
/// least-squares solution even when the design has fewer independent rows
/// than parameters.
fn solve(mut matrix: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Result<Vec<f64>, ForecastError> {
    let n = rhs.len();

    let scale = matrix
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0_f64, |acc, value| acc.max(value.abs()));
    if scale == 0.0 {
        return Err(ForecastError::ModelFit(String::from(
            "design matrix is all zeros",
        )));
    }
    // Must sit above the roundoff residue elimination leaves in dependent
    // columns, yet below the noise-scale pivots of a genuinely independent
    // column.
    let tolerance = scale * 1e-8;

    // Row index of the pivot chosen for each column; dependent columns stay
    // unpivoted and solve to zero.
    let mut pivot_of_col: Vec<Option<usize>> = vec![None; n];
    let mut rank = 0;

    for col in 0..n {
        let pivot_row = (rank..n)
            .max_by(|&a, &b| {
                matrix[a][col]
                    .abs()
                    .partial_cmp(&matrix[b][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(rank);

        if matrix[pivot_row][col].abs() <= tolerance {
            continue;
        }

        matrix.swap(rank, pivot_row);
        rhs.swap(rank, pivot_row);

        let pivot = matrix[rank][col];
        for target in (rank + 1)..n {
            let factor = matrix[target][col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                let value = matrix[rank][k];
                matrix[target][k] -= factor * value;
            }
            rhs[target] -= factor * rhs[rank];
        }

        pivot_of_col[col] = Some(rank);
        rank += 1;
    }

    if rank == 0 {
        return Err(ForecastError::ModelFit(String::from(
            "design matrix has no usable pivots",
        )));
    }

    let mut solution = vec![0.0_f64; n];
    for col in (0..n).rev() {
        let Some(row) = pivot_of_col[col] else {
            continue;
        };

        let mut value = rhs[row];
        for k in (col + 1)..n {
            value -= matrix[row][k] * solution[k];
        }
        solution[col] = value / matrix[row][col];
    }

    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bar, Exchange, Interval, PriceSeries};

    fn daily_series(len: usize) -> PriceSeries {
        let symbol = TickerSymbol::resolve("HDFCBANK", Exchange::Bse).expect("symbol");
        let base = UtcDateTime::parse("2023-01-02T00:00:00Z").expect("timestamp");

        // Deterministic pseudo-random walk around a seasonal swing so the
        // lag columns are well conditioned.
        let mut state: u64 = 0x2545_F491_4F6C_DD1D;
        let bars = (0..len)
            .map(|day| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let noise = ((state >> 33) % 600) as f64 / 100.0 - 3.0;
                let swing = 10.0 * ((day as f64) * 0.35).sin();
                let weekly = ((day % 7) as f64) * 0.8;
                let close = 250.0 + swing + weekly + noise;
                Bar::new(base.add_days(day as i64), close, close + 2.0, close - 2.0, close)
                    .expect("bar")
            })
            .collect();

        PriceSeries::new(symbol, Interval::OneDay, bars).expect("series")
    }

    #[test]
    fn short_series_fails_before_fitting() {
        for len in [0, 1, 50, 100] {
            let err = predict(&daily_series(len)).expect_err("must fail");
            assert_eq!(
                err,
                ForecastError::InsufficientHistory {
                    len,
                    required: 101
                }
            );
        }
    }

    #[test]
    fn produces_fifty_one_daily_points() {
        let series = daily_series(400);
        let forecast = predict(&series).expect("must forecast");

        assert_eq!(forecast.points.len(), HORIZON + 1);
        for pair in forecast.points.windows(2) {
            assert_eq!(pair[0].ts.calendar_days_until(pair[1].ts), 1);
            assert!(pair[0].ts < pair[1].ts);
        }
        assert!(forecast.points.iter().all(|point| point.close.is_finite()));
    }

    #[test]
    fn forecast_anchors_to_last_observed_day() {
        let series = daily_series(400);
        let last_ts = series.last().expect("non-empty").ts;

        let forecast = predict(&series).expect("must forecast");
        assert_eq!(forecast.points[0].ts, last_ts);
        assert_eq!(
            forecast.points.last().expect("non-empty").ts,
            last_ts.add_days(HORIZON as i64)
        );
    }

    #[test]
    fn split_index_is_eighty_percent() {
        let series = daily_series(400);
        let forecast = predict(&series).expect("must forecast");
        assert_eq!(forecast.split_index, 320);

        let series = daily_series(251);
        let forecast = predict(&series).expect("must forecast");
        assert_eq!(forecast.split_index, 200);
    }

    #[test]
    fn mid_length_series_still_forecasts() {
        // 150 points give fewer training rows than model parameters; the
        // rank-tolerant solve must drop dependent columns and fit anyway.
        let series = daily_series(150);
        let forecast = predict(&series).expect("must forecast");

        assert_eq!(forecast.points.len(), HORIZON + 1);
        assert!(forecast.points.iter().all(|point| point.close.is_finite()));
        assert_eq!(forecast.split_index, 120);
    }

    #[test]
    fn shortest_viable_series_forecasts() {
        let series = daily_series(101);
        let forecast = predict(&series).expect("must forecast");
        assert_eq!(forecast.points.len(), HORIZON + 1);
        assert!(forecast.points.iter().all(|point| point.close.is_finite()));
    }

    #[test]
    fn constant_series_forecasts_a_flat_line() {
        // Every lag column duplicates the others, so the design is heavily
        // rank-deficient; the fit must still reproduce the constant level.
        let symbol = TickerSymbol::resolve("FLAT", Exchange::Nse).expect("symbol");
        let base = UtcDateTime::parse("2023-01-02T00:00:00Z").expect("timestamp");
        let bars = (0..300)
            .map(|day| {
                Bar::new(base.add_days(day as i64), 100.0, 100.0, 100.0, 100.0).expect("bar")
            })
            .collect();
        let series = PriceSeries::new(symbol, Interval::OneDay, bars).expect("series");

        let forecast = predict(&series).expect("must forecast");
        assert_eq!(forecast.points.len(), HORIZON + 1);
        for point in &forecast.points {
            assert!(
                (point.close - 100.0).abs() < 1e-6,
                "flat series must project flat: {}",
                point.close
            );
        }
    }
}
