use chrono::NaiveDate;
use fin_forecast_core::metrics;
use fin_forecast_core::series::TimeSeries;
use fin_forecast_core::smoothing::{
    run_forecast, DampedTrendForecaster, ForecastInput, Forecaster, NaiveForecaster,
    SmoothingParams,
};
use fin_forecast_core::ForecastError;

// ===========================================================================
// Forecasting tests (smoothing model, strategy trait, accuracy scoring)
// These cover the forecast contract end to end: length guarantees, trend
// continuation, damping, and the error surface of short or bad inputs.
// ===========================================================================

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn monthly_from_2020(values: Vec<f64>) -> TimeSeries {
    TimeSeries::monthly(ymd(2020, 1, 1), values).unwrap()
}

// ---------------------------------------------------------------------------
// Forecast contract tests
// ---------------------------------------------------------------------------

#[test]
fn test_forecast_length_always_matches_horizon() {
    let history = monthly_from_2020((0..30).map(|i| 500.0 + 3.0 * i as f64).collect());
    for horizon in [1, 5, 24] {
        let forecast = DampedTrendForecaster::default()
            .forecast(&history, horizon)
            .unwrap();
        assert_eq!(forecast.len(), horizon, "horizon {horizon}");
        let naive = NaiveForecaster.forecast(&history, horizon).unwrap();
        assert_eq!(naive.len(), horizon, "naive horizon {horizon}");
    }
}

#[test]
fn test_reference_revenue_forecast_is_monotone() {
    // 60 months at +1500/month: the forecast should keep climbing, and
    // damping means each increment is no larger than the one before.
    let values: Vec<f64> = (0..60).map(|i| 100_000.0 + 1_500.0 * i as f64).collect();
    let history = monthly_from_2020(values);
    let forecast = DampedTrendForecaster::default()
        .forecast(&history, 24)
        .unwrap();
    assert_eq!(forecast.len(), 24);

    for pair in forecast.values().windows(2) {
        assert!(
            pair[1] >= pair[0] - 1e-6,
            "forecast decreased: {} then {}",
            pair[0],
            pair[1]
        );
    }
    let increments: Vec<f64> = forecast.values().windows(2).map(|p| p[1] - p[0]).collect();
    for pair in increments.windows(2) {
        assert!(
            pair[1] <= pair[0] + 1e-6,
            "increment grew: {} then {}",
            pair[0],
            pair[1]
        );
    }
    // History ends at 188500, so the continuation starts near 190000.
    assert!(
        (forecast.values()[0] - 190_000.0).abs() < 1.0,
        "expected first forecast near 190000, got {}",
        forecast.values()[0]
    );
}

#[test]
fn test_forecast_insufficient_history_is_rejected() {
    let one_point = monthly_from_2020(vec![42.0]);
    assert!(matches!(
        DampedTrendForecaster::default().forecast(&one_point, 6),
        Err(ForecastError::InsufficientData(_))
    ));
    // The naive strategy is the designated substitute for short histories.
    let naive = NaiveForecaster.forecast(&one_point, 6).unwrap();
    assert_eq!(naive.values(), &[42.0; 6]);
}

#[test]
fn test_forecast_zero_horizon_is_rejected() {
    let history = monthly_from_2020(vec![1.0, 2.0, 3.0]);
    assert!(matches!(
        DampedTrendForecaster::default().forecast(&history, 0),
        Err(ForecastError::InvalidHorizon { horizon: 0 })
    ));
}

#[test]
fn test_forecast_periods_continue_the_calendar() {
    let history = monthly_from_2020((0..12).map(|i| 10.0 + i as f64).collect());
    let forecast = DampedTrendForecaster::default()
        .forecast(&history, 3)
        .unwrap();
    // History covers 2020; the forecast starts at the end of January 2021.
    assert_eq!(forecast.periods()[0], ymd(2021, 1, 31));
    assert_eq!(forecast.periods()[2], ymd(2021, 3, 31));
}

// ---------------------------------------------------------------------------
// Smoothing model tests
// ---------------------------------------------------------------------------

#[test]
fn test_damping_flattens_the_trend() {
    let history = monthly_from_2020((0..36).map(|i| 1_000.0 + 20.0 * i as f64).collect());
    let params = SmoothingParams {
        alpha: 0.5,
        beta: 0.5,
        phi: 0.8,
    };
    let forecast = DampedTrendForecaster::with_params(params)
        .forecast(&history, 12)
        .unwrap();

    let increments: Vec<f64> = forecast.values().windows(2).map(|p| p[1] - p[0]).collect();
    for pair in increments.windows(2) {
        assert!(
            pair[1] < pair[0],
            "damped increments should shrink: {} then {}",
            pair[0],
            pair[1]
        );
    }
    // At phi = 0.8 the 12-step advance is far below the undamped line.
    let undamped_end = 1_000.0 + 20.0 * 35.0 + 20.0 * 12.0;
    assert!(
        forecast.values()[11] < undamped_end - 100.0,
        "expected clear damping, got {}",
        forecast.values()[11]
    );
}

#[test]
fn test_fitted_parameters_stay_in_bounds() {
    let history = monthly_from_2020(vec![
        210.0, 180.0, 260.0, 240.0, 310.0, 280.0, 350.0, 330.0, 390.0, 410.0, 380.0, 450.0,
    ]);
    let input = ForecastInput {
        values: history.values().to_vec(),
        start: ymd(2020, 1, 1),
        horizon: 6,
        params: None,
    };
    let output = run_forecast(&input).unwrap();
    let params = output.result.params;
    for value in [params.alpha, params.beta, params.phi] {
        assert!(
            (0.0..=1.0).contains(&value),
            "fitted parameter {value} escaped [0, 1]"
        );
    }
    assert!(output.result.sse.is_finite());
    assert!(output.result.sse >= 0.0);
}

#[test]
fn test_run_forecast_reports_methodology_and_metadata() {
    let input = ForecastInput {
        values: (0..24).map(|i| 900.0 + 12.5 * i as f64).collect(),
        start: ymd(2021, 6, 1),
        horizon: 12,
        params: None,
    };
    let output = run_forecast(&input).unwrap();
    assert_eq!(
        output.methodology,
        "Damped-Trend Exponential Smoothing (Holt)"
    );
    assert_eq!(output.metadata.precision, "ieee754_f64");
    assert!(!output.metadata.version.is_empty());
    assert_eq!(output.result.forecast.len(), 12);
    assert_eq!(output.result.training_periods, 24);
}

// ---------------------------------------------------------------------------
// Derived metric tests
// ---------------------------------------------------------------------------

#[test]
fn test_net_income_identity() {
    let revenue = monthly_from_2020(vec![120_000.0, 135_000.0, 128_500.0]);
    let cogs = monthly_from_2020(vec![55_000.0, 61_250.0, 58_300.0]);
    let opex = monthly_from_2020(vec![24_000.0, 24_600.0, 25_150.0]);
    let ni = metrics::net_income(&revenue, &cogs, &opex).unwrap();
    for i in 0..3 {
        let expected = revenue.values()[i] - cogs.values()[i] - opex.values()[i];
        assert!(
            (ni.values()[i] - expected).abs() < 1e-9,
            "period {i}: expected {expected}, got {}",
            ni.values()[i]
        );
    }
}

#[test]
fn test_growth_rate_length_property() {
    // len - 1 pairs, minus one for the zero predecessor in the middle.
    let series = monthly_from_2020(vec![5.0, 0.0, 10.0, 20.0]);
    let growth = metrics::growth_rate(&series);
    assert_eq!(growth.len(), 2);
    assert_eq!(growth.values(), &[-100.0, 100.0]);
}

#[test]
fn test_profit_margin_zero_revenue_guard() {
    let revenue = monthly_from_2020(vec![0.0, 0.0, 0.0]);
    let ni = monthly_from_2020(vec![100.0, 250.0, -40.0]);
    assert_eq!(metrics::profit_margin(&revenue, &ni), 0.0);
}

// ---------------------------------------------------------------------------
// Accuracy evaluator tests
// ---------------------------------------------------------------------------

#[test]
fn test_accuracy_worked_example() {
    // MAE = 20/3, MSE = 200/3, RMSE = sqrt(200/3), MAPE = 5%
    let report = metrics::evaluate(&[100.0, 200.0, 300.0], &[110.0, 190.0, 300.0]).unwrap();
    assert!((report.mae - 6.6667).abs() < 1e-3, "MAE {}", report.mae);
    assert!((report.mse - 66.6667).abs() < 1e-3, "MSE {}", report.mse);
    assert!((report.rmse - 8.165).abs() < 1e-3, "RMSE {}", report.rmse);
    assert!((report.mape - 5.0).abs() < 1e-9, "MAPE {}", report.mape);
}

#[test]
fn test_accuracy_of_identical_series_is_zero() {
    let series = [1_200.0, 1_350.0, 1_280.0, 1_400.0];
    let report = metrics::evaluate(&series, &series).unwrap();
    assert_eq!(report.mse, 0.0);
    assert_eq!(report.rmse, 0.0);
    assert_eq!(report.mae, 0.0);
    assert_eq!(report.mape, 0.0);
    assert_eq!(report.excluded_periods, 0);
}

#[test]
fn test_accuracy_all_zero_actuals_sentinel() {
    let report = metrics::evaluate(&[0.0, 0.0], &[10.0, 20.0]).unwrap();
    assert!(
        report.mape.is_nan(),
        "all-zero actuals must yield the undefined sentinel"
    );
    assert_eq!(report.excluded_periods, 2);
}

#[test]
fn test_accuracy_length_mismatch_rejected() {
    assert!(matches!(
        metrics::evaluate(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
        Err(ForecastError::LengthMismatch { .. })
    ));
}

#[test]
fn test_forecast_scored_against_its_own_history_tail() {
    // Wire the pieces together: forecast 6 months, score against the
    // last 6 actuals of a noisy but trending series.
    let values: Vec<f64> = (0..30)
        .map(|i| 2_000.0 + 40.0 * i as f64 + if i % 2 == 0 { 15.0 } else { -15.0 })
        .collect();
    let history = monthly_from_2020(values);
    let forecast = DampedTrendForecaster::default()
        .forecast(&history, 6)
        .unwrap();
    let window = history.tail(6);
    let report = metrics::evaluate(window.values(), forecast.values()).unwrap();
    // The forecast sits above the trailing window (it extends the trend),
    // so errors are positive but bounded for this gentle slope.
    assert!(report.mape > 0.0);
    assert!(report.mape < 25.0, "MAPE unexpectedly large: {}", report.mape);
    assert_eq!(report.excluded_periods, 0);
}
