//! Integration tests

use approx::assert_relative_eq;
use balancing_allocator::allocation::{HourlyWinner, winner_counts};
use balancing_allocator::utils::MetricsSummary;
use balancing_allocator::*;
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use std::thread::JoinHandle;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap()
}

fn hour(i: i64) -> DateTime<Utc> {
    start() + Duration::hours(i)
}

/// fcrDUp=20, fcrDDown=10, fcrN=15, mfrr=25, spot rising 30..=77
fn ramp_forecast() -> Vec<ForecastPoint> {
    (0..48)
        .map(|i| ForecastPoint::new(hour(i), 15.0, 20.0, 10.0, 25.0, 30.0 + i as f64))
        .collect()
}

fn weather(wind_ms: f64, temperature_c: f64) -> Vec<WeatherPoint> {
    (0..24)
        .map(|i| WeatherPoint::new(hour(i), wind_ms, temperature_c))
        .collect()
}

fn gaps(gap_mw: f64) -> Vec<ProductionGapPoint> {
    (0..24)
        .map(|i| ProductionGapPoint::new(hour(i), 8_000.0 + gap_mw, 8_000.0))
        .collect()
}

fn site() -> SiteConfig {
    SiteRegistry::builtin().default_site().clone()
}

#[test]
fn test_full_allocation_workflow() {
    let engine: AllocationEngine = AllocationEngine::new(PricingPolicy::default()).unwrap();
    let site = site();
    assert_eq!(site.capacity, 5.0);

    let inputs = MarketInputs {
        forecast: ramp_forecast(),
        ..Default::default()
    };

    let snapshot: DashboardSnapshot = engine.snapshot(&inputs, &site);

    let turnover = |market: Market| {
        snapshot
            .turnovers
            .iter()
            .find(|t| t.market == market)
            .unwrap()
            .clone()
    };

    let fcr_d = turnover(Market::FcrD).turnover_sek;
    let spot = turnover(Market::Spot).turnover_sek;
    let fcr_n = turnover(Market::FcrN).turnover_sek;

    // 48 × 30 × 0.83 × 11 × 5
    assert_relative_eq!(fcr_d, 65_736.0, max_relative = 1e-9);
    // 47 upward moves of 1 × 11 × 5
    assert_relative_eq!(spot, 2_585.0, max_relative = 1e-9);
    assert_relative_eq!(fcr_n, 17_820.0, max_relative = 1e-9);

    assert_eq!(turnover(Market::FcrD).trend, Trend::High);
    assert_eq!(turnover(Market::FcrN).trend, Trend::Low);
    assert_eq!(turnover(Market::Spot).trend, Trend::Low);

    // Spot per hour is 30..77 × 55, always above FCR-D's 1,369.5
    let policy = engine.policy();
    for (winner, point) in snapshot.hourly_winners.iter().zip(inputs.forecast.iter()) {
        let values = policy.hourly_values(point, site.capacity);
        assert_eq!(winner.market, values.arg_max().0);
        assert_eq!(winner.market, Market::Spot);
        assert_eq!(winner.turnover_sek, values.max_value());
    }

    // 24h spread 23 × 11 = 253 stays below FCR-D's 273.9 per MW
    assert_ne!(snapshot.top_recommendation, TopRecommendation::SpotMarket);

    assert_relative_eq!(
        snapshot.strategy_comparison.total_ai_strategy_revenue,
        141_240.0,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        snapshot.strategy_comparison.static_fcrn_revenue,
        17_820.0,
        max_relative = 1e-9
    );
    assert!(snapshot.strategy_comparison.revenue_alpha_pct > 600.0);
}

#[test]
fn test_trend_thresholds() {
    for (value, expected) in [
        (100.0, Trend::High),
        (80.0, Trend::High),
        (79.9, Trend::Mid),
        (55.0, Trend::Mid),
        (54.9, Trend::Low),
        (0.0, Trend::Low),
    ] {
        assert_eq!(Trend::classify(value, 100.0), expected, "value {}", value);
    }

    assert_eq!(Trend::classify(0.0, 0.0), Trend::Low);
}

#[test]
fn test_all_zero_prices() {
    let engine = AllocationEngine::new(PricingPolicy::default()).unwrap();
    let forecast: Vec<ForecastPoint> = (0..48)
        .map(|i| ForecastPoint::new(hour(i), 0.0, 0.0, 0.0, 0.0, 0.0))
        .collect();

    for t in engine.derive_turnovers(&forecast, &site()) {
        assert_eq!(t.turnover_sek, 0.0);
        assert_eq!(t.trend, Trend::Low);
    }

    // Leftmost market wins every all-zero tie
    let winners = engine.hourly_winning_path(&forecast, &site());
    assert!(winners.iter().all(|w| w.market == Market::FcrN));

    let cmp = engine.simulate_strategy_performance(&forecast, &site());
    assert_eq!(cmp.revenue_alpha_pct, 0.0);
}

#[test]
fn test_negative_prices_propagate() {
    let engine = AllocationEngine::new(PricingPolicy::default()).unwrap();
    let forecast = vec![ForecastPoint::new(start(), -10.0, -5.0, -5.0, -8.0, -20.0)];

    let turnovers = engine.derive_turnovers(&forecast, &site());
    let fcr_n = turnovers.iter().find(|t| t.market == Market::FcrN).unwrap();
    assert!(fcr_n.turnover_sek < 0.0);
}

#[test]
fn test_spot_market_override() {
    let engine = AllocationEngine::new(PricingPolicy::default()).unwrap();
    let forecast: Vec<ForecastPoint> = (0..24)
        .map(|i| {
            let spot = if i % 2 == 0 { 10.0 } else { 210.0 };
            ForecastPoint::new(hour(i), 10.0, 10.0, 10.0, 10.0, spot)
        })
        .collect();

    let top = engine.top_market_recommendation(&forecast, &site());
    assert_eq!(top, TopRecommendation::SpotMarket);
    assert_eq!(top.to_string(), "SPOT MARKET");
}

#[test]
fn test_turnover_winner_without_override() {
    let engine = AllocationEngine::new(PricingPolicy::default()).unwrap();
    let forecast: Vec<ForecastPoint> = (0..48)
        .map(|i| ForecastPoint::new(hour(i), 5.0, 40.0, 40.0, 5.0, 1.0))
        .collect();

    let top = engine.top_market_recommendation(&forecast, &site());
    assert_eq!(top, TopRecommendation::Market(Market::FcrD));
}

#[test]
fn test_dominance_shares() {
    let engine = AllocationEngine::new(PricingPolicy::default()).unwrap();
    let forecast = ramp_forecast();

    let dominance = engine.market_dominance(&forecast, &site());
    let order: Vec<Market> = dominance.iter().map(|d| d.market).collect();
    assert_eq!(order, Market::DOMINANCE_ORDER.to_vec());

    let spot = dominance.iter().find(|d| d.market == Market::Spot).unwrap();
    assert_eq!(spot.winner_hours, 48);
    assert_relative_eq!(spot.winner_share_pct, 100.0);

    let hours: usize = dominance.iter().map(|d| d.winner_hours).sum();
    assert_eq!(hours, 48);
}

#[test]
fn test_reasoning_disturbance_spike() {
    let engine = AllocationEngine::new(PricingPolicy::default()).unwrap();
    let forecast: Vec<ForecastPoint> = (0..24)
        .map(|i| ForecastPoint::new(hour(i), 15.0, 20.0, 20.0, 25.0, 40.0))
        .collect();
    let weather = weather(2.0, -5.0);
    let gaps = gaps(-600.0);

    let inputs = ReasoningInputs::new(&forecast, &weather, &gaps);
    let insight = engine.generate_insight(&inputs, &site());

    assert_eq!(insight.confidence, Confidence::High);
    assert!(insight.strategy.contains("4.2MW"));
    assert!(insight.drivers[0].starts_with("Low wind output"));
    assert!(insight.drivers[1].starts_with("Cold front"));
    assert!(insight.drivers[2].starts_with("Negative production gap"));

    // delta = 600 + 375 + 180 = 1155 → round(58 + 33) = 91
    assert_eq!(insight.confidence_score, 91);
}

#[test]
fn test_reasoning_mfrr_tilt() {
    let engine = AllocationEngine::new(PricingPolicy::default()).unwrap();
    let forecast: Vec<ForecastPoint> = (0..24)
        .map(|i| ForecastPoint::new(hour(i), 10.0, 10.0, 10.0, 30.0, 40.0))
        .collect();
    let weather = weather(6.0, 4.0);
    let gaps = gaps(100.0);

    let inputs = ReasoningInputs::new(&forecast, &weather, &gaps);
    let insight = engine.generate_insight(&inputs, &site());

    assert_eq!(insight.confidence, Confidence::Medium);
    assert!(insight.summary.contains("favoring mFRR"));
    // 5 MW × 0.65 = 3.25 rounds half up
    assert!(insight.strategy.contains("keep 3.3MW"));
}

#[test]
fn test_snapshot_with_context_and_winner_path() {
    let engine = AllocationEngine::new(PricingPolicy::default()).unwrap();
    let inputs = MarketInputs {
        forecast: ramp_forecast(),
        weather: weather(2.0, -5.0),
        production_gap: gaps(-600.0),
        context: Some(ContextSignal {
            timestamp: start(),
            prod_cons_gap: -640.0,
            temp: -4.5,
            wind_speed: 2.2,
        }),
    };

    let snapshot = engine.snapshot(&inputs, &site());
    let drivers = &snapshot.reasoning.drivers;

    assert!(drivers[0].ends_with("Latest reading: 2.2 m/s."));
    assert!(drivers[2].contains("Latest reading: -640 MW."));
    assert!(drivers[2].ends_with("Hourly winner path favors Spot in 48 of 48 hours."));
}

#[test]
fn test_allocation_split_from_winners() {
    let engine = AllocationEngine::new(PricingPolicy::default()).unwrap();
    let inputs = MarketInputs {
        forecast: ramp_forecast(),
        ..Default::default()
    };

    let snapshot = engine.snapshot(&inputs, &site());
    let split = snapshot.allocation.split;

    assert_relative_eq!(split.spot_split, 1.0);
    assert_eq!(split.fcr_split, 0.0);
    assert_eq!(split.mfrr_cm_split, 0.0);
    let last_hour = inputs.forecast[47].timestamp;
    assert_eq!(snapshot.allocation.bid_time_48h, last_hour);
}

#[test]
fn test_site_fallback() {
    let registry = SiteRegistry::builtin();

    assert_eq!(registry.get_or_default(Some("1015")).id, "1015");
    assert_eq!(registry.get_or_default(Some("9999")).id, "1011");
    assert_eq!(registry.get_or_default(None).id, "1011");
    assert!(matches!(registry.get("9999"), Err(Error::UnknownSite(_))));
}

#[test]
fn test_portfolio_evaluation() {
    let engine = AllocationEngine::new(PricingPolicy::default()).unwrap();
    let registry = SiteRegistry::builtin();
    let inputs = MarketInputs {
        forecast: ramp_forecast(),
        ..Default::default()
    };

    let sites = registry.sites();

    let snapshots = engine.evaluate_portfolio(&inputs, sites).unwrap();
    assert_eq!(snapshots.len(), 8);

    // Turnover is linear in capacity
    let base_per_mw = snapshots[0].turnover_48h_sek / 5.0;
    for (snapshot, site) in snapshots.iter().zip(sites) {
        let per_mw = snapshot.turnover_48h_sek / site.capacity;
        assert_relative_eq!(per_mw, base_per_mw, max_relative = 1e-9);
    }
}

#[test]
fn test_concurrent_snapshots() {
    use std::sync::Arc;
    use std::thread;

    let engine = Arc::new(AllocationEngine::new(PricingPolicy::default()).unwrap());
    let inputs = Arc::new(SyntheticMarketData::new(start()).market_inputs());

    let mut handles: Vec<JoinHandle<f64>> = vec![];

    for thread_id in 0..4 {
        let engine: Arc<AllocationEngine> = Arc::clone(&engine);
        let inputs = Arc::clone(&inputs);
        let handle: JoinHandle<f64> = thread::spawn(move || {
            let registry = SiteRegistry::builtin();
            let site = &registry.sites()[thread_id];
            let mut total = 0.0;
            for _ in 0..25 {
                total = engine.snapshot(&inputs, site).turnover_48h_sek;
            }
            total
        });
        handles.push(handle);
    }

    for handle in handles {
        assert!(handle.join().unwrap() > 0.0);
    }

    let summary: MetricsSummary = engine.get_metrics().summary();
    assert_eq!(summary.snapshots_evaluated, 100);
    assert_eq!(summary.hours_processed, 100 * 48);
}

#[test]
fn test_recalibration_applies_to_later_snapshots() {
    let engine = AllocationEngine::new(PricingPolicy::default()).unwrap();
    let inputs = MarketInputs {
        forecast: ramp_forecast(),
        ..Default::default()
    };

    let before = engine.snapshot(&inputs, &site()).turnover_48h_sek;
    engine.recalibrate(PricingPolicy::with_rate(5.5)).unwrap();
    let after = engine.snapshot(&inputs, &site()).turnover_48h_sek;

    assert_relative_eq!(after, before / 2.0, max_relative = 1e-9);
}

#[test]
fn test_error_handling() {
    let policy = PricingPolicy {
        fcr_d_capacity_factor: -1.0,
        ..Default::default()
    };

    let result: Result<AllocationEngine> = AllocationEngine::new(policy);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_snapshot_serializes_camel_case() {
    let engine = AllocationEngine::new(PricingPolicy::default()).unwrap();
    let inputs = SyntheticMarketData::new(start()).market_inputs();

    let json = serde_json::to_value(engine.snapshot(&inputs, &site())).unwrap();

    assert!(json.get("turnover48hSek").is_some());
    assert!(json["strategyComparison"].get("revenueAlphaPct").is_some());
    assert!(json["allocation"].get("fcr_split").is_some());
    assert!(json["topRecommendation"].is_string());
}

fn winner(market: Market) -> HourlyWinner {
    HourlyWinner {
        timestamp: start(),
        hour_label: "00:00".to_string(),
        market,
        turnover_sek: 1.0,
    }
}

#[test]
fn test_winner_counts() {
    let winners = vec![
        winner(Market::FcrD),
        winner(Market::Spot),
        winner(Market::FcrD),
    ];
    let counts = winner_counts(&winners);

    assert_eq!(counts[Market::FcrD.index()], 2);
    assert_eq!(counts[Market::Spot.index()], 1);
    assert_eq!(counts.iter().sum::<usize>(), winners.len());
}

fn arb_forecast() -> impl Strategy<Value = Vec<ForecastPoint>> {
    prop::collection::vec(
        (0.0..100.0, 0.0..60.0, 0.0..60.0, 0.0..120.0, -20.0..300.0),
        1..72,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (n, up, down, mfrr, spot))| {
                ForecastPoint::new(hour(i as i64), n, up, down, mfrr, spot)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_turnover_scales_with_capacity(forecast in arb_forecast(), capacity in 0.5..20.0f64) {
        let engine = AllocationEngine::new(PricingPolicy::default()).unwrap();
        let single = SiteConfig::new("a", "A", capacity);
        let double = SiteConfig::new("b", "B", capacity * 2.0);

        let a = engine.derive_turnovers(&forecast, &single);
        let b = engine.derive_turnovers(&forecast, &double);

        for (x, y) in a.iter().zip(b.iter()) {
            let expected = 2.0 * x.turnover_sek;
            prop_assert!((y.turnover_sek - expected).abs() <= 1e-6 * (1.0 + expected.abs()));
        }
    }

    #[test]
    fn prop_optimized_equals_winner_sum(forecast in arb_forecast()) {
        let engine = AllocationEngine::new(PricingPolicy::default()).unwrap();
        let site = SiteConfig::new("a", "A", 5.0);

        let winners = engine.hourly_winning_path(&forecast, &site);
        let cmp = engine.simulate_strategy_performance(&forecast, &site);
        let sum: f64 = winners.iter().map(|w| w.turnover_sek).sum();

        prop_assert_eq!(sum, cmp.total_ai_strategy_revenue);
        prop_assert_eq!(winners.len(), forecast.len().min(48));
    }

    #[test]
    fn prop_winner_is_hourly_max(forecast in arb_forecast()) {
        let engine = AllocationEngine::new(PricingPolicy::default()).unwrap();
        let site = SiteConfig::new("a", "A", 3.0);
        let policy = engine.policy();

        let winners = engine.hourly_winning_path(&forecast, &site);
        for (w, p) in winners.iter().zip(forecast.iter()) {
            let values = policy.hourly_values(p, site.capacity);
            for (_, v) in values.iter() {
                prop_assert!(w.turnover_sek >= v);
            }
        }
    }

    #[test]
    fn prop_confidence_score_bounded(
        wind in -5.0..30.0f64,
        temp in -40.0..40.0f64,
        gap in -5000.0..5000.0f64
    ) {
        let forecast = ramp_forecast();
        let weather = weather(wind, temp);
        let gaps = gaps(gap);

        let insight = generate_insight(&ReasoningInputs::new(&forecast, &weather, &gaps), &site());
        prop_assert!((40..=98).contains(&insight.confidence_score));
    }
}
