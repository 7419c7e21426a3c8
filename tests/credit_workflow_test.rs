use opencredit::credit::{
    Cds, CreditInstrument, CreditOption, HazardCurveBuilder, IndexCds, OptionKind, Pricer,
    TotalReturnSwap,
};
use opencredit::rates::{Curve, DiscountCurveBuilder};
use opencredit::risk::{CurveShift, ScenarioEngine, SensitivityEngine};

fn market_curves() -> (Curve, Curve) {
    let yields: Vec<(f64, f64)> = vec![
        (0.25, 0.044),
        (0.5, 0.045),
        (1.0, 0.046),
        (2.0, 0.047),
        (3.0, 0.048),
        (5.0, 0.049),
        (7.0, 0.050),
        (10.0, 0.051),
    ];
    let discount = DiscountCurveBuilder::from_zero_rates(&yields).unwrap();

    let spreads = [(1.0, 90.0), (3.0, 140.0), (5.0, 190.0), (7.0, 210.0)];
    let fit = HazardCurveBuilder::new(&spreads, discount.clone())
        .unwrap()
        .build()
        .unwrap();
    assert!(!fit.has_failures());

    (discount, fit.curve)
}

#[test]
fn bootstrapped_market_prices_every_instrument() {
    let (discount, hazard) = market_curves();

    let cds = Cds::new(10_000_000.0, 5.0, 150.0, 0.4, 4);
    let index = IndexCds::new(10_000_000.0, 5.0, 60.0, 0.4, 125, 3, 4);
    let trs = TotalReturnSwap::new(10_000_000.0, 5.0, 100.0, 0.05, 0.4, 0.03, 4);
    let option = CreditOption::new(10_000_000.0, 150.0, 1.0, 5.0, 190.0, 0.35, OptionKind::Payer);

    let cds_price = cds.price(&discount, &hazard);
    let index_price = index.price(&discount, &hazard);
    let trs_price = trs.price(&discount, &hazard);
    let option_price = option.price(&discount).unwrap();

    assert!(cds_price.is_finite());
    assert!(index_price.is_finite());
    assert!(trs_price.is_finite());
    // A payer struck below the forward has positive value.
    assert!(option_price > 0.0);

    // Widening quote term structure bootstraps a rising hazard curve.
    assert!(hazard.value(1.0) < hazard.value(5.0));
    assert!(hazard.value(5.0) < hazard.value(7.0));
}

#[test]
fn sensitivities_and_scenarios_agree_on_the_base_state() {
    let (discount, hazard) = market_curves();
    let pricer = Pricer::new(
        CreditInstrument::Cds(Cds::new(10_000_000.0, 5.0, 150.0, 0.4, 4)),
        discount,
        hazard,
    );
    let base_price = pricer.price().unwrap();

    let sensitivity = SensitivityEngine::new(pricer.clone()).unwrap();
    assert_eq!(sensitivity.base_price().to_bits(), base_price.to_bits());

    let pv01 = sensitivity.compute_pv01(1.0).unwrap();
    assert!(pv01.ir01 != 0.0 && pv01.cs01 != 0.0);

    let key_rates = sensitivity
        .compute_key_rate_sensitivities(&[1.0, 3.0, 5.0], 1.0)
        .unwrap();
    assert_eq!(key_rates.len(), 3);

    let mut scenarios = ScenarioEngine::new(pricer.clone());
    scenarios
        .run_scenario("base", CurveShift::default(), CurveShift::default())
        .unwrap();
    scenarios
        .run_scenario(
            "parallel_rate_up",
            CurveShift::Parallel(0.01),
            CurveShift::default(),
        )
        .unwrap();
    scenarios
        .run_scenario(
            "spread_widening",
            CurveShift::default(),
            CurveShift::KeyRate(vec![(1.0, -0.002), (5.0, -0.005)]),
        )
        .unwrap();

    let summary = scenarios.summarize();
    assert_eq!(summary["base"].price.to_bits(), base_price.to_bits());
    assert_eq!(
        summary["parallel_rate_up"].delta,
        Some(summary["parallel_rate_up"].price - summary["base"].price)
    );
    assert!(summary["spread_widening"].delta.unwrap() != 0.0);

    // Nothing above may have perturbed the base pricer.
    assert_eq!(pricer.price().unwrap().to_bits(), base_price.to_bits());
}

#[test]
fn instrument_terms_serialize_round_trip() {
    let instrument = CreditInstrument::IndexCds(IndexCds::new(
        10_000_000.0,
        5.0,
        60.0,
        0.4,
        125,
        3,
        4,
    ));

    let json = serde_json::to_string(&instrument).unwrap();
    let back: CreditInstrument = serde_json::from_str(&json).unwrap();
    assert_eq!(back, instrument);
}
