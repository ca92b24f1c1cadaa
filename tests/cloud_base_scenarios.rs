use cloud_base_analysis::{
    ascent_profile, compute_cloud_base, find_cloud_base, find_cloud_base_with_limits,
    formulas::*, AnalysisError, CloudBase, ModelInput, SearchLimits, SurfaceConditions,
};
use metfor::{Celsius, HectoPascal, Meters, Quantity};
use optional::none;

fn approx_equal(val1: f64, val2: f64, eps: f64) -> bool {
    (val1 - val2).abs() < eps
}

#[test]
fn test_typical_soaring_day() {
    let cb = compute_cloud_base(50.0, HectoPascal(1013.0), Celsius(15.0), Meters(0.0)).unwrap();

    let height = cb.height().expect("no cloud base");
    assert!(height > Meters(0.0));
    assert!(height < Meters(5000.0));
    assert_eq!(height, Meters(1273.0));
}

#[test]
fn test_saturated_at_the_surface() {
    let cb = compute_cloud_base(100.0, HectoPascal(1013.0), Celsius(15.0), Meters(0.0));
    assert_eq!(cb, Ok(CloudBase::Found(Meters(0.0))));
}

#[test]
fn test_invalid_inputs_are_reported() {
    assert_eq!(
        compute_cloud_base(50.0, HectoPascal(0.0), Celsius(15.0), Meters(0.0)),
        Err(AnalysisError::InvalidInput(ModelInput::Pressure))
    );
    assert_eq!(
        compute_cloud_base(50.0, HectoPascal(1013.0), Celsius(-237.3), Meters(0.0)),
        Err(AnalysisError::InvalidInput(ModelInput::Temperature))
    );
}

#[test]
fn test_dry_air_never_saturates() {
    let cb = compute_cloud_base(0.0, HectoPascal(1013.0), Celsius(15.0), Meters(0.0));
    assert_eq!(cb, Ok(CloudBase::NotFound));
    assert_eq!(cb.unwrap().to_string(), "No cloud base found");
}

#[test]
fn test_missing_inputs_use_defaults() {
    let all_missing = compute_cloud_base(
        none::<f64>(),
        none::<HectoPascal>(),
        none::<Celsius>(),
        none::<Meters>(),
    );
    let all_defaults = compute_cloud_base(50.0, HectoPascal(1013.0), Celsius(15.0), Meters(0.0));
    assert_eq!(all_missing, all_defaults);
}

#[test]
fn test_result_is_stable_as_the_ceiling_rises() {
    let cases = [
        (50.0, 1013.0, 15.0, 0.0),
        (70.0, 1013.0, 20.0, 0.0),
        (30.0, 900.0, 25.0, 1000.0),
        (99.0, 1013.0, 15.0, 0.0),
    ];

    for &(rh, p, t, h) in &cases {
        let sfc = SurfaceConditions::new(rh, HectoPascal(p), Celsius(t), Meters(h));
        let expected = find_cloud_base(&sfc).unwrap();

        let mut ceiling = expected.unpack() + 1.0;
        while ceiling < 50_000.0 {
            let limits = SearchLimits::new().with_max_height(Meters(ceiling));
            assert_eq!(find_cloud_base_with_limits(&sfc, &limits), Ok(expected));
            ceiling *= 3.0;
        }
    }
}

#[test]
fn test_profile_agrees_with_cloud_base() {
    let sfc = SurfaceConditions::new(70.0, HectoPascal(1013.0), Celsius(20.0), Meters(0.0));

    let profile = ascent_profile(&sfc, &SearchLimits::new()).unwrap();
    let top = profile.top().unwrap();
    assert_eq!(Ok(top.height), find_cloud_base(&sfc));

    // The specific humidity of the air is the same at the top as at the surface.
    assert!(approx_equal(
        specific_humidity(top.relative_humidity, top.pressure, top.temperature),
        sfc.specific_humidity(),
        1.0e-9
    ));
}

#[test]
fn test_formulas_at_zero_height() {
    for &(rh, p, t) in &[(50.0, 1013.0, 15.0), (20.0, 850.0, 30.0), (90.0, 1020.0, -10.0)] {
        let (p, t) = (HectoPascal(p), Celsius(t));

        assert_eq!(pressure_from_altitude(Meters(0.0), p, t), p);
        assert_eq!(temperature_after_rising(t, Meters(0.0)), t);

        let q = specific_humidity(rh, p, t);
        assert!(approx_equal(relative_humidity(q, p, t), rh, 1.0e-9));
    }
}
