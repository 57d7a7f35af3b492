// ==========================================
// Cross-section and failure integration tests
// ==========================================
// Covers: section symmetry, hand-calculated flexural stress,
// material budget sentinel, envelope-to-design pipeline
// ==========================================

use approx::assert_relative_eq;
use girder_core::calculations::envelope::generate_envelope;
use girder_core::calculations::failure::{
    analyze_section, BridgeDesign, DesignDemand, Evaluator, FailureMode, INVALID_FOS,
};
use girder_core::config::DesignConfig;
use girder_core::equations::plate::flexural_stress;
use girder_core::loads::presets;
use girder_core::section::{CrossSection, Side};
use girder_core::units::{NewtonMeters, NewtonMillimeters, Newtons};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("girder_core=debug")
        .try_init();
}

fn demand() -> DesignDemand {
    DesignDemand::new(Newtons(257.0), NewtonMeters(69.0))
}

// ==========================================
// Section geometry
// ==========================================

#[test]
fn test_symmetric_box_centroid_at_half_height() {
    let t = 1.27;
    let web = 120.0;
    let section = CrossSection::from_tuples(&[
        (t / 2.0, 80.0, t),
        (t + web / 2.0, t, web),
        (t + web / 2.0, t, web),
        (t + web + t / 2.0, 80.0, t),
    ])
    .unwrap();

    let total_height = 2.0 * t + web;
    assert_relative_eq!(section.centroidal_axis(), total_height / 2.0, max_relative = 1e-12);
    assert_relative_eq!(section.top(), total_height, max_relative = 1e-12);
}

#[test]
fn test_first_moment_above_and_below_axis_agree() {
    let design = BridgeDesign {
        top_flange_width: 110.0,
        web_height: 90.0,
        flange_layers: 2,
        diaphragm_count: 3,
    };
    let section = design.cross_section(&DesignConfig::default()).unwrap();
    let axis = section.centroidal_axis();
    assert_relative_eq!(
        section.first_moment_of_area(axis, Side::Above),
        section.first_moment_of_area(axis, Side::Below),
        max_relative = 1e-9
    );
}

// ==========================================
// Stresses
// ==========================================

#[test]
fn test_flexural_stress_reproduces_hand_calc() {
    let section = CrossSection::from_tuples(&[(50.0, 20.0, 100.0)]).unwrap();
    let props = section.properties().unwrap();
    assert_relative_eq!(props.second_moment, 20.0 * 100.0_f64.powi(3) / 12.0, max_relative = 1e-12);

    let moment = NewtonMillimeters::from(NewtonMeters(50.0)).value();
    let y = props.top_fiber_distance();
    let sigma = flexural_stress(y, moment, props.second_moment);
    assert_relative_eq!(sigma, y * moment / props.second_moment, max_relative = 1e-12);

    // 50 mm * 50 000 N·mm / 1 666 666.7 mm⁴ = 1.5 MPa
    assert_relative_eq!(sigma, 1.5, max_relative = 1e-12);
}

#[test]
fn test_compression_fos_is_strength_over_stress() {
    let config = DesignConfig::default();
    let design = BridgeDesign {
        top_flange_width: 100.0,
        web_height: 75.0,
        flange_layers: 1,
        diaphragm_count: 4,
    };
    let report = analyze_section(&design, &demand(), &config).unwrap();
    let props = report.section;

    let stress = props.top_fiber_distance() * 69.0e3 / props.second_moment;
    assert_relative_eq!(
        report.fos(FailureMode::Compression),
        config.material.compressive_strength.value() / stress,
        max_relative = 1e-12
    );
    assert!(report.fos(FailureMode::FlangeBetweenWebsBuckling) < report.fos(FailureMode::Tension));
}

// ==========================================
// Material budget
// ==========================================

#[test]
fn test_over_budget_design_reports_sentinel() {
    init_tracing();
    let evaluator = Evaluator::new(demand(), DesignConfig::default()).unwrap();

    // Thick, wide flange: structurally strong but far over the sheet volume
    let report = evaluator.evaluate(600.0, 150.0, 6, 20).unwrap();
    assert!(report.estimated_volume > 0.9 * 813.0 * 1016.0 * 1.27);
    assert_eq!(report.governing_fos, INVALID_FOS);
    assert!(report.checks.iter().all(|c| c.fos > 0.0));
}

#[test]
fn test_budget_boundary_follows_config() {
    let mut config = DesignConfig::default();
    let evaluator = Evaluator::new(demand(), config).unwrap();
    let report = evaluator.evaluate(100.0, 75.0, 1, 4).unwrap();
    assert!(report.within_budget);

    config.budget.usable_fraction = 0.1;
    let tight = Evaluator::new(demand(), config).unwrap();
    let report = tight.evaluate(100.0, 75.0, 1, 4).unwrap();
    assert!(!report.within_budget);
    assert_eq!(report.governing_fos, INVALID_FOS);
}

// ==========================================
// Pipeline
// ==========================================

#[test]
fn test_envelope_drives_design_evaluation() {
    init_tracing();
    let envelope = generate_envelope(
        &presets::train_load_case_2(),
        &presets::standard_sweep(),
        &presets::standard_grid(),
    )
    .unwrap();

    let evaluator = Evaluator::from_envelope(&envelope, DesignConfig::default()).unwrap();
    assert_eq!(evaluator.demand.max_shear.value(), envelope.max_shear);

    let shallow = evaluator.evaluate(100.0, 50.0, 1, 4).unwrap();
    let deep = evaluator.evaluate(100.0, 120.0, 1, 4).unwrap();
    assert!(deep.fos(FailureMode::Tension) > shallow.fos(FailureMode::Tension));
}

#[test]
fn test_invalid_config_rejected_by_evaluator() {
    let mut config = DesignConfig::default();
    config.material.poisson_ratio = 0.5;
    assert!(Evaluator::new(demand(), config).is_err());
}
