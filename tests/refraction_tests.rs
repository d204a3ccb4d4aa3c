use approx::assert_relative_eq;
use refract::{
    critical_angle,
    input::Inputs,
    readout::Readout,
    scene::{Canvas, Scene, SegmentKind},
    settings, solve_refraction,
    sweep::Sweep,
    Quantity, RefractError, Refraction,
};

#[test]
fn air_to_glass_from_text_fields() {
    let inputs = Inputs::parse("30", "1.0", "1.5").unwrap();
    let readout = Readout::new(inputs.alpha, inputs.n1, inputs.n2).unwrap();
    assert_relative_eq!(readout.refraction.angle().unwrap(), 19.47, epsilon = 0.005);
    assert_eq!(readout.critical_angle, 90.0);
    assert_eq!(readout.to_string(), "Refracted Angle (β): 19.47°");
}

#[test]
fn glass_to_air_past_critical_angle() {
    let critical = critical_angle(1.5, 1.0).unwrap();
    assert_relative_eq!(critical, 41.81, epsilon = 0.005);
    assert!(60.0 > critical);
    assert_eq!(
        solve_refraction(60.0, 1.5, 1.0).unwrap(),
        Refraction::TotalInternalReflection
    );
}

#[test]
fn normal_incidence_for_any_media() {
    for n1 in [0.5, 1.0, 1.33, 2.42] {
        for n2 in [0.5, 1.0, 1.33, 2.42] {
            assert_eq!(
                solve_refraction(0.0, n1, n2).unwrap(),
                Refraction::Refracted(0.0)
            );
        }
    }
}

#[test]
fn zero_index_is_invalid_input() {
    let err = Readout::new(30.0, 1.0, 0.0).unwrap_err();
    assert!(matches!(
        err,
        RefractError::InvalidInput {
            quantity: Quantity::DestinationIndex,
            ..
        }
    ));
    assert!(Scene::build(&Canvas::default(), 30.0, 0.0, 1.0).is_err());
}

#[test]
fn scene_from_default_config() {
    let settings = settings::load_default_config().unwrap();
    let inputs = settings.inputs();
    let scene = Scene::build(&settings.canvas, inputs.alpha, inputs.n1, inputs.n2).unwrap();
    let kinds: Vec<SegmentKind> = scene.segments.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SegmentKind::Normal,
            SegmentKind::Boundary,
            SegmentKind::Incident,
            SegmentKind::Mirror,
            SegmentKind::Refracted,
        ]
    );
}

#[test]
fn sweep_written_as_json() {
    let sweep = Sweep {
        start: 0.0,
        end: 90.0,
        steps: 91,
    };
    let table = sweep.run(1.33, 1.0).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sweep.json");
    table.writeup(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let rows = value["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 91);
    assert_eq!(rows[0]["beta"], serde_json::json!(0.0));
    assert!(rows[90]["beta"].is_null());
    assert_relative_eq!(
        value["critical_angle"].as_f64().unwrap(),
        48.753,
        epsilon = 0.001
    );
}

#[test]
fn sweep_written_as_text() {
    let sweep = Sweep {
        start: 0.0,
        end: 60.0,
        steps: 3,
    };
    let table = sweep.run(1.5, 1.0).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sweep.txt");
    table.writeup(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let last = text.lines().last().unwrap();
    assert_eq!(last, "60.000000 TIR");
}
