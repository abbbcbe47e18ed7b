use padbind::{
    Assignment, AssignmentManager, AxisDirection, Input, InputConfig, InputProfile, SetupSettings,
};

fn every_variant() -> Vec<Assignment> {
    vec![
        Assignment::None,
        Assignment::from_key(29, None),
        Assignment::from_key(96, Some(12)),
        Assignment::Axis {
            device_id: None,
            axis_code: 1,
            direction: AxisDirection::Negative,
        },
        Assignment::Axis {
            device_id: Some(-3),
            axis_code: 22,
            direction: AxisDirection::Positive,
        },
    ]
}

#[test]
fn assignments_survive_json_and_toml() {
    for assignment in every_variant() {
        let json = serde_json::to_string(&assignment).unwrap();
        assert_eq!(serde_json::from_str::<Assignment>(&json).unwrap(), assignment);

        let profile = InputProfile::from_configs("p", &[InputConfig::new(Input::R, assignment)]);
        let toml_str = profile.to_toml().unwrap();
        assert_eq!(InputProfile::from_toml(&toml_str).unwrap().get(Input::R), assignment);
    }
}

#[test]
fn snapshot_restore_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let configs: Vec<InputConfig> = Input::ALL
        .iter()
        .zip(every_variant().into_iter().cycle())
        .map(|(&input, assignment)| InputConfig::new(input, assignment))
        .collect();
    let source = AssignmentManager::default();
    source.load(&configs);
    let expected = source.query();

    for file in ["profiles/pad.json", "profiles/pad.toml"] {
        let path = dir.path().join(file);
        source.snapshot().to_profile("pad").save(&path).unwrap();

        let restored = AssignmentManager::default();
        restored.start_assignment(Input::Pause);
        restored.load(&InputProfile::load(&path).unwrap().to_configs());

        assert_eq!(restored.query(), expected);
        // Loading never disturbs capture.
        assert_eq!(restored.input_under_assignment(), Some(Input::Pause));
    }
}

#[test]
fn partial_profile_defaults_to_none() {
    let toml_str = r#"
name = "legacy"

[assignments.A]
type = "key"
key_code = 29

[assignments.TOUCHSCREEN]
type = "key"
key_code = 1
"#;
    let profile = InputProfile::from_toml(toml_str).unwrap();
    let mgr = AssignmentManager::with_configuration(SetupSettings::default(), &profile.to_configs());

    let configs = mgr.query();
    assert_eq!(configs.len(), Input::COUNT);
    assert_eq!(configs[0], InputConfig::new(Input::A, Assignment::from_key(29, None)));
    assert!(configs[1..].iter().all(|c| c.assignment == Assignment::None));
}
