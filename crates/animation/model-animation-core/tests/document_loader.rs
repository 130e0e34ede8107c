use model_animation_core::{
    parse_model_document_json, AnimationError, Interpolation, NodeId, TargetPath, Value,
};

#[test]
fn parses_walk_cycle_fixture() {
    let json = model_animation_fixtures::models::json("walk-cycle").expect("load walk-cycle fixture");
    let doc = parse_model_document_json(&json).expect("parse walk-cycle");

    let names: Vec<&str> = doc.node_names().collect();
    assert_eq!(names, vec!["root", "hip", "knee"]);
    assert_eq!(doc.node_id("knee"), Some(NodeId(2)));
    assert_eq!(doc.node_id("ankle"), None);

    let walk = doc.animation("walk").expect("walk animation");
    assert_eq!(walk.times(), &[0.0, 1.0, 2.0, 3.0]);
    assert_eq!(walk.epoch(), 0.0);
    assert_eq!(walk.last_time(), 3.0);
    assert_eq!(walk.sample_count(), 4);
    assert_eq!(walk.channels().len(), 2);

    let hip = &walk.channels()[0];
    assert_eq!(hip.target.node, NodeId(1));
    assert_eq!(hip.target.path, TargetPath::Translation);
    assert_eq!(hip.sampler.value_at(1), Some(&Value::Vec3([0.0, 1.1, 0.25])));

    // Flat output array chunked into quaternions; interpolation defaults to LINEAR.
    let knee = &walk.channels()[1];
    assert_eq!(knee.target.path, TargetPath::Rotation);
    assert_eq!(knee.sampler.interpolation, Interpolation::Linear);
    assert_eq!(
        knee.sampler.value_at(3),
        Some(&Value::Quat([-0.3827, 0.0, 0.0, 0.9239]))
    );

    let crouch = doc.animation("crouch").expect("crouch animation");
    assert_eq!(crouch.channels()[0].sampler.interpolation, Interpolation::Step);

    let rest = doc.rest_pose();
    assert_eq!(rest.len(), 3);
    assert_eq!(rest.get(NodeId(1)).unwrap().translation, [0.0, 1.0, 0.0]);
    assert_eq!(rest.get(NodeId(0)).unwrap().rotation, [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn parses_morph_weights_fixture() {
    let json = model_animation_fixtures::models::json("morph-pulse").expect("load morph-pulse fixture");
    let doc = parse_model_document_json(&json).expect("parse morph-pulse");
    let pulse = doc.animation("pulse").expect("pulse animation");
    assert_eq!(pulse.epoch(), 0.5);
    assert_eq!(
        pulse.channels()[0].sampler.value_at(2),
        Some(&Value::Weights(vec![1.0, 0.5]))
    );
}

#[test]
fn rejects_structurally_invalid_animations() {
    let cases = [
        // non-monotonic TIME
        r#"{"nodes":{"n":{}},"animations":{"a":{"parameters":{"TIME":[0,2,1],"o":[[0,0,0],[0,0,0],[0,0,0]]},
            "samplers":{"s":{"input":"TIME","output":"o"}},
            "channels":[{"sampler":"s","target":{"id":"n","path":"translation"}}]}}}"#,
        // output count differs from sample count
        r#"{"nodes":{"n":{}},"animations":{"a":{"parameters":{"TIME":[0,1],"o":[[0,0,0]]},
            "samplers":{"s":{"input":"TIME","output":"o"}},
            "channels":[{"sampler":"s","target":{"id":"n","path":"translation"}}]}}}"#,
        // unknown output parameter
        r#"{"nodes":{"n":{}},"animations":{"a":{"parameters":{"TIME":[0,1]},
            "samplers":{"s":{"input":"TIME","output":"missing"}},
            "channels":[{"sampler":"s","target":{"id":"n","path":"translation"}}]}}}"#,
        // sampler input is not TIME
        r#"{"nodes":{"n":{}},"animations":{"a":{"parameters":{"TIME":[0,1],"o":[[0,0,0],[1,1,1]]},
            "samplers":{"s":{"input":"o","output":"o"}},
            "channels":[{"sampler":"s","target":{"id":"n","path":"translation"}}]}}}"#,
        // missing TIME
        r#"{"nodes":{"n":{}},"animations":{"a":{"parameters":{}}}}"#,
    ];
    for json in cases {
        let err = parse_model_document_json(json).unwrap_err();
        assert!(
            matches!(err, AnimationError::InvalidDefinition { .. }),
            "unexpected error {err:?} for {json}"
        );
        assert_eq!(err.category(), "document");
    }
}

#[test]
fn rejects_unknown_target_node() {
    let json = r#"{"nodes":{"n":{}},"animations":{"a":{"parameters":{"TIME":[0,1],"o":[[0,0,0],[1,1,1]]},
        "samplers":{"s":{"input":"TIME","output":"o"}},
        "channels":[{"sampler":"s","target":{"id":"m","path":"scale"}}]}}}"#;
    assert_eq!(
        parse_model_document_json(json).unwrap_err(),
        AnimationError::UnresolvedTarget {
            animation: "a".to_string(),
            node: "m".to_string()
        }
    );
}
