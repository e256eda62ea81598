//! Integration round-trips across the full tag set, exercising the encoder
//! and decoder as external callers see them.

use ubhp_codec::{
    decode_value, CanonicalEncoder, ModelWeights, SExpr, SExprTag, SeedTransform, SignatureRecord,
};

#[test]
fn list_of_three_primitives_is_self_describing() {
    // Encode three primitives independently, frame them as a list, then
    // recover exactly three children with correct tags in original order.
    let mut a = CanonicalEncoder::new();
    a.encode_i32(42);
    let mut b = CanonicalEncoder::new();
    b.encode_string("quadrant");
    let mut c = CanonicalEncoder::new();
    c.encode_bool(false);

    let mut list = CanonicalEncoder::new();
    list.encode_list(&[a.finalize(), b.finalize(), c.finalize()]);
    let bytes = list.finalize();

    let (decoded, consumed) = decode_value(&bytes, 0).expect("list must decode");
    assert_eq!(consumed, bytes.len());

    let SExpr::List(children) = decoded else {
        panic!("expected a list");
    };
    assert_eq!(children.len(), 3);
    assert_eq!(children[0], SExpr::Int32(42));
    assert_eq!(children[1], SExpr::String("quadrant".into()));
    assert_eq!(children[2], SExpr::Bool(false));
    assert_eq!(
        children.iter().map(SExpr::tag).collect::<Vec<_>>(),
        vec![SExprTag::Int32, SExprTag::String, SExprTag::Bool]
    );
}

#[test]
fn lambda_source_body_survives_byte_exact() {
    let source = "(lambda (event) (monitor-click event (current-node-id)))";
    let mut enc = CanonicalEncoder::new();
    enc.encode_lambda(source.as_bytes());
    let bytes = enc.finalize();

    let (decoded, _) = decode_value(&bytes, 0).unwrap();
    assert_eq!(decoded, SExpr::Lambda(source.as_bytes().to_vec()));
}

#[test]
fn seed_transform_round_trips() {
    let transform = SeedTransform {
        features: vec![vec![1, 2, 3], vec![], vec![0xFF; 32]],
        transform_matrix: vec![0.0, -1.5, f32::MAX, f32::MIN_POSITIVE],
        consensus_threshold: 0.618,
    };

    let mut enc = CanonicalEncoder::new();
    enc.encode_seed_transform(&transform);
    let bytes = enc.finalize();
    assert_eq!(bytes[0], SExprTag::SeedTransform as u8);

    let (decoded, consumed) = decode_value(&bytes, 0).unwrap();
    assert_eq!(consumed, bytes.len());
    assert_eq!(decoded, SExpr::SeedTransform(transform));
}

#[test]
fn model_weights_composite_round_trips() {
    let record = ModelWeights {
        id: "model-α".into(),
        weights: (0u8..=255).collect(),
        seed_transform: SeedTransform {
            features: vec![b"feature-one".to_vec(), b"feature-two".to_vec()],
            transform_matrix: vec![1.0; 16],
            consensus_threshold: 0.75,
        },
        signature: SignatureRecord {
            id: "UBHP_100.00000000_0.50000000_0.25000000_256".into(),
            length: 256,
            sin: 0.5,
            cos: 0.25,
            tan: -3.0,
            h: 100.0,
            buffer: vec![7; 256],
        },
    };

    let mut enc = CanonicalEncoder::new();
    enc.encode_model_weights(&record);
    let bytes = enc.finalize();
    assert_eq!(bytes[0], SExprTag::ModelWeights as u8);

    let (decoded, consumed) = decode_value(&bytes, 0).unwrap();
    assert_eq!(consumed, bytes.len());
    assert_eq!(decoded, SExpr::ModelWeights(record));
}

#[test]
fn truncating_a_composite_anywhere_yields_typed_errors() {
    let record = ModelWeights {
        id: "m".into(),
        weights: vec![9; 40],
        seed_transform: SeedTransform {
            features: vec![vec![1]],
            transform_matrix: vec![0.5; 4],
            consensus_threshold: 1.0,
        },
        signature: SignatureRecord {
            id: "sig".into(),
            length: 40,
            sin: 0.0,
            cos: 1.0,
            tan: 0.1,
            h: 56.9,
            buffer: vec![9; 40],
        },
    };
    let mut enc = CanonicalEncoder::new();
    enc.encode_model_weights(&record);
    let bytes = enc.finalize();

    // Every proper prefix must fail cleanly, never panic.
    for cut in 0..bytes.len() {
        let result = decode_value(&bytes[..cut], 0);
        assert!(result.is_err(), "prefix of {cut} bytes decoded successfully");
    }
}

#[test]
fn every_value_variant_round_trips_through_encode_value() {
    let values = vec![
        SExpr::Null,
        SExpr::Bool(true),
        SExpr::Int32(-7),
        SExpr::Int64(1 << 40),
        SExpr::Float32(2.5),
        SExpr::Float64(1.0 / 3.0),
        SExpr::String("Unicode: 日本語 λ".into()),
        SExpr::Symbol("define-topic".into()),
        SExpr::List(vec![SExpr::Symbol("pair".into()), SExpr::Int32(2)]),
        SExpr::Lambda(b"(lambda (x) x)".to_vec()),
        SExpr::Reference(vec![0xAB; 20]),
    ];

    let mut enc = CanonicalEncoder::new();
    for value in &values {
        enc.encode_value(value);
    }
    let bytes = enc.finalize();

    let mut pos = 0;
    let mut decoded = Vec::new();
    while pos < bytes.len() {
        let (value, consumed) = decode_value(&bytes, pos).unwrap();
        decoded.push(value);
        pos += consumed;
    }
    assert_eq!(decoded, values);
}
