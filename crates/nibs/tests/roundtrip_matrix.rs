//! Randomized and structural round-trip coverage for the binary codec.

use nibs::head::{head_size, read_head, write_head, zigzag_decode, zigzag_encode};
use nibs::{decode, encode, skip, Decoded, Value};
use nibs_buffers::Writer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn head_roundtrip_random_sweep() {
    let mut rng = StdRng::seed_from_u64(0x6e696273);
    let mut writer = Writer::new();
    for _ in 0..10_000 {
        let tag: u8 = rng.gen_range(0..16);
        // Bias across every width class.
        let big: u64 = match rng.gen_range(0..5) {
            0 => rng.gen_range(0..12),
            1 => rng.gen_range(12..0x100),
            2 => rng.gen_range(0x100..0x1_0000),
            3 => rng.gen_range(0x1_0000..0x1_0000_0000),
            _ => rng.gen(),
        };
        write_head(&mut writer, tag, big);
        let bytes = writer.flush();
        assert_eq!(bytes.len(), head_size(big));
        let (len, t, b) = read_head(&bytes, 0).expect("read back");
        assert_eq!((len, t, b), (bytes.len(), tag, big));
    }
}

#[test]
fn zigzag_roundtrip_random_sweep() {
    let mut rng = StdRng::seed_from_u64(0x74696273);
    for _ in 0..10_000 {
        let n: i64 = rng.gen();
        assert_eq!(zigzag_decode(zigzag_encode(n)), n);
        let magnitude = if n >= 0 {
            2 * (n as u128)
        } else {
            2 * (n.unsigned_abs() as u128) - 1
        };
        assert_eq!(zigzag_encode(n) as u128, magnitude);
    }
}

#[test]
fn value_roundtrip_matrix() {
    let values = vec![
        Value::Null,
        Value::Bool(true),
        Value::Bool(false),
        Value::Int(0),
        Value::Int(i64::MIN),
        Value::Int(i64::MAX),
        Value::BigInt(-42),
        Value::Float(0.0),
        Value::Float(-0.0),
        Value::Float(f64::INFINITY),
        Value::Float(1.5e-300),
        Value::Str(String::new()),
        Value::Str("日本語".into()),
        Value::Bytes(vec![]),
        Value::Bytes((0u8..=255).collect()),
        Value::Ref(0),
        Value::Ref(u64::MAX),
        Value::List(vec![]),
        Value::Map(vec![]),
        Value::List(vec![
            Value::Str("nested".into()),
            Value::List(vec![Value::Map(vec![(
                Value::Int(1),
                Value::Bytes(vec![9]),
            )])]),
        ]),
        Value::Map(vec![
            (Value::Null, Value::Int(1)),
            (Value::Bool(false), Value::Int(2)),
            (Value::Bytes(vec![7]), Value::Int(3)),
        ]),
    ];
    for value in &values {
        let bytes = encode(value).expect("encode");
        let (decoded, consumed) = decode(&bytes).expect("decode");
        assert_eq!(consumed, bytes.len(), "consumed for {value}");
        assert_eq!(&decoded.to_value().expect("materialize"), value);
    }
}

#[test]
fn bigint_roundtrip_loses_wideness_but_not_value() {
    // BigInt(-42) fits i64, so it comes back as Int(-42); equality is
    // numeric across the split.
    let bytes = encode(&Value::BigInt(-42)).expect("encode");
    let (decoded, _) = decode(&bytes).expect("decode");
    assert_eq!(decoded, Decoded::Int(-42));
    assert_eq!(decoded.to_value().unwrap(), Value::BigInt(-42));
}

#[test]
fn nan_bit_pattern_survives() {
    let patterns = [
        0x7ff8_0000_0000_0000u64, // quiet NaN
        0x7ff8_dead_beef_0001,    // payload-carrying NaN
        0xfff8_0000_0000_0000,    // negative NaN
    ];
    for bits in patterns {
        let bytes = encode(&Value::Float(f64::from_bits(bits))).expect("encode");
        let (decoded, _) = decode(&bytes).expect("decode");
        let Decoded::Float(f) = decoded else {
            panic!("expected float");
        };
        assert_eq!(f.to_bits(), bits);
    }
}

#[test]
fn skip_advances_exactly_the_reencoded_length() {
    let values = [
        Value::Int(77),
        Value::Float(2.5),
        Value::Str("some longer string to cross a head width".into()),
        Value::Bytes(vec![0; 300]),
        Value::List(vec![Value::Int(1), Value::Str("x".into())]),
        Value::Map(vec![(Value::Str("k".into()), Value::List(vec![]))]),
    ];
    // Concatenate everything into one buffer and skip across it.
    let mut data = Vec::new();
    let mut boundaries = vec![0usize];
    for value in &values {
        data.extend(encode(value).expect("encode"));
        boundaries.push(data.len());
    }
    let mut offset = 0;
    for (i, value) in values.iter().enumerate() {
        let (decoded, consumed) = nibs::decode_at(&data, offset).expect("decode");
        let reencoded = encode(&decoded.to_value().expect("materialize")).expect("re-encode");
        assert_eq!(consumed, reencoded.len());
        offset = skip(&data, offset).expect("skip");
        assert_eq!(offset, boundaries[i + 1], "boundary after {value}");
    }
    assert_eq!(offset, data.len());
}

#[test]
fn lazy_iteration_matches_repeated_get() {
    let value = Value::List(vec![
        Value::Int(10),
        Value::Str("mid".into()),
        Value::List(vec![Value::Int(1)]),
        Value::Null,
    ]);
    let bytes = encode(&value).expect("encode");
    let (decoded, _) = decode(&bytes).expect("decode");
    let Decoded::Tuple(tuple) = decoded else {
        panic!("expected tuple");
    };
    let via_iter: Vec<_> = tuple
        .iter()
        .collect::<Result<Vec<_>, _>>()
        .expect("iterate");
    let len = tuple.len().expect("len");
    assert_eq!(via_iter.len(), len);
    for (index, item) in &via_iter {
        assert_eq!(tuple.get(*index).expect("get"), Some(*item));
    }
}

#[test]
fn lazy_map_iteration_preserves_encoded_pair_order() {
    let value = Value::Map(vec![
        (Value::Str("z".into()), Value::Int(1)),
        (Value::Str("a".into()), Value::Int(2)),
        (Value::Int(5), Value::Int(3)),
    ]);
    let bytes = encode(&value).expect("encode");
    let (decoded, _) = decode(&bytes).expect("decode");
    let Decoded::Map(map) = decoded else {
        panic!("expected map");
    };
    let keys: Vec<Value> = map
        .iter()
        .map(|pair| pair.map(|(k, _)| k.to_value().unwrap()))
        .collect::<Result<_, _>>()
        .expect("iterate");
    assert_eq!(
        keys,
        vec![
            Value::Str("z".into()),
            Value::Str("a".into()),
            Value::Int(5),
        ]
    );
    assert_eq!(map.len().expect("len"), 3);
    assert_eq!(
        map.get(&Value::Int(5)).expect("get"),
        Some(Decoded::Int(3))
    );
}

#[test]
fn error_offsets_point_into_the_malformed_region() {
    // A tuple whose body length reaches past the end of the buffer.
    let data = [0xac, 0x0c];
    let err = decode(&data).unwrap_err();
    assert_eq!(
        err,
        nibs::DecodeError::TruncatedBody {
            offset: 2,
            need: 12,
            have: 0,
        }
    );

    // A valid list containing an unknown tag in its body.
    let data = [0xa1, 0x60];
    let (decoded, _) = decode(&data).expect("outer decode is lazy");
    let Decoded::Tuple(tuple) = decoded else {
        panic!("expected tuple");
    };
    let err = tuple.iter().next().unwrap().unwrap_err();
    assert_eq!(err, nibs::DecodeError::UnknownTag { tag: 6, offset: 1 });
}
