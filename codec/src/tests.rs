use super::*;
use num_traits::{One, Zero};
use proptest::prelude::*;

fn big(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_le(bytes)
}

#[test]
fn test_to_limbs_small_value() {
    let limbs = to_limbs(&BigUint::from(1234u32), 64, 4).expect("encode");
    let expected: Vec<BigUint> = vec![1234u32.into(), 0u32.into(), 0u32.into(), 0u32.into()];
    assert_eq!(limbs.as_slice(), expected.as_slice());
    assert_eq!(limbs.stride(), 64);
}

#[test]
fn test_to_limbs_splits_across_limbs() {
    // 0x0003_0000_0000_0000_0002_0000_0000_0000_0001
    let x = BigUint::from(3u32) << 128 | BigUint::from(2u32) << 64 | BigUint::one();
    let limbs = to_limbs(&x, 64, 4).expect("encode");
    let expected: Vec<BigUint> = vec![1u32.into(), 2u32.into(), 3u32.into(), 0u32.into()];
    assert_eq!(limbs.into_vec(), expected);
}

#[test]
fn test_to_limbs_rejects_overflow() {
    let x = BigUint::one() << 256;
    assert_eq!(
        to_limbs(&x, 64, 4),
        Err(CodecError::Overflow {
            bits: 257,
            width: 256
        })
    );
}

#[test]
fn test_to_limbs_max_value_fits() {
    let x = (BigUint::one() << 256) - 1u32;
    let limbs = to_limbs(&x, 64, 4).expect("encode");
    assert_eq!(limbs.value(), x);
}

#[test]
fn test_zero_stride_is_invalid() {
    assert!(matches!(
        to_limbs(&BigUint::one(), 0, 4),
        Err(CodecError::InvalidArgument(_))
    ));
    assert!(matches!(
        from_limbs(&[BigUint::one()], 0),
        Err(CodecError::InvalidArgument(_))
    ));
    assert!(matches!(
        restride(&BigUint::one(), 0, 64),
        Err(CodecError::InvalidArgument(_))
    ));
    assert!(matches!(
        restride(&BigUint::one(), 8, 0),
        Err(CodecError::InvalidArgument(_))
    ));
}

#[test]
fn test_from_limbs_rejects_wide_limb() {
    let limbs = [BigUint::from(256u32), BigUint::zero()];
    assert_eq!(
        from_limbs(&limbs, 8),
        Err(CodecError::Overflow { bits: 9, width: 8 })
    );
}

#[test]
fn test_layout_decode_checks_count() {
    let layout = LimbLayout::U64X4;
    let three = vec![BigUint::one(); 3];
    assert!(layout.decode(&three).is_err());
    assert_eq!(layout.width_bits(), 256);
}

#[test]
fn test_to_bytes_be_pads_to_length() {
    let bytes = to_bytes_be(&BigUint::from(0x0102u32), 4).expect("encode");
    assert_eq!(bytes, vec![0, 0, 1, 2]);
    assert_eq!(to_bytes_be(&BigUint::zero(), 2).expect("encode"), vec![0, 0]);
}

#[test]
fn test_to_bytes_be_rejects_overflow_and_zero_length() {
    assert_eq!(
        to_bytes_be(&BigUint::from(256u32), 1),
        Err(CodecError::Overflow { bits: 9, width: 8 })
    );
    assert!(matches!(
        to_bytes_be(&BigUint::zero(), 0),
        Err(CodecError::InvalidArgument(_))
    ));
}

#[test]
fn test_to_bytes32_matches_message_hash_encoding() {
    let bytes = to_bytes32(&BigUint::from(1234u32)).expect("encode");
    assert_eq!(bytes[30], 0x04);
    assert_eq!(bytes[31], 0xd2);
    assert!(bytes[..30].iter().all(|b| *b == 0));
}

#[test]
fn test_from_bytes_be_empty_is_zero() {
    assert_eq!(from_bytes_be(&[]), BigUint::zero());
}

#[test]
fn test_restride_example() {
    let x = BigUint::from(0x0102u32);
    let expected = BigUint::from(2u32) + (BigUint::one() << 64);
    assert_eq!(restride(&x, 8, 64).expect("restride"), expected);
}

#[test]
fn test_decompose_stops_at_zero() {
    assert!(decompose(&BigUint::zero(), 8).expect("decompose").is_empty());
    let digits = decompose(&BigUint::from(0x0102u32), 8).expect("decompose");
    assert_eq!(digits, vec![BigUint::from(2u32), BigUint::from(1u32)]);
}

#[test]
fn test_restride_uneven_stride() {
    // 0b1_0110_1011 in 3-bit digits is [0b011, 0b101, 0b101]
    let x = BigUint::from(0b1_0110_1011u32);
    let digits = decompose(&x, 3).expect("decompose");
    assert_eq!(
        digits,
        vec![BigUint::from(3u32), BigUint::from(5u32), BigUint::from(5u32)]
    );
    let wide = recompose(&digits, 4).expect("recompose");
    assert_eq!(wide, BigUint::from(0x553u32));
}

#[test]
fn test_limbs_deserialize_checks_limb_bound() {
    let ok = serde_json::json!({ "stride": 8, "limbs": [BigUint::from(255u32), BigUint::from(1u32)] });
    let limbs: Limbs = serde_json::from_value(ok).expect("in range");
    assert_eq!(limbs.value(), BigUint::from(511u32));

    let wide = serde_json::json!({ "stride": 8, "limbs": [BigUint::from(256u32), BigUint::from(1u32)] });
    assert!(serde_json::from_value::<Limbs>(wide).is_err());

    let zero_stride = serde_json::json!({ "stride": 0, "limbs": [] });
    assert!(serde_json::from_value::<Limbs>(zero_stride).is_err());
}

proptest! {
    #[test]
    fn prop_limb_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..48), stride in 1u32..=80, extra in 0usize..3) {
        let x = big(&bytes);
        let count = (x.bits() as usize).div_ceil(stride as usize) + extra;
        let limbs = to_limbs(&x, stride, count).expect("value fits by construction");
        prop_assert_eq!(limbs.len(), count);
        prop_assert!(limbs.iter().all(|l| l.bits() <= u64::from(stride)));
        prop_assert_eq!(from_limbs(limbs.as_slice(), stride).expect("decode"), x);
    }

    #[test]
    fn prop_limb_overflow_detected(bytes in proptest::collection::vec(any::<u8>(), 1..48), stride in 1u32..=64) {
        let x = big(&bytes);
        prop_assume!(x.bits() > u64::from(stride));
        let count = (x.bits() as usize - 1) / stride as usize;
        let is_overflow = matches!(to_limbs(&x, stride, count), Err(CodecError::Overflow { .. }));
        prop_assert!(is_overflow);
    }

    #[test]
    fn prop_bytes_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..48), pad in 0usize..4) {
        let x = big(&bytes);
        let len = (x.bits() as usize).div_ceil(8).max(1) + pad;
        let encoded = to_bytes_be(&x, len).expect("value fits by construction");
        prop_assert_eq!(encoded.len(), len);
        prop_assert_eq!(from_bytes_be(&encoded), x);
    }

    #[test]
    fn prop_restride_same_stride_is_identity(bytes in proptest::collection::vec(any::<u8>(), 0..48), stride in 1u32..=70) {
        let x = big(&bytes);
        prop_assert_eq!(restride(&x, stride, stride).expect("restride"), x);
    }

    #[test]
    fn prop_restride_preserves_digits(bytes in proptest::collection::vec(any::<u8>(), 0..32), small in 1u32..=16, grow in 0u32..=48) {
        let x = big(&bytes);
        let target = small + grow;
        let wide = restride(&x, small, target).expect("restride");
        prop_assert_eq!(decompose(&wide, target).expect("decompose"), decompose(&x, small).expect("decompose"));
    }
}
