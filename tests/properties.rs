use affine_quantizer::arrays::{max_abs_error, mean_squared_error};
use affine_quantizer::{quantize, QuantizationError, QuantizerConfig, RoundingPolicy};
use ndarray::Array1;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn non_constant(values: &[f64]) -> bool {
    values.iter().any(|&v| v != values[0])
}

// Property 1: codes always lie in [-2^(nbits-1), 2^(nbits-1) - 1]
proptest! {
    #[test]
    fn prop_codes_within_bit_width(
        values in prop::collection::vec(-1000.0f64..1000.0, 2..200),
        nbits in 2u32..=16,
        block_exponent in any::<bool>(),
        symmetric in any::<bool>(),
    ) {
        prop_assume!(non_constant(&values));
        let x = Array1::from(values);
        let config = QuantizerConfig { nbits, block_exponent, symmetric };
        let result = quantize(&x, &config, RoundingPolicy::Deterministic);
        prop_assume!(!matches!(result, Err(QuantizationError::ZeroPointOverflow { .. })));
        let quantized = result.unwrap();

        // the bounds must come from the rounding offset, not from the clamp
        prop_assert_eq!(quantized.saturated, 0);
        let (lo, hi) = (-(1i32 << (nbits - 1)), (1i32 << (nbits - 1)) - 1);
        for &q in quantized.codes.iter() {
            prop_assert!(q >= lo && q <= hi, "code {} outside [{}, {}]", q, lo, hi);
        }
    }
}

// Property 2: deterministic reconstruction error is at most half a step
proptest! {
    #[test]
    fn prop_reconstruction_error_bounded(
        values in prop::collection::vec(-50.0f64..50.0, 2..100),
        nbits in 2u32..=16,
        block_exponent in any::<bool>(),
        symmetric in any::<bool>(),
    ) {
        prop_assume!(non_constant(&values));
        let x = Array1::from(values);
        let config = QuantizerConfig { nbits, block_exponent, symmetric };
        let result = quantize(&x, &config, RoundingPolicy::Deterministic);
        prop_assume!(!matches!(result, Err(QuantizationError::ZeroPointOverflow { .. })));
        let quantized = result.unwrap();

        let bound = quantized.quantizer.max_error();
        let restored = quantized.dequantize();
        let err = max_abs_error(&x, &restored);
        prop_assert!(err <= bound * (1.0 + 1e-9) + 1e-12, "error {} exceeds {}", err, bound);
        prop_assert!(mean_squared_error(&x, &restored) <= (bound * (1.0 + 1e-9) + 1e-12).powi(2));
    }
}

// Property 3: symmetric ranges have a zero point of 0, block exponents an integer log2 scale
proptest! {
    #[test]
    fn prop_policy_shapes_transform(
        values in prop::collection::vec(-10.0f64..10.0, 2..50),
        nbits in 2u32..=12,
    ) {
        prop_assume!(values.iter().any(|&v| v != 0.0));
        let x = Array1::from(values);

        let config = QuantizerConfig::default().with_nbits(nbits).with_symmetric(true);
        let quantized = quantize(&x, &config, RoundingPolicy::Deterministic).unwrap();
        prop_assert_eq!(quantized.zero_point(), 0);

        let config = config.with_block_exponent(true);
        let quantized = quantize(&x, &config, RoundingPolicy::Deterministic).unwrap();
        prop_assert_eq!(quantized.zero_point(), 0);
        prop_assert!(quantized.quantizer.block_shift().is_some());
    }
}

// Property 4: stochastic codes stay within one code of the scaled value
proptest! {
    #[test]
    fn prop_stochastic_codes_are_neighbours(
        values in prop::collection::vec(-5.0f64..5.0, 2..100),
        seed in any::<u64>(),
    ) {
        prop_assume!(non_constant(&values));
        let x = Array1::from(values);
        let config = QuantizerConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let quantized = quantize(&x, &config, RoundingPolicy::Stochastic(&mut rng)).unwrap();

        let q = quantized.quantizer;
        for (&v, &code) in x.iter().zip(quantized.codes.iter()) {
            let scaled = q.scale * v + q.zero as f64;
            prop_assert!((code as f64 - scaled).abs() <= 1.0);
            prop_assert!(code >= q.q_min() && code <= q.q_max());
        }
    }
}

// Property 5: constant inputs are rejected in asymmetric mode
proptest! {
    #[test]
    fn prop_constant_input_is_degenerate(value in -100.0f64..100.0, len in 1usize..20) {
        let x = Array1::from_elem(len, value);
        let result = quantize(&x, &QuantizerConfig::default(), RoundingPolicy::Deterministic);
        prop_assert_eq!(result, Err(QuantizationError::DegenerateRange { min: value, max: value }));
    }
}
