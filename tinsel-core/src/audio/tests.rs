use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rstest::rstest;

use crate::audio::chime::{chime_len, chime_samples};
use crate::audio::decode::{decode_pcm16_base64, pcm16_to_f32};
use crate::audio::SPEECH_SAMPLE_RATE;

fn encode_samples(samples: &[i16]) -> String {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    STANDARD.encode(bytes)
}

#[test]
fn decode_produces_one_sample_per_byte_pair() {
    let payload = encode_samples(&[0, 1, -1, i16::MAX, i16::MIN, 12_345]);
    let samples = decode_pcm16_base64(&payload).unwrap();
    assert_eq!(samples.len(), 6);
}

#[rstest]
#[case(0, 0.0)]
#[case(16_384, 0.5)]
#[case(-16_384, -0.5)]
#[case(i16::MIN, -1.0)]
#[case(i16::MAX, 32_767.0 / 32_768.0)]
fn decode_normalizes_by_dividing_by_32768(#[case] raw: i16, #[case] expected: f32) {
    let samples = decode_pcm16_base64(&encode_samples(&[raw])).unwrap();
    assert_eq!(samples, vec![expected]);
}

#[test]
fn decoded_samples_stay_in_unit_range() {
    let all: Vec<i16> = vec![i16::MIN, -1, 0, 1, i16::MAX, 30_000, -30_000];
    let samples = decode_pcm16_base64(&encode_samples(&all)).unwrap();
    for sample in samples {
        assert!((-1.0..=1.0).contains(&sample), "sample {sample} out of range");
    }
}

#[test]
fn little_endian_byte_order_is_used() {
    // 0x0102 little-endian is [0x02, 0x01]
    let samples = pcm16_to_f32(&[0x02, 0x01]);
    assert_eq!(samples, vec![0x0102 as f32 / 32768.0]);
}

#[test]
fn empty_payload_decodes_to_no_samples() {
    assert!(decode_pcm16_base64("").unwrap().is_empty());
}

#[test]
fn trailing_odd_byte_is_ignored() {
    let payload = STANDARD.encode([0x00u8, 0x40, 0x7f]);
    let samples = decode_pcm16_base64(&payload).unwrap();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0], 0.5);
}

#[test]
fn invalid_base64_is_an_error_not_a_panic() {
    assert!(decode_pcm16_base64("not base64!!!").is_err());
}

#[test]
fn chime_has_fixed_duration_at_speech_rate() {
    let samples = chime_samples();
    assert_eq!(samples.len(), chime_len());
    assert_eq!(samples.len(), (0.4 * SPEECH_SAMPLE_RATE as f32) as usize);
}

#[test]
fn chime_stays_in_unit_range_and_decays() {
    let samples = chime_samples();
    let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    assert!(peak <= 1.0);
    assert!(peak > 0.1, "chime should be audible, peak was {peak}");

    // The exponential gain ramp should leave the tail nearly silent.
    let tail_start = samples.len() * 95 / 100;
    let tail_peak = samples[tail_start..]
        .iter()
        .fold(0.0f32, |m, s| m.max(s.abs()));
    assert!(
        tail_peak < peak * 0.01,
        "tail peak {tail_peak} not decayed relative to {peak}"
    );
}
