//! End-to-end properties of phoneme assembly and WAV output.

use formantic_backend::rng::create_rng;
use formantic_backend::wav::extract_pcm_data;
use formantic_backend::{
    assemble, generate, generate_batch, SegmentKind, SegmentTiming, SpeechAssembler,
};
use formantic_spec::{FormantTable, Normalization, SynthesisRequest};
use pretty_assertions::assert_eq;

const TABLE_CSV: &str = "\
Phoneme,F1_Mean,F1_Std,F1_BW,F2_Mean,F2_Std,F2_BW,F3_Mean,F3_Std,F3_BW,BW_Std
a,700,0,80,1200,0,80,2600,0,80,0
i,300,12,60,2300,25,70,3000,30,80,5
u,300,10,70,870,20,80,2250,30,90,5
";

fn table() -> FormantTable {
    FormantTable::from_csv_str(TABLE_CSV).unwrap()
}

// ============================================================================
// Assembly
// ============================================================================

#[test]
fn test_single_vowel_example() {
    let buffer = assemble(&["a"], 0.1, 0.05, 16000, &table(), &mut create_rng(0)).unwrap();
    assert_eq!(buffer.len(), 1600);
    assert_eq!(buffer.samples()[0], 0.0);
}

#[test]
fn test_unknown_trailing_phoneme_example() {
    let table = table();
    let assembler = SpeechAssembler::new(&table, SegmentTiming::default()).unwrap();
    let assembly = assembler.assemble(&["a", "z"], &mut create_rng(0)).unwrap();

    assert_eq!(assembly.buffer.len(), 3200);
    assert_eq!(assembly.counts().transitions, 0);
    assert!(assembly.buffer.samples()[1600..].iter().all(|&s| s == 0.0));
}

#[test]
fn test_total_length_is_sum_of_segments() {
    let table = table();
    let cases: &[(&[&str], usize)] = &[
        (&[], 0),
        (&["i"], 1600),
        (&["i", "u"], 1600 + 800 + 1600),
        (&["i", "x", "u"], 3 * 1600),
        (&["x", "y"], 2 * 1600),
        (&["a", "i", "u", "a"], 4 * 1600 + 3 * 800),
        (&["a", "a", "#", "u", "u"], 5 * 1600 + 2 * 800),
    ];

    for (phonemes, expected) in cases {
        let mut rng = create_rng(1);
        let buffer = assemble(*phonemes, 0.1, 0.05, 16000, &table, &mut rng).unwrap();
        assert_eq!(buffer.len(), *expected, "phonemes {:?}", phonemes);
    }
}

#[test]
fn test_transition_lengths_follow_timing() {
    let table = table();
    let timing = SegmentTiming::new(0.2, 0.04, 22050);
    let assembly = SpeechAssembler::new(&table, timing)
        .unwrap()
        .assemble(&["i", "u"], &mut create_rng(4))
        .unwrap();

    let lengths: Vec<usize> = assembly.segments.iter().map(|s| s.len).collect();
    assert_eq!(lengths, vec![4410, 882, 4410]);
    assert!(matches!(
        &assembly.segments[1].kind,
        SegmentKind::Transition { from, to } if from == "i" && to == "u"
    ));
}

#[test]
fn test_same_seed_is_bit_identical() {
    let table = table();
    let phonemes = ["i", "u", "i", "?", "u"];
    let a = assemble(&phonemes, 0.1, 0.05, 16000, &table, &mut create_rng(77)).unwrap();
    let b = assemble(&phonemes, 0.1, 0.05, 16000, &table, &mut create_rng(77)).unwrap();

    let bits = |s: &[f64]| s.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(a.samples()), bits(b.samples()));

    let c = assemble(&phonemes, 0.1, 0.05, 16000, &table, &mut create_rng(78)).unwrap();
    assert_ne!(a, c);
}

// ============================================================================
// Requests and WAV output
// ============================================================================

#[test]
fn test_wav_reads_back_with_hound() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aiu.wav");

    let request = SynthesisRequest::from_phoneme_text("a, i, u").with_seed(3);
    let result = generate(&request, &table()).unwrap();
    result.wav.write_to(&path).unwrap();

    let mut reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 16000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples.len(), 3 * 1600 + 2 * 800);
    assert_eq!(samples.len(), result.wav.num_samples);
    assert_eq!(samples[0], 0);
    assert!(samples.iter().all(|&s| s != i16::MIN));
}

#[test]
fn test_peak_normalized_output_reaches_full_scale() {
    let request = SynthesisRequest::from_phoneme_text("a").with_normalization(Normalization::Peak);
    let result = generate(&request, &table()).unwrap();
    assert!(result.peak > 1.0);

    let pcm = extract_pcm_data(&result.wav.wav_data).unwrap();
    let max = pcm
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]).unsigned_abs())
        .max()
        .unwrap();
    assert_eq!(max, 32767);
}

#[test]
fn test_quiet_output_is_not_amplified() {
    // all unknown: pure silence stays silence
    let request = SynthesisRequest::from_phoneme_text("x y z");
    let result = generate(&request, &table()).unwrap();
    assert_eq!(result.peak, 0.0);

    let pcm = extract_pcm_data(&result.wav.wav_data).unwrap();
    assert!(pcm.iter().all(|&b| b == 0));
}

#[test]
fn test_batch_equals_sequential() {
    let table = table();
    let requests: Vec<SynthesisRequest> = ["a i", "u", "i x u", "", "a a a"]
        .iter()
        .enumerate()
        .map(|(seed, text)| SynthesisRequest::from_phoneme_text(text).with_seed(seed as u32))
        .collect();

    let batch = generate_batch(&requests, &table);
    assert_eq!(batch.len(), requests.len());
    for (request, result) in requests.iter().zip(batch) {
        assert_eq!(result.unwrap(), generate(request, &table).unwrap());
    }
}
