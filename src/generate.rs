//! Candidate generation: configuration, validation and the length-range
//! drive loop.
//!
//! [`Generator`] ties the pieces together: it expands custom charsets,
//! compiles the mask, validates option conflicts and resume boundaries up
//! front, then drives the odometer across the configured length range,
//! applying the pruning filters and pushing every accepted candidate into
//! a [`Sink`].

use log::debug;

use crate::charset::{expand_user_charset, Builtins, Charset};
use crate::cli::Args;
use crate::error::MaskError;
use crate::filter::{OccurrenceFilter, SequenceFilter};
use crate::mask::Mask;
use crate::odometer::Odometer;
use crate::output::Sink;
use crate::progress::GenStats;

/// Everything a generation run needs, before compilation.
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// The raw mask string.
    pub mask: Vec<u8>,
    /// Custom charset expressions for `?1`-`?4`.
    pub custom_charsets: [Option<Vec<u8>>; 4],
    /// Interpret charset and mask literals as 2-digit hex pairs.
    pub hex_charset: bool,
    /// Candidate length range; `None` means the full mask length.
    pub increment: Option<(usize, usize)>,
    /// First candidate to emit (resume position).
    pub start_at: Option<Vec<u8>>,
    /// Last candidate to emit; the run halts after it.
    pub stop_at: Option<Vec<u8>>,
    /// Maximum run of identical adjacent characters; 0 disables.
    pub seq_max: usize,
    /// Maximum occurrences of any single character; 0 disables.
    pub occur_max: u32,
    /// Count combinations instead of enumerating.
    pub combinations: bool,
}

impl GeneratorConfig {
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        Ok(Self {
            mask: args.mask.clone().into_bytes(),
            custom_charsets: args.custom_charsets(),
            hex_charset: args.hex_charset,
            increment: args.parse_increment()?,
            start_at: args.start_at.clone().map(String::into_bytes),
            stop_at: args.stop_at.clone().map(String::into_bytes),
            seq_max: args.seq_max,
            occur_max: args.occur_max,
            combinations: args.combinations,
        })
    }

    fn check_conflicts(&self) -> Result<(), MaskError> {
        let pruning = [
            ("--seq-max", self.seq_max != 0),
            ("--occurrence-max", self.occur_max != 0),
        ];

        if self.seq_max == 1 {
            return Err(MaskError::ThresholdTooLow("--seq-max"));
        }
        if self.occur_max == 1 {
            return Err(MaskError::ThresholdTooLow("--occurrence-max"));
        }

        for (left, active) in pruning {
            if !active {
                continue;
            }
            if self.start_at.is_some() {
                return Err(MaskError::ConflictingOptions {
                    left,
                    right: "--start-at",
                });
            }
            if self.stop_at.is_some() {
                return Err(MaskError::ConflictingOptions {
                    left,
                    right: "--stop-at",
                });
            }
            if self.combinations {
                return Err(MaskError::ConflictingOptions {
                    left,
                    right: "--combinations",
                });
            }
        }

        Ok(())
    }
}

/// A validated, compiled generation run.
#[derive(Debug)]
pub struct Generator {
    mask: Mask,
    min_len: usize,
    max_len: usize,
    start_at: Option<Vec<u8>>,
    stop_at: Option<Vec<u8>>,
    seq: Option<SequenceFilter>,
    occur: Option<OccurrenceFilter>,
    stats: GenStats,
}

impl Generator {
    /// Compile and validate a run. All fatal input errors surface here,
    /// before any candidate is produced.
    pub fn new(config: GeneratorConfig) -> Result<Self, MaskError> {
        config.check_conflicts()?;

        let builtins = Builtins::new();

        let mut custom: [Option<Charset>; 4] = [None, None, None, None];
        for (i, expr) in config.custom_charsets.iter().enumerate() {
            if let Some(expr) = expr {
                custom[i] = Some(expand_user_charset(
                    i + 1,
                    expr,
                    config.hex_charset,
                    &builtins,
                )?);
            }
        }

        let mask = Mask::compile(&config.mask, config.hex_charset, &builtins, &custom)?;
        let slot_count = mask.slot_count();

        // both range ends clamp to the mask length; a zero start clamps
        // up to 1 (an empty range then enumerates nothing)
        let (min_len, max_len) = match config.increment {
            Some((min, max)) => (min.max(1).min(slot_count), max.min(slot_count)),
            None => (slot_count, slot_count),
        };

        if let Some(start) = &config.start_at {
            validate_boundary("start-at", start, &mask)?;
        }
        if let Some(stop) = &config.stop_at {
            validate_boundary("stop-at", stop, &mask)?;
        }

        debug!(
            "compiled mask '{}' to {} positions, lengths {}..={}",
            mask.source(),
            slot_count,
            min_len,
            max_len
        );

        Ok(Self {
            mask,
            min_len,
            max_len,
            start_at: config.start_at,
            stop_at: config.stop_at,
            seq: (config.seq_max >= 2).then(|| SequenceFilter::new(config.seq_max)),
            occur: (config.occur_max >= 2).then(|| OccurrenceFilter::new(config.occur_max)),
            stats: GenStats::new(),
        })
    }

    /// Total candidate count over the configured length range, ignoring
    /// filters. Wraps silently on overflow.
    pub fn combinations(&self) -> u64 {
        self.mask.combinations_range(self.min_len, self.max_len)
    }

    pub fn stats(&self) -> &GenStats {
        &self.stats
    }

    /// Enumerate every candidate in order, pushing accepted ones into the
    /// sink. Consumes the start-at/stop-at boundaries: a second call
    /// replays the full unresumed range.
    pub fn run<S: Sink>(&mut self, sink: &mut S) -> anyhow::Result<()> {
        let mut odo = Odometer::new(&self.mask);
        // start-at applies only to the first length of the range
        let mut start_at = self.start_at.take();
        let mut stop_at = self.stop_at.take();

        'lengths: for len in self.min_len..=self.max_len {
            debug!("enumerating length {}", len);

            if let Some(start) = start_at.take() {
                odo.seek(len, &start).map_err(|i| MaskError::CharNotFound {
                    option: "start-at",
                    ch: start[i] as char,
                    position: i + 1,
                    value: start.clone().into(),
                })?;

                sink.push(odo.word())?;
                self.stats.emitted += 1;

                if let Some(stop) = &stop_at {
                    if odo.word() == &stop[..len] {
                        break 'lengths;
                    }
                }
            } else {
                odo.reset(len);
            }

            while let Some(changed) = odo.advance() {
                if let Some(seq) = &self.seq {
                    if let Some(run_end) = seq.find_run(odo.word(), changed) {
                        odo.force_exhausted(run_end + 1);
                        self.stats.rejected_seq += 1;
                        continue;
                    }
                }

                if let Some(occur) = &self.occur {
                    if !occur.accepts(odo.word(), odo.occurs()) {
                        self.stats.rejected_occur += 1;
                        continue;
                    }
                }

                sink.push(odo.word())?;
                self.stats.emitted += 1;

                if let Some(stop) = &stop_at {
                    let word = odo.word();
                    // cheap tail compare first, full compare on a tail hit
                    if word[changed..] == stop[changed..len] && word == &stop[..len] {
                        break 'lengths;
                    }
                }
            }

            sink.flush()?;
        }

        sink.flush()?;
        Ok(())
    }
}

/// Check a start-at/stop-at word against the compiled mask: exact slot
/// count, every character present in its position's symbol set.
fn validate_boundary(option: &'static str, value: &[u8], mask: &Mask) -> Result<(), MaskError> {
    if value.len() != mask.slot_count() {
        return Err(MaskError::LengthMismatch {
            option,
            value: value.into(),
            have: value.len(),
            want: mask.slot_count(),
        });
    }

    for (i, (&ch, slot)) in value.iter().zip(mask.slots()).enumerate() {
        if !slot.symbols().contains(&ch) {
            return Err(MaskError::CharNotFound {
                option,
                ch: ch as char,
                position: i + 1,
                value: value.into(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemorySink;

    fn config(mask: &[u8]) -> GeneratorConfig {
        GeneratorConfig {
            mask: mask.to_vec(),
            ..Default::default()
        }
    }

    fn run(config: GeneratorConfig) -> MemorySink {
        let mut generator = Generator::new(config).unwrap();
        let mut sink = MemorySink::new();
        generator.run(&mut sink).unwrap();
        sink
    }

    #[test]
    fn test_digit_mask_full_enumeration() {
        let sink = run(config(b"?d?d"));

        assert_eq!(sink.len(), 100);
        assert_eq!(sink.words[0], b"00");
        assert_eq!(sink.words[99], b"99");

        // strict numeric-string order implies uniqueness
        for pair in sink.words.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_count_matches_enumeration() {
        for mask in [&b"?l?d"[..], b"?d?d?d", b"ab?d", b"?u?l"] {
            let generator = Generator::new(config(mask)).unwrap();
            let expected = generator.combinations();

            let sink = run(config(mask));
            assert_eq!(sink.len() as u64, expected, "mask {:?}", mask);
        }
    }

    #[test]
    fn test_start_at_resume() {
        let mut cfg = config(b"?d?d");
        cfg.start_at = Some(b"42".to_vec());
        let sink = run(cfg);

        assert_eq!(sink.words[0], b"42");
        assert_eq!(sink.words[1], b"43");
        assert_eq!(sink.words.last().unwrap(), b"99");
        assert_eq!(sink.len(), 58);
    }

    #[test]
    fn test_start_at_length_mismatch() {
        let mut cfg = config(b"?d?d");
        cfg.start_at = Some(b"421".to_vec());

        let err = Generator::new(cfg).unwrap_err();
        assert!(matches!(
            err,
            MaskError::LengthMismatch {
                option: "start-at",
                have: 3,
                want: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_start_at_char_not_found() {
        let mut cfg = config(b"?d?d");
        cfg.start_at = Some(b"4x".to_vec());

        let err = Generator::new(cfg).unwrap_err();
        assert!(matches!(
            err,
            MaskError::CharNotFound {
                option: "start-at",
                ch: 'x',
                position: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_stop_at_halts_run() {
        let mut cfg = config(b"?d?d");
        cfg.stop_at = Some(b"05".to_vec());
        let sink = run(cfg);

        assert_eq!(sink.len(), 6);
        assert_eq!(sink.words.last().unwrap(), b"05");
    }

    #[test]
    fn test_stop_at_halts_entire_range_not_one_length() {
        // with increment, a stop-at prefix hit in the first length must
        // end the whole run instead of rolling into the next length
        let mut cfg = config(b"?d?d");
        cfg.increment = Some((1, 2));
        cfg.stop_at = Some(b"35".to_vec());
        let sink = run(cfg);

        assert_eq!(sink.as_strings(), vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn test_start_at_equal_to_stop_at() {
        let mut cfg = config(b"?d?d");
        cfg.start_at = Some(b"42".to_vec());
        cfg.stop_at = Some(b"42".to_vec());
        let sink = run(cfg);

        assert_eq!(sink.as_strings(), vec!["42"]);
    }

    #[test]
    fn test_sequence_filter() {
        let mut cfg = config(b"?d?d?d?d");
        cfg.seq_max = 2;
        let sink = run(cfg);

        // no two adjacent digits equal: 10 * 9^3
        assert_eq!(sink.len(), 10 * 9 * 9 * 9);
        for word in &sink.words {
            assert!(word.windows(2).all(|w| w[0] != w[1]), "{:?}", word);
        }

        let strings = sink.as_strings();
        assert!(strings.contains(&"1213".to_string()));
        assert!(!strings.contains(&"1123".to_string()));
    }

    #[test]
    fn test_sequence_filter_skip_ahead_completeness() {
        // the subtree skip must not drop any clean candidate: compare
        // against a brute-force filter over the unconstrained stream
        let mut cfg = config(b"?d?d?d");
        cfg.seq_max = 2;
        let filtered = run(cfg);

        let all = run(config(b"?d?d?d"));
        let expected: Vec<&Vec<u8>> = all
            .words
            .iter()
            .filter(|w| w.windows(2).all(|p| p[0] != p[1]))
            .collect();

        assert_eq!(filtered.words.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_occurrence_filter() {
        let mut cfg = config(b"?d?d?d");
        cfg.occur_max = 2;
        let sink = run(cfg);

        // all digits distinct: 10 * 9 * 8
        assert_eq!(sink.len(), 10 * 9 * 8);

        let strings = sink.as_strings();
        assert!(strings.contains(&"123".to_string()));
        assert!(!strings.contains(&"112".to_string()));
        assert!(!strings.contains(&"121".to_string()));
    }

    #[test]
    fn test_increment_range() {
        let mut cfg = config(b"?d?d");
        cfg.increment = Some((1, 2));
        let sink = run(cfg);

        assert_eq!(sink.len(), 110);
        assert_eq!(sink.words[0], b"0");
        assert_eq!(sink.words[9], b"9");
        assert_eq!(sink.words[10], b"00");
        assert_eq!(sink.words[109], b"99");
    }

    #[test]
    fn test_increment_clamps_to_mask_length() {
        let mut cfg = config(b"?d?d");
        cfg.increment = Some((1, 8));

        let generator = Generator::new(cfg.clone()).unwrap();
        assert_eq!(generator.combinations(), 110);

        let sink = run(cfg);
        assert_eq!(sink.len(), 110);
    }

    #[test]
    fn test_start_at_applies_to_first_length_only() {
        let mut cfg = config(b"?d?d");
        cfg.increment = Some((1, 2));
        cfg.start_at = Some(b"73".to_vec());
        let sink = run(cfg);

        // length 1 resumes at the "7" prefix, length 2 runs in full
        assert_eq!(sink.words[0], b"7");
        assert_eq!(sink.words[2], b"9");
        assert_eq!(sink.words[3], b"00");
        assert_eq!(sink.len(), 3 + 100);
    }

    #[test]
    fn test_custom_charset_slots() {
        let mut cfg = config(b"?1?1");
        cfg.custom_charsets[0] = Some(b"?dabcdef".to_vec());
        let sink = run(cfg);

        assert_eq!(sink.len(), 16 * 16);
        assert_eq!(sink.words[0], b"00");
        assert_eq!(sink.words.last().unwrap(), b"ff");
    }

    #[test]
    fn test_hex_charset_mode() {
        let mut cfg = config(b"?1?1");
        cfg.hex_charset = true;
        cfg.custom_charsets[0] = Some(b"414243".to_vec());
        let sink = run(cfg);

        assert_eq!(sink.len(), 9);
        assert_eq!(sink.words[0], b"AA");
        assert_eq!(sink.words.last().unwrap(), b"CC");
    }

    #[test]
    fn test_combinations_mode_value() {
        let mut cfg = config(b"?d?d?l");
        cfg.combinations = true;

        let generator = Generator::new(cfg).unwrap();
        assert_eq!(generator.combinations(), 2600);
    }

    #[test]
    fn test_conflicting_options() {
        let mut cfg = config(b"?d?d");
        cfg.seq_max = 2;
        cfg.start_at = Some(b"42".to_vec());
        assert!(matches!(
            Generator::new(cfg).unwrap_err(),
            MaskError::ConflictingOptions {
                left: "--seq-max",
                right: "--start-at",
            }
        ));

        let mut cfg = config(b"?d?d");
        cfg.occur_max = 2;
        cfg.combinations = true;
        assert!(matches!(
            Generator::new(cfg).unwrap_err(),
            MaskError::ConflictingOptions {
                left: "--occurrence-max",
                right: "--combinations",
            }
        ));
    }

    #[test]
    fn test_threshold_of_one_rejected() {
        let mut cfg = config(b"?d?d");
        cfg.seq_max = 1;
        assert_eq!(
            Generator::new(cfg).unwrap_err(),
            MaskError::ThresholdTooLow("--seq-max")
        );

        let mut cfg = config(b"?d?d");
        cfg.occur_max = 1;
        assert_eq!(
            Generator::new(cfg).unwrap_err(),
            MaskError::ThresholdTooLow("--occurrence-max")
        );
    }

    #[test]
    fn test_undefined_custom_charset() {
        let err = Generator::new(config(b"?3")).unwrap_err();
        assert_eq!(err, MaskError::UndefinedCharset(3));
    }

    #[test]
    fn test_stats_track_rejections() {
        let mut cfg = config(b"?d?d?d");
        cfg.occur_max = 2;

        let mut generator = Generator::new(cfg).unwrap();
        let mut sink = MemorySink::new();
        generator.run(&mut sink).unwrap();

        assert_eq!(generator.stats().emitted, 720);
        assert_eq!(generator.stats().rejected_occur, 1000 - 720);
        assert_eq!(generator.stats().rejected_seq, 0);
    }
}
