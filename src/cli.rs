//! Command-line interface definition for maskgen.
//!
//! Provides argument parsing and validation for the mask-based word
//! generator.

use clap::Parser;
use std::path::PathBuf;

use crate::mask::MASK_MAX;

/// High-performance word generator with a per-position configurable charset
///
/// Enumerates every candidate matching a mask, in a fixed deterministic
/// order, streaming to stdout or a file.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "maskgen",
    version,
    about = "High-performance word generator with a per-position configurable charset",
    long_about = r##"
High-performance word generator with a per-position configurable charset.

Each mask position selects one charset; candidates are enumerated in a
fixed deterministic order with the rightmost position cycling fastest,
without ever holding the combinatorial set in memory.

EXAMPLES:
    # Four digits: 0000 through 9999
    maskgen ?d?d?d?d

    # Uppercase letter, three lowercase, two digits
    maskgen ?u?l?l?l?d?d

    # Lengths 4 through 8 over lowercase
    maskgen -i 4:8 ?l?l?l?l?l?l?l?l

    # Custom charset: ?1 = 0123456789abcdef
    maskgen -1 ?dabcdef ?1?1?1?1

    # Resume an interrupted run
    maskgen -s kcrdl ?l?l?l?l?l

    # Count instead of enumerating
    maskgen --combinations ?l?l?l?l

BUILT-IN CHARSETS:
    ?l = abcdefghijklmnopqrstuvwxyz
    ?u = ABCDEFGHIJKLMNOPQRSTUVWXYZ
    ?d = 0123456789
    ?s =  !"#$%&'()*+,-./:;<=>?@[\]^_`{|}~
    ?a = ?l?u?d?s
    ?b = 0x00 - 0xff
"##
)]
pub struct Args {
    /// Mask defining one charset per output position (e.g. "?u?l?l?d?d")
    #[arg(value_name = "MASK", required = true)]
    pub mask: String,

    /// Append candidates to FILE instead of writing to stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Enumerate lengths MIN through MAX (inclusive) instead of the full
    /// mask length
    #[arg(short = 'i', long, value_name = "MIN:MAX")]
    pub increment: Option<String>,

    /// First candidate to emit (resume position)
    #[arg(short = 's', long, value_name = "WORD")]
    pub start_at: Option<String>,

    /// Last candidate to emit; generation halts after it
    #[arg(short = 'l', long, value_name = "WORD")]
    pub stop_at: Option<String>,

    /// Reject candidates with NUM or more identical adjacent characters
    #[arg(short = 'q', long, value_name = "NUM", default_value_t = 0)]
    pub seq_max: usize,

    /// Reject candidates where any character occurs NUM or more times
    #[arg(short = 'r', long = "occurrence-max", value_name = "NUM", default_value_t = 0)]
    pub occur_max: u32,

    /// User-definable charset ?1 (e.g. "?dabcdef")
    #[arg(short = '1', long = "custom-charset1", value_name = "CS")]
    pub custom_charset1: Option<String>,

    /// User-definable charset ?2
    #[arg(short = '2', long = "custom-charset2", value_name = "CS")]
    pub custom_charset2: Option<String>,

    /// User-definable charset ?3
    #[arg(short = '3', long = "custom-charset3", value_name = "CS")]
    pub custom_charset3: Option<String>,

    /// User-definable charset ?4
    #[arg(short = '4', long = "custom-charset4", value_name = "CS")]
    pub custom_charset4: Option<String>,

    /// Interpret charsets (and mask literals) as 2-digit hex pairs
    #[arg(long, default_value_t = false)]
    pub hex_charset: bool,

    /// Print the number of combinations and exit
    #[arg(long, default_value_t = false)]
    pub combinations: bool,

    /// Print a run summary to stderr when done
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Quiet mode - suppress progress and diagnostics
    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short = 'v', long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Parse the MIN:MAX increment specification.
    pub fn parse_increment(&self) -> anyhow::Result<Option<(usize, usize)>> {
        let Some(ref spec) = self.increment else {
            return Ok(None);
        };

        let (s_min, s_max) = spec.split_once(':').ok_or_else(|| {
            anyhow::anyhow!(
                "invalid increment format '{}'. Use MIN:MAX (e.g. 4:8)",
                spec
            )
        })?;

        let min: usize = s_min
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid increment start: '{}'", s_min))?;
        let max: usize = s_max
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid increment end: '{}'", s_max))?;

        if min < 1 {
            anyhow::bail!("increment start must be at least 1");
        }
        if max > MASK_MAX {
            anyhow::bail!("increment end must be at most {}", MASK_MAX);
        }
        if min > max {
            anyhow::bail!(
                "invalid increment range: start ({}) must be <= end ({})",
                min,
                max
            );
        }

        Ok(Some((min, max)))
    }

    /// The four custom charset expressions as raw bytes.
    pub fn custom_charsets(&self) -> [Option<Vec<u8>>; 4] {
        [
            &self.custom_charset1,
            &self.custom_charset2,
            &self.custom_charset3,
            &self.custom_charset4,
        ]
        .map(|cs| cs.as_ref().map(|s| s.clone().into_bytes()))
    }
}
