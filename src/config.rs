//! Compatibility switches shared by the pipeline stages.

use crate::error::Err;
use derive_more::Display;
use std::str::FromStr;

/// How numeric fields of the text edge list are parsed.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// `atol`-like prefix parsing; garbage becomes 0.
    #[display(fmt = "permissive")]
    Permissive,
    /// Every field must be a complete in-range integer.
    #[display(fmt = "strict")]
    Strict,
}

/// Order among vertices of equal degree.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    #[display(fmt = "asc")]
    AscendingId,
    #[display(fmt = "desc")]
    DescendingId,
}

impl FromStr for TieBreak {
    type Err = Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(TieBreak::AscendingId),
            "desc" => Ok(TieBreak::DescendingId),
            _ => Err(Err::InvalidArguments(format!("unknown tie-break: {}", s))),
        }
    }
}

/// What the binary header counts.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMode {
    /// Count of the pre-filter vertex snapshot, no magic.
    #[display(fmt = "legacy")]
    Legacy,
    /// Magic word followed by the count of entries actually written.
    #[display(fmt = "corrected")]
    Corrected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    parse_mode: ParseMode,
    tie_break: TieBreak,
    header_mode: HeaderMode,
    tolerate_legacy_header: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            parse_mode: ParseMode::Permissive,
            tie_break: TieBreak::AscendingId,
            header_mode: HeaderMode::Corrected,
            tolerate_legacy_header: false,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = parse_mode;
        self
    }

    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn header_mode(mut self, header_mode: HeaderMode) -> Self {
        self.header_mode = header_mode;
        self
    }

    /// Accepts a legacy file whose body ends on an entry boundary before the
    /// header count is reached.
    pub fn tolerate_legacy_header(mut self, tolerate: bool) -> Self {
        self.tolerate_legacy_header = tolerate;
        self
    }

    pub fn get_parse_mode(&self) -> ParseMode {
        self.parse_mode
    }

    pub fn get_tie_break(&self) -> TieBreak {
        self.tie_break
    }

    pub fn get_header_mode(&self) -> HeaderMode {
        self.header_mode
    }

    pub fn get_tolerate_legacy_header(&self) -> bool {
        self.tolerate_legacy_header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tie_break_from_str() {
        assert_eq!("asc".parse::<TieBreak>().unwrap(), TieBreak::AscendingId);
        assert_eq!("desc".parse::<TieBreak>().unwrap(), TieBreak::DescendingId);
        assert!(matches!(
            "random".parse::<TieBreak>(),
            Err(Err::InvalidArguments(_))
        ));
    }

    #[test]
    fn test_builder() {
        let options = Options::new()
            .parse_mode(ParseMode::Strict)
            .header_mode(HeaderMode::Legacy);
        assert_eq!(options.get_parse_mode(), ParseMode::Strict);
        assert_eq!(options.get_tie_break(), TieBreak::AscendingId);
        assert_eq!(options.get_header_mode(), HeaderMode::Legacy);
        assert!(!options.get_tolerate_legacy_header());
        assert!(options.tolerate_legacy_header(true).get_tolerate_legacy_header());
    }
}
