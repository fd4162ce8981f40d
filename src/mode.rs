use std::fmt;
use std::str::FromStr;

/// Which survey is served.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Questions come from the `questions` table, one feedback row per answer.
    Questions,
    /// Static three-slot form, one `fixed_feedback` row per submission.
    Fixed,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Questions => "questions",
            Mode::Fixed => "fixed",
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "questions" => Ok(Mode::Questions),
            "fixed" => Ok(Mode::Fixed),
            _ => Err(format!(
                "unknown survey mode `{}`, expected `questions` or `fixed`",
                s
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modes() {
        assert_eq!("questions".parse::<Mode>(), Ok(Mode::Questions));
        assert_eq!("fixed".parse::<Mode>(), Ok(Mode::Fixed));
        assert!("Fixed".parse::<Mode>().is_err());
        assert_eq!(Mode::Fixed.to_string(), "fixed");
    }
}
