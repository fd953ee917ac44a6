use thiserror::Error;

/// Search query derived from a raw file or folder name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub title_guess: String,
    pub year_guess: Option<u16>,
}

impl ParsedQuery {
    pub fn new(title_guess: impl Into<String>, year_guess: Option<u16>) -> Self {
        Self {
            title_guess: title_guess.into(),
            year_guess,
        }
    }
}

impl std::fmt::Display for ParsedQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.year_guess {
            Some(year) => write!(f, "{} ({})", self.title_guess, year),
            None => write!(f, "{}", self.title_guess),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("No usable title could be derived from: {0}")]
    EmptyTitle(String),
}
