use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    ObstaclePlacement { attempts: u32 },
    BoardFull { attempts: u32 },
    InvalidSettings(&'static str),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::ObstaclePlacement { attempts } => {
                write!(f, "could not place obstacle after {} attempts", attempts)
            }
            GameError::BoardFull { attempts } => {
                write!(f, "no empty cell for an apple after {} attempts", attempts)
            }
            GameError::InvalidSettings(reason) => write!(f, "invalid settings: {}", reason),
        }
    }
}

impl std::error::Error for GameError {}
