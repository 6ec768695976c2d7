use std::{fmt, str::FromStr};

/// Inline-keyboard payloads. Everything but `Begin` carries the id of the
/// session it was rendered for, and pick and next also carry the question
/// cursor, so a press from an older keyboard can be recognized and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    Begin,
    Pick {
        session: u32,
        cursor: usize,
        option: usize,
    },
    Next {
        session: u32,
        cursor: usize,
    },
    ReviewPrevious {
        session: u32,
    },
    ReviewNext {
        session: u32,
    },
    Restart {
        session: u32,
    },
}

impl QuizAction {
    /// The session the button belongs to, `None` for `Begin`.
    pub fn session(&self) -> Option<u32> {
        match *self {
            QuizAction::Begin => None,
            QuizAction::Pick { session, .. }
            | QuizAction::Next { session, .. }
            | QuizAction::ReviewPrevious { session }
            | QuizAction::ReviewNext { session }
            | QuizAction::Restart { session } => Some(session),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for QuizAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizAction::Begin => write!(f, "begin"),
            QuizAction::Pick {
                session,
                cursor,
                option,
            } => write!(f, "pick:{}:{}:{}", session, cursor, option),
            QuizAction::Next { session, cursor } => write!(f, "next:{}:{}", session, cursor),
            QuizAction::ReviewPrevious { session } => write!(f, "review:{}:prev", session),
            QuizAction::ReviewNext { session } => write!(f, "review:{}:next", session),
            QuizAction::Restart { session } => write!(f, "restart:{}", session),
        }
    }
}

impl FromStr for QuizAction {
    type Err = UnknownAction;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownAction(data.to_string());
        let parts = data.split(':').collect::<Vec<_>>();
        let number = |s: &str| s.parse::<usize>().map_err(|_| unknown());
        let session = |s: &str| s.parse::<u32>().map_err(|_| unknown());

        match parts.as_slice() {
            ["begin"] => Ok(QuizAction::Begin),
            ["pick", id, cursor, option] => Ok(QuizAction::Pick {
                session: session(*id)?,
                cursor: number(*cursor)?,
                option: number(*option)?,
            }),
            ["next", id, cursor] => Ok(QuizAction::Next {
                session: session(*id)?,
                cursor: number(*cursor)?,
            }),
            ["review", id, "prev"] => Ok(QuizAction::ReviewPrevious {
                session: session(*id)?,
            }),
            ["review", id, "next"] => Ok(QuizAction::ReviewNext {
                session: session(*id)?,
            }),
            ["restart", id] => Ok(QuizAction::Restart {
                session: session(*id)?,
            }),
            _ => Err(unknown()),
        }
    }
}
