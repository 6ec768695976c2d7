pub mod bank;
pub mod events;
pub mod session;

use std::{fs::File, io::Read, path::Path};

use thiserror::Error;

/// Every question in the bank offers exactly this many options.
pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    #[serde(alias = "correctIndex")]
    pub correct_index: usize,
}

impl Question {
    pub fn new(text: impl Into<String>, options: Vec<String>, correct_index: usize) -> Self {
        Self {
            text: text.into(),
            options,
            correct_index,
        }
    }

    /// `None` when `correct_index` does not point at an option, which a
    /// validated [`QuestionBank`] rules out.
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("question bank is empty")]
    Empty,
    #[error("question {position} has {found} options, expected {}", OPTIONS_PER_QUESTION)]
    WrongOptionCount { position: usize, found: usize },
    #[error("question {position} marks option {index} as correct but only has {options} options")]
    CorrectIndexOutOfRange {
        position: usize,
        index: usize,
        options: usize,
    },
    #[error("question {position} has blank text")]
    BlankText { position: usize },
    #[error("question {position} has a blank option")]
    BlankOption { position: usize },
    #[error("failed to read question bank")]
    Io(#[from] std::io::Error),
    #[error("failed to parse question bank")]
    Json(#[from] serde_json::Error),
}

/// Read-only, validated set of questions a session is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        for (i, question) in questions.iter().enumerate() {
            // 1-based so the messages match what a human counts in the file
            let position = i + 1;
            if question.text.trim().is_empty() {
                return Err(BankError::BlankText { position });
            }
            if question.options.len() != OPTIONS_PER_QUESTION {
                return Err(BankError::WrongOptionCount {
                    position,
                    found: question.options.len(),
                });
            }
            if question.options.iter().any(|o| o.trim().is_empty()) {
                return Err(BankError::BlankOption { position });
            }
            if question.correct_index >= question.options.len() {
                return Err(BankError::CorrectIndexOutOfRange {
                    position,
                    index: question.correct_index,
                    options: question.options.len(),
                });
            }
        }
        Ok(Self { questions })
    }

    pub fn from_json_reader(reader: impl Read) -> Result<Self, BankError> {
        let questions: Vec<Question> = serde_json::from_reader(reader)?;
        Self::new(questions)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BankError> {
        let file = File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(options: &[&str], correct_index: usize) -> Question {
        Question::new(
            "2+2?",
            options.iter().map(|o| o.to_string()).collect(),
            correct_index,
        )
    }

    #[test]
    fn accepts_well_formed_questions() {
        let bank = QuestionBank::new(vec![question(&["3", "4", "5", "6"], 1)]).unwrap();
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.questions()[0].correct_option(), Some("4"));
    }

    #[test]
    fn unvalidated_question_with_bad_index_has_no_correct_option() {
        assert_eq!(question(&["3", "4", "5", "6"], 7).correct_option(), None);
    }

    #[test]
    fn rejects_empty_bank() {
        assert!(matches!(QuestionBank::new(vec![]), Err(BankError::Empty)));
    }

    #[test]
    fn rejects_wrong_option_count() {
        let err = QuestionBank::new(vec![
            question(&["3", "4", "5", "6"], 1),
            question(&["3", "4"], 0),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            BankError::WrongOptionCount {
                position: 2,
                found: 2
            }
        ));
    }

    #[test]
    fn rejects_correct_index_past_options() {
        let err = QuestionBank::new(vec![question(&["3", "4", "5", "6"], 4)]).unwrap_err();
        assert!(matches!(
            err,
            BankError::CorrectIndexOutOfRange { index: 4, .. }
        ));
    }

    #[test]
    fn rejects_blank_option() {
        let err = QuestionBank::new(vec![question(&["3", " ", "5", "6"], 0)]).unwrap_err();
        assert!(matches!(err, BankError::BlankOption { position: 1 }));
    }

    #[test]
    fn loads_json_with_either_index_spelling() {
        let json = r#"[
            {"text": "2+2?", "options": ["3", "4", "5", "6"], "correct_index": 1},
            {"text": "Capital of France?", "options": ["Rome", "Paris", "Berlin", "Madrid"], "correctIndex": 1}
        ]"#;
        let bank = QuestionBank::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.questions()[1].correct_option(), Some("Paris"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = QuestionBank::from_json_reader("{not json".as_bytes()).unwrap_err();
        assert!(matches!(err, BankError::Json(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = QuestionBank::from_path("definitely/not/here.json").unwrap_err();
        assert!(matches!(err, BankError::Io(_)));
    }
}
