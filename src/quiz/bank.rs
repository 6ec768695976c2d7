use crate::quiz::{Question, QuestionBank};

// 1970 Minnesota Vikings season trivia: (question, options, correct option)
const VIKINGS_1970: [(&str, [&str; 4], usize); 10] = [
    (
        "Which Vikings defensive lineman recorded a safety in the 1970 season, showcasing the dominance of the Purple People Eaters?",
        ["Alan Page", "Jim Marshall", "Carl Eller", "Gary Larsen"],
        0,
    ),
    (
        "Who led the Vikings in rushing yards during the 1970 season?",
        ["Dave Osborn", "Chuck Foreman", "Oscar Reed", "Clint Jones"],
        0,
    ),
    (
        "Which Vikings player had the longest interception return in the 1970 season?",
        ["Paul Krause", "Ed Sharockman", "Charlie West", "Karl Kassulke"],
        1,
    ),
    (
        "In 1970, which Vikings linebacker was known for his coverage skills and recorded multiple interceptions?",
        ["Roy Winston", "Jeff Siemon", "Wally Hilgenberg", "Lonnie Warwick"],
        3,
    ),
    (
        "Which team handed the Vikings their first loss of the 1970 season, ending a 5-game win streak?",
        ["St. Louis Cardinals", "San Francisco 49ers", "Detroit Lions", "Dallas Cowboys"],
        0,
    ),
    (
        "What was the Vikings' point differential at the end of the 1970 regular season?",
        ["+140", "+124", "+98", "+112"],
        1,
    ),
    (
        "Which Vikings offensive lineman was selected to the Pro Bowl in 1970 for his run-blocking dominance?",
        ["Grady Alderman", "Mick Tingelhoff", "Ed White", "Steve Riley"],
        0,
    ),
    (
        "Which Vikings wide receiver caught a 65-yard touchdown pass in the 1970 playoff loss to the 49ers?",
        ["Gene Washington", "Bob Grim", "John Beasley", "John Henderson"],
        1,
    ),
    (
        "Who was the Vikings' punter in 1970, known for his hang time and directional kicking?",
        ["Mike Eischeid", "Greg Coleman", "Bob Lee", "Tommy Kramer"],
        0,
    ),
    (
        "Which Vikings assistant coach in 1970 later became an NFL head coach and GM?",
        ["Jerry Burns", "Pete Carroll", "Tony Dungy", "Mike Lynn"],
        0,
    ),
];

impl QuestionBank {
    /// The questions shipped with the bot, used when no bank file is configured.
    pub fn builtin() -> Self {
        let questions = VIKINGS_1970
            .iter()
            .map(|(text, options, correct)| {
                Question::new(*text, options.iter().map(|o| o.to_string()).collect(), *correct)
            })
            .collect();
        // The table above is validated by the tests below
        Self { questions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_bank_passes_validation() {
        let builtin = QuestionBank::builtin();
        let validated = QuestionBank::new(builtin.questions().to_vec()).unwrap();
        assert_eq!(validated, builtin);
        assert_eq!(builtin.len(), 10);
    }

    #[test]
    fn builtin_answers_match_the_table() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.questions()[2].correct_option(), Some("Ed Sharockman"));
        assert_eq!(bank.questions()[3].correct_option(), Some("Lonnie Warwick"));
        assert_eq!(bank.questions()[5].correct_option(), Some("+124"));
    }
}
