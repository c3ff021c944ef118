/// Sentence patterns for one narration voice.
///
/// Placeholders: `{exam_name}`, `{course_name}`, `{question_statement}`, `{options_text}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ScriptStyle {
    /// Style id, 1 to 5.
    pub id: u32,
    /// Display name.
    pub name: &'static str,
    /// Opening line with exam and course placeholders.
    pub intro: &'static str,
    /// Question line with statement and options placeholders.
    pub question: &'static str,
    /// Always contains the spoken countdown `5... 4... 3... 2... 1...`.
    pub timer: &'static str,
    /// Line spoken after the countdown.
    pub answer_reveal: &'static str,
    /// Closing line with exam and course placeholders.
    pub outro: &'static str,
}

/// Style used for unknown ids.
pub const DEFAULT_STYLE_ID: u32 = 1;

/// The built-in narration styles in id order.
pub const SCRIPT_STYLES: [ScriptStyle; 5] = [
    ScriptStyle {
        id: 1,
        name: "Engaging Teacher Style",
        intro: "Hey everyone! Today we are solving a question from {exam_name} for {course_name}.",
        question: "So the question says: {question_statement}. {options_text}",
        timer: "I want you to try this yourself. Take 5 seconds. Ready? 5... 4... 3... 2... 1...",
        answer_reveal: "Okay, time is up! The answer and solution are on your screen.",
        outro: "If you want a complete roadmap for {exam_name} {course_name}, follow and comment \"roadmap\" and it will be in your DMs.",
    },
    ScriptStyle {
        id: 2,
        name: "Direct and Clear Style",
        intro: "Hello! Quick question for {exam_name} {course_name} today.",
        question: "The question is: {question_statement}. {options_text}",
        timer: "Try it yourself! You have 5 seconds. 5... 4... 3... 2... 1... Done!",
        answer_reveal: "Time up! Here is the answer on your screen.",
        outro: "For complete {exam_name} {course_name} preparation guide, follow and comment \"guide\". Check your DMs!",
    },
    ScriptStyle {
        id: 3,
        name: "Motivational Style",
        intro: "What is up! Ready for a {exam_name} {course_name} challenge today?",
        question: "Here is the question: {question_statement}. {options_text}",
        timer: "Think you can solve it? Let me see! 5 seconds starting now... 5... 4... 3... 2... 1... Let us check!",
        answer_reveal: "And the answer is revealed on your screen!",
        outro: "Want to master {exam_name} {course_name}? Follow me and drop \"roadmap\" for the complete preparation guide in your DMs!",
    },
    ScriptStyle {
        id: 4,
        name: "Professional Academic Style",
        intro: "Welcome. Today we will solve a question from {exam_name} for {course_name}.",
        question: "The question states: {question_statement}. {options_text}",
        timer: "Attempt this problem independently. 5 seconds. 5... 4... 3... 2... 1... Proceed.",
        answer_reveal: "The correct answer is now displayed on screen.",
        outro: "For comprehensive {exam_name} {course_name} preparation resources, follow and comment \"roadmap\".",
    },
    ScriptStyle {
        id: 5,
        name: "Friendly Tutor Style",
        intro: "Hey there! Got an interesting {exam_name} {course_name} question for you today.",
        question: "Let us read it: {question_statement}. {options_text}",
        timer: "Give it a shot! I will wait 5 seconds. 5... 4... 3... 2... 1... Okay!",
        answer_reveal: "Here is the answer on your screen!",
        outro: "Need more practice with {exam_name} {course_name}? Hit follow and comment \"roadmap\" for the complete guide!",
    },
];

/// Style by id, falling back to [`DEFAULT_STYLE_ID`].
pub fn style(id: u32) -> &'static ScriptStyle {
    SCRIPT_STYLES
        .iter()
        .find(|s| s.id == id)
        .unwrap_or(&SCRIPT_STYLES[0])
}
