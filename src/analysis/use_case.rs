/// A speaking-context category with its trigger phrases and coaching tips.
pub struct UseCase {
    pub key: &'static str,
    pub keywords: &'static [&'static str],
    pub suggestions: &'static [&'static str],
}

/// The known speaking contexts, in match-priority order. The first
/// use-case whose any keyword appears in the transcript wins.
///
/// Process-wide and immutable; mutating speaking contexts at runtime is
/// not a supported operation.
pub static USE_CASES: &[UseCase] = &[
    UseCase {
        key: "interview",
        keywords: &[
            "interview",
            "introduction",
            "self intro",
            "tell me about yourself",
        ],
        suggestions: &[
            "Practice using a timer to simulate interview pressure.",
            "Use STAR format (Situation, Task, Action, Result) in responses.",
            "Keep answers concise and confident.",
        ],
    },
    UseCase {
        key: "singing",
        keywords: &["song", "singing", "practice singing"],
        suggestions: &[
            "Avoid dairy or cold items like ice cream before singing.",
            "Warm up your voice with humming or lip trills.",
            "Stay hydrated and avoid yelling before sessions.",
        ],
    },
    UseCase {
        key: "public_speaking",
        keywords: &["speech", "presentation", "talk"],
        suggestions: &[
            "Practice in front of a mirror or record yourself.",
            "Work on intonation and pace to maintain engagement.",
            "Use pauses strategically for emphasis.",
        ],
    },
];

/// Classify a transcript by case-insensitive substring match against the
/// keyword tables. Returns None for no match (including an empty
/// transcript).
pub fn detect(transcript: &str) -> Option<&'static UseCase> {
    let lowered = transcript.to_lowercase();
    USE_CASES
        .iter()
        .find(|uc| uc.keywords.iter().any(|kw| lowered.contains(kw)))
}

/// Look up a use-case by key, e.g. for the `suggestions` subcommand.
pub fn find(key: &str) -> Option<&'static UseCase> {
    USE_CASES.iter().find(|uc| uc.key == key)
}
