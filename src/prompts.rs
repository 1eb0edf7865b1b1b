//! Prompt templates and composition
//!
//! Templates live under `data/prompts/` and are embedded at compile time.
//! The composer functions pick the tone and proficiency instructions and
//! render the final system/user turns sent to the generation provider.

use regex::{Captures, Regex};
use std::sync::LazyLock;

pub const RESEARCH_SYSTEM: &str = include_str!("../data/prompts/research_system.txt");
pub const RESEARCH_USER: &str = include_str!("../data/prompts/research_user.txt");
pub const SUMMARY_SYSTEM: &str = include_str!("../data/prompts/summary_system.txt");
pub const SUMMARY_USER: &str = include_str!("../data/prompts/summary_user.txt");
pub const KEYWORDS_SYSTEM: &str = include_str!("../data/prompts/keywords_system.txt");
pub const KEYWORDS_USER: &str = include_str!("../data/prompts/keywords_user.txt");
pub const IMAGE_ANALYSIS: &str = include_str!("../data/prompts/image_analysis.txt");

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid regex"));

/// Replace `{{key}}` placeholders in a template string.
///
/// Only the template is scanned, so substituted values are never expanded
/// again. Placeholders without a matching var are left as they are.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// A system instruction paired with the user turn it frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Tone bucket derived from the user's reported emotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Gentle,
    Enthusiastic,
    Balanced,
}

impl Tone {
    /// Classify a free-form emotion label. Unknown labels fall back to `Balanced`.
    pub fn from_emotion(emotion: &str) -> Self {
        match emotion.to_lowercase().as_str() {
            "neutral" | "sad" => Tone::Gentle,
            "happy" | "excited" | "joy" => Tone::Enthusiastic,
            _ => Tone::Balanced,
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            Tone::Gentle => "The user is in a calm or low mood, so explain the topic thoroughly but in a gentle and easy-to-follow manner.",
            Tone::Enthusiastic => "The user is in a good mood, so you can explain the topic with enthusiasm, depth, and engaging details.",
            Tone::Balanced => "Adjust your response tone to suit the user's emotion. Prioritize clarity and depth.",
        }
    }
}

/// Proficiency bucket derived from the requested level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
}

impl Proficiency {
    /// Levels 1 and 2 are recognised; every other value is treated as advanced.
    pub fn from_level(level: i64) -> Self {
        match level {
            1 => Proficiency::Beginner,
            2 => Proficiency::Intermediate,
            _ => Proficiency::Advanced,
        }
    }

    pub fn word_count(self) -> &'static str {
        match self {
            Proficiency::Beginner => "250-400",
            Proficiency::Intermediate => "450-600",
            Proficiency::Advanced => "800-1000",
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            Proficiency::Beginner => "The user is a beginner, so use simple language, avoid jargon, and build up from the basics.",
            Proficiency::Intermediate => "The user has intermediate knowledge, so assume familiarity with the core concepts and go into moderate technical depth.",
            Proficiency::Advanced => "The user is advanced, so use precise terminology, cover nuances and edge cases, and go into full technical depth.",
        }
    }
}

pub fn compose_research_prompt(question: &str, emotion: &str, level: i64) -> Prompt {
    let tone = Tone::from_emotion(emotion);
    let proficiency = Proficiency::from_level(level);
    let level_str = level.to_string();

    Prompt {
        system: render(
            RESEARCH_SYSTEM,
            &[
                ("word_count", proficiency.word_count()),
                ("level_instruction", proficiency.instruction()),
                ("emotion_instruction", tone.instruction()),
            ],
        )
        .trim_end()
        .to_string(),
        user: render(
            RESEARCH_USER,
            &[
                ("question", question),
                ("emotion", emotion),
                ("level", &level_str),
            ],
        )
        .trim_end()
        .to_string(),
    }
}

pub fn compose_summary_prompt(content: &str) -> Prompt {
    Prompt {
        system: SUMMARY_SYSTEM.trim_end().to_string(),
        user: render(SUMMARY_USER, &[("content", content.trim())])
            .trim_end()
            .to_string(),
    }
}

pub fn compose_keyword_prompt(question: &str, emotion: &str) -> Prompt {
    Prompt {
        system: KEYWORDS_SYSTEM.trim_end().to_string(),
        user: render(
            KEYWORDS_USER,
            &[("question", question), ("emotion", emotion)],
        )
        .trim_end()
        .to_string(),
    }
}

pub fn image_analysis_instruction() -> &'static str {
    IMAGE_ANALYSIS.trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_multiple_vars() {
        assert_eq!(
            render("{{a}} and {{b}}", &[("a", "cats"), ("b", "dogs")]),
            "cats and dogs"
        );
    }

    #[test]
    fn test_render_does_not_expand_substituted_values() {
        assert_eq!(
            render("{{a}} / {{b}}", &[("a", "{{b}}"), ("b", "dogs")]),
            "{{b}} / dogs"
        );
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        assert_eq!(render("{{a}} {{zzz}}", &[("a", "x")]), "x {{zzz}}");
    }

    #[test]
    fn test_research_question_with_braces_is_kept_verbatim() {
        let prompt =
            compose_research_prompt("What does {{emotion}} at {{level}} mean?", "happy", 2);
        assert_eq!(
            prompt.user,
            "Query: What does {{emotion}} at {{level}} mean?\nEmotion: happy\nLevel: 2"
        );
    }

    #[test]
    fn test_keyword_question_with_braces_is_kept_verbatim() {
        let prompt = compose_keyword_prompt("explain {{emotion}} templates", "sad");
        assert_eq!(
            prompt.user,
            "Query: explain {{emotion}} templates\nEmotion: sad"
        );
    }

    #[test]
    fn test_prompts_are_non_empty() {
        assert!(!RESEARCH_SYSTEM.is_empty());
        assert!(!RESEARCH_USER.is_empty());
        assert!(!SUMMARY_SYSTEM.is_empty());
        assert!(!SUMMARY_USER.is_empty());
        assert!(!KEYWORDS_SYSTEM.is_empty());
        assert!(!KEYWORDS_USER.is_empty());
        assert!(!IMAGE_ANALYSIS.is_empty());
    }

    #[test]
    fn test_research_template_has_placeholders() {
        assert!(RESEARCH_SYSTEM.contains("{{word_count}}"));
        assert!(RESEARCH_SYSTEM.contains("{{level_instruction}}"));
        assert!(RESEARCH_SYSTEM.contains("{{emotion_instruction}}"));
    }

    #[test]
    fn test_tone_known_emotions_are_case_insensitive() {
        assert_eq!(Tone::from_emotion("Neutral"), Tone::Gentle);
        assert_eq!(Tone::from_emotion("SAD"), Tone::Gentle);
        assert_eq!(Tone::from_emotion("happy"), Tone::Enthusiastic);
        assert_eq!(Tone::from_emotion("Excited"), Tone::Enthusiastic);
        assert_eq!(Tone::from_emotion("JOY"), Tone::Enthusiastic);
    }

    #[test]
    fn test_tone_unknown_emotions_fall_back_to_balanced() {
        for emotion in ["angry", "", "confused", " happy", "joyful"] {
            assert_eq!(Tone::from_emotion(emotion), Tone::Balanced, "{emotion}");
        }
    }

    #[test]
    fn test_levels_outside_one_and_two_are_advanced() {
        for level in [3, 0, -1, 4, 99, i64::MIN, i64::MAX] {
            let prompt = compose_research_prompt("q", "neutral", level);
            assert!(prompt.system.contains("800-1000 words"), "level {level}");
            assert!(
                prompt.system.contains(Proficiency::Advanced.instruction()),
                "level {level}"
            );
        }
    }

    #[test]
    fn test_beginner_and_intermediate_word_counts() {
        let beginner = compose_research_prompt("q", "neutral", 1);
        assert!(beginner.system.contains("250-400 words"));
        assert!(beginner.system.contains(Proficiency::Beginner.instruction()));

        let intermediate = compose_research_prompt("q", "neutral", 2);
        assert!(intermediate.system.contains("450-600 words"));
        assert!(intermediate
            .system
            .contains(Proficiency::Intermediate.instruction()));
    }

    #[test]
    fn test_research_prompt_embeds_tone_and_user_turn() {
        let prompt = compose_research_prompt("What is photosynthesis?", "Happy", 2);
        assert!(prompt.system.contains(Tone::Enthusiastic.instruction()));
        assert!(!prompt.system.contains("{{"));
        assert_eq!(
            prompt.user,
            "Query: What is photosynthesis?\nEmotion: Happy\nLevel: 2"
        );
    }

    #[test]
    fn test_summary_prompt_trims_content() {
        let prompt = compose_summary_prompt("  AI improves education.\n");
        assert_eq!(prompt.user, "Content to summarize: AI improves education.");
        assert!(prompt.system.contains("'This article states that'"));
    }

    #[test]
    fn test_keyword_prompt_user_turn() {
        let prompt = compose_keyword_prompt("photosynthesis", "happy");
        assert_eq!(prompt.user, "Query: photosynthesis\nEmotion: happy");
        assert!(prompt.system.contains("comma"));
    }
}
