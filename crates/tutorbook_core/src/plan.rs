//! Study plan text generation.
//!
//! # Responsibility
//! - Render a personalized study roadmap from a student name and free-text
//!   learning needs.
//!
//! # Invariants
//! - Pure function of its inputs: no storage access, no clock, no randomness.
//! - Output is opaque text; callers never parse it.

use crate::model::directory::NO_SPECIAL_NEEDS;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Renders a study roadmap for `name` with the given learning `needs`.
///
/// Sections: daily practice tips, weekly schedule, resources, and strategies
/// for difficult topics. Blank `needs` render as `"none"`.
pub fn generate_plan(name: &str, needs: &str) -> String {
    let name = collapse_whitespace(name);
    let needs = collapse_whitespace(needs);
    let has_needs = !needs.is_empty();
    let needs_label = if has_needs {
        needs.as_str()
    } else {
        NO_SPECIAL_NEEDS
    };

    let mut plan = String::new();
    plan.push_str(&format!("Study roadmap for {name}\n"));
    plan.push_str(&format!("Learning needs: {needs_label}\n\n"));

    plan.push_str("Daily practice tips\n");
    plan.push_str("- Start with a 10 minute review of yesterday's material.\n");
    plan.push_str("- Work in focused 25 minute blocks with short breaks.\n");
    if has_needs {
        plan.push_str(&format!(
            "- Adapt each block to your needs ({needs_label}): slow down and check understanding often.\n"
        ));
    }
    plan.push_str("- Finish by writing three things you learned today.\n\n");

    plan.push_str("Weekly schedule\n");
    plan.push_str("- Mon/Wed/Fri: new material with your teacher.\n");
    plan.push_str("- Tue/Thu: guided practice and exercises.\n");
    plan.push_str("- Sat: review the week and note open questions.\n");
    plan.push_str("- Sun: rest.\n\n");

    plan.push_str("Resources\n");
    plan.push_str("- Class notes and worked examples from each session.\n");
    plan.push_str("- Practice problem sets matched to the current topic.\n");
    if has_needs {
        plan.push_str("- Accessible formats (audio, large print, visual aids) where they help.\n");
    }
    plan.push('\n');

    plan.push_str("Strategies for difficult topics\n");
    plan.push_str("- Break the topic into small steps and master one at a time.\n");
    plan.push_str("- Explain the idea aloud in your own words.\n");
    plan.push_str("- Bring unresolved questions to your next session.\n");

    plan
}

fn collapse_whitespace(value: &str) -> String {
    WHITESPACE_RE.replace_all(value.trim(), " ").into_owned()
}
