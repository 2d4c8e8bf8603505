use crate::profile::{Candidate, Language, UserProfile};
use crate::utils::shared_interests;
use std::fmt::Write;

const PROMPT_RULES: &str = "Return strictly ONE unique date plan object.\n\
                            1. Best venue at midpoint.\n\
                            2. Specific time.\n\
                            3. Payer logic (Me/Them/Split).\n";

/// Kept short: the plan is fetched while the user is swiping.
pub fn build_prompt(user: &UserProfile, candidate: &Candidate, language: Language) -> String {
    let shared = shared_interests(&user.profile.interests, &candidate.profile.interests);

    let mut prompt = String::with_capacity(256);
    let _ = writeln!(
        prompt,
        "User({}), Match({}). Interests: {}.",
        user.profile.location_for_prompt(),
        candidate.profile.location,
        shared.join(", ")
    );
    prompt.push_str(PROMPT_RULES);
    let _ = write!(prompt, "Lang: {}. JSON.", language.tag());
    prompt
}
