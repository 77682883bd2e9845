//! Prompt text for commit classification

const SYSTEM_PROMPT: &str = "You are a semantic versioning expert. Analyze commit messages and \
determine appropriate version bumps. Remember that dependency updates (even major versions) are \
typically PATCH changes unless they break the project's own public API.";

const INSTRUCTIONS: &str = r#"Analyze these git commit messages and determine the appropriate semantic version bump.

Semantic Versioning Rules:
- MAJOR (x.0.0): Breaking changes, incompatible API changes to THIS project's public API
- MINOR (0.x.0): New features, backwards compatible functionality additions
- PATCH (0.0.x): Bug fixes, minor improvements, documentation, dependency updates

Important Notes:
- Dependency updates (including major version updates of dependencies) should be treated as PATCH unless they cause breaking changes to THIS project's API
- Examples of dependency updates that are PATCH:
  * "chore(deps): bump axios from 0.x to 1.x"
  * "Update React from v17 to v18"
  * "Upgrade dependencies to latest versions"
  * "chore: update package-lock.json"
- Only mark as MAJOR if the project's own API has breaking changes for its users
- Internal refactoring without API changes is PATCH, not MAJOR

Conventional Commit Patterns to look for:
- BREAKING CHANGE, !: Major version (only if it affects this project's API)
- feat, feature: Minor version
- fix, bugfix, perf, refactor, style, docs, test, chore: Patch version

Commits to analyze:
"#;

const RESPONSE_SHAPE: &str = r#"

Respond with a JSON object containing:
1. "bump_type": "major", "minor", or "patch"
2. "reasons": array of strings explaining the decision
3. "breaking_changes": array of breaking changes if any
4. "features": array of new features if any
5. "fixes": array of bug fixes if any

Response format:
{
  "bump_type": "patch",
  "reasons": ["reason1", "reason2"],
  "breaking_changes": ["change1"],
  "features": ["feature1"],
  "fixes": ["fix1"]
}"#;

/// System instruction sent with every classification request
pub fn system_prompt() -> &'static str {
    SYSTEM_PROMPT
}

/// User prompt embedding all commits, one per line
pub fn user_prompt<S: AsRef<str>>(commits: &[S]) -> String {
    let commit_text = commits
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join("\n");

    let mut prompt = String::with_capacity(INSTRUCTIONS.len() + commit_text.len() + RESPONSE_SHAPE.len());
    prompt.push_str(INSTRUCTIONS);
    prompt.push_str(&commit_text);
    prompt.push_str(RESPONSE_SHAPE);
    prompt
}
