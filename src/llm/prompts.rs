use crate::analysis::rating_engine::Evaluation;
use crate::models::GitHubUser;

pub const SYSTEM_PROMPT: &str = r#"You are an experienced technical recruiter reviewing a developer's public GitHub portfolio.
Your task is to write a short, honest assessment a hiring manager can read in under a minute.

You must respond with valid JSON matching this exact schema:
{
    "professional_summary": "string (2-3 sentences, third person, no marketing fluff)",
    "recruiter_tip": "string (one concrete thing a recruiter should ask or verify)",
    "key_strength": "string (a few words naming the single strongest signal)",
    "recommendations": [
        {
            "type": "critical|warning|info|easy-win",
            "title": "string (at most 4 words)",
            "text": "string (one actionable sentence addressed to the developer)"
        }
    ]
}

Guidelines:
- Base every statement on the data provided; do not invent projects or employers
- Give at most 2 recommendations
- Respond with the JSON object only"#;

/// Condensed profile handed to the narrative provider.
#[derive(Debug, Clone, Default)]
pub struct NarrativeRequest {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub repo_count: usize,
    pub top_languages: Vec<String>,
    pub top_repos: Vec<RepoHighlight>,
}

#[derive(Debug, Clone)]
pub struct RepoHighlight {
    pub name: String,
    pub description: Option<String>,
}

const TOP_LANGUAGES: usize = 5;
const TOP_REPOS: usize = 3;

impl NarrativeRequest {
    pub fn from_evaluation(user: &GitHubUser, evaluation: &Evaluation) -> Self {
        let mut languages: Vec<(&String, &u32)> = evaluation.aggregate.languages.iter().collect();
        // Most used first; BTreeMap order breaks ties alphabetically.
        languages.sort_by(|a, b| b.1.cmp(a.1));

        Self {
            login: user.login.clone(),
            name: user.name.clone(),
            bio: user.bio.clone(),
            repo_count: evaluation.aggregate.repos.len(),
            top_languages: languages
                .into_iter()
                .take(TOP_LANGUAGES)
                .map(|(name, _)| name.clone())
                .collect(),
            top_repos: evaluation
                .aggregate
                .repos
                .iter()
                .take(TOP_REPOS)
                .map(|r| RepoHighlight {
                    name: r.name.clone(),
                    description: r.description.clone(),
                })
                .collect(),
        }
    }

    pub fn to_prompt(&self) -> String {
        let mut prompt = format!("Developer: {}", self.login);
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            prompt.push_str(&format!(" ({})", name));
        }
        prompt.push('\n');

        match self.bio.as_deref().filter(|b| !b.trim().is_empty()) {
            Some(bio) => prompt.push_str(&format!("Bio: {}\n", bio)),
            None => prompt.push_str("Bio: (none)\n"),
        }

        prompt.push_str(&format!("Original repositories: {}\n", self.repo_count));

        if self.top_languages.is_empty() {
            prompt.push_str("Top languages: (none detected)\n");
        } else {
            prompt.push_str(&format!("Top languages: {}\n", self.top_languages.join(", ")));
        }

        if !self.top_repos.is_empty() {
            prompt.push_str("\nTop repositories:\n");
            for repo in &self.top_repos {
                match repo.description.as_deref().filter(|d| !d.is_empty()) {
                    Some(desc) => prompt.push_str(&format!("- {}: {}\n", repo.name, desc)),
                    None => prompt.push_str(&format!("- {}\n", repo.name)),
                }
            }
        }

        prompt.push_str("\nProvide your assessment as JSON:\n");
        prompt
    }
}
