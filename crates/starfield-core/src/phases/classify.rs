//! Repository classification, display names and star colours.
//!
//! All lookup tables are immutable statics built once per process.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::RepoType;
use crate::snapshot::Repository;

/// Star colour for repositories with no known primary language.
pub const DEFAULT_STAR_COLOR: &str = "#8b949e";

/// Keywords per category, matched as case-insensitive substrings of
/// `" name description topic topic "`. Spaces in a keyword act as word edges.
const CATEGORY_KEYWORDS: &[(RepoType, &[&str])] = &[
    (
        RepoType::Profile,
        &["profile", "about-me", "about me", "github-readme"],
    ),
    (
        RepoType::Ml,
        &[
            "machine-learning",
            "machine learning",
            "deep-learning",
            "deep learning",
            "neural",
            "tensorflow",
            "pytorch",
            "keras",
            "scikit",
            "langchain",
            "llm",
            "nlp",
            " ml ",
        ],
    ),
    (
        RepoType::Game,
        &[
            "game", "unity", "godot", "bevy", "phaser", "pygame", "minecraft", "unreal",
        ],
    ),
    (
        RepoType::Mobile,
        &[
            "android",
            " ios ",
            "-ios",
            "ios-",
            "flutter",
            "react-native",
            "swiftui",
            "mobile",
            "expo",
        ],
    ),
    (
        RepoType::Docs,
        &[
            "docs",
            "documentation",
            "tutorial",
            "guide",
            "handbook",
            "cheatsheet",
            "awesome-",
            "notes",
            "blog",
        ],
    ),
    (
        RepoType::Cli,
        &[
            " cli ",
            "-cli",
            "cli-",
            "command-line",
            "command line",
            "terminal",
            " tui ",
            "shell",
        ],
    ),
    (
        RepoType::Library,
        &[
            "library", " lib ", "lib-", "-lib", "sdk", "framework", "package", "crate", "plugin",
            "toolkit",
        ],
    ),
    (
        RepoType::Frontend,
        &[
            "react",
            "vue",
            "angular",
            "svelte",
            "nextjs",
            "next.js",
            "frontend",
            "front-end",
            "website",
            "tailwind",
            "html",
            "css",
            "landing",
            "portfolio",
            "webapp",
            "web-app",
        ],
    ),
    (
        RepoType::Backend,
        &[
            "api",
            "backend",
            "back-end",
            "server",
            "express",
            "django",
            "flask",
            "fastapi",
            "microservice",
            "graphql",
            "database",
            "rails",
            "spring",
        ],
    ),
];

/// One compiled matcher per category, in priority order.
static CATEGORY_PATTERNS: LazyLock<Vec<(RepoType, Regex)>> = LazyLock::new(|| {
    CATEGORY_KEYWORDS
        .iter()
        .filter_map(|(repo_type, keywords)| {
            let alternation = keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            // Escaped literals always compile; a failure would only drop the category.
            Regex::new(&format!("(?i){alternation}"))
                .ok()
                .map(|re| (*repo_type, re))
        })
        .collect()
});

/// Display-name suffixes per category.
static NAME_SUFFIXES: LazyLock<HashMap<RepoType, &'static [&'static str]>> = LazyLock::new(|| {
    [
        (RepoType::Profile, &["Prime", "Polaris", "Sol"][..]),
        (RepoType::Ml, &["Cortex", "Synapse", "Oracle", "Neuron"][..]),
        (RepoType::Game, &["Arcade", "Quest", "Pixel", "Saga"][..]),
        (RepoType::Mobile, &["Pocket", "Orbit", "Comet"][..]),
        (RepoType::Docs, &["Codex", "Scroll", "Atlas"][..]),
        (RepoType::Cli, &["Shell", "Prompt", "Forge"][..]),
        (RepoType::Library, &["Archive", "Vault", "Lattice"][..]),
        (RepoType::Frontend, &["Aurora", "Prism", "Lumen", "Canvas"][..]),
        (RepoType::Backend, &["Engine", "Core", "Reactor", "Nexus"][..]),
        (RepoType::Other, &["Major", "Minor", "Borealis", "Australis"][..]),
    ]
    .into_iter()
    .collect()
});

/// Star base colour by primary language (lowercased GitHub linguist name).
static LANGUAGE_COLORS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("typescript", "#3178c6"),
        ("javascript", "#f1e05a"),
        ("python", "#3572a5"),
        ("rust", "#dea584"),
        ("go", "#00add8"),
        ("java", "#b07219"),
        ("c++", "#f34b7d"),
        ("c", "#555555"),
        ("c#", "#178600"),
        ("ruby", "#701516"),
        ("php", "#4f5d95"),
        ("swift", "#f05138"),
        ("kotlin", "#a97bff"),
        ("dart", "#00b4ab"),
        ("shell", "#89e051"),
        ("html", "#e34c26"),
        ("css", "#563d7c"),
        ("vue", "#41b883"),
        ("svelte", "#ff3e00"),
        ("scala", "#c22d40"),
        ("haskell", "#5e5086"),
        ("elixir", "#6e4a7e"),
        ("lua", "#000080"),
        ("r", "#198ce7"),
        ("zig", "#ec915c"),
        ("jupyter notebook", "#da5b0b"),
    ]
    .into_iter()
    .collect()
});

fn haystack(repo: &Repository) -> String {
    format!(
        " {} {} {} ",
        repo.name,
        repo.description.as_deref().unwrap_or(""),
        repo.topics.join(" ")
    )
}

/// Classify a repository. Total: anything unmatched is [`RepoType::Other`].
///
/// Categories are tried in [`RepoType::PRIORITY`] order, so a repository
/// tagged both `react` and `api` is `Frontend`. A repository named after the
/// owner's login is always `Profile`.
pub fn classify_repo(repo: &Repository, login: Option<&str>) -> RepoType {
    if login.is_some_and(|l| !l.is_empty() && l.eq_ignore_ascii_case(&repo.name)) {
        return RepoType::Profile;
    }

    let text = haystack(repo);
    CATEGORY_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(&text))
        .map(|(repo_type, _)| *repo_type)
        .unwrap_or(RepoType::Other)
}

/// Star base colour for a primary language.
pub fn language_color(language: Option<&str>) -> &'static str {
    language
        .and_then(|l| LANGUAGE_COLORS.get(l.to_ascii_lowercase().as_str()).copied())
        .unwrap_or(DEFAULT_STAR_COLOR)
}

fn name_hash(name: &str) -> usize {
    name.bytes().map(usize::from).fold(0usize, usize::wrapping_add)
}

/// Deterministic suffix for a repository's display name.
pub fn name_suffix(repo_name: &str, repo_type: RepoType) -> &'static str {
    let suffixes = NAME_SUFFIXES.get(&repo_type).copied().unwrap_or(&["Major"]);
    suffixes[name_hash(repo_name) % suffixes.len()]
}

/// `"my-cool_repo"` → `"My Cool Repo"`.
fn title_case(name: &str) -> String {
    let words: Vec<String> = name
        .split(['-', '_', '.', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    if words.is_empty() {
        name.to_string()
    } else {
        words.join(" ")
    }
}

/// Display name of a repository's constellation, e.g. `"Star Map Aurora"`.
pub fn constellation_name(repo_name: &str, repo_type: RepoType) -> String {
    format!(
        "{} {}",
        title_case(repo_name),
        name_suffix(repo_name, repo_type)
    )
}
