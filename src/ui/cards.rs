// Project card rendering.
// Ranks the listing and maps each repository to an HTML card fragment.

use chrono::{DateTime, Utc};

use crate::github::Repository;

use super::colors::language_color;
use super::format::{format_number, format_relative_date};
use super::locale::Locale;

/// Maximum number of cards shown.
pub const MAX_CARDS: usize = 12;

const BOOK_ICON: &str = r#"<svg class="project-card__icon" viewBox="0 0 16 16" width="16" height="16"><path fill-rule="evenodd" d="M2 2.5A2.5 2.5 0 014.5 0h8.75a.75.75 0 01.75.75v12.5a.75.75 0 01-.75.75h-2.5a.75.75 0 110-1.5h1.75v-2h-8a1 1 0 00-.714 1.7.75.75 0 01-1.072 1.05A2.495 2.495 0 012 11.5v-9zm10.5-1V9h-8c-.356 0-.694.074-1 .208V2.5a1 1 0 011-1h8zM5 12.25v3.25a.25.25 0 00.4.2l1.45-1.087a.25.25 0 01.3 0L8.6 15.7a.25.25 0 00.4-.2v-3.25a.25.25 0 00-.25-.25h-3.5a.25.25 0 00-.25.25z" fill="currentColor"></path></svg>"#;

const STAR_ICON: &str = r#"<svg viewBox="0 0 16 16" width="14" height="14"><path fill-rule="evenodd" d="M8 .25a.75.75 0 01.673.418l1.882 3.815 4.21.612a.75.75 0 01.416 1.279l-3.046 2.97.719 4.192a.75.75 0 01-1.088.791L8 12.347l-3.766 1.98a.75.75 0 01-1.088-.79l.72-4.194L.818 6.374a.75.75 0 01.416-1.28l4.21-.611L7.327.668A.75.75 0 018 .25z" fill="currentColor"></path></svg>"#;

const FORK_ICON: &str = r#"<svg viewBox="0 0 16 16" width="14" height="14"><path fill-rule="evenodd" d="M5 3.25a.75.75 0 11-1.5 0 .75.75 0 011.5 0zm0 2.122a2.25 2.25 0 10-1.5 0v.878A2.25 2.25 0 005.75 8.5h1.5v2.128a2.251 2.251 0 101.5 0V8.5h1.5a2.25 2.25 0 002.25-2.25v-.878a2.25 2.25 0 10-1.5 0v.878a.75.75 0 01-.75.75h-4.5A.75.75 0 015 6.25v-.878zm3.75 7.378a.75.75 0 11-1.5 0 .75.75 0 011.5 0zm3-8.75a.75.75 0 100-1.5.75.75 0 000 1.5z" fill="currentColor"></path></svg>"#;

/// Drop forks, order by stars (descending, stable), and keep at most `max`.
pub fn rank_repos(repos: &[Repository], max: usize) -> Vec<&Repository> {
    let mut ranked: Vec<&Repository> = repos.iter().filter(|repo| !repo.fork).collect();
    ranked.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    ranked.truncate(max);
    ranked
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_language(language: Option<&str>) -> String {
    match language {
        Some(language) => format!(
            r#"<span class="project-language"><span class="language-dot" style="background-color: {}"></span>{}</span>"#,
            language_color(language),
            escape_html(language)
        ),
        None => String::new(),
    }
}

/// Render one repository as a project card.
pub fn render_card(repo: &Repository, now: &DateTime<Utc>, locale: Locale) -> String {
    let description = match repo.description.as_deref() {
        Some(text) if !text.is_empty() => escape_html(text),
        _ => locale.no_description().to_string(),
    };

    let updated = repo
        .last_activity()
        .map(|at| {
            format!(
                r#"<span class="project-card__update">{} {}</span>"#,
                locale.updated_prefix(),
                format_relative_date(&at, now, locale)
            )
        })
        .unwrap_or_default();

    format!(
        concat!(
            r#"<div class="project-card"><div class="project-card__inner">"#,
            r#"<div class="project-card__header">{icon}"#,
            r#"<a href="{url}" target="_blank" rel="noopener noreferrer" class="project-card__title">{name}</a>"#,
            r#"</div>"#,
            r#"<p class="project-card__desc">{description}</p>"#,
            r#"<div class="project-card__meta">{language}"#,
            r#"<span class="project-card__stat">{star_icon}{stars}</span>"#,
            r#"<span class="project-card__stat">{fork_icon}{forks}</span>"#,
            r#"{updated}</div>"#,
            r#"</div></div>"#,
        ),
        icon = BOOK_ICON,
        url = escape_html(&repo.html_url),
        name = escape_html(&repo.name),
        description = description,
        language = render_language(repo.language.as_deref()),
        star_icon = STAR_ICON,
        stars = format_number(repo.stargazers_count),
        fork_icon = FORK_ICON,
        forks = format_number(repo.forks_count),
        updated = updated,
    )
}
