use maud::{html, Markup};

use crate::models::Node;
use crate::tree::{self, Walk};
use crate::{names, utils};

/// Render the walk at its current position: a question card with option
/// buttons, or the recommendation once a leaf is reached.
pub fn walk(walk: &Walk) -> Markup {
    let current = walk.current();
    html! {
        (breadcrumb(walk.path()))

        @if current.is_leaf {
            (recommendation(walk, current))
        } @else {
            (question(walk, current))
        }

        (nav_buttons(walk))
    }
}

fn breadcrumb(path: &[&Node]) -> Markup {
    html! {
        p."breadcrumb secondary" {
            @for (idx, node) in path.iter().enumerate() {
                @if idx > 0 { span."breadcrumb-sep" { " › " } }
                @if idx == path.len() - 1 {
                    strong { (utils::truncate(&node.question, names::BREADCRUMB_MAX_CHARS)) }
                } @else {
                    (utils::truncate(&node.question, names::BREADCRUMB_MAX_CHARS))
                }
            }
        }
    }
}

fn question(walk: &Walk, current: &Node) -> Markup {
    let path_ids: Vec<&str> = walk.path().iter().map(|n| n.id.as_str()).collect();

    html! {
        article {
            h2 { (current.question) }

            div."option-grid" {
                @for option in &current.options {
                    @if let Some(next_id) = option.next_node_id.as_deref() {
                        button."option-btn outline"
                               hx-get=(advance_url(&path_ids, next_id))
                               hx-target="main"
                               hx-swap="innerHTML"
                               hx-push-url="true" {
                            (option.text)
                        }
                    } @else {
                        button."option-btn outline" disabled { (option.text) }
                    }
                }
            }
        }
    }
}

fn recommendation(walk: &Walk, current: &Node) -> Markup {
    let share = names::walk_url(&tree::share_query(walk.path()));

    html! {
        article."result" {
            h2 { (current.question) }
            @if let Some(recommendation) = &current.recommendation {
                h3."result-title" { (recommendation) }
            }
            @if let Some(description) = &current.description {
                p { (description) }
            }
            @if let Some(level) = &current.skill_level {
                p { small { "Skill level: " mark { (level.label()) } } }
            }

            @if !current.pros.is_empty() || !current.cons.is_empty() {
                div."pros-cons" {
                    @if !current.pros.is_empty() {
                        div {
                            h4 { "Pros" }
                            ul { @for pro in &current.pros { li { (pro) } } }
                        }
                    }
                    @if !current.cons.is_empty() {
                        div {
                            h4 { "Cons" }
                            ul { @for con in &current.cons { li { (con) } } }
                        }
                    }
                }
            }

            @if !current.learning_resources.is_empty() {
                h4 { "Learning resources" }
                ul {
                    @for resource in &current.learning_resources {
                        li {
                            a href=(resource.url) target="_blank" rel="noopener" {
                                (resource.title)
                            }
                            " " small { "(" (resource.kind.label()) ")" }
                        }
                    }
                }
            }

            @if !walk.answers().is_empty() {
                details {
                    summary { "Your answers" }
                    ol {
                        @for answer in walk.answers() { li { (answer) } }
                    }
                }
            }

            div."why-box" {
                h4 { "Why this solution?" }
                p { "Based on your selections, this solution aligns best with your needs and requirements." }
            }

            div."share-box" {
                input id="share-url" readonly value=(share);
                button."secondary"
                       onclick="navigator.clipboard.writeText(location.origin + document.getElementById('share-url').value)" {
                    "Copy share link"
                }
            }
        }
    }
}

fn nav_buttons(walk: &Walk) -> Markup {
    let path_ids: Vec<&str> = walk.path().iter().map(|n| n.id.as_str()).collect();

    html! {
        div."walk-nav" {
            @if path_ids.len() > 1 {
                button."secondary"
                       hx-get=(back_url(&path_ids))
                       hx-target="main"
                       hx-swap="innerHTML"
                       hx-push-url="true" {
                    "Back"
                }
            }
            button hx-get="/"
                   hx-target="main"
                   hx-swap="innerHTML"
                   hx-push-url="true" {
                "Start Over"
            }
        }
    }
}

fn advance_url(path_ids: &[&str], next_id: &str) -> String {
    let mut ids = path_ids.to_vec();
    ids.push(next_id);
    names::walk_url(&tree::share_query_ids(&ids))
}

fn back_url(path_ids: &[&str]) -> String {
    names::walk_url(&tree::share_query_ids(&path_ids[..path_ids.len() - 1]))
}
