use crate::api::{ApiClient, ApiError, Genre};
use crate::components::{Icon, Toaster};
use crate::session::SessionHandle;
use dioxus::prelude::*;

const DUPLICATE_GENRE: &str = "Genre exists";

/// How a create-genre attempt should be reported.
#[derive(Debug, Clone, PartialEq)]
pub enum GenreOutcome {
    Added(Genre),
    Duplicate,
    Failed(String),
}

impl From<Result<Genre, ApiError>> for GenreOutcome {
    fn from(result: Result<Genre, ApiError>) -> Self {
        match result {
            Ok(genre) => GenreOutcome::Added(genre),
            Err(err) if err.is_rejection(DUPLICATE_GENRE) => GenreOutcome::Duplicate,
            Err(err) => GenreOutcome::Failed(err.to_string()),
        }
    }
}

#[component]
pub fn GenreManager(initial: Vec<Genre>) -> Element {
    let api = use_context::<ApiClient>();
    let session = use_context::<SessionHandle>();
    let toaster = use_context::<Toaster>();
    let mut genres = use_signal(|| initial.clone());
    let mut is_adding = use_signal(|| false);
    let mut genre_name = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    let on_add = move |_| {
        if submitting() {
            return;
        }
        let name = genre_name();
        if name.trim().is_empty() {
            toaster.error("Error", "Genre name cannot be empty.");
            return;
        }
        let api = api.clone();
        let token = session.access_token();
        spawn(async move {
            submitting.set(true);
            let outcome = GenreOutcome::from(api.create_genre(&name, token.as_deref()).await);
            submitting.set(false);
            match outcome {
                GenreOutcome::Added(genre) => {
                    toaster.success(
                        "Success",
                        &format!("Genre \"{}\" has been added successfully.", genre.name),
                    );
                    genres.write().push(genre);
                    genre_name.set(String::new());
                    is_adding.set(false);
                }
                GenreOutcome::Duplicate => toaster.error(
                    "Duplicate Genre",
                    "This genre already exists. Please try another name.",
                ),
                GenreOutcome::Failed(reason) => {
                    tracing::error!(%reason, "failed to add genre");
                    toaster.error("Error", "Failed to add genre. Please try again.");
                }
            }
        });
    };

    rsx! {
        div { class: "max-w-xl flex flex-col gap-4",
            div {
                h2 { class: "flex items-center gap-2 text-2xl font-bold text-pink-400",
                    Icon { name: "tag".to_string(), class: "w-5 h-5".to_string() }
                    "Manage Genres"
                }
                p { class: "text-sm text-zinc-400", "Make changes and view list to your genre here." }
            }
            div { class: "flex items-center justify-between",
                h3 { class: "text-white font-semibold", "List Genres" }
                button {
                    r#type: "button",
                    class: "flex items-center gap-2 px-3 py-2 rounded-md bg-pink-500 text-white text-sm hover:bg-pink-600 transition-colors",
                    onclick: move |_| is_adding.set(!is_adding()),
                    Icon { name: "plus".to_string(), class: "w-4 h-4".to_string() }
                    "Add Genre"
                }
            }
            if is_adding() {
                div { class: "flex items-center gap-2",
                    input {
                        r#type: "text",
                        placeholder: "Enter new genre",
                        value: "{genre_name}",
                        class: "flex-1 px-3 py-2 rounded-md bg-zinc-900 border border-zinc-700 text-white text-sm",
                        oninput: move |e| genre_name.set(e.value()),
                    }
                    button {
                        r#type: "button",
                        disabled: submitting(),
                        class: "px-3 py-2 rounded-md bg-zinc-800 text-pink-400 hover:bg-zinc-700 transition-colors",
                        onclick: on_add,
                        if submitting() {
                            Icon { name: "loader".to_string(), class: "w-5 h-5".to_string() }
                        } else {
                            "Save"
                        }
                    }
                }
            }
            ul { class: "flex flex-col gap-1",
                for genre in genres() {
                    li {
                        key: "{genre.genre_id}",
                        class: "px-3 py-2 rounded-md bg-zinc-900/60 text-sm text-white",
                        "{genre.name}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_rejection_is_recognised() {
        let outcome = GenreOutcome::from(Err(ApiError::Rejected {
            status: 400,
            message: "Genre exists".into(),
        }));
        assert_eq!(outcome, GenreOutcome::Duplicate);
    }

    #[test]
    fn other_failures_are_generic() {
        let outcome = GenreOutcome::from(Err(ApiError::Network("offline".into())));
        assert!(matches!(outcome, GenreOutcome::Failed(_)));

        let outcome = GenreOutcome::from(Err(ApiError::Rejected {
            status: 500,
            message: "boom".into(),
        }));
        assert!(matches!(outcome, GenreOutcome::Failed(_)));
    }

    #[test]
    fn success_carries_genre() {
        let genre = Genre {
            genre_id: "g1".into(),
            name: "Jazz".into(),
        };
        assert_eq!(
            GenreOutcome::from(Ok(genre.clone())),
            GenreOutcome::Added(genre)
        );
    }
}
