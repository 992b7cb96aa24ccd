use crate::components::Icon;
use crate::config::TOAST_DURATION_MS;
use crate::utils::delay_ms;
use dioxus::prelude::*;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
}

/// On-screen toasts, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastStack {
    toasts: Vec<Toast>,
}

impl ToastStack {
    pub fn push(&mut self, title: &str, description: Option<&str>, variant: ToastVariant) -> Uuid {
        let id = Uuid::new_v4();
        self.toasts.push(Toast {
            id,
            title: title.to_string(),
            description: description.map(str::to_string),
            variant,
        });
        id
    }

    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

/// Context handle for raising toasts from any view.
#[derive(Clone, Copy, PartialEq)]
pub struct Toaster {
    stack: Signal<ToastStack>,
}

impl Toaster {
    pub fn new(stack: Signal<ToastStack>) -> Self {
        Self { stack }
    }

    /// Show a toast and schedule its removal.
    pub fn show(&self, title: &str, description: Option<&str>, variant: ToastVariant) {
        let mut stack = self.stack;
        let id = stack.write().push(title, description, variant);
        // Outlives the view that raised it.
        dioxus::dioxus_core::spawn_forever(async move {
            delay_ms(TOAST_DURATION_MS).await;
            stack.write().dismiss(id);
        });
    }

    pub fn success(&self, title: &str, description: &str) {
        self.show(title, Some(description), ToastVariant::Success);
    }

    pub fn error(&self, title: &str, description: &str) {
        self.show(title, Some(description), ToastVariant::Destructive);
    }

    pub fn dismiss(&self, id: Uuid) {
        let mut stack = self.stack;
        stack.write().dismiss(id);
    }
}

#[component]
pub fn ToastViewport() -> Element {
    let toaster = use_context::<Toaster>();
    let toasts = toaster.stack.read().toasts().to_vec();

    rsx! {
        div { class: "fixed top-4 right-4 z-50 flex flex-col gap-2 w-80",
            for toast in toasts {
                div {
                    key: "{toast.id}",
                    class: match toast.variant {
                        ToastVariant::Destructive => "rounded-xl border border-red-500/40 bg-red-950/90 p-4 shadow-xl",
                        ToastVariant::Success => "rounded-xl border border-emerald-500/40 bg-zinc-900/95 p-4 shadow-xl",
                        ToastVariant::Default => "rounded-xl border border-zinc-700 bg-zinc-900/95 p-4 shadow-xl",
                    },
                    div { class: "flex items-start justify-between gap-3",
                        div {
                            p { class: "text-sm font-semibold text-white", "{toast.title}" }
                            if let Some(description) = toast.description.clone() {
                                p { class: "text-xs text-zinc-300 mt-1", "{description}" }
                            }
                        }
                        button {
                            r#type: "button",
                            class: "text-zinc-400 hover:text-white transition-colors",
                            onclick: move |_| toaster.dismiss(toast.id),
                            Icon { name: "x".to_string(), class: "w-4 h-4".to_string() }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use std::cell::Cell;

    thread_local! {
        static SHOWN: Cell<usize> = const { Cell::new(0) };
    }

    fn raises_one_toast() -> Element {
        let stack = use_signal(ToastStack::default);
        use_hook(|| {
            Toaster::new(stack).error("Error", "Genre name cannot be empty.");
            SHOWN.with(|shown| shown.set(stack.peek().toasts().len()));
        });
        rsx! {}
    }

    #[test]
    fn show_schedules_dismissal_outside_the_caller() {
        let mut dom = VirtualDom::new(raises_one_toast);
        dom.rebuild_in_place();
        assert_eq!(SHOWN.with(Cell::get), 1);
    }

    #[test]
    fn push_keeps_order_and_dismiss_removes_one() {
        let mut stack = ToastStack::default();
        let first = stack.push("Saved", None, ToastVariant::Success);
        let second = stack.push("Oops", Some("try again"), ToastVariant::Destructive);
        assert_eq!(stack.toasts().len(), 2);
        assert_eq!(stack.toasts()[1].description.as_deref(), Some("try again"));

        assert!(stack.dismiss(first));
        assert!(!stack.dismiss(first));
        assert_eq!(stack.toasts().len(), 1);
        assert_eq!(stack.toasts()[0].id, second);
    }
}
