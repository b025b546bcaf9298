//! Toast notifications
//!
//! [`ToastQueue`] is plain data; [`ToastContext`] wraps it in a signal and
//! dismisses each toast after [`TOAST_DURATION_MS`].

use leptos::prelude::*;

use crate::utils::constants::TOAST_DURATION_MS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Default,
    Destructive,
}

/// Link rendered next to the toast text
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastAction {
    pub label: String,
    pub href: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
    pub action: Option<ToastAction>,
}

#[derive(Clone, Debug, Default)]
pub struct ToastQueue {
    next_id: u64,
    items: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(
        &mut self,
        kind: ToastKind,
        title: impl Into<String>,
        description: impl Into<String>,
        action: Option<ToastAction>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast {
            id,
            kind,
            title: title.into(),
            description: description.into(),
            action,
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    pub queue: RwSignal<ToastQueue>,
}

impl ToastContext {
    pub fn show(&self, kind: ToastKind, title: &str, description: &str, action: Option<ToastAction>) {
        let id = self
            .queue
            .try_update(|q| q.push(kind, title, description, action))
            .unwrap_or_default();

        let queue = self.queue;
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_DURATION_MS).await;
            queue.try_update(|q| q.dismiss(id));
        });
    }

    pub fn info(&self, title: &str, description: &str, action: Option<ToastAction>) {
        self.show(ToastKind::Default, title, description, action);
    }

    pub fn error(&self, title: &str, description: &str) {
        self.show(ToastKind::Destructive, title, description, None);
    }
}

pub fn provide_toast_context() -> ToastContext {
    let context = ToastContext {
        queue: RwSignal::new(ToastQueue::default()),
    };
    provide_context(context);
    context
}

pub fn use_toast() -> ToastContext {
    expect_context::<ToastContext>()
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_toast();

    view! {
        <div class="toast-viewport">
            <For
                each=move || toasts.queue.with(|q| q.items().to_vec())
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = match toast.kind {
                        ToastKind::Default => "toast",
                        ToastKind::Destructive => "toast toast-destructive",
                    };
                    view! {
                        <div class=class role="status">
                            <div class="toast-body">
                                <p class="toast-title">{toast.title}</p>
                                <p class="toast-description">{toast.description}</p>
                            </div>
                            {toast.action.map(|action| view! {
                                <a class="toast-action" href=action.href target="_blank" rel="noopener noreferrer">
                                    {action.label}
                                </a>
                            })}
                            <button
                                class="toast-close"
                                on:click=move |_| toasts.queue.update(|q| q.dismiss(id))
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
