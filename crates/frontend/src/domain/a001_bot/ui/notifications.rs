use super::use_host;
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn NotificationStack() -> impl IntoView {
    let host = use_host();

    view! {
        <div class="toast-stack">
            <For
                each=move || host.toasts.get()
                key=|toast| toast.id
                let:toast
            >
                {{
                    let id = toast.id;
                    let class = format!("toast toast--{}", toast.notification.kind.as_str());
                    view! {
                        <div class=class on:click=move |_| host.dismiss(id)>
                            {toast.notification.message.clone()}
                        </div>
                    }
                }}
            </For>
        </div>
    }
}
