use super::super::{use_controller, use_host};
use crate::domain::a001_bot::view_model::chat_messages;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn ChatPane() -> impl IntoView {
    let host = use_host();
    let controller = use_controller();
    let draft = RwSignal::new(String::new());
    let messages_container_ref = NodeRef::<leptos::html::Div>::new();

    let visible = Memo::new(move |_| host.state.with(|s| s.chat_visible()));
    let bot_name = Memo::new(move |_| {
        host.state
            .with(|s| s.current_bot().map(|b| b.name.clone()).unwrap_or_default())
    });
    let messages = Memo::new(move |_| host.state.with(|s| chat_messages(&s.chat)));
    let input_disabled = Signal::derive(move || host.state.with(|s| !s.input_enabled));

    // Keep the newest message in view
    Effect::new(move |_| {
        messages.track();
        if let Some(container) = messages_container_ref.get() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    let handle_send = Callback::new({
        let controller = controller.clone();
        move |_: ()| {
            let text = draft.get_untracked();
            let Some(pending) = controller.start_send(&text) else {
                return;
            };
            draft.set(String::new());
            let controller = controller.clone();
            wasm_bindgen_futures::spawn_local(async move {
                controller.finish_send(pending).await;
            });
        }
    });

    let handle_clear = Callback::new(move |_: ()| {
        let Some(id) = host.state.with_untracked(|s| s.current_bot_id.clone()) else {
            return;
        };
        let controller = controller.clone();
        wasm_bindgen_futures::spawn_local(async move {
            controller.clear_chat(&id).await;
        });
    });

    view! {
        <section class="chat-section">
            <Show
                when=move || visible.get()
                fallback=|| view! {
                    <div class="no-bot-selected">
                        <p>"Select a bot to start chatting"</p>
                    </div>
                }
            >
                <div class="chat-area">
                    <Flex
                        justify=FlexJustify::SpaceBetween
                        align=FlexAlign::Center
                        style="padding-bottom: 12px; border-bottom: 1px solid var(--colorNeutralStroke2);"
                    >
                        <h2 style="font-size: 18px; font-weight: bold;">{move || bot_name.get()}</h2>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| handle_clear.run(())>
                            {icon("delete")}
                            " Clear Chat"
                        </Button>
                    </Flex>

                    <div class="chat-messages" node_ref=messages_container_ref>
                        {move || {
                            messages
                                .get()
                                .into_iter()
                                .map(|msg| {
                                    view! {
                                        <div class=msg.class>
                                            <div class="message-content">{msg.text}</div>
                                            <div class="message-time">{msg.time}</div>
                                        </div>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>

                    <Flex style="gap: 8px; align-items: flex-end;">
                        <div style="flex: 1;">
                            <Textarea
                                value=draft
                                placeholder="Type your message..."
                                attr:style="width: 100%; min-height: 48px; max-height: 200px; resize: vertical;"
                                disabled=input_disabled
                                on:keydown=move |ev: web_sys::KeyboardEvent| {
                                    if ev.key() == "Enter" && !ev.shift_key() {
                                        ev.prevent_default();
                                        handle_send.run(());
                                    }
                                }
                            />
                        </div>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=input_disabled
                            on_click=move |_| handle_send.run(())
                        >
                            {icon("send")}
                            " Send"
                        </Button>
                    </Flex>
                </div>
            </Show>
        </section>
    }
}
