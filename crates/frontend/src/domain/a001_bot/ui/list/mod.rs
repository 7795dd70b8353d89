use super::{use_controller, use_host};
use crate::domain::a001_bot::view_model::{
    bot_cards, BotCardAction, ACTION_CHAT, ACTION_DELETE, ACTION_EDIT, ATTR_ACTION, ATTR_BOT_ID,
};
use leptos::prelude::*;
use wasm_bindgen::JsCast;

#[component]
#[allow(non_snake_case)]
pub fn BotList() -> impl IntoView {
    let host = use_host();
    let controller = use_controller();
    let cards = Memo::new(move |_| host.state.with(bot_cards));

    // One delegated handler for every card button
    let handle_click = move |ev: web_sys::MouseEvent| {
        let Some(action) = action_from_event(&ev) else {
            return;
        };
        let controller = controller.clone();
        match action {
            BotCardAction::Chat(id) => wasm_bindgen_futures::spawn_local(async move {
                controller.select_bot(&id).await;
            }),
            BotCardAction::Edit(id) => controller.open_edit_form(&id),
            BotCardAction::Delete(id) => wasm_bindgen_futures::spawn_local(async move {
                controller.delete(&id).await;
            }),
        }
    };

    view! {
        <aside class="sidebar">
            <h2>"Your Bots"</h2>
            <div class="bot-list" on:click=handle_click>
                {move || {
                    let cards = cards.get();
                    if cards.is_empty() {
                        view! {
                            <p style="color: #999; text-align: center; padding: 20px;">
                                "No bots yet. Create your first bot!"
                            </p>
                        }
                            .into_any()
                    } else {
                        cards
                            .into_iter()
                            .map(|card| {
                                let class = card.class();
                                let id = card.id.to_string();
                                view! {
                                    <div class=class data-bot-id=id>
                                        <h3>{card.name}</h3>
                                        <p>
                                            <strong>"Personality: "</strong>
                                            {card.personality_preview}
                                        </p>
                                        <div class="bot-card-actions">
                                            <button class="btn btn-primary btn-small" data-action=ACTION_CHAT>
                                                "Chat"
                                            </button>
                                            <button class="btn btn-secondary btn-small" data-action=ACTION_EDIT>
                                                "Edit"
                                            </button>
                                            <button class="btn btn-danger btn-small" data-action=ACTION_DELETE>
                                                "Delete"
                                            </button>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }
                }}
            </div>
        </aside>
    }
}

fn action_from_event(ev: &web_sys::MouseEvent) -> Option<BotCardAction> {
    let target = ev.target()?.dyn_into::<web_sys::Element>().ok()?;
    let button = target.closest(&format!("[{ATTR_ACTION}]")).ok()??;
    let card = button.closest(&format!("[{ATTR_BOT_ID}]")).ok()??;
    let action = button.get_attribute(ATTR_ACTION)?;
    let id = card.get_attribute(ATTR_BOT_ID)?;
    BotCardAction::from_data_attrs(&action, &id)
}
