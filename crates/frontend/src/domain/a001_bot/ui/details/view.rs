//! Bot form - View Component

use super::super::{use_controller, use_host};
use super::view_model::BotFormVm;
use crate::domain::a001_bot::state::BotFormTarget;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn BotFormModal() -> impl IntoView {
    let host = use_host();
    let controller = use_controller();
    let vm = BotFormVm::new();
    let target = Memo::new(move |_| host.state.with(|s| s.form.clone()));

    // Refill the fields whenever the form opens for another target
    Effect::new(move |_| {
        if target.get().is_some() {
            host.state.with_untracked(|s| vm.load(s.form_bot()));
        }
    });

    let on_close = Callback::new({
        let controller = controller.clone();
        move |_: ()| controller.close_form()
    });

    let handle_save = move |_: leptos::ev::MouseEvent| {
        let controller = controller.clone();
        let fields = vm.to_fields();
        wasm_bindgen_futures::spawn_local(async move {
            controller.submit_form(fields).await;
        });
    };

    view! {
        {move || {
            let handle_save = handle_save.clone();
            target
                .get()
                .map(|target| {
                    let title = match target {
                        BotFormTarget::Create => "Create New Bot",
                        BotFormTarget::Edit(_) => "Edit Bot",
                    };
                    view! {
                        <Modal title=title.to_string() on_close=on_close>
                            <div class="form__group">
                                <label class="form__label">
                                    "Bot Name"
                                    <span style="color: red;">"*"</span>
                                </label>
                                <Input value=vm.name placeholder="e.g. Friendly Helper" />
                            </div>

                            <div class="form__group">
                                <label class="form__label">
                                    "Personality"
                                    <span style="color: red;">"*"</span>
                                </label>
                                <Textarea
                                    value=vm.personality
                                    placeholder="e.g. Friendly, enthusiastic and always positive"
                                />
                            </div>

                            <div class="form__group">
                                <label class="form__label">
                                    "System Prompt"
                                    <span style="color: red;">"*"</span>
                                </label>
                                <Textarea
                                    value=vm.prompt
                                    placeholder="You are a helpful assistant who..."
                                    attr:style="min-height: 120px;"
                                />
                            </div>

                            <Flex justify=FlexJustify::End style="gap: 8px; margin-top: 16px;">
                                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                                    {icon("close")}
                                    " Cancel"
                                </Button>
                                <Button appearance=ButtonAppearance::Primary on_click=handle_save.clone()>
                                    {icon("save")}
                                    " Save Bot"
                                </Button>
                            </Flex>
                        </Modal>
                    }
                })
        }}
    }
}
