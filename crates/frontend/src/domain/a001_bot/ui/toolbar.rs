use super::use_controller;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// Page header with the create / export / import actions
#[component]
#[allow(non_snake_case)]
pub fn Toolbar() -> impl IntoView {
    let controller = use_controller();
    let file_input_ref = NodeRef::<leptos::html::Input>::new();

    let handle_create = {
        let controller = controller.clone();
        move |_| controller.open_create_form()
    };

    let handle_export = {
        let controller = controller.clone();
        move |_| {
            controller.export();
        }
    };

    let handle_import_click = move |_| {
        if let Some(input) = file_input_ref.get() {
            input.click();
        }
    };

    let handle_file_change = move |_| {
        let Some(input) = file_input_ref.get() else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // Allow picking the same file again
        input.set_value("");

        let controller = controller.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match wasm_bindgen_futures::JsFuture::from(file.text()).await {
                Ok(text) => {
                    let text = text.as_string().unwrap_or_default();
                    controller.import(&text).await;
                }
                Err(e) => log::error!("Error reading {}: {:?}", file.name(), e),
            }
        });
    };

    view! {
        <header class="header">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <Flex align=FlexAlign::Center style="gap: 8px;">
                    {icon("chat")}
                    <h1 style="font-size: 24px; font-weight: bold;">"MyBots"</h1>
                </Flex>
                <Space>
                    <Button appearance=ButtonAppearance::Primary on_click=handle_create>
                        {icon("plus")}
                        " Create New Bot"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=handle_export>
                        {icon("download")}
                        " Export"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=handle_import_click>
                        {icon("upload")}
                        " Import"
                    </Button>
                </Space>
            </Flex>
            <input
                type="file"
                accept=".json,application/json"
                style="display: none;"
                node_ref=file_input_ref
                on:change=handle_file_change
            />
        </header>
    }
}
