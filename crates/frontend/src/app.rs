use crate::domain::a001_bot::ui::BotsPage;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <BotsPage />
    }
}
