use crate::session::use_session;
use leptos::prelude::*;

#[component]
pub fn DashboardView() -> impl IntoView {
    let user = use_session().user_signal();

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">"仪表盘"</h2>
                <p>
                    {move || match user.get() {
                        Some(u) => format!("欢迎, {}", u.display_name()),
                        None => "欢迎".to_string(),
                    }}
                </p>
                <Show when=move || user.get().map(|u| u.is_staff()).unwrap_or(false)>
                    <div class="badge badge-secondary">"管理员"</div>
                </Show>
            </div>
        </div>
    }
}
