use crate::session::use_session;
use crate::web::router::use_router;
use assetdesk::{AppRoute, LOGIN_PATH, RuntimeConfig};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 已登录页面的外框：顶栏、导航与退出
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let config = use_context::<RuntimeConfig>().unwrap_or_default();
    let user = session.user_signal();
    let (logging_out, set_logging_out) = signal(false);

    let on_logout = move |_| {
        set_logging_out.set(true);
        spawn_local(async move {
            session.store().logout().await;
            set_logging_out.set(false);
            router.navigate(LOGIN_PATH);
        });
    };

    let nav_item = move |route: AppRoute, label: &'static str| {
        let active = move || router.current_route().get() == Some(route);
        view! {
            <li>
                <a
                    class=move || if active() { "active" } else { "" }
                    on:click=move |_| router.navigate(route.to_path())
                >
                    {label}
                </a>
            </li>
        }
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow-sm">
                <div class="flex-1">
                    <span class="text-xl font-bold px-2">{config.app_name.clone()}</span>
                    <ul class="menu menu-horizontal px-1">
                        {nav_item(AppRoute::BarcodeSummary, "条码汇总")}
                        {nav_item(AppRoute::Dashboard, "仪表盘")}
                    </ul>
                </div>
                <div class="flex-none gap-2">
                    <span class="text-sm">
                        {move || user.get().map(|u| u.display_name()).unwrap_or_default()}
                    </span>
                    <button
                        class="btn btn-ghost btn-sm"
                        disabled=move || logging_out.get()
                        on:click=on_logout
                    >
                        "退出登录"
                    </button>
                </div>
            </div>
            <main class="p-6">{children()}</main>
        </div>
    }
}
