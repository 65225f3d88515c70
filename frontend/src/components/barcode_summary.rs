use leptos::prelude::*;

#[component]
pub fn BarcodeSummaryView() -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">"条码汇总"</h2>
                <p class="text-base-content/70">"暂无数据"</p>
            </div>
        </div>
    }
}
