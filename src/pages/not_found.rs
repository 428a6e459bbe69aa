use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="page centered">
            <div class="not-found">
                <h1>"404"</h1>
                <h2>"Page not found"</h2>
                <p>"The page you are looking for does not exist."</p>
                <A href="/" attr:class="btn btn-primary">"Back to Products"</A>
            </div>
        </div>
    }
}
