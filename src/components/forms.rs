//! Form Components
//!
//! Labelled inputs with inline validation messages.

use leptos::prelude::*;

fn control_class(has_error: bool) -> &'static str {
    if has_error {
        "form-control has-error"
    } else {
        "form-control"
    }
}

/// Field error text; renders nothing without a message
#[component]
pub fn FormError(#[prop(optional, into)] error: MaybeProp<String>) -> impl IntoView {
    move || {
        error
            .get()
            .filter(|message| !message.is_empty())
            .map(|message| view! { <p class="form-error" role="alert">{message}</p> })
    }
}

/// Label, required marker, help text and error around a control
///
/// Help text is hidden while an error is shown.
#[component]
pub fn FormField(
    #[prop(optional, into)] label: MaybeProp<String>,
    #[prop(optional, into)] html_for: MaybeProp<String>,
    #[prop(optional)] required: bool,
    #[prop(optional, into)] error: MaybeProp<String>,
    #[prop(optional, into)] help_text: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="form-field">
            {move || label.get().map(|text| view! {
                <label class="form-label" for=html_for.get()>
                    {text}
                    {required.then(|| view! { <span class="required-marker">"*"</span> })}
                </label>
            })}
            {children()}
            {move || {
                help_text
                    .get()
                    .filter(|_| error.get().is_none())
                    .map(|text| view! { <p class="form-help">{text}</p> })
            }}
            <FormError error=error />
        </div>
    }
}

#[component]
pub fn FormInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] label: Option<String>,
    #[prop(optional)] required: bool,
    #[prop(optional, into)] error: MaybeProp<String>,
    #[prop(optional, into)] help_text: Option<String>,
    #[prop(into, default = "text".to_string())] input_type: String,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional, into)] autocomplete: Option<String>,
    #[prop(optional, into)] min: Option<String>,
    #[prop(optional, into)] step: Option<String>,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
) -> impl IntoView {
    view! {
        <FormField label=label html_for=id.clone() required=required error=error help_text=help_text>
            <input
                id=id
                type=input_type
                class=move || control_class(error.get().is_some())
                placeholder=placeholder
                autocomplete=autocomplete
                min=min
                step=step
                disabled=move || disabled.get().unwrap_or(false)
                aria-invalid=move || if error.get().is_some() { "true" } else { "false" }
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </FormField>
    }
}

#[component]
pub fn FormTextarea(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] label: Option<String>,
    #[prop(optional)] required: bool,
    #[prop(optional, into)] error: MaybeProp<String>,
    #[prop(optional, into)] help_text: Option<String>,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(default = 4)] rows: u32,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
) -> impl IntoView {
    view! {
        <FormField label=label html_for=id.clone() required=required error=error help_text=help_text>
            <textarea
                id=id
                class=move || control_class(error.get().is_some())
                placeholder=placeholder
                rows=rows
                disabled=move || disabled.get().unwrap_or(false)
                aria-invalid=move || if error.get().is_some() { "true" } else { "false" }
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            ></textarea>
        </FormField>
    }
}

/// Select over `(value, label)` pairs
///
/// The placeholder option carries an empty value and cannot be re-selected.
#[component]
pub fn FormSelect(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] label: Option<String>,
    #[prop(optional)] required: bool,
    #[prop(optional, into)] error: MaybeProp<String>,
    #[prop(optional, into)] help_text: Option<String>,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
) -> impl IntoView {
    view! {
        <FormField label=label html_for=id.clone() required=required error=error help_text=help_text>
            <select
                id=id
                class=move || control_class(error.get().is_some())
                disabled=move || disabled.get().unwrap_or(false)
                aria-invalid=move || if error.get().is_some() { "true" } else { "false" }
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {placeholder.map(|text| view! {
                    <option value="" disabled=true selected=move || value.get().is_empty()>{text}</option>
                })}
                {move || options.get().into_iter().map(|(option_value, option_label)| {
                    let selected = option_value.clone();
                    view! {
                        <option value=option_value selected=move || value.get() == selected>
                            {option_label}
                        </option>
                    }
                }).collect_view()}
            </select>
        </FormField>
    }
}
