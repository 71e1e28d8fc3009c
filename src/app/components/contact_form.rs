//! Contact form with inline validation and a mailto fallback.

use dioxus::prelude::*;

use crate::config::ContactConfig;
use crate::form::{ContactForm, Field, FieldError};

/// Submit button lifecycle
#[derive(Clone, Copy, Debug, PartialEq)]
enum SubmitState {
    Idle,
    Sending,
    Sent,
}

impl SubmitState {
    fn label(&self) -> &'static str {
        match self {
            SubmitState::Idle => "Send Message",
            SubmitState::Sending => "Sending...",
            SubmitState::Sent => "Sent! ✓",
        }
    }
}

fn error_for(errors: &[FieldError], field: Field) -> Option<FieldError> {
    errors.iter().copied().find(|e| e.field() == field)
}

/// A labeled input with its inline error message.
#[component]
fn FormField(
    field: Field,
    caption: &'static str,
    value: String,
    error: Option<FieldError>,
    #[props(default = false)] multiline: bool,
    on_input: EventHandler<String>,
    on_blur: EventHandler<()>,
) -> Element {
    let id = field.id();
    let message = error.map(|e| e.to_string()).unwrap_or_default();
    let class = if error.is_some() { "input input--invalid" } else { "input" };
    let input_type = if field == Field::Email { "email" } else { "text" };

    rsx! {
        div { class: "form__field",
            label { r#for: id, "{caption}" }
            if multiline {
                textarea {
                    id,
                    class,
                    rows: "5",
                    value: "{value}",
                    oninput: move |evt| on_input.call(evt.value()),
                    onblur: move |_| on_blur.call(()),
                }
            } else {
                input {
                    id,
                    class,
                    r#type: input_type,
                    value: "{value}",
                    oninput: move |evt| on_input.call(evt.value()),
                    onblur: move |_| on_blur.call(()),
                }
            }
            span { class: "error", "{message}" }
        }
    }
}

#[component]
pub fn ContactSection(contact: ContactConfig) -> Element {
    let mut form = use_signal(ContactForm::default);
    let mut errors = use_signal(Vec::<FieldError>::new);
    let mut status = use_signal(|| SubmitState::Idle);

    let mut validate = move || match form.read().validate() {
        Ok(()) => {
            errors.set(Vec::new());
            true
        }
        Err(found) => {
            errors.set(found);
            false
        }
    };

    let mut edit = move |field: Field, value: String| {
        // Typing clears that field's error; full validation waits for blur/submit
        if !value.trim().is_empty() {
            errors.write().retain(|e| e.field() != field);
        }
        *form.write().value_mut(field) = value;
        if status() == SubmitState::Sent {
            status.set(SubmitState::Idle);
        }
    };

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if !validate() {
            return;
        }
        status.set(SubmitState::Sending);
        let href = form.read().mailto_href(&contact);
        tracing::info!("Contact form valid, opening mail client");
        #[cfg(target_arch = "wasm32")]
        crate::app::dom::navigate(&href);
        #[cfg(not(target_arch = "wasm32"))]
        tracing::debug!("mailto link: {}", href);
        form.set(ContactForm::default());
        status.set(SubmitState::Sent);
    };

    let current = form();
    let found = errors();
    let state = status();
    let button_label = state.label();

    rsx! {
        section { id: "contact", class: "contact", "data-animate": "fade-up",
            h2 { "Get in touch" }
            form { id: "contact-form", novalidate: true, onsubmit: on_submit,
                FormField {
                    field: Field::Name,
                    caption: "Name",
                    value: current.value(Field::Name).to_string(),
                    error: error_for(&found, Field::Name),
                    on_input: move |v| edit(Field::Name, v),
                    on_blur: move |_| { validate(); },
                }
                FormField {
                    field: Field::Email,
                    caption: "Email",
                    value: current.value(Field::Email).to_string(),
                    error: error_for(&found, Field::Email),
                    on_input: move |v| edit(Field::Email, v),
                    on_blur: move |_| { validate(); },
                }
                FormField {
                    field: Field::Message,
                    caption: "Message",
                    multiline: true,
                    value: current.value(Field::Message).to_string(),
                    error: error_for(&found, Field::Message),
                    on_input: move |v| edit(Field::Message, v),
                    on_blur: move |_| { validate(); },
                }
                button {
                    class: "button",
                    r#type: "submit",
                    disabled: state == SubmitState::Sending,
                    "{button_label}"
                }
            }
        }
    }
}
