//! Overlays drawn above the content region: form dialogs, the toast and the
//! confirmation prompt.

use maud::{Markup, html};

use crate::{
    core::db::{PropertyKind, PropertyRepository, TenantRepository},
    gui::{
        forms::{Choices, FieldSpec, InputKind},
        message::Message,
        state::{Confirm, Modal, Toast},
        widgets::RenderContext,
    },
};

fn options(ctx: &RenderContext<'_>, choices: Choices) -> Vec<(String, String)> {
    match choices {
        Choices::PropertyKinds => PropertyKind::ALL
            .into_iter()
            .map(|k| (k.form_value().to_string(), k.label().to_string()))
            .collect(),
        Choices::Properties => ctx
            .db
            .properties()
            .iter()
            .map(|p| (p.id.to_string(), p.display_name()))
            .collect(),
        Choices::Tenants => ctx
            .db
            .tenants()
            .iter()
            .map(|t| (t.id.to_string(), t.name.clone()))
            .collect(),
    }
}

fn field(ctx: &RenderContext<'_>, modal: &Modal, spec: &'static FieldSpec) -> Markup {
    let value = modal.data.raw(spec.name);
    let error = modal.errors.get(spec.name);
    let bind = ctx.on_input(modal.id, spec.name);
    let dom_id = format!("{}-{}", modal.id, spec.name);
    html! {
        div.mobile-form-group.has-error[error.is_some()] {
            label.mobile-form-label for=(dom_id) {
                (spec.label) @if spec.required { " *" }
            }
            @match spec.input {
                InputKind::Select { choices, placeholder } => {
                    select.mobile-form-control id=(dom_id) name=(spec.name)
                        required[spec.required] data-bind=(bind) {
                        option value="" { (placeholder) }
                        @for (choice, text) in options(ctx, choices) {
                            option value=(choice) selected[choice == value] { (text) }
                        }
                    }
                }
                InputKind::Number { min, max, step } => {
                    input.mobile-form-control id=(dom_id) type="number"
                        name=(spec.name) value=(value) min=[min] max=[max] step=[step]
                        required[spec.required] data-bind=(bind);
                }
                kind => {
                    input.mobile-form-control id=(dom_id) type=(kind.html_type())
                        name=(spec.name) value=(value) placeholder=[spec.placeholder]
                        maxlength=[spec.max_length] required[spec.required] data-bind=(bind);
                }
            }
            @if let Some(error) = error {
                div.mobile-form-error { (error.to_string()) }
            }
        }
    }
}

/// A form dialog. Closing dialogs stay in the page, without `active`, until
/// their exit animation has played.
pub fn modal(ctx: &RenderContext<'_>, modal: &Modal) -> Markup {
    let spec = modal.kind.spec();
    html! {
        div.mobile-modal.active[!modal.closing] id=(spec.dom_id) data-modal=(modal.id.to_string()) {
            div.mobile-modal-header {
                h3.mobile-modal-title { (spec.title) }
                button.mobile-modal-close aria-label="Cerrar"
                    data-bind=(ctx.on_click(Message::CloseModal(modal.id))) {
                    i.fas.fa-times {}
                }
            }
            div.mobile-modal-body {
                form id={ (modal.kind.as_str()) "Form" } novalidate {
                    @for section in spec.sections {
                        @if let Some(heading) = section.heading {
                            h4.mobile-form-section { (heading) }
                        }
                        @for field_spec in section.fields {
                            (field(ctx, modal, field_spec))
                        }
                    }
                }
            }
            div.mobile-modal-footer {
                button.mobile-btn.mobile-btn-outline data-bind=(ctx.on_click(Message::CloseModal(modal.id))) {
                    "Cancelar"
                }
                button.mobile-btn.mobile-btn-primary data-bind=(ctx.on_click(Message::Save(modal.id))) {
                    "Guardar"
                }
            }
        }
    }
}

pub fn toast(toast: Option<&Toast>) -> Markup {
    html! {
        @match toast {
            Some(toast) => {
                div.mobile-toast.show id="mobileToast" data-level=(toast.level.as_str()) role="status" {
                    (toast.message)
                }
            }
            None => {
                div.mobile-toast id="mobileToast" role="status" {}
            }
        }
    }
}

pub fn confirm(ctx: &RenderContext<'_>, confirm: &Confirm) -> Markup {
    html! {
        div.mobile-confirm-overlay {
            div.mobile-confirm role="alertdialog" {
                p { (confirm.message) }
                div.mobile-confirm-actions {
                    button.mobile-btn.mobile-btn-outline data-bind=(ctx.on_click(Message::DismissConfirm)) {
                        "Cancelar"
                    }
                    button.mobile-btn.mobile-btn-primary data-bind=(ctx.on_click(Message::AcceptConfirm)) {
                        "Aceptar"
                    }
                }
            }
        }
    }
}
