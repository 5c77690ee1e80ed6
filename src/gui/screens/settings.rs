use maud::{Markup, html};

use crate::gui::{
    message::{Feature, Message},
    router::View,
    screens::Screen,
    widgets::RenderContext,
};

// (section, icon, title, subtitle)
const SECTIONS: [(&str, &str, &str, &str); 4] = [
    ("company", "building", "Información de la Empresa", "Datos fiscales y comerciales"),
    ("notifications", "bell", "Notificaciones", "Alertas y recordatorios"),
    ("security", "lock", "Seguridad", "Contraseña y acceso"),
    ("preferences", "cog", "Preferencias", "Moneda, idioma, formato"),
];

pub struct SettingsScreen;

impl Screen for SettingsScreen {
    const VIEW: View = View::Settings;

    fn view(ctx: &RenderContext<'_>) -> Markup {
        html! {
            h2.mobile-page-title { "Configuración" }
            div.mobile-card.mobile-profile {
                div.mobile-avatar.mobile-avatar-large { i.fas.fa-user {} }
                div.mobile-profile-name { (ctx.user.name) }
                div.mobile-profile-email { (ctx.user.email) }
                button.mobile-btn.mobile-btn-outline
                    data-bind=(ctx.on_click(Message::Unavailable(Feature::EditProfile))) {
                    "Editar Perfil"
                }
            }
            div.mobile-list {
                @for (section, icon, title, subtitle) in SECTIONS {
                    div.mobile-list-item
                        data-bind=(ctx.on_click(Message::Unavailable(Feature::SettingsSection(section)))) {
                        i class={ "fas fa-" (icon) } {}
                        div.mobile-list-item-content {
                            div.mobile-list-item-title { (title) }
                            div.mobile-list-item-subtitle { (subtitle) }
                        }
                        i.fas.fa-chevron-right.mobile-list-item-action {}
                    }
                }
            }
            div.mobile-page-actions {
                button.mobile-btn.mobile-btn-outline.mobile-btn-danger data-bind=(ctx.on_click(Message::Logout)) {
                    i.fas.fa-sign-out-alt {} " Cerrar Sesión"
                }
            }
        }
    }
}
