use std::rc::Rc;

use gpui::{
    AnyElement, ClickEvent, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    SharedString, StatefulInteractiveElement, Styled, Window, div, px,
};

use crate::id::ComponentId;
use crate::style::VariantSpec;
use crate::theme::{LocalTheme, Theme};
use crate::tokens::Space;

use super::primitives::{h_stack, v_stack};
use super::utils::quantized_stroke_px;

type SlotRenderer = Box<dyn FnOnce() -> AnyElement>;
type DismissHandler = Rc<dyn Fn(&ClickEvent, &mut Window, &mut gpui::App)>;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BannerKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl BannerKind {
    pub fn tokens(self, theme: &Theme) -> &VariantSpec {
        let tokens = &theme.components.banner;
        match self {
            Self::Info => &tokens.info,
            Self::Success => &tokens.success,
            Self::Warning => &tokens.warning,
            Self::Error => &tokens.error,
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Success => "✓",
            Self::Warning => "!",
            Self::Error => "✕",
        }
    }
}

/// Inline status strip. Error banners are how failed requests surface.
#[derive(IntoElement)]
pub struct Banner {
    id: ComponentId,
    kind: BannerKind,
    title: Option<SharedString>,
    message: SharedString,
    action: Option<SlotRenderer>,
    on_dismiss: Option<DismissHandler>,
    theme: LocalTheme,
}

impl Banner {
    #[track_caller]
    pub fn new(message: impl Into<SharedString>) -> Self {
        Self {
            id: ComponentId::auto("banner"),
            kind: BannerKind::Info,
            title: None,
            message: message.into(),
            action: None,
            on_dismiss: None,
            theme: LocalTheme::default(),
        }
    }

    #[track_caller]
    pub fn error(message: impl Into<SharedString>) -> Self {
        Self::new(message).kind(BannerKind::Error)
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn kind(mut self, kind: BannerKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn title(mut self, title: impl Into<SharedString>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Trailing control, typically a retry button.
    pub fn action(mut self, content: impl IntoElement + 'static) -> Self {
        self.action = Some(Box::new(|| content.into_any_element()));
        self
    }

    pub fn on_dismiss(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut gpui::App) + 'static,
    ) -> Self {
        self.on_dismiss = Some(Rc::new(handler));
        self
    }
}

impl RenderOnce for Banner {
    fn render(mut self, window: &mut Window, cx: &mut gpui::App) -> impl IntoElement {
        self.theme.sync_from_provider(cx);
        let spec = self.kind.tokens(&self.theme);
        let bg = self.theme.resolve_hsla(&spec.background);
        let fg = self.theme.resolve_hsla(&spec.foreground);
        let border = spec
            .border
            .as_ref()
            .map(|border| self.theme.resolve_hsla(border))
            .unwrap_or(bg);

        let tokens = &self.theme.components.banner;
        let layout = tokens.layout;
        let mut text = v_stack().flex_1().min_w_0().gap(px(layout.gap.px()));
        if let Some(title) = self.title.clone() {
            text = text.child(
                div()
                    .text_size(px(layout.title_size.px()))
                    .font_weight(gpui::FontWeight::SEMIBOLD)
                    .truncate()
                    .child(title),
            );
        }
        text = text.child(
            div()
                .text_size(px(layout.body_size.px()))
                .whitespace_normal()
                .child(self.message.clone()),
        );

        let mut row = h_stack()
            .items_start()
            .gap(px(layout.item_gap.px()))
            .child(
                div()
                    .flex_none()
                    .w(px(tokens.icon_size.px()))
                    .font_weight(gpui::FontWeight::BOLD)
                    .child(self.kind.glyph()),
            )
            .child(text);
        if let Some(action) = self.action.take() {
            row = row.child(div().flex_none().child(action()));
        }
        if let Some(handler) = self.on_dismiss.clone() {
            row = row.child(
                div()
                    .id(self.id.slot("dismiss"))
                    .flex_none()
                    .px(px(Space::Xs.px()))
                    .rounded(px(tokens.dismiss_radius.px()))
                    .cursor_pointer()
                    .hover(move |style| style.bg(fg.opacity(0.12)))
                    .child("×")
                    .on_click(move |event, window, cx| (handler)(event, window, cx)),
            );
        }

        div()
            .id(self.id.clone())
            .w_full()
            .p(px(layout.padding.px()))
            .rounded(px(tokens.radius.px()))
            .border(quantized_stroke_px(window, 1.0))
            .border_color(border)
            .bg(bg)
            .text_color(fg)
            .child(row)
    }
}

crate::impl_theme_overridable!(Banner);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_banner_uses_red_tones() {
        let theme = Theme::default();
        let error = BannerKind::Error.tokens(&theme);
        assert_eq!(
            error.background,
            crate::theme::ColorValue::palette(crate::tokens::PaletteKey::Red, 0)
        );
        assert_ne!(error, BannerKind::Info.tokens(&theme));
    }
}
