//! Loading / error / data contract for anything fetched over REST.

use std::fmt::Display;
use std::rc::Rc;

use gpui::{
    AnyElement, ClickEvent, IntoElement, ParentElement, RenderOnce, SharedString, Styled, Window,
    div, px,
};

use crate::components::{Banner, Button, Spinner};
use crate::id::ComponentId;
use crate::style::{Size, Variant};
use crate::tokens::Space;

type RetryHandler = Rc<dyn Fn(&ClickEvent, &mut Window, &mut gpui::App)>;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Remote<T> {
    #[default]
    Idle,
    Loading,
    Failed(SharedString),
    Ready(T),
}

impl<T> Remote<T> {
    /// Settles a finished request. Failures are logged and kept as the
    /// message shown in the error banner.
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(error) => {
                tracing::warn!(%error, "request failed");
                Self::Failed(error.to_string().into())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SharedString> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Remote<U> {
        match self {
            Self::Idle => Remote::Idle,
            Self::Loading => Remote::Loading,
            Self::Failed(message) => Remote::Failed(message),
            Self::Ready(value) => Remote::Ready(f(value)),
        }
    }
}

enum Body {
    Idle,
    Loading,
    Failed(SharedString),
    Ready(AnyElement),
}

/// Spinner while pending, red banner on failure, content once loaded.
#[derive(IntoElement)]
pub struct RemoteView {
    id: ComponentId,
    body: Body,
    loading_label: SharedString,
    on_retry: Option<RetryHandler>,
}

impl RemoteView {
    #[track_caller]
    pub fn new<T>(remote: &Remote<T>, content: impl FnOnce(&T) -> AnyElement) -> Self {
        let body = match remote {
            Remote::Idle => Body::Idle,
            Remote::Loading => Body::Loading,
            Remote::Failed(message) => Body::Failed(message.clone()),
            Remote::Ready(value) => Body::Ready(content(value)),
        };
        Self {
            id: ComponentId::auto("remote-view"),
            body,
            loading_label: "Loading…".into(),
            on_retry: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn loading_label(mut self, label: impl Into<SharedString>) -> Self {
        self.loading_label = label.into();
        self
    }

    pub fn on_retry(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut gpui::App) + 'static,
    ) -> Self {
        self.on_retry = Some(Rc::new(handler));
        self
    }
}

impl RenderOnce for RemoteView {
    fn render(self, _window: &mut Window, _cx: &mut gpui::App) -> impl IntoElement {
        match self.body {
            Body::Idle => div().into_any_element(),
            Body::Loading => div()
                .flex()
                .w_full()
                .justify_center()
                .py(px(Space::Xxl.px()))
                .child(
                    Spinner::new()
                        .with_id(self.id.slot("spinner"))
                        .label(self.loading_label),
                )
                .into_any_element(),
            Body::Failed(message) => {
                let mut banner = Banner::error(message)
                    .with_id(self.id.slot("error"))
                    .title("Something went wrong");
                if let Some(retry) = self.on_retry {
                    banner = banner.action(
                        Button::new("Retry")
                            .with_id(self.id.slot("retry"))
                            .variant(Variant::Danger)
                            .size(Size::Small)
                            .on_click(move |event, window, cx| (retry)(event, window, cx)),
                    );
                }
                banner.into_any_element()
            }
            Body::Ready(content) => content,
        }
    }
}
