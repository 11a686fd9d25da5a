use gpui::{Div, Styled, div};

pub fn h_stack() -> Div {
    div().flex().flex_row().items_center()
}

pub fn v_stack() -> Div {
    div().flex().flex_col()
}

/// Absolutely positioned layer covering its parent.
pub fn fill_layer() -> Div {
    div().absolute().top_0().left_0().right_0().bottom_0()
}
