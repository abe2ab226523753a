use gpui::*;

use crate::grid::{CharMode, HintMode, Quit, TypeMode};

/// Set up the application menu bar
pub fn setup_menu(cx: &mut App) {
    cx.set_menus(vec![
        Menu {
            name: "crossgrid".into(),
            items: vec![MenuItem::action("Quit", Quit)],
        },
        Menu {
            name: "Mode".into(),
            items: vec![
                MenuItem::action("Edit Letters", CharMode),
                MenuItem::action("Edit Cell Types", TypeMode),
                MenuItem::action("Edit Hint Numbers", HintMode),
            ],
        },
    ]);
}
