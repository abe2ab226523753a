mod cell_input;
mod grid;
mod menu;
mod theme;

use gpui::*;
use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use crossgrid::{CrosswordError, GridProjection, Session, Settings};

use cell_input::*;
use grid::*;
use theme::Theme;

/// Environment variable holding the log filter (`debug`, `crossgrid=trace`, ...)
const LOG_LEVEL_ENV_VAR: &str = "CROSSGRID_LOG_LEVEL";

fn init_tracing_subscriber() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env(LOG_LEVEL_ENV_VAR))
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
}

fn main() -> Result<(), CrosswordError> {
    init_tracing_subscriber();

    let settings = Settings::load();
    let session = Session::new(&settings, GridProjection::new())?;
    let cell_size = settings.cell_size;
    tracing::info!("Starting with a {}x{} grid", settings.rows, settings.cols);

    Application::new().run(move |cx| {
        Theme::init(cx);

        menu::setup_menu(cx);

        cx.bind_keys([
            // Mode switching while no field is open
            KeyBinding::new("1", CharMode, Some("CrosswordGrid")),
            KeyBinding::new("2", TypeMode, Some("CrosswordGrid")),
            KeyBinding::new("3", HintMode, Some("CrosswordGrid")),
            KeyBinding::new("c", CharMode, Some("CrosswordGrid")),
            KeyBinding::new("t", TypeMode, Some("CrosswordGrid")),
            KeyBinding::new("h", HintMode, Some("CrosswordGrid")),
            KeyBinding::new("up", SelectUp, Some("CrosswordGrid")),
            KeyBinding::new("down", SelectDown, Some("CrosswordGrid")),
            KeyBinding::new("left", SelectLeft, Some("CrosswordGrid")),
            KeyBinding::new("right", SelectRight, Some("CrosswordGrid")),
            KeyBinding::new("enter", ActivateSelected, Some("CrosswordGrid")),

            // Open cell field
            KeyBinding::new("enter", CommitEdit, Some("EditingCell")),
            KeyBinding::new("escape", CommitEdit, Some("EditingCell")),
            KeyBinding::new("backspace", Backspace, Some("CellInput")),
            KeyBinding::new("left", Left, Some("CellInput")),
            KeyBinding::new("right", Right, Some("CellInput")),
            KeyBinding::new("cmd-v", Paste, Some("CellInput")),

            // Global
            KeyBinding::new("cmd-q", Quit, None),
        ]);

        cx.on_action::<Quit>(|_, cx| {
            cx.quit();
        });

        let window_options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(720.), px(720.)),
                cx,
            ))),
            titlebar: Some(TitlebarOptions {
                title: Some("crossgrid".into()),
                appears_transparent: false,
                ..Default::default()
            }),
            ..Default::default()
        };

        if let Err(e) = cx.open_window(window_options, |_window, cx| {
            cx.new(|cx| CrosswordApp::new(session, cell_size, cx))
        }) {
            tracing::error!("Failed to open window: {}", e);
            cx.quit();
        }
    });

    Ok(())
}
