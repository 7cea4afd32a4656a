use std::cell::RefCell;
use std::rc::Rc;

use gio::SimpleAction;
use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;

use flipmatch::{Game, GameConfig, Presenter, Status, Symbol};

use super::board::BoardView;
use super::dialogs::{show_about_dialog, show_instructions_dialog};
use super::hud::Hud;
use super::scheduler::GlibScheduler;

pub const APP_ID: &str = "io.github.flipmatch.Flipmatch";
const CONTENT_MARGIN: i32 = 12;

const STYLE: &str = "
.card { border-radius: 14px; }
.card.active { background-color: alpha(@accent_bg_color, 0.25); }
.status-label { margin-top: 6px; }
.timer-label { margin-bottom: 6px; }
";

/// GTK side of the game: draws the board and the HUD.
pub struct GtkPresenter {
    board: BoardView,
    hud: Hud,
    config: GameConfig,
}

impl GtkPresenter {
    fn new(config: &GameConfig) -> Self {
        GtkPresenter {
            board: BoardView::new(),
            hud: Hud::new(),
            config: config.clone(),
        }
    }

    pub fn board(&self) -> &BoardView {
        &self.board
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }
}

impl Presenter for GtkPresenter {
    fn render_grid(&mut self, deck_size: usize, per_row: usize) {
        self.board.rebuild(deck_size, per_row);
    }

    fn set_slot_display(&mut self, index: usize, revealed: bool, symbol: Symbol) {
        let glyph = revealed.then(|| self.config.glyph(symbol));
        self.board.set_face(index, glyph);
    }

    fn set_status(&mut self, status: &Status) {
        self.hud.set_status(status);
    }

    fn set_timer(&mut self, seconds: u32) {
        self.hud.set_timer(seconds);
    }

    fn set_restart_visible(&mut self, visible: bool) {
        self.hud.set_restart_visible(visible);
    }
}

type SharedGame = Rc<RefCell<Game<GlibScheduler, GtkPresenter>>>;

pub fn run(config: GameConfig) -> glib::ExitCode {
    glib::set_prgname(Some(APP_ID));
    let app = adw::Application::builder().application_id(APP_ID).build();
    app.connect_activate(move |app| build_window(app, &config));
    app.run()
}

fn build_window(app: &adw::Application, config: &GameConfig) {
    load_css();

    let game: SharedGame = Rc::new(RefCell::new(Game::new(
        config.clone(),
        GlibScheduler::new(),
        GtkPresenter::new(config),
    )));
    wire_game(&game);

    let instructions_action = SimpleAction::new("instructions", None);
    instructions_action.connect_activate({
        let app = app.clone();
        move |_, _| {
            show_instructions_dialog(&app);
        }
    });
    app.add_action(&instructions_action);

    let about_action = SimpleAction::new("about", None);
    about_action.connect_activate({
        let app = app.clone();
        move |_, _| {
            show_about_dialog(&app);
        }
    });
    app.add_action(&about_action);

    let quit_action = SimpleAction::new("quit", None);
    quit_action.connect_activate({
        let app = app.clone();
        move |_, _| app.quit()
    });
    app.add_action(&quit_action);
    app.set_accels_for_action("app.quit", &["<Control>q"]);

    let menu_model = gio::Menu::new();
    menu_model.append(Some("Instructions"), Some("app.instructions"));
    menu_model.append(Some("About Flipmatch"), Some("app.about"));
    menu_model.append(Some("Quit"), Some("app.quit"));
    let menu_button = gtk::MenuButton::builder()
        .icon_name("open-menu-symbolic")
        .menu_model(&menu_model)
        .build();

    let header = adw::HeaderBar::builder()
        .title_widget(&adw::WindowTitle::new("Flipmatch", ""))
        .build();
    header.add_css_class("flat");
    header.pack_end(&menu_button);

    let content = gtk::Box::new(gtk::Orientation::Vertical, 6);
    content.set_margin_top(CONTENT_MARGIN);
    content.set_margin_bottom(CONTENT_MARGIN);
    content.set_margin_start(CONTENT_MARGIN);
    content.set_margin_end(CONTENT_MARGIN);
    {
        let st = game.borrow();
        let hud = st.presenter().hud();
        content.append(hud.status_label());
        content.append(hud.timer_label());
        content.append(st.presenter().board().widget());
        content.append(hud.start_button());
        content.append(hud.restart_button());
    }

    let toolbar = adw::ToolbarView::new();
    toolbar.add_top_bar(&header);
    toolbar.set_content(Some(&content));

    let win = adw::ApplicationWindow::builder()
        .application(app)
        .title("Flipmatch")
        .default_width(520)
        .default_height(720)
        .content(&toolbar)
        .build();
    win.set_size_request(360, 560);
    // The window owns the game; everything else only holds weak references.
    win.connect_close_request(move |_| {
        let st = game.borrow();
        tracing::info!(
            level = st.state().level(),
            pairs = st.state().matched_pairs(),
            "window closed"
        );
        glib::Propagation::Proceed
    });
    win.present();
}

/// Routes clicks and due tasks back into the game without keeping it alive.
fn wire_game(game: &SharedGame) {
    let st = game.borrow();

    let weak = Rc::downgrade(game);
    st.scheduler().connect_dispatch(move |task| {
        if let Some(game) = weak.upgrade() {
            game.borrow_mut().run_task(task);
        }
    });

    let weak = Rc::downgrade(game);
    st.presenter().board().connect_select(move |index| {
        if let Some(game) = weak.upgrade() {
            game.borrow_mut().on_select(index);
        }
    });

    let hud = st.presenter().hud();
    hud.start_button().connect_clicked({
        let weak = Rc::downgrade(game);
        move |button| {
            button.set_visible(false);
            if let Some(game) = weak.upgrade() {
                game.borrow_mut().on_start_requested();
            }
        }
    });
    hud.restart_button().connect_clicked({
        let weak = Rc::downgrade(game);
        move |_| {
            if let Some(game) = weak.upgrade() {
                game.borrow_mut().on_restart_requested();
            }
        }
    });
}

fn load_css() {
    let Some(display) = gtk::gdk::Display::default() else {
        tracing::warn!("no display available, skipping stylesheet");
        return;
    };
    let provider = gtk::CssProvider::new();
    provider.load_from_data(STYLE);
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}
